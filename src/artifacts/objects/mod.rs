pub mod commit;
pub mod fingerprint;

/// Length of a hex-encoded fingerprint (SHA-1).
pub const FINGERPRINT_LENGTH: usize = 40;
