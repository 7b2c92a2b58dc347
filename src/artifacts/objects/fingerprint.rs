//! Content fingerprints
//!
//! A fingerprint is the lowercase hexadecimal SHA-1 of an object's bytes.
//! Equal byte strings always fingerprint identically, on every platform and
//! across runs. The hash is an identifier, not a trust token: the store
//! makes no integrity claims beyond content addressing.
//!
//! ## Format
//!
//! - Full: 40 lowercase hex characters
//! - Short: first 7 characters, used for display only

use crate::artifacts::objects::FINGERPRINT_LENGTH;
use sha1::{Digest, Sha1};

/// Identifier of a stored object (40 lowercase hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a byte string.
    pub fn of(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);
        let digest = hasher.finalize();
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Parse and validate a fingerprint read from disk.
    pub fn try_parse(raw: impl Into<String>) -> anyhow::Result<Self> {
        let raw = raw.into();
        if raw.len() != FINGERPRINT_LENGTH {
            anyhow::bail!("invalid fingerprint length: {}", raw.len());
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            anyhow::bail!("invalid fingerprint characters: {}", raw);
        }
        Ok(Self(raw))
    }

    /// Parse a field whose empty value means "absent" (a root commit's
    /// parent, a fresh branch's tip).
    pub fn try_parse_optional(raw: &str) -> anyhow::Result<Option<Self>> {
        if raw.is_empty() {
            Ok(None)
        } else {
            Self::try_parse(raw).map(Some)
        }
    }

    /// Abbreviated form for display.
    pub fn to_short(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_digest() {
        let fingerprint = Fingerprint::of(b"hello\n");
        assert_eq!(
            fingerprint.as_ref(),
            "f572d396fae9206628714fb2ce00f72e94f2258f"
        );
    }

    #[test]
    fn test_try_parse_rejects_uppercase() {
        let raw = "F572D396FAE9206628714FB2CE00F72E94F2258F".to_string();
        assert!(Fingerprint::try_parse(raw).is_err());
    }

    #[test]
    fn test_try_parse_optional_empty_is_absent() {
        assert_eq!(Fingerprint::try_parse_optional("").unwrap(), None);
    }

    proptest! {
        #[test]
        fn test_fingerprint_is_deterministic(content in proptest::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(Fingerprint::of(&content), Fingerprint::of(&content));
        }

        #[test]
        fn test_fingerprint_round_trips_through_parse(content in proptest::collection::vec(any::<u8>(), 0..64)) {
            let fingerprint = Fingerprint::of(&content);
            let reparsed = Fingerprint::try_parse(fingerprint.as_ref().to_string()).unwrap();
            prop_assert_eq!(fingerprint, reparsed);
        }

        #[test]
        fn test_fingerprint_shape(content in proptest::collection::vec(any::<u8>(), 0..64)) {
            let fingerprint = Fingerprint::of(&content);
            prop_assert_eq!(fingerprint.as_ref().len(), FINGERPRINT_LENGTH);
            prop_assert!(fingerprint.as_ref().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
