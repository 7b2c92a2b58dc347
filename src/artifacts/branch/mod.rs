//! Branch naming
//!
//! Branch names are opaque identifiers validated at the boundary. The
//! reference files use `:` as the name/tip separator and newlines as record
//! separators, so neither may appear in a name.

pub mod branch_name;

/// The branch every repository starts with.
pub const DEFAULT_BRANCH: &str = "master";

/// Regex pattern for characters that can never appear in a branch name:
/// control characters, spaces, the `:` separator, and DEL.
pub const INVALID_BRANCH_NAME_REGEX: &str = r"[\x00-\x20:\x7f]";
