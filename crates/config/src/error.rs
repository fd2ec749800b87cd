//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A configuration source could not be read or merged.
    #[display("invalid configuration")]
    Invalid,
    /// Platform directories (config/data locations) could not be resolved.
    #[display("could not determine platform directories")]
    Directories,
}
