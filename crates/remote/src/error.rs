//! Remote Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A remote-source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. The upstream client maps its transport/API errors into these
/// three before they cross the crate boundary.
#[derive(Debug, Clone, Display, Error)]
pub enum ErrorKind {
    /// The requested item or page does not exist upstream.
    #[display("not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// Credentials are missing, invalid, or expired.
    #[display("unauthorised")]
    Unauthorised,
    /// Everything else: transport failures, malformed responses, upstream
    /// 5xx responses.
    #[display("remote error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}
