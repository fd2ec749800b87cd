//! Repository Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! The repository sits on the boundary between the cache and remote crates
//! and re-maps both of their taxonomies into the one callers act on:
//! remote not-found and unauthorised pass through, everything else
//! (persistence failures included) collapses into `Unknown`.

use derive_more::{Display, Error};
use marquee_cache::error::Error as CacheError;
use marquee_remote::error::{Error as RemoteError, ErrorKind as RemoteErrorKind};

/// A repository error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong
/// internally. There is no automatic retry anywhere in this crate; whether
/// to retry is a caller decision, guided by [`is_retryable`](Self::is_retryable).
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The requested item or page does not exist upstream.
    #[display("not found: {_0}")]
    NotFound(#[error(not(source))] String),
    /// Credentials are missing, invalid, or expired.
    #[display("unauthorised")]
    Unauthorised,
    /// Persistence failures, unmapped remote failures, and everything else.
    #[display("repository error")]
    Unknown,
}

impl ErrorKind {
    /// Convert a remote-source error into a repository error, preserving the
    /// remote crate's `Exn` frame (error tree) as a child in its own error
    /// tree.
    #[track_caller]
    pub fn remote(err: RemoteError) -> Error {
        let kind = match &*err {
            RemoteErrorKind::NotFound(what) => Self::NotFound(what.clone()),
            RemoteErrorKind::Unauthorised => Self::Unauthorised,
            RemoteErrorKind::Unknown => Self::Unknown,
        };
        err.raise(kind)
    }

    /// Convert a cache error into a repository error. All persistence
    /// failures surface as [`Unknown`](Self::Unknown): the caller can't fix
    /// a broken database by acting differently.
    #[track_caller]
    pub fn cache(err: CacheError) -> Error {
        err.raise(Self::Unknown)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}
