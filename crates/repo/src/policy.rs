//! Read strategy for one-shot fetches.

/// How [`Repository::fetch`](crate::Repository::fetch) consults its sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Serve from the cache when fresh; fall back to the remote source on a
    /// miss. The default, and the right choice for almost everything.
    #[default]
    CacheFirst,
    /// Skip the cache read (pull-to-refresh). The fetched page is still
    /// written back, so streams and later cache-first reads observe it.
    RemoteFirst,
}
