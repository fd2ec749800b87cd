//! Remote source trait.
//!
//! One implementation per content type talks to the upstream API; the
//! repository layer only ever sees this trait. It's a glorified two-method
//! fetcher, but keeping it object-safe means test doubles slot straight in.

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use self::mock::{MockImageConfigSource, MockRemote};
use crate::error::Result;
use async_trait::async_trait;
use marquee_model::FilterKey;
use std::sync::Arc;

/// Shareable handle to a remote source.
pub type RemoteHandle<T> = Arc<dyn RemoteSource<T>>;

/// Fetches content items from the upstream metadata provider.
///
/// Implementations are stateless value types (a client handle plus
/// credentials) and freely shareable; all synchronization concerns live in
/// the cache layer.
#[async_trait]
pub trait RemoteSource<T>: Send + Sync {
    /// Name of the upstream feed (used for logging only).
    fn name(&self) -> &str;

    /// Fetch one page of items for a filter partition.
    ///
    /// Pages are 1-indexed, matching the upstream API. An out-of-range page
    /// fails with [`NotFound`](crate::error::ErrorKind::NotFound).
    async fn fetch_page(&self, filter: &FilterKey, page: u32) -> Result<Vec<T>>;

    /// Fetch the full detail record for a single item.
    async fn fetch_detail(&self, id: u64) -> Result<T>;
}
