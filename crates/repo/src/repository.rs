//! Cache-first repository over one content type.

use std::collections::HashMap;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use marquee_cache::{CacheEntity, Store};
use marquee_model::FilterKey;
use marquee_remote::RemoteHandle;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::policy::CachePolicy;

/// Orchestrates the cache and the remote source for one content type.
///
/// The repository owns no state beyond an advance gate per filter; it is a
/// policy layer gluing a [`Store`] to a [`RemoteHandle`]. Clones share both
/// collaborators and the gates, so a repository can be handed to every
/// screen that needs the content type.
pub struct Repository<T: CacheEntity> {
    store: Store<T>,
    remote: RemoteHandle<T>,
    advances: Arc<Mutex<HashMap<FilterKey, Arc<Mutex<()>>>>>,
}

impl<T: CacheEntity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            remote: Arc::clone(&self.remote),
            advances: Arc::clone(&self.advances),
        }
    }
}

impl<T: CacheEntity> Repository<T> {
    pub fn new(store: Store<T>, remote: RemoteHandle<T>) -> Self {
        Self { store, remote, advances: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// Fetch one page of a filter partition.
    ///
    /// Under [`CacheFirst`](CachePolicy::CacheFirst) a fresh cached page is
    /// returned without touching the network. On a miss (or under
    /// [`RemoteFirst`](CachePolicy::RemoteFirst)) the page is fetched
    /// remotely and written back before returning. A write-back failure
    /// fails the whole fetch: a page the caller saw but the cache didn't
    /// keep would desynchronize every live stream from the caller's view.
    #[instrument(skip_all, fields(source = self.remote.name(), filter = %filter, page))]
    pub async fn fetch(&self, filter: &FilterKey, page: u32, policy: CachePolicy) -> Result<Vec<T>> {
        if policy == CachePolicy::CacheFirst {
            if let Some(items) = self.store.read(filter, page).await.map_err(ErrorKind::cache)? {
                tracing::debug!(count = items.len(), "cache hit");
                return Ok(items);
            }
        }
        let items = self.remote.fetch_page(filter, page).await.map_err(ErrorKind::remote)?;
        self.store.write(&items, filter, page).await.map_err(ErrorKind::cache)?;
        tracing::debug!(count = items.len(), "fetched and cached");
        Ok(items)
    }

    /// Fetch the full detail record for a single item.
    ///
    /// Details go straight to the remote source; they aren't part of any
    /// page and aren't cached here.
    pub async fn detail(&self, id: u64) -> Result<T> {
        self.remote.fetch_detail(id).await.map_err(ErrorKind::remote)
    }

    /// Live view of a filter partition, straight off the cache.
    ///
    /// Stream activity alone never triggers remote work; pair this with
    /// [`fetch`](Self::fetch) or [`next_page`](Self::next_page) to populate it.
    pub fn stream(&self, filter: &FilterKey) -> impl Stream<Item = Result<Option<Vec<T>>>> + Send + 'static + use<T> {
        self.store.stream(filter).map(|result| result.map_err(ErrorKind::cache))
    }

    /// Fetch and cache the page after the highest cached one, advancing
    /// every live stream for the filter.
    ///
    /// Advances for the same filter are serialized through a per-filter
    /// gate: two concurrent calls would otherwise both observe the same
    /// cursor and duplicate-fetch the same page. A call that arrives while
    /// another is in flight waits its turn and then advances from the
    /// *updated* cursor.
    #[instrument(skip_all, fields(source = self.remote.name(), filter = %filter))]
    pub async fn next_page(&self, filter: &FilterKey) -> Result<()> {
        let gate = self.advance_gate(filter).await;
        let _held = gate.lock().await;
        let page = self.store.current_page(filter).await.map_err(ErrorKind::cache)?.unwrap_or(0) + 1;
        let items = self.remote.fetch_page(filter, page).await.map_err(ErrorKind::remote)?;
        self.store.write(&items, filter, page).await.map_err(ErrorKind::cache)?;
        tracing::debug!(page, count = items.len(), "advanced pagination cursor");
        Ok(())
    }

    async fn advance_gate(&self, filter: &FilterKey) -> Arc<Mutex<()>> {
        let mut gates = self.advances.lock().await;
        Arc::clone(gates.entry(filter.clone()).or_default())
    }
}
