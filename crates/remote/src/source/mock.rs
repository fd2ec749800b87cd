//! In-memory remote source for testing.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use marquee_model::FilterKey;

use crate::error::{ErrorKind, Result};
use crate::images::{ImageConfig, ImageConfigSource};
use crate::source::RemoteSource;

/// In-memory remote source for testing.
///
/// Pages and details are plain `HashMap`s behind `RwLock`s, so all trait
/// methods operate on `&self` without external synchronisation. Call
/// counters let tests assert that a cache hit made *zero* remote calls.
///
/// # Examples
///
/// ```
/// use marquee_model::FilterKey;
/// use marquee_remote::{MockRemote, RemoteSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let remote = MockRemote::new().with_page(FilterKey::none(), 1, vec!["first", "second"]);
/// let items = remote.fetch_page(&FilterKey::none(), 1).await?;
/// assert_eq!(items.len(), 2);
/// assert_eq!(remote.pages_fetched(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockRemote<T> {
    name: String,
    pages: RwLock<HashMap<(FilterKey, u32), Vec<T>>>,
    details: RwLock<HashMap<u64, T>>,
    fail_with: RwLock<Option<ErrorKind>>,
    page_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl<T> Default for MockRemote<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MockRemote<T> {
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            pages: RwLock::new(HashMap::new()),
            details: RwLock::new(HashMap::new()),
            fail_with: RwLock::new(None),
            page_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    /// Change the name of the mock source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Pre-populate one page of a filter partition.
    pub fn with_page(self, filter: FilterKey, page: u32, items: Vec<T>) -> Self {
        self.set_page(filter, page, items);
        self
    }

    /// Pre-populate a detail record.
    pub fn with_detail(self, id: u64, item: T) -> Self {
        self.details.write().unwrap().insert(id, item);
        self
    }

    /// Replace one page after construction (e.g. to simulate upstream data
    /// changing between fetches).
    pub fn set_page(&self, filter: FilterKey, page: u32, items: Vec<T>) {
        self.pages.write().unwrap().insert((filter, page), items);
    }

    /// Make every subsequent call fail with the given kind until cleared
    /// with `None`.
    pub fn set_failure(&self, kind: Option<ErrorKind>) {
        *self.fail_with.write().unwrap() = kind;
    }

    /// Number of `fetch_page` calls made so far.
    pub fn pages_fetched(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_detail` calls made so far.
    pub fn details_fetched(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    fn scripted_failure(&self) -> Option<ErrorKind> {
        self.fail_with.read().unwrap().clone()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> RemoteSource<T> for MockRemote<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_page(&self, filter: &FilterKey, page: u32) -> Result<Vec<T>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(kind) = self.scripted_failure() {
            exn::bail!(kind);
        }
        let pages = self.pages.read().unwrap();
        match pages.get(&(filter.clone(), page)) {
            Some(items) => Ok(items.clone()),
            None => exn::bail!(ErrorKind::NotFound(format!("page {page} of {filter}"))),
        }
    }

    async fn fetch_detail(&self, id: u64) -> Result<T> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(kind) = self.scripted_failure() {
            exn::bail!(kind);
        }
        let details = self.details.read().unwrap();
        match details.get(&id) {
            Some(item) => Ok(item.clone()),
            None => exn::bail!(ErrorKind::NotFound(format!("detail {id}"))),
        }
    }
}

/// In-memory image configuration source for testing.
///
/// Can be scripted to fail the next N fetches, which is how tests exercise
/// the "skip this emission, keep the stream open" behaviour of the use-case
/// layer.
pub struct MockImageConfigSource {
    config: ImageConfig,
    fail_next: AtomicUsize,
}

impl MockImageConfigSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: ImageConfig { secure_base_url: base_url.into() },
            fail_next: AtomicUsize::new(0),
        }
    }

    /// Fail the next `n` fetches with [`ErrorKind::Unknown`], then recover.
    pub fn fail_next(&self, n: usize) {
        self.fail_next.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl ImageConfigSource for MockImageConfigSource {
    async fn fetch(&self) -> Result<ImageConfig> {
        let remaining = self.fail_next.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_next.store(remaining - 1, Ordering::SeqCst);
            exn::bail!(ErrorKind::Unknown);
        }
        Ok(self.config.clone())
    }
}
