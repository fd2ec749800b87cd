//! SQLite cache database for content metadata.
//!
//! This crate provides the local cache that backs every paged collection in
//! the app. The database is not the source of truth - the upstream provider
//! is. If the database is deleted, every feed simply re-fetches on its next
//! cache miss.
//!
//! # Architecture
//! The cache is an arena plus an index:
//! - **Entities**: one row per content item, keyed by (content type, stable
//!   id), holding the serialized payload and a `cached_at` timestamp. A
//!   payload is shared by every page that references the item; updating it
//!   updates all of them.
//! - **Page entries**: ordered (filter key, page, position) -> entity
//!   references. Rewriting page N of a filter partition deletes every index
//!   row for pages >= N first (the invalidation cascade), so cached pages
//!   always form a contiguous prefix from page 1.
//!
//! Reads past the TTL count as a miss, never as stale-but-usable, and
//! proactively drop the expired page and everything after it.
//!
//! Live views are an explicit contract: every committed write publishes a
//! change notification, and [`Store::stream`] re-runs the filter-scoped join
//! on each tick. SQLite gives us no reactive queries for free.

mod db;
mod entity;
pub mod error;
mod models;
mod notify;
mod store;
mod watchlist;

pub use crate::db::Database;
pub use crate::entity::CacheEntity;
pub use crate::notify::ChangeNotifier;
pub use crate::store::Store;
pub use crate::watchlist::WatchlistStore;

/// Default maximum age before a cached page counts as a miss.
pub const DEFAULT_TTL: std::time::Duration = std::time::Duration::from_secs(12 * 60 * 60);
