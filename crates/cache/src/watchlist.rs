//! Persisted watchlist references.
//!
//! The watchlist is deliberately dumb: (content kind, id, added_at) rows,
//! nothing else. Turning references into display-ready details is the
//! use-case layer's job, precisely so a stale or missing detail can degrade
//! gracefully instead of corrupting saved state.

use async_stream::stream;
use exn::ResultExt;
use futures::Stream;
use marquee_model::{ContentKind, WatchlistEntry};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::db::Database;
use crate::error::{ErrorKind, Result};
use crate::models::WatchlistRow;
use crate::notify::ChangeNotifier;

/// Store for saved content references.
///
/// Same sharing rules as [`Store`](crate::Store): construct once, clone
/// freely; clones share the change notifier.
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    pool: SqlitePool,
    notifier: ChangeNotifier,
}

impl From<&Database> for WatchlistStore {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone(), notifier: ChangeNotifier::new() }
    }
}

impl WatchlistStore {
    /// Save a reference. Returns `false` if it was already saved (the
    /// original `added_at` is kept, preserving list order).
    #[instrument(skip_all, fields(kind = %entry.kind, id = entry.id))]
    pub async fn add(&self, entry: &WatchlistEntry) -> Result<bool> {
        let row = WatchlistRow::try_from(entry)?;
        let result = sqlx::query(include_str!("../queries/watchlist_add.sql"))
            .bind(row.content_type)
            .bind(row.entity_id)
            .bind(row.added_at)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let inserted = result.rows_affected() > 0;
        if inserted {
            self.notifier.publish();
        }
        Ok(inserted)
    }

    /// Remove a reference. Returns `false` if it wasn't saved.
    pub async fn remove(&self, kind: ContentKind, id: u64) -> Result<bool> {
        let result = sqlx::query(include_str!("../queries/watchlist_remove.sql"))
            .bind(kind.as_str())
            .bind(i64::try_from(id).or_raise(|| ErrorKind::InvalidData("entity id"))?)
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let removed = result.rows_affected() > 0;
        if removed {
            self.notifier.publish();
        }
        Ok(removed)
    }

    /// All saved references in the order they were added.
    pub async fn list(&self) -> Result<Vec<WatchlistEntry>> {
        let rows: Vec<WatchlistRow> = sqlx::query_as(include_str!("../queries/watchlist_list.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(WatchlistEntry::try_from).collect()
    }

    /// Live view of the saved references.
    ///
    /// Emits the full list on subscription and after every add/remove. An
    /// empty watchlist is an empty list, not `None` - unlike a feed, the
    /// watchlist always "exists".
    pub fn stream(&self) -> impl Stream<Item = Result<Vec<WatchlistEntry>>> + Send + 'static {
        let store = self.clone();
        let mut rx = self.notifier.subscribe();
        stream!({
            loop {
                rx.borrow_and_update();
                yield store.list().await;
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}
