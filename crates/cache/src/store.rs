//! The generic cache-store engine.
//!
//! One [`Store`] per content type, all sharing a [`Database`]. Every query
//! is scoped by the entity's `CONTENT_TYPE` and a [`FilterKey`], so filter
//! partitions (and content types) never observe each other's writes,
//! reads, or invalidations.

use std::marker::PhantomData;
use std::time::Duration;

use async_stream::stream;
use exn::ResultExt;
use futures::Stream;
use marquee_model::FilterKey;
use sqlx::SqlitePool;
use time::UtcDateTime;
use tracing::instrument;

use crate::db::Database;
use crate::entity::CacheEntity;
use crate::error::{ErrorKind, Result};
use crate::models::PageRow;
use crate::notify::ChangeNotifier;

/// Cache-backed paged store for one content type.
///
/// Construct exactly one per content type and clone it wherever it's
/// needed; clones share the connection pool *and* the change notifier, so a
/// write through any clone wakes every live stream. Two independently
/// constructed stores for the same type would have disjoint notifiers.
#[derive(Debug)]
pub struct Store<T: CacheEntity> {
    pool: SqlitePool,
    notifier: ChangeNotifier,
    ttl_secs: i64,
    _entity: PhantomData<fn() -> T>,
}

impl<T: CacheEntity> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            notifier: self.notifier.clone(),
            ttl_secs: self.ttl_secs,
            _entity: PhantomData,
        }
    }
}

impl<T: CacheEntity> Store<T> {
    /// Create a store over the given database with the given TTL.
    pub fn new(db: &Database, ttl: Duration) -> Self {
        Self {
            pool: db.pool().clone(),
            notifier: ChangeNotifier::new(),
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            _entity: PhantomData,
        }
    }

    /// Read one cached page for a filter partition.
    ///
    /// Returns `None` on a miss: either no rows exist for (filter, page), or
    /// the page has outlived the TTL. An expired page also invalidates trust
    /// in everything fetched after it, so all index rows for that filter
    /// with page >= the requested page are deleted before returning `None`.
    /// A plain empty result deletes nothing.
    pub async fn read(&self, filter: &FilterKey, page: u32) -> Result<Option<Vec<T>>> {
        let rows: Vec<PageRow> = sqlx::query_as(include_str!("../queries/read_page.sql"))
            .bind(T::CONTENT_TYPE)
            .bind(filter.as_str())
            .bind(i64::from(page))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        if rows.is_empty() {
            return Ok(None);
        }
        let now = UtcDateTime::now().unix_timestamp();
        if rows.iter().any(|row| now - row.cached_at > self.ttl_secs) {
            tracing::debug!(
                content = T::CONTENT_TYPE,
                filter = %filter,
                page,
                "cached page expired, invalidating it and everything after"
            );
            self.invalidate_from(filter, page).await?;
            return Ok(None);
        }
        let items = rows.into_iter().map(PageRow::decode).collect::<Result<Vec<T>>>()?;
        Ok(Some(items))
    }

    /// Write one page of a filter partition.
    ///
    /// Atomically (one transaction): deletes every index row for (filter,
    /// page' >= page), upserts each item into the entity arena by stable id,
    /// and inserts fresh index rows at positions `0..n-1`. Items already in
    /// the arena are updated in place, so every other page referencing them
    /// observes the new payload.
    #[instrument(skip_all, fields(content = T::CONTENT_TYPE, filter = %filter, page, count = items.len()))]
    pub async fn write(&self, items: &[T], filter: &FilterKey, page: u32) -> Result<()> {
        let now = UtcDateTime::now().unix_timestamp();
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        sqlx::query(include_str!("../queries/delete_pages_from.sql"))
            .bind(T::CONTENT_TYPE)
            .bind(filter.as_str())
            .bind(i64::from(page))
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        for (position, item) in items.iter().enumerate() {
            let id = i64::try_from(item.entity_id()).or_raise(|| ErrorKind::InvalidData("entity id"))?;
            let payload = serde_json::to_string(item).or_raise(|| ErrorKind::InvalidData("payload"))?;
            sqlx::query(include_str!("../queries/upsert_entity.sql"))
                .bind(T::CONTENT_TYPE)
                .bind(id)
                .bind(payload)
                .bind(now)
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
            sqlx::query(include_str!("../queries/insert_page_entry.sql"))
                .bind(T::CONTENT_TYPE)
                .bind(filter.as_str())
                .bind(i64::from(page))
                .bind(i64::try_from(position).or_raise(|| ErrorKind::InvalidData("position"))?)
                .bind(id)
                .bind(now)
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        self.notifier.publish();
        Ok(())
    }

    /// Highest cached page number for a filter partition, or `None` if
    /// nothing is cached. Pages form a contiguous prefix from 1 (enforced by
    /// the write cascade), so this doubles as the pagination cursor.
    pub async fn current_page(&self, filter: &FilterKey) -> Result<Option<u32>> {
        let max: Option<i64> = sqlx::query_scalar(include_str!("../queries/current_page.sql"))
            .bind(T::CONTENT_TYPE)
            .bind(filter.as_str())
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        max.map(|page| u32::try_from(page).or_raise(|| ErrorKind::InvalidData("page number"))).transpose()
    }

    /// Live view of a filter partition.
    ///
    /// Emits the concatenation of all cached pages (ordered by page, then
    /// position) immediately on subscription and again after every store
    /// change, or `None` while the partition is empty. The stream never
    /// triggers remote work and ends only when the consumer drops it.
    pub fn stream(&self, filter: &FilterKey) -> impl Stream<Item = Result<Option<Vec<T>>>> + Send + 'static + use<T> {
        let store = self.clone();
        let filter = filter.clone();
        let mut rx = self.notifier.subscribe();
        stream!({
            loop {
                // Mark the current generation seen *before* querying, so a
                // write racing the query still triggers a re-emission.
                rx.borrow_and_update();
                yield store.snapshot(&filter).await;
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    async fn snapshot(&self, filter: &FilterKey) -> Result<Option<Vec<T>>> {
        let rows: Vec<PageRow> = sqlx::query_as(include_str!("../queries/read_all_pages.sql"))
            .bind(T::CONTENT_TYPE)
            .bind(filter.as_str())
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        if rows.is_empty() {
            return Ok(None);
        }
        let items = rows.into_iter().map(PageRow::decode).collect::<Result<Vec<T>>>()?;
        Ok(Some(items))
    }

    async fn invalidate_from(&self, filter: &FilterKey, page: u32) -> Result<u64> {
        let result = sqlx::query(include_str!("../queries/delete_pages_from.sql"))
            .bind(T::CONTENT_TYPE)
            .bind(filter.as_str())
            .bind(i64::from(page))
            .execute(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        if result.rows_affected() > 0 {
            self.notifier.publish();
        }
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use marquee_model::{Movie, TvSeries};
    use std::pin::pin;
    use tokio::time::timeout;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: None,
            release_date: None,
            genre_ids: vec![],
            vote_average: 0.0,
            vote_count: 0,
            poster_path: None,
            backdrop_path: None,
        }
    }

    fn series(id: u64, name: &str) -> TvSeries {
        TvSeries {
            id,
            name: name.to_string(),
            overview: None,
            first_air_date: None,
            genre_ids: vec![],
            vote_average: 0.0,
            vote_count: 0,
            poster_path: None,
            backdrop_path: None,
        }
    }

    fn store<T: CacheEntity>(db: &Database) -> Store<T> {
        Store::new(db, Duration::from_secs(60 * 60))
    }

    /// Shift every cached timestamp for a filter partition into the past.
    async fn backdate(db: &Database, filter: &FilterKey, page: u32, secs: i64) {
        sqlx::query("UPDATE page_entries SET cached_at = cached_at - ?1 WHERE filter_key = ?2 AND page = ?3")
            .bind(secs)
            .bind(filter.as_str())
            .bind(i64::from(page))
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_read_empty_is_none_not_error() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        assert_eq!(movies.read(&FilterKey::none(), 1).await.unwrap(), None);
        assert_eq!(movies.current_page(&FilterKey::none()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read_preserves_order() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let filter = FilterKey::none();
        let page = vec![movie(3, "c"), movie(1, "a"), movie(2, "b")];
        movies.write(&page, &filter, 1).await.unwrap();
        let read = movies.read(&filter, 1).await.unwrap().unwrap();
        // Page order is position order, not id order.
        assert_eq!(read, page);
    }

    #[tokio::test]
    async fn test_write_cascade_drops_later_pages_only() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let filter = FilterKey::none();
        movies.write(&[movie(1, "p1")], &filter, 1).await.unwrap();
        movies.write(&[movie(2, "p2-old")], &filter, 2).await.unwrap();
        movies.write(&[movie(3, "p3")], &filter, 3).await.unwrap();

        movies.write(&[movie(4, "p2-new")], &filter, 2).await.unwrap();

        assert_eq!(movies.read(&filter, 1).await.unwrap().unwrap()[0].title, "p1");
        assert_eq!(movies.read(&filter, 2).await.unwrap().unwrap()[0].title, "p2-new");
        assert_eq!(movies.read(&filter, 3).await.unwrap(), None);
        assert_eq!(movies.current_page(&filter).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_expiry_is_a_miss_and_invalidates_trailing_pages() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let filter = FilterKey::none();
        movies.write(&[movie(1, "p1")], &filter, 1).await.unwrap();
        movies.write(&[movie(2, "p2")], &filter, 2).await.unwrap();
        backdate(&db, &filter, 1, 60 * 60 * 24).await;

        assert_eq!(movies.read(&filter, 1).await.unwrap(), None);
        // Page 2 was fetched after the now-expired page 1; it can't be
        // trusted either.
        assert_eq!(movies.read(&filter, 2).await.unwrap(), None);
        assert_eq!(movies.current_page(&filter).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_trailing_page_keeps_earlier_pages() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let filter = FilterKey::none();
        movies.write(&[movie(1, "p1")], &filter, 1).await.unwrap();
        movies.write(&[movie(2, "p2")], &filter, 2).await.unwrap();
        backdate(&db, &filter, 2, 60 * 60 * 24).await;

        assert_eq!(movies.read(&filter, 2).await.unwrap(), None);
        assert!(movies.read(&filter, 1).await.unwrap().is_some());
        assert_eq!(movies.current_page(&filter).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_filter_partitions_are_independent() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let action = FilterKey::custom("g28");
        let unfiltered = FilterKey::none();
        movies.write(&[movie(1, "action")], &action, 1).await.unwrap();
        movies.write(&[movie(2, "any")], &unfiltered, 1).await.unwrap();

        // Rewriting (and thereby cascading) one partition leaves the other
        // alone, sentinel included.
        movies.write(&[movie(3, "action-new")], &action, 1).await.unwrap();
        assert_eq!(movies.read(&unfiltered, 1).await.unwrap().unwrap()[0].title, "any");
        assert_eq!(movies.read(&action, 1).await.unwrap().unwrap()[0].title, "action-new");

        backdate(&db, &action, 1, 60 * 60 * 24).await;
        assert_eq!(movies.read(&action, 1).await.unwrap(), None);
        assert!(movies.read(&unfiltered, 1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_entity_payload_is_shared_across_partitions() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let a = FilterKey::custom("a");
        let b = FilterKey::custom("b");
        movies.write(&[movie(603, "The Matrix")], &a, 1).await.unwrap();
        movies.write(&[movie(603, "The Matrix (Remastered)")], &b, 1).await.unwrap();

        // One arena row; the second write updated it in place, and the page
        // under filter `a` observes the new payload.
        assert_eq!(movies.read(&a, 1).await.unwrap().unwrap()[0].title, "The Matrix (Remastered)");
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entities WHERE content_type = 'movie'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_content_types_do_not_collide() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let shows = store::<TvSeries>(&db);
        let filter = FilterKey::none();
        // Same id, different content types.
        movies.write(&[movie(42, "a movie")], &filter, 1).await.unwrap();
        shows.write(&[series(42, "a show")], &filter, 1).await.unwrap();
        assert_eq!(movies.read(&filter, 1).await.unwrap().unwrap()[0].title, "a movie");
        assert_eq!(shows.read(&filter, 1).await.unwrap().unwrap()[0].name, "a show");
    }

    #[tokio::test]
    async fn test_stream_emits_on_every_write() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let filter = FilterKey::none();
        let mut stream = pin!(movies.stream(&filter));

        // Initial emission reflects the empty partition.
        let first = timeout(Duration::from_secs(1), stream.next()).await.unwrap().unwrap().unwrap();
        assert_eq!(first, None);

        movies.write(&[movie(1, "a"), movie(2, "b")], &filter, 1).await.unwrap();
        let second = timeout(Duration::from_secs(1), stream.next()).await.unwrap().unwrap().unwrap();
        assert_eq!(second.unwrap().len(), 2);

        // A later page extends the concatenated view in (page, position) order.
        movies.write(&[movie(3, "c")], &filter, 2).await.unwrap();
        let third = timeout(Duration::from_secs(1), stream.next()).await.unwrap().unwrap().unwrap();
        let titles: Vec<_> = third.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_prune_orphans_spares_referenced_entities() {
        let db = Database::connect_in_memory().await.unwrap();
        let movies = store::<Movie>(&db);
        let filter = FilterKey::none();
        movies.write(&[movie(1, "kept"), movie(2, "orphaned")], &filter, 1).await.unwrap();
        // Rewriting page 1 with only movie 1 leaves movie 2's arena row
        // unreferenced (retained by default for cross-filter reuse).
        movies.write(&[movie(1, "kept")], &filter, 1).await.unwrap();

        let pruned = db.prune_orphans().await.unwrap();
        assert_eq!(pruned, 1);
        assert_eq!(movies.read(&filter, 1).await.unwrap().unwrap().len(), 1);
    }
}
