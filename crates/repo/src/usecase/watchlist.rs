//! The watchlist screen's enriched feed.

use std::pin::pin;

use async_stream::stream;
use futures::{Stream, StreamExt};
use marquee_cache::WatchlistStore;
use marquee_model::{ContentKind, ImageRole, ImageSize, Movie, TvSeries, WatchlistEntry};
use marquee_remote::{ImageConfig, ImageConfigHandle, RemoteHandle};
use marquee_streams::StreamDedupExt;
use time::UtcDateTime;

use crate::error::{ErrorKind, Result};

/// A saved reference resolved into a display-ready item.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistItem {
    pub kind: ContentKind,
    pub id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub added_at: UtcDateTime,
}

/// Enriches watchlist references into full details as they change.
///
/// The store only holds (kind, id, added_at) references; this feed resolves
/// each into a detail record plus a concrete poster URL on every emission.
/// Two failure modes are deliberately tolerant:
///
/// - a single reference failing to resolve is dropped from that emission,
///   keeping the rest of the list intact and ordered;
/// - the image configuration failing skips the emission entirely, leaving
///   the consumer on its last good snapshot until the next store change.
#[derive(Clone)]
pub struct WatchlistFeed {
    watchlist: WatchlistStore,
    movies: RemoteHandle<Movie>,
    series: RemoteHandle<TvSeries>,
    image_config: ImageConfigHandle,
}

impl WatchlistFeed {
    pub fn new(
        watchlist: WatchlistStore,
        movies: RemoteHandle<Movie>,
        series: RemoteHandle<TvSeries>,
        image_config: ImageConfigHandle,
    ) -> Self {
        Self { watchlist, movies, series, image_config }
    }

    /// Live list of enriched watchlist items, in the order they were saved.
    pub fn stream(&self) -> impl Stream<Item = Result<Vec<WatchlistItem>>> + Send + 'static {
        let feed = self.clone();
        let changes = self.watchlist.stream();
        stream!({
            let mut changes = pin!(changes);
            while let Some(result) = changes.next().await {
                let entries = match result {
                    Ok(entries) => entries,
                    Err(err) => {
                        yield Err(ErrorKind::cache(err));
                        continue;
                    },
                };
                // Re-fetched per emission since the CDN layout can change;
                // a transient failure here skips the emission instead of
                // blanking a list the user already sees.
                let config = match feed.image_config.fetch().await {
                    Ok(config) => config,
                    Err(err) => {
                        tracing::warn!(error = ?err, "image configuration unavailable, skipping emission");
                        continue;
                    },
                };
                yield Ok(feed.enrich(entries, &config).await);
            }
        })
        .dedup_ok()
    }

    async fn enrich(&self, entries: Vec<WatchlistEntry>, config: &ImageConfig) -> Vec<WatchlistItem> {
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.resolve(&entry, config).await {
                Ok(item) => items.push(item),
                Err(err) => {
                    tracing::warn!(
                        kind = %entry.kind,
                        id = entry.id,
                        error = ?err,
                        "dropping watchlist entry that failed to resolve"
                    );
                },
            }
        }
        items
    }

    async fn resolve(
        &self,
        entry: &WatchlistEntry,
        config: &ImageConfig,
    ) -> marquee_remote::error::Result<WatchlistItem> {
        let (title, poster_path) = match entry.kind {
            ContentKind::Movie => {
                let movie = self.movies.fetch_detail(entry.id).await?;
                (movie.title, movie.poster_path)
            },
            ContentKind::Series => {
                let series = self.series.fetch_detail(entry.id).await?;
                (series.name, series.poster_path)
            },
        };
        Ok(WatchlistItem {
            kind: entry.kind,
            id: entry.id,
            title,
            poster_url: poster_path.map(|path| config.resolve(&path, ImageRole::Poster, ImageSize::Card)),
            added_at: entry.added_at,
        })
    }
}
