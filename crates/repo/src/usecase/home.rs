//! The landing screen's combined feed.

use futures::{Stream, StreamExt};
use marquee_model::{FilterKey, Movie, TvSeries};
use marquee_streams::{StreamDedupExt, combine_latest};

use crate::error::Result;
use crate::repository::Repository;

/// One consistent snapshot of the landing screen's sections.
///
/// An uncached feed shows as an empty section rather than holding the whole
/// snapshot hostage.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSnapshot {
    pub movies: Vec<Movie>,
    pub series: Vec<TvSeries>,
}

/// AND-join of the popular-movies and popular-series feeds.
#[derive(Clone)]
pub struct HomeFeed {
    movies: Repository<Movie>,
    series: Repository<TvSeries>,
}

impl HomeFeed {
    pub fn new(movies: Repository<Movie>, series: Repository<TvSeries>) -> Self {
        Self { movies, series }
    }

    /// Live landing-screen snapshot.
    ///
    /// Nothing is emitted until both feeds have produced a value; from then
    /// on an update to either re-synthesizes the snapshot with the other's
    /// latest. Consecutive identical snapshots collapse to one emission,
    /// and the first failure from either feed ends the stream.
    pub fn stream(&self) -> impl Stream<Item = Result<HomeSnapshot>> + Send + 'static {
        let movies = self.movies.stream(&FilterKey::none());
        let series = self.series.stream(&FilterKey::none());
        combine_latest(movies, series)
            .map(|result| {
                result.map(|(movies, series)| HomeSnapshot {
                    movies: movies.unwrap_or_default(),
                    series: series.unwrap_or_default(),
                })
            })
            .dedup_ok()
    }
}
