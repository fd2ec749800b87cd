use serde::{Deserialize, Serialize};
use time::Date;

/// A television series as listed by the upstream metadata provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvSeries {
    /// Stable upstream identifier.
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<Date>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
}

/// A single episode of a television series.
///
/// Episodes are paged per-season upstream; the season number doubles as the
/// natural filter key for their cached pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Stable upstream identifier (unique across all series).
    pub id: u64,
    pub series_id: u64,
    pub season_number: u32,
    pub episode_number: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub still_path: Option<String>,
}
