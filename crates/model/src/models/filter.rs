use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Sentinel key for "no filter applied".
const NO_FILTER: &str = "-";

/// Query fields that partition a discovery feed.
///
/// Two filters that differ only in formatting (keyword casing, surrounding
/// whitespace) must land in the same cache partition, so everything funnels
/// through [`DiscoverFilter::key`] before touching the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverFilter {
    pub genre: Option<u64>,
    pub year: Option<i32>,
    pub keywords: Option<String>,
}

impl DiscoverFilter {
    /// Normalize into the cache partition key.
    pub fn key(&self) -> FilterKey {
        let mut segments = Vec::new();
        if let Some(genre) = self.genre {
            segments.push(format!("g{genre}"));
        }
        if let Some(year) = self.year {
            segments.push(format!("y{year}"));
        }
        if let Some(keywords) = &self.keywords {
            // Collapse runs of whitespace so "dark  knight" and "dark knight"
            // share a partition.
            let words = keywords.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>();
            if !words.is_empty() {
                segments.push(format!("k{}", words.join("+")));
            }
        }
        match segments.is_empty() {
            true => FilterKey::none(),
            false => FilterKey(segments.join(".")),
        }
    }
}

/// Normalized identifier partitioning cached pages.
///
/// Writes, reads, invalidation cascades, and live streams under one key
/// never affect another key. The sentinel value (`FilterKey::none`)
/// represents an unfiltered feed and is an ordinary partition like any
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterKey(String);

impl FilterKey {
    /// The "no filter" sentinel.
    pub fn none() -> Self {
        Self(NO_FILTER.to_string())
    }

    /// A key in some caller-defined namespace that isn't a discovery filter,
    /// e.g. a season number for episode pages or a search query.
    pub fn custom(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().trim();
        match raw.is_empty() {
            true => Self::none(),
            false => Self(raw.to_lowercase()),
        }
    }

    pub fn is_none(&self) -> bool {
        self.0 == NO_FILTER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FilterKey {
    fn default() -> Self {
        Self::none()
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_empty_filter_is_sentinel() {
        assert_eq!(DiscoverFilter::default().key(), FilterKey::none());
        assert!(DiscoverFilter::default().key().is_none());
    }

    #[test]
    fn test_key_is_deterministic() {
        let filter = DiscoverFilter {
            genre: Some(28),
            year: Some(1999),
            keywords: Some("Dark Knight".to_string()),
        };
        assert_eq!(filter.key().as_str(), "g28.y1999.kdark+knight");
    }

    #[rstest]
    #[case("dark  knight", "Dark Knight")]
    #[case(" dark knight ", "dark knight")]
    fn test_keyword_formatting_shares_partition(#[case] a: &str, #[case] b: &str) {
        let key = |k: &str| DiscoverFilter { keywords: Some(k.to_string()), ..Default::default() }.key();
        assert_eq!(key(a), key(b));
    }

    #[test]
    fn test_distinct_filters_get_distinct_keys() {
        let by_genre = DiscoverFilter { genre: Some(28), ..Default::default() };
        let by_year = DiscoverFilter { year: Some(28), ..Default::default() };
        assert_ne!(by_genre.key(), by_year.key());
        assert_ne!(by_genre.key(), FilterKey::none());
    }

    #[test]
    fn test_custom_key_blank_collapses_to_sentinel() {
        assert!(FilterKey::custom("   ").is_none());
        assert_eq!(FilterKey::custom("Season:3").as_str(), "season:3");
    }
}
