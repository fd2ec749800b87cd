//! Row types mediating between SQLite and the domain models.

use std::str::FromStr;

use exn::ResultExt;
use marquee_model::{ContentKind, WatchlistEntry};
use time::UtcDateTime;

use crate::entity::CacheEntity;
use crate::error::{Error, ErrorKind, Result};

/// One joined page-entry row: the entity payload plus the index row's
/// timestamp (the one TTL checks run against).
#[derive(sqlx::FromRow)]
pub(crate) struct PageRow {
    pub(crate) payload: String,
    pub(crate) cached_at: i64,
}

impl PageRow {
    pub(crate) fn decode<T: CacheEntity>(self) -> Result<T> {
        serde_json::from_str(&self.payload).or_raise(|| ErrorKind::InvalidData("payload"))
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct WatchlistRow {
    pub(crate) content_type: String,
    pub(crate) entity_id: i64,
    pub(crate) added_at: i64,
}

impl TryFrom<&WatchlistEntry> for WatchlistRow {
    type Error = Error;
    fn try_from(entry: &WatchlistEntry) -> Result<Self> {
        Ok(Self {
            content_type: entry.kind.as_str().to_string(),
            entity_id: i64::try_from(entry.id).or_raise(|| ErrorKind::InvalidData("entity id"))?,
            added_at: entry.added_at.unix_timestamp(),
        })
    }
}

impl TryFrom<WatchlistRow> for WatchlistEntry {
    type Error = Error;
    fn try_from(row: WatchlistRow) -> Result<Self> {
        Ok(Self {
            kind: ContentKind::from_str(&row.content_type).or_raise(|| ErrorKind::InvalidData("content kind"))?,
            id: u64::try_from(row.entity_id).or_raise(|| ErrorKind::InvalidData("entity id"))?,
            added_at: UtcDateTime::from_unix_timestamp(row.added_at)
                .or_raise(|| ErrorKind::InvalidData("added at"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::Movie;

    #[test]
    fn test_decode_payload() {
        let row = PageRow {
            payload: r#"{"id": 603, "title": "The Matrix"}"#.to_string(),
            cached_at: 0,
        };
        let movie: Movie = row.decode().unwrap();
        assert_eq!(movie.id, 603);
    }

    #[test]
    fn test_decode_garbage_is_invalid_data() {
        let row = PageRow { payload: "not json".to_string(), cached_at: 0 };
        assert!(row.decode::<Movie>().is_err());
    }

    #[test]
    fn test_watchlist_row_round_trip() {
        let entry = WatchlistEntry::new(ContentKind::Series, 1396);
        let row = WatchlistRow::try_from(&entry).unwrap();
        let back = WatchlistEntry::try_from(row).unwrap();
        assert_eq!(back.kind, entry.kind);
        assert_eq!(back.id, entry.id);
        // Converting to a Unix timestamp (measured in seconds) inherently
        // strips the nanoseconds component.
        assert_eq!(back.added_at, entry.added_at.replace_nanosecond(0).unwrap());
    }
}
