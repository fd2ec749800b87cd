use super::ContentKind;
use serde::{Deserialize, Serialize};
use time::UtcDateTime;

/// A lightweight reference to a saved content item.
///
/// The watchlist never stores payloads; entries are enriched into full
/// details by the use-case layer when a screen actually needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub kind: ContentKind,
    pub id: u64,
    pub added_at: UtcDateTime,
}

impl WatchlistEntry {
    pub fn new(kind: ContentKind, id: u64) -> Self {
        Self { kind, id, added_at: UtcDateTime::now() }
    }
}
