//! Screen-facing composition of repositories into single live feeds.
//!
//! A screen wants one stream of one snapshot type, deduplicated, with
//! graceful degradation when an enrichment dependency hiccups. The types
//! here wrap the repositories into exactly that.

mod home;
mod watchlist;

pub use self::home::{HomeFeed, HomeSnapshot};
pub use self::watchlist::{WatchlistFeed, WatchlistItem};
