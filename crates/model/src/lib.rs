//! Domain entities shared by every marquee crate.
//!
//! These are plain value types: no persistence, no networking. The cache
//! stores them as serialized payloads, the remote source produces them, and
//! the use-case layer compares them structurally (which is why everything
//! derives `PartialEq`).

pub mod error;
pub mod models;

pub use crate::models::{
    CastMember, ContentKind, CreditList, DiscoverFilter, Episode, FilterKey, ImageRole, ImageSize, Movie, TvSeries,
    WatchlistEntry,
};
