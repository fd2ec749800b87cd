//! Stream combinators for composing reactive cache views.
//!
//! Screens usually depend on more than one live query at a time, and they
//! want exactly one consistent snapshot out of the composition. The
//! adapters here cover the two recurring shapes:
//!
//! - [`combine_latest`]: an AND-join over independent fallible streams -
//!   nothing is emitted until every source has produced a value, then every
//!   source emission re-synthesizes a combined value from the latest of
//!   each.
//! - [`StreamDedupExt::dedup_ok`]: suppress consecutive structurally-equal
//!   emissions, because re-running a query on every store change produces a
//!   lot of identical snapshots.

mod combine;
mod dedup;

pub use crate::combine::{CombineLatest2, combine_latest, combine_latest3};
pub use crate::dedup::{Dedup, DedupOk, StreamDedupExt};
