//! Cache-first repositories and the use-case layer on top of them.
//!
//! A [`Repository`] glues one content type's cache [`Store`] to its remote
//! source: fetches consult the cache before the network, fetched pages are
//! written back inside the same call, and pagination advances through a
//! serialized per-filter gate so concurrent scrolls can't duplicate pages.
//!
//! The [`usecase`] module composes repositories into the streams screens
//! actually consume: combined snapshots, dedup, and graceful degradation
//! when enrichment dependencies fail.
//!
//! [`Store`]: marquee_cache::Store

pub mod error;
mod policy;
mod repository;
pub mod usecase;

pub use crate::policy::CachePolicy;
pub use crate::repository::Repository;
