//! Remote data source capabilities.
//!
//! The actual upstream API client (HTTP transport, authentication, wire
//! formats) lives outside this workspace. This crate only defines the
//! capability surface the repository layer programs against: a paged
//! fetcher per content type, an image URL configuration, and the error
//! taxonomy both of them fail with.

pub mod error;
pub mod images;
pub mod source;

pub use crate::images::{ImageConfig, ImageConfigHandle, ImageConfigSource};
pub use crate::source::{RemoteHandle, RemoteSource};
#[cfg(feature = "mock")]
pub use crate::source::{MockImageConfigSource, MockRemote};
