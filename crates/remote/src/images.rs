//! Image URL configuration capability.
//!
//! The upstream provider serves raw image *paths* (e.g. `/abc123.jpg`) and
//! publishes a separate configuration document describing the base URL and
//! the size ladder per image role. Screens never see raw paths; they ask for
//! a role at a logical size tier and get a concrete URL back.

use std::sync::Arc;

use async_trait::async_trait;
use marquee_model::{ImageRole, ImageSize};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Shareable handle to an image configuration source.
pub type ImageConfigHandle = Arc<dyn ImageConfigSource>;

/// Fetches the current image configuration from the provider.
///
/// The configuration changes rarely but *can* change (CDN migrations), so
/// callers re-fetch per stream emission rather than caching it forever.
/// Fails with [`Unauthorised`](crate::error::ErrorKind::Unauthorised) or
/// [`Unknown`](crate::error::ErrorKind::Unknown); there is no not-found case
/// for a document that always exists.
#[async_trait]
pub trait ImageConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<ImageConfig>;
}

/// Resolved image configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Base URL including trailing slash, e.g. `https://image.example.org/t/p/`.
    pub secure_base_url: String,
}

impl ImageConfig {
    /// Resolve a raw image path into a concrete URL at the given tier.
    ///
    /// The provider's size slugs differ per role (posters come in `w342`,
    /// backdrops in `w780`, and so on), which is the whole reason this
    /// indirection exists.
    pub fn resolve(&self, path: &str, role: ImageRole, size: ImageSize) -> String {
        format!("{}{}{}", self.secure_base_url, Self::tier(role, size), path)
    }

    fn tier(role: ImageRole, size: ImageSize) -> &'static str {
        match (role, size) {
            (ImageRole::Poster, ImageSize::Thumbnail) => "w92",
            (ImageRole::Poster, ImageSize::Card) => "w342",
            (ImageRole::Poster, ImageSize::Detail) => "w780",
            (ImageRole::Backdrop, ImageSize::Thumbnail) => "w300",
            (ImageRole::Backdrop, ImageSize::Card) => "w780",
            (ImageRole::Backdrop, ImageSize::Detail) => "w1280",
            (ImageRole::Logo, ImageSize::Thumbnail) => "w45",
            (ImageRole::Logo, ImageSize::Card) => "w154",
            (ImageRole::Logo, ImageSize::Detail) => "w500",
            (ImageRole::Profile, ImageSize::Thumbnail) => "w45",
            (ImageRole::Profile, ImageSize::Card) => "w185",
            (ImageRole::Profile, ImageSize::Detail) => "h632",
            (ImageRole::Still, ImageSize::Thumbnail) => "w92",
            (ImageRole::Still, ImageSize::Card) => "w185",
            (ImageRole::Still, ImageSize::Detail) => "w300",
            (_, ImageSize::Full) => "original",
        }
    }
}
