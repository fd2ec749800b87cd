use marquee_model::{CreditList, Episode, Movie, TvSeries};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A domain type the generic [`Store`](crate::Store) engine knows how to
/// cache.
///
/// One implementation per content type; the `CONTENT_TYPE` constant is the
/// discriminator column scoping every query, which is what keeps the stores
/// for different types fully independent of each other.
pub trait CacheEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable discriminator; must be unique across implementations.
    const CONTENT_TYPE: &'static str;

    /// Stable upstream identifier for this item.
    fn entity_id(&self) -> u64;
}

impl CacheEntity for Movie {
    const CONTENT_TYPE: &'static str = "movie";
    fn entity_id(&self) -> u64 {
        self.id
    }
}

impl CacheEntity for TvSeries {
    const CONTENT_TYPE: &'static str = "series";
    fn entity_id(&self) -> u64 {
        self.id
    }
}

impl CacheEntity for Episode {
    const CONTENT_TYPE: &'static str = "episode";
    fn entity_id(&self) -> u64 {
        self.id
    }
}

impl CacheEntity for CreditList {
    const CONTENT_TYPE: &'static str = "credits";
    fn entity_id(&self) -> u64 {
        self.id
    }
}
