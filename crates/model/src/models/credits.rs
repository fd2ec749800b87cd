use serde::{Deserialize, Serialize};

/// The cast list attached to a movie or series.
///
/// Modelled as its own content item (keyed by the id of the work it belongs
/// to) so the cache engine can treat it like any other paged entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditList {
    /// Id of the movie or series these credits belong to.
    pub id: u64,
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    /// Billing order; lower is more prominent.
    #[serde(default)]
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
}
