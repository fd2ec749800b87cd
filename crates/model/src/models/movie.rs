use serde::{Deserialize, Serialize};
use time::Date;

/// A single movie as listed by the upstream metadata provider.
///
/// This is the summary shape used in paged collections (popular, discover,
/// search results). Detail fetches return the same type with more optional
/// fields populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Stable upstream identifier.
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<Date>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    /// Raw image path (e.g. `/abc123.jpg`); resolved into a concrete URL by
    /// the image configuration capability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn test_round_trips_through_json() {
        let movie = Movie {
            id: 603,
            title: "The Matrix".to_string(),
            overview: Some("There is no spoon.".to_string()),
            release_date: Some(Date::from_calendar_date(1999, Month::March, 31).unwrap()),
            genre_ids: vec![28, 878],
            vote_average: 8.2,
            vote_count: 26000,
            poster_path: Some("/matrix.jpg".to_string()),
            backdrop_path: None,
        };
        let json = serde_json::to_string(&movie).unwrap();
        assert_eq!(movie, serde_json::from_str::<Movie>(&json).unwrap());
    }

    #[test]
    fn test_optional_fields_default() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert!(movie.release_date.is_none());
        assert!(movie.genre_ids.is_empty());
    }
}
