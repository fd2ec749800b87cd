use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::sanitize;
use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};

/// Discriminant for content items referenced outside their own store, e.g.
/// from the watchlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Movie,
    Series,
}
impl ContentKind {
    /// Stable string form, used as the database discriminator column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
        }
    }
}
impl FromStr for ContentKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "movie" | "movies" | "film" => Self::Movie,
            "series" | "tv" | "tvseries" | "show" => Self::Series,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "content kind",
                value: format!("unknown content kind: {}", s),
            }),
        })
    }
}
impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
