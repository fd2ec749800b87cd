use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::sanitize;
use crate::error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};

/// Logical role of an image attached to a content item.
///
/// The upstream provider publishes different size ladders per role, so URL
/// resolution needs to know both the role and the requested tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageRole {
    Poster,
    Backdrop,
    Logo,
    Profile,
    /// Episode still frame.
    Still,
}
impl ImageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::Poster => "poster",
            ImageRole::Backdrop => "backdrop",
            ImageRole::Logo => "logo",
            ImageRole::Profile => "profile",
            ImageRole::Still => "still",
        }
    }
}
impl FromStr for ImageRole {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match sanitize(s).as_str() {
            "poster" => Self::Poster,
            "backdrop" => Self::Backdrop,
            "logo" => Self::Logo,
            "profile" => Self::Profile,
            "still" => Self::Still,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "image role",
                value: format!("unknown image role: {}", s),
            }),
        })
    }
}
impl Display for ImageRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Standard size tiers requested by screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    /// List rows, tiny previews.
    Thumbnail,
    /// Grid cards.
    Card,
    /// Detail screens.
    Detail,
    /// Full-screen viewing, original resolution.
    Full,
}
impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "thumbnail",
            ImageSize::Card => "card",
            ImageSize::Detail => "detail",
            ImageSize::Full => "full",
        }
    }
}
impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
