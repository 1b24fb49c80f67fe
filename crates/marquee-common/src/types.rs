//! Core type definitions shared by the mapper and the fetch layer.
//!
//! Enums that end up on a card serialize in lowercase to match the rest of
//! the card's tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream media server flavour.
///
/// Only affects the routing prefix of image references; both servers speak
/// the same item/session dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Jellyfin server.
    #[default]
    Jellyfin,
    /// Emby server.
    Emby,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jellyfin => write!(f, "jellyfin"),
            Self::Emby => write!(f, "emby"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jellyfin" => Ok(Self::Jellyfin),
            "emby" => Ok(Self::Emby),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// Kind of artwork referenced by a card.
///
/// Displayed with the upstream's own casing since it ends up in the
/// `type=` query parameter of an image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKind {
    /// Poster / primary image.
    Primary,
    /// Background / fanart image.
    Backdrop,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "Primary"),
            Self::Backdrop => write!(f, "Backdrop"),
        }
    }
}

/// Presentation theme picked from the item's media type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardTheme {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "episode")]
    Episode,
    /// No dedicated theme; serializes as an empty string.
    #[default]
    #[serde(rename = "")]
    Plain,
}

impl CardTheme {
    /// Pick a theme from a lower-cased media type tag.
    pub fn from_media_type(media_type: &str) -> Self {
        match media_type {
            "movie" => Self::Movie,
            "episode" => Self::Episode,
            _ => Self::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Episode => "episode",
            Self::Plain => "",
        }
    }
}

impl fmt::Display for CardTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
