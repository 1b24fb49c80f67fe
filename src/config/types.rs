use marquee_common::ProviderKind;
use serde::{Deserialize, Serialize};

use crate::card::ImageHints;
use crate::listing::{NowScreeningFilters, OnDemandFilters, DEFAULT_COUNT};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub provider: Option<ProviderConfig>,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub now_screening: NowScreeningFilters,

    #[serde(default)]
    pub on_demand: OnDemandConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    pub url: String,

    /// Access token sent as `X-Emby-Token` (overridable via `MARQUEE_API_KEY`)
    #[serde(default)]
    pub api_key: String,

    /// User whose continue-watching list is preferred for on-demand cards
    #[serde(default)]
    pub user_id: Option<String>,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ImagesConfig {
    /// `maxWidth` hint for posters; 0 disables the hint
    #[serde(default = "default_poster_width")]
    pub poster_max_width: u32,

    /// `maxWidth` hint for backdrops; 0 disables the hint
    #[serde(default = "default_backdrop_width")]
    pub backdrop_max_width: u32,
}

fn default_poster_width() -> u32 {
    400
}

fn default_backdrop_width() -> u32 {
    1280
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            poster_max_width: default_poster_width(),
            backdrop_max_width: default_backdrop_width(),
        }
    }
}

impl From<ImagesConfig> for ImageHints {
    fn from(images: ImagesConfig) -> Self {
        Self {
            poster_max_width: Some(images.poster_max_width).filter(|w| *w > 0),
            backdrop_max_width: Some(images.backdrop_max_width).filter(|w| *w > 0),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OnDemandConfig {
    #[serde(default = "default_count")]
    pub count: i64,

    #[serde(flatten)]
    pub filters: OnDemandFilters,
}

fn default_count() -> i64 {
    DEFAULT_COUNT as i64
}

impl Default for OnDemandConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            filters: OnDemandFilters::default(),
        }
    }
}
