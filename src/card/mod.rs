//! Display-ready card model.
//!
//! A [`Card`] is the only shape the listing pipelines hand back. Session
//! cards carry playback progress and player context, item cards carry a
//! resume position; everything else is shared.
//!
//! - [`mapper`] -- upstream record to card conversion.
//! - [`image`] -- opaque image references.

pub mod image;
pub mod mapper;

pub use image::{image_ref, ImageHints};
pub use mapper::{collect_cards, CardMapper};

use marquee_common::CardTheme;
use serde::Serialize;
use serde_json::Value;

/// Normalized, display-ready summary of a session or library item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    /// Lower-cased upstream type ("movie", "episode", "audio", ...), or empty.
    pub media_type: String,
    pub series_title: Option<String>,
    pub episode_name: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub runtime_ms: Option<u64>,
    #[serde(flatten)]
    pub progress: Progress,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub theme: CardTheme,
    #[serde(flatten)]
    pub player: Option<Player>,
    /// Upstream record as received. Diagnostic passthrough only.
    #[serde(rename = "__raw")]
    pub raw: Value,
}

impl Card {
    /// Position in milliseconds, whichever flavour of progress the card has.
    pub fn position_ms(&self) -> Option<u64> {
        self.progress.position_ms()
    }

    /// Progress percentage (may exceed 100 on inconsistent upstream data).
    pub fn percent(&self) -> u32 {
        self.progress.percent()
    }

    /// True when the card came from a live session.
    pub fn is_session(&self) -> bool {
        matches!(self.progress, Progress::Playback { .. })
    }
}

/// Position of a card within its runtime.
///
/// Serializes as `progressMs`/`progressPercent` for live sessions and as
/// `resumePositionMs`/`resumePercent` for resumable library items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Progress {
    Playback {
        #[serde(rename = "progressMs")]
        position_ms: Option<u64>,
        #[serde(rename = "progressPercent")]
        percent: u32,
    },
    Resume {
        #[serde(rename = "resumePositionMs")]
        position_ms: Option<u64>,
        #[serde(rename = "resumePercent")]
        percent: u32,
    },
}

impl Progress {
    pub fn position_ms(&self) -> Option<u64> {
        match *self {
            Self::Playback { position_ms, .. } | Self::Resume { position_ms, .. } => position_ms,
        }
    }

    pub fn percent(&self) -> u32 {
        match *self {
            Self::Playback { percent, .. } | Self::Resume { percent, .. } => percent,
        }
    }
}

/// Client/device a session is playing on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Player {
    #[serde(rename = "playerName")]
    pub name: Option<String>,
    #[serde(rename = "playerIP")]
    pub ip: Option<String>,
    #[serde(rename = "playerDevice")]
    pub device: Option<String>,
}
