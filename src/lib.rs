//! Marquee - media-server telemetry normalized into display cards
//!
//! This library crate exposes the card mapper, the fetch seam and the two
//! listing pipelines (live sessions and on-demand items).

pub mod card;
pub mod config;
pub mod fetch;
pub mod listing;

pub use card::{Card, CardMapper, ImageHints, Player, Progress};
pub use fetch::{Fetcher, HttpFetcher};
pub use listing::{Marquee, NowScreeningFilters, OnDemandFilters};
pub use marquee_common::{Error, Result};
