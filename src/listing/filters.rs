//! Caller-supplied filters for both listings and the on-demand count rule.

use serde::{Deserialize, Serialize};

/// Default number of on-demand cards when no usable count is given.
pub const DEFAULT_COUNT: usize = 30;
/// Upper bound on on-demand cards, also the largest `Limit` sent upstream.
pub const MAX_COUNT: usize = 200;
/// Longest recently-added window accepted from configuration, in days.
pub const MAX_RECENTLY_ADDED_DAYS: u32 = 36_500;

/// Filters for the live-session listing.
///
/// `exclude_libraries` is accepted for parity with the on-demand listing but
/// session records carry no library identifier, so it never removes a card.
/// `users` and `devices` only remove cards that expose the identifier they
/// compare against; a card without one is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NowScreeningFilters {
    /// Strip `userId` from every returned card.
    #[serde(default)]
    pub hide_user: bool,

    #[serde(default)]
    pub exclude_libraries: Vec<String>,

    /// Keep only sessions of these user ids (case-insensitive).
    #[serde(default)]
    pub users: Vec<String>,

    /// Keep only sessions whose player name or device matches (case-insensitive).
    #[serde(default)]
    pub devices: Vec<String>,
}

/// Filters for the on-demand listing.
///
/// These are advisory: they are forwarded to the upstream as query
/// parameters and never applied to the returned items afterwards. A server
/// that ignores them returns unfiltered results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OnDemandFilters {
    #[serde(default)]
    pub genres: Vec<String>,

    #[serde(default)]
    pub content_ratings: Vec<String>,

    /// Only items added within this many days.
    #[serde(default)]
    pub recently_added_days: Option<u32>,
}

/// Resolve a requested count: default when absent, clamped to `[0, MAX_COUNT]`.
pub fn clamp_count(requested: Option<i64>) -> usize {
    match requested {
        Some(n) => n.clamp(0, MAX_COUNT as i64) as usize,
        None => DEFAULT_COUNT,
    }
}

/// Resolve a count given as text (CLI flag, query string).
///
/// Non-numeric input falls back to the default; fractional input is floored.
pub fn parse_count(raw: Option<&str>) -> usize {
    let Some(raw) = raw.map(str::trim) else {
        return DEFAULT_COUNT;
    };
    if let Ok(n) = raw.parse::<i64>() {
        return clamp_count(Some(n));
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => clamp_count(Some(n.floor() as i64)),
        _ => DEFAULT_COUNT,
    }
}
