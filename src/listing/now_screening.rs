//! Live-session listing.

use marquee_common::Result;
use tracing::{debug, warn};

use super::{extract_items, Marquee, NowScreeningFilters};
use crate::card::{collect_cards, Card};

const SESSIONS_PATH: &str = "/Sessions";

impl Marquee {
    /// Cards for every active session, filtered. Never fails: a fetch
    /// failure yields an empty list.
    pub async fn list_now_screening(&self, filters: &NowScreeningFilters) -> Vec<Card> {
        match self.try_list_now_screening(filters).await {
            Ok(cards) => cards,
            Err(e) => {
                warn!(error = %e, "Failed to fetch sessions, returning no cards");
                Vec::new()
            }
        }
    }

    /// Like [`Marquee::list_now_screening`] but reports fetch failures.
    pub async fn try_list_now_screening(&self, filters: &NowScreeningFilters) -> Result<Vec<Card>> {
        let body = self.fetcher.get_json(SESSIONS_PATH, &[]).await?;
        let sessions = extract_items(body)?;
        let total = sessions.len();

        let cards = collect_cards(sessions.iter().map(|s| self.mapper.map_session(s)));
        debug!(total, mapped = cards.len(), "Mapped sessions");

        Ok(apply_filters(cards, filters))
    }
}

/// Apply user/device filters, then strip user ids when asked to.
pub fn apply_filters(cards: Vec<Card>, filters: &NowScreeningFilters) -> Vec<Card> {
    if !filters.exclude_libraries.is_empty() {
        debug!(
            libraries = ?filters.exclude_libraries,
            "Library exclusion ignored: sessions carry no library id"
        );
    }

    cards
        .into_iter()
        .filter(|card| matches_user(card, &filters.users))
        .filter(|card| matches_device(card, &filters.devices))
        .map(|mut card| {
            if filters.hide_user {
                card.user_id = None;
            }
            card
        })
        .collect()
}

fn matches_user(card: &Card, users: &[String]) -> bool {
    match (&card.user_id, users.is_empty()) {
        (_, true) | (None, _) => true,
        (Some(user), false) => users.iter().any(|u| u.eq_ignore_ascii_case(user)),
    }
}

fn matches_device(card: &Card, devices: &[String]) -> bool {
    if devices.is_empty() {
        return true;
    }
    let Some(player) = &card.player else {
        return true;
    };
    let names: Vec<&str> = [player.name.as_deref(), player.device.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if names.is_empty() {
        return true;
    }
    names
        .iter()
        .any(|name| devices.iter().any(|d| d.eq_ignore_ascii_case(name)))
}
