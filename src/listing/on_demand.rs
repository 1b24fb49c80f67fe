//! On-demand listing with an ordered fallback chain of item sources.
//!
//! Sources are tried in order until one produces at least one card. A
//! failing source counts as empty for that step; the listing only comes
//! back empty when every source failed or had nothing.

use std::fmt;

use chrono::{Duration, Utc};
use marquee_common::{Error, Result};
use serde_json::Value;
use tracing::{debug, warn};

use super::{clamp_count, extract_items, Marquee, OnDemandFilters};
use crate::card::{collect_cards, Card};

/// An upstream collection the on-demand listing can draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A user's continue-watching collection.
    Resume { user_id: String },
    /// Recently added library items.
    Latest,
}

impl Source {
    /// Sources to try for an optional configured user, in order.
    pub fn chain(user_id: Option<&str>) -> Vec<Source> {
        let mut chain = Vec::with_capacity(2);
        if let Some(user_id) = user_id {
            chain.push(Source::Resume {
                user_id: user_id.to_string(),
            });
        }
        chain.push(Source::Latest);
        chain
    }

    pub fn path(&self) -> String {
        match self {
            Self::Resume { user_id } => {
                format!("/Users/{}/Items/Resume", urlencoding::encode(user_id))
            }
            Self::Latest => "/Items/Latest".to_string(),
        }
    }

    /// Query parameters: the limit plus whatever filters are set.
    pub fn query(&self, limit: usize, filters: &OnDemandFilters) -> Vec<(String, String)> {
        let mut query = vec![("Limit".to_string(), limit.to_string())];
        if !filters.genres.is_empty() {
            query.push(("Genres".to_string(), filters.genres.join("|")));
        }
        if !filters.content_ratings.is_empty() {
            query.push(("OfficialRatings".to_string(), filters.content_ratings.join("|")));
        }
        if let Some(since) = filters.recently_added_days.and_then(added_since) {
            query.push(("MinDateLastSaved".to_string(), since));
        }
        query
    }
}

/// Timestamp `days` before now, or `None` when that falls outside the
/// representable date range.
fn added_since(days: u32) -> Option<String> {
    let since = Utc::now().checked_sub_signed(Duration::try_days(i64::from(days))?)?;
    Some(since.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resume { .. } => write!(f, "resume"),
            Self::Latest => write!(f, "latest"),
        }
    }
}

impl Marquee {
    /// Up to `count` on-demand cards (default 30, clamped to 0..=200).
    /// Never fails: if every source fails the list is empty.
    pub async fn list_on_demand(&self, count: Option<i64>, filters: &OnDemandFilters) -> Vec<Card> {
        match self.try_list_on_demand(count, filters).await {
            Ok(cards) => cards,
            Err(e) => {
                warn!(error = %e, "All on-demand sources failed, returning no cards");
                Vec::new()
            }
        }
    }

    /// Like [`Marquee::list_on_demand`], but reports failures. The result is
    /// `Ok(vec![])` only when every source answered with nothing; if any
    /// source failed and none produced cards, the last error is returned.
    ///
    /// A source falls through to the next one when it yields no *cards*
    /// after mapping, so a source whose items are all malformed counts as
    /// empty even though it returned items. Sources are never mixed.
    pub async fn try_list_on_demand(
        &self,
        count: Option<i64>,
        filters: &OnDemandFilters,
    ) -> Result<Vec<Card>> {
        let limit = clamp_count(count);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut last_error: Option<Error> = None;

        for source in Source::chain(self.user_id()) {
            match self.fetch_source(&source, limit, filters).await {
                Ok(items) => {
                    let mut cards = collect_cards(items.iter().map(|i| self.mapper.map_item(i)));
                    if cards.is_empty() {
                        debug!(%source, "Source returned no cards, falling back");
                        continue;
                    }
                    cards.truncate(limit);
                    debug!(%source, count = cards.len(), "Using on-demand source");
                    return Ok(cards);
                }
                Err(e) => {
                    warn!(%source, error = %e, "On-demand source failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_source(
        &self,
        source: &Source,
        limit: usize,
        filters: &OnDemandFilters,
    ) -> Result<Vec<Value>> {
        let body = self
            .fetcher
            .get_json(&source.path(), &source.query(limit, filters))
            .await?;
        extract_items(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_without_user_is_latest_only() {
        assert_eq!(Source::chain(None), vec![Source::Latest]);
    }

    #[test]
    fn chain_with_user_tries_resume_first() {
        assert_eq!(
            Source::chain(Some("u1")),
            vec![
                Source::Resume {
                    user_id: "u1".into()
                },
                Source::Latest
            ]
        );
    }

    #[test]
    fn source_paths() {
        let resume = Source::Resume {
            user_id: "abc".into(),
        };
        assert_eq!(resume.path(), "/Users/abc/Items/Resume");
        assert_eq!(Source::Latest.path(), "/Items/Latest");
        assert_eq!(resume.to_string(), "resume");
    }

    #[test]
    fn query_with_only_limit() {
        let query = Source::Latest.query(30, &OnDemandFilters::default());
        assert_eq!(query, vec![("Limit".to_string(), "30".to_string())]);
    }

    #[test]
    fn query_forwards_filters() {
        let filters = OnDemandFilters {
            genres: vec!["Drama".into(), "Comedy".into()],
            content_ratings: vec!["PG-13".into()],
            recently_added_days: Some(7),
        };
        let query = Source::Latest.query(10, &filters);

        assert_eq!(query[0], ("Limit".to_string(), "10".to_string()));
        assert_eq!(query[1], ("Genres".to_string(), "Drama|Comedy".to_string()));
        assert_eq!(query[2], ("OfficialRatings".to_string(), "PG-13".to_string()));
        assert_eq!(query[3].0, "MinDateLastSaved");
        assert!(query[3].1.ends_with('Z'));
    }

    fn parse_since(since: &str) -> chrono::DateTime<Utc> {
        chrono::NaiveDateTime::parse_from_str(since, "%Y-%m-%dT%H:%M:%SZ")
            .unwrap()
            .and_utc()
    }

    #[test]
    fn added_since_zero_days_is_now() {
        let since = parse_since(&added_since(0).unwrap());
        let drift = Utc::now() - since;
        assert!(drift >= Duration::zero() && drift < Duration::seconds(5));
    }

    #[test]
    fn added_since_large_window_is_in_the_past() {
        let since = parse_since(&added_since(36_500).unwrap());
        let expected = Utc::now() - Duration::days(36_500);
        assert!((expected - since).num_seconds().abs() < 5);
    }

    #[test]
    fn added_since_out_of_range_is_omitted() {
        assert_eq!(added_since(u32::MAX), None);

        let filters = OnDemandFilters {
            recently_added_days: Some(u32::MAX),
            ..Default::default()
        };
        let query = Source::Latest.query(5, &filters);
        assert_eq!(query, vec![("Limit".to_string(), "5".to_string())]);
    }
}
