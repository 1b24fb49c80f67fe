//! Live-session listing tests against an in-memory fetcher.

mod common;

use assert_matches::assert_matches;
use common::{build_marquee, FakeFetcher};
use marquee::{Error, NowScreeningFilters};
use marquee_common::CardTheme;
use serde_json::json;

#[tokio::test]
async fn test_session_maps_end_to_end() {
    let fetcher = FakeFetcher::new().with_json(
        "/Sessions",
        json!([{
            "NowPlayingItem": {"Id": "42", "Name": "X", "Type": "Movie", "RunTimeTicks": 600000000},
            "PlayState": {"PositionTicks": 300000000}
        }]),
    );
    let (marquee, fetcher) = build_marquee(fetcher, None);

    let cards = marquee.list_now_screening(&NowScreeningFilters::default()).await;

    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(card.runtime_ms, Some(60_000));
    assert_eq!(card.position_ms(), Some(30_000));
    assert_eq!(card.percent(), 50);
    assert_eq!(card.media_type, "movie");
    assert_eq!(card.theme, CardTheme::Movie);
    assert_eq!(fetcher.paths(), vec!["/Sessions"]);
    assert!(fetcher.calls()[0].query.is_empty());
}

#[tokio::test]
async fn test_malformed_sessions_are_dropped() {
    let fetcher = FakeFetcher::new().with_json(
        "/Sessions",
        json!([
            {"Id": "s1", "NowPlayingItem": {"Id": "1", "Name": "One"}},
            "not a session",
            {"Id": "s2", "NowPlayingItem": ["wrong"]},
            {"Id": "s3"}
        ]),
    );
    let (marquee, _) = build_marquee(fetcher, None);

    let cards = marquee.list_now_screening(&NowScreeningFilters::default()).await;

    let ids: Vec<_> = cards.iter().map(|c| c.session_id.as_deref()).collect();
    assert_eq!(ids, vec![Some("s1"), Some("s3")]);
    assert_eq!(cards[1].title, "");
    assert_eq!(cards[1].item_id, None);
}

#[tokio::test]
async fn test_fetch_failure_returns_empty() {
    let fetcher = FakeFetcher::new().with_failure("/Sessions", 503);
    let (marquee, _) = build_marquee(fetcher, None);

    let cards = marquee.list_now_screening(&NowScreeningFilters::default()).await;
    assert!(cards.is_empty());

    let err = marquee
        .try_list_now_screening(&NowScreeningFilters::default())
        .await
        .unwrap_err();
    assert_matches!(err, Error::Status { status: 503, .. });
}

#[tokio::test]
async fn test_unexpected_body_is_a_decode_failure() {
    let fetcher = FakeFetcher::new().with_json("/Sessions", json!({"Message": "nope"}));
    let (marquee, _) = build_marquee(fetcher, None);

    let result = marquee
        .try_list_now_screening(&NowScreeningFilters::default())
        .await;
    assert_matches!(result, Err(Error::Decode(_)));
    assert!(marquee
        .list_now_screening(&NowScreeningFilters::default())
        .await
        .is_empty());
}

#[tokio::test]
async fn test_empty_session_list_is_ok() {
    let fetcher = FakeFetcher::new().with_json("/Sessions", json!([]));
    let (marquee, _) = build_marquee(fetcher, None);

    let cards = marquee
        .try_list_now_screening(&NowScreeningFilters::default())
        .await
        .unwrap();
    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_hide_user_strips_user_id_key() {
    let fetcher = FakeFetcher::new().with_json(
        "/Sessions",
        json!([
            {"Id": "s1", "UserId": "alice", "NowPlayingItem": {"Id": "1", "Name": "One"}},
            {"Id": "s2", "UserId": "bob", "NowPlayingItem": {"Id": "2", "Name": "Two"}}
        ]),
    );
    let (marquee, _) = build_marquee(fetcher, None);
    let filters = NowScreeningFilters {
        hide_user: true,
        ..Default::default()
    };

    let cards = marquee.list_now_screening(&filters).await;

    assert_eq!(cards.len(), 2);
    for card in &cards {
        let value = serde_json::to_value(card).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("userId"));
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("posterUrl"));
    }
}

#[tokio::test]
async fn test_user_filter() {
    let fetcher = FakeFetcher::new().with_json(
        "/Sessions",
        json!([
            {"Id": "s1", "UserId": "alice"},
            {"Id": "s2", "UserId": "bob"}
        ]),
    );
    let (marquee, _) = build_marquee(fetcher, None);
    let filters = NowScreeningFilters {
        users: vec!["bob".into()],
        ..Default::default()
    };

    let cards = marquee.list_now_screening(&filters).await;

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].session_id.as_deref(), Some("s2"));
}
