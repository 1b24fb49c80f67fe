//! Conversion of upstream session and item records into [`Card`]s.
//!
//! Upstream payloads are handled as loose JSON: field names vary between
//! PascalCase and camelCase, ids may be numbers, and time values may be
//! strings. Every entry point returns a `Result` per record so that a batch
//! can drop malformed records with [`collect_cards`] without aborting.

use marquee_common::ticks::{millis, progress_percent, ticks_to_ms};
use marquee_common::{CardTheme, Error, ImageKind, ProviderKind, Result};
use serde_json::{Map, Value};
use tracing::debug;

use super::{Card, ImageHints, Player, Progress};

type Object = Map<String, Value>;

/// Maps upstream records to cards for one provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardMapper {
    provider: ProviderKind,
    images: ImageHints,
}

/// Fields shared by session and item cards, derived from an item record.
struct Descriptor {
    item_id: Option<String>,
    title: String,
    media_type: String,
    series_title: Option<String>,
    episode_name: Option<String>,
    season: Option<u32>,
    episode: Option<u32>,
    runtime_ms: Option<u64>,
}

impl CardMapper {
    pub fn new(provider: ProviderKind, images: ImageHints) -> Self {
        Self { provider, images }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Map an active playback session.
    ///
    /// A session without a now-playing item still yields a card (empty title,
    /// no item id). Only records that are not objects, or whose nested
    /// blocks have the wrong type, are rejected.
    pub fn map_session(&self, session: &Value) -> Result<Card> {
        let session = session
            .as_object()
            .ok_or_else(|| Error::malformed("session is not an object"))?;

        let now_playing = object(session, "NowPlayingItem")?;
        let play_state = object(session, "PlayState")?;
        let descriptor = describe(now_playing)?;

        let position_ms = match play_state {
            Some(state) => ticks_to_ms(field(state, "PositionTicks"))
                .or_else(|| millis(field(state, "PositionMs")))
                .or_else(|| millis(field(state, "Position"))),
            None => None,
        };

        let player = Player {
            name: string(session, "DeviceName").or_else(|| string(session, "Client")),
            ip: string(session, "RemoteEndPoint"),
            device: string(session, "DeviceType").or_else(|| string(session, "Client")),
        };

        let progress = Progress::Playback {
            position_ms,
            percent: progress_percent(descriptor.runtime_ms, position_ms),
        };

        Ok(self.build(
            descriptor,
            progress,
            string(session, "Id"),
            string(session, "UserId"),
            Some(player),
            Value::Object(session.clone()),
        ))
    }

    /// Map a library item (resume or recently-added entry).
    pub fn map_item(&self, item: &Value) -> Result<Card> {
        let item = item
            .as_object()
            .ok_or_else(|| Error::malformed("item is not an object"))?;

        let descriptor = describe(Some(item))?;
        let user_data = object(item, "UserData")?;

        let (position_ms, user_id) = match user_data {
            Some(data) => {
                let nested_state = object(data, "PlayState")?;
                let position = ticks_to_ms(field(data, "PlaybackPositionTicks")).or_else(|| {
                    nested_state.and_then(|state| ticks_to_ms(field(state, "PositionTicks")))
                });
                let user = string(data, "LastPlayedByUserId").or_else(|| string(data, "UserId"));
                (position, user)
            }
            None => (None, None),
        };

        let progress = Progress::Resume {
            position_ms,
            percent: progress_percent(descriptor.runtime_ms, position_ms),
        };

        Ok(self.build(
            descriptor,
            progress,
            None,
            user_id,
            None,
            Value::Object(item.clone()),
        ))
    }

    fn build(
        &self,
        descriptor: Descriptor,
        progress: Progress,
        session_id: Option<String>,
        user_id: Option<String>,
        player: Option<Player>,
        raw: Value,
    ) -> Card {
        let image = |kind| {
            descriptor
                .item_id
                .as_deref()
                .map(|id| self.images.reference(self.provider, id, kind))
        };
        let poster_url = image(ImageKind::Primary);
        let backdrop_url = image(ImageKind::Backdrop);
        let theme = CardTheme::from_media_type(&descriptor.media_type);

        Card {
            item_id: descriptor.item_id,
            session_id,
            user_id,
            title: descriptor.title,
            media_type: descriptor.media_type,
            series_title: descriptor.series_title,
            episode_name: descriptor.episode_name,
            season: descriptor.season,
            episode: descriptor.episode,
            runtime_ms: descriptor.runtime_ms,
            progress,
            poster_url,
            backdrop_url,
            theme,
            player,
            raw,
        }
    }
}

/// Keep the cards that mapped, logging and dropping the rest.
pub fn collect_cards<I>(results: I) -> Vec<Card>
where
    I: IntoIterator<Item = Result<Card>>,
{
    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(card) => Some(card),
            Err(e) => {
                debug!(error = %e, "Dropping upstream record");
                None
            }
        })
        .collect()
}

fn describe(item: Option<&Object>) -> Result<Descriptor> {
    let Some(item) = item else {
        return Ok(Descriptor {
            item_id: None,
            title: String::new(),
            media_type: String::new(),
            series_title: None,
            episode_name: None,
            season: None,
            episode: None,
            runtime_ms: None,
        });
    };

    let media_type = match field(item, "Type") {
        Some(Value::String(kind)) => kind.to_lowercase(),
        Some(other) => return Err(Error::malformed(format!("item type is {}", other))),
        None => String::new(),
    };
    let title = string(item, "Name").unwrap_or_default();
    let episode_name = (media_type == "episode" && !title.is_empty()).then(|| title.clone());

    Ok(Descriptor {
        item_id: string(item, "Id"),
        runtime_ms: ticks_to_ms(field(item, "RunTimeTicks"))
            .or_else(|| millis(field(item, "RunTimeMs")))
            .or_else(|| millis(field(item, "RuntimeMs"))),
        series_title: string(item, "SeriesName"),
        season: index(item, "ParentIndexNumber"),
        episode: index(item, "IndexNumber"),
        episode_name,
        title,
        media_type,
    })
}

/// Look up `key` in PascalCase, then camelCase. Nulls count as absent.
fn field<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    obj.get(key)
        .or_else(|| obj.get(&camel_case(key)))
        .filter(|value| !value.is_null())
}

fn camel_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Nested block: absent is fine, anything but an object is malformed.
fn object<'a>(obj: &'a Object, key: &str) -> Result<Option<&'a Object>> {
    match field(obj, key) {
        None => Ok(None),
        Some(Value::Object(nested)) => Ok(Some(nested)),
        Some(_) => Err(Error::malformed(format!("{} is not an object", key))),
    }
}

fn string(obj: &Object, key: &str) -> Option<String> {
    match field(obj, key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Season/episode number. Whole-valued floats (`5.0`) are accepted.
fn index(obj: &Object, key: &str) -> Option<u32> {
    match field(obj, key)? {
        Value::Number(n) => match n.as_u64() {
            Some(n) => u32::try_from(n).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
