//! Listing pipelines: live sessions ("now screening") and on-demand items.
//!
//! Both pipelines run fetch -> map -> filter/limit and share one
//! [`CardMapper`]. Internally every step returns a `Result`; the public
//! `list_*` methods are the boundary where failures become empty results,
//! while the `try_list_*` methods keep them visible.
//!
//! - [`now_screening`] -- active sessions with caller filters.
//! - [`on_demand`] -- resume items with a recently-added fallback.
//! - [`filters`] -- filter types and the count rule.

pub mod filters;
pub mod now_screening;
pub mod on_demand;

pub use filters::{
    clamp_count, parse_count, NowScreeningFilters, OnDemandFilters, DEFAULT_COUNT, MAX_COUNT,
    MAX_RECENTLY_ADDED_DAYS,
};
pub use on_demand::Source;

use std::sync::Arc;

use marquee_common::{Error, Result};
use serde_json::Value;

use crate::card::{CardMapper, ImageHints};
use crate::config::Config;
use crate::fetch::{Fetcher, HttpFetcher};

/// Entry point for both listings.
///
/// Holds no mutable state: clones share the fetcher and every call is
/// independent of the others.
#[derive(Clone)]
pub struct Marquee {
    fetcher: Arc<dyn Fetcher>,
    mapper: CardMapper,
    user_id: Option<String>,
}

impl Marquee {
    /// Assemble from parts. `user_id` enables the resume source.
    pub fn new(fetcher: Arc<dyn Fetcher>, mapper: CardMapper, user_id: Option<String>) -> Self {
        Self {
            fetcher,
            mapper,
            user_id: user_id.filter(|id| !id.trim().is_empty()),
        }
    }

    /// Build an HTTP-backed instance from configuration.
    ///
    /// This is the only place a [`Error::Configuration`] surfaces.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = config
            .provider
            .as_ref()
            .ok_or_else(|| Error::configuration("no [provider] section configured"))?;

        let fetcher = HttpFetcher::new(provider)?;
        let images: ImageHints = config.images.into();
        let mapper = CardMapper::new(provider.kind, images);

        Ok(Self::new(Arc::new(fetcher), mapper, provider.user_id.clone()))
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn mapper(&self) -> &CardMapper {
        &self.mapper
    }
}

/// Pull the record list out of an upstream response.
///
/// Accepts a bare array or an `{ "Items": [...] }` envelope.
pub(crate) fn extract_items(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut envelope) => {
            match envelope.remove("Items").or_else(|| envelope.remove("items")) {
                Some(Value::Array(items)) => Ok(items),
                Some(_) => Err(Error::decode("Items is not an array")),
                None => Err(Error::decode("response has no Items")),
            }
        }
        other => Err(Error::decode(format!("unexpected response: {}", other))),
    }
}
