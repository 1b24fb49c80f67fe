//! Shared test harness for integration tests.
//!
//! Provides [`FakeFetcher`], an in-memory [`Fetcher`] with scripted replies
//! per path that records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use marquee::card::{CardMapper, ImageHints};
use marquee::fetch::Query;
use marquee::{Error, Fetcher, Marquee, Result};
use marquee_common::ProviderKind;
use serde_json::{json, Value};

#[derive(Clone)]
enum Reply {
    Json(Value),
    Fail(u16),
}

/// A request seen by the fake: path plus query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Scripted in-memory fetcher. Unscripted paths answer 404.
#[derive(Default)]
pub struct FakeFetcher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<Call>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, body: Value) -> Self {
        self.replies.insert(path.to_string(), Reply::Json(body));
        self
    }

    pub fn with_failure(mut self, path: &str, status: u16) -> Self {
        self.replies.insert(path.to_string(), Reply::Fail(status));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn get_json(&self, path: &str, query: &Query) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            path: path.to_string(),
            query: query.to_vec(),
        });

        match self.replies.get(path) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Fail(status)) => Err(Error::status(*status, path)),
            None => Err(Error::status(404, path)),
        }
    }
}

/// Build a [`Marquee`] over `fetcher`, keeping a handle for assertions.
pub fn build_marquee(fetcher: FakeFetcher, user_id: Option<&str>) -> (Marquee, Arc<FakeFetcher>) {
    let fetcher = Arc::new(fetcher);
    let mapper = CardMapper::new(ProviderKind::Jellyfin, ImageHints::default());
    let marquee = Marquee::new(fetcher.clone(), mapper, user_id.map(String::from));
    (marquee, fetcher)
}

/// A library item with a predictable id and name.
pub fn item(id: usize) -> Value {
    json!({
        "Id": format!("item-{}", id),
        "Name": format!("Item {}", id),
        "Type": "Movie",
        "RunTimeTicks": 72_000_000_000u64
    })
}

pub fn items(range: std::ops::Range<usize>) -> Vec<Value> {
    range.map(item).collect()
}
