//! Fetch collaborator: the narrow seam between the listing pipelines and the
//! upstream media server.
//!
//! Implementations attach credentials, enforce their own timeout, and turn
//! every HTTP-level problem into an `Err` instead of panicking. The pipelines
//! never see the access token.

mod http;

pub use http::{HttpFetcher, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};

use async_trait::async_trait;
use marquee_common::Result;
use serde_json::Value;

/// Query parameters as ordered key/value pairs.
pub type Query = [(String, String)];

/// Async trait every upstream transport implements.
///
/// Implementations are shared behind an `Arc` across concurrent calls and
/// must not keep per-call state.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `path` (relative to the server root) and decode the body as JSON.
    async fn get_json(&self, path: &str, query: &Query) -> Result<Value>;
}
