//! Opaque image references.
//!
//! Cards never carry a browsable upstream URL. They carry an internal
//! routing path that a proxying collaborator resolves into an authenticated
//! upstream request, so the access token stays server-side.

use marquee_common::{ImageKind, ProviderKind};
use serde::{Deserialize, Serialize};

/// Optional `maxWidth` hints attached to image references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHints {
    pub poster_max_width: Option<u32>,
    pub backdrop_max_width: Option<u32>,
}

impl ImageHints {
    fn for_kind(&self, kind: ImageKind) -> Option<u32> {
        match kind {
            ImageKind::Primary => self.poster_max_width,
            ImageKind::Backdrop => self.backdrop_max_width,
        }
    }

    /// Reference for `item_id` of the given kind using these hints.
    pub fn reference(&self, provider: ProviderKind, item_id: &str, kind: ImageKind) -> String {
        image_ref(provider, item_id, kind, self.for_kind(kind))
    }
}

/// Build `/{provider}/image/{item_id}?type={kind}[&maxWidth={n}]`.
///
/// A width of 0 is treated as "no hint".
pub fn image_ref(
    provider: ProviderKind,
    item_id: &str,
    kind: ImageKind,
    max_width: Option<u32>,
) -> String {
    let mut path = format!(
        "/{}/image/{}?type={}",
        provider,
        urlencoding::encode(item_id),
        kind
    );
    if let Some(width) = max_width.filter(|w| *w > 0) {
        path.push_str(&format!("&maxWidth={}", width));
    }
    path
}
