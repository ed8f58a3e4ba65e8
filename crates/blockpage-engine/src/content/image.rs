use serde::Serialize;
use serde_json::Value;

use super::primitives::{lookup, normalize_url, string_field, trimmed_field};
use super::{FieldState, Normalized};
use crate::tokens::ImageShape;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImageContent {
    pub url: String,
    pub alt: String,
    pub shape: ImageShape,
}

impl ImageContent {
    /// Only absolute http(s) images are displayed
    pub fn has_displayable_url(&self) -> bool {
        FieldState::http_url(&self.url) == FieldState::Valid
    }
}

pub fn normalize(raw: &Value) -> Normalized<ImageContent> {
    let url = normalize_url(&string_field(raw, &["url", "src", "imageUrl"]));
    let url_state = FieldState::http_url(&url);

    let mut normalized = Normalized::new(ImageContent {
        url,
        alt: trimmed_field(raw, &["alt"]),
        shape: ImageShape::from_value_or(lookup(raw, &["shape"]), ImageShape::Circle),
    });
    normalized.validity.set("url", url_state);
    normalized
}
