//! Content normalization: raw, possibly malformed block content in, a
//! canonical typed value plus per-field validity out.
//!
//! Every normalizer here is total. Missing or malformed fields become safe
//! defaults or are dropped; nothing returns an error. Field validity is
//! reported alongside so an editor can flag a field inline, and link rows
//! that had to be dropped are reported as [`ContentWarning`]s.
//!
//! Legacy key aliases (`label` for `title`, `href` for `url`, `src` for an
//! image `url`, ...) are resolved here and nowhere else. The canonical
//! content serializes back using canonical key names only, so
//! `normalize(kind, normalize(kind, x).content)` reproduces the same content.

pub mod header;
pub mod hero;
pub mod image;
pub mod links;
pub mod primitives;
pub mod products;
pub mod text;

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::models::{Block, BlockType};

pub use header::{HeaderContent, NavLink};
pub use hero::{ButtonLink, HeroContent};
pub use image::ImageContent;
pub use links::{LinkItem, LinksContent};
pub use primitives::{
    HexInput, apply_hex_edit, clamp_int, is_http_url, is_navigable_url, normalize_anchor,
    normalize_hex, normalize_url, parse_hex,
};
pub use products::ProductsContent;
pub use text::TextContent;

/// Validity of a single interactive field after normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    Valid,
    /// Left blank; fine to save, the renderer treats it as absent
    Empty,
    /// Filled but unusable; saving is blocked until it is fixed
    Invalid,
}

impl FieldState {
    /// State of a url field that must be an absolute http(s) url
    pub fn http_url(url: &str) -> Self {
        if url.is_empty() {
            FieldState::Empty
        } else if is_http_url(url) {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }

    /// State of a url field that may also be an anchor, path or mailto/tel/sms
    pub fn navigable_url(url: &str) -> Self {
        if url.is_empty() {
            FieldState::Empty
        } else if is_navigable_url(url) {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }
}

/// Field name -> validity, for every interactive field a normalizer checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValidity(BTreeMap<String, FieldState>);

impl FieldValidity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, state: FieldState) {
        self.0.insert(field.into(), state);
    }

    pub fn get(&self, field: &str) -> Option<FieldState> {
        self.0.get(field).copied()
    }

    /// A field is valid unless it was checked and found invalid
    pub fn is_valid(&self, field: &str) -> bool {
        self.get(field) != Some(FieldState::Invalid)
    }

    pub fn all_valid(&self) -> bool {
        self.0.values().all(|state| *state != FieldState::Invalid)
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, state)| **state == FieldState::Invalid)
            .map(|(field, _)| field.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldState)> {
        self.0.iter().map(|(field, state)| (field.as_str(), *state))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// Exactly one of the row's two fields was filled
    PartialRow,
    /// Both fields were filled but the url is unusable
    InvalidUrl,
}

/// A fragment that normalization dropped, reported so the editor can show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentWarning {
    /// Path of the dropped fragment in the raw content, e.g. `items[2]`
    pub field: String,
    pub kind: WarningKind,
}

impl ContentWarning {
    pub fn new(field: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl std::fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            WarningKind::PartialRow => {
                write!(f, "{}: fill in both fields or clear the row", self.field)
            }
            WarningKind::InvalidUrl => write!(f, "{}: the link is not a valid address", self.field),
        }
    }
}

/// Result of normalizing one piece of content
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<C> {
    pub content: C,
    pub validity: FieldValidity,
    pub warnings: Vec<ContentWarning>,
}

impl<C> Normalized<C> {
    pub fn new(content: C) -> Self {
        Self {
            content,
            validity: FieldValidity::new(),
            warnings: Vec::new(),
        }
    }

    pub fn map<D>(self, f: impl FnOnce(C) -> D) -> Normalized<D> {
        Normalized {
            content: f(self.content),
            validity: self.validity,
            warnings: self.warnings,
        }
    }

    /// Whether the content may be persisted as-is
    pub fn is_savable(&self) -> bool {
        self.validity.all_valid()
    }
}

/// Canonical content, tagged by block type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalContent {
    Header(HeaderContent),
    Hero(HeroContent),
    Links(LinksContent),
    Text(TextContent),
    Image(ImageContent),
    /// Dividers carry no content
    Divider,
    Products(ProductsContent),
    /// Content of a block type this build does not know, kept verbatim
    Unknown(Value),
}

impl CanonicalContent {
    /// JSON form suitable for persisting; uses canonical key names only
    pub fn to_value(&self) -> Value {
        match self {
            CanonicalContent::Divider => json!({}),
            CanonicalContent::Unknown(raw) => raw.clone(),
            other => serde_json::to_value(other).unwrap_or_else(|_| json!({})),
        }
    }
}

/// Normalize raw content for a block type
pub fn normalize(kind: &BlockType, raw: &Value) -> Normalized<CanonicalContent> {
    let normalized = match kind {
        BlockType::Header => header::normalize(raw).map(CanonicalContent::Header),
        BlockType::Hero => hero::normalize(raw).map(CanonicalContent::Hero),
        BlockType::Links => links::normalize(raw).map(CanonicalContent::Links),
        BlockType::Text => text::normalize(raw).map(CanonicalContent::Text),
        BlockType::Image => image::normalize(raw).map(CanonicalContent::Image),
        BlockType::Divider => Normalized::new(CanonicalContent::Divider),
        BlockType::Products => products::normalize(raw).map(CanonicalContent::Products),
        BlockType::Unknown(_) => Normalized::new(CanonicalContent::Unknown(raw.clone())),
    };
    if !normalized.validity.all_valid() || !normalized.warnings.is_empty() {
        log::debug!(
            "normalized {kind} content with invalid fields {:?} and {} warnings",
            normalized.validity.invalid_fields(),
            normalized.warnings.len()
        );
    }
    normalized
}

/// Normalize a stored block's content.
///
/// The block-level `variant` column wins over a `variant` key inside the
/// content, so the two can never disagree once normalized.
pub fn normalize_block(block: &Block) -> Normalized<CanonicalContent> {
    match (&block.variant, &block.content) {
        (Some(variant), Value::Object(map)) => {
            let mut raw = map.clone();
            raw.insert("variant".to_string(), Value::String(variant.clone()));
            normalize(&block.kind, &Value::Object(raw))
        }
        (Some(variant), Value::Null) => {
            normalize(&block.kind, &json!({ "variant": variant }))
        }
        _ => normalize(&block.kind, &block.content),
    }
}

/// Starting content for a freshly inserted block
pub fn default_content(kind: &BlockType) -> Value {
    match kind {
        BlockType::Header => json!({ "brandText": "", "links": [], "showCta": false }),
        BlockType::Hero => json!({
            "variant": "default",
            "title": "Hello there",
            "subtitle": "Tell visitors what this page is about",
        }),
        BlockType::Links => json!({ "items": [], "align": "center" }),
        BlockType::Text => json!({ "text": "", "size": "md", "align": "left" }),
        BlockType::Image => json!({ "url": "", "alt": "", "shape": "circle" }),
        BlockType::Divider => json!({}),
        BlockType::Products => json!({ "layout": "grid", "columns": 2, "limit": 12 }),
        BlockType::Unknown(_) => json!({}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageId;
    use pretty_assertions::assert_eq;

    fn messy_inputs() -> Vec<Value> {
        vec![
            Value::Null,
            json!("just a string"),
            json!([1, 2, 3]),
            json!({}),
            json!({
                "text": "  Hello  ", "size": "XL", "align": "Center", "color": "#ABC",
                "url": "example.com/pic.png", "alt": 7, "shape": "ROUNDED",
                "items": [
                    {"title": "T", "url": ""},
                    {"label": "Shop", "href": "shop.example.com", "align": "right"},
                    {"title": "Bad", "url": "http://"},
                    "garbage"
                ],
                "variant": "split", "title": "Hi", "subtitle": 5,
                "primaryButton": {"title": "Go", "url": "go.example.com"},
                "secondaryButton": {"title": "", "url": "#more"},
                "backgroundOverlay": "95", "imageUrl": "img.example.com/a.jpg",
                "brandText": " Brand ", "logoUrl": "not a url at all",
                "links": [{"label": "Home", "url": "/"}, {"label": "", "url": "x.com"}],
                "cta": {"label": "Buy", "url": "buy.example.com"}, "showCta": "yes",
                "layout": "list", "columns": 9, "limit": 0, "showPrice": 0
            }),
        ]
    }

    #[test]
    fn test_normalize_is_idempotent_for_every_type() {
        let mut kinds = BlockType::KNOWN.to_vec();
        kinds.push(BlockType::Unknown("mystery".to_string()));

        for kind in &kinds {
            for raw in messy_inputs() {
                let once = normalize(kind, &raw).content;
                let twice = normalize(kind, &once.to_value()).content;
                assert_eq!(twice, once, "normalize is not idempotent for {kind}");
            }
        }
    }

    #[test]
    fn test_unknown_type_passes_content_through() {
        let raw = json!({"slides": [1, 2]});
        let normalized = normalize(&BlockType::from("carousel"), &raw);
        assert_eq!(normalized.content, CanonicalContent::Unknown(raw.clone()));
        assert_eq!(normalized.content.to_value(), raw);
    }

    #[test]
    fn test_divider_has_no_content() {
        let normalized = normalize(&BlockType::Divider, &json!({"anything": true}));
        assert_eq!(normalized.content, CanonicalContent::Divider);
        assert_eq!(normalized.content.to_value(), json!({}));
        assert!(normalized.is_savable());
    }

    #[test]
    fn test_block_variant_overrides_content_variant() {
        let mut block = Block::new(
            PageId::new(),
            BlockType::Hero,
            json!({"variant": "split", "title": "Hi"}),
            1,
        );
        block.variant = Some("background".to_string());

        let CanonicalContent::Hero(hero) = normalize_block(&block).content else {
            panic!("expected hero content");
        };
        assert_eq!(hero.variant, crate::tokens::HeroVariant::Background);
    }

    #[test]
    fn test_default_content_is_already_canonical() {
        for kind in BlockType::KNOWN {
            let raw = default_content(&kind);
            let normalized = normalize(&kind, &raw);
            assert!(normalized.is_savable(), "default {kind} content must be savable");
            assert_eq!(
                normalize(&kind, &normalized.content.to_value()).content,
                normalized.content
            );
        }
    }

    #[test]
    fn test_field_validity_reports_invalid_fields() {
        let mut validity = FieldValidity::new();
        validity.set("url", FieldState::Invalid);
        validity.set("alt", FieldState::Empty);

        assert!(!validity.all_valid());
        assert!(validity.is_valid("alt"));
        assert!(validity.is_valid("never-checked"));
        assert_eq!(validity.invalid_fields(), vec!["url".to_string()]);
    }
}
