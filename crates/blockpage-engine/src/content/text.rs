use serde::Serialize;
use serde_json::Value;

use super::primitives::{HexInput, lookup, parse_hex, string_field};
use super::{FieldState, Normalized};
use crate::tokens::{Align, TextSize};

const TEXT_KEYS: &[&str] = &["text", "content", "body"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextContent {
    /// Trimmed text; empty text renders nothing
    pub text: String,
    pub size: TextSize,
    pub align: Align,
    /// `#rrggbb`, or absent for the theme default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

pub fn normalize(raw: &Value) -> Normalized<TextContent> {
    let (color, color_state) = match parse_hex(&string_field(raw, &["color"])) {
        HexInput::Color(color) => (Some(color), FieldState::Valid),
        HexInput::Empty => (None, FieldState::Empty),
        HexInput::Invalid => (None, FieldState::Invalid),
    };

    let mut normalized = Normalized::new(TextContent {
        text: string_field(raw, TEXT_KEYS).trim().to_string(),
        size: TextSize::from_value_or(lookup(raw, &["size"]), TextSize::Md),
        align: Align::from_value_or(lookup(raw, &["align"]), Align::Left),
        color,
    });
    normalized.validity.set("color", color_state);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults_for_empty_content() {
        let normalized = normalize(&json!({}));
        assert_eq!(normalized.content, TextContent::default());
        assert_eq!(normalized.content.size, TextSize::Md);
        assert_eq!(normalized.content.align, Align::Left);
        assert!(normalized.is_savable());
    }

    #[test]
    fn test_trims_text_and_reads_legacy_key() {
        let normalized = normalize(&json!({"content": "  Hello\nworld  ", "size": "lg"}));
        assert_eq!(normalized.content.text, "Hello\nworld");
        assert_eq!(normalized.content.size, TextSize::Lg);
    }

    #[test]
    fn test_unknown_size_and_align_fall_back() {
        let normalized = normalize(&json!({"text": "x", "size": "huge", "align": "justify"}));
        assert_eq!(normalized.content.size, TextSize::Md);
        assert_eq!(normalized.content.align, Align::Left);
    }

    #[test]
    fn test_invalid_color_is_dropped_and_flagged() {
        let normalized = normalize(&json!({"text": "x", "color": "12g"}));
        assert_eq!(normalized.content.color, None);
        assert_eq!(normalized.validity.get("color"), Some(FieldState::Invalid));
        assert!(!normalized.is_savable());
    }

    #[test]
    fn test_short_color_is_expanded() {
        let normalized = normalize(&json!({"text": "x", "color": "#F0A"}));
        assert_eq!(normalized.content.color.as_deref(), Some("#ff00aa"));
        assert_eq!(normalized.validity.get("color"), Some(FieldState::Valid));
    }
}
