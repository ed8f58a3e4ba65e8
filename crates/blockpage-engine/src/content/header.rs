use serde::Serialize;
use serde_json::Value;

use super::primitives::{flag_field, is_navigable_url, lookup, normalize_url, string_field};
use super::{ContentWarning, FieldState, Normalized, WarningKind};

const LABEL_KEYS: &[&str] = &["label", "title", "text"];
const URL_KEYS: &[&str] = &["url", "href"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub url: String,
}

impl NavLink {
    fn read(raw: &Value) -> Self {
        Self {
            label: string_field(raw, LABEL_KEYS).trim().to_string(),
            url: normalize_url(&string_field(raw, URL_KEYS)),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.label.is_empty() && !self.url.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderContent {
    /// Empty means "use the site name"
    pub brand_text: String,
    pub brand_url: String,
    pub logo_url: String,
    pub links: Vec<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<NavLink>,
    pub show_cta: bool,
}

impl HeaderContent {
    /// The call-to-action, if it is switched on and complete
    pub fn visible_cta(&self) -> Option<&NavLink> {
        self.cta
            .as_ref()
            .filter(|cta| self.show_cta && cta.is_complete())
    }

    pub fn has_logo(&self) -> bool {
        FieldState::http_url(&self.logo_url) == FieldState::Valid
    }
}

pub fn normalize(raw: &Value) -> Normalized<HeaderContent> {
    let mut normalized = Normalized::new(HeaderContent {
        brand_text: string_field(raw, &["brandText", "brand", "siteName"])
            .trim()
            .to_string(),
        brand_url: normalize_url(&string_field(raw, &["brandUrl"])),
        logo_url: normalize_url(&string_field(raw, &["logoUrl", "logo"])),
        links: Vec::new(),
        cta: lookup(raw, &["cta"])
            .filter(|cta| cta.is_object())
            .map(NavLink::read),
        show_cta: flag_field(raw, &["showCta", "ctaEnabled"]).unwrap_or(false),
    });

    let rows = lookup(raw, &["links", "nav"])
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (index, row) in rows.iter().enumerate() {
        let link = NavLink::read(row);
        match (link.label.is_empty(), link.url.is_empty()) {
            (true, true) => {}
            (false, false) if is_navigable_url(&link.url) => normalized.content.links.push(link),
            (false, false) => normalized.warnings.push(ContentWarning::new(
                format!("links[{index}]"),
                WarningKind::InvalidUrl,
            )),
            _ => normalized.warnings.push(ContentWarning::new(
                format!("links[{index}]"),
                WarningKind::PartialRow,
            )),
        }
    }

    let content = &normalized.content;
    let cta_url = content.cta.as_ref().map(|cta| cta.url.as_str()).unwrap_or("");
    let states = [
        ("brandUrl", FieldState::navigable_url(&content.brand_url)),
        ("logoUrl", FieldState::http_url(&content.logo_url)),
        ("cta.url", FieldState::navigable_url(cta_url)),
    ];
    for (field, state) in states {
        normalized.validity.set(field, state);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_cta_needs_flag_label_and_url() {
        let base = json!({"cta": {"label": "Book", "url": "cal.example.com"}});
        assert_eq!(normalize(&base).content.visible_cta(), None);

        let shown = json!({"cta": {"label": "Book", "url": "cal.example.com"}, "showCta": true});
        let normalized = normalize(&shown);
        let cta = normalized.content.visible_cta().unwrap();
        assert_eq!(cta.url, "https://cal.example.com");

        let unlabeled = json!({"cta": {"label": "", "url": "cal.example.com"}, "showCta": true});
        assert_eq!(normalize(&unlabeled).content.visible_cta(), None);
    }

    #[test]
    fn test_nav_links_accept_anchors_and_drop_partial_rows() {
        let normalized = normalize(&json!({
            "links": [
                {"label": "Home", "url": "/"},
                {"label": "Contact", "url": "#contact"},
                {"label": "Orphan", "url": ""},
                {"title": "Blog", "href": "blog.example.com"}
            ]
        }));

        let labels: Vec<_> = normalized
            .content
            .links
            .iter()
            .map(|link| link.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Home", "Contact", "Blog"]);
        assert_eq!(
            normalized.warnings,
            vec![ContentWarning::new("links[2]", WarningKind::PartialRow)]
        );
    }

    #[test]
    fn test_brand_text_is_optional() {
        let normalized = normalize(&json!({"brandText": "   "}));
        assert_eq!(normalized.content.brand_text, "");
        assert!(normalized.is_savable());
    }

    #[test]
    fn test_invalid_logo_url_is_flagged() {
        let normalized = normalize(&json!({"logoUrl": "tel:123"}));
        assert_eq!(normalized.validity.get("logoUrl"), Some(FieldState::Invalid));
        assert!(!normalized.content.has_logo());
    }
}
