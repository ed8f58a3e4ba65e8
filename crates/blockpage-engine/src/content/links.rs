use serde::Serialize;
use serde_json::Value;

use super::primitives::{is_http_url, lookup, normalize_url, string_field};
use super::{ContentWarning, Normalized, WarningKind};
use crate::tokens::Align;

const TITLE_KEYS: &[&str] = &["title", "label", "text"];
const URL_KEYS: &[&str] = &["url", "href", "link"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkItem {
    pub title: String,
    pub url: String,
    /// Per-item override of the block alignment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinksContent {
    /// Only complete rows with an http(s) url are kept
    pub items: Vec<LinkItem>,
    pub align: Align,
}

impl Default for LinksContent {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            align: Align::Center,
        }
    }
}

/// Outcome of reading one editor row
enum Row {
    Blank,
    Kept(LinkItem),
    Dropped(WarningKind),
}

fn read_row(raw: &Value) -> Row {
    let title = string_field(raw, TITLE_KEYS).trim().to_string();
    let url = normalize_url(&string_field(raw, URL_KEYS));
    match (title.is_empty(), url.is_empty()) {
        (true, true) => Row::Blank,
        (true, false) | (false, true) => Row::Dropped(WarningKind::PartialRow),
        (false, false) if !is_http_url(&url) => Row::Dropped(WarningKind::InvalidUrl),
        (false, false) => Row::Kept(LinkItem {
            title,
            url,
            align: Align::from_value(lookup(raw, &["align"])),
        }),
    }
}

pub fn normalize(raw: &Value) -> Normalized<LinksContent> {
    let mut normalized = Normalized::new(LinksContent {
        items: Vec::new(),
        align: Align::from_value_or(lookup(raw, &["align"]), Align::Center),
    });

    let rows = lookup(raw, &["items", "links"])
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (index, row) in rows.iter().enumerate() {
        match read_row(row) {
            Row::Blank => {}
            Row::Kept(item) => normalized.content.items.push(item),
            Row::Dropped(kind) => normalized
                .warnings
                .push(ContentWarning::new(format!("items[{index}]"), kind)),
        }
    }
    normalized
}
