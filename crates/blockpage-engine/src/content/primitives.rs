//! Field-level normalizers shared by several block types.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use url::Url;

/// Schemes that are stored verbatim and never get an `https://` prefix
const PASSTHROUGH_SCHEMES: &[&str] = &["mailto:", "tel:", "sms:"];

/// Prefix for anchor ids that would otherwise start with a digit
const ANCHOR_DIGIT_PREFIX: &str = "block-";

/// Normalize a user-entered link target.
///
/// Anchors (`#top`), site-relative paths (`/shop`), `mailto:`/`tel:`/`sms:`
/// targets and explicit `http(s)://` urls are returned trimmed but otherwise
/// untouched. Anything else is assumed to be a bare host and gets `https://`.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('#')
        || trimmed.starts_with('/')
        || has_scheme(trimmed, PASSTHROUGH_SCHEMES)
        || has_scheme(trimmed, &["http://", "https://"])
    {
        return trimmed.to_string();
    }
    format!("https://{trimmed}")
}

fn has_scheme(url: &str, schemes: &[&str]) -> bool {
    schemes.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// True when `url` parses as an absolute http or https url with a host
pub fn is_http_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// True for targets a navigation element may point at: in-page anchors,
/// relative paths, the passthrough schemes and valid http(s) urls.
pub fn is_navigable_url(url: &str) -> bool {
    url.starts_with('#')
        || url.starts_with('/')
        || has_scheme(url, PASSTHROUGH_SCHEMES)
        || is_http_url(url)
}

/// Outcome of reading a hex color field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexInput {
    /// Blank input: use the theme default
    Empty,
    /// Lowercase `#rrggbb`
    Color(String),
    Invalid,
}

fn hex_regex() -> &'static Regex {
    static HEX_REGEX: OnceLock<Regex> = OnceLock::new();
    HEX_REGEX.get_or_init(|| {
        Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("Invalid hex color regex")
    })
}

pub fn parse_hex(raw: &str) -> HexInput {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return HexInput::Empty;
    }
    let Some(captures) = hex_regex().captures(trimmed) else {
        return HexInput::Invalid;
    };
    let digits = captures[1].to_ascii_lowercase();
    let expanded = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        digits
    };
    HexInput::Color(format!("#{expanded}"))
}

/// `#fff` -> `#ffffff`; blank or malformed input -> `None`
pub fn normalize_hex(raw: &str) -> Option<String> {
    match parse_hex(raw) {
        HexInput::Color(color) => Some(color),
        HexInput::Empty | HexInput::Invalid => None,
    }
}

/// Apply an edit to a color field: a malformed input is rejected and the
/// previous value is kept, a blank input clears the field.
pub fn apply_hex_edit(previous: Option<&str>, input: &str) -> Option<String> {
    match parse_hex(input) {
        HexInput::Color(color) => Some(color),
        HexInput::Empty => None,
        HexInput::Invalid => previous.map(str::to_string),
    }
}

/// Read an integer setting, clamped into `[min, max]`.
///
/// Numbers and numeric strings are rounded and clamped; infinities clamp to
/// the nearest bound. Anything that is not a number at all yields `fallback`.
pub fn clamp_int(value: Option<&Value>, min: i64, max: i64, fallback: i64) -> i64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_nan() => fallback,
        Some(n) if n == f64::INFINITY => max,
        Some(n) if n == f64::NEG_INFINITY => min,
        Some(n) => (n.round() as i64).clamp(min, max),
        None => fallback,
    }
}

/// Sanitize an in-page anchor id.
///
/// Whitespace runs become `-`, characters outside `[A-Za-z0-9_-]` are
/// dropped and a leading digit gets a `block-` prefix. Returns `None` when
/// nothing usable is left.
pub fn normalize_anchor(raw: &str) -> Option<String> {
    let mut anchor = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for c in raw.trim().chars() {
        if c.is_whitespace() {
            pending_dash = !anchor.is_empty();
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            if pending_dash {
                anchor.push('-');
                pending_dash = false;
            }
            anchor.push(c);
        }
    }
    if anchor.is_empty() {
        return None;
    }
    if anchor.starts_with(|c: char| c.is_ascii_digit()) {
        anchor.insert_str(0, ANCHOR_DIGIT_PREFIX);
    }
    Some(anchor)
}

/// First value stored under any of `keys`, skipping explicit nulls.
///
/// The first key is the canonical name; the rest are legacy aliases.
pub(crate) fn lookup<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .find(|value| !value.is_null())
}

/// Read a string field. Numbers are accepted and stringified; other shapes are empty.
pub(crate) fn string_field(raw: &Value, keys: &[&str]) -> String {
    match lookup(raw, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn trimmed_field(raw: &Value, keys: &[&str]) -> String {
    string_field(raw, keys).trim().to_string()
}

/// Read a boolean flag, accepting the loose encodings older editors wrote
pub(crate) fn flag_field(raw: &Value, keys: &[&str]) -> Option<bool> {
    lookup(raw, keys).and_then(flag_value)
}

pub(crate) fn flag_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
