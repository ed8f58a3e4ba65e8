//! Responsive style cascade.
//!
//! A stored style record holds six tokens plus optional `mobile` and
//! `desktop` partial overrides:
//!
//! ```json
//! { "width": "full", "bg": "muted", "mobile": { "padding": "sm" }, "desktop": { "compact": true } }
//! ```
//!
//! [`resolve_style`] turns it into two complete [`StyleDescriptor`]s:
//! `compact` (base + mobile, used unconditionally) and `wide` (base +
//! desktop, applied from the wide breakpoint up). The desktop override
//! never sees the mobile one. Resolution is total: garbage in, defaults out.

pub mod presentation;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::content::primitives::flag_value;
use crate::tokens::{Align, Background, Border, Padding, Radius, Width};

pub use presentation::{ConcreteStyle, PresentationTable, Token};

/// Legacy key -> canonical key. Applied to the base record and both overrides.
pub const KEY_ALIASES: &[(&str, &str)] = &[("bg", "background")];

/// Legacy value -> canonical value, per canonical key
pub const VALUE_ALIASES: &[(&str, &str, &str)] = &[("width", "compact", "content")];

/// Legacy boolean flag meaning `width: content`; an explicit `width` wins
pub const COMPACT_FLAG: &str = "compact";

/// A fully resolved set of style tokens for one viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleDescriptor {
    pub padding: Padding,
    pub width: Width,
    pub background: Background,
    pub radius: Radius,
    pub border: Border,
    pub align: Align,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            padding: Padding::None,
            width: Width::Full,
            background: Background::None,
            radius: Radius::Xxl,
            border: Border::Subtle,
            align: Align::Left,
        }
    }
}

/// Any subset of the style tokens, as read from a record or an override
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialStyle {
    pub padding: Option<Padding>,
    pub width: Option<Width>,
    pub background: Option<Background>,
    pub radius: Option<Radius>,
    pub border: Option<Border>,
    pub align: Option<Align>,
}

impl PartialStyle {
    /// Read tokens from a JSON object, mapping legacy aliases.
    ///
    /// Unknown keys and unparseable values are ignored, so they fall through
    /// to whatever this partial is layered on.
    pub fn from_value(raw: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = raw else {
            return Self::default();
        };
        let map = canonical_keys(map);

        let width = Width::from_value(map.get("width")).or_else(|| {
            map.get(COMPACT_FLAG)
                .and_then(flag_value)
                .filter(|compact| *compact)
                .map(|_| Width::Content)
        });

        Self {
            padding: Padding::from_value(map.get("padding")),
            width,
            background: Background::from_value(map.get("background")),
            radius: Radius::from_value(map.get("radius")),
            border: Border::from_value(map.get("border")),
            align: Align::from_value(map.get("align")),
        }
    }

    /// Overwrite `base` key by key with the tokens this partial sets
    pub fn apply_to(&self, base: StyleDescriptor) -> StyleDescriptor {
        StyleDescriptor {
            padding: self.padding.unwrap_or(base.padding),
            width: self.width.unwrap_or(base.width),
            background: self.background.unwrap_or(base.background),
            radius: self.radius.unwrap_or(base.radius),
            border: self.border.unwrap_or(base.border),
            align: self.align.unwrap_or(base.align),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Rename alias keys and values to canonical ones. A canonical key already
/// present wins.
fn canonical_keys(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = map.clone();
    for (alias, canonical) in KEY_ALIASES {
        if let Some(value) = out.remove(*alias)
            && !out.contains_key(*canonical)
        {
            out.insert(canonical.to_string(), value);
        }
    }
    for (key, alias, canonical) in VALUE_ALIASES {
        if let Some(Value::String(value)) = out.get_mut(*key)
            && value.trim().eq_ignore_ascii_case(alias)
        {
            *value = canonical.to_string();
        }
    }
    out
}

/// Device descriptors for one block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    /// Mobile-first baseline, always applied
    pub compact: StyleDescriptor,
    /// Applied at the wide breakpoint
    pub wide: StyleDescriptor,
}

impl ResolvedStyle {
    /// Both descriptors mapped through the presentation table
    pub fn concrete(&self, table: &PresentationTable) -> (ConcreteStyle, ConcreteStyle) {
        (table.concrete(&self.compact), table.concrete(&self.wide))
    }
}

/// Resolve a raw style record. Never fails.
pub fn resolve_style(raw: Option<&Value>) -> ResolvedStyle {
    let base = PartialStyle::from_value(raw).apply_to(StyleDescriptor::default());
    let mobile = PartialStyle::from_value(raw.and_then(|raw| raw.get("mobile")));
    let desktop = PartialStyle::from_value(raw.and_then(|raw| raw.get("desktop")));

    ResolvedStyle {
        compact: mobile.apply_to(base),
        wide: desktop.apply_to(base),
    }
}
