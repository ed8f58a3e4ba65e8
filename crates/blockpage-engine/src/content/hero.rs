use serde::Serialize;
use serde_json::Value;

use super::primitives::{clamp_int, lookup, normalize_url, string_field, trimmed_field};
use super::{FieldState, Normalized};
use crate::tokens::{
    Align, BackgroundHeight, HeroVariant, ImageRatio, ImageSize, Radius, Side, TextSize,
    TitleSize, VerticalAlign,
};

/// Overlay darkness in percent for the `background` variant
const OVERLAY_RANGE: (i64, i64) = (0, 90);
const OVERLAY_DEFAULT: i64 = 40;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ButtonLink {
    pub title: String,
    pub url: String,
}

impl ButtonLink {
    fn read(raw: Option<&Value>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        Self {
            title: trimmed_field(raw, &["title", "label", "text"]),
            url: normalize_url(&string_field(raw, &["url", "href"])),
        }
    }

    /// A button renders only when both halves are filled
    pub fn is_active(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }
}

/// Hero content.
///
/// All layout fields are kept whatever the variant so switching variants in
/// the editor does not lose choices; `variant` decides which ones a renderer
/// reads (`image_side`, `image_size`, `image_ratio` for `split`; the
/// `background_*` fields for `background`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub variant: HeroVariant,
    pub title: String,
    pub subtitle: String,
    pub title_size: TitleSize,
    pub subtitle_size: TextSize,
    pub align: Align,
    pub vertical_align: VerticalAlign,
    pub image_url: String,
    pub image_side: Side,
    pub image_size: ImageSize,
    pub image_ratio: ImageRatio,
    pub primary_button: ButtonLink,
    pub secondary_button: ButtonLink,
    pub background_height: BackgroundHeight,
    pub background_overlay: u8,
    pub background_radius: Radius,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            variant: HeroVariant::Default,
            title: String::new(),
            subtitle: String::new(),
            title_size: TitleSize::Lg,
            subtitle_size: TextSize::Md,
            align: Align::Center,
            vertical_align: VerticalAlign::Center,
            image_url: String::new(),
            image_side: Side::Right,
            image_size: ImageSize::Md,
            image_ratio: ImageRatio::Square,
            primary_button: ButtonLink::default(),
            secondary_button: ButtonLink::default(),
            background_height: BackgroundHeight::Md,
            background_overlay: OVERLAY_DEFAULT as u8,
            background_radius: Radius::Xxl,
        }
    }
}

impl HeroContent {
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonLink> {
        [&self.primary_button, &self.secondary_button]
            .into_iter()
            .filter(|button| button.is_active())
    }

    pub fn has_image(&self) -> bool {
        FieldState::http_url(&self.image_url) == FieldState::Valid
    }
}

pub fn normalize(raw: &Value) -> Normalized<HeroContent> {
    let defaults = HeroContent::default();
    let image_url = normalize_url(&string_field(raw, &["imageUrl", "image"]));
    let primary_button = ButtonLink::read(lookup(raw, &["primaryButton", "button"]));
    let secondary_button = ButtonLink::read(lookup(raw, &["secondaryButton"]));
    let overlay = clamp_int(
        lookup(raw, &["backgroundOverlay"]),
        OVERLAY_RANGE.0,
        OVERLAY_RANGE.1,
        OVERLAY_DEFAULT,
    );

    let mut normalized = Normalized::new(HeroContent {
        variant: HeroVariant::from_value_or(lookup(raw, &["variant"]), defaults.variant),
        title: trimmed_field(raw, &["title"]),
        subtitle: trimmed_field(raw, &["subtitle"]),
        title_size: TitleSize::from_value_or(lookup(raw, &["titleSize"]), defaults.title_size),
        subtitle_size: TextSize::from_value_or(
            lookup(raw, &["subtitleSize"]),
            defaults.subtitle_size,
        ),
        align: Align::from_value_or(lookup(raw, &["align"]), defaults.align),
        vertical_align: VerticalAlign::from_value_or(
            lookup(raw, &["verticalAlign"]),
            defaults.vertical_align,
        ),
        image_side: Side::from_value_or(lookup(raw, &["imageSide"]), defaults.image_side),
        image_size: ImageSize::from_value_or(lookup(raw, &["imageSize"]), defaults.image_size),
        image_ratio: ImageRatio::from_value_or(
            lookup(raw, &["imageRatio"]),
            defaults.image_ratio,
        ),
        background_height: BackgroundHeight::from_value_or(
            lookup(raw, &["backgroundHeight"]),
            defaults.background_height,
        ),
        background_overlay: overlay as u8,
        background_radius: Radius::from_value_or(
            lookup(raw, &["backgroundRadius"]),
            defaults.background_radius,
        ),
        image_url,
        primary_button,
        secondary_button,
    });

    let content = &normalized.content;
    let states = [
        ("imageUrl", FieldState::http_url(&content.image_url)),
        (
            "primaryButton.url",
            FieldState::navigable_url(&content.primary_button.url),
        ),
        (
            "secondaryButton.url",
            FieldState::navigable_url(&content.secondary_button.url),
        ),
    ];
    for (field, state) in states {
        normalized.validity.set(field, state);
    }
    normalized
}
