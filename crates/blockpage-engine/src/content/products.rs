use serde::Serialize;
use serde_json::Value;

use super::Normalized;
use super::primitives::{clamp_int, flag_field, lookup, trimmed_field};
use crate::tokens::{ImageRatio, ProductLayout};

pub const COLUMNS_RANGE: (i64, i64) = (1, 4);
pub const LIMIT_RANGE: (i64, i64) = (1, 200);
const DEFAULT_COLUMNS: i64 = 2;
const DEFAULT_LIMIT: i64 = 12;

/// Display preferences of a products block. The records themselves come
/// from the product catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsContent {
    pub title: String,
    pub layout: ProductLayout,
    pub columns: u8,
    pub limit: u16,
    pub image_ratio: ImageRatio,
    pub show_price: bool,
}

impl Default for ProductsContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            layout: ProductLayout::Grid,
            columns: DEFAULT_COLUMNS as u8,
            limit: DEFAULT_LIMIT as u16,
            image_ratio: ImageRatio::Square,
            show_price: true,
        }
    }
}

pub fn normalize(raw: &Value) -> Normalized<ProductsContent> {
    Normalized::new(ProductsContent {
        title: trimmed_field(raw, &["title"]),
        layout: ProductLayout::from_value_or(lookup(raw, &["layout"]), ProductLayout::Grid),
        columns: clamp_int(
            lookup(raw, &["columns"]),
            COLUMNS_RANGE.0,
            COLUMNS_RANGE.1,
            DEFAULT_COLUMNS,
        ) as u8,
        limit: clamp_int(
            lookup(raw, &["limit"]),
            LIMIT_RANGE.0,
            LIMIT_RANGE.1,
            DEFAULT_LIMIT,
        ) as u16,
        image_ratio: ImageRatio::from_value_or(lookup(raw, &["imageRatio"]), ImageRatio::Square),
        show_price: flag_field(raw, &["showPrice"]).unwrap_or(true),
    })
}
