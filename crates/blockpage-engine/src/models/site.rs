use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PageId;

/// Site-wide width used for link and button rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutWidth {
    #[default]
    Compact,
    Wide,
    Full,
}

/// Site-wide visual treatment of buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Solid,
    Outline,
    Soft,
}

/// Read-only site context for the page being rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContext {
    /// Used as header brand text when a header block leaves it empty
    pub site_name: String,
    #[serde(default)]
    pub layout_width: LayoutWidth,
    #[serde(default)]
    pub button_style: ButtonStyle,
}

impl Default for SiteContext {
    fn default() -> Self {
        Self {
            site_name: "My page".to_string(),
            layout_width: LayoutWidth::default(),
            button_style: ButtonStyle::default(),
        }
    }
}

/// A catalog entry shown by `products` blocks. Owned by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: Uuid,
    pub page_id: PageId,
    pub title: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Explicit manual ordering, ascending
    #[serde(default)]
    pub sort_key: i64,
    /// Unix seconds; newer first among equal sort keys
    #[serde(default)]
    pub created_at: i64,
}

fn default_active() -> bool {
    true
}

/// Everything a renderer may read besides the block itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    pub site: SiteContext,
    /// Active products for the page, already arranged by the catalog
    pub products: Vec<ProductRecord>,
}

impl RenderContext {
    pub fn new(site: SiteContext) -> Self {
        Self {
            site,
            products: Vec::new(),
        }
    }

    pub fn with_products(mut self, products: Vec<ProductRecord>) -> Self {
        self.products = products;
        self
    }
}
