use blockpage_engine::content::products::LIMIT_RANGE;
use blockpage_engine::{ButtonStyle, LayoutWidth, PageId, SiteContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding pages, blocks and products
    pub store_path: PathBuf,
    /// Page to open; the first page in the store when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<PageId>,
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub products: ProductSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default)]
    pub layout_width: LayoutWidth,
    #[serde(default)]
    pub button_style: ButtonStyle,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            layout_width: LayoutWidth::default(),
            button_style: ButtonStyle::default(),
        }
    }
}

fn default_site_name() -> String {
    SiteContext::default().site_name
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSettings {
    #[serde(default = "default_product_limit")]
    pub default_limit: u16,
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            default_limit: default_product_limit(),
        }
    }
}

fn default_product_limit() -> u16 {
    12
}

impl Config {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            page_id: None,
            site: SiteSettings::default(),
            products: ProductSettings::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.store_path = Self::expand_path(&config.store_path).unwrap_or(config.store_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/blockpage");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Read-only site settings handed to every renderer
    pub fn site_context(&self) -> SiteContext {
        SiteContext {
            site_name: self.site.name.clone(),
            layout_width: self.site.layout_width,
            button_style: self.site.button_style,
        }
    }

    /// Product limit for new `products` blocks, clamped into the allowed range
    pub fn product_limit(&self) -> u16 {
        i64::from(self.products.default_limit).clamp(LIMIT_RANGE.0, LIMIT_RANGE.1) as u16
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
