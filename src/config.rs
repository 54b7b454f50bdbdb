//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! serialized to a TOML table and the user file is merged on top of it, so a
//! config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_url = "http://localhost:3000"   # Absolute origin used in canonical URLs
//! site_name = "Resort of Mexico"       # Fallback when the CMS has no settings
//! site_description = "Discover amazing destinations across Mexico"
//! locale = "en_US"
//!
//! [cms]
//! project_id = ""                      # CMS project id (required for HTTP fetches)
//! dataset = "production"
//! api_version = "2024-01-01"
//! use_cdn = true                       # Published reads go through the API CDN
//! token_env = "SANITY_API_TOKEN"       # Env var holding the read token (drafts)
//! timeout_secs = 10
//!
//! [preview]
//! secret_env = "SANITY_PREVIEW_SECRET" # Env var holding the draft-mode secret
//! cookie_name = "draft_mode"
//!
//! [render]
//! max_block_depth = 4                  # Nesting limit for section wrappers
//! placeholder_image = "/static/placeholder.svg"
//!
//! [theme]
//! primary = "#0066CC"
//! secondary = "#00A896"
//! font_family = "Inter"
//!
//! [sitemap]
//! enabled = true
//! filename = "sitemap.xml"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute origin, no trailing slash required.
    pub site_url: String,
    /// Organization name used when the CMS has no global settings.
    pub site_name: String,
    /// Default description used when the CMS has no global settings.
    pub site_description: String,
    /// Open Graph locale.
    pub locale: String,
    pub cms: CmsConfig,
    pub preview: PreviewConfig,
    pub render: RenderConfig,
    pub theme: ThemeDefaults,
    pub sitemap: SitemapConfig,
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            site_name: "Resort of Mexico".to_string(),
            site_description: "Discover amazing destinations across Mexico".to_string(),
            locale: "en_US".to_string(),
            cms: CmsConfig::default(),
            preview: PreviewConfig::default(),
            render: RenderConfig::default(),
            theme: ThemeDefaults::default(),
            sitemap: SitemapConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "site_url must start with http:// or https://".into(),
            ));
        }
        if self.render.max_block_depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_block_depth must be at least 1".into(),
            ));
        }
        if self.cms.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "cms.timeout_secs must be non-zero".into(),
            ));
        }
        if self.cms.dataset.is_empty() {
            return Err(ConfigError::Validation("cms.dataset must not be empty".into()));
        }
        for (key, value) in [
            ("theme.primary", &self.theme.primary),
            ("theme.secondary", &self.theme.secondary),
        ] {
            if crate::theme::parse_hex(value).is_none() {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a #rgb or #rrggbb color, got {value:?}"
                )));
            }
        }
        if self.sitemap.filename.is_empty() || self.sitemap.filename.contains('/') {
            return Err(ConfigError::Validation(
                "sitemap.filename must be a bare file name".into(),
            ));
        }
        Ok(())
    }

    /// `site_url` without a trailing slash, ready for `format!("{base}{path}")`.
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}

/// Headless CMS connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    /// Dated API version, sent as `v{api_version}` in the query path.
    pub api_version: String,
    /// Published reads go through `apicdn`; draft reads never do.
    pub use_cdn: bool,
    /// Name of the environment variable holding the read token.
    pub token_env: String,
    pub timeout_secs: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            token_env: "SANITY_API_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}

impl CmsConfig {
    /// Read token from the environment, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|t| !t.is_empty())
    }
}

/// Draft-mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Name of the environment variable holding the preview secret.
    /// Draft mode is unavailable when the variable is unset.
    pub secret_env: String,
    pub cookie_name: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            secret_env: "SANITY_PREVIEW_SECRET".to_string(),
            cookie_name: "draft_mode".to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn secret(&self) -> Option<String> {
        std::env::var(&self.secret_env).ok().filter(|s| !s.is_empty())
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Maximum nesting of section wrappers. Depth 1 means top-level blocks
    /// render but no wrapper may contain another wrapper's content.
    pub max_block_depth: usize,
    /// Image shown when a block's image is missing.
    pub placeholder_image: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_block_depth: 4,
            placeholder_image: "/static/placeholder.svg".to_string(),
        }
    }
}

/// Theme values used when the CMS settings don't override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeDefaults {
    pub primary: String,
    pub secondary: String,
    pub font_family: String,
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self {
            primary: "#0066CC".to_string(),
            secondary: "#00A896".to_string(),
            font_family: "Inter".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    pub enabled: bool,
    pub filename: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: "sitemap.xml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `site.toml` from the given path, merged over stock defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# resort-site configuration
# =========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Absolute origin used for canonical URLs, Open Graph and the sitemap.
site_url = "http://localhost:3000"

# Used when the CMS has no global settings document (or it fails to load).
site_name = "Resort of Mexico"
site_description = "Discover amazing destinations across Mexico"

# Open Graph locale.
locale = "en_US"

# ---------------------------------------------------------------------------
# Headless CMS
# ---------------------------------------------------------------------------
[cms]
# Project id. Leave empty when building from a --snapshot file.
project_id = ""
dataset = "production"
api_version = "2024-01-01"
# Published reads go through the API CDN. Draft reads never do.
use_cdn = true
# Environment variable holding the read token (needed for drafts).
token_env = "SANITY_API_TOKEN"
timeout_secs = 10

# ---------------------------------------------------------------------------
# Draft mode
# ---------------------------------------------------------------------------
[preview]
# Environment variable holding the secret accepted by /api/draft.
secret_env = "SANITY_PREVIEW_SECRET"
cookie_name = "draft_mode"

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[render]
# How deep section wrappers may nest before inner blocks are skipped.
max_block_depth = 4
# Image used when a block's image is missing.
placeholder_image = "/static/placeholder.svg"

# ---------------------------------------------------------------------------
# Theme defaults (overridden by CMS global settings)
# ---------------------------------------------------------------------------
[theme]
primary = "#0066CC"
secondary = "#00A896"
font_family = "Inter"

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
enabled = true
filename = "sitemap.xml"

# ---------------------------------------------------------------------------
# Server (serve command)
# ---------------------------------------------------------------------------
[server]
host = "127.0.0.1"
port = 3000
"##
}
