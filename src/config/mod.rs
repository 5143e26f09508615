//! Site configuration management for `metahead.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[general]` | Installation-wide settings (fallback URL, primary site) |
//! | `[[sites]]` | Per-site identity and base URL                 |
//! | `[content]` | Content index and bundle file locations        |
//!
//! # Example
//!
//! ```toml
//! [general]
//! fallback_url = "https://example.com"
//! primary_site = 1
//!
//! [[sites]]
//! id = 1
//! handle = "default"
//! base_url = "https://example.com"
//!
//! [content]
//! index = "content.json"
//! bundles = "bundles"
//! ```

mod content;
pub mod defaults;
mod error;
mod general;
pub mod site;

// Re-export public types used by other modules
pub use content::ContentConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use site::{SiteId, SiteOptions, SiteRegistry};

use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing metahead.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Installation-wide settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Configured sites
    #[serde(default)]
    pub sites: Vec<SiteOptions>,

    /// Content index and bundle locations
    #[serde(default)]
    pub content: ContentConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = normalize_path(path);
        Ok(config)
    }

    /// Resolve content paths relative to the project root
    pub fn resolve_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.content.index = normalize_path(&root.join(&self.content.index));
        self.content.bundles = normalize_path(&root.join(&self.content.bundles));
    }

    /// Build the read-only site registry handed to request contexts.
    pub fn site_registry(&self) -> SiteRegistry {
        SiteRegistry::new(
            self.sites.clone(),
            self.general.primary_site,
            self.general.fallback_url.clone(),
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.general.fallback_url.is_empty() {
            bail!(ConfigError::Validation(
                "[general.fallback_url] must not be empty".into()
            ));
        }

        if self.sites.is_empty() {
            bail!(ConfigError::Validation(
                "at least one [[sites]] table is required".into()
            ));
        }

        let mut seen = BTreeSet::new();
        for site in &self.sites {
            if !seen.insert(site.id) {
                bail!(ConfigError::Validation(format!(
                    "duplicate site id `{}`",
                    site.id
                )));
            }
            if site.has_urls
                && !site.base_url.is_empty()
                && !site.base_url.starts_with("http")
                && !site.base_url.starts_with('/')
            {
                bail!(ConfigError::Validation(format!(
                    "[[sites]] `{}` base_url must start with http(s):// or /",
                    site.handle
                )));
            }
        }

        if !seen.contains(&self.general.primary_site) {
            bail!(ConfigError::Validation(format!(
                "[general.primary_site] `{}` is not a configured site",
                self.general.primary_site
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Normalize a path to absolute, using canonicalize if the path exists
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        // For non-existent paths, manually make them absolute
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

// ============================================================================
// Tests
// ============================================================================
