//! `[[sites]]` section configuration and the site registry.
//!
//! A site is one addressable front end of the installation: it has a numeric
//! id, a handle, and (usually) a base URL that canonical links are built
//! against. Multi-site installs declare several `[[sites]]` tables.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// Numeric site identifier.
pub type SiteId = u32;

/// One `[[sites]]` table in metahead.toml.
///
/// # Example
/// ```toml
/// [[sites]]
/// id = 1
/// handle = "default"
/// base_url = "https://example.com"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteOptions {
    /// Site identifier, referenced by content elements and bundles.
    pub id: SiteId,

    /// Short name distinguishing sites in logs and bundle files.
    #[serde(default = "defaults::site::handle")]
    #[educe(Default = defaults::site::handle())]
    pub handle: String,

    /// Base URL canonical links are built against.
    /// Empty means site-relative URLs.
    #[serde(default)]
    pub base_url: String,

    /// Whether this site generates its own URLs. Sites without URLs fall
    /// back to `[general].fallback_url` for link construction.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub has_urls: bool,

    /// BCP 47 language code (e.g., "en-US", "zh-Hans").
    #[serde(default = "defaults::site::language")]
    #[educe(Default = defaults::site::language())]
    pub language: String,
}

// ============================================================================
// Site Registry
// ============================================================================

/// Read-only lookup over the configured sites.
///
/// Built once from [`SiteConfig`](super::SiteConfig) and shared by every
/// request; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: Vec<SiteOptions>,
    primary: SiteId,
    fallback_url: String,
}

impl SiteRegistry {
    pub fn new(sites: Vec<SiteOptions>, primary: SiteId, fallback_url: String) -> Self {
        Self {
            sites,
            primary,
            fallback_url,
        }
    }

    /// Id of the primary site, used when a request does not name one.
    pub fn primary_site_id(&self) -> SiteId {
        self.primary
    }

    pub fn site_by_id(&self, id: SiteId) -> Option<&SiteOptions> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// Global fallback URL for sites that do not generate their own.
    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// Base URL for a site: its own `base_url` when it has URLs, else the
    /// global fallback.
    pub fn site_url(&self, id: SiteId) -> String {
        match self.site_by_id(id) {
            Some(site) if site.has_urls => site.base_url.clone(),
            _ => self.fallback_url.clone(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteOptions> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
