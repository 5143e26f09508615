//! `[general]` section configuration.

use super::defaults;
use super::site::SiteId;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[general]` section in metahead.toml - installation-wide settings.
///
/// # Example
/// ```toml
/// [general]
/// fallback_url = "https://example.com"
/// primary_site = 1
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// URL used for link construction when a site has no URLs of its own,
    /// and as the homepage crumb target when no home element exists.
    #[serde(default = "defaults::general::fallback_url")]
    #[educe(Default = defaults::general::fallback_url())]
    pub fallback_url: String,

    /// Site used when a request does not name one.
    #[serde(default = "defaults::general::primary_site")]
    #[educe(Default = defaults::general::primary_site())]
    pub primary_site: SiteId,
}
