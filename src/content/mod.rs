//! Content elements and lookup contracts.
//!
//! A content element is an addressable piece of site content: it has a URI
//! within its site, a canonical absolute URL, a title, and a stable source
//! identifier linking it to its metadata bundle. The registry only ever
//! talks to content through the [`ElementSource`] and [`BundleSource`]
//! traits; [`store::ContentStore`] is the concrete implementation.

pub mod store;

use crate::config::site::SiteId;
use crate::meta::bundle::MetaBundle;
use serde::{Deserialize, Serialize};

/// URI under which a site's home element is stored.
///
/// Normalized to the empty path when building canonical URLs.
pub const HOME_URI: &str = "__home__";

/// An addressable piece of site content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// URI within the site (no leading slash), `__home__` for the homepage.
    pub uri: String,

    /// Canonical absolute URL.
    pub url: String,

    pub title: String,

    /// Stable identifier of the content source this element belongs to,
    /// used to look up its metadata bundle.
    pub source_id: String,

    pub site_id: SiteId,
}

/// Resolves request paths and partial URIs to content elements.
pub trait ElementSource {
    /// Look up the element at `uri` for a site. `None` is an expected state,
    /// not an error.
    fn element_by_uri(&self, uri: &str, site_id: SiteId) -> Option<Element>;
}

/// Supplies metadata bundles for the global layer and per content source.
pub trait BundleSource {
    fn global_bundle(&self, site_id: SiteId) -> Option<MetaBundle>;

    fn bundle_for_source(&self, source_id: &str, site_id: SiteId) -> Option<MetaBundle>;
}

// ============================================================================
// URL Helpers
// ============================================================================

/// Join a site base URL and a URI path into one URL.
///
/// The home URI joins as the bare base with a trailing slash.
///
/// # Examples
///
/// | base | uri | result |
/// |------|-----|--------|
/// | `https://example.com` | `blog` | `https://example.com/blog` |
/// | `https://example.com/` | `` | `https://example.com/` |
/// | `` | `blog/post-1` | `/blog/post-1` |
pub fn join_site_url(base: &str, uri: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        uri.trim_start_matches('/')
    )
}

/// Extract the path portion of an absolute URL.
///
/// Returns `""` when the URL has no path beyond the authority.
pub fn url_path(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    match rest.find('/') {
        Some(idx) => &rest[idx..],
        None => "",
    }
}

/// Split a request path or URL path into its segments.
pub fn path_segments(path: &str) -> Vec<String> {
    path.trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
