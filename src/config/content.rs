//! `[content]` section configuration.
//!
//! Points at the content index and bundle directory the file-backed store
//! loads from. Paths are resolved relative to the project root.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in metahead.toml.
///
/// # Example
/// ```toml
/// [content]
/// index = "content.json"
/// bundles = "bundles"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// JSON file mapping (site, uri) pairs to content elements.
    #[serde(default = "defaults::content::index")]
    #[educe(Default = defaults::content::index())]
    pub index: PathBuf,

    /// Directory of bundle files: `global-<site>.json` plus one
    /// `<source>-<site>.json` per content source.
    #[serde(default = "defaults::content::bundles")]
    #[educe(Default = defaults::content::bundles())]
    pub bundles: PathBuf,
}
