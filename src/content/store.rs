//! Content store: the concrete element and bundle source.
//!
//! Holds the content index and all metadata bundles in memory. The CLI
//! populates it from files (`content.json` plus a bundle directory); tests
//! populate it programmatically through the insert methods. Either way the
//! store is read-only by the time requests run against it.
//!
//! # Bundle file naming
//!
//! | File | Meaning |
//! |------|---------|
//! | `global-1.json` | Global (site-wide) bundle for site 1 |
//! | `blog-1.json`   | Bundle for content source "blog" on site 1 |

use super::{BundleSource, Element, ElementSource, HOME_URI, join_site_url};
use crate::config::{SiteConfig, SiteRegistry, site::SiteId};
use crate::log;
use crate::meta::bundle::MetaBundle;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, fs};

/// Source name marking a bundle file as a site's global layer.
const GLOBAL_SOURCE: &str = "global";

// ============================================================================
// Index File Records
// ============================================================================

/// Content index file: a flat list of element records.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContentIndex {
    #[serde(default)]
    elements: Vec<ElementRecord>,
}

/// One element entry in the content index.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementRecord {
    site_id: SiteId,
    uri: String,
    title: String,
    source_id: String,

    /// Explicit canonical URL; computed from the site base URL when absent.
    #[serde(default)]
    url: Option<String>,
}

// ============================================================================
// Content Store
// ============================================================================

/// In-memory content index plus bundle storage.
#[derive(Debug, Default)]
pub struct ContentStore {
    elements: BTreeMap<(SiteId, String), Element>,
    global_bundles: BTreeMap<SiteId, MetaBundle>,
    source_bundles: BTreeMap<(String, SiteId), MetaBundle>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from the paths named in the config.
    ///
    /// The content index is required; the bundle directory is optional
    /// (a site can run on seeded containers alone). Bundle files that do
    /// not follow the `<source>-<site>.json` naming are skipped with a log
    /// line rather than failing the whole load.
    pub fn load(config: &SiteConfig, sites: &SiteRegistry) -> Result<Self> {
        let index_path = &config.content.index;
        let text = fs::read_to_string(index_path)
            .with_context(|| format!("Failed to read content index {}", index_path.display()))?;
        let index: ContentIndex = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse content index {}", index_path.display()))?;

        let mut store = Self::new();
        for record in index.elements {
            let url = match record.url {
                Some(url) => url,
                None => {
                    let path = if record.uri == HOME_URI { "" } else { &record.uri };
                    join_site_url(&sites.site_url(record.site_id), path)
                }
            };
            store.insert_element(Element {
                uri: record.uri,
                url,
                title: record.title,
                source_id: record.source_id,
                site_id: record.site_id,
            });
        }

        let bundles_dir = &config.content.bundles;
        if bundles_dir.is_dir() {
            for entry in fs::read_dir(bundles_dir)
                .with_context(|| format!("Failed to read bundle dir {}", bundles_dir.display()))?
            {
                let path = entry?.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let Some((source_id, site)) = stem.rsplit_once('-') else {
                    log!("load"; "skipping bundle file without site suffix: {stem}.json");
                    continue;
                };
                let Ok(site_id) = site.parse::<SiteId>() else {
                    log!("load"; "skipping bundle file with non-numeric site: {stem}.json");
                    continue;
                };
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read bundle {}", path.display()))?;
                let bundle = MetaBundle::from_json(&text)
                    .with_context(|| format!("Failed to parse bundle {}", path.display()))?;
                if source_id == GLOBAL_SOURCE {
                    store.set_global_bundle(site_id, bundle);
                } else {
                    store.insert_source_bundle(source_id, site_id, bundle);
                }
            }
        }

        log!(
            "load";
            "content store ready: {} elements, {} global bundles, {} source bundles",
            store.elements.len(),
            store.global_bundles.len(),
            store.source_bundles.len()
        );
        Ok(store)
    }

    pub fn insert_element(&mut self, element: Element) {
        self.elements
            .insert((element.site_id, element.uri.clone()), element);
    }

    pub fn set_global_bundle(&mut self, site_id: SiteId, bundle: MetaBundle) {
        self.global_bundles.insert(site_id, bundle);
    }

    pub fn insert_source_bundle(&mut self, source_id: &str, site_id: SiteId, bundle: MetaBundle) {
        self.source_bundles.insert((source_id.into(), site_id), bundle);
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn bundle_count(&self) -> usize {
        self.global_bundles.len() + self.source_bundles.len()
    }
}

impl ElementSource for ContentStore {
    fn element_by_uri(&self, uri: &str, site_id: SiteId) -> Option<Element> {
        // The empty request path addresses the home element
        let trimmed = uri.trim_matches('/');
        let lookup = if trimmed.is_empty() { HOME_URI } else { trimmed };
        self.elements.get(&(site_id, lookup.to_owned())).cloned()
    }
}

impl BundleSource for ContentStore {
    fn global_bundle(&self, site_id: SiteId) -> Option<MetaBundle> {
        self.global_bundles.get(&site_id).cloned()
    }

    fn bundle_for_source(&self, source_id: &str, site_id: SiteId) -> Option<MetaBundle> {
        self.source_bundles
            .get(&(source_id.to_owned(), site_id))
            .cloned()
    }
}

// ============================================================================
// Tests
// ============================================================================
