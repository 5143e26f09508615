//! Meta bundles: complete container sets for one source.
//!
//! A bundle groups five ordered sequences of container specs (one group per
//! kind) and represents either the site-wide defaults or the metadata of one
//! content source. Bundles are plain data; the registry decides whether a
//! bundle is *registered* (global layer) or *merged* (content layer
//! overriding matching keys).
//!
//! # File format
//!
//! ```json
//! {
//!   "tags": [
//!     {"handle": "general", "items": [
//!       {"type": "tag", "key": "description", "name": "description", "content": "A site"}
//!     ]}
//!   ],
//!   "titles": [
//!     {"items": [{"type": "title", "title": "Example"}]}
//!   ]
//! }
//! ```

use super::container::{ContainerKind, GENERAL_HANDLE, MetaContainer};
use super::error::MetaError;
use super::item::MetaItem;
use serde::{Deserialize, Serialize};

fn default_handle() -> String {
    GENERAL_HANDLE.into()
}

/// One container worth of bundle data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerSpec {
    #[serde(default = "default_handle")]
    pub handle: String,

    #[serde(default = "crate::meta::item::default_true")]
    pub include: bool,

    #[serde(default)]
    pub items: Vec<MetaItem>,
}

impl ContainerSpec {
    pub fn new(handle: &str, items: Vec<MetaItem>) -> Self {
        Self {
            handle: handle.into(),
            include: true,
            items,
        }
    }

    /// Materialize this spec as a container of the given kind, keying each
    /// item by its storage key.
    pub fn to_container(&self, kind: ContainerKind) -> Result<MetaContainer, MetaError> {
        let mut container = MetaContainer::new(kind, &self.handle);
        container.include = self.include;
        for item in &self.items {
            container.add(item.clone())?;
        }
        Ok(container)
    }
}

/// A complete set of containers: one group per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaBundle {
    pub tags: Vec<ContainerSpec>,
    pub links: Vec<ContainerSpec>,
    pub scripts: Vec<ContainerSpec>,
    pub jsonld: Vec<ContainerSpec>,
    pub titles: Vec<ContainerSpec>,
}

impl MetaBundle {
    /// Parse a bundle from its JSON file representation.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The five groups in canonical order, paired with their kinds.
    pub fn groups(&self) -> [(ContainerKind, &[ContainerSpec]); 5] {
        [
            (ContainerKind::Tag, self.tags.as_slice()),
            (ContainerKind::Link, self.links.as_slice()),
            (ContainerKind::Script, self.scripts.as_slice()),
            (ContainerKind::JsonLd, self.jsonld.as_slice()),
            (ContainerKind::Title, self.titles.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.groups().iter().all(|(_, specs)| specs.is_empty())
    }
}

// ============================================================================
// Tests
// ============================================================================
