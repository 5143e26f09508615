//! Breadcrumb construction.
//!
//! Walks the request's URL path segments against the content lookup and
//! builds a schema.org `BreadcrumbList` for the JSON-LD container:
//!
//! ```text
//! /blog/post-1
//!   position 1: home element (or "Homepage" fallback)
//!   position 2: element at "blog"
//!   position 3: element at "blog/post-1"
//! ```
//!
//! Path depths that resolve to no element contribute no crumb but do not
//! stop the walk, so positions stay gapless. When the request matched a
//! content element, segments are re-derived from that element's canonical
//! URL; rewritten paths then produce canonical crumbs.

use super::container::{ContainerKind, GENERAL_HANDLE, composite_key};
use super::error::MetaError;
use super::item::{MetaItem, MetaJsonLd};
use super::registry::{ContainerRegistry, RequestContext};
use crate::config::site::SiteId;
use crate::content::{HOME_URI, join_site_url, path_segments, url_path};
use serde::Serialize;

/// Storage key of the breadcrumb JSON-LD node. The node is content-keyed,
/// so this only names it; identical lists still collapse.
const BREADCRUMB_KEY: &str = "breadcrumbList";

/// Label used when no home element is configured.
const HOMEPAGE_LABEL: &str = "Homepage";

// ============================================================================
// Structured-Data Nodes
// ============================================================================

/// schema.org `BreadcrumbList` node.
#[derive(Debug, Clone, Serialize)]
pub struct BreadcrumbList {
    #[serde(rename = "@context")]
    context: &'static str,

    #[serde(rename = "@type")]
    node_type: &'static str,

    #[serde(rename = "itemListElement")]
    items: Vec<ListItem>,
}

impl BreadcrumbList {
    pub fn new() -> Self {
        Self {
            context: "https://schema.org",
            node_type: "BreadcrumbList",
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: ListItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for BreadcrumbList {
    fn default() -> Self {
        Self::new()
    }
}

/// One crumb: 1-based position plus the linked target.
#[derive(Debug, Clone, Serialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    node_type: &'static str,

    pub position: u32,

    pub item: CrumbTarget,
}

impl ListItem {
    pub fn new(position: u32, item_id: String, name: &str) -> Self {
        Self {
            node_type: "ListItem",
            position,
            item: CrumbTarget {
                id: item_id,
                name: name.into(),
            },
        }
    }
}

/// Link target of a crumb.
#[derive(Debug, Clone, Serialize)]
pub struct CrumbTarget {
    #[serde(rename = "@id")]
    pub id: String,

    pub name: String,
}

// ============================================================================
// Builder
// ============================================================================

impl ContainerRegistry {
    /// Build the breadcrumb list for the current request and insert it into
    /// the JSON-LD "general" container through the normal `add_item` path.
    pub fn add_breadcrumbs(
        &mut self,
        ctx: &RequestContext,
        site_id: SiteId,
        request_path: &str,
    ) -> Result<(), MetaError> {
        let mut position = 1u32;
        let site_url = ctx.sites.site_url(site_id);
        let mut crumbs = BreadcrumbList::new();

        let home = ctx.elements.element_by_uri(HOME_URI, site_id);
        match &home {
            Some(element) => {
                let uri = if element.uri == HOME_URI {
                    ""
                } else {
                    element.uri.as_str()
                };
                crumbs.push(ListItem::new(
                    position,
                    join_site_url(&site_url, uri),
                    &element.title,
                ));
            }
            None => crumbs.push(ListItem::new(position, site_url.clone(), HOMEPAGE_LABEL)),
        }

        // Canonical URL of the matched element wins over the raw request
        // path; rewritten paths then crumb correctly.
        let mut segments = path_segments(request_path);
        if let Some(matched) = &self.matched
            && matched.uri != HOME_URI
            && !matched.uri.is_empty()
        {
            segments = path_segments(url_path(&matched.url));
        }

        // Walk the segments, emitting one crumb per depth that resolves to
        // content. Unresolvable depths are skipped, not errors.
        let mut uri = String::new();
        for segment in &segments {
            uri.push_str(segment);
            if let Some(element) = ctx.elements.element_by_uri(&uri, site_id)
                && !element.uri.is_empty()
            {
                position += 1;
                uri = if element.uri == HOME_URI {
                    String::new()
                } else {
                    element.uri.clone()
                };
                crumbs.push(ListItem::new(
                    position,
                    join_site_url(&site_url, &uri),
                    &element.title,
                ));
            }
            uri.push('/');
        }

        let node = MetaJsonLd::from_serialize(BREADCRUMB_KEY, &crumbs)?;
        self.add_item(
            MetaItem::JsonLd(node),
            &composite_key(ContainerKind::JsonLd, GENERAL_HANDLE),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SiteOptions, SiteRegistry};
    use crate::content::store::ContentStore;
    use crate::content::Element;
    use serde_json::Value;

    fn site_registry(base_url: &str, fallback: &str) -> SiteRegistry {
        SiteRegistry::new(
            vec![SiteOptions {
                id: 1,
                base_url: base_url.into(),
                ..Default::default()
            }],
            1,
            fallback.into(),
        )
    }

    fn element(uri: &str, title: &str) -> Element {
        let path = if uri == HOME_URI { "" } else { uri };
        Element {
            uri: uri.into(),
            url: join_site_url("", path),
            title: title.into(),
            source_id: "blog".into(),
            site_id: 1,
        }
    }

    /// Extract (position, @id, name) triples from the stored breadcrumb node.
    fn crumbs_of(registry: &ContainerRegistry) -> Vec<(u64, String, String)> {
        let key = composite_key(ContainerKind::JsonLd, GENERAL_HANDLE);
        let container = registry.container(&key).unwrap();
        let item = container.items().next().unwrap();
        let graph = match item {
            MetaItem::JsonLd(node) => &node.graph,
            _ => panic!("expected jsonld item"),
        };
        let Value::Array(items) = &graph["itemListElement"] else {
            panic!("expected itemListElement array");
        };
        items
            .iter()
            .map(|entry| {
                (
                    entry["position"].as_u64().unwrap(),
                    entry["item"]["@id"].as_str().unwrap().to_owned(),
                    entry["item"]["name"].as_str().unwrap().to_owned(),
                )
            })
            .collect()
    }

    fn registry_with_jsonld() -> ContainerRegistry {
        let mut registry = ContainerRegistry::new();
        registry.create_container(ContainerKind::JsonLd, GENERAL_HANDLE);
        registry
    }

    #[test]
    fn test_full_resolution_three_levels() {
        let sites = site_registry("", "/");
        let mut store = ContentStore::new();
        store.insert_element(element(HOME_URI, "Home"));
        store.insert_element(element("blog", "Blog"));
        store.insert_element(element("blog/post-1", "Post 1"));
        let ctx = RequestContext {
            sites: &sites,
            elements: &store,
            bundles: &store,
        };

        let mut registry = registry_with_jsonld();
        registry.add_breadcrumbs(&ctx, 1, "blog/post-1").unwrap();

        assert_eq!(
            crumbs_of(&registry),
            vec![
                (1, "/".to_owned(), "Home".to_owned()),
                (2, "/blog".to_owned(), "Blog".to_owned()),
                (3, "/blog/post-1".to_owned(), "Post 1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_missing_home_uses_fallback() {
        let sites = SiteRegistry::new(Vec::new(), 1, "https://fallback.example/".into());
        let store = ContentStore::new();
        let ctx = RequestContext {
            sites: &sites,
            elements: &store,
            bundles: &store,
        };

        let mut registry = registry_with_jsonld();
        registry.add_breadcrumbs(&ctx, 1, "").unwrap();

        assert_eq!(
            crumbs_of(&registry),
            vec![(1, "https://fallback.example/".to_owned(), "Homepage".to_owned())]
        );
    }

    #[test]
    fn test_unresolvable_depth_is_skipped_without_gaps() {
        let sites = site_registry("", "/");
        let mut store = ContentStore::new();
        store.insert_element(element(HOME_URI, "Home"));
        store.insert_element(element("blog", "Blog"));
        // "blog/2024" is a date segment, not a content path
        store.insert_element(element("blog/2024/post-1", "Post 1"));
        let ctx = RequestContext {
            sites: &sites,
            elements: &store,
            bundles: &store,
        };

        let mut registry = registry_with_jsonld();
        registry.add_breadcrumbs(&ctx, 1, "blog/2024/post-1").unwrap();

        let crumbs = crumbs_of(&registry);
        assert_eq!(crumbs.len(), 3);
        assert_eq!(
            crumbs,
            vec![
                (1, "/".to_owned(), "Home".to_owned()),
                (2, "/blog".to_owned(), "Blog".to_owned()),
                (3, "/blog/2024/post-1".to_owned(), "Post 1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_matched_element_canonical_path_wins() {
        let sites = site_registry("", "/");
        let mut store = ContentStore::new();
        store.insert_element(element(HOME_URI, "Home"));
        store.insert_element(element("blog", "Blog"));
        store.insert_element(element("blog/post-1", "Post 1"));
        let ctx = RequestContext {
            sites: &sites,
            elements: &store,
            bundles: &store,
        };

        let mut registry = registry_with_jsonld();
        // The request came in under a rewritten path, but the matched
        // element's canonical URL points at /blog/post-1
        registry.matched = Some(element("blog/post-1", "Post 1"));
        registry.add_breadcrumbs(&ctx, 1, "b/p").unwrap();

        let crumbs = crumbs_of(&registry);
        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[2].1, "/blog/post-1");
    }

    #[test]
    fn test_matched_home_element_keeps_request_segments() {
        let sites = site_registry("", "/");
        let mut store = ContentStore::new();
        store.insert_element(element(HOME_URI, "Home"));
        let ctx = RequestContext {
            sites: &sites,
            elements: &store,
            bundles: &store,
        };

        let mut registry = registry_with_jsonld();
        registry.matched = Some(element(HOME_URI, "Home"));
        registry.add_breadcrumbs(&ctx, 1, "").unwrap();

        assert_eq!(crumbs_of(&registry).len(), 1);
    }

    #[test]
    fn test_site_without_urls_falls_back_for_base() {
        let sites = SiteRegistry::new(
            vec![SiteOptions {
                id: 1,
                has_urls: false,
                base_url: "https://ignored.example".into(),
                ..Default::default()
            }],
            1,
            "https://fallback.example".into(),
        );
        let mut store = ContentStore::new();
        store.insert_element(element(HOME_URI, "Home"));
        let ctx = RequestContext {
            sites: &sites,
            elements: &store,
            bundles: &store,
        };

        let mut registry = registry_with_jsonld();
        registry.add_breadcrumbs(&ctx, 1, "").unwrap();

        assert_eq!(crumbs_of(&registry)[0].1, "https://fallback.example/");
    }

    #[test]
    fn test_repeated_build_dedups_identical_list() {
        let sites = site_registry("", "/");
        let mut store = ContentStore::new();
        store.insert_element(element(HOME_URI, "Home"));
        let ctx = RequestContext {
            sites: &sites,
            elements: &store,
            bundles: &store,
        };

        let mut registry = registry_with_jsonld();
        registry.add_breadcrumbs(&ctx, 1, "").unwrap();
        registry.add_breadcrumbs(&ctx, 1, "").unwrap();

        let key = composite_key(ContainerKind::JsonLd, GENERAL_HANDLE);
        // Content-keyed: the identical list collapsed into one slot
        assert_eq!(registry.container(&key).unwrap().len(), 1);
    }

    #[test]
    fn test_breadcrumb_list_serializes_schema_shape() {
        let mut list = BreadcrumbList::new();
        list.push(ListItem::new(1, "/".into(), "Home"));
        let value = serde_json::to_value(&list).unwrap();

        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(value["@type"], "BreadcrumbList");
        assert_eq!(value["itemListElement"][0]["@type"], "ListItem");
        assert_eq!(value["itemListElement"][0]["position"], 1);
        assert_eq!(value["itemListElement"][0]["item"]["@id"], "/");
        assert_eq!(value["itemListElement"][0]["item"]["name"], "Home");
        assert!(!list.is_empty());
        assert_eq!(list.len(), 1);
    }
}
