//! Container registry: per-request aggregation of head metadata.
//!
//! One registry exists per rendered page. It owns every active container,
//! keyed by composite `kind + handle` strings in registration order, and
//! orchestrates the layered load:
//!
//! ```text
//! load(path, site)
//!   ├─ seed standard "general" containers
//!   ├─ register global containers (site-wide defaults)
//!   ├─ resolve path → matched element → merge its source bundle
//!   │    (content overrides global per composite key + item key)
//!   ├─ build breadcrumbs into the JSON-LD container
//!   └─ register render-on-finalize callback
//! ```
//!
//! `load` is idempotent and re-entrancy safe: a `LoadState` machine checked
//! at entry replaces the original boolean guard, so side effects of loading
//! (element resolution, hook registration) can never re-trigger the load.

use super::bundle::MetaBundle;
use super::container::{ContainerKind, GENERAL_HANDLE, MetaContainer, composite_key};
use super::error::MetaError;
use super::item::{MetaItem, MetaTitle};
use super::lifecycle::PageLifecycle;
use crate::config::SiteRegistry;
use crate::config::site::SiteId;
use crate::content::{BundleSource, Element, ElementSource};
use crate::log;
use anyhow::Result;
use std::io::Write;

// ============================================================================
// Request Context
// ============================================================================

/// Read-only collaborators for one request.
///
/// Constructed explicitly per request and passed by reference; there is no
/// ambient global state.
pub struct RequestContext<'a> {
    pub sites: &'a SiteRegistry,
    pub elements: &'a dyn ElementSource,
    pub bundles: &'a dyn BundleSource,
}

// ============================================================================
// Load State
// ============================================================================

/// Load progress of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Unloaded,
    /// A load is in progress; re-entrant calls are no-ops.
    Loading,
    Loaded,
}

// ============================================================================
// Container Registry
// ============================================================================

/// All active meta containers for the current request.
pub struct ContainerRegistry {
    /// Containers in registration order, each paired with its composite key.
    containers: Vec<(String, MetaContainer)>,
    state: LoadState,
    pub(super) matched: Option<Element>,
}

impl Default for ContainerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            state: LoadState::Unloaded,
            matched: None,
        }
    }

    /// Load the registry for a request path. Idempotent: once loaded (or
    /// while loading), further calls return immediately.
    pub fn load(
        &mut self,
        ctx: &RequestContext,
        path: &str,
        site_id: Option<SiteId>,
        lifecycle: &mut PageLifecycle,
    ) -> Result<(), MetaError> {
        if self.state != LoadState::Unloaded {
            return Ok(());
        }
        self.state = LoadState::Loading;
        let result = self.load_inner(ctx, path, site_id, lifecycle);
        // A failed load leaves the registry unloaded; nothing partial renders
        self.state = match result {
            Ok(()) => LoadState::Loaded,
            Err(_) => LoadState::Unloaded,
        };
        result
    }

    fn load_inner(
        &mut self,
        ctx: &RequestContext,
        path: &str,
        site_id: Option<SiteId>,
        lifecycle: &mut PageLifecycle,
    ) -> Result<(), MetaError> {
        let site_id = site_id.unwrap_or_else(|| ctx.sites.primary_site_id());

        self.seed_standard_containers();

        if let Some(bundle) = ctx.bundles.global_bundle(site_id) {
            self.register_global(&bundle)?;
        }

        if let Some(element) = ctx.elements.element_by_uri(path, site_id) {
            let bundle = ctx.bundles.bundle_for_source(&element.source_id, element.site_id);
            self.matched = Some(element);
            if let Some(bundle) = bundle {
                self.merge_bundle(&bundle)?;
            }
        }

        self.add_breadcrumbs(ctx, site_id, path)?;

        // The page output sink is only ever reached through this hook
        lifecycle.on_page_finalize(Box::new(|registry, out| registry.render_all(out)));

        log!(
            "load";
            "site {site_id}: {} containers ready for `/{path}`",
            self.containers.len()
        );
        Ok(())
    }

    /// Create an empty container for (kind, handle) unless one exists;
    /// returns the container either way.
    pub fn create_container(&mut self, kind: ContainerKind, handle: &str) -> &mut MetaContainer {
        let key = composite_key(kind, handle);
        let idx = match self.position(&key) {
            Some(idx) => idx,
            None => {
                self.containers.push((key, MetaContainer::new(kind, handle)));
                self.containers.len() - 1
            }
        };
        &mut self.containers[idx].1
    }

    /// String-typed variant of [`create_container`](Self::create_container)
    /// for callers holding a kind name from a file or flag.
    ///
    /// Returns `None` for an unrecognized kind name — a configuration
    /// defect the caller must check for rather than assume success.
    pub fn create_container_named(
        &mut self,
        kind_name: &str,
        handle: &str,
    ) -> Option<&mut MetaContainer> {
        let kind: ContainerKind = kind_name.parse().ok()?;
        Some(self.create_container(kind, handle))
    }

    /// Add an item to the container registered under `key`.
    ///
    /// The container must already exist; a missing key is a loud
    /// misconfiguration, not a silent drop. Storage key is the item's
    /// content hash when it is content-keyed, its explicit key otherwise.
    pub fn add_item(&mut self, item: MetaItem, key: &str) -> Result<(), MetaError> {
        let storage_key = item.storage_key()?;
        let container = self
            .container_mut(key)
            .ok_or_else(|| MetaError::ContainerNotFound { key: key.into() })?;
        container.insert(storage_key, item);
        Ok(())
    }

    /// Register every container of a bundle directly, replacing containers
    /// with matching composite keys. This is the global (defaults) layer.
    pub fn register_global(&mut self, bundle: &MetaBundle) -> Result<(), MetaError> {
        for (kind, specs) in bundle.groups() {
            for spec in specs {
                let container = spec.to_container(kind)?;
                let key = container.key();
                match self.position(&key) {
                    Some(idx) => self.containers[idx].1 = container,
                    None => self.containers.push((key, container)),
                }
            }
        }
        Ok(())
    }

    /// Merge a bundle item-by-item into the existing containers,
    /// overwriting items with matching keys. This is the content layer;
    /// it establishes content-over-global override semantics.
    pub fn merge_bundle(&mut self, bundle: &MetaBundle) -> Result<(), MetaError> {
        for (kind, specs) in bundle.groups() {
            for spec in specs {
                let key = composite_key(kind, &spec.handle);
                for item in &spec.items {
                    self.add_item(item.clone(), &key)?;
                }
            }
        }
        Ok(())
    }

    /// Overwrite the page title in the title/general container.
    pub fn set_title(&mut self, title: &str) -> Result<(), MetaError> {
        let key = composite_key(ContainerKind::Title, GENERAL_HANDLE);
        self.add_item(MetaItem::Title(MetaTitle::new(title)), &key)
    }

    /// Render every included container to the page output sink, in
    /// registration order. Containers with `include = false` are skipped
    /// but stay queryable.
    pub fn render_all(&self, out: &mut dyn Write) -> Result<()> {
        for (_, container) in &self.containers {
            if container.include {
                out.write_all(container.render()?.as_bytes())?;
            }
        }
        Ok(())
    }

    /// Concatenated markup of all containers of one kind, in registration
    /// order. Ignores `include` — this is the manual/selective output path.
    pub fn render_by_kind(&self, kind: ContainerKind) -> Result<String> {
        let mut html = String::new();
        for (_, container) in &self.containers {
            if container.kind == kind {
                html.push_str(&container.render()?);
            }
        }
        Ok(html)
    }

    /// Markup fragments of all containers of one kind, one per item.
    pub fn render_array_by_kind(&self, kind: ContainerKind) -> Result<Vec<String>> {
        let mut fragments = Vec::new();
        for (_, container) in &self.containers {
            if container.kind == kind {
                fragments.extend(container.render_array()?);
            }
        }
        Ok(fragments)
    }

    /// The content element matched for this request, if any.
    pub fn matched_element(&self) -> Option<&Element> {
        self.matched.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Look up a container by composite key.
    pub fn container(&self, key: &str) -> Option<&MetaContainer> {
        self.containers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub(super) fn container_mut(&mut self, key: &str) -> Option<&mut MetaContainer> {
        self.containers
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.containers.iter().position(|(k, _)| k == key)
    }

    /// Every request carries the five standard "general" containers so the
    /// breadcrumb builder and title writer always have a target, even when
    /// no global bundle is configured.
    fn seed_standard_containers(&mut self) {
        for kind in ContainerKind::ALL {
            self.create_container(kind, GENERAL_HANDLE);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
