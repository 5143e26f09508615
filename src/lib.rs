//! Metahead - SEO metadata aggregation and rendering for content-managed sites.
//!
//! Site-wide default metadata and page-specific overrides are merged into a
//! per-request [`meta::ContainerRegistry`], breadcrumb structured data is
//! computed from the request path, and final head markup is emitted once
//! when the page finishes rendering.
//!
//! # Request flow
//!
//! ```ignore
//! let sites = config.site_registry();
//! let store = ContentStore::load(&config, &sites)?;
//! let ctx = RequestContext { sites: &sites, elements: &store, bundles: &store };
//!
//! let mut registry = ContainerRegistry::new();
//! let mut lifecycle = PageLifecycle::new();
//! registry.load(&ctx, "blog/post-1", None, &mut lifecycle)?;
//!
//! // ... page renders ...
//! lifecycle.page_finished(&registry, &mut out)?;
//! ```

pub mod config;
pub mod content;
pub mod logger;
pub mod markup;
pub mod meta;
