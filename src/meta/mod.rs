//! The metadata engine.
//!
//! # Layers
//!
//! ```text
//! MetaItem            one head entry (tag, link, script, json-ld, title)
//!   └─ MetaContainer  ordered items of one kind under one handle
//!        └─ ContainerRegistry   all containers for one request
//! ```
//!
//! Bundles ([`bundle::MetaBundle`]) feed the registry in two layers: the
//! global bundle registers whole containers (site-wide defaults), and the
//! matched content's bundle merges item-by-item on top, overwriting
//! matching keys. Breadcrumbs are computed last and inserted through the
//! same item path. Rendering happens once per page through the
//! [`lifecycle::PageLifecycle`] hook.

pub mod breadcrumbs;
pub mod bundle;
pub mod container;
pub mod error;
pub mod item;
pub mod lifecycle;
pub mod registry;

pub use breadcrumbs::{BreadcrumbList, CrumbTarget, ListItem};
pub use bundle::{ContainerSpec, MetaBundle};
pub use container::{ContainerKind, GENERAL_HANDLE, MetaContainer, composite_key};
pub use error::MetaError;
pub use item::{MetaItem, MetaJsonLd, MetaLink, MetaScript, MetaTag, MetaTitle};
pub use lifecycle::{FinalizeFn, PageLifecycle};
pub use registry::{ContainerRegistry, RequestContext};
