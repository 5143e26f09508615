//! Metadata item types.
//!
//! One item is one logical head entry: a `<meta>` tag, a `<link>`, a
//! `<script>`, a JSON-LD node, or the `<title>`. Items are immutable once
//! constructed and carry their own identity:
//!
//! - `key` is the explicit identifying key within a container;
//! - `unique_keys = true` switches the storage key to a digest of the item's
//!   serialized content, so structurally identical entries collapse into one
//!   slot. Scripts and JSON-LD nodes default to content keying (repeated
//!   injections de-duplicate); tags, links, and titles use explicit keys.

use super::container::ContainerKind;
use super::error::MetaError;
use crate::markup::{
    XmlWriter, write_empty_elem, write_script_body, write_script_src, write_text_element,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) fn default_true() -> bool {
    true
}

fn default_title_key() -> String {
    "title".into()
}

// ============================================================================
// Item Payloads
// ============================================================================

/// A `<meta>` tag: `name`/`property`/`http-equiv` plus `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaTag {
    #[serde(default)]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// RDFa property attribute (e.g. "og:title" for Open Graph).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_equiv: Option<String>,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub unique_keys: bool,
}

impl MetaTag {
    /// Named tag: `<meta name="..." content="..."/>`.
    pub fn new(key: &str, name: &str, content: &str) -> Self {
        Self {
            key: key.into(),
            name: Some(name.into()),
            property: None,
            http_equiv: None,
            content: content.into(),
            unique_keys: false,
        }
    }

    /// Property tag: `<meta property="..." content="..."/>`.
    pub fn with_property(key: &str, property: &str, content: &str) -> Self {
        Self {
            key: key.into(),
            name: None,
            property: Some(property.into()),
            http_equiv: None,
            content: content.into(),
            unique_keys: false,
        }
    }

    fn render(&self, writer: &mut XmlWriter) -> Result<()> {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(name) = &self.name {
            attrs.push(("name", name));
        }
        if let Some(property) = &self.property {
            attrs.push(("property", property));
        }
        if let Some(http_equiv) = &self.http_equiv {
            attrs.push(("http-equiv", http_equiv));
        }
        attrs.push(("content", &self.content));
        write_empty_elem(writer, "meta", &attrs)
    }
}

/// A `<link>` element: `rel` plus `href` and optional attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaLink {
    #[serde(default)]
    pub key: String,

    pub rel: String,

    pub href: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,

    #[serde(default)]
    pub unique_keys: bool,
}

impl MetaLink {
    pub fn new(key: &str, rel: &str, href: &str) -> Self {
        Self {
            key: key.into(),
            rel: rel.into(),
            href: href.into(),
            hreflang: None,
            media: None,
            mime_type: None,
            sizes: None,
            unique_keys: false,
        }
    }

    fn render(&self, writer: &mut XmlWriter) -> Result<()> {
        let mut attrs: Vec<(&str, &str)> = vec![("rel", &self.rel), ("href", &self.href)];
        if let Some(hreflang) = &self.hreflang {
            attrs.push(("hreflang", hreflang));
        }
        if let Some(media) = &self.media {
            attrs.push(("media", media));
        }
        if let Some(mime_type) = &self.mime_type {
            attrs.push(("type", mime_type));
        }
        if let Some(sizes) = &self.sizes {
            attrs.push(("sizes", sizes));
        }
        write_empty_elem(writer, "link", &attrs)
    }
}

/// A `<script>` element: external `src` or inline body.
///
/// Content-keyed by default so the same script injected twice renders once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaScript {
    #[serde(default)]
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Inline script body, emitted verbatim (trusted input).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<String>,

    #[serde(default)]
    pub defer: bool,

    #[serde(default)]
    pub r#async: bool,

    #[serde(default = "crate::meta::item::default_true")]
    pub unique_keys: bool,
}

impl MetaScript {
    /// External script: `<script src="..."> </script>`.
    pub fn from_src(key: &str, src: &str) -> Self {
        Self {
            key: key.into(),
            src: Some(src.into()),
            inline: None,
            defer: false,
            r#async: false,
            unique_keys: true,
        }
    }

    /// Inline script: `<script>body</script>`.
    pub fn from_inline(key: &str, body: &str) -> Self {
        Self {
            key: key.into(),
            src: None,
            inline: Some(body.into()),
            defer: false,
            r#async: false,
            unique_keys: true,
        }
    }

    fn render(&self, writer: &mut XmlWriter) -> Result<()> {
        if let Some(src) = &self.src {
            write_script_src(writer, src, self.defer, self.r#async)
        } else if let Some(inline) = &self.inline {
            write_script_body(writer, inline, &[])
        } else {
            Ok(())
        }
    }
}

/// A JSON-LD structured-data node, rendered as an `application/ld+json`
/// script. The graph is a schema.org-shaped value tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaJsonLd {
    #[serde(default)]
    pub key: String,

    pub graph: Value,

    #[serde(default = "crate::meta::item::default_true")]
    pub unique_keys: bool,
}

impl MetaJsonLd {
    pub fn new(key: &str, graph: Value) -> Self {
        Self {
            key: key.into(),
            graph,
            unique_keys: true,
        }
    }

    /// Build a node from any serializable schema.org type.
    pub fn from_serialize<T: Serialize>(key: &str, node: &T) -> Result<Self, MetaError> {
        Ok(Self::new(key, serde_json::to_value(node)?))
    }

    fn render(&self, writer: &mut XmlWriter) -> Result<()> {
        let json = serde_json::to_string(&self.graph)?;
        write_script_body(writer, &json, &[("type", "application/ld+json")])
    }
}

/// The page `<title>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaTitle {
    #[serde(default = "default_title_key")]
    pub key: String,

    pub title: String,

    #[serde(default)]
    pub unique_keys: bool,
}

impl MetaTitle {
    pub fn new(title: &str) -> Self {
        Self {
            key: default_title_key(),
            title: title.into(),
            unique_keys: false,
        }
    }

    fn render(&self, writer: &mut XmlWriter) -> Result<()> {
        write_text_element(writer, "title", &self.title)
    }
}

// ============================================================================
// MetaItem
// ============================================================================

/// One metadata entry, tagged by kind.
///
/// The serde tag makes bundle files self-describing:
/// `{"type": "tag", "key": "description", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetaItem {
    Tag(MetaTag),
    Link(MetaLink),
    Script(MetaScript),
    JsonLd(MetaJsonLd),
    Title(MetaTitle),
}

impl MetaItem {
    /// Container kind this item belongs to.
    pub fn kind(&self) -> ContainerKind {
        match self {
            MetaItem::Tag(_) => ContainerKind::Tag,
            MetaItem::Link(_) => ContainerKind::Link,
            MetaItem::Script(_) => ContainerKind::Script,
            MetaItem::JsonLd(_) => ContainerKind::JsonLd,
            MetaItem::Title(_) => ContainerKind::Title,
        }
    }

    /// Explicit identifying key.
    pub fn key(&self) -> &str {
        match self {
            MetaItem::Tag(tag) => &tag.key,
            MetaItem::Link(link) => &link.key,
            MetaItem::Script(script) => &script.key,
            MetaItem::JsonLd(jsonld) => &jsonld.key,
            MetaItem::Title(title) => &title.key,
        }
    }

    /// Whether the storage key is derived from content instead of `key`.
    pub fn unique_keys(&self) -> bool {
        match self {
            MetaItem::Tag(tag) => tag.unique_keys,
            MetaItem::Link(link) => link.unique_keys,
            MetaItem::Script(script) => script.unique_keys,
            MetaItem::JsonLd(jsonld) => jsonld.unique_keys,
            MetaItem::Title(title) => title.unique_keys,
        }
    }

    /// Stable digest of the item's serialized field values.
    ///
    /// Canonical form is the serde_json encoding (struct declaration order),
    /// digested with BLAKE3. Equal content maps to equal digests; used for
    /// de-duplication within one page's item set, not for security.
    pub fn content_hash(&self) -> Result<String, MetaError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(blake3::hash(&bytes).as_bytes()))
    }

    /// Key under which this item is stored in its container.
    pub fn storage_key(&self) -> Result<String, MetaError> {
        if self.unique_keys() {
            self.content_hash()
        } else {
            Ok(self.key().to_owned())
        }
    }

    /// Write this item's markup.
    pub fn render(&self, writer: &mut XmlWriter) -> Result<()> {
        match self {
            MetaItem::Tag(tag) => tag.render(writer),
            MetaItem::Link(link) => link.render(writer),
            MetaItem::Script(script) => script.render(writer),
            MetaItem::JsonLd(jsonld) => jsonld.render(writer),
            MetaItem::Title(title) => title.render(writer),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
