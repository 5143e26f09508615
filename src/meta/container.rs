//! Meta containers: ordered, keyed collections of items.
//!
//! A container holds every item of one kind under one handle, e.g. all
//! Open Graph tags (`Tag` + "opengraph") or the general JSON-LD nodes
//! (`JsonLd` + "general"). Insertion order is render order; adding an item
//! under an existing storage key overwrites it **in place**, keeping the
//! original position. That in-place contract is canonical — callers may rely
//! on a later overwrite not reordering the rendered output.

use super::error::MetaError;
use super::item::MetaItem;
use anyhow::Result;
use crate::markup::{create_writer, into_markup};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default sub-category handle shared by all kinds.
pub const GENERAL_HANDLE: &str = "general";

// ============================================================================
// Container Kind
// ============================================================================

/// The five recognized container kinds.
///
/// Closed set: bundle files and CLI flags spell these as lowercase names
/// ("tag", "link", "script", "jsonld", "title") and go through [`FromStr`],
/// which rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Tag,
    Link,
    Script,
    JsonLd,
    Title,
}

impl ContainerKind {
    /// All kinds, in canonical registration order.
    pub const ALL: [ContainerKind; 5] = [
        ContainerKind::Tag,
        ContainerKind::Link,
        ContainerKind::Script,
        ContainerKind::JsonLd,
        ContainerKind::Title,
    ];

    /// Composite-key prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            ContainerKind::Tag => "metahead.tag.",
            ContainerKind::Link => "metahead.link.",
            ContainerKind::Script => "metahead.script.",
            ContainerKind::JsonLd => "metahead.jsonld.",
            ContainerKind::Title => "metahead.title.",
        }
    }

    /// Lowercase name, as spelled in bundle files and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Tag => "tag",
            ContainerKind::Link => "link",
            ContainerKind::Script => "script",
            ContainerKind::JsonLd => "jsonld",
            ContainerKind::Title => "title",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerKind {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag" => Ok(ContainerKind::Tag),
            "link" => Ok(ContainerKind::Link),
            "script" => Ok(ContainerKind::Script),
            "jsonld" => Ok(ContainerKind::JsonLd),
            "title" => Ok(ContainerKind::Title),
            other => Err(MetaError::UnknownContainerKind(other.into())),
        }
    }
}

/// Registry key for a (kind, handle) pair, e.g. `metahead.tag.general`.
pub fn composite_key(kind: ContainerKind, handle: &str) -> String {
    format!("{}{}", kind.prefix(), handle)
}

// ============================================================================
// Meta Container
// ============================================================================

/// Ordered mapping from item storage key to item, scoped to one
/// (kind, handle) pair.
#[derive(Debug, Clone)]
pub struct MetaContainer {
    pub kind: ContainerKind,
    pub handle: String,

    /// Whether this container renders at all. Excluded containers are kept
    /// in the registry for inspection but skipped by `render_all`.
    pub include: bool,

    data: Vec<(String, MetaItem)>,
}

impl MetaContainer {
    pub fn new(kind: ContainerKind, handle: &str) -> Self {
        Self {
            kind,
            handle: handle.into(),
            include: true,
            data: Vec::new(),
        }
    }

    /// Composite registry key for this container.
    pub fn key(&self) -> String {
        composite_key(self.kind, &self.handle)
    }

    /// Insert an item under an explicit storage key.
    ///
    /// Overwrites in place when the key exists, preserving the original
    /// insertion position.
    pub fn insert(&mut self, key: String, item: MetaItem) {
        match self.data.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = item,
            None => self.data.push((key, item)),
        }
    }

    /// Insert an item under its own storage key (explicit or content hash).
    pub fn add(&mut self, item: MetaItem) -> Result<(), MetaError> {
        let key = item.storage_key()?;
        self.insert(key, item);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&MetaItem> {
        self.data.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn items(&self) -> impl Iterator<Item = &MetaItem> {
        self.data.iter().map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Render every item to its own markup fragment, in insertion order.
    pub fn render_array(&self) -> Result<Vec<String>> {
        self.items()
            .map(|item| {
                let mut writer = create_writer();
                item.render(&mut writer)?;
                into_markup(writer)
            })
            .collect()
    }

    /// Render all items as one newline-joined block.
    pub fn render(&self) -> Result<String> {
        let fragments = self.render_array()?;
        let mut html = fragments.join("\n");
        if !html.is_empty() {
            html.push('\n');
        }
        Ok(html)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::item::{MetaScript, MetaTag, MetaTitle};

    fn tag(key: &str, content: &str) -> MetaItem {
        MetaItem::Tag(MetaTag::new(key, key, content))
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("tag".parse::<ContainerKind>().unwrap(), ContainerKind::Tag);
        assert_eq!(
            "jsonld".parse::<ContainerKind>().unwrap(),
            ContainerKind::JsonLd
        );
    }

    #[test]
    fn test_kind_from_str_unrecognized() {
        let err = "widget".parse::<ContainerKind>().unwrap_err();
        assert!(matches!(err, MetaError::UnknownContainerKind(_)));
    }

    #[test]
    fn test_kind_roundtrip_names() {
        for kind in ContainerKind::ALL {
            assert_eq!(kind.name().parse::<ContainerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_composite_key() {
        assert_eq!(
            composite_key(ContainerKind::Tag, "opengraph"),
            "metahead.tag.opengraph"
        );
        assert_eq!(
            composite_key(ContainerKind::JsonLd, GENERAL_HANDLE),
            "metahead.jsonld.general"
        );
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut container = MetaContainer::new(ContainerKind::Tag, GENERAL_HANDLE);
        container.add(tag("a", "1")).unwrap();
        container.add(tag("b", "2")).unwrap();
        container.add(tag("c", "3")).unwrap();

        let keys: Vec<_> = container.items().map(|i| i.key().to_owned()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut container = MetaContainer::new(ContainerKind::Tag, GENERAL_HANDLE);
        container.add(tag("a", "1")).unwrap();
        container.add(tag("b", "2")).unwrap();
        container.add(tag("a", "updated")).unwrap();

        assert_eq!(container.len(), 2);
        // Overwrite keeps position 0, not moved to the end
        let first = container.items().next().unwrap();
        assert_eq!(first.key(), "a");
        match first {
            MetaItem::Tag(t) => assert_eq!(t.content, "updated"),
            _ => panic!("expected tag"),
        }
    }

    #[test]
    fn test_last_write_wins_many_writes() {
        let mut container = MetaContainer::new(ContainerKind::Title, GENERAL_HANDLE);
        for n in 0..10 {
            container
                .add(MetaItem::Title(MetaTitle::new(&format!("Title {n}"))))
                .unwrap();
        }
        assert_eq!(container.len(), 1);
        match container.get("title").unwrap() {
            MetaItem::Title(t) => assert_eq!(t.title, "Title 9"),
            _ => panic!("expected title"),
        }
    }

    #[test]
    fn test_unique_keys_dedup() {
        let mut container = MetaContainer::new(ContainerKind::Script, GENERAL_HANDLE);
        container
            .add(MetaItem::Script(MetaScript::from_src("app", "/app.js")))
            .unwrap();
        container
            .add(MetaItem::Script(MetaScript::from_src("app", "/app.js")))
            .unwrap();
        assert_eq!(container.len(), 1);

        container
            .add(MetaItem::Script(MetaScript::from_src("app", "/other.js")))
            .unwrap();
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn test_render_array_in_order() {
        let mut container = MetaContainer::new(ContainerKind::Tag, GENERAL_HANDLE);
        container.add(tag("a", "1")).unwrap();
        container.add(tag("b", "2")).unwrap();

        let fragments = container.render_array().unwrap();
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains(r#"name="a""#));
        assert!(fragments[1].contains(r#"name="b""#));
    }

    #[test]
    fn test_render_joins_with_newlines() {
        let mut container = MetaContainer::new(ContainerKind::Tag, GENERAL_HANDLE);
        container.add(tag("a", "1")).unwrap();
        container.add(tag("b", "2")).unwrap();

        let html = container.render().unwrap();
        assert_eq!(html.lines().count(), 2);
        assert!(html.ends_with('\n'));
    }

    #[test]
    fn test_render_empty_container() {
        let container = MetaContainer::new(ContainerKind::Link, GENERAL_HANDLE);
        assert_eq!(container.render().unwrap(), "");
    }
}
