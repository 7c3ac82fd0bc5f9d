//! Uniform view over hierarchy nodes and facet buckets for drill-down lists.

use portal_core::{Bucket, Hierarchy, HierarchyNode, SearchResultsFacet};
use portal_fields::{translate_field_value, Translator};

/// One entry of a browse list, borrowed from a hierarchy or a facet response.
///
/// Nothing is copied; children are materialized only when asked for. Nodes
/// carry the values of their ancestors, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseItem<'a> {
    Node {
        node: &'a HierarchyNode,
        parents: Vec<&'a str>,
    },
    Bucket(&'a Bucket),
}

impl<'a> BrowseItem<'a> {
    #[must_use]
    pub fn value(&self) -> &'a str {
        match self {
            Self::Node { node, .. } => &node.value,
            Self::Bucket(bucket) => &bucket.value,
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&'a str> {
        match self {
            Self::Node { node, .. } => node.label.as_deref(),
            Self::Bucket(bucket) => bucket
                .hierarchy_info
                .as_ref()
                .and_then(|info| info.label.as_deref()),
        }
    }

    /// Display text: the backend label, else the vocabulary label of the
    /// value on `axis`.
    #[must_use]
    pub fn text(&self, translator: &dyn Translator, axis: &str) -> String {
        self.label().map_or_else(
            || translate_field_value(translator, axis, self.value()),
            str::to_string,
        )
    }

    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        match self {
            Self::Node { node, .. } => node.count,
            Self::Bucket(bucket) => Some(bucket.count),
        }
    }

    /// Whether the entry has children to drill into.
    #[must_use]
    pub fn can_descend(&self) -> bool {
        match self {
            Self::Node { node, .. } => !node.children.is_empty(),
            Self::Bucket(bucket) => bucket
                .hierarchy_info
                .as_ref()
                .is_some_and(|info| info.has_children),
        }
    }

    /// Loaded children, each with this entry appended to its ancestry.
    /// Buckets never carry their children.
    #[must_use]
    pub fn children(&self) -> Vec<BrowseItem<'a>> {
        match self {
            Self::Node { node, parents } => {
                let mut path = parents.clone();
                path.push(&node.value);
                node.children
                    .iter()
                    .map(|child| BrowseItem::Node {
                        node: child,
                        parents: path.clone(),
                    })
                    .collect()
            }
            Self::Bucket(_) => Vec::new(),
        }
    }

    /// Ancestor values, root first.
    #[must_use]
    pub fn parents(&self) -> Vec<&'a str> {
        match self {
            Self::Node { parents, .. } => parents.clone(),
            Self::Bucket(bucket) => bucket
                .hierarchy_info
                .as_ref()
                .map(|info| info.parents.iter().map(String::as_str).collect())
                .unwrap_or_default(),
        }
    }
}

/// Top-level entries of a hierarchy.
pub fn hierarchy_items(hierarchy: &Hierarchy) -> impl Iterator<Item = BrowseItem<'_>> {
    hierarchy.nodes.iter().map(|node| BrowseItem::Node {
        node,
        parents: Vec::new(),
    })
}

/// Entries of an accumulated facet.
pub fn facet_items(facet: &SearchResultsFacet) -> impl Iterator<Item = BrowseItem<'_>> {
    facet.buckets.iter().map(BrowseItem::Bucket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::HierarchyInfo;
    use portal_fields::Catalog;

    fn hierarchy() -> Hierarchy {
        Hierarchy {
            axis: "subject".into(),
            nodes: vec![HierarchyNode {
                value: "arts".into(),
                label: Some("Arts".into()),
                count: Some(12),
                children: vec![HierarchyNode::leaf("music", 5), HierarchyNode::leaf("film", 7)],
            }],
        }
    }

    #[test]
    fn nodes_expose_children_lazily() {
        let tree = hierarchy();
        let root = hierarchy_items(&tree).next().unwrap();
        assert_eq!(root.value(), "arts");
        assert_eq!(root.count(), Some(12));
        assert!(root.can_descend());
        assert!(root.parents().is_empty());

        let children = root.children();
        let values: Vec<&str> = children.iter().map(BrowseItem::value).collect();
        assert_eq!(values, vec!["music", "film"]);
        assert!(!children[0].can_descend());
    }

    #[test]
    fn nested_nodes_carry_their_ancestry() {
        let tree = Hierarchy {
            axis: "subject".into(),
            nodes: vec![HierarchyNode {
                value: "arts".into(),
                label: None,
                count: Some(12),
                children: vec![HierarchyNode {
                    value: "music".into(),
                    label: None,
                    count: Some(5),
                    children: vec![HierarchyNode::leaf("jazz", 2)],
                }],
            }],
        };
        let root = hierarchy_items(&tree).next().unwrap();
        let music = root.children().remove(0);
        assert_eq!(music.value(), "music");
        assert_eq!(music.parents(), vec!["arts"]);

        let jazz = music.children().remove(0);
        assert_eq!(jazz.value(), "jazz");
        assert_eq!(jazz.parents(), vec!["arts", "music"]);
        assert!(root.parents().is_empty());
    }

    #[test]
    fn buckets_use_hierarchy_info() {
        let mut bucket = Bucket::new("music", 5);
        bucket.hierarchy_info = Some(HierarchyInfo {
            label: None,
            parents: vec!["arts".into()],
            has_children: true,
        });
        let facet = SearchResultsFacet {
            axis: "subject".into(),
            buckets: vec![bucket, Bucket::new("plain", 1)],
            bucket_no: 2,
        };
        let items: Vec<BrowseItem<'_>> = facet_items(&facet).collect();
        assert!(items[0].can_descend());
        assert_eq!(items[0].parents(), vec!["arts"]);
        assert!(items[0].children().is_empty());
        assert!(!items[1].can_descend());
        assert!(items[1].parents().is_empty());
    }

    #[test]
    fn text_prefers_backend_label() {
        let catalog = Catalog::new("en").with_entries([("values.subject.music", "Music")]);
        let tree = hierarchy();
        let root = hierarchy_items(&tree).next().unwrap();
        assert_eq!(root.text(&catalog, "subject"), "Arts");
        assert_eq!(root.children()[0].text(&catalog, "subject"), "Music");
        assert_eq!(root.children()[1].text(&catalog, "subject"), "film");
    }
}
