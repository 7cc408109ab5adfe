//! JSON output types for the nested table-of-contents structure

use indextree::NodeId;
use serde::{Deserialize, Serialize};

use crate::toc::TocTree;

/// Root output structure with metadata and nested entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocOutput {
    pub metadata: TocMetadata,
    pub entries: Vec<TocEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocMetadata {
    pub source: Option<String>,
    #[serde(rename = "headingCount")]
    pub heading_count: usize,
    #[serde(rename = "placeholderCount")]
    pub placeholder_count: usize,
    #[serde(rename = "maxDepth")]
    pub max_depth: usize,
}

/// One table-of-contents entry with its nested children
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id
    pub id: String,
    /// Stored tree level
    pub level: usize,
    pub title: String,
    /// Dotted position, e.g. "1." or "2.3"
    pub number: String,
    /// True for entries synthesized for skipped levels
    pub placeholder: bool,
    pub children: Vec<TocEntry>,
}

impl TocOutput {
    pub fn from_tree(tree: &TocTree, source: Option<String>) -> Self {
        let placeholder_count = tree.iter().filter(|id| tree.get(*id).placeholder).count();
        Self {
            metadata: TocMetadata {
                source,
                heading_count: tree.len() - placeholder_count,
                placeholder_count,
                max_depth: tree.max_depth(),
            },
            entries: entries(tree, tree.root(), ""),
        }
    }
}

fn entries(tree: &TocTree, parent: NodeId, prefix: &str) -> Vec<TocEntry> {
    tree.children(parent)
        .map(|id| {
            let node = tree.get(id);
            let position = tree.position_among_siblings(id);
            let number = if prefix.is_empty() {
                format!("{position}.")
            } else {
                format!("{prefix}{position}")
            };
            let child_prefix = if prefix.is_empty() {
                number.clone()
            } else {
                format!("{number}.")
            };
            TocEntry {
                id: node.id.clone(),
                level: node.level,
                title: node.title.clone(),
                number,
                placeholder: node.placeholder,
                children: entries(tree, id, &child_prefix),
            }
        })
        .collect()
}
