//! Heading tree storage and navigation.
//!
//! Nodes live in an [`indextree::Arena`]: the arena owns every node, children
//! are kept in attachment order, and the parent link is a plain [`NodeId`].

use indextree::{Arena, NodeId};
use std::fmt::Write;

/// One heading in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    /// Display text
    pub title: String,
    /// Anchor id, unique within the tree
    pub id: String,
    /// Stored depth; always the parent's level + 1
    pub level: usize,
    /// True for nodes synthesized to fill a skipped heading level
    pub placeholder: bool,
}

impl TocNode {
    /// A heading node. Its level is assigned when it is attached.
    pub fn heading(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            level: 0,
            placeholder: false,
        }
    }

    /// A gap node standing in for a missing intermediate level.
    pub fn placeholder(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            placeholder: true,
            ..Self::heading(title, id)
        }
    }
}

/// A table-of-contents tree rooted at an unrendered sentinel.
#[derive(Debug, Clone)]
pub struct TocTree {
    arena: Arena<TocNode>,
    root: NodeId,
}

impl TocTree {
    /// Create an empty tree whose sentinel root sits at `root_level`.
    pub fn new(root_level: usize) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(TocNode {
            title: String::new(),
            id: String::new(),
            level: root_level,
            placeholder: false,
        });
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_level(&self) -> usize {
        self.get(self.root).level
    }

    /// Node payload for `id`.
    ///
    /// Ids are only ever handed out by this tree and nodes are never removed,
    /// so the lookup cannot miss.
    pub fn get(&self, id: NodeId) -> &TocNode {
        self.arena[id].get()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        id.parent(&self.arena)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Attach `node` as the last child of `parent`, setting its level to
    /// `parent.level + 1`.
    ///
    /// No level continuity checks happen here; that is the builder's job.
    pub fn add_child(&mut self, parent: NodeId, mut node: TocNode) -> NodeId {
        node.level = self.get(parent).level + 1;
        let child = self.arena.new_node(node);
        parent.append(child, &mut self.arena);
        child
    }

    /// 1-based index of `id` among its parent's children, or 1 for a
    /// parentless node.
    pub fn position_among_siblings(&self, id: NodeId) -> usize {
        match self.parent(id) {
            Some(_) => id.preceding_siblings(&self.arena).count(),
            None => 1,
        }
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.arena[id].first_child().is_some()
    }

    /// True when `id` hangs directly off the sentinel root.
    pub fn is_top_level(&self, id: NodeId) -> bool {
        self.parent(id) == Some(self.root)
    }

    /// All nodes below the root in document (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.arena).skip(1)
    }

    /// Number of nodes below the root, placeholders included.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        !self.has_children(self.root)
    }

    /// Depth of the deepest node, counting top-level nodes as depth 1.
    pub fn max_depth(&self) -> usize {
        let root_level = self.root_level();
        self.iter()
            .map(|id| self.get(id).level - root_level)
            .max()
            .unwrap_or(0)
    }

    /// Render the tree with Unicode box-drawing characters.
    ///
    /// Placeholder nodes are shown in brackets.
    pub fn render_box_tree(&self) -> String {
        let mut out = String::new();
        let top: Vec<NodeId> = self.children(self.root).collect();
        for (i, id) in top.iter().enumerate() {
            self.render_box_node(*id, "", i + 1 == top.len(), &mut out);
        }
        out
    }

    fn render_box_node(&self, id: NodeId, prefix: &str, is_last: bool, out: &mut String) {
        let node = self.get(id);
        let connector = if is_last { "└── " } else { "├── " };
        if node.placeholder {
            let _ = writeln!(out, "{prefix}{connector}[{}]", node.title);
        } else {
            let _ = writeln!(out, "{prefix}{connector}{}", node.title);
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children: Vec<NodeId> = self.children(id).collect();
        for (i, child) in children.iter().enumerate() {
            self.render_box_node(*child, &child_prefix, i + 1 == children.len(), out);
        }
    }
}
