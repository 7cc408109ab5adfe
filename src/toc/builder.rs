//! Incremental construction of a [`TocTree`] from document-ordered headings.

use indextree::NodeId;
use tracing::{debug, trace};

use super::TocOptions;
use super::title_id::TitleIds;
use super::tree::{TocNode, TocTree};
use crate::error::{Result, TocError};

/// Highest heading level accepted by the builder (`<h6>`).
pub const MAX_HEADING_LEVEL: usize = 6;

/// Builds a heading tree one `(level, title)` event at a time.
///
/// Skipped levels are filled with placeholder nodes so that every stored
/// level is exactly one more than its parent's. A builder is scoped to one
/// document: its id registry must not be shared.
#[derive(Debug)]
pub struct TocBuilder {
    tree: TocTree,
    current: NodeId,
    current_level: usize,
    ids: TitleIds,
    placeholder_title: String,
}

impl TocBuilder {
    pub fn new(options: &TocOptions) -> Self {
        let root_level = options.base_level.saturating_sub(1);
        let tree = TocTree::new(root_level);
        let current = tree.root();
        Self {
            tree,
            current,
            current_level: root_level,
            ids: TitleIds::new(),
            placeholder_title: options.placeholder_title.clone(),
        }
    }

    /// Build a tree from a complete event stream.
    pub fn build<I, S>(options: &TocOptions, events: I) -> Result<TocTree>
    where
        I: IntoIterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        let mut builder = Self::new(options);
        for (level, title) in events {
            builder.push(level, title.as_ref())?;
        }
        Ok(builder.finish())
    }

    /// Attach the next heading and return its node.
    ///
    /// Levels at or below the root level are folded onto the top level.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::InvalidLevel`] for level 0 or levels deeper than
    /// [`MAX_HEADING_LEVEL`].
    pub fn push(&mut self, level: usize, title: &str) -> Result<NodeId> {
        self.push_with_anchor_text(level, title, title)
    }

    /// Like [`push`](Self::push), but derive the anchor id from
    /// `anchor_text` instead of the display title.
    ///
    /// Used when the title is still HTML-encoded and the slug should be
    /// taken from the decoded text.
    pub fn push_with_anchor_text(
        &mut self,
        level: usize,
        title: &str,
        anchor_text: &str,
    ) -> Result<NodeId> {
        if level == 0 || level > MAX_HEADING_LEVEL {
            return Err(TocError::InvalidLevel {
                level,
                title: title.to_string(),
            });
        }

        let parent = if level == self.current_level {
            self.tree.parent(self.current).unwrap_or(self.current)
        } else if level > self.current_level {
            while self.current_level + 1 < level {
                let id = self.ids.next_placeholder_id();
                let gap = TocNode::placeholder(self.placeholder_title.clone(), id);
                self.advance(self.current, gap);
                debug!(level = self.current_level, "synthesized placeholder for skipped level");
            }
            self.current
        } else {
            self.rewind_target(level)
        };

        let id = self.ids.next_id(anchor_text);
        let node = self.advance(parent, TocNode::heading(title, id));
        trace!(level, stored = self.current_level, title, "attached heading");
        Ok(node)
    }

    /// Find the parent for a heading that climbs back up the tree.
    ///
    /// Walks up from the current node's parent while the ancestor sits deeper
    /// than `level`, then attaches under that ancestor's parent. Stops at the
    /// root, which is used directly when there is nothing above it.
    fn rewind_target(&self, level: usize) -> NodeId {
        let root = self.tree.root();
        let mut ancestor = self.tree.parent(self.current).unwrap_or(root);
        while ancestor != root && self.tree.get(ancestor).level > level {
            ancestor = self.tree.parent(ancestor).unwrap_or(root);
        }
        let target = self.tree.parent(ancestor).unwrap_or(ancestor);
        debug!(
            from = self.current_level,
            to = level,
            "rewinding to level {}",
            self.tree.get(target).level + 1
        );
        target
    }

    fn advance(&mut self, parent: NodeId, node: TocNode) -> NodeId {
        let id = self.tree.add_child(parent, node);
        self.current = id;
        self.current_level = self.tree.get(id).level;
        id
    }

    /// Level of the most recently attached node.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn tree(&self) -> &TocTree {
        &self.tree
    }

    pub fn finish(self) -> TocTree {
        self.tree
    }
}
