use indextree::NodeId;
use serde::{Deserialize, Serialize};

use super::utils::decode_entities;
use crate::error::Result;
use crate::toc::{TocBuilder, TocOptions, TocTree};

/// A heading found in a rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1 for `<h1>` through 6 for `<h6>`)
    pub level: usize,
    /// Text content with tags stripped; entities stay encoded
    pub text: String,
    /// Byte offset of the opening tag in the source
    pub offset: usize,
    /// Byte length of the whole element, opening to closing tag
    #[serde(skip)]
    pub len: usize,
}

impl Heading {
    /// A heading that doesn't point into any source document.
    pub fn new(level: usize, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            offset: 0,
            len: 0,
        }
    }
}

/// A rendered HTML document and the headings it contains, in document order.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: String,
    pub headings: Vec<Heading>,
}

impl Document {
    pub fn new(content: String, headings: Vec<Heading>) -> Self {
        Self { content, headings }
    }

    /// Feed the headings to a fresh builder and return the finished tree.
    ///
    /// Anchor ids are derived from the entity-decoded text; titles keep the
    /// encoded form so they can be written back into HTML as-is.
    ///
    /// # Errors
    ///
    /// Fails on the first heading whose level the builder rejects.
    pub fn build_tree(&self, options: &TocOptions) -> Result<TocTree> {
        self.build_anchored_tree(options).map(|(tree, _)| tree)
    }

    /// Like [`build_tree`](Self::build_tree), also returning the node created
    /// for each heading, index-aligned with [`headings`](Self::headings).
    pub fn build_anchored_tree(&self, options: &TocOptions) -> Result<(TocTree, Vec<NodeId>)> {
        let mut builder = TocBuilder::new(options);
        let mut nodes = Vec::with_capacity(self.headings.len());
        for heading in &self.headings {
            nodes.push(builder.push_with_anchor_text(
                heading.level,
                &heading.text,
                &decode_entities(&heading.text),
            )?);
        }
        Ok((builder.finish(), nodes))
    }
}
