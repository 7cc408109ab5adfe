//! Table-of-contents construction and rendering.
//!
//! Headings arrive as a flat, document-ordered stream of `(level, title)`
//! pairs. [`TocBuilder`] turns them into a [`TocTree`], inserting placeholder
//! nodes where levels are skipped, and [`TocTemplate`] renders the tree into
//! nested list markup with dotted numbering.
//!
//! ```
//! use wikitoc::toc::{TocBuilder, TocOptions};
//!
//! let options = TocOptions::default();
//! let tree = TocBuilder::build(&options, [(2, "Intro"), (3, "Scope"), (2, "Usage")])?;
//! let html = options.template.render(&tree);
//! assert!(html.contains(r##"<a href="#scope">1.1&nbsp;Scope</a>"##));
//! # Ok::<(), wikitoc::TocError>(())
//! ```

pub mod builder;
pub mod render;
pub mod title_id;
pub mod tree;

pub use builder::{MAX_HEADING_LEVEL, TocBuilder};
pub use render::TocTemplate;
pub use title_id::{TitleIds, slugify};
pub use tree::{TocNode, TocTree};

use crate::error::{Result, TocError};

/// Lowest heading level expected in rendered wiki pages (`<h2>`).
pub const DEFAULT_BASE_LEVEL: usize = 2;

/// Title given to nodes synthesized for skipped heading levels.
pub const DEFAULT_PLACEHOLDER_TITLE: &str = "(missing heading)";

/// Options controlling tree construction and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocOptions {
    /// Level of top-level headings; the sentinel root sits one below it
    pub base_level: usize,
    /// Title for synthesized gap nodes
    pub placeholder_title: String,
    pub template: TocTemplate,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            base_level: DEFAULT_BASE_LEVEL,
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
            template: TocTemplate::default(),
        }
    }
}

impl TocOptions {
    /// Check the options before use.
    ///
    /// # Errors
    ///
    /// Fails when the template is unusable or `base_level` is outside `1..=6`.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_HEADING_LEVEL).contains(&self.base_level) {
            return Err(TocError::InvalidOption(format!(
                "base_level must be between 1 and {MAX_HEADING_LEVEL}, got {}",
                self.base_level
            )));
        }
        self.template.validate()
    }
}
