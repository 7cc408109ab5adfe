//! # wikitoc
//!
//! Table-of-contents generation for rendered wiki pages.
//!
//! This library scans rendered HTML for headings, builds a hierarchical tree
//! from the flat heading sequence (filling in skipped levels), and renders it
//! as nested list markup with hierarchical numbering and collision-free
//! anchor ids.
//!
//! ## Features
//!
//! - Heading tree construction that tolerates skipped and irregular levels
//! - Configurable item/level templates with `1.`, `1.2`, `1.2.3` numbering
//! - Stable, unique anchor ids derived from heading titles
//! - `{TOC}` token substitution and anchor insertion in rendered pages
//!
//! ## Example
//!
//! ```rust
//! use wikitoc::{InjectOptions, TocInjector};
//!
//! let html = r#"{TOC}
//! <h2>Introduction</h2>
//! <h3>Background</h3>
//! <h2>Methodology</h2>"#;
//!
//! let injector = TocInjector::new(InjectOptions::default())?;
//! let page = injector.process(html)?;
//! assert!(page.html.contains(r#"<a name="background"></a><h3>Background</h3>"#));
//!
//! let doc = wikitoc::parse_html(html);
//! let tree = doc.build_tree(&wikitoc::TocOptions::default())?;
//! print!("{}", tree.render_box_tree());
//! # Ok::<(), wikitoc::TocError>(())
//! ```

/// Configuration module for persisting user preferences.
///
/// Provides the TOML-backed template and document settings.
pub mod config;

/// Error types returned by the library.
pub mod error;

/// Document integrator that injects a table of contents into rendered pages.
pub mod inject;

/// Parser module for rendered HTML documents.
///
/// Provides functions to scan HTML and extract heading events.
pub mod parser;

/// Heading tree construction and rendering.
pub mod toc;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{Result, TocError};
pub use inject::{InjectOptions, Injected, TocInjector};
pub use parser::{Document, Heading, parse_file, parse_html};
pub use toc::{TocBuilder, TocOptions, TocTemplate, TocTree};
