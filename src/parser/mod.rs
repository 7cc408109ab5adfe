//! Rendered-HTML scanning and document structure extraction.
//!
//! This module finds the `<h1>`..`<h6>` elements of a rendered wiki page and
//! exposes them as typed [`Heading`] events, so the table-of-contents core
//! never deals with markup.

mod document;
pub mod output;
pub mod utils;

pub use document::{Document, Heading};
pub use output::{TocEntry, TocMetadata, TocOutput};

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Parse an HTML file and extract its headings.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path) -> std::io::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_html(&content))
}

/// Scan rendered HTML for heading elements, in document order.
///
/// Tags are matched case-insensitively, may carry attributes, and may span
/// lines. A mismatched closing tag (`<h2>..</h3>`) still closes the heading;
/// the opening tag decides the level. Headings inside HTML comments are
/// skipped.
pub fn parse_html(content: &str) -> Document {
    static HEADING_PATTERN: OnceLock<Regex> = OnceLock::new();
    // No backreferences in the regex crate, so the closing level is matched
    // independently. Quoted attribute values may contain `>`.
    let heading_re = HEADING_PATTERN.get_or_init(|| {
        Regex::new(r#"(?is)<h([1-6])(?:\s(?:[^>"']|"[^"]*"|'[^']*')*)?>(.*?)</h[1-6]\s*>"#)
            .unwrap()
    });

    let comments = utils::comment_spans(content);
    let mut headings = Vec::new();
    let mut pos = 0;
    while let Some(cap) = heading_re.captures_at(content, pos) {
        let (Some(whole), Some(level), Some(inner)) = (cap.get(0), cap.get(1), cap.get(2)) else {
            break;
        };
        if let Some(comment) = utils::enclosing_comment(&comments, whole.start()) {
            pos = comment.end;
            continue;
        }
        pos = whole.end();

        let Ok(level) = level.as_str().parse() else {
            continue;
        };
        headings.push(Heading {
            level,
            text: utils::heading_text(inner.as_str()),
            offset: whole.start(),
            len: whole.len(),
        });
    }

    Document::new(content.to_string(), headings)
}
