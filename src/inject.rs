//! Table-of-contents injection into rendered HTML.
//!
//! [`TocInjector`] scans a page for headings, builds the tree, writes an
//! anchor marker in front of every heading, and replaces the placeholder
//! token with the rendered contents block.

use indextree::NodeId;
use tracing::{debug, info};

use crate::error::{Result, TocError};
use crate::parser::utils::{comment_spans, enclosing_comment};
use crate::parser::{self, Document};
use crate::toc::render::fill_placeholders;
use crate::toc::{TocOptions, TocTree};

/// Placeholder token authors put in a page to request a contents block.
pub const DEFAULT_TOKEN: &str = "{TOC}";

/// Marker written before each heading; `{id}` is the heading's anchor id.
pub const DEFAULT_ANCHOR_FORMAT: &str = r#"<a name="{id}"></a>"#;

/// Container around the rendered list; `{items}` is the nested list.
pub const DEFAULT_WRAPPER_FORMAT: &str = concat!(
    r#"<div class="toc">"#,
    r##"<div class="toc-title">Contents [<a class="toc-showhide" href="#">hide</a>]</div>"##,
    r#"<div class="toc-list">{items}</div>"#,
    "</div>",
);

/// Options for the document integrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectOptions {
    pub toc: TocOptions,
    pub token: String,
    pub anchor_format: String,
    pub wrapper_format: String,
    /// Replace the token with nothing when the page has no headings
    pub omit_empty: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            toc: TocOptions::default(),
            token: DEFAULT_TOKEN.to_string(),
            anchor_format: DEFAULT_ANCHOR_FORMAT.to_string(),
            wrapper_format: DEFAULT_WRAPPER_FORMAT.to_string(),
            omit_empty: true,
        }
    }
}

/// Result of processing one page.
#[derive(Debug, Clone)]
pub struct Injected {
    pub html: String,
    /// The tree built for the page; `None` when the page had no token
    pub tree: Option<TocTree>,
    /// Number of token occurrences replaced
    pub replaced: usize,
}

impl Injected {
    fn unchanged(html: &str) -> Self {
        Self {
            html: html.to_string(),
            tree: None,
            replaced: 0,
        }
    }
}

/// Inserts a table of contents into rendered pages.
#[derive(Debug, Clone)]
pub struct TocInjector {
    options: InjectOptions,
}

impl TocInjector {
    /// # Errors
    ///
    /// Fails when the options don't validate or the token is empty.
    pub fn new(options: InjectOptions) -> Result<Self> {
        if options.token.is_empty() {
            return Err(TocError::InvalidOption("token must not be empty".to_string()));
        }
        options.toc.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &InjectOptions {
        &self.options
    }

    /// Process one rendered page.
    ///
    /// Pages without an unescaped token come back unchanged and no tree is
    /// built for them.
    ///
    /// # Errors
    ///
    /// Fails when a heading carries a level the builder rejects.
    pub fn process(&self, html: &str) -> Result<Injected> {
        let mut tokens = find_tokens(html, &self.options.token);
        if tokens.is_empty() {
            debug!("no contents token found, leaving page unchanged");
            return Ok(Injected::unchanged(html));
        }

        let document = parser::parse_html(html);
        // A token inside a heading is part of its text.
        tokens.retain(|&position| {
            !document
                .headings
                .iter()
                .any(|h| (h.offset..h.offset + h.len).contains(&position))
        });
        if tokens.is_empty() {
            debug!("contents token only found inside headings, leaving page unchanged");
            return Ok(Injected::unchanged(html));
        }

        let (tree, nodes) = document.build_anchored_tree(&self.options.toc)?;
        let block = self.contents_block(&tree);
        let output = self.splice(&document, &tree, &nodes, &tokens, &block);

        info!(
            headings = document.headings.len(),
            tokens = tokens.len(),
            "inserted table of contents"
        );

        Ok(Injected {
            html: output,
            tree: Some(tree),
            replaced: tokens.len(),
        })
    }

    /// The markup that replaces the token: the wrapper around the rendered
    /// list, or nothing for an empty tree when `omit_empty` is set.
    pub fn contents_block(&self, tree: &TocTree) -> String {
        if tree.is_empty() && self.options.omit_empty {
            return String::new();
        }

        let template = &self.options.toc.template;
        let items = format!(
            "{}{}{}",
            template.level_start,
            template.render(tree),
            template.level_end
        );
        fill_placeholders(&self.options.wrapper_format, |name| {
            (name == "items").then(|| items.clone())
        })
    }

    fn splice(
        &self,
        document: &Document,
        tree: &TocTree,
        nodes: &[NodeId],
        tokens: &[usize],
        block: &str,
    ) -> String {
        let html = document.content.as_str();
        let token_len = self.options.token.len();

        // (position, replaced length, replacement), applied front to back.
        let mut edits: Vec<(usize, usize, String)> = Vec::new();
        for (heading, node) in document.headings.iter().zip(nodes) {
            let id = &tree.get(*node).id;
            let anchor = fill_placeholders(&self.options.anchor_format, |name| {
                (name == "id").then(|| id.clone())
            });
            edits.push((heading.offset, 0, anchor));
        }
        for &position in tokens {
            edits.push((position, token_len, block.to_string()));
        }
        edits.sort_by_key(|(position, ..)| *position);

        let mut out = String::with_capacity(html.len() + block.len() * tokens.len());
        let mut cursor = 0;
        for (position, len, replacement) in edits {
            if position < cursor {
                continue;
            }
            out.push_str(&html[cursor..position]);
            out.push_str(&replacement);
            cursor = position + len;
        }
        out.push_str(&html[cursor..]);
        out
    }
}

/// Byte offsets of the unescaped occurrences of `token` in `html`.
///
/// An occurrence directly preceded by `{` or followed by `}` is escaped
/// (`{{TOC}}`) or part of a larger token and is skipped, as is any
/// occurrence inside an HTML comment.
pub fn find_tokens(html: &str, token: &str) -> Vec<usize> {
    if token.is_empty() {
        return Vec::new();
    }

    let comments = comment_spans(html);
    let bytes = html.as_bytes();
    html.match_indices(token)
        .map(|(position, _)| position)
        .filter(|&position| {
            let end = position + token.len();
            let opened = position > 0 && bytes[position - 1] == b'{';
            let closed = end < bytes.len() && bytes[end] == b'}';
            !opened && !closed && enclosing_comment(&comments, position).is_none()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::TocTemplate;

    fn plain_options() -> InjectOptions {
        InjectOptions {
            toc: TocOptions {
                template: TocTemplate {
                    item_start: "[".to_string(),
                    item_end: "]".to_string(),
                    level_start: "(".to_string(),
                    level_end: ")".to_string(),
                    item_format: "{levels}{itemnumber}{title}".to_string(),
                },
                ..TocOptions::default()
            },
            anchor_format: "<a:{id}>".to_string(),
            wrapper_format: "<toc>{items}</toc>".to_string(),
            ..InjectOptions::default()
        }
    }

    fn process(options: InjectOptions, html: &str) -> Injected {
        TocInjector::new(options).unwrap().process(html).unwrap()
    }

    #[test]
    fn test_inserts_anchors_and_contents() {
        let html = "<p>{TOC}</p><h2>Intro</h2><h2>Details</h2><h3>Sub A</h3>";
        let injected = process(plain_options(), html);
        assert_eq!(
            injected.html,
            "<p><toc>([1.Intro][2.Details([2.1Sub A])])</toc></p>\
             <a:intro><h2>Intro</h2><a:details><h2>Details</h2><a:sub-a><h3>Sub A</h3>"
        );
        assert_eq!(injected.replaced, 1);
        assert_eq!(injected.tree.unwrap().len(), 3);
    }

    #[test]
    fn test_default_options_produce_wrapped_list() {
        let injected = process(InjectOptions::default(), "{TOC}<h2>Overview</h2><h2>Overview</h2>");
        assert!(injected.html.starts_with(r#"<div class="toc">"#));
        assert!(injected.html.contains(r##"<a href="#overview">1.&nbsp;Overview</a>"##));
        assert!(injected.html.contains(r##"<a href="#overview-2">2.&nbsp;Overview</a>"##));
        assert!(injected.html.contains(r#"<a name="overview"></a><h2>Overview</h2>"#));
        assert!(injected.html.contains(r#"<a name="overview-2"></a><h2>Overview</h2>"#));
    }

    #[test]
    fn test_page_without_token_is_untouched() {
        let html = "<h2>Intro</h2><p>No contents here</p>";
        let injected = process(plain_options(), html);
        assert_eq!(injected.html, html);
        assert!(injected.tree.is_none());
        assert_eq!(injected.replaced, 0);
    }

    #[test]
    fn test_escaped_token_is_skipped() {
        let html = "<p>Write {{TOC}} to get contents.</p>{TOC}<h2>A</h2>";
        let injected = process(plain_options(), html);
        assert_eq!(
            injected.html,
            "<p>Write {{TOC}} to get contents.</p><toc>([1.A])</toc><a:a><h2>A</h2>"
        );
    }

    #[test]
    fn test_every_unescaped_token_is_replaced() {
        let injected = process(plain_options(), "{TOC}<h2>A</h2>{TOC}");
        assert_eq!(injected.replaced, 2);
        assert_eq!(injected.html, "<toc>([1.A])</toc><a:a><h2>A</h2><toc>([1.A])</toc>");
    }

    #[test]
    fn test_empty_page_omits_wrapper() {
        let injected = process(plain_options(), "<p>{TOC}</p>");
        assert_eq!(injected.html, "<p></p>");

        let keep = InjectOptions {
            omit_empty: false,
            ..plain_options()
        };
        let injected = process(keep, "<p>{TOC}</p>");
        assert_eq!(injected.html, "<p><toc>()</toc></p>");
    }

    #[test]
    fn test_custom_token() {
        let options = InjectOptions {
            token: "[[contents]]".to_string(),
            ..plain_options()
        };
        let injected = process(options, "[[contents]]<h2>A</h2>");
        assert_eq!(injected.html, "<toc>([1.A])</toc><a:a><h2>A</h2>");
    }

    #[test]
    fn test_rejects_empty_token() {
        let options = InjectOptions {
            token: String::new(),
            ..InjectOptions::default()
        };
        assert!(TocInjector::new(options).is_err());
    }

    #[test]
    fn test_find_tokens() {
        assert_eq!(find_tokens("{TOC} x {TOC}", "{TOC}"), vec![0, 8]);
        assert!(find_tokens("{{TOC}}", "{TOC}").is_empty());
        assert!(find_tokens("{TOC}}", "{TOC}").is_empty());
        assert!(find_tokens("nothing", "{TOC}").is_empty());
        assert_eq!(find_tokens("<!-- {TOC} -->{TOC}", "{TOC}"), vec![14]);
    }

    #[test]
    fn test_commented_out_markup_is_ignored() {
        let html = "<!-- {TOC} -->{TOC}<!-- <h2>Hidden</h2> --><h2>Real</h2>";
        let injected = process(plain_options(), html);
        assert_eq!(
            injected.html,
            "<!-- {TOC} --><toc>([1.Real])</toc><!-- <h2>Hidden</h2> --><a:real><h2>Real</h2>"
        );
        assert_eq!(injected.replaced, 1);
        assert_eq!(injected.tree.unwrap().len(), 1);
    }

    #[test]
    fn test_quoted_gt_in_heading_attribute() {
        let injected = process(plain_options(), r#"{TOC}<h2 title="a>b">X</h2>"#);
        assert_eq!(injected.html, r#"<toc>([1.X])</toc><a:x><h2 title="a>b">X</h2>"#);
    }

    #[test]
    fn test_token_inside_heading_is_heading_text() {
        let injected = process(plain_options(), "{TOC}<h2>See {TOC}</h2>");
        assert_eq!(
            injected.html,
            "<toc>([1.See {TOC}])</toc><a:see-toc><h2>See {TOC}</h2>"
        );
        assert_eq!(injected.replaced, 1);

        let only_heading = "<h2>See {TOC}</h2>";
        let injected = process(plain_options(), only_heading);
        assert_eq!(injected.html, only_heading);
        assert!(injected.tree.is_none());
    }
}
