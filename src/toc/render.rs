//! Templated rendering of a [`TocTree`] into nested list markup.

use indextree::NodeId;
use serde::{Deserialize, Serialize};

use super::tree::TocTree;
use crate::error::{Result, TocError};

/// Markup fragments used to render a table of contents.
///
/// Every node is wrapped in `item_start`/`item_end`; a node's children are
/// wrapped in `level_start`/`level_end` and emitted before its `item_end`.
/// `item_format` supports `{id}`, `{title}`, `{levels}` and `{itemnumber}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocTemplate {
    pub item_start: String,
    pub item_end: String,
    pub level_start: String,
    pub level_end: String,
    pub item_format: String,
}

impl Default for TocTemplate {
    fn default() -> Self {
        Self {
            item_start: "<li>".to_string(),
            item_end: "</li>".to_string(),
            level_start: "<ul>".to_string(),
            level_end: "</ul>".to_string(),
            item_format: r##"<a href="#{id}">{levels}{itemnumber}&nbsp;{title}</a>"##.to_string(),
        }
    }
}

impl TocTemplate {
    /// Check that the item format can produce a usable entry.
    ///
    /// # Errors
    ///
    /// Returns [`TocError::Template`] when `item_format` has no `{title}`.
    pub fn validate(&self) -> Result<()> {
        if !self.item_format.contains("{title}") {
            return Err(TocError::Template(format!(
                "item_format must contain {{title}}: {:?}",
                self.item_format
            )));
        }
        Ok(())
    }

    /// Render every node below the root in document order.
    ///
    /// The result holds only the items; wrapping the top-level list is left
    /// to the caller. An empty tree renders to an empty string.
    pub fn render(&self, tree: &TocTree) -> String {
        let mut out = String::new();
        self.render_children(tree, tree.root(), &mut out);
        out
    }

    fn render_children(&self, tree: &TocTree, parent: NodeId, out: &mut String) {
        for id in tree.children(parent) {
            out.push_str(&self.item_start);
            out.push_str(&self.format_item(tree, id));
            if tree.has_children(id) {
                out.push_str(&self.level_start);
                self.render_children(tree, id, out);
                out.push_str(&self.level_end);
            }
            out.push_str(&self.item_end);
        }
    }

    fn format_item(&self, tree: &TocTree, id: NodeId) -> String {
        let node = tree.get(id);
        let position = tree.position_among_siblings(id);
        let item_number = if tree.is_top_level(id) {
            format!("{position}.")
        } else {
            position.to_string()
        };

        fill_placeholders(&self.item_format, |name| match name {
            "id" => Some(node.id.clone()),
            "title" => Some(node.title.clone()),
            "itemnumber" => Some(item_number.clone()),
            "levels" => Some(ancestor_numbers(tree, id)),
            _ => None,
        })
    }
}

/// Sibling positions of the ancestors between the root and `id`, outermost
/// first, each followed by a dot. Empty for top-level nodes.
fn ancestor_numbers(tree: &TocTree, id: NodeId) -> String {
    let root = tree.root();
    let mut positions = Vec::new();
    let mut cursor = tree.parent(id);
    while let Some(ancestor) = cursor {
        if ancestor == root {
            break;
        }
        positions.push(tree.position_among_siblings(ancestor));
        cursor = tree.parent(ancestor);
    }

    positions
        .iter()
        .rev()
        .map(|p| format!("{p}."))
        .collect()
}

/// Replace `{name}` tokens in `format` in a single pass.
///
/// Substituted values are not rescanned, and tokens the resolver doesn't
/// know are copied through verbatim.
pub(crate) fn fill_placeholders<F>(format: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                match resolve(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::{TocBuilder, TocOptions};
    use indoc::indoc;

    fn tree(events: &[(usize, &str)]) -> TocTree {
        TocBuilder::build(&TocOptions::default(), events.iter().copied()).unwrap()
    }

    fn numbering() -> TocTemplate {
        TocTemplate {
            item_start: String::new(),
            item_end: String::new(),
            level_start: String::new(),
            level_end: String::new(),
            item_format: "{levels}{itemnumber} {title}\n".to_string(),
        }
    }

    #[test]
    fn test_default_template_nested_list() {
        let tree = tree(&[(2, "Intro"), (2, "Details"), (3, "Sub A"), (3, "Sub B")]);
        let html = TocTemplate::default().render(&tree);
        let expected = concat!(
            r##"<li><a href="#intro">1.&nbsp;Intro</a></li>"##,
            r##"<li><a href="#details">2.&nbsp;Details</a><ul>"##,
            r##"<li><a href="#sub-a">2.1&nbsp;Sub A</a></li>"##,
            r##"<li><a href="#sub-b">2.2&nbsp;Sub B</a></li>"##,
            r##"</ul></li>"##,
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_hierarchical_numbering() {
        let tree = tree(&[
            (2, "A"),
            (3, "A1"),
            (3, "A2"),
            (4, "A2a"),
            (2, "B"),
        ]);
        assert_eq!(
            numbering().render(&tree),
            indoc! {"
                1. A
                1.1 A1
                1.2 A2
                1.2.1 A2a
                2. B
            "}
        );
    }

    #[test]
    fn test_placeholders_are_numbered() {
        let tree = tree(&[(2, "A"), (4, "Deep")]);
        let placeholder = TocOptions::default().placeholder_title;
        assert_eq!(
            numbering().render(&tree),
            format!("1. A\n1.1 {placeholder}\n1.1.1 Deep\n")
        );
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let tree = tree(&[]);
        assert_eq!(TocTemplate::default().render(&tree), "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let tree = tree(&[(2, "A"), (3, "B"), (2, "A")]);
        let template = TocTemplate::default();
        assert_eq!(template.render(&tree), template.render(&tree));
    }

    #[test]
    fn test_titles_are_not_rescanned() {
        let tree = tree(&[(2, "Use {id} here")]);
        let template = TocTemplate {
            item_format: "{title}|{id}".to_string(),
            ..numbering()
        };
        assert_eq!(template.render(&tree), "Use {id} here|use-id-here");
    }

    #[test]
    fn test_validate() {
        assert!(TocTemplate::default().validate().is_ok());
        let broken = TocTemplate {
            item_format: "<a href=\"#{id}\"></a>".to_string(),
            ..TocTemplate::default()
        };
        assert!(matches!(broken.validate(), Err(TocError::Template(_))));
    }

    #[test]
    fn test_fill_placeholders() {
        let fill = |s: &str| {
            fill_placeholders(s, |name| (name == "x").then(|| "1".to_string()))
        };
        assert_eq!(fill("a{x}b"), "a1b");
        assert_eq!(fill("{unknown}{x}"), "{unknown}1");
        assert_eq!(fill("{{x}}"), "{1}");
        assert_eq!(fill("open { brace"), "open { brace");
        assert_eq!(fill("tail {x"), "tail {x");
    }
}
