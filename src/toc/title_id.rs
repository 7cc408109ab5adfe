//! Anchor id generation for headings.
//!
//! Ids are derived from heading titles and kept unique within a single build
//! by appending a numeric suffix to repeated slugs.

use std::collections::HashSet;

/// Id used when a title slugifies to nothing (e.g. a heading made of symbols).
const EMPTY_SLUG: &str = "section";

/// Prefix for ids given to synthesized gap nodes.
const PLACEHOLDER_PREFIX: &str = "toc-missing-";

/// Generate a URL/anchor-safe slug from heading text.
///
/// Lowercases the text, keeps alphanumerics and underscores, and collapses
/// every other run of characters into a single hyphen.
///
/// # Examples
///
/// ```
/// use wikitoc::toc::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("  API: Reference  "), "api-reference");
/// assert_eq!(slugify("***"), "section");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Per-build registry of minted anchor ids.
///
/// One instance belongs to one document; reusing it across documents would
/// suffix legitimately repeated titles.
#[derive(Debug, Default, Clone)]
pub struct TitleIds {
    /// Ids minted from titles, in production order.
    used: Vec<String>,
    /// Every id minted so far, titles and placeholders alike.
    taken: HashSet<String>,
    placeholder_counter: usize,
}

impl TitleIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a unique id for a heading title and record it.
    ///
    /// The first occurrence of a slug is returned as-is. A repeated slug gets
    /// `-{n}` appended, where `n` is one more than the number of title ids
    /// already starting with that slug, bumped further if that id is taken.
    pub fn next_id(&mut self, title: &str) -> String {
        let candidate = slugify(title);

        let id = if self.taken.contains(&candidate) {
            let prefixed = self
                .used
                .iter()
                .filter(|id| id.starts_with(candidate.as_str()))
                .count();
            let mut n = prefixed + 1;
            loop {
                let suffixed = format!("{candidate}-{n}");
                if !self.taken.contains(&suffixed) {
                    break suffixed;
                }
                n += 1;
            }
        } else {
            candidate
        };

        self.taken.insert(id.clone());
        self.used.push(id.clone());
        id
    }

    /// Mint an id for a synthesized gap node.
    ///
    /// Placeholder ids are reserved so title ids never collide with them, but
    /// they don't take part in the prefix count used for title suffixes.
    pub fn next_placeholder_id(&mut self) -> String {
        loop {
            self.placeholder_counter += 1;
            let id = format!("{PLACEHOLDER_PREFIX}{}", self.placeholder_counter);
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }

    #[cfg(test)]
    fn used(&self) -> &[String] {
        &self.used
    }

    #[cfg(test)]
    fn contains(&self, id: &str) -> bool {
        self.taken.contains(id)
    }
}
