//! Utility functions for heading text extraction.
//!
//! Shared helper functions used across the parser module.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Strip markup tags from an HTML fragment and normalize its whitespace.
///
/// Entities are left encoded, since the text is emitted back into HTML.
///
/// # Examples
///
/// ```
/// # use wikitoc::parser::utils::heading_text;
/// assert_eq!(heading_text("<em>Quick</em>  start"), "Quick start");
/// assert_eq!(heading_text("Q &amp; A\n"), "Q &amp; A");
/// ```
pub fn heading_text(inner_html: &str) -> String {
    static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_PATTERN.get_or_init(|| Regex::new(r"(?s)<[^>]*>").unwrap());

    let stripped = tag_re.replace_all(inner_html, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the HTML entities commonly found in rendered heading text.
///
/// Handles the named XML entities, `&nbsp;`, and decimal/hex character
/// references. Anything unrecognized is copied through unchanged.
///
/// # Examples
///
/// ```
/// # use wikitoc::parser::utils::decode_entities;
/// assert_eq!(decode_entities("Q &amp; A"), "Q & A");
/// assert_eq!(decode_entities("&#65;&#x42;"), "AB");
/// assert_eq!(decode_entities("&bogus; &"), "&bogus; &");
/// ```
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= 10)
            .and_then(|end| decode_entity(&after[..end]).map(|ch| (ch, end)));

        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Byte ranges of the HTML comments in `content`, in document order.
///
/// An unterminated `<!--` runs to the end of the input, as browsers treat it.
///
/// # Examples
///
/// ```
/// # use wikitoc::parser::utils::comment_spans;
/// assert_eq!(comment_spans("a<!-- b -->c"), vec![1..11]);
/// assert_eq!(comment_spans("a<!-- open"), vec![1..10]);
/// ```
pub fn comment_spans(content: &str) -> Vec<Range<usize>> {
    static COMMENT_PATTERN: OnceLock<Regex> = OnceLock::new();
    let comment_re =
        COMMENT_PATTERN.get_or_init(|| Regex::new(r"(?s)<!--(?:.*?-->|.*)").unwrap());

    comment_re.find_iter(content).map(|m| m.range()).collect()
}

/// The comment span containing byte `position`, if any.
pub fn enclosing_comment(spans: &[Range<usize>], position: usize) -> Option<&Range<usize>> {
    spans.iter().find(|span| span.contains(&position))
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_text() {
        assert_eq!(heading_text("Plain"), "Plain");
        assert_eq!(heading_text("  <b>Bold</b> and <code>code</code> "), "Bold and code");
        assert_eq!(
            heading_text("<a href=\"/page\"\n class=\"x\">Multi\n line</a>"),
            "Multi line"
        );
        assert_eq!(heading_text("<span></span>"), "");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &quot;c&quot;"), "a <b> \"c\"");
        assert_eq!(decode_entities("it&#39;s"), "it's");
        assert_eq!(decode_entities("it&apos;s"), "it's");
        assert_eq!(decode_entities("non&nbsp;breaking"), "non\u{a0}breaking");
        assert_eq!(decode_entities("&#xe9;t&#XE9;"), "été");
        assert_eq!(decode_entities("no entities"), "no entities");
        assert_eq!(decode_entities("&;"), "&;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
        assert_eq!(decode_entities("trailing &amp"), "trailing &amp");
    }

    #[test]
    fn test_comment_spans() {
        let html = "<p>x</p><!-- one --><h2>A</h2><!--two-->";
        let spans = comment_spans(html);
        assert_eq!(spans.len(), 2);
        assert_eq!(&html[spans[0].clone()], "<!-- one -->");
        assert_eq!(&html[spans[1].clone()], "<!--two-->");
        assert!(enclosing_comment(&spans, 10).is_some());
        assert!(enclosing_comment(&spans, html.find("<h2>").unwrap()).is_none());
        assert!(comment_spans("no comments").is_empty());
    }
}
