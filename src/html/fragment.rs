//! The lightweight fragment parser backing completion-context detection
//! (`spec.md` §4.D "If outside any expression, derive completions from
//! local HTML context obtained from a lightweight fragment parse").
//!
//! Unlike [`crate::html::extractor`], this never walks the whole
//! document: completion requests are cursor-local, so only the
//! characters between the enclosing tag's `<` and the cursor are worth
//! looking at. The small grammars below (a tag name, an attribute base
//! name) are parsed with `winnow` rather than hand-rolled, since they
//! are exactly the kind of short composable token grammar the crate's
//! parser combinator dependency exists for.

use smol_str::SmolStr;
use winnow::Result;
use winnow::prelude::*;
use winnow::token::take_while;

/// What the cursor is positioned over, for completion purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Inside, or immediately after, a `<`: suggest element names.
    ElementName,
    /// Inside an opening tag's attribute area.
    AttributeArea { element_tag: SmolStr },
    /// Immediately after a `.` following an attribute/bindable base name.
    AfterDot { element_tag: SmolStr, attribute_base: SmolStr },
    /// Not inside any tag (plain text, possibly inside an expression,
    /// which the caller checks separately via the active-mapping lookup).
    None,
}

fn name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == ':'
}

fn parse_name<'a>(input: &mut &'a str) -> Result<&'a str> {
    take_while(1.., name_char).parse_next(input)
}

/// Classify the completion context at byte offset `cursor` within `html`.
pub fn classify(html: &str, cursor: usize) -> CompletionContext {
    let cursor = cursor.min(html.len());
    let Some(tag_start) = find_enclosing_tag_start(html, cursor) else {
        return CompletionContext::None;
    };
    let bytes = html.as_bytes();
    if bytes.get(tag_start + 1) == Some(&b'/') {
        return CompletionContext::None;
    }

    let mut rest = &html[tag_start + 1..];
    let name = parse_name.parse_next(&mut rest).unwrap_or("");
    let name_end = tag_start + 1 + name.len();

    if cursor <= name_end {
        return CompletionContext::ElementName;
    }

    let element_tag = SmolStr::new(name);

    if cursor > 0 && bytes[cursor - 1] == b'.' {
        if let Some(base) = attribute_base_before_dot(html, cursor - 1, name_end) {
            return CompletionContext::AfterDot {
                element_tag,
                attribute_base: SmolStr::new(base),
            };
        }
    }

    CompletionContext::AttributeArea { element_tag }
}

/// Scans backward from `dot_pos` (the index of the `.`) to find the
/// attribute base name immediately preceding it, stopping no earlier
/// than `floor` (the end of the tag name).
fn attribute_base_before_dot(html: &str, dot_pos: usize, floor: usize) -> Option<&str> {
    let bytes = html.as_bytes();
    let mut start = dot_pos;
    while start > floor && name_char(bytes[start - 1] as char) {
        start -= 1;
    }
    if start == dot_pos {
        None
    } else {
        Some(&html[start..dot_pos])
    }
}

/// Walks backward from `cursor`, returning the index of the nearest `<`
/// that has no `>` between it and the cursor (i.e. the cursor sits
/// inside that tag's source range), or `None` if the cursor is in text.
fn find_enclosing_tag_start(html: &str, cursor: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut i = cursor;
    while i > 0 {
        i -= 1;
        match bytes[i] {
            b'>' => return None,
            b'<' => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediately_after_lt_is_element_name() {
        assert_eq!(classify("<", 1), CompletionContext::ElementName);
        assert_eq!(classify("<my-", 4), CompletionContext::ElementName);
    }

    #[test]
    fn inside_attribute_area_after_tag_name() {
        let ctx = classify("<my-input ", 10);
        assert_eq!(
            ctx,
            CompletionContext::AttributeArea {
                element_tag: "my-input".into()
            }
        );
    }

    #[test]
    fn after_dot_following_attribute_base() {
        let ctx = classify("<input value.", 13);
        assert_eq!(
            ctx,
            CompletionContext::AfterDot {
                element_tag: "input".into(),
                attribute_base: "value".into()
            }
        );
    }

    #[test]
    fn plain_text_is_none() {
        assert_eq!(classify("<p>hello</p>", 6), CompletionContext::None);
    }

    #[test]
    fn closing_tag_is_none() {
        assert_eq!(classify("</my-inp", 8), CompletionContext::None);
    }
}
