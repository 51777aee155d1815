//! The HTML Expression Extractor (`spec.md` §4.A, Component A).
//!
//! A direct, single-pass scanner rather than a full HTML5 tree builder:
//! the contract only needs exact byte offsets for interpolation bodies,
//! attribute values, and tag name ranges, all of which a DOM crate built
//! on `html5ever`'s tokenizer discards once nodes are materialized. A
//! linear scan over the source text is also naturally ordered ascending
//! by start offset (step 5 of the algorithm), and naturally traverses
//! `<template>` content exactly like any other nesting, since there is no
//! special-casing of the fragment-document boundary HTML5 parsers apply
//! (step 1's "including `<template>` content subtrees").

use crate::base::range;
use crate::html::classifier::{command_of, is_aurelia_attribute};
use crate::model::{ElementTagRange, Expression};
use smol_str::SmolStr;

/// Output of extraction: the positioned expressions (sorted ascending by
/// `html_span.start`) and every element's tag ranges.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub expressions: Vec<Expression>,
    pub element_tag_ranges: Vec<ElementTagRange>,
}

/// Extract every framework expression and element-tag range from `html`.
///
/// Pure and total: malformed input degrades (unclosed interpolations are
/// ignored past end of text, attributes without matching quotes are
/// skipped, location-free fragments are simply not emitted) rather than
/// failing, per `spec.md` §4.A "Edge cases" and §7 error kind 2.
pub fn extract(html: &str) -> ExtractionResult {
    let mut expressions = Vec::new();
    let mut tag_ranges: Vec<ElementTagRange> = Vec::new();
    // Stack of (tag name, index into tag_ranges) for pairing end tags with
    // their nearest open start tag of the same name.
    let mut open_stack: Vec<(SmolStr, usize)> = Vec::new();

    let bytes = html.as_bytes();
    let mut i = 0usize;
    let len = html.len();

    while i < len {
        match bytes[i] {
            b'<' if html[i..].starts_with("<!--") => {
                i = find_from(html, i + 4, "-->").map(|end| end + 3).unwrap_or(len);
            }
            b'<' if html.as_bytes().get(i + 1) == Some(&b'/') => {
                let tag_start = i;
                if let Some(gt) = find_from(html, i, ">") {
                    let name_start = i + 2;
                    let name_end = trim_name_end(html, name_start, gt);
                    let name = &html[name_start..name_end];
                    let end_tag_range = range(tag_start, gt + 1);
                    if let Some(pos) = open_stack.iter().rposition(|(n, _)| n == name) {
                        let (_, idx) = open_stack.remove(pos);
                        tag_ranges[idx].end_tag_range = Some(end_tag_range);
                    }
                    i = gt + 1;
                } else {
                    i = len;
                }
            }
            b'<' if is_tag_name_start(bytes.get(i + 1).copied()) => {
                let (new_i, expr_emits, tag_name, start_tag_range, self_closing) =
                    scan_start_tag(html, i);
                expressions.extend(expr_emits);
                let idx = tag_ranges.len();
                tag_ranges.push(ElementTagRange {
                    name: tag_name.clone(),
                    start_tag_range,
                    end_tag_range: None,
                });
                if !self_closing && !is_void_element(&tag_name) {
                    open_stack.push((tag_name, idx));
                }
                i = new_i;
            }
            _ => {
                // Text node: scan up to the next '<', looking for `${...}`.
                let text_end = find_from(html, i, "<").unwrap_or(len);
                scan_interpolations(html, i, text_end, &mut expressions);
                i = text_end;
            }
        }
    }

    expressions.sort_by_key(|e| e.html_span.start());

    ExtractionResult {
        expressions,
        element_tag_ranges: tag_ranges,
    }
}

fn is_tag_name_start(b: Option<u8>) -> bool {
    matches!(b, Some(c) if c.is_ascii_alphabetic())
}

fn find_from(haystack: &str, from: usize, needle: &str) -> Option<usize> {
    haystack.get(from..).and_then(|s| s.find(needle)).map(|p| p + from)
}

fn trim_name_end(html: &str, start: usize, hard_end: usize) -> usize {
    html[start..hard_end]
        .find(|c: char| c.is_whitespace())
        .map(|p| p + start)
        .unwrap_or(hard_end)
}

/// Scan `${ ... }` occurrences within `html[from..to]`, greedy to the
/// first `}` and allowing an empty body (`spec.md` §4.A step 2).
fn scan_interpolations(html: &str, from: usize, to: usize, out: &mut Vec<Expression>) {
    let mut cursor = from;
    while let Some(open) = find_from(html, cursor, "${") {
        if open >= to {
            break;
        }
        match find_from(html, open + 2, "}") {
            Some(close) if close <= to => {
                let inner = range(open + 2, close);
                out.push(Expression::interpolation(&html[open + 2..close], inner));
                cursor = close + 1;
            }
            _ => {
                tracing::trace!(at = open, "unclosed interpolation, ignoring past end of text");
                break;
            }
        }
    }
}

/// Scans one start tag beginning at `start` (the `<`). Returns the new
/// cursor position, any binding expressions found in its attributes, the
/// tag name, the start-tag byte range, and whether it was self-closing.
fn scan_start_tag(
    html: &str,
    start: usize,
) -> (usize, Vec<Expression>, SmolStr, crate::base::ByteRange, bool) {
    let bytes = html.as_bytes();
    let len = html.len();
    let name_start = start + 1;
    let mut p = name_start;
    while p < len && (bytes[p].is_ascii_alphanumeric() || bytes[p] == b'-' || bytes[p] == b':') {
        p += 1;
    }
    let tag_name = SmolStr::new(&html[name_start..p]);
    let mut expressions = Vec::new();
    let mut self_closing = false;

    loop {
        p = skip_whitespace(html, p);
        if p >= len {
            return (len, expressions, tag_name, range(start, len), self_closing);
        }
        if bytes[p] == b'>' {
            return (p + 1, expressions, tag_name, range(start, p + 1), self_closing);
        }
        if html[p..].starts_with("/>") {
            self_closing = true;
            return (p + 2, expressions, tag_name, range(start, p + 2), self_closing);
        }
        // Attribute name.
        let attr_name_start = p;
        while p < len && !bytes[p].is_ascii_whitespace() && bytes[p] != b'=' && bytes[p] != b'>' && !html[p..].starts_with("/>")
        {
            p += 1;
        }
        if p == attr_name_start {
            // Stray character (e.g. a bare '/'); skip it to avoid looping forever.
            p += 1;
            continue;
        }
        let attr_name = &html[attr_name_start..p];

        p = skip_whitespace(html, p);
        if p < len && bytes[p] == b'=' {
            p += 1;
            p = skip_whitespace(html, p);
            if p < len && (bytes[p] == b'"' || bytes[p] == b'\'') {
                let quote = bytes[p];
                let value_start = p + 1;
                if let Some(value_end) = find_from(html, value_start, &(quote as char).to_string()) {
                    if is_aurelia_attribute(attr_name) {
                        let command = command_of(attr_name);
                        let value_range = range(value_start, value_end);
                        expressions.push(Expression::binding(
                            command,
                            &html[value_start..value_end],
                            value_range,
                            attr_name,
                            tag_name.clone(),
                        ));
                    }
                    p = value_end + 1;
                } else {
                    // No matching quote: skip the attribute entirely
                    // (`spec.md` §4.A "Attributes without matching quotes
                    // are skipped").
                    p = len;
                }
            } else {
                // Unquoted value: not a form this extractor maps (the
                // binding value range requires quotes per §3); skip the
                // bare token.
                while p < len && !bytes[p].is_ascii_whitespace() && bytes[p] != b'>' {
                    p += 1;
                }
            }
        } else if is_aurelia_attribute(attr_name) {
            // Valueless attribute: an empty-span binding with synthetic
            // text `true` (`spec.md` §3, §4.A step 3).
            let command = command_of(attr_name);
            expressions.push(Expression::binding(command, "true", range(p, p), attr_name, tag_name.clone()));
        }
    }
}

fn skip_whitespace(html: &str, mut p: usize) -> usize {
    let bytes = html.as_bytes();
    while p < bytes.len() && bytes[p].is_ascii_whitespace() {
        p += 1;
    }
    p
}

/// HTML void elements never carry an end tag; used so the extractor does
/// not wait forever for a `</input>` that will never arrive.
fn is_void_element(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExpressionKind;

    #[test]
    fn extracts_interpolation_with_exact_inner_span() {
        let html = "<p>${message}</p>";
        let result = extract(html);
        assert_eq!(result.expressions.len(), 1);
        let expr = &result.expressions[0];
        assert!(expr.is_interpolation());
        assert_eq!(&html[expr.html_span], "message");
    }

    #[test]
    fn empty_interpolation_has_empty_span() {
        let html = "<p>${}</p>";
        let result = extract(html);
        assert_eq!(result.expressions.len(), 1);
        assert_eq!(result.expressions[0].html_span.len(), 0.into());
    }

    #[test]
    fn extracts_binding_value_range() {
        let html = r#"<input value.bind="name">"#;
        let result = extract(html);
        assert_eq!(result.expressions.len(), 1);
        let expr = &result.expressions[0];
        assert_eq!(expr.command(), Some("bind"));
        assert_eq!(&html[expr.html_span], "name");
    }

    #[test]
    fn empty_binding_value_is_boolean_true() {
        let html = r#"<input value.bind="">"#;
        let result = extract(html);
        assert_eq!(result.expressions.len(), 1);
        let expr = &result.expressions[0];
        assert_eq!(expr.html_span.len(), 0.into());
        assert_eq!(expr.text.as_str(), "true");
    }

    #[test]
    fn valueless_attribute_becomes_boolean_binding() {
        let html = r#"<div if.bind></div>"#;
        // `if.bind` with no `=` is unusual, but `if` alone is the common case:
        let html2 = "<template if></template>";
        let _ = extract(html);
        let result = extract(html2);
        assert_eq!(result.expressions.len(), 1);
        assert_eq!(result.expressions[0].text.as_str(), "true");
    }

    #[test]
    fn attribute_without_matching_quote_is_skipped() {
        let html = r#"<input value.bind="name>"#;
        let result = extract(html);
        assert!(result.expressions.is_empty());
    }

    #[test]
    fn plain_attribute_is_not_a_binding() {
        let html = r#"<div class="foo"></div>"#;
        let result = extract(html);
        assert!(result.expressions.is_empty());
    }

    #[test]
    fn start_and_end_tag_ranges_paired() {
        let html = "<my-input></my-input>";
        let result = extract(html);
        assert_eq!(result.element_tag_ranges.len(), 1);
        let tag = &result.element_tag_ranges[0];
        assert_eq!(tag.name.as_str(), "my-input");
        assert_eq!(&html[tag.start_tag_range], "<my-input>");
        assert_eq!(&html[tag.end_tag_range.unwrap()], "</my-input>");
    }

    #[test]
    fn void_element_has_no_end_tag_range() {
        let html = r#"<input value.bind="x">"#;
        let result = extract(html);
        assert_eq!(result.element_tag_ranges.len(), 1);
        assert!(result.element_tag_ranges[0].end_tag_range.is_none());
    }

    #[test]
    fn template_content_is_traversed() {
        let html = "<template>${inside}</template>";
        let result = extract(html);
        assert_eq!(result.expressions.len(), 1);
        assert!(matches!(result.expressions[0].kind, ExpressionKind::Interpolation));
    }

    #[test]
    fn expressions_sorted_ascending() {
        let html = r#"<input value.bind="a"><p>${b}</p>"#;
        let result = extract(html);
        assert!(result.expressions[0].html_span.start() < result.expressions[1].html_span.start());
    }
}
