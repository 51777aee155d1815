//! Find references (`spec.md` §4.D "References").

use smol_str::SmolStr;

use crate::base::{range, ByteRange, TextSize, Uri};
use crate::host::AnalysisHost;
use crate::ide::{attribute_name_range, end_tag_name_range, start_tag_name_range, Location};
use crate::index::ComponentIndex;
use crate::model::{ComponentInfo, ViewMappings};
use crate::{shadow, tssrc};

pub type ReferenceLocation = Location;

/// `spec.md` §4.D "References". `views` is every indexed view's current
/// HTML, searched for tag/attribute occurrences when the cursor sits
/// outside an expression. `class_source`, if given, is the paired
/// view-model's text, used only to locate the defining-file reference.
pub fn find_references(
    html: &str,
    offset: TextSize,
    html_uri: &Uri,
    mappings: &ViewMappings,
    index: &ComponentIndex,
    host: &dyn AnalysisHost,
    views: &[(Uri, String)],
    class_source: Option<&str>,
) -> Vec<ReferenceLocation> {
    let text_len = html.len() as u32;
    if let Some(mapping) = mappings.active_mapping(offset, text_len) {
        let shadow_offset = shadow::forward(mapping, offset);
        return host
            .references(mappings.shadow_uri.as_str(), shadow_offset)
            .into_iter()
            .filter_map(|r| {
                if r.file_path.as_str() == mappings.shadow_uri.as_str() {
                    shadow::inverse(mapping, r.text_span).map(|range| Location {
                        file: html_uri.clone(),
                        range,
                    })
                } else {
                    Some(Location {
                        file: Uri::new(r.file_path.to_string()),
                        range: r.text_span,
                    })
                }
            })
            .collect();
    }

    let Some((name, component)) = tag_or_attribute_at(html, offset, mappings, index) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for (uri, view_html) in views {
        for tag_range in tag_references(view_html, &name) {
            results.push(Location { file: uri.clone(), range: tag_range });
        }
        for attr_range in attribute_references(view_html, &name) {
            results.push(Location { file: uri.clone(), range: attr_range });
        }
    }

    if let (Some(source_file), Some(class_name), Some(src)) = (&component.source_file, &component.class_name, class_source) {
        if let Some(range) = tssrc::class_name_range(src, class_name) {
            results.push(Location {
                file: source_file.clone(),
                range,
            });
        }
    }

    results
}

fn tag_or_attribute_at(
    html: &str,
    offset: TextSize,
    mappings: &ViewMappings,
    index: &ComponentIndex,
) -> Option<(SmolStr, ComponentInfo)> {
    for tag in &mappings.element_tag_ranges {
        if start_tag_name_range(tag).contains_inclusive(offset) {
            let component = index.get(&tag.name)?;
            return Some((component.canonical_name.clone(), component));
        }
        if let Some(end_tag_range) = tag.end_tag_range {
            if end_tag_name_range(end_tag_range, tag.name.len()).contains_inclusive(offset) {
                let component = index.get(&tag.name)?;
                return Some((component.canonical_name.clone(), component));
            }
        }
    }
    for mapping in &mappings.mappings {
        let value_start = usize::from(mapping.expression.html_span.start());
        let name_range = attribute_name_range(html, value_start)?;
        if name_range.contains_inclusive(offset) {
            let element_tag = mapping.expression.element_tag.as_deref()?;
            let component = index.get(element_tag)?;
            return Some((component.canonical_name.clone(), component));
        }
    }
    None
}

/// Byte ranges of every `<name` / `</name` tag-name occurrence in `html`,
/// bounded so `my-input` does not match inside `my-input-group`.
pub(super) fn tag_references(html: &str, name: &str) -> Vec<ByteRange> {
    let mut results = Vec::new();
    let open_needle = format!("<{name}");
    let close_needle = format!("</{name}");

    let mut i = 0;
    while let Some(pos) = html[i..].find(&close_needle) {
        let start = i + pos + 2;
        let end = start + name.len();
        if name_boundary(html, end) {
            results.push(range(start, end));
        }
        i = start + name.len();
    }

    i = 0;
    while let Some(pos) = html[i..].find(&open_needle) {
        let start = i + pos + 1;
        let end = start + name.len();
        if name_boundary(html, end) {
            results.push(range(start, end));
        }
        i = start + name.len();
    }

    results.sort_by_key(|r| r.start());
    results
}

fn name_boundary(html: &str, end: usize) -> bool {
    match html.as_bytes().get(end) {
        None => true,
        Some(b) => !(b.is_ascii_alphanumeric() || *b == b'-'),
    }
}

/// Byte ranges of attribute names equal to `name`, or starting with
/// `name + '.'` (excluding `.ref`), per `spec.md` §4.D "References".
fn attribute_references(html: &str, name: &str) -> Vec<ByteRange> {
    let mut results = Vec::new();
    let bytes = html.as_bytes();
    let mut i = 0;

    while let Some(rel) = html[i..].find(name) {
        let start = i + rel;
        let end = start + name.len();
        let preceded_by_ws = start > 0 && bytes[start - 1].is_ascii_whitespace();
        i = end;

        if !preceded_by_ws {
            continue;
        }

        match bytes.get(end) {
            None | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'=') | Some(b'>') => {
                results.push(range(start, end));
            }
            Some(b'.') => {
                let after = &html[end + 1..];
                let command_end = after.find(|c: char| c.is_whitespace() || c == '=' || c == '>').unwrap_or(after.len());
                if &after[..command_end] != "ref" {
                    results.push(range(start, end));
                }
            }
            _ => {}
        }
    }

    results
}
