//! Rename, prepare and apply (`spec.md` §4.D "Rename (prepare + apply)").

use smol_str::SmolStr;

use crate::base::{range, ByteRange, TextSize, Uri};
use crate::host::{AnalysisHost, TextEdit};
use crate::ide::references::tag_references;
use crate::ide::{end_tag_name_range, start_tag_name_range};
use crate::index::ComponentIndex;
use crate::model::{ComponentKind, ViewMappings};
use crate::{shadow, tssrc};

/// What the cursor resolved to, and the range a client should highlight
/// while the user types a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameTarget {
    /// A custom-element/-attribute tag name (`spec.md` §4.D targets 1/2).
    Tag { range: ByteRange, canonical_name: SmolStr },
    /// An expression symbol the host reports as renameable (target 3).
    ExpressionSymbol { range: ByteRange },
}

impl RenameTarget {
    pub fn range(&self) -> ByteRange {
        match self {
            RenameTarget::Tag { range, .. } => *range,
            RenameTarget::ExpressionSymbol { range } => *range,
        }
    }
}

/// A file's worth of edits, already sorted by descending start offset so
/// applying them in order never invalidates a later edit's span
/// (`spec.md` §4.D "Rename": "sorted by descending start offset").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEdit {
    pub file: Uri,
    pub edits: Vec<TextEdit>,
}

pub fn prepare_rename(
    html: &str,
    offset: TextSize,
    mappings: &ViewMappings,
    index: &ComponentIndex,
    host: &dyn AnalysisHost,
) -> Option<RenameTarget> {
    for tag in &mappings.element_tag_ranges {
        let name_range = start_tag_name_range(tag);
        if name_range.contains_inclusive(offset) {
            index.get(&tag.name)?;
            return Some(RenameTarget::Tag { range: name_range, canonical_name: tag.name.clone() });
        }
        if let Some(end_tag_range) = tag.end_tag_range {
            let end_name_range = end_tag_name_range(end_tag_range, tag.name.len());
            if end_name_range.contains_inclusive(offset) {
                index.get(&tag.name)?;
                return Some(RenameTarget::Tag { range: end_name_range, canonical_name: tag.name.clone() });
            }
        }
    }

    let text_len = html.len() as u32;
    let mapping = mappings.active_mapping(offset, text_len)?;
    let shadow_offset = shadow::forward(mapping, offset);
    if !host.can_rename(mappings.shadow_uri.as_str(), shadow_offset) {
        return None;
    }
    let own_location = host
        .rename_locations(mappings.shadow_uri.as_str(), shadow_offset)
        .into_iter()
        .find(|l| l.file_path.as_str() == mappings.shadow_uri.as_str() && l.text_span.contains_inclusive(shadow_offset))?;
    let html_range = shadow::inverse(mapping, own_location.text_span)?;
    Some(RenameTarget::ExpressionSymbol { range: html_range })
}

/// `views`/`class_sources` are every indexed view's current HTML and
/// every component's current paired source, keyed by `Uri` — this crate
/// never reads the filesystem itself.
pub fn apply_rename(
    html: &str,
    offset: TextSize,
    html_uri: &Uri,
    mappings: &ViewMappings,
    index: &ComponentIndex,
    host: &dyn AnalysisHost,
    new_name: &str,
    views: &[(Uri, String)],
    class_sources: &[(Uri, String)],
) -> Vec<RenameEdit> {
    for tag in &mappings.element_tag_ranges {
        let on_start = start_tag_name_range(tag).contains_inclusive(offset);
        let on_end = tag
            .end_tag_range
            .is_some_and(|r| end_tag_name_range(r, tag.name.len()).contains_inclusive(offset));
        if on_start || on_end {
            return rename_tag(index, &tag.name, new_name, views, class_sources);
        }
    }

    let Some(mapping) = mappings.active_mapping(offset, html.len() as u32) else {
        return Vec::new();
    };
    let shadow_offset = shadow::forward(mapping, offset);
    let mut by_file: Vec<RenameEdit> = Vec::new();
    for location in host.rename_locations(mappings.shadow_uri.as_str(), shadow_offset) {
        let (file, span) = if location.file_path.as_str() == mappings.shadow_uri.as_str() {
            let Some(html_span) = shadow::inverse(mapping, location.text_span) else {
                continue;
            };
            (html_uri.clone(), html_span)
        } else {
            (Uri::new(location.file_path.to_string()), location.text_span)
        };
        push_edit(&mut by_file, file, TextEdit { span, new_text: SmolStr::new(new_name) });
    }
    for group in &mut by_file {
        group.edits.sort_by(|a, b| b.span.start().cmp(&a.span.start()));
    }
    by_file
}

fn push_edit(by_file: &mut Vec<RenameEdit>, file: Uri, edit: TextEdit) {
    if let Some(group) = by_file.iter_mut().find(|g| g.file == file) {
        group.edits.push(edit);
    } else {
        by_file.push(RenameEdit { file, edits: vec![edit] });
    }
}

fn rename_tag(
    index: &ComponentIndex,
    canonical_name: &str,
    new_name: &str,
    views: &[(Uri, String)],
    class_sources: &[(Uri, String)],
) -> Vec<RenameEdit> {
    let mut results = Vec::new();

    for (uri, view_html) in views {
        let mut edits: Vec<TextEdit> = tag_references(view_html, canonical_name)
            .into_iter()
            .map(|span| TextEdit { span, new_text: SmolStr::new(new_name) })
            .collect();
        if edits.is_empty() {
            continue;
        }
        edits.sort_by(|a, b| b.span.start().cmp(&a.span.start()));
        results.push(RenameEdit { file: uri.clone(), edits });
    }

    let Some(component) = index.get(canonical_name) else {
        return results;
    };
    let (Some(class_name), Some(source_file)) = (&component.class_name, &component.source_file) else {
        return results;
    };
    let Some((_, src)) = class_sources.iter().find(|(uri, _)| uri == source_file) else {
        return results;
    };

    let mut class_edits = Vec::new();
    if let Some(literal_range) = tssrc::decorator_name_literal_range(src, class_name) {
        class_edits.push(TextEdit { span: literal_range, new_text: SmolStr::new(new_name) });
    } else {
        let decorator_name = match component.kind {
            ComponentKind::Attribute => "customAttribute",
            ComponentKind::ValueConverter => "valueConverter",
            ComponentKind::Element => "customElement",
        };
        if let Some(insert_at) = class_declaration_insertion_point(src, class_name) {
            class_edits.push(TextEdit {
                span: range(insert_at, insert_at),
                new_text: SmolStr::new(format!("@{decorator_name}('{new_name}')\n")),
            });
        }
        if !has_decorator_import(src, decorator_name) {
            class_edits.push(TextEdit {
                span: range(0, 0),
                new_text: SmolStr::new(format!("import {{ {decorator_name} }} from 'aurelia';\n")),
            });
        }
    }

    if !class_edits.is_empty() {
        class_edits.sort_by(|a, b| b.span.start().cmp(&a.span.start()));
        results.push(RenameEdit { file: source_file.clone(), edits: class_edits });
    }

    results
}

/// The byte offset right before a class declaration (skipping a leading
/// `export`/`export default`), where a missing decorator gets inserted.
fn class_declaration_insertion_point(source: &str, class_name: &str) -> Option<usize> {
    let needle = format!("class {class_name}");
    let class_start = source.find(&needle)?;
    let before = &source[..class_start];
    if let Some(stripped) = before.strip_suffix("export default ") {
        Some(stripped.len())
    } else if let Some(stripped) = before.strip_suffix("export ") {
        Some(stripped.len())
    } else {
        Some(class_start)
    }
}

fn has_decorator_import(source: &str, decorator_name: &str) -> bool {
    source
        .lines()
        .take_while(|line| !line.trim_start().starts_with("export") && !line.trim_start().starts_with("class"))
        .any(|line| line.contains("import") && line.contains(decorator_name))
}
