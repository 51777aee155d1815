//! Document links (SPEC_FULL.md §B.1, additive to `spec.md` §4.D).

use crate::base::{range, ByteRange, Uri};
use crate::index::ComponentIndex;
use crate::model::{ComponentKind, ViewMappings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink {
    pub range: ByteRange,
    pub target: Uri,
}

/// A binding/interpolation's pipe target, when it resolves to a known
/// value converter, links to the converter's defining source file.
pub fn document_links(mappings: &ViewMappings, index: &ComponentIndex) -> Vec<DocumentLink> {
    let mut links = Vec::new();
    for mapping in &mappings.mappings {
        let (_, suffix) = mapping.expression.split_pipe();
        let Some(suffix) = suffix else { continue };
        let name = suffix.trim_start_matches('|').split(':').next().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let Some(component) = index.get(name) else { continue };
        if component.kind != ComponentKind::ValueConverter {
            continue;
        }
        let Some(source_file) = &component.source_file else { continue };
        let Some(rel) = mapping.expression.text.find(name) else { continue };
        let start = usize::from(mapping.expression.html_span.start()) + rel;
        links.push(DocumentLink {
            range: range(start, start + name.len()),
            target: source_file.clone(),
        });
    }
    links
}
