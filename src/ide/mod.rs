//! The Feature Translation Layer (`spec.md` §4.D, Component D).
//!
//! Every feature below is a free function over an explicit snapshot
//! (HTML text, cursor offset, `ViewMappings`, `ComponentIndex`, and the
//! `AnalysisHost`) rather than a method on a stateful service object,
//! mirroring the teacher's `ide::` module shape. Each one re-derives its
//! answer through the mapping algebra in [`crate::shadow`]; none of them
//! hold state of their own, so there is nothing here to keep in sync with
//! the registries the Server Core owns.

mod code_actions;
mod completion;
mod diagnostics;
mod document_links;
mod goto;
mod hover;
mod references;
mod rename;
mod semantic_tokens;
mod signature_help;
mod symbols;

pub use code_actions::{code_actions, CodeAction};
pub use completion::{completions, CompletionItem, CompletionKind};
pub use diagnostics::{diagnostics, Diagnostic};
pub use document_links::{document_links, DocumentLink};
pub use goto::{goto_definition, DefinitionTarget};
pub use hover::{hover, HoverResult};
pub use references::{find_references, ReferenceLocation};
pub use rename::{apply_rename, prepare_rename, RenameEdit, RenameTarget};
pub use semantic_tokens::{semantic_tokens, SemanticToken};
pub use signature_help::signature_help;
pub use symbols::{document_symbols, workspace_symbols, SymbolInfo};

use crate::base::{range, ByteRange, Uri};
use crate::model::ElementTagRange;

/// A byte range inside a named file. Most features here answer in terms
/// of this rather than a bare `ByteRange`, since a result can point into
/// the view's own HTML, its paired view-model file, or an unrelated
/// source file (`spec.md` §4.D "References").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: Uri,
    pub range: ByteRange,
}

/// The byte range of an element's start-tag name, e.g. the `my-input` in
/// `<my-input ...>` (`spec.md` §4.D hover/goto "on a tag or attribute").
pub(crate) fn start_tag_name_range(tag: &ElementTagRange) -> ByteRange {
    let start = usize::from(tag.start_tag_range.start()) + 1;
    range(start, start + tag.name.len())
}

/// The byte range of an element's end-tag name, e.g. the `my-input` in
/// `</my-input>`.
pub(crate) fn end_tag_name_range(end_tag_range: ByteRange, name_len: usize) -> ByteRange {
    let start = usize::from(end_tag_range.start()) + 2;
    range(start, start + name_len)
}

/// Walks backward from a binding's value range (already stripped of
/// quotes, per `spec.md` §3) to find the attribute name that owns it:
/// `name`, optional whitespace, `=`, optional whitespace, the opening
/// quote. Returns `None` if the text immediately before `value_start`
/// doesn't look like an attribute assignment (defensive against a
/// degraded parse, `spec.md` §7 error kind 2).
pub(crate) fn attribute_name_range(html: &str, value_start: usize) -> Option<ByteRange> {
    let bytes = html.as_bytes();
    let mut i = value_start;
    if i > 0 && matches!(bytes[i - 1], b'"' | b'\'') {
        i -= 1;
    }
    while i > 0 && bytes[i - 1].is_ascii_whitespace() {
        i -= 1;
    }
    if i == 0 || bytes[i - 1] != b'=' {
        return None;
    }
    i -= 1;
    while i > 0 && bytes[i - 1].is_ascii_whitespace() {
        i -= 1;
    }
    let name_end = i;
    while i > 0 {
        let c = bytes[i - 1];
        if c.is_ascii_alphanumeric() || c == b'-' || c == b'.' || c == b':' {
            i -= 1;
        } else {
            break;
        }
    }
    if i == name_end {
        None
    } else {
        Some(range(i, name_end))
    }
}

/// Whether a host-reported name is an artifact of the shadow surface
/// itself rather than something a user should see (`spec.md` §4.D
/// "Completion": "filter out shadow artifacts").
pub(crate) fn is_shadow_artifact(name: &str) -> bool {
    name.starts_with("___expr_") || name == "_this" || name == "__filename" || name == "__dirname"
}
