//! `ViewDocument` / `ViewMappings` / the view life-cycle state machine
//! (`spec.md` §3 and §4.E).

use crate::base::{ByteRange, LineIndex, Uri, ViewId};
use crate::model::{ElementTagRange, Mapping};
use smol_str::SmolStr;

/// `spec.md` §4.E: `Unknown -> Registered -> Fresh -> Stale -> Fresh -> ... -> Gone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Registered,
    Fresh,
    Stale,
    Gone,
}

/// An HTML source identified by a stable URI, owning its raw text, line
/// index, and (once synthesised) its `ViewMappings`.
#[derive(Debug, Clone)]
pub struct ViewDocument {
    pub id: ViewId,
    pub uri: Uri,
    pub text: String,
    pub line_index: LineIndex,
    pub state: ViewState,
    pub mappings: Option<ViewMappings>,
}

impl ViewDocument {
    pub fn new(id: ViewId, uri: Uri, text: String) -> Self {
        let line_index = LineIndex::new(&text);
        Self {
            id,
            uri,
            text,
            line_index,
            state: ViewState::Registered,
            mappings: None,
        }
    }

    /// `Fresh -> Stale` on HTML text change (`spec.md` §4.E). The old
    /// `ViewMappings` is kept around so in-flight requests keep serving
    /// against the last `Fresh` snapshot (§5 "Cancellation & timeouts").
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.line_index = LineIndex::new(&self.text);
        if self.state == ViewState::Fresh {
            self.state = ViewState::Stale;
        }
    }

    /// Atomically replace the stored mappings on a successful synthesise
    /// (`spec.md` §4.C "Version discipline").
    pub fn set_mappings(&mut self, mappings: ViewMappings) {
        self.mappings = Some(mappings);
        self.state = ViewState::Fresh;
    }

    pub fn mark_gone(&mut self) {
        self.state = ViewState::Gone;
        self.mappings = None;
    }
}

/// The per-view synthesis output: the shadow text, the mappings, and the
/// recorded element-tag ranges, replaced atomically on every
/// (re)synthesis (`spec.md` §3, §4.C).
#[derive(Debug, Clone)]
pub struct ViewMappings {
    pub shadow_uri: Uri,
    pub shadow_version: u64,
    pub shadow_text: String,
    pub view_model_class_name: SmolStr,
    pub view_model_fs_path: SmolStr,
    pub mappings: Vec<Mapping>,
    pub element_tag_ranges: Vec<ElementTagRange>,
}

impl ViewMappings {
    /// The mapping whose check-range contains the given HTML offset, the
    /// "active mapping" lookup every feature in §4.D starts from.
    pub fn active_mapping(&self, html_offset: text_size::TextSize, text_len: u32) -> Option<&Mapping> {
        self.mappings
            .iter()
            .find(|m| m.check_range(text_len).contains(html_offset))
    }

    /// The mapping whose check-range contains `html_range` as a whole
    /// (used by code actions, which forward an HTML *range*, not a point).
    pub fn mapping_covering(&self, html_range: ByteRange, text_len: u32) -> Option<&Mapping> {
        self.mappings
            .iter()
            .find(|m| m.check_range(text_len).contains_range(html_range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::range;
    use crate::model::{Expression, Mapping};

    fn sample_mappings() -> ViewMappings {
        let expr = Expression::interpolation("message", range(5, 12));
        let mapping = Mapping::new(expr, range(0, 40), range(30, 37), vec![]);
        ViewMappings {
            shadow_uri: Uri::new("a.html.virtual.ts"),
            shadow_version: 1,
            shadow_text: String::new(),
            view_model_class_name: SmolStr::new("A"),
            view_model_fs_path: SmolStr::new("a.ts"),
            mappings: vec![mapping],
            element_tag_ranges: vec![],
        }
    }

    #[test]
    fn active_mapping_found_inside_span() {
        let vm = sample_mappings();
        let found = vm.active_mapping(text_size::TextSize::new(8), 40);
        assert!(found.is_some());
    }

    #[test]
    fn active_mapping_none_far_outside() {
        let vm = sample_mappings();
        let found = vm.active_mapping(text_size::TextSize::new(25), 40);
        assert!(found.is_none());
    }

    #[test]
    fn view_document_transitions_stale_on_edit() {
        let mut doc = ViewDocument::new(ViewId::new(0), Uri::new("a.html"), "<p></p>".into());
        doc.set_mappings(sample_mappings());
        assert_eq!(doc.state, ViewState::Fresh);
        doc.set_text("<p>x</p>".into());
        assert_eq!(doc.state, ViewState::Stale);
    }
}
