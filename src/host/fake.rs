//! An in-memory [`AnalysisHost`] double for unit and integration tests.
//! Only compiled under `#[cfg(test)]` or the `test-support` feature —
//! this crate ships no host implementation, per `spec.md` §1.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{ByteRange, TextSize};
use crate::host::analysis_host::AnalysisHost;
use crate::host::dto::{
    CodeFix, DefinitionInfo, FileSnapshot, HostCompletionItem, HostDiagnostic, PropertyType,
    QuickInfo, ReferenceEntry, RenameLocation, SemanticClassification, SignatureHelp,
};

/// A scriptable host: tests populate the fields they care about and
/// leave the rest empty, matching the teacher's preference for small
/// hand-built fixtures over a mocking framework.
#[derive(Default)]
pub struct FakeAnalysisHost {
    pub view_model_members: FxHashMap<SmolStr, Vec<SmolStr>>,
    pub class_properties: FxHashMap<SmolStr, Vec<PropertyType>>,
    pub completions: Vec<HostCompletionItem>,
    pub quick_info: Option<QuickInfo>,
    pub definitions: Vec<DefinitionInfo>,
    pub references: Vec<ReferenceEntry>,
    pub renameable: bool,
    pub rename_locations: Vec<RenameLocation>,
    pub code_fixes: Vec<CodeFix>,
    pub signature_help: Option<SignatureHelp>,
    pub semantic_classifications: Vec<SemanticClassification>,
    pub semantic_diagnostics: Vec<HostDiagnostic>,
    pub syntactic_diagnostics: Vec<HostDiagnostic>,
    pub assignable_pairs: Vec<(SmolStr, SmolStr)>,
    pub types_at: FxHashMap<u32, SmolStr>,
}

impl AnalysisHost for FakeAnalysisHost {
    fn snapshot(&self, _path: &str) -> Option<FileSnapshot> {
        None
    }

    fn completions(&self, _path: &str, _offset: TextSize) -> Vec<HostCompletionItem> {
        self.completions.clone()
    }

    fn quick_info(&self, _path: &str, _offset: TextSize) -> Option<QuickInfo> {
        self.quick_info.clone()
    }

    fn definitions(&self, _path: &str, _offset: TextSize) -> Vec<DefinitionInfo> {
        self.definitions.clone()
    }

    fn references(&self, _path: &str, _offset: TextSize) -> Vec<ReferenceEntry> {
        self.references.clone()
    }

    fn can_rename(&self, _path: &str, _offset: TextSize) -> bool {
        self.renameable
    }

    fn rename_locations(&self, _path: &str, _offset: TextSize) -> Vec<RenameLocation> {
        self.rename_locations.clone()
    }

    fn code_fixes(&self, _path: &str, _span: ByteRange, _error_codes: &[u32]) -> Vec<CodeFix> {
        self.code_fixes.clone()
    }

    fn signature_help(&self, _path: &str, _offset: TextSize) -> Option<SignatureHelp> {
        self.signature_help.clone()
    }

    fn semantic_classifications(&self, _path: &str, _span: ByteRange) -> Vec<SemanticClassification> {
        self.semantic_classifications.clone()
    }

    fn semantic_diagnostics(&self, _path: &str) -> Vec<HostDiagnostic> {
        self.semantic_diagnostics.clone()
    }

    fn syntactic_diagnostics(&self, _path: &str) -> Vec<HostDiagnostic> {
        self.syntactic_diagnostics.clone()
    }

    fn class_properties(&self, _path: &str, class_name: &str) -> Vec<PropertyType> {
        self.class_properties.get(class_name).cloned().unwrap_or_default()
    }

    fn type_at(&self, _path: &str, offset: TextSize) -> Option<SmolStr> {
        self.types_at.get(&u32::from(offset)).cloned()
    }

    fn is_assignable(&self, source_type: &str, target_type: &str) -> bool {
        self.assignable_pairs
            .iter()
            .any(|(s, t)| s == source_type && t == target_type)
    }

    fn view_model_members(&self, path: &str) -> Vec<SmolStr> {
        self.view_model_members.get(path).cloned().unwrap_or_default()
    }
}
