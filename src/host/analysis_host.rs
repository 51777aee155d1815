//! The Analysis Host collaborator trait (`spec.md` §6).
//!
//! > A typed language server for a TypeScript-like surface, offering, by
//! > (fsPath, offset[, span]): snapshot source text and version,
//! > completions with sort keys, quick info..., definition info...,
//! > references..., rename locations and renameability check, code fixes
//! > at a span given error codes, signature help, encoded semantic
//! > classifications over a span, semantic + syntactic diagnostics, a
//! > type-checker...
//!
//! Per `spec.md` §1 ("Both are abstractions; their implementations are
//! unspecified here"), this crate never implements the trait itself —
//! only [`crate::ide`] (the Feature Translation Layer) calls it, against
//! whatever concrete host an embedder plugs in. Mirrors the teacher's
//! `ide::AnalysisHost` in spirit (a single state owner queried through
//! one interface) though here that state owner lives outside this crate.

use crate::base::{ByteRange, TextSize};
use crate::host::dto::{
    CodeFix, DefinitionInfo, FileSnapshot, HostCompletionItem, HostDiagnostic, PropertyType,
    QuickInfo, ReferenceEntry, RenameLocation, SemanticClassification, SignatureHelp,
};

/// Everything the Feature Translation Layer needs from a type-aware
/// backing language service, addressed by `(path, offset[, span])`.
///
/// Per §7 error kind 3 ("Host unavailable / threw"), every method returns
/// an `Option`/empty `Vec` rather than a `Result`: a host failure here is
/// not this crate's error to propagate, it collapses to an empty result
/// at the call site.
pub trait AnalysisHost {
    /// The host's current snapshot of `path`, if it knows about it.
    fn snapshot(&self, path: &str) -> Option<FileSnapshot>;

    fn completions(&self, path: &str, offset: TextSize) -> Vec<HostCompletionItem>;

    fn quick_info(&self, path: &str, offset: TextSize) -> Option<QuickInfo>;

    fn definitions(&self, path: &str, offset: TextSize) -> Vec<DefinitionInfo>;

    fn references(&self, path: &str, offset: TextSize) -> Vec<ReferenceEntry>;

    /// Whether the symbol at `offset` can be renamed at all.
    fn can_rename(&self, path: &str, offset: TextSize) -> bool;

    fn rename_locations(&self, path: &str, offset: TextSize) -> Vec<RenameLocation>;

    fn code_fixes(&self, path: &str, span: ByteRange, error_codes: &[u32]) -> Vec<CodeFix>;

    fn signature_help(&self, path: &str, offset: TextSize) -> Option<SignatureHelp>;

    fn semantic_classifications(&self, path: &str, span: ByteRange) -> Vec<SemanticClassification>;

    fn semantic_diagnostics(&self, path: &str) -> Vec<HostDiagnostic>;

    fn syntactic_diagnostics(&self, path: &str) -> Vec<HostDiagnostic>;

    /// Type-checker capability (a): list properties of a class type.
    fn class_properties(&self, path: &str, class_name: &str) -> Vec<PropertyType>;

    /// Type-checker capability (b): the type at a node.
    fn type_at(&self, path: &str, offset: TextSize) -> Option<smol_str::SmolStr>;

    /// Type-checker capability (c): test assignability between two named
    /// types, used by the bindable-type diagnostic (§4.D).
    fn is_assignable(&self, source_type: &str, target_type: &str) -> bool;

    /// The view-model's exported member names, used by the shadow
    /// synthesiser's identifier-rewrite rule (§4.C "known view-model
    /// member"). Implemented here (rather than derived from
    /// `class_properties`) since the synthesiser needs just names, not
    /// full property-type pairs, and a host may answer this more cheaply.
    fn view_model_members(&self, path: &str) -> Vec<smol_str::SmolStr>;
}
