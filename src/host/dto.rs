//! Data transfer types exchanged with the Analysis Host (`spec.md` §6).
//!
//! These are the core's own types — never the host implementation's
//! native ones — so the Feature Translation Layer in [`crate::ide`] never
//! depends on a specific host's representation, matching the teacher's
//! "no LSP types" rule in `ide/mod.rs` applied one layer further down.

use crate::base::ByteRange;
use smol_str::SmolStr;

/// The host's view of a file's content and version, used both as an
/// input (the virtual-file snapshot layer feeds this to the host) and an
/// output (the host reports spans scoped to one of these).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSnapshot {
    pub text: SmolStr,
    pub version: u64,
}

/// A single completion suggestion, as reported by the host for an
/// expression position. Sort key ordering is defined by the host; the
/// translation layer only reorders for the view-model-membership rule in
/// §4.D.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCompletionItem {
    pub name: SmolStr,
    pub sort_key: SmolStr,
    pub kind: SymbolClass,
    pub is_keyword: bool,
    pub insert_text: Option<SmolStr>,
}

/// Coarse symbol classification, used by §4.D's completion filter ("entries
/// classed as module/class/interface/type/enum").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Variable,
    Property,
    Method,
    Function,
    Class,
    Interface,
    Module,
    Type,
    Enum,
    Other,
}

/// Quick info at a position (`spec.md` §6 "quick info with displayParts
/// and optional documentation").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickInfo {
    pub display_parts: SmolStr,
    pub documentation: Option<SmolStr>,
    pub text_span: ByteRange,
}

/// One definition target (`spec.md` §6 "definition info with target
/// textSpan/contextSpan").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionInfo {
    pub file_path: SmolStr,
    pub text_span: ByteRange,
    pub context_span: Option<ByteRange>,
    pub is_standard_library: bool,
}

/// One reference location (`spec.md` §6 "references ... fileName+textSpan").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub file_path: SmolStr,
    pub text_span: ByteRange,
}

/// A location the host considers part of a rename operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameLocation {
    pub file_path: SmolStr,
    pub text_span: ByteRange,
}

/// A single code fix returned for a span and set of error codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFix {
    pub description: SmolStr,
    pub file_path: SmolStr,
    pub edits: Vec<TextEdit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: ByteRange,
    pub new_text: SmolStr,
}

/// Signature help for a call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHelp {
    pub signatures: Vec<SmolStr>,
    pub active_signature: u32,
    pub active_parameter: u32,
}

/// A span reclassified with a fixed semantic-token legend kind
/// (`spec.md` §4.D "Semantic tokens").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Method,
    Function,
    Property,
    Variable,
    Parameter,
    Class,
    Type,
    Keyword,
    Operator,
    Punctuation,
    AureliaElement,
    AureliaAttribute,
}

impl TokenKind {
    /// Lower index = higher priority, per §4.D "emit the highest-priority
    /// kind (lowest legend index) seen for that HTML range".
    pub fn legend_index(self) -> u8 {
        match self {
            TokenKind::Method => 0,
            TokenKind::Function => 1,
            TokenKind::Property => 2,
            TokenKind::Variable => 3,
            TokenKind::Parameter => 4,
            TokenKind::Class => 5,
            TokenKind::Type => 6,
            TokenKind::Keyword => 7,
            TokenKind::Operator => 8,
            TokenKind::Punctuation => 9,
            TokenKind::AureliaElement => 10,
            TokenKind::AureliaAttribute => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticClassification {
    pub span: ByteRange,
    pub kind: TokenKind,
}

/// A diagnostic reported by the host over the shadow, or synthesised by
/// the bindable-type assignability check in §4.D.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDiagnostic {
    pub span: ByteRange,
    pub message: SmolStr,
    pub severity: DiagnosticSeverity,
    pub code: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

/// A class property's declared type, for the bindable-type assignability
/// check (`spec.md` §4.D "Diagnostics").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyType {
    pub property_name: SmolStr,
    pub type_name: SmolStr,
}
