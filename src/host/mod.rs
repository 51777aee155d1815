//! The Analysis Host collaborator: its trait, DTOs, and the virtual-file
//! snapshot layer the core feeds it through (`spec.md` §6).

mod analysis_host;
mod dto;
mod snapshot;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use analysis_host::AnalysisHost;
pub use dto::{
    CodeFix, DefinitionInfo, DiagnosticSeverity, FileSnapshot, HostCompletionItem, HostDiagnostic,
    PropertyType, QuickInfo, ReferenceEntry, RenameLocation, SemanticClassification, SignatureHelp,
    SymbolClass, TextEdit, TokenKind,
};
pub use snapshot::VirtualFileLayer;
