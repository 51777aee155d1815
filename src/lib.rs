//! # aurelia-shadow-core
//!
//! Virtual shadow document engine, bidirectional offset mapping, component
//! index, and feature translation layer for an Aurelia-style view language
//! server.
//!
//! ## Module structure (dependency order)
//!
//! ```text
//! ide       → Feature Translation Layer (completion, hover, goto-def, ...)
//!   ↓
//! shadow    → Shadow synthesis and the mapping algebra
//!   ↓
//! host      → Analysis Host collaborator trait, DTOs, virtual-file layer
//!   ↓
//! index     → Component Index registry
//!   ↓
//! tssrc     → TypeScript-like source scanning (component discovery)
//!   ↓
//! html      → HTML expression extraction and the attribute classifier
//!   ↓
//! model     → Expression, Mapping, ComponentInfo, ViewDocument, ...
//!   ↓
//! base      → Primitives (FileId, Uri, ByteRange, LineIndex)
//! ```

/// Foundation types: FileId, ViewId, Uri, ByteRange, LineIndex
pub mod base;

/// The data model: Expression, Mapping, ComponentInfo, ViewDocument, ...
pub mod model;

/// Component A: HTML expression extraction and the attribute classifier
pub mod html;

/// TypeScript-like source scanning for component discovery (Component B)
pub mod tssrc;

/// Component B: the Component Index registry
pub mod index;

/// The Analysis Host collaborator trait, DTOs, and virtual-file layer
pub mod host;

/// Component C: the shadow TypeScript surface and the mapping algebra
pub mod shadow;

/// Component D: the Feature Translation Layer (completion, hover,
/// goto-definition, find-references, rename, diagnostics, code actions,
/// signature help, semantic tokens, document links, symbols)
pub mod ide;

/// The single structured options value (`spec.md` §6)
pub mod config;

/// Crate-level error type, surfaced alongside the empty-result contract
pub mod error;

// Re-export foundation types
pub use base::{ByteRange, FileId, LineCol, LineIndex, TextRange, TextSize, Uri, ViewId};
pub use config::Options;
pub use error::{Error, Result};
