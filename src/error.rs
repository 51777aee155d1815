//! Crate-level error type (SPEC_FULL.md §A.3).
//!
//! Per `spec.md` §7, no error here is fatal or promoted past the local
//! request/file: every `ide::` feature and registry method still returns
//! an empty result or `None` on failure. This enum exists for callers
//! (tests, an embedding server's own diagnostic log) that want to know
//! *why* a result came back empty rather than just that it did.

use thiserror::Error;

/// Errors surfaced alongside (never instead of) the empty-result
/// contract of `spec.md` §4.D/§7.
#[derive(Debug, Error)]
pub enum Error {
    /// A view's HTML has no paired view-model class (`spec.md` §7 kind 1).
    #[error("view {uri} has no paired view-model class")]
    MissingViewModelClass { uri: String },

    /// A `Mapping`/`Transformation` invariant did not hold for a produced
    /// range (`spec.md` §7 kind 6).
    #[error("invalid mapping range: {message}")]
    InvalidMappingRange { message: String },

    /// A component name collided with one already in the index
    /// (`spec.md` §7 kind 4); the first writer won and this entrant was
    /// skipped.
    #[error("component name collision: {name} already defined in {existing_uri}")]
    ComponentNameCollision { name: String, existing_uri: String },

    /// A configuration value did not deserialize into `Options`.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// File-system I/O failed for a single file during a project scan
    /// (`spec.md` §7 kind 5); the scan continues past this entry.
    #[error("I/O error reading {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },
}

impl Error {
    pub fn invalid_mapping_range(message: impl Into<String>) -> Self {
        Self::InvalidMappingRange { message: message.into() }
    }

    pub fn component_name_collision(name: impl Into<String>, existing_uri: impl Into<String>) -> Self {
        Self::ComponentNameCollision { name: name.into(), existing_uri: existing_uri.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
