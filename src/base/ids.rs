//! Interned identifiers.
//!
//! Mirrors the teacher's `FileId` newtype: a small `Copy` handle that stands
//! in for a path so registries can use it as a map key instead of cloning
//! strings everywhere.

use smol_str::SmolStr;
use std::fmt;

/// Identifies a view-model source file (paired with a view by convention,
/// see `spec.md` §4.B rule 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl FileId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

/// Identifies a `ViewDocument` (an HTML view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u32);

impl ViewId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewId({})", self.0)
    }
}

/// A stable identifier for a document, as `spec.md` §3 requires
/// (`ViewDocument. An HTML source identified by a stable URI.`).
///
/// Kept as an interned string rather than a parsed URL type: every
/// collaborator in §6 (the Analysis Host, the file-system layer) is
/// specified purely in terms of opaque path/URI strings, so there is
/// nothing to gain from parsing structure this crate never inspects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uri(SmolStr);

impl Uri {
    pub fn new(raw: impl Into<SmolStr>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The shadow URI for this view, per `spec.md` §4.C
    /// ("the view's URI with `.virtual.ts` appended").
    pub fn shadow_uri(&self) -> Uri {
        Uri(SmolStr::new(format!("{}.virtual.ts", self.0)))
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
