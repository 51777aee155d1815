//! Foundation types shared by every layer of the crate.
//!
//! - [`FileId`] / [`ViewId`] — interned identifiers for view-models and views.
//! - [`ByteRange`] — a half-open byte offset range (built on `text-size`).
//! - [`LineIndex`] — line/column conversion for diagnostics surfaces.
//!
//! This module has no dependencies on any other module in the crate.

mod ids;
mod line_index;
mod range;

pub use ids::{FileId, Uri, ViewId};
pub use line_index::{LineCol, LineIndex};
pub use range::{range, clamp_offset, clamp_range, ByteRange};

// Re-export for callers that need to construct raw offsets.
pub use text_size::{TextRange, TextSize};
