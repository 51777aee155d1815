//! Component A — HTML Expression Extraction (`spec.md` §4.A).
//!
//! - [`classifier`] — the pure attribute classifier (§6).
//! - [`extractor`] — the full-document expression/tag-range scan (§4.A).
//! - [`fragment`] — the cursor-local completion-context parse (§4.D).

pub mod classifier;
pub mod extractor;
pub mod fragment;

pub use classifier::{command_of, is_aurelia_attribute};
pub use extractor::{extract, ExtractionResult};
pub use fragment::{classify as classify_completion_context, CompletionContext};
