//! Component B — the Component Index (`spec.md` §4.B).

mod registry;

pub use registry::{ComponentIndex, IndexDiff};
