//! The virtual-file snapshot layer (`spec.md` §6):
//!
//! > for each path, the core returns an open-editor snapshot, else the
//! > shadow buffer, else the on-disk content. Versioning uses the
//! > open-editor version for open files, the `shadowVersion` for shadows,
//! > and a file-watcher-backed monotonically increasing version for disk
//! > files.
//!
//! This is the core's side of feeding the host, mirrored after the
//! teacher's own single-owner-of-mutable-state pattern
//! (`ide::AnalysisHost`): one `RwLock`-guarded struct that every feature
//! handler reads, written only by editor-open/change/close and disk
//! file-watcher events.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::Uri;
use crate::host::dto::FileSnapshot;

#[derive(Default)]
struct State {
    open_editors: FxHashMap<Uri, FileSnapshot>,
    disk_versions: FxHashMap<Uri, u64>,
}

/// Resolves a path to the snapshot the host should see, in priority
/// order: open editor, shadow buffer, on-disk content.
#[derive(Default)]
pub struct VirtualFileLayer {
    state: RwLock<State>,
}

impl VirtualFileLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) an open-editor buffer at `version`.
    pub fn open_editor(&self, uri: Uri, text: SmolStr, version: u64) {
        self.state
            .write()
            .open_editors
            .insert(uri, FileSnapshot { text, version });
    }

    pub fn close_editor(&self, uri: &Uri) {
        self.state.write().open_editors.remove(uri);
    }

    /// Called by the embedder's file watcher on a disk change to a path
    /// not currently open in an editor.
    pub fn notify_disk_change(&self, uri: Uri) {
        let mut state = self.state.write();
        *state.disk_versions.entry(uri).or_insert(0) += 1;
    }

    /// Resolves a snapshot for `uri`. `shadow` is supplied lazily by the
    /// caller (the shadow synthesiser owns shadow buffers; this layer
    /// does not) so this module has no dependency on [`crate::model`].
    pub fn resolve(
        &self,
        uri: &Uri,
        shadow: impl FnOnce() -> Option<(SmolStr, u64)>,
        disk_read: impl FnOnce() -> Option<SmolStr>,
    ) -> Option<FileSnapshot> {
        let state = self.state.read();
        if let Some(snapshot) = state.open_editors.get(uri) {
            return Some(snapshot.clone());
        }
        drop(state);

        if let Some((text, shadow_version)) = shadow() {
            return Some(FileSnapshot {
                text,
                version: shadow_version,
            });
        }

        let text = disk_read()?;
        let version = {
            let mut state = self.state.write();
            let entry = state.disk_versions.entry(uri.clone()).or_insert(0);
            if *entry == 0 {
                *entry = 1;
            }
            *entry
        };
        Some(FileSnapshot { text, version })
    }
}
