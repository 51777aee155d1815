//! The view registry's entry point into the shadow layer: owns the salsa
//! [`RootDatabase`], keeps each view's and view-model's salsa input
//! handle alive across edits (so the teacher's query memoization actually
//! pays off), and enforces `shadowVersion` monotonicity (`spec.md` §4.C
//! "Version discipline": the version only advances when a resynthesis
//! actually produces a new shadow buffer).

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{Uri, ViewId};
use crate::index::ComponentIndex;
use crate::model::ViewMappings;
use crate::shadow::db::{synthesise, view_model_members_from_text, RootDatabase, ShadowResult, ViewModelText, ViewText};

#[derive(Default)]
pub struct ShadowSynthesiser {
    db: RootDatabase,
    view_model_texts: FxHashMap<SmolStr, ViewModelText>,
    view_texts: FxHashMap<ViewId, ViewText>,
    shadow_versions: FxHashMap<ViewId, u64>,
    last_results: FxHashMap<ViewId, Arc<ShadowResult>>,
}

impl ShadowSynthesiser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a view model's current source text in, keyed by its
    /// filesystem path, and returns its scanned member names. Call this
    /// whenever the view model file changes, before [`synthesise_view`]
    /// for any view that depends on it.
    pub fn set_view_model_text(
        &mut self,
        fs_path: SmolStr,
        class_name: SmolStr,
        text: String,
    ) -> Vec<SmolStr> {
        let input = match self.view_model_texts.get(&fs_path).copied() {
            Some(existing) => {
                existing.set_text(&mut self.db).to(text);
                existing.set_class_name(&mut self.db).to(class_name);
                existing
            }
            None => {
                let created = ViewModelText::new(&self.db, class_name, text);
                self.view_model_texts.insert(fs_path, created);
                created
            }
        };
        view_model_members_from_text(&self.db, input)
    }

    /// (Re)synthesises one view's shadow surface and returns the
    /// [`ViewMappings`] the view registry should store for it, with a
    /// `shadow_version` that only advances when the shadow buffer
    /// actually changed. `index` resolves which pipe targets get a
    /// `declare function` line in the shadow preamble.
    pub fn synthesise_view(
        &mut self,
        view_id: ViewId,
        html_uri: &Uri,
        view_model_class_name: SmolStr,
        view_model_fs_path: SmolStr,
        html_text: String,
        members: Vec<SmolStr>,
        index: &ComponentIndex,
    ) -> ViewMappings {
        let view_text = match self.view_texts.get(&view_id).copied() {
            Some(existing) => {
                existing.set_text(&mut self.db).to(html_text);
                existing.set_members(&mut self.db).to(members);
                existing.set_view_model_class_name(&mut self.db).to(view_model_class_name.clone());
                existing.set_view_model_fs_path(&mut self.db).to(view_model_fs_path.clone());
                existing
            }
            None => {
                let created = ViewText::new(
                    &self.db,
                    view_id,
                    view_model_class_name.clone(),
                    view_model_fs_path.clone(),
                    html_text,
                    members,
                );
                self.view_texts.insert(view_id, created);
                created
            }
        };

        let result = synthesise(&self.db, view_text, index);

        let previous = self.last_results.get(&view_id);
        let changed = previous.is_none_or(|p| !Arc::ptr_eq(p, &result));
        let version = if changed {
            let entry = self.shadow_versions.entry(view_id).or_insert(0);
            *entry += 1;
            tracing::debug!(?view_id, version = *entry, "shadow resynthesised, version bumped");
            *entry
        } else {
            *self.shadow_versions.get(&view_id).unwrap_or(&0)
        };
        self.last_results.insert(view_id, Arc::clone(&result));

        ViewMappings {
            shadow_uri: html_uri.shadow_uri(),
            shadow_version: version,
            shadow_text: result.shadow_text.clone(),
            view_model_class_name,
            view_model_fs_path,
            mappings: result.mappings.clone(),
            element_tag_ranges: result.element_tag_ranges.clone(),
        }
    }

    pub fn forget_view(&mut self, view_id: ViewId) {
        self.view_texts.remove(&view_id);
        self.shadow_versions.remove(&view_id);
        self.last_results.remove(&view_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_synthesis_is_version_one() {
        let mut synth = ShadowSynthesiser::new();
        let index = ComponentIndex::new();
        let uri = Uri::new("a.html");
        let vm = synth.synthesise_view(
            ViewId::new(0),
            &uri,
            SmolStr::new("AppViewModel"),
            SmolStr::new("app.ts"),
            "<p>${message}</p>".to_string(),
            vec![SmolStr::new("message")],
            &index,
        );
        assert_eq!(vm.shadow_version, 1);
        assert_eq!(vm.mappings.len(), 1);
    }

    #[test]
    fn resynthesis_with_identical_input_keeps_version() {
        let mut synth = ShadowSynthesiser::new();
        let index = ComponentIndex::new();
        let uri = Uri::new("a.html");
        let view_id = ViewId::new(0);
        let members = vec![SmolStr::new("message")];

        let first = synth.synthesise_view(
            view_id,
            &uri,
            SmolStr::new("AppViewModel"),
            SmolStr::new("app.ts"),
            "<p>${message}</p>".to_string(),
            members.clone(),
            &index,
        );
        let second = synth.synthesise_view(
            view_id,
            &uri,
            SmolStr::new("AppViewModel"),
            SmolStr::new("app.ts"),
            "<p>${message}</p>".to_string(),
            members,
            &index,
        );
        assert_eq!(first.shadow_version, second.shadow_version);
    }

    #[test]
    fn resynthesis_after_html_edit_bumps_version() {
        let mut synth = ShadowSynthesiser::new();
        let index = ComponentIndex::new();
        let uri = Uri::new("a.html");
        let view_id = ViewId::new(0);
        let members = vec![SmolStr::new("message")];

        let first = synth.synthesise_view(
            view_id,
            &uri,
            SmolStr::new("AppViewModel"),
            SmolStr::new("app.ts"),
            "<p>${message}</p>".to_string(),
            members.clone(),
            &index,
        );
        let second = synth.synthesise_view(
            view_id,
            &uri,
            SmolStr::new("AppViewModel"),
            SmolStr::new("app.ts"),
            "<p>${message} again</p>".to_string(),
            members,
            &index,
        );
        assert!(second.shadow_version > first.shadow_version);
    }

    #[test]
    fn view_model_member_scan_reaches_the_view() {
        let mut synth = ShadowSynthesiser::new();
        let index = ComponentIndex::new();
        let members = synth.set_view_model_text(
            SmolStr::new("app.ts"),
            SmolStr::new("AppViewModel"),
            "export class AppViewModel { message = 'hi'; }".to_string(),
        );
        assert!(members.iter().any(|m| m == "message"));

        let uri = Uri::new("a.html");
        let vm = synth.synthesise_view(
            ViewId::new(0),
            &uri,
            SmolStr::new("AppViewModel"),
            SmolStr::new("app.ts"),
            "<p>${message}</p>".to_string(),
            members,
            &index,
        );
        assert!(vm.shadow_text.contains("_this.message"));
    }
}
