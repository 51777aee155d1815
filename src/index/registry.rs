//! The Component Index (`spec.md` §4.B, Component B): a project-wide
//! name→definition map kept current under file events.
//!
//! Backed by `parking_lot::RwLock` (shared-read by feature handlers,
//! shared-write only by the discovery functions below, per §5/SPEC_FULL
//! §A.6) and `indexmap::IndexMap` so iteration order — and therefore
//! workspace-symbol ordering — is deterministic rather than hash order.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::base::Uri;
use crate::model::{Bindable, ComponentInfo, ComponentKind};
use crate::tssrc::{self, ComponentDecorator, ScannedClass};

/// The result of [`ComponentIndex::update_for_file`]: the symmetric
/// difference between the old and new contributions of that file
/// (SPEC_FULL §B.3 — an addition over spec.md's plain boolean).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexDiff {
    pub added: Vec<SmolStr>,
    pub removed: Vec<SmolStr>,
}

impl IndexDiff {
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[derive(Default)]
struct IndexState {
    components: IndexMap<SmolStr, ComponentInfo>,
    file_to_components: FxHashMap<Uri, IndexSet<SmolStr>>,
    component_to_deps: FxHashMap<Uri, IndexSet<Uri>>,
}

/// `name -> ComponentInfo`, names globally unique within the project
/// (`spec.md` §3 "ComponentIndex").
#[derive(Default)]
pub struct ComponentIndex {
    state: RwLock<IndexState>,
    /// Makes a full project scan exclusive with itself (`spec.md` §5): a
    /// second concurrent `scan_project` observes this already set and
    /// no-ops instead of racing the first.
    scanning: AtomicBool,
}

impl ComponentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<ComponentInfo> {
        self.state.read().components.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().components.is_empty()
    }

    /// All component names contributed by `file` (used to invalidate
    /// dependent views, `spec.md` §3 "inverse relations").
    pub fn components_of_file(&self, file: &Uri) -> Vec<SmolStr> {
        self.state
            .read()
            .file_to_components
            .get(file)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// A deterministic snapshot of every component, for workspace symbols
    /// (SPEC_FULL §B.2).
    pub fn all(&self) -> Vec<ComponentInfo> {
        self.state.read().components.values().cloned().collect()
    }

    /// `scanProject(host)` (`spec.md` §4.B): populate the index from the
    /// full project snapshot under `root`. `.ts`/`.html` candidates are
    /// read and parsed in parallel (SPEC_FULL §A.7); the merge into the
    /// shared index is single-threaded, preserving "a full project scan
    /// is exclusive with itself" (§5).
    pub fn scan_project(&self, root: &Path) {
        if self
            .scanning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("scan_project skipped: a scan is already in progress");
            return;
        }

        let ts_paths = collect_file_paths(root, "ts");
        let scanned: Vec<(Uri, Vec<ScannedClass>)> = ts_paths
            .par_iter()
            .filter_map(|path| {
                let text = std::fs::read_to_string(path).ok()?;
                Some((path_to_uri(path), tssrc::scan_source(&text)))
            })
            .collect();

        let mut state = self.state.write();
        state.components.clear();
        state.file_to_components.clear();
        for (uri, classes) in scanned {
            apply_file_contributions(&mut state, &uri, &classes);
        }
        drop(state);

        self.scan_html_only_components(root);
        self.scanning.store(false, Ordering::Release);
    }

    /// `updateForFile(uri, host)` (`spec.md` §4.B): incremental refresh
    /// for one source file. Returns the symmetric difference in
    /// contributed component names (SPEC_FULL §B.3).
    pub fn update_for_file(&self, uri: &Uri, source_text: &str) -> IndexDiff {
        let classes = tssrc::scan_source(source_text);
        let mut state = self.state.write();

        let before: IndexSet<SmolStr> = state
            .file_to_components
            .get(uri)
            .cloned()
            .unwrap_or_default();

        remove_file_contributions(&mut state, uri);
        apply_file_contributions(&mut state, uri, &classes);

        let after = state
            .file_to_components
            .get(uri)
            .cloned()
            .unwrap_or_default();

        IndexDiff {
            added: after.difference(&before).cloned().collect(),
            removed: before.difference(&after).cloned().collect(),
        }
    }

    /// `scanHtmlOnlyComponents(workspaceRoot)` (`spec.md` §4.B): views
    /// with no paired class file whose root is a `<template>` are
    /// registered as elements, with any root `bindable="a,b"` attribute
    /// parsed into bindables.
    pub fn scan_html_only_components(&self, root: &Path) {
        let html_paths = collect_file_paths(root, "html");
        let discovered: Vec<(Uri, SmolStr, Vec<Bindable>)> = html_paths
            .par_iter()
            .filter_map(|path| {
                if path.with_extension("ts").exists() {
                    return None; // paired class file exists, not HTML-only
                }
                let text = std::fs::read_to_string(path).ok()?;
                let (name, bindables) = root_template_bindables(path, &text)?;
                Some((path_to_uri(path), name, bindables))
            })
            .collect();

        let mut state = self.state.write();
        for (uri, name, bindables) in discovered {
            let info = ComponentInfo::new(uri.clone(), ComponentKind::Element, name.clone())
                .with_bindables(bindables);
            insert_if_vacant(&mut state, &uri, name, info);
        }
    }
}

fn root_template_bindables(path: &Path, html: &str) -> Option<(SmolStr, Vec<Bindable>)> {
    let trimmed = html.trim_start();
    if !trimmed.starts_with("<template") {
        return None;
    }
    let tag_end = trimmed.find('>')?;
    let tag = &trimmed[..tag_end];
    let bindables = tag
        .find("bindable")
        .and_then(|idx| {
            let after = &tag[idx + "bindable".len()..];
            let eq = after.find('=')?;
            let rest = after[eq + 1..].trim_start();
            let quote = rest.chars().next()?;
            if quote != '"' && quote != '\'' {
                return None;
            }
            let end = rest[1..].find(quote)?;
            Some(&rest[1..1 + end])
        })
        .map(|value| {
            value
                .split([',', ' '])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Bindable::new)
                .collect()
        })
        .unwrap_or_default();

    let name = SmolStr::new(tssrc::kebab_case(
        path.file_stem().and_then(|s| s.to_str()).unwrap_or("component"),
    ));
    Some((name, bindables))
}

fn apply_file_contributions(state: &mut IndexState, uri: &Uri, classes: &[ScannedClass]) {
    let has_html_sibling = Path::new(uri.as_str()).with_extension("html").exists();
    for class in classes {
        let Some((kind, name, bindables)) = component_of(class, has_html_sibling) else {
            continue;
        };
        let info = ComponentInfo::new(uri.clone(), kind, name.clone())
            .with_bindables(bindables)
            .with_class(class.class_name.clone(), uri.clone());
        insert_if_vacant(state, uri, name, info);
    }
}

fn insert_if_vacant(state: &mut IndexState, uri: &Uri, name: SmolStr, info: ComponentInfo) {
    if state.components.contains_key(&name) {
        warn!(%name, %uri, "component name collision: first writer wins");
        return;
    }
    state.components.insert(name.clone(), info);
    state
        .file_to_components
        .entry(uri.clone())
        .or_default()
        .insert(name);
}

fn remove_file_contributions(state: &mut IndexState, uri: &Uri) {
    if let Some(names) = state.file_to_components.remove(uri) {
        for name in names {
            state.components.shift_remove(&name);
        }
    }
    state.component_to_deps.remove(uri);
}

/// Applies `spec.md` §4.B rules 1-5 to one scanned class. Rules 1-4 come
/// from an explicit decorator or the `ValueConverter` naming convention;
/// rule 5 (a class in `foo-bar.ts` with a sibling `foo-bar.html` and no
/// element decorator is an implicit Element) is the final fallback, gated
/// on `has_html_sibling` since only [`apply_file_contributions`] has the
/// file path to check it with.
fn component_of(class: &ScannedClass, has_html_sibling: bool) -> Option<(ComponentKind, SmolStr, Vec<Bindable>)> {
    match &class.decorator {
        Some(ComponentDecorator::CustomElement(arg)) => Some((
            ComponentKind::Element,
            arg.explicit_name()
                .map(SmolStr::new)
                .unwrap_or_else(|| SmolStr::new(tssrc::kebab_case(&class.class_name))),
            class.bindables.clone(),
        )),
        Some(ComponentDecorator::CustomAttribute(arg)) => Some((
            ComponentKind::Attribute,
            arg.explicit_name()
                .map(SmolStr::new)
                .unwrap_or_else(|| SmolStr::new(tssrc::kebab_case(&class.class_name))),
            class.bindables.clone(),
        )),
        Some(ComponentDecorator::ValueConverter(arg)) => Some((
            ComponentKind::ValueConverter,
            arg.explicit_name()
                .map(SmolStr::new)
                .unwrap_or_else(|| {
                    SmolStr::new(tssrc::value_converter_convention_name(&class.class_name))
                }),
            Vec::new(),
        )),
        None if class.class_name.ends_with("ValueConverter") => Some((
            ComponentKind::ValueConverter,
            SmolStr::new(tssrc::value_converter_convention_name(&class.class_name)),
            Vec::new(),
        )),
        None if has_html_sibling => Some((
            ComponentKind::Element,
            SmolStr::new(tssrc::kebab_case(&class.class_name)),
            class.bindables.clone(),
        )),
        None => None,
    }
}

fn collect_file_paths(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect()
}

fn path_to_uri(path: &Path) -> Uri {
    Uri::new(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn scans_custom_element_into_index() {
        let dir = tempdir().unwrap();
        write_file(
            dir.path(),
            "my-input.ts",
            "@customElement('my-input')\nexport class MyInput {\n  @bindable count;\n}\n",
        );

        let index = ComponentIndex::new();
        index.scan_project(dir.path());

        assert_eq!(index.len(), 1);
        let info = index.get("my-input").unwrap();
        assert_eq!(info.kind, ComponentKind::Element);
        assert_eq!(info.bindables.len(), 1);
    }

    #[test]
    fn first_writer_wins_on_collision() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a.ts", "@customElement('dup')\nexport class A {}\n");
        write_file(dir.path(), "b.ts", "@customElement('dup')\nexport class B {}\n");

        let index = ComponentIndex::new();
        index.scan_project(dir.path());

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn update_for_file_reports_added_and_removed() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "my-input.ts", "@customElement('my-input')\nexport class MyInput {}\n");
        let uri = path_to_uri(&path);

        let index = ComponentIndex::new();
        let diff1 = index.update_for_file(&uri, "@customElement('my-input')\nexport class MyInput {}\n");
        assert_eq!(diff1.added, vec![SmolStr::new("my-input")]);

        let diff2 = index.update_for_file(&uri, "@customElement('renamed')\nexport class MyInput {}\n");
        assert_eq!(diff2.added, vec![SmolStr::new("renamed")]);
        assert_eq!(diff2.removed, vec![SmolStr::new("my-input")]);
    }

    #[test]
    fn html_only_component_parses_root_bindable() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "foo-bar.html", "<template bindable=\"a,b\"></template>");

        let index = ComponentIndex::new();
        index.scan_html_only_components(dir.path());

        assert_eq!(index.len(), 1);
        let info = index.get("foo-bar").unwrap();
        assert_eq!(info.bindables.len(), 2);
    }

    #[test]
    fn undecorated_class_with_sibling_html_is_an_implicit_element() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "foo-bar.ts", "export class FooBar {}\n");
        write_file(dir.path(), "foo-bar.html", "<template></template>");

        let index = ComponentIndex::new();
        index.scan_project(dir.path());

        let info = index.get("foo-bar").unwrap();
        assert_eq!(info.kind, ComponentKind::Element);
    }

    #[test]
    fn undecorated_class_without_sibling_html_is_not_registered() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "foo-bar.ts", "export class FooBar {}\n");

        let index = ComponentIndex::new();
        index.scan_project(dir.path());

        assert!(index.is_empty());
    }

    #[test]
    fn value_converter_suffix_convention_without_decorator() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "upper.ts", "export class UpperValueConverter {}\n");

        let index = ComponentIndex::new();
        index.scan_project(dir.path());

        assert_eq!(index.len(), 1);
        let info = index.get("upper").unwrap();
        assert_eq!(info.kind, ComponentKind::ValueConverter);
    }
}
