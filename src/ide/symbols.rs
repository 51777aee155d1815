//! Document/workspace symbols over the Component Index (SPEC_FULL.md
//! §B.2, additive to `spec.md` §4.D).

use smol_str::SmolStr;

use crate::base::Uri;
use crate::index::ComponentIndex;
use crate::model::ComponentKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: SmolStr,
    pub kind: ComponentKind,
    pub file: Uri,
    /// The owning component's canonical name, set only for a bindable's
    /// own symbol entry.
    pub container: Option<SmolStr>,
}

fn symbols_of(component: &crate::model::ComponentInfo) -> Vec<SymbolInfo> {
    let mut symbols = vec![SymbolInfo {
        name: component.canonical_name.clone(),
        kind: component.kind,
        file: component.uri.clone(),
        container: None,
    }];
    symbols.extend(component.bindables.iter().map(|b| SymbolInfo {
        name: b.property_name.clone(),
        kind: component.kind,
        file: component.uri.clone(),
        container: Some(component.canonical_name.clone()),
    }));
    symbols
}

/// Every component defined by `file`, plus its bindables.
pub fn document_symbols(index: &ComponentIndex, file: &Uri) -> Vec<SymbolInfo> {
    index
        .components_of_file(file)
        .into_iter()
        .filter_map(|name| index.get(&name))
        .flat_map(|c| symbols_of(&c))
        .collect()
}

/// Every indexed component (and its bindables) whose canonical name
/// contains `query`, case-insensitively.
pub fn workspace_symbols(index: &ComponentIndex, query: &str) -> Vec<SymbolInfo> {
    let needle = query.to_lowercase();
    index
        .all()
        .into_iter()
        .filter(|c| c.canonical_name.to_lowercase().contains(&needle))
        .flat_map(|c| symbols_of(&c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_symbols_lists_component_and_its_bindables() {
        let index = ComponentIndex::new();
        index.update_for_file(
            &Uri::new("my-input.ts"),
            "@customElement('my-input')\nexport class MyInput {\n  @bindable count;\n}\n",
        );
        let symbols = document_symbols(&index, &Uri::new("my-input.ts"));
        assert_eq!(symbols.len(), 2);
        assert!(symbols.iter().any(|s| s.name == "my-input" && s.container.is_none()));
        assert!(symbols.iter().any(|s| s.name == "count" && s.container.as_deref() == Some("my-input")));
    }

    #[test]
    fn workspace_symbols_filters_case_insensitively() {
        let index = ComponentIndex::new();
        index.update_for_file(&Uri::new("my-input.ts"), "@customElement('my-input')\nexport class MyInput {}\n");
        index.update_for_file(&Uri::new("my-button.ts"), "@customElement('my-button')\nexport class MyButton {}\n");

        assert_eq!(workspace_symbols(&index, "INPUT").len(), 1);
        assert_eq!(workspace_symbols(&index, "my-").len(), 2);
        assert!(workspace_symbols(&index, "nope").is_empty());
    }
}
