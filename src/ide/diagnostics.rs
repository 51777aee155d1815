//! Diagnostics (`spec.md` §4.D "Diagnostics").

use smol_str::SmolStr;

use crate::base::ByteRange;
use crate::host::{AnalysisHost, DiagnosticSeverity};
use crate::index::ComponentIndex;
use crate::model::ViewMappings;
use crate::shadow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: ByteRange,
    pub message: SmolStr,
    pub severity: DiagnosticSeverity,
    pub code: Option<u32>,
}

/// `spec.md` §4.D "Diagnostics": host syntactic/semantic diagnostics on
/// the shadow, inverse-mapped into HTML, plus a bindable-type
/// assignability check per binding command. `enable` is `Options.
/// diagnostics.enable` (`spec.md` §6); when `false` the feature is
/// switched off entirely and returns no diagnostics.
pub fn diagnostics(mappings: &ViewMappings, index: &ComponentIndex, host: &dyn AnalysisHost, enable: bool) -> Vec<Diagnostic> {
    if !enable {
        return Vec::new();
    }
    let mut results = host_diagnostics(mappings, host);
    results.extend(bindable_assignability_diagnostics(mappings, index, host));
    results
}

fn host_diagnostics(mappings: &ViewMappings, host: &dyn AnalysisHost) -> Vec<Diagnostic> {
    host.syntactic_diagnostics(mappings.shadow_uri.as_str())
        .into_iter()
        .chain(host.semantic_diagnostics(mappings.shadow_uri.as_str()))
        .filter_map(|d| {
            let mapping = mappings
                .mappings
                .iter()
                .find(|m| m.shadow_block_range.contains_range(d.span))?;
            let range = shadow::inverse(mapping, d.span)?;
            Some(Diagnostic {
                range,
                message: d.message,
                severity: d.severity,
                code: d.code,
            })
        })
        .collect()
}

fn bindable_assignability_diagnostics(mappings: &ViewMappings, index: &ComponentIndex, host: &dyn AnalysisHost) -> Vec<Diagnostic> {
    let mut results = Vec::new();
    for mapping in &mappings.mappings {
        let Some(command) = mapping.expression.command() else { continue };
        let Some(attribute_name) = mapping.expression.attribute_name.as_deref() else { continue };
        let Some(element_tag) = mapping.expression.element_tag.as_deref() else { continue };
        let Some(component) = index.get(element_tag) else { continue };
        let Some(bindable) = component.find_bindable(attribute_name) else { continue };
        let (Some(class_name), Some(source_file)) = (&component.class_name, &component.source_file) else { continue };

        let properties = host.class_properties(source_file.as_str(), class_name);
        let Some(property_type) = properties.iter().find(|p| p.property_name == bindable.property_name) else { continue };

        let shadow_offset = shadow::forward(mapping, mapping.expression.html_span.start());
        let Some(expr_type) = host.type_at(mappings.shadow_uri.as_str(), shadow_offset) else { continue };

        let assignable = match command {
            "bind" | "to-view" => host.is_assignable(&expr_type, &property_type.type_name),
            "from-view" => host.is_assignable(&property_type.type_name, &expr_type),
            "two-way" => {
                host.is_assignable(&expr_type, &property_type.type_name)
                    && host.is_assignable(&property_type.type_name, &expr_type)
            }
            _ => true,
        };

        if !assignable {
            results.push(Diagnostic {
                range: mapping.expression.html_span,
                message: SmolStr::new(format!(
                    "Type '{expr_type}' is not assignable to bindable '{}' of type '{}'.",
                    bindable.property_name, property_type.type_name
                )),
                severity: DiagnosticSeverity::Error,
                code: None,
            });
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{range, Uri};
    use crate::host::fake::FakeAnalysisHost;
    use crate::host::{HostDiagnostic, PropertyType};
    use crate::model::{ComponentKind, Expression, Mapping};

    fn sample_mappings() -> ViewMappings {
        let expr = Expression::interpolation("message", range(5, 12));
        let mapping = Mapping::new(expr, range(0, 30), range(10, 17), vec![]);
        ViewMappings {
            shadow_uri: Uri::new("a.html.virtual.ts"),
            shadow_version: 1,
            shadow_text: String::new(),
            view_model_class_name: SmolStr::new("AppViewModel"),
            view_model_fs_path: SmolStr::new("app.ts"),
            mappings: vec![mapping],
            element_tag_ranges: vec![],
        }
    }

    #[test]
    fn host_diagnostics_map_shadow_span_back_to_html() {
        let index = ComponentIndex::new();
        let mut host = FakeAnalysisHost::default();
        host.semantic_diagnostics = vec![HostDiagnostic {
            span: range(10, 17),
            message: SmolStr::new("Cannot find name 'message'."),
            severity: DiagnosticSeverity::Error,
            code: Some(2304),
        }];
        let found = diagnostics(&sample_mappings(), &index, &host, true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].range, range(5, 12));
        assert_eq!(found[0].code, Some(2304));
    }

    #[test]
    fn disabled_diagnostics_returns_empty_list() {
        let index = ComponentIndex::new();
        let mut host = FakeAnalysisHost::default();
        host.semantic_diagnostics = vec![HostDiagnostic {
            span: range(10, 17),
            message: SmolStr::new("Cannot find name 'message'."),
            severity: DiagnosticSeverity::Error,
            code: Some(2304),
        }];
        assert!(diagnostics(&sample_mappings(), &index, &host, false).is_empty());
    }

    #[test]
    fn bindable_mismatch_between_expression_and_property_type_is_reported() {
        let index = ComponentIndex::new();
        index.update_for_file(&Uri::new("my-input.ts"), "@customElement('my-input')\nexport class MyInput {\n  @bindable count;\n}\n");
        assert_eq!(index.get("my-input").unwrap().kind, ComponentKind::Element);

        let expr = Expression::binding("bind", "name", range(5, 9), "count.bind", "my-input");
        let mapping = Mapping::new(expr, range(0, 20), range(0, 20), vec![]);
        let mappings = ViewMappings {
            shadow_uri: Uri::new("a.html.virtual.ts"),
            shadow_version: 1,
            shadow_text: String::new(),
            view_model_class_name: SmolStr::new("AppViewModel"),
            view_model_fs_path: SmolStr::new("app.ts"),
            mappings: vec![mapping],
            element_tag_ranges: vec![],
        };

        let mut host = FakeAnalysisHost::default();
        host.class_properties.insert(
            SmolStr::new("MyInput"),
            vec![PropertyType { property_name: SmolStr::new("count"), type_name: SmolStr::new("number") }],
        );
        host.types_at.insert(0, SmolStr::new("string"));

        let found = bindable_assignability_diagnostics(&mappings, &index, &host);
        assert_eq!(found.len(), 1);
        assert!(found[0].message.contains("count"));
    }

    #[test]
    fn two_way_binding_assignable_both_directions_is_silent() {
        let index = ComponentIndex::new();
        index.update_for_file(&Uri::new("my-input.ts"), "@customElement('my-input')\nexport class MyInput {\n  @bindable count;\n}\n");

        let expr = Expression::binding("two-way", "count", range(5, 10), "count.two-way", "my-input");
        let mapping = Mapping::new(expr, range(0, 20), range(0, 20), vec![]);
        let mappings = ViewMappings {
            shadow_uri: Uri::new("a.html.virtual.ts"),
            shadow_version: 1,
            shadow_text: String::new(),
            view_model_class_name: SmolStr::new("AppViewModel"),
            view_model_fs_path: SmolStr::new("app.ts"),
            mappings: vec![mapping],
            element_tag_ranges: vec![],
        };

        let mut host = FakeAnalysisHost::default();
        host.class_properties.insert(
            SmolStr::new("MyInput"),
            vec![PropertyType { property_name: SmolStr::new("count"), type_name: SmolStr::new("number") }],
        );
        host.types_at.insert(0, SmolStr::new("number"));
        host.assignable_pairs = vec![(SmolStr::new("number"), SmolStr::new("number"))];

        let found = bindable_assignability_diagnostics(&mappings, &index, &host);
        assert!(found.is_empty());
    }
}
