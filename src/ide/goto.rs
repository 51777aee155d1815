//! Go-to-definition (`spec.md` §4.D "Definition").

use crate::base::{ByteRange, TextSize, Uri};
use crate::host::AnalysisHost;
use crate::ide::{attribute_name_range, start_tag_name_range, Location};
use crate::index::ComponentIndex;
use crate::model::ViewMappings;
use crate::{shadow, tssrc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTarget {
    /// The HTML range to highlight at the request site, when the request
    /// originated inside an expression.
    pub origin_selection_range: Option<ByteRange>,
    pub target: Location,
}

/// `spec.md` §4.D "Definition". `class_source` is the paired view-model's
/// current text, read by the caller the same way `host.class_properties`
/// needs it — this crate never reads the filesystem itself.
pub fn goto_definition(
    html: &str,
    offset: TextSize,
    mappings: &ViewMappings,
    index: &ComponentIndex,
    host: &dyn AnalysisHost,
    class_source: &str,
) -> Vec<DefinitionTarget> {
    let text_len = html.len() as u32;
    if let Some(mapping) = mappings.active_mapping(offset, text_len) {
        let shadow_offset = shadow::forward(mapping, offset);
        return host
            .definitions(mappings.shadow_uri.as_str(), shadow_offset)
            .into_iter()
            .filter(|d| d.file_path.as_str() != mappings.shadow_uri.as_str())
            .filter(|d| !(mapping.expression.is_interpolation() && d.is_standard_library))
            .map(|d| DefinitionTarget {
                origin_selection_range: shadow::inverse(mapping, d.text_span),
                target: Location {
                    file: Uri::new(d.file_path.to_string()),
                    range: d.context_span.unwrap_or(d.text_span),
                },
            })
            .collect();
    }

    for tag in &mappings.element_tag_ranges {
        if !start_tag_name_range(tag).contains_inclusive(offset) {
            continue;
        }
        let Some(component) = index.get(&tag.name) else {
            return Vec::new();
        };
        let (Some(class_name), Some(source_file)) = (&component.class_name, &component.source_file) else {
            return Vec::new();
        };
        let Some(range) = tssrc::class_name_range(class_source, class_name) else {
            return Vec::new();
        };
        return vec![DefinitionTarget {
            origin_selection_range: None,
            target: Location {
                file: source_file.clone(),
                range,
            },
        }];
    }

    for mapping in &mappings.mappings {
        let value_start = usize::from(mapping.expression.html_span.start());
        let Some(name_range) = attribute_name_range(html, value_start) else {
            continue;
        };
        if !name_range.contains_inclusive(offset) {
            continue;
        }
        let attribute_name = mapping.expression.attribute_name.as_deref().unwrap_or_default();
        let element_tag = mapping.expression.element_tag.as_deref().unwrap_or_default();
        let Some(component) = index.get(element_tag) else {
            continue;
        };
        let Some(bindable) = component.find_bindable(attribute_name) else {
            continue;
        };
        let (Some(class_name), Some(source_file)) = (&component.class_name, &component.source_file) else {
            continue;
        };
        let Some(range) = tssrc::property_name_range(class_source, class_name, &bindable.property_name) else {
            continue;
        };
        return vec![DefinitionTarget {
            origin_selection_range: None,
            target: Location {
                file: source_file.clone(),
                range,
            },
        }];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::range;
    use crate::host::fake::FakeAnalysisHost;
    use crate::host::DefinitionInfo;
    use crate::model::{ComponentKind, Expression, Mapping};
    use smol_str::SmolStr;

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
    fn definition_inside_expression_maps_span_back_and_drops_shadow_self_references() {
        let index = ComponentIndex::new();
        let mut host = FakeAnalysisHost::default();
        host.definitions = vec![
            DefinitionInfo {
                file_path: SmolStr::new("a.html.virtual.ts"),
                text_span: range(10, 17),
                context_span: None,
                is_standard_library: false,
            },
            DefinitionInfo {
                file_path: SmolStr::new("app.ts"),
                text_span: range(20, 27),
                context_span: None,
                is_standard_library: false,
            },
        ];
        let targets = goto_definition("<p>${message}</p>", TextSize::new(8), &sample_mappings(), &index, &host, "");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].target.file, Uri::new("app.ts"));
        assert_eq!(targets[0].origin_selection_range, Some(range(5, 12)));
    }

    #[test]
    fn definition_on_element_tag_locates_class_identifier() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("my-input.ts"), "@customElement('my-input')\nexport class MyInput {}\n").unwrap();
        let index = ComponentIndex::new();
        index.scan_project(dir.path());
        assert_eq!(index.get("my-input").unwrap().kind, ComponentKind::Element);

        let mut mappings = sample_mappings();
        mappings.mappings.clear();
        mappings.element_tag_ranges = vec![crate::model::ElementTagRange {
            name: SmolStr::new("my-input"),
            start_tag_range: range(0, 11),
            end_tag_range: None,
        }];

        let host = FakeAnalysisHost::default();
        let class_source = "@customElement('my-input')\nexport class MyInput {}\n";
        let targets = goto_definition("<my-input></my-input>", TextSize::new(3), &mappings, &index, &host, class_source);
        assert_eq!(targets.len(), 1);
        assert_eq!(&class_source[usize::from(targets[0].target.range.start())..usize::from(targets[0].target.range.end())], "MyInput");
    }
}
