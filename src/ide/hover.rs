//! Hover (`spec.md` §4.D "Hover").

use smol_str::SmolStr;

use crate::base::{ByteRange, TextSize};
use crate::host::AnalysisHost;
use crate::ide::{attribute_name_range, end_tag_name_range, start_tag_name_range};
use crate::index::ComponentIndex;
use crate::model::ViewMappings;
use crate::{shadow, tssrc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    pub contents: SmolStr,
    pub range: ByteRange,
}

fn append_quick_info(contents: &mut String, host: &dyn AnalysisHost, source_file: &str, offset: ByteRange) {
    let Some(info) = host.quick_info(source_file, offset.start()) else { return };
    contents.push_str("\n\n");
    contents.push_str(&info.display_parts);
    if let Some(doc) = &info.documentation {
        contents.push_str("\n\n");
        contents.push_str(doc);
    }
}

/// `spec.md` §4.D "Hover": inside an expression, forward-map and ask the
/// host for quick info, then map its span back to HTML. Outside, hover
/// over a custom-element tag name or a custom-attribute/bindable
/// attribute name synthesises documentation from `ComponentInfo` plus
/// the host's quick info at the defining class/property, located in
/// `class_source` (the paired view-model's current text, read by the
/// caller the same way `goto::goto_definition` needs it).
pub fn hover(
    html: &str,
    offset: TextSize,
    mappings: &ViewMappings,
    index: &ComponentIndex,
    host: &dyn AnalysisHost,
    class_source: &str,
) -> Option<HoverResult> {
    let text_len = html.len() as u32;
    if let Some(mapping) = mappings.active_mapping(offset, text_len) {
        let shadow_offset = shadow::forward(mapping, offset);
        let info = host.quick_info(mappings.shadow_uri.as_str(), shadow_offset)?;
        let range = shadow::inverse(mapping, info.text_span)?;
        let mut contents = info.display_parts.to_string();
        if let Some(doc) = &info.documentation {
            contents.push_str("\n\n");
            contents.push_str(doc);
        }
        return Some(HoverResult {
            contents: SmolStr::new(contents),
            range,
        });
    }

    for tag in &mappings.element_tag_ranges {
        let name_range = start_tag_name_range(tag);
        if name_range.contains_inclusive(offset) {
            let component = index.get(&tag.name)?;
            let mut contents = format!("**{}** (element)", component.canonical_name);
            if !component.bindables.is_empty() {
                contents.push_str("\n\nBindables: ");
                let names: Vec<&str> = component.bindables.iter().map(|b| b.property_name.as_str()).collect();
                contents.push_str(&names.join(", "));
            }
            if let (Some(class_name), Some(source_file)) = (&component.class_name, &component.source_file) {
                if let Some(decl_range) = tssrc::class_name_range(class_source, class_name) {
                    append_quick_info(&mut contents, host, source_file.as_str(), decl_range);
                }
            }
            return Some(HoverResult {
                contents: SmolStr::new(contents),
                range: name_range,
            });
        }
        if let Some(end_tag_range) = tag.end_tag_range {
            let end_name_range = end_tag_name_range(end_tag_range, tag.name.len());
            if end_name_range.contains_inclusive(offset) {
                let component = index.get(&tag.name)?;
                let mut contents = format!("**{}** (element)", component.canonical_name);
                if let (Some(class_name), Some(source_file)) = (&component.class_name, &component.source_file) {
                    if let Some(decl_range) = tssrc::class_name_range(class_source, class_name) {
                        append_quick_info(&mut contents, host, source_file.as_str(), decl_range);
                    }
                }
                return Some(HoverResult {
                    contents: SmolStr::new(contents),
                    range: end_name_range,
                });
            }
        }
    }

    for mapping in &mappings.mappings {
        let value_start = usize::from(mapping.expression.html_span.start());
        let Some(name_range) = attribute_name_range(html, value_start) else {
            continue;
        };
        if !name_range.contains_inclusive(offset) {
            continue;
        }
        let attribute_name = mapping.expression.attribute_name.as_deref()?;
        let element_tag = mapping.expression.element_tag.as_deref()?;
        let component = index.get(element_tag)?;
        let bindable = component.find_bindable(attribute_name)?;
        let mut contents = format!("**{}** bindable of `{}`", bindable.property_name, component.canonical_name);
        if let (Some(class_name), Some(source_file)) = (&component.class_name, &component.source_file) {
            if let Some(decl_range) = tssrc::property_name_range(class_source, class_name, &bindable.property_name) {
                append_quick_info(&mut contents, host, source_file.as_str(), decl_range);
            }
        }
        return Some(HoverResult {
            contents: SmolStr::new(contents),
            range: name_range,
        });
    }

    None
}
