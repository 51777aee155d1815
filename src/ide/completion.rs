//! Completion (`spec.md` §4.D "Completion").

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::TextSize as BaseTextSize;
use crate::html::classifier::{command_suffixes_excluding_ref, COMMAND_SUFFIXES, TEMPLATE_CONTROLLERS};
use crate::html::fragment::{classify, CompletionContext};
use crate::host::{AnalysisHost, SymbolClass};
use crate::ide::is_shadow_artifact;
use crate::index::ComponentIndex;
use crate::model::{ComponentKind, Mapping, ViewMappings};
use crate::shadow;

/// What kind of thing a [`CompletionItem`] suggests, spanning both the
/// local-HTML-context suggestions and the host-derived expression ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Element,
    Attribute,
    TemplateController,
    Command,
    ValueConverter,
    Host(SymbolClass),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: SmolStr,
    pub kind: CompletionKind,
    pub insert_text: Option<SmolStr>,
}

impl CompletionItem {
    fn plain(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            insert_text: None,
        }
    }
}

/// `spec.md` §4.D "Completion": the active-mapping dispatch between
/// expression completions (forwarded to the host) and local-HTML-context
/// completions (derived from a cursor-local fragment parse).
pub fn completions(
    html: &str,
    offset: BaseTextSize,
    mappings: &ViewMappings,
    index: &ComponentIndex,
    host: &dyn AnalysisHost,
) -> Vec<CompletionItem> {
    let text_len = html.len() as u32;
    if let Some(mapping) = mappings.active_mapping(offset, text_len) {
        return expression_completions(html, offset, mapping, mappings, index, host);
    }

    match classify(html, usize::from(offset)) {
        CompletionContext::ElementName => element_completions(index),
        CompletionContext::AttributeArea { element_tag } => attribute_area_completions(index, &element_tag),
        CompletionContext::AfterDot { .. } => command_suffix_completions(),
        CompletionContext::None => Vec::new(),
    }
}

fn element_completions(index: &ComponentIndex) -> Vec<CompletionItem> {
    index
        .all()
        .into_iter()
        .filter(|c| c.kind == ComponentKind::Element)
        .map(|c| CompletionItem::plain(c.canonical_name, CompletionKind::Element))
        .collect()
}

fn attribute_area_completions(index: &ComponentIndex, element_tag: &str) -> Vec<CompletionItem> {
    let mut items = Vec::new();

    for component in index.all().into_iter().filter(|c| c.kind == ComponentKind::Attribute) {
        items.push(CompletionItem::plain(component.canonical_name.clone(), CompletionKind::Attribute));
        for suffix in COMMAND_SUFFIXES {
            items.push(CompletionItem::plain(format!("{}.{suffix}", component.canonical_name), CompletionKind::Command));
        }
    }

    for controller in TEMPLATE_CONTROLLERS {
        items.push(CompletionItem::plain(*controller, CompletionKind::TemplateController));
    }

    if let Some(element) = index.get(element_tag) {
        for bindable in &element.bindables {
            let name = bindable.effective_attribute_name();
            items.push(CompletionItem::plain(name.clone(), CompletionKind::Attribute));
            for suffix in COMMAND_SUFFIXES {
                items.push(CompletionItem::plain(format!("{name}.{suffix}"), CompletionKind::Command));
            }
        }
    }

    items
}

/// `spec.md` §4.D: "After `.` immediately following a known bindable name
/// or a syntactically valid attribute name, suggest only the
/// command-suffix set (excluding `.ref`)." The fragment parser already
/// guarantees `attribute_base` is a syntactically valid name, so every
/// `AfterDot` context reaches this unconditionally.
fn command_suffix_completions() -> Vec<CompletionItem> {
    command_suffixes_excluding_ref()
        .map(|suffix| CompletionItem::plain(suffix, CompletionKind::Command))
        .collect()
}

fn expression_completions(
    html: &str,
    offset: BaseTextSize,
    mapping: &Mapping,
    mappings: &ViewMappings,
    index: &ComponentIndex,
    host: &dyn AnalysisHost,
) -> Vec<CompletionItem> {
    let shadow_offset = shadow::forward(mapping, offset);
    let host_items = host.completions(mappings.shadow_uri.as_str(), shadow_offset);

    let preceded_by_pipe = usize::from(offset) > 0 && html.as_bytes()[usize::from(offset) - 1] == b'|';
    let value_converters = || {
        index
            .all()
            .into_iter()
            .filter(|c| c.kind == ComponentKind::ValueConverter)
    };

    if preceded_by_pipe {
        return value_converters()
            .map(|c| CompletionItem::plain(c.canonical_name, CompletionKind::ValueConverter))
            .collect();
    }

    let value_converter_names: FxHashSet<SmolStr> = value_converters().map(|c| c.canonical_name).collect();
    let members: FxHashSet<SmolStr> = host.view_model_members(&mappings.view_model_fs_path).into_iter().collect();

    let mut ranked: Vec<(bool, SmolStr, CompletionItem)> = host_items
        .into_iter()
        .filter(|item| !is_shadow_artifact(&item.name))
        .filter(|item| {
            !matches!(
                item.kind,
                SymbolClass::Module | SymbolClass::Class | SymbolClass::Interface | SymbolClass::Type | SymbolClass::Enum
            )
        })
        .filter(|item| !item.is_keyword || matches!(item.name.as_str(), "true" | "false" | "null" | "undefined"))
        .filter(|item| !value_converter_names.contains(&item.name))
        .map(|item| {
            let is_member = members.contains(&item.name);
            let sort_key = item.sort_key.clone();
            let completion = CompletionItem {
                label: item.name,
                kind: CompletionKind::Host(item.kind),
                insert_text: item.insert_text,
            };
            (!is_member, sort_key, completion)
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    ranked.into_iter().map(|(_, _, item)| item).collect()
}
