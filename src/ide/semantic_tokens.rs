//! Semantic tokens (`spec.md` §4.D "Semantic tokens").

use crate::base::{range, ByteRange};
use crate::host::{AnalysisHost, TokenKind};
use crate::ide::{attribute_name_range, end_tag_name_range, start_tag_name_range};
use crate::index::ComponentIndex;
use crate::model::ViewMappings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticToken {
    pub range: ByteRange,
    pub kind: TokenKind,
}

/// Runs the host's encoded classification over the shadow, pre-emits
/// `aureliaElement`/`aureliaAttribute` tokens for recorded tag ranges and
/// bindable attribute names that resolve to a known component, then folds
/// each host token that maps via a `Transformation` into an HTML
/// identifier — picking the highest-priority kind (lowest legend index)
/// per HTML range and skipping ranges an Aurelia token already occupies.
/// Method/function identifiers immediately followed in HTML by `()` get
/// two extra punctuation tokens for the parentheses.
pub fn semantic_tokens(html: &str, mappings: &ViewMappings, index: &ComponentIndex, host: &dyn AnalysisHost) -> Vec<SemanticToken> {
    let mut tokens = Vec::new();
    let mut occupied: Vec<ByteRange> = Vec::new();

    for tag in &mappings.element_tag_ranges {
        if index.get(&tag.name).is_none() {
            continue;
        }
        let start_range = start_tag_name_range(tag);
        tokens.push(SemanticToken { range: start_range, kind: TokenKind::AureliaElement });
        occupied.push(start_range);
        if let Some(end_tag_range) = tag.end_tag_range {
            let end_range = end_tag_name_range(end_tag_range, tag.name.len());
            tokens.push(SemanticToken { range: end_range, kind: TokenKind::AureliaElement });
            occupied.push(end_range);
        }
    }

    for mapping in &mappings.mappings {
        let (Some(attribute_name), Some(element_tag)) =
            (mapping.expression.attribute_name.as_deref(), mapping.expression.element_tag.as_deref())
        else {
            continue;
        };
        let Some(component) = index.get(element_tag) else { continue };
        if component.find_bindable(attribute_name).is_none() {
            continue;
        }
        let value_start = usize::from(mapping.expression.html_span.start());
        let Some(name_range) = attribute_name_range(html, value_start) else { continue };
        tokens.push(SemanticToken { range: name_range, kind: TokenKind::AureliaAttribute });
        occupied.push(name_range);
    }

    let shadow_span = range(0, mappings.shadow_text.len());
    let classifications = host.semantic_classifications(mappings.shadow_uri.as_str(), shadow_span);

    let mut by_html_range: Vec<(ByteRange, TokenKind)> = Vec::new();
    for classification in &classifications {
        for mapping in &mappings.mappings {
            let Some(transformation) = mapping
                .transformations
                .iter()
                .find(|t| t.shadow_range.contains(classification.span.start()))
            else {
                continue;
            };
            let html_range = transformation.html_range;
            if occupied.contains(&html_range) {
                continue;
            }
            match by_html_range.iter_mut().find(|(r, _)| *r == html_range) {
                Some((_, kind)) if classification.kind.legend_index() < kind.legend_index() => {
                    *kind = classification.kind;
                }
                Some(_) => {}
                None => by_html_range.push((html_range, classification.kind)),
            }
        }
    }

    for (html_range, kind) in by_html_range {
        tokens.push(SemanticToken { range: html_range, kind });
        if matches!(kind, TokenKind::Method | TokenKind::Function) {
            let end = usize::from(html_range.end());
            let bytes = html.as_bytes();
            if bytes.get(end) == Some(&b'(') && bytes.get(end + 1) == Some(&b')') {
                tokens.push(SemanticToken { range: range(end, end + 1), kind: TokenKind::Punctuation });
                tokens.push(SemanticToken { range: range(end + 1, end + 2), kind: TokenKind::Punctuation });
            }
        }
    }

    tokens.sort_by_key(|t| t.range.start());
    tokens
}
