//! Code actions (`spec.md` §4.D "Code actions").

use smol_str::SmolStr;

use crate::base::{ByteRange, TextSize};
use crate::host::{AnalysisHost, TextEdit};
use crate::model::ViewMappings;
use crate::shadow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
    pub description: SmolStr,
    pub edits: Vec<TextEdit>,
}

/// Forward-maps `html_range` to the shadow, asks the host for fixes given
/// `error_codes`, keeps only fixes whose file is the shadow itself, and
/// inverse-maps each edit back into HTML. A fix with no invertible edits
/// is dropped entirely rather than applied partially.
pub fn code_actions(
    html: &str,
    html_range: ByteRange,
    mappings: &ViewMappings,
    host: &dyn AnalysisHost,
    error_codes: &[u32],
) -> Vec<CodeAction> {
    let text_len = html.len() as u32;
    let Some(mapping) = mappings.mapping_covering(html_range, text_len) else {
        return Vec::new();
    };

    let shadow_start: TextSize = shadow::forward(mapping, html_range.start());
    let shadow_end: TextSize = shadow::forward(mapping, html_range.end());
    let shadow_span = ByteRange::new(shadow_start, shadow_end);

    host.code_fixes(mappings.shadow_uri.as_str(), shadow_span, error_codes)
        .into_iter()
        .filter(|fix| fix.file_path.as_str() == mappings.shadow_uri.as_str())
        .filter_map(|fix| {
            let edits: Vec<TextEdit> = fix
                .edits
                .iter()
                .filter_map(|edit| {
                    shadow::inverse(mapping, edit.span).map(|span| TextEdit {
                        span,
                        new_text: edit.new_text.clone(),
                    })
                })
                .collect();
            if edits.is_empty() {
                None
            } else {
                Some(CodeAction { description: fix.description, edits })
            }
        })
        .collect()
}
