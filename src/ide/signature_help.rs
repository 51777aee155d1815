//! Signature help (`spec.md` §4.D "Signature help").

use crate::base::TextSize;
use crate::host::{AnalysisHost, SignatureHelp};
use crate::model::ViewMappings;
use crate::shadow;

/// Inside an expression, forward-maps and passes the host's signature
/// list straight through.
pub fn signature_help(html: &str, offset: TextSize, mappings: &ViewMappings, host: &dyn AnalysisHost) -> Option<SignatureHelp> {
    let text_len = html.len() as u32;
    let mapping = mappings.active_mapping(offset, text_len)?;
    let shadow_offset = shadow::forward(mapping, offset);
    host.signature_help(mappings.shadow_uri.as_str(), shadow_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{range, Uri};
    use crate::host::fake::FakeAnalysisHost;
    use crate::model::{Expression, Mapping};
    use smol_str::SmolStr;

    fn sample_mappings() -> ViewMappings {
        let expr = Expression::binding("call", "greet(", range(5, 11), "on.call", "my-button");
        let mapping = Mapping::new(expr, range(0, 20), range(10, 16), vec![]);
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
    fn passes_through_host_signature_help_when_inside_expression() {
        let mut host = FakeAnalysisHost::default();
        host.signature_help = Some(SignatureHelp {
            signatures: vec![SmolStr::new("greet(name: string): void")],
            active_signature: 0,
            active_parameter: 0,
        });
        let result = signature_help("<button on.call=\"greet(\"></button>", TextSize::new(8), &sample_mappings(), &host);
        assert!(result.is_some());
        assert_eq!(result.unwrap().signatures.len(), 1);
    }

    #[test]
    fn returns_none_outside_any_expression() {
        let mut mappings = sample_mappings();
        mappings.mappings.clear();
        let host = FakeAnalysisHost::default();
        assert!(signature_help("<p>hi</p>", TextSize::new(2), &mappings, &host).is_none());
    }
}
