//! Shadow layout construction (`spec.md` §4.C): turns a view's extracted
//! `Expression`s into the shadow TypeScript surface text plus the
//! `Mapping` for each expression.
//!
//! Layout, fixed top to bottom:
//! ```text
//! // Auto-generated shadow surface. Do not edit.
//! // View model: <fs path>
//! import type { <Class> } from "<fs path>";
//! declare const _this: <Class>;
//! declare function <converter>(value: any, ...args: any[]): any;  // per used converter
//! // Expressions
//! const ___expr_0 = (<transformed base><pipe suffix>); // Origin: <kind>
//! ...
//! ```

use rustc_hash::FxHashSet;

use crate::base::{range, TextSize};
use crate::index::ComponentIndex;
use crate::model::{ComponentKind, Expression, ExpressionKind, Mapping, Transformation};
use crate::shadow::transform::transform_base;

pub struct ShadowLayout {
    pub shadow_text: String,
    pub mappings: Vec<Mapping>,
}

/// Builds the complete shadow document for one view.
///
/// `members` is the set of view-model property/method names the host
/// reports for `view_model_fs_path` — the only names eligible for
/// `_this.` rewriting. `index` resolves pipe-target names to a known
/// value converter before a `declare function` line is emitted for them
/// (`spec.md` §4.C: "and is present in the Component Index").
pub fn build(
    view_model_class_name: &str,
    view_model_fs_path: &str,
    expressions: &[Expression],
    members: &FxHashSet<&str>,
    index: &ComponentIndex,
) -> ShadowLayout {
    let mut text = String::new();
    text.push_str("// Auto-generated shadow surface. Do not edit.\n");
    text.push_str(&format!("// View model: {view_model_fs_path}\n"));
    text.push_str(&format!(
        "import type {{ {view_model_class_name} }} from \"{view_model_fs_path}\";\n"
    ));
    text.push_str(&format!("declare const _this: {view_model_class_name};\n"));

    for name in used_value_converters(expressions, index) {
        text.push_str(&format!("declare function {name}(value: any, ...args: any[]): any;\n"));
    }
    text.push_str("// Expressions\n");

    let mut mappings = Vec::with_capacity(expressions.len());
    for (i, expr) in expressions.iter().enumerate() {
        let (base, pipe_suffix) = expr.split_pipe();

        let (transformed_text, base_transformations) = if base.trim().is_empty() {
            ("_this".to_string(), Vec::new())
        } else {
            let out = transform_base(base, members);
            (out.shadow_text, out.transformations)
        };

        let line_start = text.len();
        text.push_str(&format!("const ___expr_{i} = ("));
        let value_start = text.len();
        text.push_str(&transformed_text);
        if let Some(pipe) = pipe_suffix {
            text.push_str(pipe);
        }
        let value_end = text.len();
        text.push_str(&format!("); // Origin: {}\n", origin_label(expr)));
        let line_end = text.len();

        let shadow_block_range = range(line_start, line_end);
        let shadow_value_range = range(value_start, value_end);

        let html_base_start = expr.html_span.start();
        let shadow_value_start = TextSize::from(value_start as u32);
        let transformations: Vec<Transformation> = base_transformations
            .into_iter()
            .map(|t| Transformation {
                html_range: t.html_range + html_base_start,
                shadow_range: t.shadow_range + shadow_value_start,
                offset_delta: t.offset_delta,
            })
            .collect();

        mappings.push(Mapping::new(
            expr.clone(),
            shadow_block_range,
            shadow_value_range,
            transformations,
        ));
    }

    ShadowLayout { shadow_text: text, mappings }
}

fn origin_label(expr: &Expression) -> String {
    match &expr.kind {
        ExpressionKind::Interpolation => "Interpolation".to_string(),
        ExpressionKind::Binding { command } => format!("Binding:{command}"),
    }
}

/// Value converter names referenced by any expression's pipe suffix that
/// also resolve to a `ComponentKind::ValueConverter` in `index`, in
/// first-seen order, deduplicated. A pipe target the index doesn't know
/// about (not yet scanned, or simply not a converter) gets no declaration.
fn used_value_converters(expressions: &[Expression], index: &ComponentIndex) -> Vec<String> {
    let mut seen = Vec::new();
    for expr in expressions {
        if let (_, Some(pipe_suffix)) = expr.split_pipe() {
            for name in converter_names_in_pipe(pipe_suffix) {
                if seen.contains(&name) {
                    continue;
                }
                let is_value_converter = index
                    .get(&name)
                    .is_some_and(|component| component.kind == ComponentKind::ValueConverter);
                if is_value_converter {
                    seen.push(name);
                }
            }
        }
    }
    seen
}

/// `pipe_suffix` starts with the first `|` (e.g. `"| upper : 2 | lower"`).
/// Extracts the leading identifier of each `|`-separated segment.
fn converter_names_in_pipe(pipe_suffix: &str) -> Vec<String> {
    pipe_suffix
        .split('|')
        .skip(1)
        .filter_map(|segment| {
            let trimmed = segment.trim_start();
            let end = trimmed
                .find(|c: char| c.is_whitespace() || c == ':')
                .unwrap_or(trimmed.len());
            let name = &trimmed[..end];
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::range as r;
    use crate::base::Uri;

    fn members(names: &[&str]) -> FxHashSet<&str> {
        names.iter().copied().collect()
    }

    #[test]
    fn single_interpolation_produces_one_mapping() {
        let expr = Expression::interpolation("message", r(8, 15));
        let index = ComponentIndex::new();
        let layout = build("AppViewModel", "app.ts", &[expr], &members(&["message"]), &index);
        assert_eq!(layout.mappings.len(), 1);
        assert!(layout.shadow_text.contains("declare const _this: AppViewModel;"));
        assert!(layout.shadow_text.contains("_this.message"));
        assert!(!layout.shadow_text.contains("declare function"));
    }

    #[test]
    fn pipe_suffix_declares_converter_known_to_the_index() {
        let expr = Expression::interpolation("message | upper", r(8, 23));
        let index = ComponentIndex::new();
        index.update_for_file(&Uri::new("upper.ts"), "@valueConverter('upper')\nexport class Upper {}\n");
        let layout = build("AppViewModel", "app.ts", &[expr], &members(&["message"]), &index);
        assert!(layout.shadow_text.contains("declare function upper(value: any, ...args: any[]): any;"));
        assert!(layout.shadow_text.contains("_this.message | upper"));
    }

    #[test]
    fn pipe_suffix_unknown_to_the_index_gets_no_declaration() {
        let expr = Expression::interpolation("message | upper", r(8, 23));
        let index = ComponentIndex::new();
        let layout = build("AppViewModel", "app.ts", &[expr], &members(&["message"]), &index);
        assert!(!layout.shadow_text.contains("declare function"));
        assert!(layout.shadow_text.contains("_this.message | upper"));
    }

    #[test]
    fn empty_base_becomes_bare_this() {
        let expr = Expression::binding("bind", "", r(19, 19), "value.bind", "input");
        let index = ComponentIndex::new();
        let layout = build("AppViewModel", "app.ts", &[expr], &members(&[]), &index);
        assert!(layout.shadow_text.contains("const ___expr_0 = (_this);"));
        assert!(layout.mappings[0].transformations.is_empty());
    }

    #[test]
    fn shadow_value_range_holds_exactly_the_transformed_expression() {
        let expr = Expression::interpolation("message", r(8, 15));
        let index = ComponentIndex::new();
        let layout = build("AppViewModel", "app.ts", &[expr], &members(&["message"]), &index);
        let mapping = &layout.mappings[0];
        let range = mapping.shadow_value_range;
        let text = &layout.shadow_text[usize::from(range.start())..usize::from(range.end())];
        assert_eq!(text, "_this.message");
    }

    #[test]
    fn transformation_html_range_matches_original_identifier() {
        let expr = Expression::interpolation("message", r(8, 15));
        let index = ComponentIndex::new();
        let layout = build("AppViewModel", "app.ts", &[expr], &members(&["message"]), &index);
        let t = &layout.mappings[0].transformations[0];
        assert_eq!(t.html_range, r(8, 15));
    }
}
