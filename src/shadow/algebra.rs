//! The mapping algebra (`spec.md` §4.C): the reversible arithmetic between
//! HTML and shadow byte offsets. This is the hardest and most heavily
//! tested part of the crate — see §8 invariants 2-5 and scenarios S1/S2.

use crate::base::{ByteRange, TextSize};
use crate::model::Mapping;

/// Forward map: an HTML offset inside `mapping.expression.html_span` (or
/// its check-range extension) to the corresponding shadow offset.
///
/// ```text
/// rel   = o - expression.htmlSpan.start
/// delta = sum of t.offsetDelta for every transformation t with
///         (t.htmlRange.start - expression.htmlSpan.start) < rel
/// shadowOffset = clamp(m.shadowValueRange.start + rel + delta,
///                     m.shadowValueRange.start, m.shadowValueRange.end)
/// ```
/// Plus the empty-interpolation nudge: when the expression is an *empty*
/// interpolation (`htmlSpan` has zero width) and `o` is its start, advance
/// the result by one byte if that keeps it inside `shadowValueRange` (§8
/// invariant 4). A populated interpolation never nudges: its identifier
/// already has a `Transformation` to land in.
pub fn forward(mapping: &Mapping, o: TextSize) -> TextSize {
    let expr_start = i64::from(u32::from(mapping.expression.html_span.start()));
    let rel = i64::from(u32::from(o)) - expr_start;

    let delta: i64 = mapping
        .transformations
        .iter()
        .filter(|t| i64::from(u32::from(t.html_range.start())) - expr_start < rel)
        .map(|t| i64::from(t.offset_delta))
        .sum();

    let vbase = i64::from(u32::from(mapping.shadow_value_range.start()));
    let vend = i64::from(u32::from(mapping.shadow_value_range.end()));
    let mut shadow_offset = (vbase + rel + delta).clamp(vbase, vend);

    let is_empty_expression = mapping.expression.html_span.start() == mapping.expression.html_span.end();
    if mapping.expression.is_interpolation() && is_empty_expression && o == mapping.expression.html_span.start() {
        let nudged = shadow_offset + 1;
        if nudged <= vend {
            shadow_offset = nudged;
        }
    }

    TextSize::from(shadow_offset as u32)
}

/// Inverse map: a shadow span to the HTML range it corresponds to.
///
/// If `shadow_span.start()` falls strictly inside a [`Transformation`],
/// that transformation's `html_range` is returned directly (§8 invariant
/// 5, the "natural token range" preferred for references/hover).
/// Otherwise the linear reconstruction in `spec.md` §4.C is used, clamped
/// into the expression's `html_span`. Returns `None` when the clamped
/// result would be inverted (`start > end`) — per §7 error kind 6, an
/// invalid range is dropped rather than collapsed to a degenerate point.
///
/// [`Transformation`]: crate::model::Transformation
pub fn inverse(mapping: &Mapping, shadow_span: ByteRange) -> Option<ByteRange> {
    let vs = shadow_span.start();
    let ve = shadow_span.end();

    if let Some(t) = mapping.transformation_containing(vs) {
        return Some(t.html_range);
    }

    let delta_start: i64 = mapping
        .transformations
        .iter()
        .filter(|t| t.shadow_range.end() <= vs)
        .map(|t| i64::from(t.offset_delta))
        .sum();
    let delta_end: i64 = mapping
        .transformations
        .iter()
        .filter(|t| t.shadow_range.end() <= ve)
        .map(|t| i64::from(t.offset_delta))
        .sum();

    let base = i64::from(u32::from(mapping.expression.html_span.start()));
    let vbase = i64::from(u32::from(mapping.shadow_value_range.start()));

    let hs = base + (i64::from(u32::from(vs)) - vbase) - delta_start;
    let he = base + (i64::from(u32::from(ve)) - vbase) - delta_end;

    let span_start = i64::from(u32::from(mapping.expression.html_span.start()));
    let span_end = i64::from(u32::from(mapping.expression.html_span.end()));

    let clamped_start = hs.clamp(span_start, span_end);
    let clamped_end = he.clamp(span_start, span_end);

    if clamped_start > clamped_end {
        return None;
    }

    Some(ByteRange::new(
        TextSize::from(clamped_start as u32),
        TextSize::from(clamped_end as u32),
    ))
}
