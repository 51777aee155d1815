//! `Transformation` and `Mapping` — spec.md §3.
//!
//! The arithmetic that walks these structures (forward/inverse mapping) is
//! in `shadow::algebra`, which is the hard part this crate exists for.
//! This module only holds the data and the invariant checks §8 asks for.

use crate::base::ByteRange;
use crate::model::Expression;

/// A single rewritten identifier inside an expression's shadow placeholder.
///
/// `offset_delta` is the number of bytes the shadow form is *longer* than
/// the HTML form by. Per `spec.md` §3, member-of-this rewriting
/// (`X` -> `_this.X`) always has `offset_delta = 6` (`len("_this.")`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub html_range: ByteRange,
    pub shadow_range: ByteRange,
    pub offset_delta: i32,
}

impl Transformation {
    pub fn member_of_this(html_range: ByteRange, shadow_range: ByteRange) -> Self {
        Self {
            html_range,
            shadow_range,
            offset_delta: 6,
        }
    }
}

/// One expression's correspondence between its HTML span and its shadow
/// placeholder, plus the per-identifier transformations inside it.
///
/// Invariants (`spec.md` §3):
/// - `shadow_value_range ⊆ shadow_block_range`.
/// - each `Transformation.shadow_range` lies inside `shadow_value_range`.
/// - `transformations` are ordered by `html_range.start` and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub expression: Expression,
    pub shadow_block_range: ByteRange,
    pub shadow_value_range: ByteRange,
    pub transformations: Vec<Transformation>,
}

impl Mapping {
    pub fn new(
        expression: Expression,
        shadow_block_range: ByteRange,
        shadow_value_range: ByteRange,
        transformations: Vec<Transformation>,
    ) -> Self {
        debug_assert!(shadow_block_range.contains_range(shadow_value_range));
        for t in &transformations {
            debug_assert!(shadow_value_range.contains_range(t.shadow_range));
            debug_assert!(expression_contains(&expression, t.html_range));
        }
        Self {
            expression,
            shadow_block_range,
            shadow_value_range,
            transformations,
        }
    }

    /// The check-range used to decide whether a cursor offset belongs to
    /// this mapping (`spec.md` §4.D): the HTML span for bindings, or the
    /// HTML span extended by ±2 bytes for interpolations (to reach `${`
    /// and `}`). This spec fixes the extension to be symmetric (§9 Open
    /// Questions).
    pub fn check_range(&self, text_len: u32) -> ByteRange {
        if self.expression.is_interpolation() {
            let start = self
                .expression
                .html_span
                .start()
                .checked_sub(2.into())
                .unwrap_or_default();
            let end = (self.expression.html_span.end() + 2.into())
                .min((text_len as u32).into());
            ByteRange::new(start, end)
        } else {
            self.expression.html_span
        }
    }

    /// Finds the transformation whose `shadow_range` contains `shadow_offset`,
    /// strictly (used by the inverse-mapping "natural token range" rule).
    pub fn transformation_containing(&self, shadow_offset: text_size::TextSize) -> Option<&Transformation> {
        self.transformations
            .iter()
            .find(|t| t.shadow_range.start() <= shadow_offset && shadow_offset < t.shadow_range.end())
    }
}

fn expression_contains(expression: &Expression, range: ByteRange) -> bool {
    expression.html_span.contains_range(range)
}
