//! `Expression` — spec.md §3.
//!
//! ```text
//! { kind: Interpolation | Binding(command), text: string, htmlSpan: ByteRange,
//!   attributeName?: string, elementTag?: string }
//! ```

use crate::base::ByteRange;
use smol_str::SmolStr;

/// The two kinds of framework-specific snippet an HTML view can contain
/// (`spec.md` GLOSSARY: Interpolation, Binding).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionKind {
    /// `${ … }` inside text.
    Interpolation,
    /// An attribute whose name carries a command suffix, is a template
    /// controller, or is a special attribute (see the §6 classifier).
    /// The payload is the command, e.g. `bind`, `trigger`, `for`.
    Binding { command: SmolStr },
}

/// A single framework expression extracted from an HTML view.
///
/// Invariants (spec.md §3):
/// - `html_span` lies fully within the source HTML.
/// - For `Interpolation`, `html_span` is the *inner* range between `${` and
///   `}` (may be empty).
/// - For `Binding`, `html_span` is the attribute *value* range, stripped of
///   surrounding quotes (may be empty — an empty binding is treated as the
///   boolean literal `true`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub text: SmolStr,
    pub html_span: ByteRange,
    pub attribute_name: Option<SmolStr>,
    pub element_tag: Option<SmolStr>,
}

impl Expression {
    pub fn interpolation(text: impl Into<SmolStr>, html_span: ByteRange) -> Self {
        Self {
            kind: ExpressionKind::Interpolation,
            text: text.into(),
            html_span,
            attribute_name: None,
            element_tag: None,
        }
    }

    pub fn binding(
        command: impl Into<SmolStr>,
        text: impl Into<SmolStr>,
        html_span: ByteRange,
        attribute_name: impl Into<SmolStr>,
        element_tag: impl Into<SmolStr>,
    ) -> Self {
        Self {
            kind: ExpressionKind::Binding {
                command: command.into(),
            },
            text: text.into(),
            html_span,
            attribute_name: Some(attribute_name.into()),
            element_tag: Some(element_tag.into()),
        }
    }

    pub fn is_interpolation(&self) -> bool {
        matches!(self.kind, ExpressionKind::Interpolation)
    }

    pub fn command(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Binding { command } => Some(command.as_str()),
            ExpressionKind::Interpolation => None,
        }
    }

    /// The expression text split at the first top-level `|`, per
    /// `spec.md` §4.C: "If the expression text contains `|`, split into
    /// base (before the first `|`) and pipe suffix (from the first `|`
    /// onward)."
    pub fn split_pipe(&self) -> (&str, Option<&str>) {
        match self.text.find('|') {
            Some(idx) => (&self.text[..idx], Some(&self.text[idx..])),
            None => (&self.text, None),
        }
    }
}

/// A start/end tag byte range pair, emitted by the extractor for every
/// element (`spec.md` §4.A step 4) and consumed by semantic tokens (§4.D)
/// to pre-emit `aureliaElement`/`aureliaAttribute` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTagRange {
    pub name: SmolStr,
    pub start_tag_range: ByteRange,
    pub end_tag_range: Option<ByteRange>,
}
