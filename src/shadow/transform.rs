//! Identifier rewriting for shadow placeholders (`spec.md` §4.C): every
//! identifier token in an expression's pre-pipe base that names a known
//! view-model member becomes `_this.<name>`. Deliberately not a real
//! expression parser — see `spec.md` §9 Open Questions — so member-access
//! properties (`foo.bar`) are left alone only because `bar` is immediately
//! preceded by a `.` or because it never appears in the member list itself.
//!
//! Tokenization uses `logos`, the same crate and iterator shape as the
//! teacher's own `parser::lexer` (a `logos::Lexer` wrapped to track byte
//! offsets manually, matching unmatched spans to `Err(())`).

use logos::Logos;
use rustc_hash::FxHashSet;

use crate::base::{range, ByteRange};

const RESERVED: &[&str] = &["this", "true", "false", "null", "undefined"];

/// Maximal runs of identifier characters, split by whether the run starts
/// with a digit. A digit-led run is not an identifier (`spec.md` §8:
/// "identifier adjacent to digits (not rewritten)") — `Word` is matched
/// with the same continuation-character class so both variants still
/// consume the whole run, leaving the non-identifier one untouched.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
enum Token {
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Word,
    #[regex(r"[0-9][A-Za-z0-9_$]*")]
    DigitLed,
}

struct IdentifierSpan {
    start: usize,
    end: usize,
}

fn identifier_spans(text: &str) -> Vec<IdentifierSpan> {
    let mut lexer = Token::lexer(text);
    let mut offset = 0usize;
    let mut spans = Vec::new();

    while let Some(token) = lexer.next() {
        let slice_len = lexer.slice().len();
        if token == Ok(Token::Word) {
            spans.push(IdentifierSpan { start: offset, end: offset + slice_len });
        }
        offset += slice_len;
    }
    spans
}

/// One identifier rewritten inside a base expression, with offsets
/// relative to the start of that base text (on both sides of the rewrite).
pub struct BaseTransformation {
    pub html_range: ByteRange,
    pub shadow_range: ByteRange,
    pub offset_delta: i32,
}

pub struct TransformedBase {
    pub shadow_text: String,
    pub transformations: Vec<BaseTransformation>,
}

/// Rewrites every identifier in `base` that is a member of `members` to
/// `_this.<name>`, skipping reserved words and identifiers immediately
/// following a `.` (property access on something other than the view
/// model).
pub fn transform_base(base: &str, members: &FxHashSet<&str>) -> TransformedBase {
    let spans = identifier_spans(base);
    let mut shadow_text = String::with_capacity(base.len() + 16);
    let mut transformations = Vec::new();
    let mut last = 0usize;

    for span in &spans {
        let word_text = &base[span.start..span.end];
        let preceded_by_dot = span.start > 0 && base.as_bytes()[span.start - 1] == b'.';
        let rewrite = !preceded_by_dot && !RESERVED.contains(&word_text) && members.contains(word_text);

        shadow_text.push_str(&base[last..span.start]);

        if rewrite {
            let shadow_start = shadow_text.len();
            shadow_text.push_str("_this.");
            shadow_text.push_str(word_text);
            let shadow_end = shadow_text.len();
            transformations.push(BaseTransformation {
                html_range: range(span.start, span.end),
                shadow_range: range(shadow_start, shadow_end),
                offset_delta: 6,
            });
        } else {
            shadow_text.push_str(word_text);
        }

        last = span.end;
    }
    shadow_text.push_str(&base[last..]);

    TransformedBase { shadow_text, transformations }
}
