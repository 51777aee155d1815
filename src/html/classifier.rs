//! The attribute classifier, `spec.md` §6:
//!
//! > an attribute name is *Aurelia* iff it is exactly one of the template
//! > controllers listed below, is one of the special attributes listed
//! > below, ends with one of the command suffixes listed below, or
//! > contains an internal `.` not at either end.

use smol_str::SmolStr;

pub const COMMAND_SUFFIXES: &[&str] = &[
    "bind",
    "trigger",
    "call",
    "delegate",
    "capture",
    "ref",
    "one-time",
    "to-view",
    "from-view",
    "two-way",
];

pub const TEMPLATE_CONTROLLERS: &[&str] = &[
    "repeat.for",
    "if",
    "else",
    "switch",
    "case",
    "default-case",
    "with",
    "portal",
    "view",
    "au-slot",
];

pub const SPECIAL_ATTRIBUTES: &[&str] = &["view-model", "ref", "element.ref"];

/// Every command suffix usable as a completion variant, excluding `.ref`
/// (`spec.md` §4.D: "suggest only the command-suffix set (excluding
/// `.ref`)").
pub fn command_suffixes_excluding_ref() -> impl Iterator<Item = &'static str> {
    COMMAND_SUFFIXES.iter().copied().filter(|s| *s != "ref")
}

fn has_internal_dot(name: &str) -> bool {
    match (name.find('.'), name.len()) {
        (Some(idx), len) => idx > 0 && idx < len - 1,
        (None, _) => false,
    }
}

/// Whether `name` is an Aurelia attribute, per the classifier above.
pub fn is_aurelia_attribute(name: &str) -> bool {
    TEMPLATE_CONTROLLERS.contains(&name)
        || SPECIAL_ATTRIBUTES.contains(&name)
        || COMMAND_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(&format!(".{suffix}")))
        || has_internal_dot(name)
}

/// The command portion of an Aurelia attribute name: everything after the
/// first `.`, or the whole name when there is no dot (bare template
/// controllers and `ref`). See `spec.md` GLOSSARY: "Command — the part
/// after `.` in an attribute name".
pub fn command_of(name: &str) -> SmolStr {
    match name.find('.') {
        Some(idx) => SmolStr::new(&name[idx + 1..]),
        None => SmolStr::new(name),
    }
}
