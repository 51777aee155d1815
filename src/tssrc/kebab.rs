//! Convention-based name derivation (`spec.md` §4.B naming rules).

/// Converts `PascalCase`/`camelCase` identifiers to `kebab-case`, the
/// fallback naming rule used whenever a decorator has no explicit name
/// argument (§4.B rules 1-3) and for a `Bindable`'s implicit attribute
/// name (§3 GLOSSARY: Bindable).
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower_or_digit {
                out.push('-');
            }
            out.extend(c.to_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(c);
            prev_lower_or_digit = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

/// Strips a `ValueConverter` suffix by convention (§4.B rule 4), then
/// kebab-cases the remainder.
pub fn value_converter_convention_name(class_name: &str) -> String {
    let stripped = class_name.strip_suffix("ValueConverter").unwrap_or(class_name);
    kebab_case(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_pascal_case() {
        assert_eq!(kebab_case("MyInput"), "my-input");
    }

    #[test]
    fn converts_camel_case_property() {
        assert_eq!(kebab_case("countValue"), "count-value");
    }

    #[test]
    fn leaves_single_word_lowercase() {
        assert_eq!(kebab_case("count"), "count");
    }

    #[test]
    fn strips_value_converter_suffix() {
        assert_eq!(value_converter_convention_name("UpperValueConverter"), "upper");
    }
}
