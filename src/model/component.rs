//! `ComponentInfo` / `Bindable` — spec.md §3.

use crate::base::Uri;
use smol_str::SmolStr;

/// What kind of Aurelia component a `ComponentInfo` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Element,
    Attribute,
    ValueConverter,
}

/// A property of a component that accepts input from an attribute
/// (`spec.md` GLOSSARY: Bindable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindable {
    pub property_name: SmolStr,
    /// The attribute name, if it differs from the kebab-cased property
    /// name (explicit string/`attribute` argument to `@bindable`).
    pub attribute_name: Option<SmolStr>,
}

impl Bindable {
    pub fn new(property_name: impl Into<SmolStr>) -> Self {
        Self {
            property_name: property_name.into(),
            attribute_name: None,
        }
    }

    pub fn with_attribute_name(mut self, attribute_name: impl Into<SmolStr>) -> Self {
        self.attribute_name = Some(attribute_name.into());
        self
    }

    /// The effective attribute name: the explicit one, or the kebab-cased
    /// property name.
    pub fn effective_attribute_name(&self) -> SmolStr {
        match &self.attribute_name {
            Some(name) => name.clone(),
            None => SmolStr::new(crate::tssrc::kebab_case(&self.property_name)),
        }
    }
}

/// A custom element, custom attribute, or value converter discovered by
/// the Component Index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    pub uri: Uri,
    pub kind: ComponentKind,
    pub canonical_name: SmolStr,
    pub bindables: Vec<Bindable>,
    pub class_name: Option<SmolStr>,
    pub source_file: Option<Uri>,
}

impl ComponentInfo {
    pub fn new(uri: Uri, kind: ComponentKind, canonical_name: impl Into<SmolStr>) -> Self {
        Self {
            uri,
            kind,
            canonical_name: canonical_name.into(),
            bindables: Vec::new(),
            class_name: None,
            source_file: None,
        }
    }

    pub fn with_bindables(mut self, bindables: Vec<Bindable>) -> Self {
        self.bindables = bindables;
        self
    }

    pub fn with_class(mut self, class_name: impl Into<SmolStr>, source_file: Uri) -> Self {
        self.class_name = Some(class_name.into());
        self.source_file = Some(source_file);
        self
    }

    /// `attribute_name` is the attribute as written in HTML, command
    /// suffix and all (e.g. `count.bind`); only the part before the first
    /// `.` identifies the bindable.
    pub fn find_bindable(&self, attribute_name: &str) -> Option<&Bindable> {
        let base = attribute_name.split('.').next().unwrap_or(attribute_name);
        self.bindables
            .iter()
            .find(|b| b.effective_attribute_name() == base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Uri;

    #[test]
    fn find_bindable_strips_command_suffix_from_attribute_name() {
        let component = ComponentInfo::new(Uri::new("my-input.html"), ComponentKind::Element, "my-input")
            .with_bindables(vec![Bindable::new("count")]);
        assert_eq!(component.find_bindable("count.bind").map(|b| b.property_name.as_str()), Some("count"));
        assert_eq!(component.find_bindable("count").map(|b| b.property_name.as_str()), Some("count"));
    }

    #[test]
    fn find_bindable_matches_explicit_attribute_name_before_suffix() {
        let component = ComponentInfo::new(Uri::new("my-input.html"), ComponentKind::Element, "my-input")
            .with_bindables(vec![Bindable::new("isCount").with_attribute_name("count")]);
        assert_eq!(component.find_bindable("count.two-way").map(|b| b.property_name.as_str()), Some("isCount"));
    }
}
