//! Scans a TypeScript-like source file for component-defining classes
//! (`spec.md` §4.B "Discovery rules for TypeScript-like sources").
//!
//! Parsing uses `oxc_parser` exactly as in the reference template-parser's
//! embedded-script handling (`OxcParser::new(allocator, source,
//! source_type).parse()`), and class/decorator discovery walks the AST
//! with `oxc_ast_visit::Visit`, the same trait the reference analyzer
//! uses to build its scope tree.

use oxc_allocator::Allocator;
use oxc_ast::ast::{ClassElement, Decorator, Expression, ObjectPropertyKind, PropertyKey};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser as OxcParser;
use oxc_span::{GetSpan, SourceType};
use smol_str::SmolStr;
use tracing::debug;

use crate::model::Bindable;

/// A decorator argument resolved to the two shapes §4.B allows: a bare
/// string literal, or an object literal exposing a named property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoratorArg {
    StringLiteral(SmolStr),
    Object { name_property: Option<SmolStr> },
    None,
}

impl DecoratorArg {
    /// The name this argument implies, if any (string literal, or an
    /// object's `name`/`attribute` property).
    pub fn explicit_name(&self) -> Option<&str> {
        match self {
            DecoratorArg::StringLiteral(s) => Some(s.as_str()),
            DecoratorArg::Object { name_property } => name_property.as_deref(),
            DecoratorArg::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentDecorator {
    CustomElement(DecoratorArg),
    CustomAttribute(DecoratorArg),
    ValueConverter(DecoratorArg),
}

/// One discovered `class` declaration, with just the facts
/// [`crate::index`] needs to apply the naming/precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedClass {
    pub class_name: SmolStr,
    pub decorator: Option<ComponentDecorator>,
    pub bindables: Vec<Bindable>,
}

/// Parses `source` as TypeScript and returns every top-level class found,
/// regardless of whether it carries a component decorator — convention
/// rules (class-name suffix, sibling-file) are applied by the caller.
pub fn scan_source(source: &str) -> Vec<ScannedClass> {
    let allocator = Allocator::default();
    let source_type = SourceType::ts().with_module(true);
    let parse_result = OxcParser::new(&allocator, source, source_type).parse();

    if !parse_result.errors.is_empty() {
        debug!(error_count = parse_result.errors.len(), "ts parse produced diagnostics");
    }

    let mut visitor = ClassVisitor::default();
    visitor.visit_program(&parse_result.program);
    visitor.classes
}

#[derive(Default)]
struct ClassVisitor {
    classes: Vec<ScannedClass>,
}

impl<'a> Visit<'a> for ClassVisitor {
    fn visit_class(&mut self, class: &oxc_ast::ast::Class<'a>) {
        if let Some(id) = &class.id {
            let class_name = SmolStr::new(id.name.as_str());
            let decorator = class.decorators.iter().find_map(component_decorator_of);
            let bindables = class
                .body
                .body
                .iter()
                .filter_map(bindable_of_class_element)
                .collect();
            self.classes.push(ScannedClass {
                class_name,
                decorator,
                bindables,
            });
        }
        walk::walk_class(self, class);
    }
}

fn component_decorator_of(decorator: &Decorator) -> Option<ComponentDecorator> {
    let (name, arg) = decorator_name_and_arg(decorator)?;
    match name {
        "customElement" => Some(ComponentDecorator::CustomElement(arg)),
        "customAttribute" => Some(ComponentDecorator::CustomAttribute(arg)),
        "valueConverter" => Some(ComponentDecorator::ValueConverter(arg)),
        _ => None,
    }
}

fn bindable_of_class_element(element: &ClassElement) -> Option<Bindable> {
    let ClassElement::PropertyDefinition(prop) = element else {
        return None;
    };
    let decorator = prop.decorators.iter().find(|d| decorator_name(d) == Some("bindable"))?;
    let property_name = property_key_name(&prop.key)?;
    let attribute_name = decorator_arg(decorator).and_then(|arg| {
        arg.explicit_name().map(SmolStr::new)
    });

    let mut bindable = Bindable::new(property_name);
    if let Some(attribute_name) = attribute_name {
        bindable = bindable.with_attribute_name(attribute_name);
    }
    Some(bindable)
}

fn decorator_name<'a>(decorator: &'a Decorator) -> Option<&'a str> {
    match &decorator.expression {
        Expression::Identifier(id) => Some(id.name.as_str()),
        Expression::CallExpression(call) => match &call.callee {
            Expression::Identifier(id) => Some(id.name.as_str()),
            _ => None,
        },
        _ => None,
    }
}

fn decorator_arg(decorator: &Decorator) -> Option<DecoratorArg> {
    match &decorator.expression {
        Expression::Identifier(_) => Some(DecoratorArg::None),
        Expression::CallExpression(call) => Some(
            call.arguments
                .first()
                .and_then(|a| a.as_expression())
                .map(expression_to_decorator_arg)
                .unwrap_or(DecoratorArg::None),
        ),
        _ => None,
    }
}

fn decorator_name_and_arg(decorator: &Decorator) -> Option<(&str, DecoratorArg)> {
    let name = decorator_name(decorator)?;
    let arg = decorator_arg(decorator).unwrap_or(DecoratorArg::None);
    Some((name, arg))
}

fn expression_to_decorator_arg(expr: &Expression) -> DecoratorArg {
    match expr {
        Expression::StringLiteral(lit) => DecoratorArg::StringLiteral(SmolStr::new(lit.value.as_str())),
        Expression::ObjectExpression(obj) => {
            let name_property = obj.properties.iter().find_map(|p| {
                let ObjectPropertyKind::ObjectProperty(prop) = p else {
                    return None;
                };
                let key_name = property_key_name(&prop.key)?;
                if key_name == "name" || key_name == "attribute" {
                    string_literal_value(&prop.value).map(SmolStr::new)
                } else {
                    None
                }
            });
            DecoratorArg::Object { name_property }
        }
        _ => DecoratorArg::None,
    }
}

fn property_key_name<'a>(key: &'a PropertyKey) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        _ => None,
    }
}

fn string_literal_value<'a>(expr: &'a Expression) -> Option<&'a str> {
    match expr {
        Expression::StringLiteral(lit) => Some(lit.value.as_str()),
        _ => None,
    }
}

/// Instance property and method names declared directly on the class
/// named `class_name` (`spec.md` §A.1: the shadow synthesiser's member
/// list, cached by the caller keyed on view-model source text rather
/// than recomputed on every keystroke). Purely syntactic: no type
/// checking, no inherited members, `static` members excluded since a
/// view binds to an instance.
pub fn member_names_of_class(source: &str, class_name: &str) -> Vec<SmolStr> {
    let allocator = Allocator::default();
    let source_type = SourceType::ts().with_module(true);
    let parse_result = OxcParser::new(&allocator, source, source_type).parse();

    let mut visitor = MemberVisitor { class_name, members: Vec::new() };
    visitor.visit_program(&parse_result.program);
    visitor.members
}

struct MemberVisitor<'n> {
    class_name: &'n str,
    members: Vec<SmolStr>,
}

impl<'a, 'n> Visit<'a> for MemberVisitor<'n> {
    fn visit_class(&mut self, class: &oxc_ast::ast::Class<'a>) {
        let matches = class.id.as_ref().is_some_and(|id| id.name.as_str() == self.class_name);
        if matches {
            for element in &class.body.body {
                match element {
                    ClassElement::PropertyDefinition(prop) if !prop.r#static => {
                        if let Some(name) = property_key_name(&prop.key) {
                            self.members.push(SmolStr::new(name));
                        }
                    }
                    ClassElement::MethodDefinition(method) if !method.r#static => {
                        if let Some(name) = property_key_name(&method.key) {
                            self.members.push(SmolStr::new(name));
                        }
                    }
                    _ => {}
                }
            }
        }
        walk::walk_class(self, class);
    }
}

/// The byte range of the identifier in `class <class_name> { ... }`,
/// used by go-to-definition on an element/attribute tag name (`spec.md`
/// §4.D "Definition": "locate the class name in the paired class file").
pub fn class_name_range(source: &str, class_name: &str) -> Option<crate::base::ByteRange> {
    let allocator = Allocator::default();
    let source_type = SourceType::ts().with_module(true);
    let parse_result = OxcParser::new(&allocator, source, source_type).parse();

    let mut visitor = ClassNameRangeVisitor { class_name, range: None };
    visitor.visit_program(&parse_result.program);
    visitor.range
}

struct ClassNameRangeVisitor<'n> {
    class_name: &'n str,
    range: Option<crate::base::ByteRange>,
}

impl<'a, 'n> Visit<'a> for ClassNameRangeVisitor<'n> {
    fn visit_class(&mut self, class: &oxc_ast::ast::Class<'a>) {
        if let Some(id) = &class.id {
            if id.name.as_str() == self.class_name {
                self.range = Some(crate::base::range(id.span.start as usize, id.span.end as usize));
            }
        }
        walk::walk_class(self, class);
    }
}

/// The byte range of the property-key identifier for `property_name` on
/// `class_name`, used by go-to-definition on a bindable attribute
/// (`spec.md` §4.D "Definition": "for bindables, locate the property").
pub fn property_name_range(source: &str, class_name: &str, property_name: &str) -> Option<crate::base::ByteRange> {
    let allocator = Allocator::default();
    let source_type = SourceType::ts().with_module(true);
    let parse_result = OxcParser::new(&allocator, source, source_type).parse();

    let mut visitor = PropertyRangeVisitor { class_name, property_name, range: None };
    visitor.visit_program(&parse_result.program);
    visitor.range
}

struct PropertyRangeVisitor<'n> {
    class_name: &'n str,
    property_name: &'n str,
    range: Option<crate::base::ByteRange>,
}

impl<'a, 'n> Visit<'a> for PropertyRangeVisitor<'n> {
    fn visit_class(&mut self, class: &oxc_ast::ast::Class<'a>) {
        let matches = class.id.as_ref().is_some_and(|id| id.name.as_str() == self.class_name);
        if matches {
            for element in &class.body.body {
                let (key, span) = match element {
                    ClassElement::PropertyDefinition(prop) => (&prop.key, prop.key.span()),
                    ClassElement::MethodDefinition(method) => (&method.key, method.key.span()),
                    _ => continue,
                };
                if property_key_name(key) == Some(self.property_name) {
                    self.range = Some(crate::base::range(span.start as usize, span.end as usize));
                    break;
                }
            }
        }
        walk::walk_class(self, class);
    }
}

/// The byte range of the string naming a `@customElement`/
/// `@customAttribute` decorator on `class_name` — the bare string
/// argument's content, or an object argument's `name`/`attribute`
/// property value (`spec.md` §4.D "Rename": "rewrite the
/// `customElement('<new>')` argument"). `None` when the class has no
/// such decorator, or the decorator's argument isn't a literal this
/// crate can rewrite in place.
pub fn decorator_name_literal_range(source: &str, class_name: &str) -> Option<crate::base::ByteRange> {
    let allocator = Allocator::default();
    let source_type = SourceType::ts().with_module(true);
    let parse_result = OxcParser::new(&allocator, source, source_type).parse();

    let mut visitor = DecoratorLiteralVisitor { class_name, range: None };
    visitor.visit_program(&parse_result.program);
    visitor.range
}

struct DecoratorLiteralVisitor<'n> {
    class_name: &'n str,
    range: Option<crate::base::ByteRange>,
}

impl<'a, 'n> Visit<'a> for DecoratorLiteralVisitor<'n> {
    fn visit_class(&mut self, class: &oxc_ast::ast::Class<'a>) {
        let matches = class.id.as_ref().is_some_and(|id| id.name.as_str() == self.class_name);
        if matches {
            for decorator in &class.decorators {
                let Some(name) = decorator_name(decorator) else { continue };
                if name != "customElement" && name != "customAttribute" {
                    continue;
                }
                let Expression::CallExpression(call) = &decorator.expression else { continue };
                let Some(arg) = call.arguments.first().and_then(|a| a.as_expression()) else { continue };
                if let Some(range) = literal_range_in_decorator_arg(arg) {
                    self.range = Some(range);
                }
            }
        }
        walk::walk_class(self, class);
    }
}

fn literal_range_in_decorator_arg(expr: &Expression) -> Option<crate::base::ByteRange> {
    match expr {
        Expression::StringLiteral(lit) => {
            Some(crate::base::range(lit.span.start as usize + 1, lit.span.end as usize - 1))
        }
        Expression::ObjectExpression(obj) => obj.properties.iter().find_map(|p| {
            let ObjectPropertyKind::ObjectProperty(prop) = p else {
                return None;
            };
            let key_name = property_key_name(&prop.key)?;
            if key_name != "name" && key_name != "attribute" {
                return None;
            }
            let Expression::StringLiteral(lit) = &prop.value else {
                return None;
            };
            Some(crate::base::range(lit.span.start as usize + 1, lit.span.end as usize - 1))
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_custom_element_with_string_arg() {
        let src = "@customElement('my-input')\nexport class MyInput {}\n";
        let classes = scan_source(src);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].class_name, "MyInput");
        match &classes[0].decorator {
            Some(ComponentDecorator::CustomElement(arg)) => {
                assert_eq!(arg.explicit_name(), Some("my-input"));
            }
            other => panic!("expected CustomElement decorator, got {other:?}"),
        }
    }

    #[test]
    fn discovers_custom_element_with_object_arg() {
        let src = "@customElement({ name: 'my-input' })\nexport class MyInput {}\n";
        let classes = scan_source(src);
        match &classes[0].decorator {
            Some(ComponentDecorator::CustomElement(arg)) => {
                assert_eq!(arg.explicit_name(), Some("my-input"));
            }
            other => panic!("expected CustomElement decorator, got {other:?}"),
        }
    }

    #[test]
    fn discovers_bindable_with_explicit_attribute() {
        let src = "export class MyInput {\n  @bindable({ attribute: 'count-value' }) count;\n}\n";
        let classes = scan_source(src);
        assert_eq!(classes[0].bindables.len(), 1);
        assert_eq!(classes[0].bindables[0].property_name, "count");
        assert_eq!(
            classes[0].bindables[0].attribute_name.as_deref(),
            Some("count-value")
        );
    }

    #[test]
    fn discovers_bare_bindable() {
        let src = "export class MyInput {\n  @bindable count;\n}\n";
        let classes = scan_source(src);
        assert_eq!(classes[0].bindables.len(), 1);
        assert_eq!(classes[0].bindables[0].property_name, "count");
        assert!(classes[0].bindables[0].attribute_name.is_none());
    }

    #[test]
    fn class_with_no_decorator_has_no_component_decorator() {
        let src = "export class PlainHelper {}\n";
        let classes = scan_source(src);
        assert_eq!(classes.len(), 1);
        assert!(classes[0].decorator.is_none());
    }

    #[test]
    fn value_converter_decorator_recognised() {
        let src = "@valueConverter('upper')\nexport class Upper {}\n";
        let classes = scan_source(src);
        match &classes[0].decorator {
            Some(ComponentDecorator::ValueConverter(arg)) => {
                assert_eq!(arg.explicit_name(), Some("upper"));
            }
            other => panic!("expected ValueConverter decorator, got {other:?}"),
        }
    }

    #[test]
    fn member_names_collects_properties_and_methods() {
        let src = "export class AppViewModel {\n  message = 'hi';\n  count;\n  greet() {}\n  static helper() {}\n}\n";
        let members = member_names_of_class(src, "AppViewModel");
        assert!(members.contains(&SmolStr::new("message")));
        assert!(members.contains(&SmolStr::new("count")));
        assert!(members.contains(&SmolStr::new("greet")));
        assert!(!members.contains(&SmolStr::new("helper")));
    }

    #[test]
    fn member_names_empty_for_unknown_class() {
        let src = "export class AppViewModel {\n  message;\n}\n";
        let members = member_names_of_class(src, "OtherClass");
        assert!(members.is_empty());
    }

    #[test]
    fn class_name_range_locates_identifier() {
        let src = "export class MyInput {}\n";
        let range = class_name_range(src, "MyInput").unwrap();
        assert_eq!(&src[usize::from(range.start())..usize::from(range.end())], "MyInput");
    }

    #[test]
    fn property_name_range_locates_bindable_key() {
        let src = "export class MyInput {\n  count;\n}\n";
        let range = property_name_range(src, "MyInput", "count").unwrap();
        assert_eq!(&src[usize::from(range.start())..usize::from(range.end())], "count");
    }

    #[test]
    fn decorator_name_literal_range_locates_bare_string_argument() {
        let src = "@customElement('my-input')\nexport class MyInput {}\n";
        let range = decorator_name_literal_range(src, "MyInput").unwrap();
        assert_eq!(&src[usize::from(range.start())..usize::from(range.end())], "my-input");
    }

    #[test]
    fn decorator_name_literal_range_locates_object_name_property() {
        let src = "@customElement({ name: 'my-input' })\nexport class MyInput {}\n";
        let range = decorator_name_literal_range(src, "MyInput").unwrap();
        assert_eq!(&src[usize::from(range.start())..usize::from(range.end())], "my-input");
    }

    #[test]
    fn decorator_name_literal_range_absent_without_decorator() {
        let src = "export class MyInput {}\n";
        assert!(decorator_name_literal_range(src, "MyInput").is_none());
    }
}
