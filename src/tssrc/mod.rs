//! TypeScript-like source scanning for component discovery (`spec.md`
//! §4.B "Discovery rules for TypeScript-like sources").

mod kebab;
mod scanner;

pub use kebab::{kebab_case, value_converter_convention_name};
pub use scanner::{
    class_name_range, decorator_name_literal_range, member_names_of_class, property_name_range,
    scan_source, ComponentDecorator, DecoratorArg, ScannedClass,
};
