//! Conversion from a host runtime's view of a class to a `Type`.
//!
//! Reflection itself is left to the caller: anything that can name a class the way
//! `java.lang.Class#getName` does can describe it as a `RuntimeClass`.

use crate::model::types::{BasicType, Type};
use crate::parser::signature::{self, Error};

/// A class object as reported by a host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeClass {
    /// A primitive class, named by its keyword: `int`, `void`, ...
    Primitive(String),
    /// An array class, named by its runtime name, which is already a signature with either
    /// package separator: `[I`, `[[Ljava.lang.String;`.
    Array(String),
    /// A class or interface, named by its fully-qualified name.
    Reference(String),
}

impl Type {
    /// Returns the type denoted by a runtime class.
    ///
    /// # Panics
    ///
    /// Panics if a primitive class is not one of the nine primitive keywords, or if a reference
    /// class has an empty name. No runtime reports such a class, so this indicates a bug in the
    /// caller.
    pub fn from_runtime_class(class: &RuntimeClass) -> Result<Type, Error> {
        match *class {
            RuntimeClass::Array(ref name) => name.parse(),
            RuntimeClass::Reference(ref name) => Ok(Type::object(name)),
            RuntimeClass::Primitive(ref name) => match BasicType::from_name(name) {
                Some(basic_type) => Ok(Type::basic(basic_type).clone()),
                None => panic!("unknown primitive type {}", name),
            },
        }
    }
}

/// Converts each runtime class in turn.
pub fn types_of(classes: &[RuntimeClass]) -> Result<Vec<Type>, Error> {
    classes.iter().map(Type::from_runtime_class).collect()
}

/// Builds the method descriptor for a method with the given parameter and return classes.
pub fn method_signature_of(parameters: &[RuntimeClass], return_class: &RuntimeClass)
        -> Result<String, Error> {
    let argument_types = types_of(parameters)?;
    let return_type = Type::from_runtime_class(return_class)?;
    Ok(signature::get_method_signature(&return_type, &argument_types))
}
