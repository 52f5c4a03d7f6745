//! Method descriptors (JVMS §4.3.3).

use std::fmt;
use std::str::FromStr;

use crate::model::types::Type;
use crate::parser::signature::{self, Error};

/// The shape of a method: its parameter types, in order, and its return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    /// The return type, which may be `void`.
    return_type: Type,
    /// The parameter types in declaration order. None of them is `void`.
    argument_types: Vec<Type>,
}

impl MethodSignature {
    pub fn new(return_type: Type, argument_types: Vec<Type>) -> Self {
        MethodSignature {
            return_type: return_type,
            argument_types: argument_types,
        }
    }

    /// Parses a complete method descriptor such as `(Ljava/lang/String;I)V`.
    pub fn parse(descriptor: &str) -> Result<Self, Error> {
        signature::parse_method_signature(descriptor)
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn argument_types(&self) -> &[Type] {
        &self.argument_types
    }

    /// Encodes this method as a descriptor.
    pub fn signature(&self) -> String {
        signature::get_method_signature(&self.return_type, &self.argument_types)
    }

    /// The number of local variable slots taken by the arguments, not counting `this`.
    pub fn argument_size(&self) -> usize {
        self.argument_types.iter().map(Type::size).sum()
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (", self.return_type)?;
        for (i, argument_type) in self.argument_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", argument_type)?;
        }
        f.write_str(")")
    }
}

impl FromStr for MethodSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        MethodSignature::parse(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::types::STRING;

    #[test]
    fn encodes_and_displays() {
        let method = MethodSignature::new(Type::array(Type::INT, 1),
                                          vec![STRING.clone(), Type::LONG, Type::BOOLEAN]);
        assert_eq!(method.signature(), "(Ljava/lang/String;JZ)[I");
        assert_eq!(method.to_string(), "int[] (java.lang.String, long, boolean)");
        assert_eq!(method.argument_size(), 4);
    }

    #[test]
    fn parses_descriptor() {
        let method: MethodSignature = "([Ljava/lang/String;)V".parse().unwrap();
        assert_eq!(*method.return_type(), Type::VOID);
        assert_eq!(method.argument_types(), &[Type::array(STRING.clone(), 1)][..]);
        assert_eq!(method.to_string(), "void (java.lang.String[])");
    }

    #[test]
    fn no_arguments() {
        let method = MethodSignature::parse("()D").unwrap();
        assert!(method.argument_types().is_empty());
        assert_eq!(method.argument_size(), 0);
        assert_eq!(method.to_string(), "double ()");
    }
}
