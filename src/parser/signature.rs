//! Parsing and encoding of field and method signatures (JVMS §4.3).
//!
//! Every grammar rule is a nom parser over the remaining input. A rule never looks at anything
//! but the slice it is handed, and the number of characters a sub-parse consumed is simply the
//! difference between the lengths of the slice it received and the slice it returned. Parses can
//! therefore nest and run on any number of threads without sharing a cursor.
//!
//! Offsets and consumed counts are byte offsets into the UTF-8 input, which coincide with
//! character counts for the ASCII signatures found in practice.
//!
//! # Examples
//!
//! ```
//! use rust_jvm_signature::model::Type;
//! use rust_jvm_signature::parser::signature;
//!
//! let (ty, consumed) = signature::get_type("[Ljava/lang/String;").unwrap();
//! assert_eq!(ty.to_string(), "java.lang.String[]");
//! assert_eq!(consumed, 19);
//!
//! let args = signature::get_argument_types("(Ljava/lang/String;I)V").unwrap();
//! assert_eq!(signature::get_method_signature(&Type::VOID, &args), "(Ljava/lang/String;I)V");
//! ```

use std::sync::Arc;

use nom::bytes::complete::take_until;
use nom::character::complete::{char, one_of};
use nom::combinator::cut;
use nom::multi::{many1_count, many_till};
use nom::sequence::terminated;
use thiserror::Error;

use crate::model::method::MethodSignature;
use crate::model::types::{ArrayType, BasicType, ObjectType, Type, MAX_ARRAY_DIMENSIONS};
use crate::parser::nom_support::{whole, Input, ParseResult, SyntaxError};
use crate::util::names;

pub use crate::util::names::internal_type_name_to_signature;

/// The error returned for any malformed signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid signature {signature:?} at offset {offset}: {reason}")]
    InvalidSignature {
        /// The complete signature that was being parsed.
        signature: String,
        /// What was wrong at `offset`.
        reason: Reason,
        /// Byte offset into `signature` at which parsing failed.
        offset: usize,
    },
}

impl Error {
    fn from_syntax(signature: &str, error: SyntaxError) -> Error {
        Error::InvalidSignature {
            signature: String::from(signature),
            reason: error.reason,
            offset: signature.len() - error.input.len(),
        }
    }

    pub fn signature(&self) -> &str {
        match *self {
            Error::InvalidSignature { ref signature, .. } => signature,
        }
    }

    pub fn reason(&self) -> &Reason {
        match *self {
            Error::InvalidSignature { ref reason, .. } => reason,
        }
    }

    pub fn offset(&self) -> usize {
        match *self {
            Error::InvalidSignature { offset, .. } => offset,
        }
    }
}

/// The lower-level condition behind an `Error::InvalidSignature`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Reason {
    #[error("unexpected end of signature")]
    UnexpectedEnd,
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("expected {expected:?}, found {found:?}")]
    Expected { expected: char, found: char },
    #[error("method signature has no '('")]
    MissingOpenParen,
    #[error("reference type is not terminated by ';'")]
    UnterminatedReference,
    #[error("reference type has an empty class name")]
    EmptyClassName,
    #[error("unbalanced '<' and '>' in type arguments")]
    UnbalancedTypeArguments,
    #[error("{0} array dimensions exceed the maximum of 255")]
    TooManyDimensions(usize),
    #[error("array element type cannot be void")]
    VoidArrayElement,
    #[error("unexpected characters after the signature")]
    TrailingCharacters,
}

/// Parses the type at the start of `signature`, returning it together with the number of
/// characters it occupied. Anything after the type is ignored.
pub fn get_type(signature: &str) -> Result<(Type, usize), Error> {
    let (ty, consumed) = complete(signature, signature, field_type(signature))?;
    trace!("{:?}: parsed {} from {} characters", signature, ty, consumed);
    Ok((ty, consumed))
}

/// Parses the argument types of a method signature such as `(Ljava/lang/String;I)V`. Anything
/// before the `(`, such as formal type parameters, is skipped.
pub fn get_argument_types(signature: &str) -> Result<Vec<Type>, Error> {
    complete(signature, signature, argument_list(signature)).map(|(types, _)| types)
}

/// Parses the return type of a method signature: the type following the last `)`, or the whole
/// signature if there is none.
pub fn get_return_type(signature: &str) -> Result<Type, Error> {
    let input = return_type_input(signature);
    complete(signature, input, field_type(input)).map(|(ty, _)| ty)
}

/// Encodes a method signature. This is the inverse of `get_argument_types` and
/// `get_return_type`.
pub fn get_method_signature(return_type: &Type, argument_types: &[Type]) -> String {
    let mut res = String::from("(");
    for argument_type in argument_types {
        res.push_str(argument_type.signature());
    }
    res.push(')');
    res.push_str(return_type.signature());
    res
}

/// Like `get_type`, but returns only the stack size of the type and the number of characters it
/// occupied, without building the type.
pub fn get_type_size(signature: &str) -> Result<(usize, usize), Error> {
    complete(signature, signature, field_size(signature))
}

/// Returns the total stack size of the arguments of a method signature, and the number of
/// characters up to and including the closing `)`.
pub fn get_argument_types_size(signature: &str) -> Result<(usize, usize), Error> {
    complete(signature, signature, argument_list_size(signature))
}

/// Returns the stack size of the return type of a method signature, and the number of
/// characters the return type occupied.
pub fn get_return_type_size(signature: &str) -> Result<(usize, usize), Error> {
    let input = return_type_input(signature);
    complete(signature, input, field_size(input))
}

/// Parses a signature that must consist of exactly one field type.
pub fn parse_field_type(signature: &str) -> Result<Type, Error> {
    complete(signature, signature, whole(field_type)(signature)).map(|(ty, _)| ty)
}

/// Parses a signature that must consist of exactly one method descriptor.
pub fn parse_method_signature(signature: &str) -> Result<MethodSignature, Error> {
    complete(signature, signature, whole(method_signature)(signature)).map(|(method, _)| method)
}

/// Converts a field type signature to the form used in Java source: `[[I` becomes `int[][]`.
pub fn signature_to_string(signature: &str) -> Result<String, Error> {
    parse_field_type(signature).map(|ty| ty.to_string())
}

/// Finishes a parse of `input`, a suffix of `signature`, counting what was consumed.
fn complete<'a, O>(signature: &'a str, input: Input<'a>, res: ParseResult<'a, O>)
        -> Result<(O, usize), Error> {
    match res {
        Ok((rest, output)) => Ok((output, input.len() - rest.len())),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::from_syntax(signature, e)),
        Err(nom::Err::Incomplete(_)) => Err(Error::InvalidSignature {
            signature: String::from(signature),
            reason: Reason::UnexpectedEnd,
            offset: signature.len(),
        }),
    }
}

fn return_type_input(signature: &str) -> &str {
    match signature.rfind(')') {
        Some(index) => &signature[index + 1..],
        None => signature,
    }
}

fn basic_type(input: Input) -> ParseResult<BasicType> {
    match input.chars().next() {
        Some(c) => match BasicType::from_descriptor(c) {
            Some(basic_type) => Ok((&input[1..], basic_type)),
            None => p_reject!(input, Reason::UnexpectedCharacter(c)),
        },
        None => p_reject!(input, Reason::UnexpectedEnd),
    }
}

/// FieldType: BaseType | ObjectType | ArrayType, where `V` also counts as a base type.
fn field_type(input: Input) -> ParseResult<Type> {
    match input.chars().next() {
        Some('[') => array_type(input),
        Some('L') | Some('T') => {
            let (rest, object_type) = reference_type(input)?;
            Ok((rest, Type::Object(object_type)))
        },
        _ => {
            let (rest, basic_type) = basic_type(input)?;
            Ok((rest, Type::basic(basic_type).clone()))
        },
    }
}

fn field_size(input: Input) -> ParseResult<usize> {
    match input.chars().next() {
        Some('[') => {
            let (rest, _) = dimensions(input)?;
            let (rest, _) = element(field_size)(rest)?;
            Ok((rest, 1))
        },
        Some('L') | Some('T') => {
            let (rest, _) = reference_body(input)?;
            Ok((rest, 1))
        },
        _ => {
            let (rest, basic_type) = basic_type(input)?;
            Ok((rest, basic_type.size()))
        },
    }
}

/// One or more `[`, counted.
fn dimensions(input: Input) -> ParseResult<usize> {
    let (rest, dimensions) = many1_count(char('['))(input)?;
    if dimensions > MAX_ARRAY_DIMENSIONS {
        p_fail!(input, Reason::TooManyDimensions(dimensions));
    }
    Ok((rest, dimensions))
}

/// The element type following the dimensions of an array type. Once a `[` has been seen the
/// signature cannot be anything but an array, so errors here do not backtrack.
fn element<'a, O, F>(parser: F) -> impl FnMut(Input<'a>) -> ParseResult<'a, O>
    where F: FnMut(Input<'a>) -> ParseResult<'a, O>
{
    let mut parser = cut(parser);
    move |input: Input<'a>| {
        if input.starts_with('V') {
            p_fail!(input, Reason::VoidArrayElement);
        }
        parser(input)
    }
}

fn array_type(input: Input) -> ParseResult<Type> {
    let (rest, dimensions) = dimensions(input)?;
    let (rest, element_type) = element(field_type)(rest)?;
    Ok((rest, Type::from(ArrayType::new(element_type, dimensions))))
}

/// Recognizes `L<class type signature>;` or `T<type variable>;` and returns the marker together
/// with the text between the marker and the `;`. Type arguments may contain `;` of their own, so
/// the terminator is the first `;` outside any `<...>` block.
fn reference_body(input: Input) -> ParseResult<(char, Input)> {
    let (body, marker) = one_of("LT")(input)?;
    let mut depth = 0usize;
    let mut named = false;
    for (index, c) in body.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if depth == 0 => p_fail!(&body[index..], Reason::UnbalancedTypeArguments),
            '>' => depth -= 1,
            ';' if depth == 0 => {
                if !named {
                    p_fail!(body, Reason::EmptyClassName);
                }
                return Ok((&body[index + 1..], (marker, &body[..index])));
            },
            _ if depth == 0 => named = true,
            _ => (),
        }
    }
    let end = &body[body.len()..];
    if depth > 0 {
        p_fail!(end, Reason::UnbalancedTypeArguments);
    }
    p_fail!(end, Reason::UnterminatedReference)
}

/// A reference type, erased: type arguments are dropped, and an inner class of a parameterized
/// class is named by its binary name. The characters consumed are those of the full, unerased
/// signature.
///
/// A type variable stands for `java.lang.Object`, its erasure when unbounded, rather than an
/// object type named after the variable. The bound is declared elsewhere and is not known here.
fn reference_type(input: Input) -> ParseResult<Arc<ObjectType>> {
    let (rest, (marker, body)) = reference_body(input)?;
    let object_type = if marker == 'T' {
        ObjectType::get_instance("java.lang.Object")
    } else {
        ObjectType::get_instance(&names::strip_type_arguments(body))
    };
    Ok((rest, object_type))
}

/// Everything up to and including the first `(`.
fn open_paren(input: Input) -> ParseResult<Input> {
    terminated(take_until::<_, _, SyntaxError>("("), char('('))(input)
        .map_err(|e| e.map(|_| SyntaxError::new(input, Reason::MissingOpenParen)))
}

fn argument_list(input: Input) -> ParseResult<Vec<Type>> {
    let (rest, _) = open_paren(input)?;
    let (rest, (argument_types, _)) = many_till(field_type, char(')'))(rest)?;
    Ok((rest, argument_types))
}

fn argument_list_size(input: Input) -> ParseResult<usize> {
    let (mut rest, _) = open_paren(input)?;
    let mut size = 0;
    loop {
        if let Ok((after, _)) = char::<_, SyntaxError>(')')(rest) {
            return Ok((after, size));
        }
        let (after, argument_size) = field_size(rest)?;
        size += argument_size;
        rest = after;
    }
}

fn method_signature(input: Input) -> ParseResult<MethodSignature> {
    let (rest, argument_types) = argument_list(input)?;
    let (rest, return_type) = cut(field_type)(rest)?;
    Ok((rest, MethodSignature::new(return_type, argument_types)))
}
