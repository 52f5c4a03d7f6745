//! Glue between `nom` and the signature grammar.
//!
//! nom's default error only records which combinator failed. Callers of the grammar need to know
//! *why* a signature is malformed and where, so every parser here reports a `SyntaxError`
//! carrying a `Reason` and the remaining input at the point of failure. The offset into the
//! original signature is recovered from the length of that remaining input.

use nom::error::{ErrorKind, ParseError};
use nom::IResult;

use crate::parser::signature::Reason;

pub type Input<'a> = &'a str;
pub type ParseResult<'a, O> = IResult<Input<'a>, O, SyntaxError<'a>>;

/// Returns from the current parser with a recoverable error, so that alternatives (such as the
/// closing `)` of an argument list) may still be tried.
#[macro_export]
macro_rules! p_reject {
    ($i: expr, $reason: expr) => (
        return Err(nom::Err::Error($crate::parser::nom_support::SyntaxError::new($i, $reason)))
    );
}

/// Returns from the current parser with an error that stops all backtracking.
#[macro_export]
macro_rules! p_fail {
    ($i: expr, $reason: expr) => (
        return Err(nom::Err::Failure($crate::parser::nom_support::SyntaxError::new($i, $reason)))
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError<'a> {
    /// The input remaining where the error was raised.
    pub input: Input<'a>,
    pub reason: Reason,
}

impl<'a> SyntaxError<'a> {
    pub fn new(input: Input<'a>, reason: Reason) -> Self {
        SyntaxError {
            input: input,
            reason: reason,
        }
    }
}

impl<'a> ParseError<Input<'a>> for SyntaxError<'a> {
    fn from_error_kind(input: Input<'a>, _: ErrorKind) -> Self {
        let reason = match input.chars().next() {
            Some(c) => Reason::UnexpectedCharacter(c),
            None => Reason::UnexpectedEnd,
        };
        SyntaxError::new(input, reason)
    }

    fn from_char(input: Input<'a>, expected: char) -> Self {
        let reason = match input.chars().next() {
            Some(found) => Reason::Expected { expected: expected, found: found },
            None => Reason::UnexpectedEnd,
        };
        SyntaxError::new(input, reason)
    }

    /// Keeps the innermost error, which is the most specific one.
    fn append(_: Input<'a>, _: ErrorKind, other: Self) -> Self {
        other
    }
}

/// Runs `parser`, then fails unless it consumed the whole input.
pub fn whole<'a, O, F>(mut parser: F) -> impl FnMut(Input<'a>) -> ParseResult<'a, O>
    where F: FnMut(Input<'a>) -> ParseResult<'a, O>
{
    move |input| {
        let (rest, output) = parser(input)?;
        if !rest.is_empty() {
            p_fail!(rest, Reason::TrailingCharacters);
        }
        Ok((rest, output))
    }
}
