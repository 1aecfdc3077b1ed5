//! Core parser trait and top-level drivers

use crate::error::ParseError;
use crate::input::ParseInput;
use crate::outcome::ParseOutcome;
use std::marker::PhantomData;
use std::rc::Rc;

/// A parser is a pure function from `(input, position)` to a [`ParseOutcome`].
///
/// Parsers hold no mutable state, so the same parser can be run any number
/// of times, from any position, on any input. Combinators build new
/// parsers by wrapping existing ones; see [`ParserExt`](crate::ParserExt).
///
/// # Example
///
/// ```
/// use aoc_parser::{ParseOutcome, Parser, text};
///
/// let hash = text::char('#');
/// assert_eq!(hash.parse_at("a#", 1), ParseOutcome::success(2, '#'));
/// assert_eq!(hash.parse_at("a#", 0), ParseOutcome::failure(0));
/// ```
pub trait Parser {
    /// Kind of input consumed (`str` for text, `[T]` for tokens)
    type Input: ParseInput + ?Sized;

    /// Value produced on success
    type Output;

    /// Run the parser on `input` starting at `pos`
    fn parse_at(&self, input: &Self::Input, pos: usize) -> ParseOutcome<Self::Output>;
}

/// Type-erased parser, used for alternatives of different concrete types
/// and for recursive grammars.
pub type BoxedParser<'p, I, T> = Box<dyn Parser<Input = I, Output = T> + 'p>;

impl<P: Parser + ?Sized> Parser for &P {
    type Input = P::Input;
    type Output = P::Output;

    fn parse_at(&self, input: &Self::Input, pos: usize) -> ParseOutcome<Self::Output> {
        (**self).parse_at(input, pos)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Input = P::Input;
    type Output = P::Output;

    fn parse_at(&self, input: &Self::Input, pos: usize) -> ParseOutcome<Self::Output> {
        (**self).parse_at(input, pos)
    }
}

impl<P: Parser + ?Sized> Parser for Rc<P> {
    type Input = P::Input;
    type Output = P::Output;

    fn parse_at(&self, input: &Self::Input, pos: usize) -> ParseOutcome<Self::Output> {
        (**self).parse_at(input, pos)
    }
}

/// Parser backed by a plain function, see [`from_fn`]
pub struct FromFn<I: ?Sized, T, F> {
    f: F,
    _marker: PhantomData<fn(&I) -> T>,
}

/// Wrap a function `(input, pos) -> ParseOutcome` into a [`Parser`].
///
/// ```
/// use aoc_parser::{ParseOutcome, Parser, from_fn};
///
/// // Consume everything up to the end of the line
/// let rest_of_line = from_fn(|input: &str, pos: usize| {
///     let end = input[pos..].find('\n').map_or(input.len(), |i| pos + i);
///     ParseOutcome::success(end, input[pos..end].to_string())
/// });
/// assert_eq!(
///     rest_of_line.parse_at("ab\ncd", 0),
///     ParseOutcome::success(2, "ab".to_string())
/// );
/// ```
pub fn from_fn<I, T, F>(f: F) -> FromFn<I, T, F>
where
    I: ParseInput + ?Sized,
    F: Fn(&I, usize) -> ParseOutcome<T>,
{
    FromFn {
        f,
        _marker: PhantomData,
    }
}

impl<I, T, F> Parser for FromFn<I, T, F>
where
    I: ParseInput + ?Sized,
    F: Fn(&I, usize) -> ParseOutcome<T>,
{
    type Input = I;
    type Output = T;

    fn parse_at(&self, input: &I, pos: usize) -> ParseOutcome<T> {
        (self.f)(input, pos)
    }
}

/// Run `parser` from the start of `input` without requiring it to consume
/// everything.
pub fn parse_prefix<P: Parser>(parser: &P, input: &P::Input) -> ParseOutcome<P::Output> {
    parser.parse_at(input, 0)
}

/// Run `parser` over the whole of `input`.
///
/// Fails with [`ParseError::Failed`] when the grammar does not match and
/// with [`ParseError::TrailingInput`] when it matches only a prefix.
///
/// ```
/// use aoc_parser::{ParseError, parse_all, text};
///
/// let number = text::unsigned::<u32>();
/// assert_eq!(parse_all(&number, "42"), Ok(42));
/// assert!(matches!(
///     parse_all(&number, "42x"),
///     Err(ParseError::TrailingInput { position: 2, .. })
/// ));
/// ```
pub fn parse_all<P: Parser>(parser: &P, input: &P::Input) -> Result<P::Output, ParseError> {
    match parser.parse_at(input, 0) {
        ParseOutcome::Success { next, value } if next == input.input_len() => Ok(value),
        ParseOutcome::Success { next, .. } => {
            let (line, column) = input.locate(next);
            Err(ParseError::TrailingInput {
                position: next,
                line,
                column,
            })
        }
        ParseOutcome::Failure { position } => {
            let (line, column) = input.locate(position);
            Err(ParseError::Failed {
                position,
                line,
                column,
            })
        }
    }
}
