//! Parser combinators
//!
//! Each combinator is a small struct implementing [`Parser`] plus a free
//! function building it. The same combinators are available as methods
//! through [`ParserExt`], which is usually the more readable form:
//!
//! ```
//! use aoc_parser::{ParserExt, parse_all, text};
//!
//! // "3,4" -> (3, 4)
//! let pair = text::unsigned::<u32>()
//!     .keep_left(text::char(','))
//!     .and_then(|x| text::unsigned::<u32>().map(move |y| (x, y)));
//! assert_eq!(parse_all(&pair, "3,4"), Ok((3, 4)));
//! ```
//!
//! Backtracking is total: a combinator that tries an alternative always
//! restarts it from the original position, and repetitions never keep the
//! input consumed by their last, failing, attempt.

use crate::error::ParseError;
use crate::input::ParseInput;
use crate::outcome::{ParseOutcome, furthest};
use crate::parser::{BoxedParser, Parser, parse_all};
use std::marker::PhantomData;

// ============================================================================
// Lift
// ============================================================================

/// Zero-width parser that always succeeds with a constant, see [`lift`]
pub struct Lift<I: ?Sized, T> {
    value: T,
    _input: PhantomData<fn(&I)>,
}

/// Always succeed with `value` without consuming input.
///
/// Mostly useful at the end of an [`and_then`](ParserExt::and_then) chain
/// to hand back a value computed from earlier results.
pub fn lift<I: ParseInput + ?Sized, T: Clone>(value: T) -> Lift<I, T> {
    Lift {
        value,
        _input: PhantomData,
    }
}

impl<I: ParseInput + ?Sized, T: Clone> Parser for Lift<I, T> {
    type Input = I;
    type Output = T;

    fn parse_at(&self, _input: &I, pos: usize) -> ParseOutcome<T> {
        ParseOutcome::success(pos, self.value.clone())
    }
}

// ============================================================================
// Sequencing
// ============================================================================

/// Monadic bind, see [`sequence`]
pub struct AndThen<P, F> {
    parser: P,
    f: F,
}

/// Run `parser`, feed its value to `f` and run the parser `f` returns from
/// where the first one stopped. A failure of `parser` short-circuits
/// without calling `f`.
pub fn sequence<P, Q, F>(parser: P, f: F) -> AndThen<P, F>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
    F: Fn(P::Output) -> Q,
{
    AndThen { parser, f }
}

impl<P, Q, F> Parser for AndThen<P, F>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
    F: Fn(P::Output) -> Q,
{
    type Input = P::Input;
    type Output = Q::Output;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<Q::Output> {
        match self.parser.parse_at(input, pos) {
            ParseOutcome::Success { next, value } => (self.f)(value).parse_at(input, next),
            ParseOutcome::Failure { position } => ParseOutcome::failure(position),
        }
    }
}

/// Sequence two parsers and keep the value of the first, see [`keep_left`]
pub struct KeepLeft<P, Q> {
    left: P,
    right: Q,
}

/// Run `left` then `right`, keeping the value of `left`
pub fn keep_left<P, Q>(left: P, right: Q) -> KeepLeft<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
{
    KeepLeft { left, right }
}

impl<P, Q> Parser for KeepLeft<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
{
    type Input = P::Input;
    type Output = P::Output;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<P::Output> {
        let (next, value) = match self.left.parse_at(input, pos) {
            ParseOutcome::Success { next, value } => (next, value),
            ParseOutcome::Failure { position } => return ParseOutcome::failure(position),
        };
        match self.right.parse_at(input, next) {
            ParseOutcome::Success { next, .. } => ParseOutcome::success(next, value),
            ParseOutcome::Failure { position } => ParseOutcome::failure(position),
        }
    }
}

/// Sequence two parsers and keep the value of the second, see [`keep_right`]
pub struct KeepRight<P, Q> {
    left: P,
    right: Q,
}

/// Run `left` then `right`, keeping the value of `right`
pub fn keep_right<P, Q>(left: P, right: Q) -> KeepRight<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
{
    KeepRight { left, right }
}

impl<P, Q> Parser for KeepRight<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input>,
{
    type Input = P::Input;
    type Output = Q::Output;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<Q::Output> {
        match self.left.parse_at(input, pos) {
            ParseOutcome::Success { next, .. } => self.right.parse_at(input, next),
            ParseOutcome::Failure { position } => ParseOutcome::failure(position),
        }
    }
}

// ============================================================================
// Alternation
// ============================================================================

/// Two-way alternative, see [`or_else`]
pub struct OrElse<P, Q> {
    first: P,
    second: Q,
}

/// Try `first`; if it fails, try `second` from the original position.
///
/// The first success wins, there is no longest-match rule. When both fail
/// the furthest failure position is reported.
pub fn or_else<P, Q>(first: P, second: Q) -> OrElse<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input, Output = P::Output>,
{
    OrElse { first, second }
}

impl<P, Q> Parser for OrElse<P, Q>
where
    P: Parser,
    Q: Parser<Input = P::Input, Output = P::Output>,
{
    type Input = P::Input;
    type Output = P::Output;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<P::Output> {
        let first_failure = match self.first.parse_at(input, pos) {
            success @ ParseOutcome::Success { .. } => return success,
            ParseOutcome::Failure { position } => position,
        };
        match self.second.parse_at(input, pos) {
            success @ ParseOutcome::Success { .. } => success,
            ParseOutcome::Failure { position } => {
                ParseOutcome::failure(furthest(first_failure, position))
            }
        }
    }
}

/// N-way alternative, see [`one_of`]
pub struct Choice<P> {
    alternatives: Vec<P>,
}

/// Try each parser in order from the same position; the first success wins.
///
/// Alternatives of different concrete types can be mixed by boxing them:
///
/// ```
/// use aoc_parser::{ParserExt, one_of, parse_all, text};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Dir { North, South }
///
/// let dir = one_of(vec![
///     text::char('N').becomes(Dir::North).boxed(),
///     text::literal("S").becomes(Dir::South).boxed(),
/// ]);
/// assert_eq!(parse_all(&dir, "S"), Ok(Dir::South));
/// ```
pub fn one_of<P: Parser>(alternatives: Vec<P>) -> Choice<P> {
    Choice { alternatives }
}

impl<P: Parser> Parser for Choice<P> {
    type Input = P::Input;
    type Output = P::Output;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<P::Output> {
        let mut failure = pos;
        for alternative in &self.alternatives {
            match alternative.parse_at(input, pos) {
                success @ ParseOutcome::Success { .. } => return success,
                ParseOutcome::Failure { position } => failure = furthest(failure, position),
            }
        }
        ParseOutcome::failure(failure)
    }
}

// ============================================================================
// Repetition
// ============================================================================

/// Repeat a parser greedily, see [`zero_or_more`] and [`one_or_more`]
pub struct Repeat<P> {
    parser: P,
    at_least_one: bool,
}

/// Apply `parser` until it fails and collect the values.
///
/// Always succeeds, possibly with no values. The failing attempt that ends
/// the repetition consumes nothing. An attempt that succeeds without
/// consuming input also ends it, after its value is kept.
pub fn zero_or_more<P: Parser>(parser: P) -> Repeat<P> {
    Repeat {
        parser,
        at_least_one: false,
    }
}

/// Like [`zero_or_more`] but fails when the first attempt fails
pub fn one_or_more<P: Parser>(parser: P) -> Repeat<P> {
    Repeat {
        parser,
        at_least_one: true,
    }
}

impl<P: Parser> Parser for Repeat<P> {
    type Input = P::Input;
    type Output = Vec<P::Output>;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<Vec<P::Output>> {
        let mut values = Vec::new();
        let mut current = pos;
        loop {
            match self.parser.parse_at(input, current) {
                ParseOutcome::Success { next, value } => {
                    values.push(value);
                    if next == current {
                        break;
                    }
                    current = next;
                }
                ParseOutcome::Failure { position } => {
                    if self.at_least_one && values.is_empty() {
                        return ParseOutcome::failure(position);
                    }
                    break;
                }
            }
        }
        ParseOutcome::success(current, values)
    }
}

/// Repeat a parser with separators in between, see
/// [`zero_or_more_separated`] and [`one_or_more_separated`]
pub struct Separated<P, S> {
    parser: P,
    separator: S,
    at_least_one: bool,
}

/// Apply `parser` repeatedly with `separator` between occurrences.
///
/// A trailing separator that is not followed by another value is left
/// unconsumed.
pub fn zero_or_more_separated<P, S>(parser: P, separator: S) -> Separated<P, S>
where
    P: Parser,
    S: Parser<Input = P::Input>,
{
    Separated {
        parser,
        separator,
        at_least_one: false,
    }
}

/// Like [`zero_or_more_separated`] but requires at least one value
pub fn one_or_more_separated<P, S>(parser: P, separator: S) -> Separated<P, S>
where
    P: Parser,
    S: Parser<Input = P::Input>,
{
    Separated {
        parser,
        separator,
        at_least_one: true,
    }
}

impl<P, S> Parser for Separated<P, S>
where
    P: Parser,
    S: Parser<Input = P::Input>,
{
    type Input = P::Input;
    type Output = Vec<P::Output>;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<Vec<P::Output>> {
        let (mut current, first) = match self.parser.parse_at(input, pos) {
            ParseOutcome::Success { next, value } => (next, value),
            ParseOutcome::Failure { position } if self.at_least_one => {
                return ParseOutcome::failure(position);
            }
            ParseOutcome::Failure { .. } => return ParseOutcome::success(pos, Vec::new()),
        };

        let mut values = vec![first];
        loop {
            let ParseOutcome::Success {
                next: after_separator,
                ..
            } = self.separator.parse_at(input, current)
            else {
                break;
            };
            let ParseOutcome::Success { next, value } = self.parser.parse_at(input, after_separator)
            else {
                break;
            };
            values.push(value);
            if next == current {
                break;
            }
            current = next;
        }
        ParseOutcome::success(current, values)
    }
}

// ============================================================================
// Value transformation
// ============================================================================

/// Transform the value of a parser, see [`map`]
pub struct Map<P, F> {
    parser: P,
    f: F,
}

/// Transform a successful value with `f`; failures pass through unchanged
pub fn map<P, B, F>(parser: P, f: F) -> Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> B,
{
    Map { parser, f }
}

impl<P, B, F> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> B,
{
    type Input = P::Input;
    type Output = B;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<B> {
        self.parser.parse_at(input, pos).map(&self.f)
    }
}

/// Transform a value with a function that may reject it, see [`map_opt`]
pub struct MapOpt<P, F> {
    parser: P,
    f: F,
}

/// Like [`map`], but when `f` returns `None` the parser fails at the
/// position it started from.
pub fn map_opt<P, B, F>(parser: P, f: F) -> MapOpt<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Option<B>,
{
    MapOpt { parser, f }
}

impl<P, B, F> Parser for MapOpt<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Option<B>,
{
    type Input = P::Input;
    type Output = B;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<B> {
        match self.parser.parse_at(input, pos) {
            ParseOutcome::Success { next, value } => match (self.f)(value) {
                Some(mapped) => ParseOutcome::success(next, mapped),
                None => ParseOutcome::failure(pos),
            },
            ParseOutcome::Failure { position } => ParseOutcome::failure(position),
        }
    }
}

/// Replace the value of a parser with a constant, see [`becomes`]
pub struct Becomes<P, T> {
    parser: P,
    value: T,
}

/// Discard the value of `parser` and produce `value` instead
pub fn becomes<P: Parser, T: Clone>(parser: P, value: T) -> Becomes<P, T> {
    Becomes { parser, value }
}

impl<P: Parser, T: Clone> Parser for Becomes<P, T> {
    type Input = P::Input;
    type Output = T;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<T> {
        match self.parser.parse_at(input, pos) {
            ParseOutcome::Success { next, .. } => ParseOutcome::success(next, self.value.clone()),
            ParseOutcome::Failure { position } => ParseOutcome::failure(position),
        }
    }
}

// ============================================================================
// Recovery
// ============================================================================

/// Make a parser optional, see [`optional`]
pub struct Optional<P> {
    parser: P,
}

/// Succeed with `Some(value)` when `parser` matches, or with `None` without
/// consuming input when it does not.
pub fn optional<P: Parser>(parser: P) -> Optional<P> {
    Optional { parser }
}

impl<P: Parser> Parser for Optional<P> {
    type Input = P::Input;
    type Output = Option<P::Output>;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<Option<P::Output>> {
        match self.parser.parse_at(input, pos) {
            ParseOutcome::Success { next, value } => ParseOutcome::success(next, Some(value)),
            ParseOutcome::Failure { .. } => ParseOutcome::success(pos, None),
        }
    }
}

/// Fall back to a default value, see [`otherwise`]
pub struct Otherwise<P: Parser> {
    parser: P,
    default: P::Output,
}

/// Like [`optional`], but substitute `default` when `parser` does not match
pub fn otherwise<P>(parser: P, default: P::Output) -> Otherwise<P>
where
    P: Parser,
    P::Output: Clone,
{
    Otherwise { parser, default }
}

impl<P> Parser for Otherwise<P>
where
    P: Parser,
    P::Output: Clone,
{
    type Input = P::Input;
    type Output = P::Output;

    fn parse_at(&self, input: &P::Input, pos: usize) -> ParseOutcome<P::Output> {
        match self.parser.parse_at(input, pos) {
            success @ ParseOutcome::Success { .. } => success,
            ParseOutcome::Failure { .. } => ParseOutcome::success(pos, self.default.clone()),
        }
    }
}

// ============================================================================
// Extension trait
// ============================================================================

/// Method-call syntax for every combinator, implemented for all parsers
pub trait ParserExt: Parser + Sized {
    /// See [`sequence`]
    fn and_then<Q, F>(self, f: F) -> AndThen<Self, F>
    where
        Q: Parser<Input = Self::Input>,
        F: Fn(Self::Output) -> Q,
    {
        sequence(self, f)
    }

    /// See [`or_else`]
    fn or_else<Q>(self, other: Q) -> OrElse<Self, Q>
    where
        Q: Parser<Input = Self::Input, Output = Self::Output>,
    {
        or_else(self, other)
    }

    /// See [`zero_or_more`]
    fn zero_or_more(self) -> Repeat<Self> {
        zero_or_more(self)
    }

    /// See [`one_or_more`]
    fn one_or_more(self) -> Repeat<Self> {
        one_or_more(self)
    }

    /// See [`zero_or_more_separated`]
    fn zero_or_more_separated<S>(self, separator: S) -> Separated<Self, S>
    where
        S: Parser<Input = Self::Input>,
    {
        zero_or_more_separated(self, separator)
    }

    /// See [`one_or_more_separated`]
    fn one_or_more_separated<S>(self, separator: S) -> Separated<Self, S>
    where
        S: Parser<Input = Self::Input>,
    {
        one_or_more_separated(self, separator)
    }

    /// See [`keep_left`]
    fn keep_left<Q>(self, right: Q) -> KeepLeft<Self, Q>
    where
        Q: Parser<Input = Self::Input>,
    {
        keep_left(self, right)
    }

    /// See [`keep_right`]
    fn keep_right<Q>(self, right: Q) -> KeepRight<Self, Q>
    where
        Q: Parser<Input = Self::Input>,
    {
        keep_right(self, right)
    }

    /// See [`map`]
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> B,
    {
        map(self, f)
    }

    /// See [`map_opt`]
    fn map_opt<B, F>(self, f: F) -> MapOpt<Self, F>
    where
        F: Fn(Self::Output) -> Option<B>,
    {
        map_opt(self, f)
    }

    /// See [`becomes`]
    fn becomes<T: Clone>(self, value: T) -> Becomes<Self, T> {
        becomes(self, value)
    }

    /// See [`optional`]
    fn optional(self) -> Optional<Self> {
        optional(self)
    }

    /// See [`otherwise`]
    fn otherwise(self, default: Self::Output) -> Otherwise<Self>
    where
        Self::Output: Clone,
    {
        otherwise(self, default)
    }

    /// Erase the concrete type of this parser
    fn boxed<'p>(self) -> BoxedParser<'p, Self::Input, Self::Output>
    where
        Self: 'p,
    {
        Box::new(self)
    }

    /// See [`parse_all`]
    fn parse_all(&self, input: &Self::Input) -> Result<Self::Output, ParseError> {
        parse_all(self, input)
    }
}

impl<P: Parser> ParserExt for P {}
