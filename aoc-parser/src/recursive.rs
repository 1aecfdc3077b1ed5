//! Fixed-point parsers for recursive grammars

use crate::input::ParseInput;
use crate::outcome::ParseOutcome;
use crate::parser::{BoxedParser, Parser};
use std::cell::OnceCell;
use std::rc::{Rc, Weak};

type Slot<'p, I, T> = OnceCell<BoxedParser<'p, I, T>>;

/// A parser defined in terms of itself, see [`fix_point`]
pub struct FixPoint<'p, I: ?Sized, T> {
    slot: Rc<Slot<'p, I, T>>,
}

/// Handle to the parser being defined by [`fix_point`].
///
/// The handle is resolved when it runs, not when it is built, so it can be
/// used directly while composing the grammar. It only holds a weak
/// reference; once the owning [`FixPoint`] is dropped it fails at its
/// starting position.
pub struct Recursive<'p, I: ?Sized, T> {
    slot: Weak<Slot<'p, I, T>>,
}

impl<I: ?Sized, T> Clone for FixPoint<'_, I, T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<I: ?Sized, T> Clone for Recursive<'_, I, T> {
    fn clone(&self) -> Self {
        Self {
            slot: Weak::clone(&self.slot),
        }
    }
}

/// Build a self-referential parser.
///
/// `define` receives a handle standing for the parser under construction
/// and returns its body. Nested parenthesised lists, for example:
///
/// ```
/// use aoc_parser::{ParserExt, fix_point, parse_all, text};
///
/// // Depth of the deepest nesting in "(()(()))"
/// let depth = fix_point(|nested| {
///     text::char('(')
///         .keep_right(nested.zero_or_more())
///         .keep_left(text::char(')'))
///         .map(|children: Vec<usize>| 1 + children.into_iter().max().unwrap_or(0))
/// });
/// assert_eq!(parse_all(&depth, "(()(()))"), Ok(3));
/// ```
pub fn fix_point<'p, I, T, P, F>(define: F) -> FixPoint<'p, I, T>
where
    I: ParseInput + ?Sized + 'p,
    T: 'p,
    P: Parser<Input = I, Output = T> + 'p,
    F: FnOnce(Recursive<'p, I, T>) -> P,
{
    let slot: Rc<Slot<'p, I, T>> = Rc::new(OnceCell::new());
    let body = define(Recursive {
        slot: Rc::downgrade(&slot),
    });
    // The cell is fresh, so this is its only initialisation.
    let _ = slot.set(Box::new(body));
    FixPoint { slot }
}

impl<I: ParseInput + ?Sized, T> Parser for FixPoint<'_, I, T> {
    type Input = I;
    type Output = T;

    fn parse_at(&self, input: &I, pos: usize) -> ParseOutcome<T> {
        match self.slot.get() {
            Some(body) => body.parse_at(input, pos),
            None => ParseOutcome::failure(pos),
        }
    }
}

impl<I: ParseInput + ?Sized, T> Parser for Recursive<'_, I, T> {
    type Input = I;
    type Output = T;

    fn parse_at(&self, input: &I, pos: usize) -> ParseOutcome<T> {
        let Some(slot) = self.slot.upgrade() else {
            return ParseOutcome::failure(pos);
        };
        match slot.get() {
            Some(body) => body.parse_at(input, pos),
            None => ParseOutcome::failure(pos),
        }
    }
}
