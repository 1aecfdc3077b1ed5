//! Single-item parsers shared by the text and token front ends

use crate::input::ParseInput;
use crate::outcome::ParseOutcome;
use crate::parser::Parser;
use std::marker::PhantomData;

/// Match one item belonging to a fixed set
pub struct OneOfItems<I: ParseInput + ?Sized> {
    items: Vec<I::Item>,
    _input: PhantomData<fn(&I)>,
}

impl<I: ParseInput + ?Sized> OneOfItems<I> {
    pub(crate) fn new(items: Vec<I::Item>) -> Self {
        Self {
            items,
            _input: PhantomData,
        }
    }
}

impl<I: ParseInput + ?Sized> Parser for OneOfItems<I> {
    type Input = I;
    type Output = I::Item;

    fn parse_at(&self, input: &I, pos: usize) -> ParseOutcome<I::Item> {
        match input.item_at(pos) {
            Some((item, width)) if self.items.contains(&item) => {
                ParseOutcome::success(pos + width, item)
            }
            _ => ParseOutcome::failure(pos),
        }
    }
}

/// Match one item accepted by a predicate
pub struct Satisfy<I: ?Sized, F> {
    predicate: F,
    _input: PhantomData<fn(&I)>,
}

impl<I: ?Sized, F> Satisfy<I, F> {
    pub(crate) fn new(predicate: F) -> Self {
        Self {
            predicate,
            _input: PhantomData,
        }
    }
}

impl<I, F> Parser for Satisfy<I, F>
where
    I: ParseInput + ?Sized,
    F: Fn(I::Item) -> bool,
{
    type Input = I;
    type Output = I::Item;

    fn parse_at(&self, input: &I, pos: usize) -> ParseOutcome<I::Item> {
        match input.item_at(pos) {
            Some((item, width)) if (self.predicate)(item) => ParseOutcome::success(pos + width, item),
            _ => ParseOutcome::failure(pos),
        }
    }
}

/// Succeed only at the end of input
pub struct EndOfInput<I: ?Sized> {
    _input: PhantomData<fn(&I)>,
}

impl<I: ?Sized> EndOfInput<I> {
    pub(crate) fn new() -> Self {
        Self {
            _input: PhantomData,
        }
    }
}

impl<I: ParseInput + ?Sized> Parser for EndOfInput<I> {
    type Input = I;
    type Output = ();

    fn parse_at(&self, input: &I, pos: usize) -> ParseOutcome<()> {
        if pos >= input.input_len() {
            ParseOutcome::success(pos, ())
        } else {
            ParseOutcome::failure(pos)
        }
    }
}
