//! Parsers over text input
//!
//! Positions are byte offsets into the `str` being parsed.

use crate::combinator::ParserExt;
use crate::outcome::ParseOutcome;
use crate::parser::Parser;
use crate::primitive::{EndOfInput, OneOfItems, Satisfy};
use std::rc::Rc;
use std::str::FromStr;

/// Exact string match, see [`literal`]
#[derive(Debug, Clone)]
pub struct Literal {
    text: Rc<str>,
}

/// Match `text` exactly.
///
/// On success the parser advances by `text.len()` bytes and yields the
/// literal. On failure it reports the offset of the first mismatching byte.
pub fn literal(text: &str) -> Literal {
    Literal { text: text.into() }
}

impl Parser for Literal {
    type Input = str;
    type Output = Rc<str>;

    fn parse_at(&self, input: &str, pos: usize) -> ParseOutcome<Rc<str>> {
        let Some(rest) = input.get(pos..) else {
            return ParseOutcome::failure(pos);
        };
        if rest.starts_with(&*self.text) {
            return ParseOutcome::success(pos + self.text.len(), Rc::clone(&self.text));
        }
        let matched = rest
            .bytes()
            .zip(self.text.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        ParseOutcome::failure(pos + matched)
    }
}

/// Match one character contained in `chars`
pub fn one_of_chars(chars: &str) -> OneOfItems<str> {
    OneOfItems::new(chars.chars().collect())
}

/// Match the character `c`
pub fn char(c: char) -> OneOfItems<str> {
    OneOfItems::new(vec![c])
}

/// Match one character accepted by `predicate`
pub fn satisfy<F: Fn(char) -> bool>(predicate: F) -> Satisfy<str, F> {
    Satisfy::new(predicate)
}

/// Succeed only when no input is left
pub fn end_of_input() -> EndOfInput<str> {
    EndOfInput::new()
}

/// One or more ASCII digits, collected into a string
pub fn digits() -> impl Parser<Input = str, Output = String> {
    satisfy(|c| c.is_ascii_digit())
        .one_or_more()
        .map(|digits: Vec<char>| digits.into_iter().collect::<String>())
}

/// Unsigned number made of ASCII digits.
///
/// Fails without consuming input when the value does not fit `N`.
///
/// ```
/// use aoc_parser::{Parser, text};
///
/// assert_eq!(text::unsigned::<u8>().parse_at("255", 0).value(), Some(255));
/// assert!(text::unsigned::<u8>().parse_at("256", 0).is_failure());
/// ```
pub fn unsigned<N: FromStr>() -> impl Parser<Input = str, Output = N> {
    digits().map_opt(|digits| digits.parse::<N>().ok())
}

/// Number with an optional leading `-`
pub fn signed<N: FromStr>() -> impl Parser<Input = str, Output = N> {
    char('-').optional().and_then(|sign| {
        digits().map_opt(move |digits| match sign {
            Some(_) => format!("-{digits}").parse::<N>().ok(),
            None => digits.parse::<N>().ok(),
        })
    })
}

/// One or more spaces or tabs
pub fn spaces() -> impl Parser<Input = str, Output = ()> {
    one_of_chars(" \t").one_or_more().becomes(())
}

/// A line break, `\n` or `\r\n`
pub fn newline() -> impl Parser<Input = str, Output = ()> {
    literal("\n").or_else(literal("\r\n")).becomes(())
}
