//! Parsers over token sequences
//!
//! Same combinators as for text, but the input is a slice `[T]` of
//! already-lexed tokens and positions are indices into it.
//!
//! ```
//! use aoc_parser::{ParserExt, parse_all, token};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Tok { Open, Close, Num(u32) }
//!
//! let number = token::satisfy(|t: Tok| matches!(t, Tok::Num(_)));
//! let group = token::token(Tok::Open)
//!     .keep_right(number.zero_or_more())
//!     .keep_left(token::token(Tok::Close));
//!
//! let tokens = [Tok::Open, Tok::Num(1), Tok::Num(2), Tok::Close];
//! assert_eq!(parse_all(&group, &tokens[..]).map(|v| v.len()), Ok(2));
//! ```

use crate::outcome::ParseOutcome;
use crate::parser::Parser;
use crate::primitive::{EndOfInput, OneOfItems, Satisfy};
use std::rc::Rc;

/// Exact token sequence match, see [`tokens`]
#[derive(Debug, Clone)]
pub struct Tokens<T> {
    expected: Rc<[T]>,
}

/// Match the sequence `expected` exactly, yielding it on success
pub fn tokens<T: Copy + PartialEq>(expected: &[T]) -> Tokens<T> {
    Tokens {
        expected: expected.into(),
    }
}

impl<T: Copy + PartialEq> Parser for Tokens<T> {
    type Input = [T];
    type Output = Rc<[T]>;

    fn parse_at(&self, input: &[T], pos: usize) -> ParseOutcome<Rc<[T]>> {
        let rest = input.get(pos..).unwrap_or(&[]);
        if rest.starts_with(&self.expected) {
            return ParseOutcome::success(pos + self.expected.len(), Rc::clone(&self.expected));
        }
        let matched = rest
            .iter()
            .zip(self.expected.iter())
            .take_while(|(a, b)| a == b)
            .count();
        ParseOutcome::failure(pos + matched)
    }
}

/// Match the single token `expected`
pub fn token<T: Copy + PartialEq>(expected: T) -> OneOfItems<[T]> {
    OneOfItems::new(vec![expected])
}

/// Match one token contained in `set`
pub fn one_of_tokens<T: Copy + PartialEq>(set: &[T]) -> OneOfItems<[T]> {
    OneOfItems::new(set.to_vec())
}

/// Match one token accepted by `predicate`
pub fn satisfy<T, F>(predicate: F) -> Satisfy<[T], F>
where
    T: Copy + PartialEq,
    F: Fn(T) -> bool,
{
    Satisfy::new(predicate)
}

/// Succeed only when no tokens are left
pub fn end_of_input<T: Copy + PartialEq>() -> EndOfInput<[T]> {
    EndOfInput::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::ParserExt;

    #[test]
    fn test_tokens_sequence() {
        let p = tokens(&[1, 2, 3]);
        let input = [0, 1, 2, 3];
        assert_eq!(p.parse_at(&input[..], 1).position(), 4);
        assert_eq!(p.parse_at(&[1, 2, 4][..], 0), ParseOutcome::failure(2));
        assert_eq!(p.parse_at(&[1, 2][..], 0), ParseOutcome::failure(2));
    }

    #[test]
    fn test_single_tokens() {
        let input = ['a', 'b'];
        assert_eq!(token('a').parse_at(&input[..], 0), ParseOutcome::success(1, 'a'));
        assert_eq!(one_of_tokens(&['x', 'b']).parse_at(&input[..], 1), ParseOutcome::success(2, 'b'));
        assert!(token('a').parse_at(&input[..], 2).is_failure());
    }

    #[test]
    fn test_satisfy_and_end() {
        let evens = satisfy(|n: u8| n % 2 == 0).zero_or_more().keep_left(end_of_input());
        assert_eq!(evens.parse_at(&[2, 4, 6][..], 0), ParseOutcome::success(3, vec![2, 4, 6]));
        assert!(evens.parse_at(&[2, 3][..], 0).is_failure());
    }
}
