//! Parser Combinator Library
//!
//! Small backtracking parser combinators for line-oriented puzzle input.
//! A parser is a pure value mapping `(input, position)` to a
//! [`ParseOutcome`]; combinators glue parsers together into grammars.
//!
//! # Overview
//!
//! This library provides:
//! - The [`Parser`] trait and the [`ParseOutcome`] result type
//! - Combinators for sequencing, alternation, repetition, mapping and
//!   recovery, as free functions in [`combinator`] and as methods on
//!   [`ParserExt`]
//! - Recursive grammars through [`fix_point`]
//! - Primitives for text ([`text`]) and for token slices ([`token`])
//! - [`parse_all`], which requires the whole input to be consumed
//!
//! # Quick Example
//!
//! ```
//! use aoc_parser::{ParserExt, parse_all, text};
//!
//! // A register literal like "[3, 1, 2, 0]"
//! let registers = text::char('[')
//!     .keep_right(
//!         text::signed::<i64>()
//!             .one_or_more_separated(text::char(',').keep_left(text::spaces().optional())),
//!     )
//!     .keep_left(text::char(']'));
//!
//! assert_eq!(parse_all(&registers, "[3, 1, 2, 0]"), Ok(vec![3, 1, 2, 0]));
//! assert!(parse_all(&registers, "[3, 1,]").is_err());
//! ```
//!
//! # Failure Reporting
//!
//! Failures are plain data. They flow through every combinator until an
//! alternative ([`ParserExt::or_else`], [`one_of`], [`ParserExt::optional`],
//! [`ParserExt::otherwise`]) recovers, or until [`parse_all`] turns them into
//! a [`ParseError`]. When several alternatives fail, the furthest failure
//! position among them is reported.

pub mod combinator;
mod error;
mod input;
mod outcome;
mod parser;
mod primitive;
mod recursive;
pub mod text;
pub mod token;

// Re-export public API
pub use combinator::{ParserExt, lift, one_of};
pub use error::ParseError;
pub use input::ParseInput;
pub use outcome::ParseOutcome;
pub use parser::{BoxedParser, FromFn, Parser, from_fn, parse_all, parse_prefix};
pub use primitive::{EndOfInput, OneOfItems, Satisfy};
pub use recursive::{FixPoint, Recursive, fix_point};
