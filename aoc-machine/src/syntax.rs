//! Text grammars for registers, instructions, programs and sample files
//!
//! Everything here is composed from `aoc_parser` combinators; the `FromStr`
//! impls at the bottom require the whole input to match.

use crate::operation::{Instruction, Opcode, Operation};
use crate::program::Program;
use crate::registers::{Registers, Word};
use crate::resolve::{Sample, SampleFile};
use aoc_parser::{ParseError, Parser, ParserExt, parse_all, text};
use std::str::FromStr;

/// `,` followed by optional spaces
fn list_separator() -> impl Parser<Input = str, Output = ()> {
    text::char(',').keep_left(text::spaces().optional()).becomes(())
}

/// A register file literal such as `[3, 1, 2, 0]`, exactly `N` values
pub fn registers_literal<const N: usize>() -> impl Parser<Input = str, Output = Registers<N>> {
    text::char('[')
        .keep_right(text::signed::<Word>().one_or_more_separated(list_separator()))
        .keep_left(text::char(']'))
        .map_opt(|values: Vec<Word>| <[Word; N]>::try_from(values).ok().map(Registers::new))
}

fn mnemonic() -> impl Parser<Input = str, Output = Operation> {
    text::satisfy(|c| c.is_ascii_lowercase())
        .one_or_more()
        .map_opt(|letters: Vec<char>| {
            letters
                .into_iter()
                .collect::<String>()
                .parse::<Operation>()
                .ok()
        })
}

fn operand() -> impl Parser<Input = str, Output = Word> {
    text::spaces().keep_right(text::signed::<Word>())
}

/// Operands A, B and C, each preceded by spaces
fn operands() -> impl Parser<Input = str, Output = (Word, Word, Word)> {
    operand().and_then(|a| operand().and_then(move |b| operand().map(move |c| (a, b, c))))
}

/// `mnemonic a b c`, e.g. `addi 3 16 3`
pub fn instruction() -> impl Parser<Input = str, Output = Instruction> {
    mnemonic().and_then(|op| operands().map(move |(a, b, c)| Instruction::new(op, a, b, c)))
}

/// `opcode a b c`, e.g. `9 2 1 2`
pub fn raw_instruction() -> impl Parser<Input = str, Output = Instruction<Opcode>> {
    text::unsigned::<Opcode>()
        .and_then(|op| operands().map(move |(a, b, c)| Instruction::new(op, a, b, c)))
}

/// `#ip N` then one instruction per line; trailing newlines are accepted
pub fn program() -> impl Parser<Input = str, Output = Program> {
    text::literal("#ip")
        .keep_right(text::spaces())
        .keep_right(text::unsigned::<usize>())
        .and_then(|ip_register| {
            text::newline()
                .keep_right(instruction())
                .one_or_more()
                .map(move |instructions| Program::new(ip_register, instructions))
        })
        .keep_left(text::newline().zero_or_more())
}

/// ```text
/// Before: [3, 2, 1, 1]
/// 9 2 1 2
/// After:  [3, 2, 2, 1]
/// ```
///
/// The final line break is not part of the sample.
pub fn sample<const N: usize>() -> impl Parser<Input = str, Output = Sample<N>> {
    text::literal("Before:")
        .keep_right(text::spaces())
        .keep_right(registers_literal::<N>())
        .keep_left(text::newline())
        .and_then(|before| {
            raw_instruction()
                .keep_left(text::newline())
                .and_then(move |instruction| {
                    text::literal("After:")
                        .keep_right(text::spaces())
                        .keep_right(registers_literal::<N>())
                        .map(move |after| Sample {
                            before,
                            instruction,
                            after,
                        })
                })
        })
}

/// Samples separated by single blank lines, then at least two blank lines,
/// then the test program as raw instructions.
pub fn sample_file<const N: usize>() -> impl Parser<Input = str, Output = SampleFile<N>> {
    let blank_line = text::newline().keep_right(text::newline());
    let gap = text::newline()
        .one_or_more()
        .map_opt(|breaks: Vec<()>| (breaks.len() >= 3).then_some(()));

    sample::<N>()
        .one_or_more_separated(blank_line)
        .keep_left(gap)
        .and_then(|samples| {
            raw_instruction()
                .one_or_more_separated(text::newline())
                .map(move |program| SampleFile {
                    samples: samples.clone(),
                    program,
                })
        })
        .keep_left(text::newline().zero_or_more())
}

impl<const N: usize> FromStr for Registers<N> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all(&registers_literal::<N>(), s)
    }
}

impl FromStr for Instruction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all(&instruction(), s)
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all(&program(), s)
    }
}

impl<const N: usize> FromStr for SampleFile<N> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_all(&sample_file::<N>(), s)
    }
}
