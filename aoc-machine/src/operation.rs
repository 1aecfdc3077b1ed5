//! The sixteen register operations and instructions built from them

use crate::error::MachineError;
use crate::registers::{Registers, Word, register_index};
use std::fmt;
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Numeric operation selector used by captured samples, before resolution
pub type Opcode = u8;

/// How an input operand is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandKind {
    /// Index of the register holding the value
    Register,
    /// The value itself
    Immediate,
    /// Not read at all
    Ignored,
}

/// A register machine operation.
///
/// Every operation reads inputs A and B, interpreted according to
/// [`Operation::operands`], and writes its result to register C.
/// Mnemonics are the lowercase variant names:
///
/// ```
/// use aoc_machine::Operation;
///
/// let op: Operation = "gtri".parse().unwrap();
/// assert_eq!(op, Operation::Gtri);
/// assert_eq!(op.to_string(), "gtri");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, EnumCount,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Operation {
    Addr,
    Addi,
    Mulr,
    Muli,
    Banr,
    Bani,
    Borr,
    Bori,
    Setr,
    Seti,
    Gtir,
    Gtri,
    Gtrr,
    Eqir,
    Eqri,
    Eqrr,
}

impl Operation {
    /// Kinds of inputs A and B
    pub fn operands(self) -> (OperandKind, OperandKind) {
        use OperandKind::*;
        use Operation::*;
        match self {
            Addr | Mulr | Banr | Borr | Gtrr | Eqrr => (Register, Register),
            Addi | Muli | Bani | Bori | Gtri | Eqri => (Register, Immediate),
            Gtir | Eqir => (Immediate, Register),
            Setr => (Register, Ignored),
            Seti => (Immediate, Ignored),
        }
    }

    /// Position of this operation in declaration order
    pub(crate) fn ordinal(self) -> usize {
        self as usize
    }

    /// Apply the operation to `registers`, returning the updated copy.
    ///
    /// Arithmetic wraps on overflow; the only failure is an operand that
    /// names a register outside the machine.
    pub fn apply<const N: usize>(
        self,
        registers: Registers<N>,
        a: Word,
        b: Word,
        c: Word,
    ) -> Result<Registers<N>, MachineError> {
        let read = |kind: OperandKind, operand: Word| match kind {
            OperandKind::Register => registers.get(operand),
            OperandKind::Immediate => Ok(operand),
            OperandKind::Ignored => Ok(0),
        };
        let (kind_a, kind_b) = self.operands();
        let a = read(kind_a, a)?;
        let b = read(kind_b, b)?;

        use Operation::*;
        let result = match self {
            Addr | Addi => a.wrapping_add(b),
            Mulr | Muli => a.wrapping_mul(b),
            Banr | Bani => a & b,
            Borr | Bori => a | b,
            Setr | Seti => a,
            Gtir | Gtri | Gtrr => Word::from(a > b),
            Eqir | Eqri | Eqrr => Word::from(a == b),
        };
        registers.with(c, result)
    }
}

/// One instruction: an operation selector and its three operands.
///
/// `Op` is [`Operation`] for executable code and
/// [`Opcode`] for instructions captured before the opcode mapping is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction<Op = Operation> {
    pub op: Op,
    pub a: Word,
    pub b: Word,
    pub c: Word,
}

impl<Op> Instruction<Op> {
    pub fn new(op: Op, a: Word, b: Word, c: Word) -> Self {
        Self { op, a, b, c }
    }

    /// Same operands with a different selector
    pub fn with_op<Other>(&self, op: Other) -> Instruction<Other> {
        Instruction {
            op,
            a: self.a,
            b: self.b,
            c: self.c,
        }
    }
}

impl Instruction {
    pub fn execute<const N: usize>(&self, registers: Registers<N>) -> Result<Registers<N>, MachineError> {
        self.op.apply(registers, self.a, self.b, self.c)
    }

    /// Check that every register operand fits a machine with `N` registers
    pub fn validate<const N: usize>(&self) -> Result<(), MachineError> {
        let (kind_a, kind_b) = self.op.operands();
        for (kind, operand) in [(kind_a, self.a), (kind_b, self.b)] {
            if kind == OperandKind::Register {
                register_index::<N>(operand)?;
            }
        }
        register_index::<N>(self.c).map(|_| ())
    }
}

impl<Op: fmt::Display> fmt::Display for Instruction<Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.op, self.a, self.b, self.c)
    }
}
