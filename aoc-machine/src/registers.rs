//! Fixed-size register files

use crate::error::MachineError;
use itertools::Itertools;
use std::fmt;
use std::ops::Index;

/// Value held by a register, also the type of instruction operands
pub type Word = i64;

/// Convert an operand into a register index valid for `N` registers
pub fn register_index<const N: usize>(operand: Word) -> Result<usize, MachineError> {
    usize::try_from(operand)
        .ok()
        .filter(|&index| index < N)
        .ok_or(MachineError::InvalidRegister {
            index: operand,
            registers: N,
        })
}

/// `N` registers as a small immutable value.
///
/// Updates return a new register file, so one `before` state can be fed to
/// many operations without interference.
///
/// ```
/// use aoc_machine::Registers;
///
/// let before = Registers::new([3, 1, 2, 0]);
/// let after = before.with(2, 4).unwrap();
/// assert_eq!(before.to_string(), "[3, 1, 2, 0]");
/// assert_eq!(after.to_string(), "[3, 1, 4, 0]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registers<const N: usize>([Word; N]);

impl<const N: usize> Registers<N> {
    pub fn new(values: [Word; N]) -> Self {
        Self(values)
    }

    /// All registers set to 0
    pub fn zeroed() -> Self {
        Self([0; N])
    }

    /// Value of register `index`
    pub fn get(&self, index: Word) -> Result<Word, MachineError> {
        Ok(self.0[register_index::<N>(index)?])
    }

    /// Copy of these registers with register `index` set to `value`
    pub fn with(mut self, index: Word, value: Word) -> Result<Self, MachineError> {
        self.0[register_index::<N>(index)?] = value;
        Ok(self)
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.0
    }

    pub fn into_inner(self) -> [Word; N] {
        self.0
    }
}

impl<const N: usize> Default for Registers<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> From<[Word; N]> for Registers<N> {
    fn from(values: [Word; N]) -> Self {
        Self(values)
    }
}

impl<const N: usize> Index<usize> for Registers<N> {
    type Output = Word;

    fn index(&self, index: usize) -> &Word {
        &self.0[index]
    }
}

impl<const N: usize> fmt::Display for Registers<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}
