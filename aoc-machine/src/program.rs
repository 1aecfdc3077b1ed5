//! Programs for the instruction-pointer machine

use crate::operation::Instruction;
use std::fmt;

/// A list of instructions plus the register bound to the instruction pointer.
///
/// Text form, accepted by [`str::parse`] and produced by `Display`:
///
/// ```text
/// #ip 0
/// seti 5 0 1
/// addi 0 1 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub ip_register: usize,
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(ip_register: usize, instructions: Vec<Instruction>) -> Self {
        Self {
            ip_register,
            instructions,
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#ip {}", self.ip_register)?;
        for instruction in &self.instructions {
            write!(f, "\n{instruction}")?;
        }
        Ok(())
    }
}
