//! Error types for the register machine

use crate::operation::Opcode;
use crate::registers::Word;
use thiserror::Error;

/// Error raised while executing or validating instructions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// Operand used as a register index is negative or too large
    #[error("Register {index} is out of range for a machine with {registers} registers")]
    InvalidRegister { index: Word, registers: usize },
    /// Instruction pointer bound to a register the machine does not have
    #[error("Instruction pointer register {index} is out of range for a machine with {registers} registers")]
    InvalidIpRegister { index: usize, registers: usize },
    /// Instruction number `index` (from 0) references an invalid register
    #[error("Invalid instruction {index}: {source}")]
    InvalidInstruction {
        index: usize,
        #[source]
        source: Box<MachineError>,
    },
    /// Step budget ran out before the program halted
    #[error("Step budget of {steps} exhausted before the program halted")]
    BudgetExhausted { steps: u64 },
}

/// Error raised while mapping numeric opcodes to operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No operation is consistent with every sample of this opcode
    #[error("No operation matches every sample for opcode {opcode}")]
    NoCandidates { opcode: Opcode },
    /// Elimination stalled with several candidates left for these opcodes
    #[error("Opcodes {opcodes:?} could not be resolved to a single operation")]
    Ambiguous { opcodes: Vec<Opcode> },
    /// Opcode absent from the resolved mapping
    #[error("Opcode {opcode} does not appear in the resolved mapping")]
    UnknownOpcode { opcode: Opcode },
}
