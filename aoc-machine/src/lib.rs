//! Register Machine
//!
//! A small register machine with sixteen arithmetic, bitwise and comparison
//! operations, an interpreter that binds one register to the instruction
//! pointer, and opcode resolution from captured before/after samples.
//!
//! # Overview
//!
//! - [`Registers`]: fixed-size register file, updated functionally
//! - [`Operation`] and [`Instruction`]: the instruction set
//! - [`Program`] and [`Machine`]: programs with an instruction-pointer
//!   register, run under a [`StepBudget`]
//! - [`resolve_opcodes`]: recover the opcode table from [`Sample`]s
//! - [`syntax`]: grammars for all of the above, built on `aoc_parser`
//!
//! # Example
//!
//! ```
//! use aoc_machine::{Machine, Program, Registers, StepBudget};
//!
//! // r1 counts down from 3; r0 is the instruction pointer
//! let program: Program = "#ip 0
//! seti 3 0 1
//! addi 1 -1 1
//! gtri 1 0 2
//! addr 0 2 0
//! seti 9 0 0
//! seti 0 0 0"
//!     .parse()
//!     .unwrap();
//!
//! let machine = Machine::<3>::new(&program).unwrap();
//! let run = machine.run(Registers::zeroed(), StepBudget::Limited(100)).unwrap();
//! assert_eq!(run.registers.to_string(), "[10, 0, 0]");
//! assert_eq!(run.steps, 13);
//! ```

mod error;
mod interpreter;
mod operation;
mod program;
mod registers;
mod resolve;
pub mod syntax;

// Re-export public API
pub use error::{MachineError, ResolveError};
pub use interpreter::{Exit, Machine, Run, Step, StepBudget, run_straight_line};
pub use operation::{Instruction, Opcode, OperandKind, Operation};
pub use program::Program;
pub use registers::{Registers, Word, register_index};
pub use resolve::{OpcodeMap, OperationSet, Sample, SampleFile, count_ambiguous_samples, resolve_opcodes};
