//! Instruction interpreter
//!
//! The machine has no branch instruction. One register is bound to the
//! instruction pointer: before each step its value selects the instruction,
//! after the step it is incremented by one. Writing to that register is a
//! jump. The program halts when the pointer leaves the program, on either
//! side.

use crate::error::MachineError;
use crate::operation::Instruction;
use crate::program::Program;
use crate::registers::{Registers, Word};
use log::{debug, trace};
use std::ops::ControlFlow;

/// Upper bound on the number of executed instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepBudget {
    #[default]
    Unlimited,
    Limited(u64),
}

impl StepBudget {
    fn allows(self, steps: u64) -> bool {
        match self {
            StepBudget::Unlimited => true,
            StepBudget::Limited(limit) => steps < limit,
        }
    }
}

impl From<Option<u64>> for StepBudget {
    fn from(limit: Option<u64>) -> Self {
        limit.map_or(StepBudget::Unlimited, StepBudget::Limited)
    }
}

/// Result of a single [`Machine::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<const N: usize> {
    /// An instruction ran; these are the registers after it
    Continue(Registers<N>),
    /// The instruction pointer is outside the program; registers unchanged
    Halted(Registers<N>),
}

/// Final state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run<const N: usize> {
    pub registers: Registers<N>,
    /// Number of instructions executed
    pub steps: u64,
}

/// How [`Machine::run_with`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit<const N: usize> {
    /// The instruction pointer left the program
    Halted(Run<N>),
    /// The observer asked to stop before the next instruction
    Interrupted(Run<N>),
}

impl<const N: usize> Exit<N> {
    pub fn run(&self) -> &Run<N> {
        match self {
            Exit::Halted(run) | Exit::Interrupted(run) => run,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Exit::Halted(_))
    }
}

/// A validated program ready to run on `N` registers.
///
/// ```
/// use aoc_machine::{Machine, Program, Registers, StepBudget};
///
/// let program: Program = "#ip 0\nseti 5 0 1\nseti 6 0 2".parse().unwrap();
/// let machine = Machine::<4>::new(&program).unwrap();
/// let run = machine.run(Registers::zeroed(), StepBudget::Unlimited).unwrap();
/// assert_eq!(run.registers.to_string(), "[2, 5, 6, 0]");
/// assert_eq!(run.steps, 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Machine<'p, const N: usize> {
    program: &'p Program,
    ip_register: Word,
}

impl<'p, const N: usize> Machine<'p, N> {
    /// Check the instruction pointer binding and every instruction against
    /// the register count.
    pub fn new(program: &'p Program) -> Result<Self, MachineError> {
        let ip_register = Word::try_from(program.ip_register)
            .ok()
            .filter(|_| program.ip_register < N)
            .ok_or(MachineError::InvalidIpRegister {
                index: program.ip_register,
                registers: N,
            })?;
        for (index, instruction) in program.instructions.iter().enumerate() {
            instruction
                .validate::<N>()
                .map_err(|source| MachineError::InvalidInstruction {
                    index,
                    source: Box::new(source),
                })?;
        }
        Ok(Self {
            program,
            ip_register,
        })
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    /// Instruction at `ip`, or `None` when the pointer is outside the program
    fn fetch(&self, ip: Word) -> Option<&'p Instruction> {
        let program = self.program;
        usize::try_from(ip)
            .ok()
            .and_then(|ip| program.instructions.get(ip))
    }

    fn advance(&self, instruction: &Instruction, registers: Registers<N>) -> Result<Registers<N>, MachineError> {
        let after = instruction.execute(registers)?;
        let next = after.get(self.ip_register)?.wrapping_add(1);
        after.with(self.ip_register, next)
    }

    /// Execute the instruction selected by the instruction pointer
    pub fn step(&self, registers: Registers<N>) -> Result<Step<N>, MachineError> {
        let ip = registers.get(self.ip_register)?;
        match self.fetch(ip) {
            Some(instruction) => Ok(Step::Continue(self.advance(instruction, registers)?)),
            None => Ok(Step::Halted(registers)),
        }
    }

    /// Run until the program halts.
    ///
    /// Fails with [`MachineError::BudgetExhausted`] when `budget` runs out
    /// first.
    pub fn run(&self, registers: Registers<N>, budget: StepBudget) -> Result<Run<N>, MachineError> {
        let exit = self.run_with(registers, budget, |_, _| ControlFlow::Continue(()))?;
        Ok(*exit.run())
    }

    /// Run until the program halts or `observer` breaks.
    ///
    /// `observer` sees the instruction pointer and registers before every
    /// fetch, including the final one that halts.
    pub fn run_with<F>(
        &self,
        mut registers: Registers<N>,
        budget: StepBudget,
        mut observer: F,
    ) -> Result<Exit<N>, MachineError>
    where
        F: FnMut(Word, &Registers<N>) -> ControlFlow<()>,
    {
        let mut steps = 0;
        loop {
            let ip = registers.get(self.ip_register)?;
            if observer(ip, &registers).is_break() {
                debug!("Interrupted at ip {ip} after {steps} steps: {registers}");
                return Ok(Exit::Interrupted(Run { registers, steps }));
            }
            let Some(instruction) = self.fetch(ip) else {
                debug!("Halted at ip {ip} after {steps} steps: {registers}");
                return Ok(Exit::Halted(Run { registers, steps }));
            };
            if !budget.allows(steps) {
                debug!("Step budget exhausted at ip {ip}: {registers}");
                return Err(MachineError::BudgetExhausted { steps });
            }
            registers = self.advance(instruction, registers)?;
            steps += 1;
            trace!("{ip:>4}: {instruction} -> {registers}");
        }
    }
}

/// Execute `instructions` in order, without an instruction pointer
pub fn run_straight_line<'a, const N: usize>(
    instructions: impl IntoIterator<Item = &'a Instruction>,
    registers: Registers<N>,
) -> Result<Registers<N>, MachineError> {
    instructions
        .into_iter()
        .try_fold(registers, |registers, instruction| instruction.execute(registers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;

    fn program(ip_register: usize, instructions: &[(Operation, Word, Word, Word)]) -> Program {
        Program::new(
            ip_register,
            instructions
                .iter()
                .map(|&(op, a, b, c)| Instruction::new(op, a, b, c))
                .collect(),
        )
    }

    #[test]
    fn test_new_rejects_bad_registers() {
        let bad_ip = program(6, &[]);
        assert_eq!(
            Machine::<6>::new(&bad_ip).unwrap_err(),
            MachineError::InvalidIpRegister {
                index: 6,
                registers: 6
            }
        );

        let bad_operand = program(0, &[(Operation::Seti, 1, 0, 1), (Operation::Addr, 0, 4, 1)]);
        assert!(matches!(
            Machine::<4>::new(&bad_operand),
            Err(MachineError::InvalidInstruction { index: 1, .. })
        ));
    }

    #[test]
    fn test_step_increments_ip_register() {
        let p = program(1, &[(Operation::Seti, 7, 0, 0)]);
        let machine = Machine::<2>::new(&p).unwrap();
        let first = machine.step(Registers::zeroed()).unwrap();
        assert_eq!(first, Step::Continue(Registers::new([7, 1])));
        let Step::Continue(registers) = first else {
            unreachable!()
        };
        assert_eq!(machine.step(registers).unwrap(), Step::Halted(registers));
    }

    #[test]
    fn test_negative_ip_halts() {
        let p = program(0, &[(Operation::Seti, -5, 0, 0)]);
        let machine = Machine::<1>::new(&p).unwrap();
        let run = machine.run(Registers::zeroed(), StepBudget::Limited(10)).unwrap();
        assert_eq!(run.registers, Registers::new([-4]));
        assert_eq!(run.steps, 1);
    }

    #[test]
    fn test_budget_allows_exactly_limit_steps() {
        let p = program(0, &[(Operation::Addi, 1, 1, 1), (Operation::Addi, 1, 1, 1)]);
        let machine = Machine::<2>::new(&p).unwrap();
        let run = machine.run(Registers::zeroed(), StepBudget::Limited(2)).unwrap();
        assert_eq!(run.steps, 2);
        assert_eq!(
            machine.run(Registers::zeroed(), StepBudget::Limited(1)),
            Err(MachineError::BudgetExhausted { steps: 1 })
        );
    }

    #[test]
    fn test_observer_interrupts() {
        // Counts r1 up forever
        let p = program(0, &[(Operation::Addi, 1, 1, 1), (Operation::Seti, -1, 0, 0)]);
        let machine = Machine::<2>::new(&p).unwrap();
        let exit = machine
            .run_with(Registers::zeroed(), StepBudget::Unlimited, |ip, registers| {
                if ip == 0 && registers[1] == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert!(!exit.is_halted());
        assert_eq!(exit.run().steps, 6);
        assert_eq!(exit.run().registers, Registers::new([0, 3]));
    }

    #[test]
    fn test_straight_line() {
        let instructions = [
            Instruction::new(Operation::Seti, 3, 0, 0),
            Instruction::new(Operation::Mulr, 0, 0, 1),
        ];
        assert_eq!(
            run_straight_line(&instructions, Registers::<4>::zeroed()),
            Ok(Registers::new([3, 9, 0, 0]))
        );
        assert!(run_straight_line(&instructions, Registers::<1>::zeroed()).is_err());
    }

    #[test]
    fn test_budget_from_option() {
        assert_eq!(StepBudget::from(None), StepBudget::Unlimited);
        assert_eq!(StepBudget::from(Some(5)), StepBudget::Limited(5));
    }
}
