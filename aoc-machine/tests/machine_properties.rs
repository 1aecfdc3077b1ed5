//! Property-based tests for operations and the interpreter
//!
//! **Feature: register-machine**

use aoc_machine::{
    Instruction, Machine, MachineError, OperandKind, Operation, Program, Registers, StepBudget,
    Word,
};
use proptest::prelude::*;
use proptest::sample::select;
use strum::IntoEnumIterator;

fn operation() -> impl Strategy<Value = Operation> {
    select(Operation::iter().collect::<Vec<_>>())
}

fn registers() -> impl Strategy<Value = Registers<4>> {
    any::<[Word; 4]>().prop_map(Registers::new)
}

/// Operand valid for its kind on a 4-register machine
fn operand_for(kind: OperandKind) -> BoxedStrategy<Word> {
    match kind {
        OperandKind::Register => (0..4 as Word).boxed(),
        OperandKind::Immediate | OperandKind::Ignored => (-1000..1000 as Word).boxed(),
    }
}

fn valid_instruction() -> impl Strategy<Value = Instruction> {
    operation().prop_flat_map(|op| {
        let (kind_a, kind_b) = op.operands();
        (operand_for(kind_a), operand_for(kind_b), 0..4 as Word)
            .prop_map(move |(a, b, c)| Instruction::new(op, a, b, c))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// **Feature: register-machine, Property 1: Single write**
    /// *For any* valid instruction and registers, executing it changes no
    /// register other than C and leaves the input value untouched.
    #[test]
    fn prop_only_register_c_changes(instruction in valid_instruction(), before in registers()) {
        let snapshot = before;
        let after = instruction.execute(before).unwrap();
        prop_assert_eq!(before, snapshot);
        for index in 0..4 {
            if index as Word != instruction.c {
                prop_assert_eq!(after[index], before[index]);
            }
        }
    }

    /// **Feature: register-machine, Property 2: Determinism**
    /// *For any* valid instruction, applying it twice to the same registers
    /// gives the same result.
    #[test]
    fn prop_execution_is_deterministic(instruction in valid_instruction(), before in registers()) {
        prop_assert_eq!(instruction.execute(before), instruction.execute(before));
    }

    /// **Feature: register-machine, Property 3: Boolean comparisons**
    /// *For any* comparison, the written value is 0 or 1.
    #[test]
    fn prop_comparisons_write_booleans(instruction in valid_instruction(), before in registers()) {
        let is_comparison = matches!(
            instruction.op,
            Operation::Gtir | Operation::Gtri | Operation::Gtrr
                | Operation::Eqir | Operation::Eqri | Operation::Eqrr
        );
        if is_comparison {
            let after = instruction.execute(before).unwrap();
            prop_assert!(after[instruction.c as usize] == 0 || after[instruction.c as usize] == 1);
        }
    }

    /// **Feature: register-machine, Property 4: Budgeted termination**
    /// *For any* budget, a program that jumps to itself forever stops with
    /// `BudgetExhausted` after exactly that many steps.
    #[test]
    fn prop_budget_bounds_infinite_loop(limit in 0u64..5_000) {
        let program: Program = "#ip 0\nseti -1 0 0".parse().unwrap();
        let machine = Machine::<6>::new(&program).unwrap();
        prop_assert_eq!(
            machine.run(Registers::zeroed(), StepBudget::Limited(limit)),
            Err(MachineError::BudgetExhausted { steps: limit })
        );
    }

    /// **Feature: register-machine, Property 5: Register literal round trip**
    /// *For any* register values, the printed literal parses back to them.
    #[test]
    fn prop_registers_literal_round_trip(registers in registers()) {
        prop_assert_eq!(registers.to_string().parse::<Registers<4>>(), Ok(registers));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_halts_when_ip_leaves_program() {
        let program: Program = "#ip 1\nseti 0 0 1\naddi 1 10 1".parse().unwrap();
        let machine = Machine::<6>::new(&program).unwrap();
        let run = machine.run(Registers::zeroed(), StepBudget::Unlimited).unwrap();
        assert_eq!(run.registers, Registers::new([0, 12, 0, 0, 0, 0]));
        assert_eq!(run.steps, 2);
        // Same program, same start, same result
        assert_eq!(machine.run(Registers::zeroed(), StepBudget::Unlimited).unwrap(), run);
    }

    #[test]
    fn test_tight_loop_is_bounded_by_budget() {
        let program: Program = "#ip 2\nseti 0 0 0\nseti 0 0 2".parse().unwrap();
        let machine = Machine::<6>::new(&program).unwrap();
        for _ in 0..2 {
            assert_eq!(
                machine.run(Registers::zeroed(), StepBudget::Limited(1_000)),
                Err(MachineError::BudgetExhausted { steps: 1_000 })
            );
        }
    }

    #[test]
    fn test_operation_table() {
        let cases = [
            ("addr 0 1 2", [3, 1, 2, 0], [3, 1, 4, 0]),
            ("eqri 0 5 1", [5, 0, 0, 0], [5, 1, 0, 0]),
            ("gtir 5 0 1", [2, 0, 0, 0], [2, 1, 0, 0]),
            ("gtri 0 5 1", [2, 0, 0, 0], [2, 0, 0, 0]),
            ("gtrr 0 1 2", [4, 3, 9, 0], [4, 3, 1, 0]),
            ("eqir 4 0 3", [4, 0, 0, 7], [4, 0, 0, 1]),
            ("eqrr 0 1 3", [4, 5, 0, 7], [4, 5, 0, 0]),
            ("muli 1 3 0", [0, 7, 0, 0], [21, 7, 0, 0]),
            ("banr 0 1 2", [6, 3, 0, 0], [6, 3, 2, 0]),
            ("borr 0 1 2", [6, 3, 0, 0], [6, 3, 7, 0]),
            ("setr 3 0 0", [0, 0, 0, 8], [8, 0, 0, 8]),
        ];
        for (text, before, after) in cases {
            let instruction: Instruction = text.parse().unwrap();
            assert_eq!(
                instruction.execute(Registers::new(before)),
                Ok(Registers::new(after)),
                "{text}"
            );
        }
    }
}
