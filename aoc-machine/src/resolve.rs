//! Opcode resolution by constraint propagation
//!
//! Captured samples show the registers before and after one instruction
//! whose operation is only known by a numeric opcode. Each sample narrows
//! the operations its opcode may stand for; intersecting across samples and
//! then eliminating every resolved operation from the other opcodes
//! recovers the full opcode table.

use crate::error::ResolveError;
use crate::operation::{Instruction, Opcode, Operation};
use crate::registers::Registers;
use itertools::Itertools;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};

/// Set of operations, one bit per [`Operation`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OperationSet(u16);

impl OperationSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(u16::MAX >> (16 - Operation::COUNT))
    }

    fn bit(op: Operation) -> u16 {
        1 << op.ordinal()
    }

    pub fn insert(&mut self, op: Operation) {
        self.0 |= Self::bit(op);
    }

    pub fn remove(&mut self, op: Operation) {
        self.0 &= !Self::bit(op);
    }

    pub fn contains(&self, op: Operation) -> bool {
        self.0 & Self::bit(op) != 0
    }

    pub fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The only member, if there is exactly one
    pub fn single(&self) -> Option<Operation> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Operation> {
        let set = *self;
        Operation::iter().filter(move |&op| set.contains(op))
    }
}

impl FromIterator<Operation> for OperationSet {
    fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
        let mut set = Self::empty();
        for op in iter {
            set.insert(op);
        }
        set
    }
}

impl fmt::Debug for OperationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for OperationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().join(", "))
    }
}

/// One captured observation of an unknown instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample<const N: usize = 4> {
    pub before: Registers<N>,
    pub instruction: Instruction<Opcode>,
    pub after: Registers<N>,
}

impl<const N: usize> Sample<N> {
    /// Operations that turn `before` into `after` with this sample's operands
    pub fn candidates(&self) -> OperationSet {
        let Instruction { a, b, c, .. } = self.instruction;
        Operation::iter()
            .filter(|op| {
                op.apply(self.before, a, b, c)
                    .is_ok_and(|result| result == self.after)
            })
            .collect()
    }
}

/// Captured samples followed by a test program written with raw opcodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFile<const N: usize = 4> {
    pub samples: Vec<Sample<N>>,
    pub program: Vec<Instruction<Opcode>>,
}

/// Resolved opcode table, total over the opcodes seen in the samples and
/// injective.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpcodeMap {
    table: BTreeMap<Opcode, Operation>,
}

impl OpcodeMap {
    pub fn get(&self, opcode: Opcode) -> Option<Operation> {
        self.table.get(&opcode).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Pairs in ascending opcode order
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, Operation)> + '_ {
        self.table.iter().map(|(&opcode, &op)| (opcode, op))
    }

    /// Replace the opcode of `instruction` with its operation
    pub fn decode(&self, instruction: &Instruction<Opcode>) -> Result<Instruction, ResolveError> {
        self.get(instruction.op)
            .map(|op| instruction.with_op(op))
            .ok_or(ResolveError::UnknownOpcode {
                opcode: instruction.op,
            })
    }

    pub fn decode_all<'a>(
        &self,
        instructions: impl IntoIterator<Item = &'a Instruction<Opcode>>,
    ) -> Result<Vec<Instruction>, ResolveError> {
        instructions
            .into_iter()
            .map(|instruction| self.decode(instruction))
            .collect()
    }
}

/// Work out which operation each opcode stands for.
///
/// ```
/// use aoc_machine::{Instruction, Operation, Registers, Sample, resolve_opcodes};
///
/// let sample = Sample {
///     before: Registers::new([3, 2, 1, 1]),
///     instruction: Instruction::new(9, 2, 1, 2),
///     after: Registers::new([3, 2, 2, 1]),
/// };
/// // mulr, addi and seti all fit
/// assert_eq!(sample.candidates().len(), 3);
/// assert!(resolve_opcodes(&[sample]).is_err());
/// ```
pub fn resolve_opcodes<'a, const N: usize>(
    samples: impl IntoIterator<Item = &'a Sample<N>>,
) -> Result<OpcodeMap, ResolveError> {
    let mut pending: BTreeMap<Opcode, OperationSet> = BTreeMap::new();
    for sample in samples {
        let candidates = pending
            .entry(sample.instruction.op)
            .or_insert_with(OperationSet::all);
        *candidates = candidates.intersect(sample.candidates());
        trace!("Opcode {} narrowed to {candidates}", sample.instruction.op);
    }
    if let Some((&opcode, _)) = pending.iter().find(|(_, set)| set.is_empty()) {
        return Err(ResolveError::NoCandidates { opcode });
    }

    let mut table = BTreeMap::new();
    loop {
        let resolved = pending
            .iter()
            .filter_map(|(&opcode, set)| set.single().map(|op| (opcode, op)))
            .collect_vec();
        if resolved.is_empty() {
            break;
        }
        for (opcode, op) in resolved {
            debug!("Opcode {opcode} is {op}");
            pending.remove(&opcode);
            table.insert(opcode, op);
            for (&other, set) in pending.iter_mut() {
                set.remove(op);
                if set.is_empty() {
                    return Err(ResolveError::NoCandidates { opcode: other });
                }
            }
        }
    }

    if !pending.is_empty() {
        return Err(ResolveError::Ambiguous {
            opcodes: pending.keys().copied().collect(),
        });
    }
    Ok(OpcodeMap { table })
}

/// Number of samples consistent with at least `threshold` operations
pub fn count_ambiguous_samples<'a, const N: usize>(
    samples: impl IntoIterator<Item = &'a Sample<N>>,
    threshold: usize,
) -> usize {
    samples
        .into_iter()
        .filter(|sample| sample.candidates().len() >= threshold)
        .count()
}
