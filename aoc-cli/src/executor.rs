//! Task execution: read the input file, parse it, run the machine

use crate::config::{RUN_REGISTERS, Task};
use crate::error::CliError;
use aoc_machine::{
    Exit, Machine, OpcodeMap, Operation, Program, Registers, SampleFile, StepBudget, Word,
    count_ambiguous_samples, resolve_opcodes, run_straight_line,
};
use chrono::TimeDelta;
use log::{debug, info};
use std::ops::ControlFlow;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

/// Samples matching at least this many operations count as ambiguous
pub const AMBIGUITY_THRESHOLD: usize = 3;

/// Registers of the machine used by `resolve`
pub const RESOLVE_REGISTERS: usize = 4;

/// What a task produced
#[derive(Debug)]
pub enum Outcome {
    /// Program in canonical form
    Checked { program: Program },
    /// Final state of a run
    Ran {
        registers: Registers<RUN_REGISTERS>,
        steps: u64,
        /// Instruction pointer the run was stopped at, if interrupted
        stopped_at: Option<Word>,
    },
    /// Opcode table and the result of the decoded test program
    Resolved {
        samples: usize,
        ambiguous_samples: usize,
        mapping: Vec<(u8, Operation)>,
        registers: Registers<RESOLVE_REGISTERS>,
    },
}

/// Task outcome with timings
#[derive(Debug)]
pub struct Report {
    pub outcome: Outcome,
    pub parse_duration: TimeDelta,
    pub run_duration: TimeDelta,
}

fn elapsed(start: Instant) -> TimeDelta {
    TimeDelta::from_std(start.elapsed()).unwrap_or(TimeDelta::MAX)
}

/// Read `path` and parse it with `T`'s grammar
fn load<T>(path: &Path) -> Result<T, CliError>
where
    T: FromStr<Err = aoc_parser::ParseError>,
{
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    text.parse().map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute a resolved task
pub fn execute(task: &Task) -> Result<Report, CliError> {
    match task {
        Task::Check { file } => check(file),
        Task::Run {
            file,
            registers,
            budget,
            stop_at_ip,
        } => run(file, *registers, *budget, *stop_at_ip),
        Task::Resolve { file } => resolve(file),
    }
}

fn check(file: &Path) -> Result<Report, CliError> {
    let start = Instant::now();
    let program: Program = load(file)?;
    let parse_duration = elapsed(start);

    // Validate against the machine `run` would use
    let start = Instant::now();
    Machine::<RUN_REGISTERS>::new(&program)?;
    Ok(Report {
        outcome: Outcome::Checked { program },
        parse_duration,
        run_duration: elapsed(start),
    })
}

fn run(
    file: &Path,
    registers: Registers<RUN_REGISTERS>,
    budget: StepBudget,
    stop_at_ip: Option<Word>,
) -> Result<Report, CliError> {
    let start = Instant::now();
    let program: Program = load(file)?;
    let parse_duration = elapsed(start);
    info!(
        "Running {} instructions with ip bound to r{}, budget {budget:?}",
        program.len(),
        program.ip_register
    );

    let start = Instant::now();
    let machine = Machine::<RUN_REGISTERS>::new(&program)?;
    let exit = machine.run_with(registers, budget, |ip, _| match stop_at_ip {
        Some(target) if ip == target => ControlFlow::Break(()),
        _ => ControlFlow::Continue(()),
    })?;
    let run_duration = elapsed(start);

    let (run, stopped_at) = match exit {
        Exit::Halted(run) => (run, None),
        Exit::Interrupted(run) => (run, stop_at_ip),
    };
    Ok(Report {
        outcome: Outcome::Ran {
            registers: run.registers,
            steps: run.steps,
            stopped_at,
        },
        parse_duration,
        run_duration,
    })
}

fn resolve(file: &Path) -> Result<Report, CliError> {
    let start = Instant::now();
    let sample_file: SampleFile<RESOLVE_REGISTERS> = load(file)?;
    let parse_duration = elapsed(start);

    let start = Instant::now();
    let ambiguous_samples = count_ambiguous_samples(&sample_file.samples, AMBIGUITY_THRESHOLD);
    let map: OpcodeMap = resolve_opcodes(&sample_file.samples)?;
    let program = map.decode_all(&sample_file.program)?;
    let registers = run_straight_line(&program, Registers::zeroed())?;

    Ok(Report {
        outcome: Outcome::Resolved {
            samples: sample_file.samples.len(),
            ambiguous_samples,
            mapping: map.iter().collect(),
            registers,
        },
        parse_duration,
        run_duration: elapsed(start),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_check_reports_canonical_program() {
        let file = write_temp("#ip 3\naddi  3 16 3\nseti 1 0 4\n\n");
        let report = execute(&Task::Check {
            file: file.path().to_path_buf(),
        })
        .unwrap();
        let Outcome::Checked { program } = report.outcome else {
            panic!("expected a checked program");
        };
        assert_eq!(program.to_string(), "#ip 3\naddi 3 16 3\nseti 1 0 4");
    }

    #[test]
    fn test_check_rejects_out_of_range_register() {
        let file = write_temp("#ip 0\naddr 0 6 1\n");
        let err = execute(&Task::Check {
            file: file.path().to_path_buf(),
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Machine(_)));
    }

    #[test]
    fn test_run_stops_at_ip() {
        // r1 counts up forever; stop the first time instruction 1 comes up
        let file = write_temp("#ip 0\naddi 1 1 1\nseti -1 0 0\n");
        let report = execute(&Task::Run {
            file: file.path().to_path_buf(),
            registers: Registers::new([0, 0, 0, 0, 0, 0]),
            budget: StepBudget::Limited(9),
            stop_at_ip: Some(1),
        })
        .unwrap();
        let Outcome::Ran {
            registers,
            steps,
            stopped_at,
        } = report.outcome
        else {
            panic!("expected a run");
        };
        assert_eq!(stopped_at, Some(1));
        assert_eq!(steps, 1);
        assert_eq!(registers, Registers::new([1, 1, 0, 0, 0, 0]));
    }

    #[test]
    fn test_run_budget_exhausted() {
        let file = write_temp("#ip 0\nseti -1 0 0\n");
        let err = execute(&Task::Run {
            file: file.path().to_path_buf(),
            registers: Registers::zeroed(),
            budget: StepBudget::Limited(100),
            stop_at_ip: None,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Machine(aoc_machine::MachineError::BudgetExhausted { steps: 100 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = execute(&Task::Check {
            file: "/definitely/not/here.txt".into(),
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn test_parse_error_carries_location() {
        let file = write_temp("#ip 0\nnope 1 2 3\n");
        let err = execute(&Task::Check {
            file: file.path().to_path_buf(),
        })
        .unwrap_err();
        let CliError::Parse { source, .. } = err else {
            panic!("expected a parse error");
        };
        assert_eq!(source.position(), 6);
        assert!(matches!(
            source,
            aoc_parser::ParseError::Failed {
                line: 2,
                column: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve() {
        let file = write_temp(
            "Before: [3, 2, 1, 1]\n3 2 1 2\nAfter:  [3, 2, 2, 1]\n\n\
             Before: [0, 0, 0, 0]\n5 2 0 1\nAfter:  [0, 2, 0, 0]\n\n\
             Before: [2, 3, 0, 0]\n9 0 1 2\nAfter:  [2, 3, 6, 0]\n\n\n\n\
             5 4 0 0\n9 0 0 1\n3 1 1 2\n",
        );
        let report = execute(&Task::Resolve {
            file: file.path().to_path_buf(),
        })
        .unwrap();
        let Outcome::Resolved {
            samples,
            ambiguous_samples,
            mapping,
            registers,
        } = report.outcome
        else {
            panic!("expected a resolution");
        };
        assert_eq!(samples, 3);
        assert_eq!(ambiguous_samples, 1);
        assert_eq!(
            mapping,
            vec![(3, Operation::Addi), (5, Operation::Seti), (9, Operation::Mulr)]
        );
        assert_eq!(registers, Registers::new([4, 16, 17, 0]));
    }
}
