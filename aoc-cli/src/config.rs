//! Configuration resolution from CLI args

use crate::cli::{Args, Command};
use crate::error::CliError;
use aoc_machine::{Registers, StepBudget, Word};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Registers of the machine used by `run`
pub const RUN_REGISTERS: usize = 6;

/// Environment variable holding the default step budget
pub const MAX_STEPS_ENV: &str = "AOC_MAX_STEPS";

/// Resolved task to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Check {
        file: PathBuf,
    },
    Run {
        file: PathBuf,
        registers: Registers<RUN_REGISTERS>,
        budget: StepBudget,
        stop_at_ip: Option<Word>,
    },
    Resolve {
        file: PathBuf,
    },
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// What to do
    pub task: Task,
    /// Quiet mode
    pub quiet: bool,
    /// Log level chosen by `-v`; `RUST_LOG` still overrides it
    pub log_level: LevelFilter,
}

impl Config {
    /// Build config from CLI args, falling back to the environment for the
    /// step budget
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let env_max_steps = std::env::var(MAX_STEPS_ENV).ok();
        Self::resolve(args, env_max_steps.as_deref())
    }

    fn resolve(args: Args, env_max_steps: Option<&str>) -> Result<Self, CliError> {
        let task = match args.command {
            Command::Check { file } => Task::Check {
                file: expand_tilde(&file),
            },
            Command::Run {
                file,
                registers,
                max_steps,
                stop_at_ip,
            } => Task::Run {
                file: expand_tilde(&file),
                registers: initial_registers(&registers)?,
                budget: resolve_budget(max_steps, env_max_steps)?,
                stop_at_ip,
            },
            Command::Resolve { file } => Task::Resolve {
                file: expand_tilde(&file),
            },
        };

        Ok(Config {
            task,
            quiet: args.quiet,
            log_level: log_level(args.verbose),
        })
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Explicit flag first, then the environment, otherwise unlimited
fn resolve_budget(flag: Option<u64>, env: Option<&str>) -> Result<StepBudget, CliError> {
    if let Some(steps) = flag {
        return Ok(StepBudget::Limited(steps));
    }
    match env.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value.parse().map(StepBudget::Limited).map_err(|_| {
            CliError::Config(format!(
                "{MAX_STEPS_ENV} must be a non-negative integer, got {value:?}"
            ))
        }),
        None => Ok(StepBudget::Unlimited),
    }
}

/// Pad the given values with zeros up to the machine size
fn initial_registers(values: &[Word]) -> Result<Registers<RUN_REGISTERS>, CliError> {
    if values.len() > RUN_REGISTERS {
        return Err(CliError::Config(format!(
            "At most {RUN_REGISTERS} register values can be given, got {}",
            values.len()
        )));
    }
    let mut registers = [0; RUN_REGISTERS];
    registers[..values.len()].copy_from_slice(values);
    Ok(Registers::new(registers))
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_run_defaults() {
        let config = Config::resolve(parse(&["aoc", "run", "prog.txt"]), None).unwrap();
        assert_eq!(
            config.task,
            Task::Run {
                file: PathBuf::from("prog.txt"),
                registers: Registers::zeroed(),
                budget: StepBudget::Unlimited,
                stop_at_ip: None,
            }
        );
        assert!(!config.quiet);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_run_flags() {
        let args = parse(&[
            "aoc",
            "-vv",
            "run",
            "prog.txt",
            "--registers",
            "1,-2",
            "--max-steps",
            "500",
            "--stop-at-ip",
            "28",
            "-q",
        ]);
        let config = Config::resolve(args, Some("10")).unwrap();
        assert_eq!(
            config.task,
            Task::Run {
                file: PathBuf::from("prog.txt"),
                registers: Registers::new([1, -2, 0, 0, 0, 0]),
                budget: StepBudget::Limited(500),
                stop_at_ip: Some(28),
            }
        );
        assert!(config.quiet);
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_budget_from_environment() {
        assert_eq!(resolve_budget(None, Some(" 42 ")).unwrap(), StepBudget::Limited(42));
        assert_eq!(resolve_budget(None, Some("")).unwrap(), StepBudget::Unlimited);
        assert!(matches!(
            resolve_budget(None, Some("lots")),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_too_many_registers() {
        let args = parse(&["aoc", "run", "p", "--registers", "1,2,3,4,5,6,7"]);
        assert!(matches!(Config::resolve(args, None), Err(CliError::Config(_))));
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(64))]

        /// **Feature: cli-config, Property 1: Register padding**
        /// *For any* list of at most six values, the initial registers start
        /// with those values and are zero afterwards.
        #[test]
        fn prop_initial_registers_pad_with_zeros(
            values in proptest::collection::vec(proptest::prelude::any::<Word>(), 0..=RUN_REGISTERS)
        ) {
            let registers = initial_registers(&values).unwrap();
            proptest::prop_assert_eq!(&registers.as_slice()[..values.len()], values.as_slice());
            proptest::prop_assert!(registers.as_slice()[values.len()..].iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/prog.txt")), home.join("prog.txt"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
