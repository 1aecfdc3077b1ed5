//! CLI argument parsing using clap

use aoc_machine::Word;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Register machine toolkit for the Advent of Code device puzzles
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Check, run and decode register machine programs", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet mode - only output answers
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a program and print it in canonical form
    Check {
        /// Program file (`#ip N` followed by instructions)
        file: PathBuf,
    },

    /// Run a program on a six-register machine
    Run {
        /// Program file (`#ip N` followed by instructions)
        file: PathBuf,

        /// Initial register values (comma-separated, missing ones are 0)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        registers: Vec<Word>,

        /// Maximum number of instructions to execute (default: $AOC_MAX_STEPS or unlimited)
        #[arg(long)]
        max_steps: Option<u64>,

        /// Stop as soon as the instruction pointer reaches this value
        #[arg(long, allow_hyphen_values = true)]
        stop_at_ip: Option<Word>,
    },

    /// Resolve opcodes from samples and run the test program
    Resolve {
        /// Sample file (samples, blank lines, then the test program)
        file: PathBuf,
    },
}
