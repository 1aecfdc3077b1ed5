//! Output formatting for task reports

use crate::executor::{AMBIGUITY_THRESHOLD, Outcome, Report};
use chrono::TimeDelta;
use itertools::Itertools;

/// Output formatter for task reports
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a report
    pub fn print_report(&self, report: &Report) {
        if self.quiet {
            println!("{}", format_answer(&report.outcome));
        } else {
            for line in format_full(&report.outcome) {
                println!("{line}");
            }
            self.print_timing(report);
        }
    }

    /// Parse and run timings plus elapsed wall-clock time
    fn print_timing(&self, report: &Report) {
        println!(
            "(parse: {}, run: {}, elapsed: {})",
            format_duration(report.parse_duration),
            format_duration(report.run_duration),
            format_std_duration(self.start_time.elapsed())
        );
    }
}

/// The single value a puzzle asks for
fn format_answer(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Checked { program } => program.to_string(),
        Outcome::Ran { registers, .. } => registers[0].to_string(),
        Outcome::Resolved {
            ambiguous_samples,
            registers,
            ..
        } => format!("{ambiguous_samples}\n{}", registers[0]),
    }
}

fn format_full(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Checked { program } => {
            let mut lines = vec![format!("Program OK: {} instructions", program.len())];
            lines.extend(program.to_string().lines().map(str::to_string));
            lines
        }
        Outcome::Ran {
            registers,
            steps,
            stopped_at,
        } => {
            let status = match stopped_at {
                Some(ip) => format!("Stopped at ip {ip}"),
                None => "Halted".to_string(),
            };
            vec![
                format!("{status} after {steps} steps"),
                format!("Registers: {registers}"),
                format!("Register 0: {}", registers[0]),
            ]
        }
        Outcome::Resolved {
            samples,
            ambiguous_samples,
            mapping,
            registers,
        } => vec![
            format!(
                "Samples matching {AMBIGUITY_THRESHOLD} or more operations: {ambiguous_samples} of {samples}"
            ),
            format!(
                "Opcodes: {}",
                mapping
                    .iter()
                    .map(|(opcode, op)| format!("{opcode}={op}"))
                    .join(", ")
            ),
            format!("Registers after test program: {registers}"),
            format!("Register 0: {}", registers[0]),
        ],
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
