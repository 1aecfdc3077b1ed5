//! AOC CLI - Command-line interface for checking, running and decoding
//! register machine programs

mod cli;
mod config;
mod error;
mod executor;
mod output;

use clap::Parser;
use cli::Args;
use config::Config;
use output::OutputFormatter;
use simple_logger::SimpleLogger;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;

    // RUST_LOG takes precedence over -v
    SimpleLogger::new()
        .with_level(config.log_level)
        .env()
        .init()?;

    let formatter = OutputFormatter::new(config.quiet);
    let report = executor::execute(&config.task)?;
    formatter.print_report(&report);

    Ok(())
}
