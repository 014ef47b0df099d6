mod asm;
mod cli;
mod commands;
mod error;

#[cfg(test)]
mod asm_tests;
#[cfg(test)]
mod cli_tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::encode::EncodeArgs;
use commands::stats::StatsArgs;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Encode {
            input,
            output,
            emit,
        } => commands::encode::run(EncodeArgs {
            program: input.program,
            output,
            word_size: input.word_size,
            emit,
        }),
        Command::Stats { input } => commands::stats::run(StatsArgs {
            program: input.program,
            word_size: input.word_size,
        }),
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
