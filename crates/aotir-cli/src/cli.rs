use std::path::PathBuf;

use aotir_format::WordSize;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Output form of `aotir encode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// The stream bytes as they are
    #[default]
    Raw,
    /// GNU assembler source embedding the stream in its own section
    Asm,
}

#[derive(Parser)]
#[command(name = "aotir", bin_name = "aotir")]
#[command(about = "Encode programs into the ahead-of-time IR stream")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Encode a JSON program
    #[command(after_help = r#"EXAMPLES:
  aotir encode program.json -o program.aotir
  aotir encode program.json --emit asm -o program.s
  aotir encode program.json --word-size 4 > program.aotir"#)]
    Encode {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if omitted)
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output form
        #[arg(long, value_enum, default_value_t = Emit::Raw)]
        emit: Emit,
    },

    /// Print what encoding a JSON program produces
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// Program document (JSON), or `-` for stdin
    #[arg(value_name = "PROGRAM")]
    pub program: PathBuf,

    /// Width of size fields and pointers in bytes (4 or 8)
    #[arg(long, value_name = "N", default_value = "8", value_parser = parse_word_size)]
    pub word_size: WordSize,
}

fn parse_word_size(s: &str) -> Result<WordSize, String> {
    s.parse::<u32>()
        .ok()
        .and_then(WordSize::from_bytes)
        .ok_or_else(|| format!("word size must be 4 or 8, got `{s}`"))
}
