use std::fmt::Write as _;
use std::path::PathBuf;

use aotir_encoder::{EncodedModule, EncoderConfig, serialise};
use aotir_format::WordSize;

use super::program_loader::load_program;
use crate::error::CliError;

pub struct StatsArgs {
    pub program: PathBuf,
    pub word_size: WordSize,
}

pub fn run(args: StatsArgs) {
    match execute(&args) {
        Ok(report) => print!("{report}"),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn execute(args: &StatsArgs) -> Result<String, CliError> {
    let program = load_program(&args.program)?;
    let config = EncoderConfig::new().with_word_size(args.word_size);
    let module = serialise(&program, &config)?;
    Ok(report(&module))
}

/// One `name: value` line per counter.
pub fn report(module: &EncodedModule) -> String {
    let s = &module.stats;
    let rows = [
        ("bytes", module.bytes.len()),
        ("word size", module.word_size.bytes() as usize),
        ("functions", s.functions),
        ("declarations", s.declarations),
        ("blocks", s.blocks),
        ("instructions", s.instructions),
        ("skipped", s.skipped_instructions),
        ("types", s.types),
        ("constants", s.constants),
        ("globals", s.globals),
        ("unimplemented instructions", s.unimplemented_instructions),
        ("unimplemented operands", s.unimplemented_operands),
        ("unimplemented constants", s.unimplemented_constants),
        ("unimplemented types", s.unimplemented_types),
    ];
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (name, value) in rows {
        writeln!(out, "{:width$}  {value}", format!("{name}:"), width = width + 1).unwrap();
    }
    out
}
