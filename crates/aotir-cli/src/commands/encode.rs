use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use aotir_encoder::{EncoderConfig, serialise};
use aotir_format::WordSize;
use tracing::debug;

use super::program_loader::load_program;
use crate::asm;
use crate::cli::Emit;
use crate::error::CliError;

pub struct EncodeArgs {
    pub program: PathBuf,
    pub output: Option<PathBuf>,
    pub word_size: WordSize,
    pub emit: Emit,
}

pub fn run(args: EncodeArgs) {
    if let Err(e) = execute(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

pub fn execute(args: &EncodeArgs) -> Result<(), CliError> {
    let program = load_program(&args.program)?;
    let config = EncoderConfig::new().with_word_size(args.word_size);
    let module = serialise(&program, &config)?;

    let bytes = match args.emit {
        Emit::Raw => module.bytes,
        Emit::Asm => asm::render(&module).into_bytes(),
    };
    debug!(
        emit = ?args.emit,
        bytes = bytes.len(),
        unimplemented = module.stats.unimplemented_instructions,
        "encoded"
    );

    match &args.output {
        Some(path) => fs::write(path, &bytes).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|()| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}
