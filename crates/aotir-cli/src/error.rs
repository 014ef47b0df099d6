use std::path::PathBuf;

use aotir_core::ProgramError;
use aotir_encoder::EncodeError;

/// Anything that stops a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("invalid program: {0}")]
    Program(#[from] ProgramError),

    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),
}
