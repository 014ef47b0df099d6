use std::fs;
use std::io::{self, Read};
use std::path::Path;

use aotir_core::Program;

use crate::error::CliError;

/// Read a program document from `path`, or from stdin when `path` is `-`.
pub fn load_program(path: &Path) -> Result<Program, CliError> {
    let read_err = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };

    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        fs::read_to_string(path).map_err(read_err)?
    };

    Ok(Program::from_json(&text)?)
}
