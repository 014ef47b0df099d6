//! GNU assembler output.
//!
//! The stream goes into its own section, delimited by global start and stop
//! labels so a runtime can slice it out of the loaded image. A second table
//! holds the address of every global, in the order the stream indexes them,
//! followed by its length.

use std::fmt::Write as _;

use aotir_encoder::EncodedModule;
use aotir_format::{
    GLOBAL_LEN_SYMBOL, GLOBAL_PTRS_SYMBOL, SECTION_NAME, START_SYMBOL, STOP_SYMBOL, WordSize,
};

const BYTES_PER_LINE: usize = 16;

/// Render `module` as assembler source.
pub fn render(module: &EncodedModule) -> String {
    let mut out = String::new();

    writeln!(out, "\t.section\t{SECTION_NAME},\"a\",@progbits").unwrap();
    writeln!(out, "\t.globl\t{START_SYMBOL}").unwrap();
    writeln!(out, "{START_SYMBOL}:").unwrap();
    for chunk in module.bytes.chunks(BYTES_PER_LINE) {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("0x{b:02x}")).collect();
        writeln!(out, "\t.byte\t{}", bytes.join(",")).unwrap();
    }
    writeln!(out, "\t.globl\t{STOP_SYMBOL}").unwrap();
    writeln!(out, "{STOP_SYMBOL}:").unwrap();

    let (directive, align) = match module.word_size {
        WordSize::Four => (".long", 2),
        WordSize::Eight => (".quad", 3),
    };
    out.push('\n');
    writeln!(out, "\t.section\t.data.rel.ro,\"aw\",@progbits").unwrap();
    writeln!(out, "\t.globl\t{GLOBAL_PTRS_SYMBOL}").unwrap();
    writeln!(out, "\t.p2align\t{align}").unwrap();
    writeln!(out, "{GLOBAL_PTRS_SYMBOL}:").unwrap();
    for name in &module.globals {
        writeln!(out, "\t{directive}\t{}", symbol(name)).unwrap();
    }
    writeln!(out, "\t.globl\t{GLOBAL_LEN_SYMBOL}").unwrap();
    writeln!(out, "\t.p2align\t3").unwrap();
    writeln!(out, "{GLOBAL_LEN_SYMBOL}:").unwrap();
    writeln!(out, "\t.quad\t{}", module.globals.len()).unwrap();

    out
}

/// Quote names the assembler would not read as a single symbol.
fn symbol(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$'));
    if plain {
        name.to_owned()
    } else {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
