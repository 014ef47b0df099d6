use std::path::PathBuf;

use aotir_format::WordSize;
use clap::Parser;

use crate::cli::{Cli, Command, Emit};

#[test]
fn encode_defaults() {
    let cli = Cli::try_parse_from(["aotir", "encode", "prog.json"]).unwrap();

    let Command::Encode {
        input,
        output,
        emit,
    } = cli.command
    else {
        panic!("expected encode");
    };
    assert_eq!(input.program, PathBuf::from("prog.json"));
    assert_eq!(input.word_size, WordSize::Eight);
    assert_eq!(output, None);
    assert_eq!(emit, Emit::Raw);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn encode_all_flags() {
    let cli = Cli::try_parse_from([
        "aotir",
        "encode",
        "prog.json",
        "-o",
        "out.s",
        "--emit",
        "asm",
        "--word-size",
        "4",
        "-vv",
    ])
    .unwrap();

    let Command::Encode {
        input,
        output,
        emit,
    } = cli.command
    else {
        panic!("expected encode");
    };
    assert_eq!(input.word_size, WordSize::Four);
    assert_eq!(output, Some(PathBuf::from("out.s")));
    assert_eq!(emit, Emit::Asm);
    assert_eq!(cli.verbose, 2);
}

#[test]
fn stats_reads_stdin_marker() {
    let cli = Cli::try_parse_from(["aotir", "stats", "-"]).unwrap();

    let Command::Stats { input } = cli.command else {
        panic!("expected stats");
    };
    assert_eq!(input.program, PathBuf::from("-"));
}

#[test]
fn word_size_must_be_four_or_eight() {
    let err = Cli::try_parse_from(["aotir", "encode", "p.json", "--word-size", "2"])
        .err()
        .unwrap();

    assert!(err.to_string().contains("word size must be 4 or 8, got `2`"));
}

#[test]
fn program_is_required() {
    assert!(Cli::try_parse_from(["aotir", "encode"]).is_err());
}
