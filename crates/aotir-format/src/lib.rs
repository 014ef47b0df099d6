//! Wire-format vocabulary for the ahead-of-time IR stream.
//!
//! This crate contains:
//! - Stream identity (magic, version) and the header codec
//! - Closed tag sets: opcodes, operand kinds, type kinds, comparison predicates
//! - The word size used for every `size` field
//! - Symbol and section names used when embedding the stream in an object file

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod constants;
pub mod header;
pub mod kinds;
pub mod opcode;
pub mod predicate;
pub mod word;

#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod kinds_tests;

pub use constants::{
    GLOBAL_LEN_SYMBOL, GLOBAL_PTRS_SYMBOL, MAGIC, SECTION_NAME, START_SYMBOL, STOP_SYMBOL,
    VERSION,
};
pub use header::{HEADER_SIZE, Header, HeaderError};
pub use kinds::{OperandKind, TypeKind};
pub use opcode::Opcode;
pub use predicate::Predicate;
pub use word::WordSize;
