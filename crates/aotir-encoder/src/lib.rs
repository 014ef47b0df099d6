//! Single-pass encoder from a [`Program`](aotir_core::Program) to the
//! ahead-of-time IR stream.
//!
//! This crate contains:
//! - The encoding driver and its context ([`Encoder`], [`serialise`])
//! - Deduplicating symbol tables for types, constants and globals
//! - Per-function value locations and cross-model position tables
//! - Operand, instruction and section encoders
//! - The stream writer

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod encoder;
pub mod error;
pub mod index;
pub mod instruction;
mod operand;
pub mod structure;
pub mod tables;
pub mod value_map;
pub mod writer;

#[cfg(test)]
mod tables_tests;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod writer_tests;

pub use config::EncoderConfig;
pub use encoder::{EncodeStats, EncodedModule, Encoder, TRACE_TARGET, serialise};
pub use error::EncodeError;
pub use index::{BlockIndex, FunctionIndex};
pub use instruction::{binop_opcode, wire_predicate};
pub use structure::ConstantEncoding;
pub use tables::{ConstantTable, GlobalTable, Table, TypeTable};
pub use value_map::{InstrLoc, ValueLocationMap};
pub use writer::StreamWriter;
