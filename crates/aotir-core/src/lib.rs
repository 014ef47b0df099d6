//! Source program model for the AOT IR encoder.
//!
//! A [`Program`] owns every entity in arenas and hands out opaque, `Copy`
//! handles ([`TypeId`], [`FuncId`], [`BlockId`], ...). Handles are assigned at
//! creation and never reused, so the encoder can map them to binary positions
//! through explicit tables instead of relying on two traversals agreeing.
//!
//! - `types` - structural type interner, named structs
//! - `constant` - structural constant interner
//! - `inst` - instruction kinds, binary operators, comparison predicates
//! - `layout` - sizes, alignments and struct field offsets
//! - `printer` - textual rendering used for unimplemented snapshots
//! - `json` - loading programs from JSON documents

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod constant;
pub mod error;
pub mod ids;
pub mod inst;
pub mod json;
pub mod layout;
pub mod printer;
pub mod program;
pub mod types;
pub mod value;

#[cfg(test)]
mod types_tests;

pub use constant::{ConstantData, Constants};
pub use error::ProgramError;
pub use ids::{ArgId, BlockId, ConstId, FuncId, GlobalId, InstId, TypeId};
pub use inst::{BinOp, CmpPredicate, FloatPredicate, InstData, InstKind};
pub use layout::{DataLayout, StructLayout};
pub use program::{ArgData, BlockData, FunctionData, GlobalData, Program};
pub use types::{FloatKind, StructType, TypeData, Types};
pub use value::Value;
