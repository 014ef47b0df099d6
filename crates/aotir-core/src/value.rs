//! Instruction operands.

use crate::ids::{ArgId, BlockId, ConstId, InstId};

/// Something an instruction can use.
///
/// Globals and functions are reached through [`Value::Const`] holding a
/// [`crate::ConstantData::Global`] or [`crate::ConstantData::Function`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Value {
    Const(ConstId),
    Arg(ArgId),
    /// Result of another instruction.
    Inst(InstId),
    Block(BlockId),
    /// A value with no model here (metadata, inline asm, ...), kept as text.
    Opaque(String),
}
