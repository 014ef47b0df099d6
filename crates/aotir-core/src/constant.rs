//! Constant interning.

use std::collections::HashMap;

use crate::ids::{ConstId, FuncId, GlobalId, TypeId};

/// Shape of a constant. Two equal shapes are the same constant.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ConstantData {
    /// Integer; `bits` holds the value truncated to the type's width.
    Int { ty: TypeId, bits: u128 },
    /// Floating-point; `bits` holds the IEEE representation.
    Float { ty: TypeId, bits: u64 },
    Null { ty: TypeId },
    Undef { ty: TypeId },
    Aggregate { ty: TypeId, elems: Vec<ConstId> },
    /// Address of a global variable.
    Global(GlobalId),
    /// Address of a function.
    Function(FuncId),
}

impl ConstantData {
    /// Type of the constant. Addresses are pointers in address space 0.
    pub fn ty(&self) -> TypeId {
        match self {
            Self::Int { ty, .. }
            | Self::Float { ty, .. }
            | Self::Null { ty }
            | Self::Undef { ty }
            | Self::Aggregate { ty, .. } => *ty,
            Self::Global(_) | Self::Function(_) => TypeId::PTR,
        }
    }

    /// Raw integer bits, if this is an integer constant.
    pub fn as_int(&self) -> Option<u128> {
        match self {
            Self::Int { bits, .. } => Some(*bits),
            _ => None,
        }
    }
}

/// Truncate `value` to its low `width` bits.
pub fn truncate(value: u128, width: u32) -> u128 {
    if width >= 128 {
        value
    } else {
        value & ((1u128 << width) - 1)
    }
}

/// Interpret the low `width` bits of `bits` as a two's complement number.
pub fn sign_extend(bits: u128, width: u32) -> i128 {
    if width == 0 || width >= 128 {
        return bits as i128;
    }
    let shift = 128 - width;
    ((bits << shift) as i128) >> shift
}

/// Constant arena. Deduplicates constants and returns cheap [`ConstId`] handles.
#[derive(Debug, Clone, Default)]
pub struct Constants {
    /// Map from shape to id for deduplication.
    map: HashMap<ConstantData, ConstId>,
    /// Storage, indexed by ConstId.
    data: Vec<ConstantData>,
}

impl Constants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a constant, returning its ConstId.
    pub fn intern(&mut self, data: ConstantData) -> ConstId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }

        let id = ConstId::new(self.data.len());
        self.data.push(data.clone());
        self.map.insert(data, id);
        id
    }

    /// # Panics
    /// Panics if the id was not created by this arena.
    #[inline]
    pub fn get(&self, id: ConstId) -> &ConstantData {
        &self.data[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
