//! Target data layout: sizes, alignments and struct field offsets.
//!
//! All sizes are in bytes. Queries return `None` for types that have no size
//! in memory (void, function signatures, named structs without a body).

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::ids::TypeId;
use crate::types::{FloatKind, StructType, TypeData, Types};

/// Largest natural alignment given to an integer.
const MAX_INT_ALIGN: u64 = 16;

/// Pointer widths and layout rules of the compilation target.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DataLayout {
    /// Pointer size for any address space not listed in `address_spaces`.
    #[serde(default = "default_pointer_size")]
    pub pointer_size: u32,
    /// Per-address-space pointer sizes.
    #[serde(default)]
    pub address_spaces: BTreeMap<u32, u32>,
}

fn default_pointer_size() -> u32 {
    8
}

/// Computed layout of one struct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructLayout {
    pub size: u64,
    pub align: u64,
    /// Byte offset of each field.
    pub field_offsets: Vec<u64>,
}

impl StructLayout {
    /// Bit offset of field `i`. `None` if there is no such field or the
    /// offset does not fit in 64 bits.
    pub fn field_offset_bits(&self, i: usize) -> Option<u64> {
        self.field_offsets.get(i)?.checked_mul(8)
    }
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            pointer_size: default_pointer_size(),
            address_spaces: BTreeMap::new(),
        }
    }
}

impl DataLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pointer size used by every address space without an override.
    pub fn with_default_pointer_size(mut self, bytes: u32) -> Self {
        self.pointer_size = bytes;
        self
    }

    /// Override the pointer size of one address space.
    pub fn with_pointer_size(mut self, addr_space: u32, bytes: u32) -> Self {
        self.address_spaces.insert(addr_space, bytes);
        self
    }

    pub fn pointer_size(&self, addr_space: u32) -> u32 {
        self.address_spaces
            .get(&addr_space)
            .copied()
            .unwrap_or(self.pointer_size)
    }

    /// Bytes written when storing a value of type `ty`, without tail padding.
    pub fn store_size(&self, types: &Types, ty: TypeId) -> Option<u64> {
        match types.get(ty) {
            TypeData::Int { bits } => Some(u64::from(bits.div_ceil(8))),
            TypeData::Ptr { addr_space } => Some(u64::from(self.pointer_size(*addr_space))),
            TypeData::Float(kind) => Some(float_size(*kind)),
            TypeData::Struct(_) | TypeData::Array { .. } => self.alloc_size(types, ty),
            TypeData::Void | TypeData::Func { .. } => None,
        }
    }

    /// ABI alignment of `ty`.
    pub fn abi_align(&self, types: &Types, ty: TypeId) -> Option<u64> {
        match types.get(ty) {
            TypeData::Int { bits } => {
                let bytes = u64::from(bits.div_ceil(8)).max(1);
                Some(bytes.next_power_of_two().min(MAX_INT_ALIGN))
            }
            TypeData::Ptr { addr_space } => Some(u64::from(self.pointer_size(*addr_space))),
            TypeData::Float(kind) => Some(match kind {
                FloatKind::Half => 2,
                FloatKind::Float => 4,
                FloatKind::Double => 8,
                FloatKind::X86Fp80 | FloatKind::Fp128 => 16,
            }),
            TypeData::Array { elem, .. } => self.abi_align(types, *elem),
            TypeData::Struct(s) => self.layout_struct(types, s).map(|l| l.align),
            TypeData::Void | TypeData::Func { .. } => None,
        }
    }

    /// Bytes between consecutive array elements of type `ty`.
    pub fn alloc_size(&self, types: &Types, ty: TypeId) -> Option<u64> {
        match types.get(ty) {
            TypeData::Int { .. } | TypeData::Ptr { .. } | TypeData::Float(_) => {
                let size = self.store_size(types, ty)?;
                let align = self.abi_align(types, ty)?;
                align_to(size, align)
            }
            TypeData::Array { elem, len } => self.alloc_size(types, *elem)?.checked_mul(*len),
            TypeData::Struct(s) => self.layout_struct(types, s).map(|l| l.size),
            TypeData::Void | TypeData::Func { .. } => None,
        }
    }

    /// Layout of a struct type. `None` if `ty` is not a struct or has no body.
    pub fn struct_layout(&self, types: &Types, ty: TypeId) -> Option<StructLayout> {
        match types.get(ty) {
            TypeData::Struct(s) => self.layout_struct(types, s),
            _ => None,
        }
    }

    fn layout_struct(&self, types: &Types, s: &StructType) -> Option<StructLayout> {
        if s.opaque {
            return None;
        }

        let mut offset = 0u64;
        let mut align = 1u64;
        let mut field_offsets = Vec::with_capacity(s.fields.len());
        for &field in &s.fields {
            let field_align = if s.packed {
                1
            } else {
                self.abi_align(types, field)?
            };
            offset = align_to(offset, field_align)?;
            field_offsets.push(offset);
            offset = offset.checked_add(self.alloc_size(types, field)?)?;
            align = align.max(field_align);
        }

        Some(StructLayout {
            size: align_to(offset, align)?,
            align,
            field_offsets,
        })
    }
}

fn float_size(kind: FloatKind) -> u64 {
    match kind {
        FloatKind::Half => 2,
        FloatKind::Float => 4,
        FloatKind::Double => 8,
        FloatKind::X86Fp80 => 10,
        FloatKind::Fp128 => 16,
    }
}

/// Round `value` up to a multiple of `align` (a power of two).
/// Round `value` up to a multiple of `align`. `None` on overflow.
fn align_to(value: u64, align: u64) -> Option<u64> {
    if align <= 1 {
        return Some(value);
    }
    value.div_ceil(align).checked_mul(align)
}
