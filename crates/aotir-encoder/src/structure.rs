//! Constant, global and type sections.
//!
//! These run after every function has been encoded, in the order the stream
//! lays them out. Writing constants registers their types; writing globals and
//! types registers nothing new.

use aotir_core::printer::constant_data_to_string;
use aotir_core::{ConstantData, Program, TypeData, TypeId};
use aotir_format::TypeKind;
use tracing::trace;

use crate::encoder::{Encoder, TRACE_TARGET};
use crate::EncodeError;

/// How a constant is represented in the stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstantEncoding {
    /// Integer value, one byte per 8 bits of width, low byte first.
    Int { ty: TypeId, bytes: Vec<u8> },
    /// Any other constant. Only the type survives; the payload is empty.
    Unimplemented { ty: TypeId },
}

impl ConstantEncoding {
    pub fn classify(program: &Program, data: &ConstantData) -> Self {
        if let ConstantData::Int { ty, bits } = data {
            if let TypeData::Int { bits: width } = program.type_data(*ty) {
                let bytes = (0..width.div_ceil(8))
                    .map(|i| bits.checked_shr(8 * i).unwrap_or(0) as u8)
                    .collect();
                return Self::Int { ty: *ty, bytes };
            }
        }
        Self::Unimplemented { ty: data.ty() }
    }

    pub fn ty(&self) -> TypeId {
        match self {
            Self::Int { ty, .. } | Self::Unimplemented { ty } => *ty,
        }
    }

    pub fn payload(&self) -> &[u8] {
        match self {
            Self::Int { bytes, .. } => bytes,
            Self::Unimplemented { .. } => &[],
        }
    }

    /// Whether the value cannot be rebuilt from the stream.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }
}

impl Encoder<'_> {
    pub(crate) fn write_constants(&mut self) -> Result<(), EncodeError> {
        let program = self.program;
        self.out.write_index(self.constants.len())?;

        for data in self.constants.iter() {
            let encoding = ConstantEncoding::classify(program, data);
            if encoding.is_lossy() {
                trace!(
                    target: TRACE_TARGET,
                    constant = %constant_data_to_string(program, data),
                    "unimplemented constant"
                );
                self.stats.unimplemented_constants += 1;
            }

            let ty = self.types.register(program.types(), encoding.ty());
            self.out.write_index(ty)?;
            let payload = encoding.payload();
            self.out.write_index(payload.len())?;
            self.out.write_bytes(payload);
        }
        Ok(())
    }

    /// Returns the global names in table order.
    pub(crate) fn write_globals(&mut self) -> Result<Vec<String>, EncodeError> {
        let program = self.program;
        self.out.write_index(self.globals.len())?;

        let mut names = Vec::with_capacity(self.globals.len());
        for &global in self.globals.iter() {
            let data = program.global(global);
            self.out.write_u8(u8::from(data.thread_local));
            self.out.write_cstr(&data.name)?;
            names.push(data.name.clone());
        }
        Ok(names)
    }

    pub(crate) fn write_types(&mut self) -> Result<(), EncodeError> {
        let order: Vec<TypeId> = self.types.iter().copied().collect();
        self.out.write_index(order.len())?;
        for ty in order {
            self.write_type(ty)?;
        }
        Ok(())
    }

    fn write_type(&mut self, ty: TypeId) -> Result<(), EncodeError> {
        let program = self.program;
        let types = program.types();

        match types.get(ty) {
            TypeData::Void => self.out.write_u8(TypeKind::Void.as_u8()),
            TypeData::Int { bits } => {
                self.out.write_u8(TypeKind::Integer.as_u8());
                self.out.write_u32(*bits);
            }
            TypeData::Ptr { addr_space } => {
                let bytes = program.layout.pointer_size(*addr_space);
                let word = self.out.word_size().bytes();
                if bytes != word {
                    return Err(EncodeError::PointerSizeMismatch {
                        ty: self.type_text(ty),
                        bytes,
                        word,
                    });
                }
                self.out.write_u8(TypeKind::Ptr.as_u8());
            }
            TypeData::Func {
                params,
                ret,
                vararg,
            } => {
                self.out.write_u8(TypeKind::Function.as_u8());
                self.out.write_index(params.len())?;
                for &param in params {
                    let index = self.types.register(types, param);
                    self.out.write_index(index)?;
                }
                let ret = self.types.register(types, *ret);
                self.out.write_index(ret)?;
                self.out.write_u8(u8::from(*vararg));
            }
            TypeData::Struct(s) => {
                let Some(layout) = program.layout.struct_layout(types, ty) else {
                    return self.write_unimplemented_type(ty);
                };
                self.out.write_u8(TypeKind::Struct.as_u8());
                self.out.write_index(s.fields.len())?;
                for &field in &s.fields {
                    let index = self.types.register(types, field);
                    self.out.write_index(index)?;
                }
                for (i, &offset) in layout.field_offsets.iter().enumerate() {
                    let bits = layout.field_offset_bits(i).ok_or(EncodeError::SizeOverflow {
                        value: offset,
                        word: self.out.word_size().bytes(),
                    })?;
                    self.out.write_size(bits)?;
                }
            }
            TypeData::Array { .. } | TypeData::Float(_) => self.write_unimplemented_type(ty)?,
        }
        Ok(())
    }

    fn write_unimplemented_type(&mut self, ty: TypeId) -> Result<(), EncodeError> {
        let text = self.type_text(ty);
        trace!(target: TRACE_TARGET, ty = %text, "unimplemented type");
        self.stats.unimplemented_types += 1;
        self.out.write_u8(TypeKind::Unimplemented.as_u8());
        self.out.write_cstr(&text)
    }
}
