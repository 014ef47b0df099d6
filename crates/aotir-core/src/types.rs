//! Type interning.
//!
//! Literal types are deduplicated by shape: interning the same [`TypeData`]
//! twice returns the same [`TypeId`]. Named structs are identified by name and
//! get their body in a second step, so bodies can refer to structs declared
//! later.

use std::collections::HashMap;

use crate::ProgramError;
use crate::ids::TypeId;

/// Floating-point formats.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FloatKind {
    Half,
    Float,
    Double,
    X86Fp80,
    Fp128,
}

impl FloatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Half => "half",
            Self::Float => "float",
            Self::Double => "double",
            Self::X86Fp80 => "x86_fp80",
            Self::Fp128 => "fp128",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "half" => Some(Self::Half),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "x86_fp80" => Some(Self::X86Fp80),
            "fp128" => Some(Self::Fp128),
            _ => None,
        }
    }
}

/// Struct shape, literal (`name == None`) or named.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StructType {
    pub name: Option<String>,
    pub fields: Vec<TypeId>,
    pub packed: bool,
    /// Named struct whose body has not been set.
    pub opaque: bool,
}

/// Shape of a type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeData {
    Void,
    Int { bits: u32 },
    Ptr { addr_space: u32 },
    Float(FloatKind),
    Func {
        params: Vec<TypeId>,
        ret: TypeId,
        vararg: bool,
    },
    Struct(StructType),
    Array { elem: TypeId, len: u64 },
}

impl TypeData {
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Named struct name, if any.
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            Self::Struct(s) => s.name.as_deref(),
            _ => None,
        }
    }
}

/// Type arena. Deduplicates literal types and returns cheap [`TypeId`] handles.
#[derive(Debug, Clone)]
pub struct Types {
    /// Storage, indexed by TypeId.
    data: Vec<TypeData>,
    /// Literal shape to id, for deduplication.
    literal: HashMap<TypeData, TypeId>,
    /// Named struct name to id.
    named: HashMap<String, TypeId>,
}

impl Types {
    pub fn new() -> Self {
        let mut types = Self {
            data: Vec::new(),
            literal: HashMap::new(),
            named: HashMap::new(),
        };
        // Order must match the well-known ids on TypeId.
        types.intern(TypeData::Void);
        types.intern(TypeData::Int { bits: 1 });
        types.intern(TypeData::Int { bits: 8 });
        types.intern(TypeData::Int { bits: 32 });
        types.intern(TypeData::Int { bits: 64 });
        types.intern(TypeData::Ptr { addr_space: 0 });
        types
    }

    /// Intern a type, returning its TypeId.
    ///
    /// A named struct whose name is already taken returns the existing id and
    /// ignores the given body; use [`Types::set_struct_body`] to fill bodies.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(name) = data.struct_name() {
            if let Some(&id) = self.named.get(name) {
                return id;
            }
            let id = TypeId::new(self.data.len());
            self.named.insert(name.to_owned(), id);
            self.data.push(data);
            return id;
        }

        if let Some(&id) = self.literal.get(&data) {
            return id;
        }
        let id = TypeId::new(self.data.len());
        self.literal.insert(data.clone(), id);
        self.data.push(data);
        id
    }

    pub fn int(&mut self, bits: u32) -> TypeId {
        self.intern(TypeData::Int { bits })
    }

    pub fn ptr(&mut self, addr_space: u32) -> TypeId {
        self.intern(TypeData::Ptr { addr_space })
    }

    pub fn float(&mut self, kind: FloatKind) -> TypeId {
        self.intern(TypeData::Float(kind))
    }

    pub fn func(&mut self, params: Vec<TypeId>, ret: TypeId, vararg: bool) -> TypeId {
        self.intern(TypeData::Func {
            params,
            ret,
            vararg,
        })
    }

    pub fn array(&mut self, elem: TypeId, len: u64) -> TypeId {
        self.intern(TypeData::Array { elem, len })
    }

    /// Intern a literal (unnamed) struct.
    pub fn literal_struct(&mut self, fields: Vec<TypeId>, packed: bool) -> TypeId {
        self.intern(TypeData::Struct(StructType {
            name: None,
            fields,
            packed,
            opaque: false,
        }))
    }

    /// Declare a named struct without a body, or return the existing one.
    pub fn declare_struct(&mut self, name: &str) -> TypeId {
        self.intern(TypeData::Struct(StructType {
            name: Some(name.to_owned()),
            fields: Vec::new(),
            packed: false,
            opaque: true,
        }))
    }

    /// Set the body of a named struct.
    ///
    /// Fails if `id` is not a named struct, if a field cannot live in memory
    /// (void, function), or if the struct would contain itself by value.
    pub fn set_struct_body(
        &mut self,
        id: TypeId,
        fields: Vec<TypeId>,
        packed: bool,
    ) -> Result<(), ProgramError> {
        let Some(name) = self.get(id).struct_name().map(str::to_owned) else {
            return Err(ProgramError::NotANamedStruct(format!("{id:?}")));
        };

        for &field in &fields {
            if matches!(self.get(field), TypeData::Void | TypeData::Func { .. }) {
                return Err(ProgramError::InvalidFieldType {
                    name,
                    ty: format!("{:?}", self.get(field)),
                });
            }
            if self.contains_by_value(field, id) {
                return Err(ProgramError::RecursiveStruct(name));
            }
        }

        self.data[id.index()] = TypeData::Struct(StructType {
            name: Some(name),
            fields,
            packed,
            opaque: false,
        });
        Ok(())
    }

    /// Look up a named struct.
    pub fn named(&self, name: &str) -> Option<TypeId> {
        self.named.get(name).copied()
    }

    /// Resolve a TypeId to its shape.
    ///
    /// # Panics
    /// Panics if the id was not created by this arena.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.data[id.index()]
    }

    #[inline]
    pub fn try_get(&self, id: TypeId) -> Option<&TypeData> {
        self.data.get(id.index())
    }

    #[inline]
    pub fn is_void(&self, id: TypeId) -> bool {
        self.get(id).is_void()
    }

    /// Types directly contained by `id`.
    ///
    /// Function types yield the return type first, then the parameters.
    pub fn subtypes(&self, id: TypeId) -> Vec<TypeId> {
        match self.get(id) {
            TypeData::Func { params, ret, .. } => {
                let mut out = Vec::with_capacity(params.len() + 1);
                out.push(*ret);
                out.extend_from_slice(params);
                out
            }
            TypeData::Struct(s) => s.fields.clone(),
            TypeData::Array { elem, .. } => vec![*elem],
            TypeData::Void | TypeData::Int { .. } | TypeData::Ptr { .. } | TypeData::Float(_) => {
                Vec::new()
            }
        }
    }

    /// Number of types.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeData)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, data)| (TypeId::new(i), data))
    }

    /// Whether `haystack` holds `needle` in its storage (through struct fields
    /// and array elements, not through pointers).
    fn contains_by_value(&self, haystack: TypeId, needle: TypeId) -> bool {
        if haystack == needle {
            return true;
        }
        match self.get(haystack) {
            TypeData::Struct(s) => s
                .fields
                .iter()
                .any(|&field| self.contains_by_value(field, needle)),
            TypeData::Array { elem, .. } => self.contains_by_value(*elem, needle),
            _ => false,
        }
    }
}

impl Default for Types {
    fn default() -> Self {
        Self::new()
    }
}
