//! Operand and type tag sets.

/// Tag byte that prefixes every operand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum OperandKind {
    /// Payload: constants-table index (`size`).
    Constant = 0,
    /// Payload: block index, instruction index (`size`, `size`).
    LocalVariable = 1,
    /// Payload: types-table index (`size`).
    Type = 2,
    /// Payload: function index (`size`).
    Function = 3,
    /// Payload: block index within the owning function (`size`).
    Block = 4,
    /// Payload: argument number (`size`).
    Arg = 5,
    /// Payload: globals-table index (`size`).
    Global = 6,
    /// Payload: one predicate byte.
    Predicate = 7,
    /// Payload: null-terminated textual snapshot.
    Unimplemented = 255,
}

impl OperandKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Constant),
            1 => Some(Self::LocalVariable),
            2 => Some(Self::Type),
            3 => Some(Self::Function),
            4 => Some(Self::Block),
            5 => Some(Self::Arg),
            6 => Some(Self::Global),
            7 => Some(Self::Predicate),
            255 => Some(Self::Unimplemented),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::LocalVariable => "local",
            Self::Type => "type",
            Self::Function => "function",
            Self::Block => "block",
            Self::Arg => "arg",
            Self::Global => "global",
            Self::Predicate => "predicate",
            Self::Unimplemented => "unimplemented",
        }
    }
}

/// Tag byte that begins every type record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum TypeKind {
    Void = 0,
    /// Followed by the bit width as `u32`.
    Integer = 1,
    /// Always machine-word sized.
    Ptr = 2,
    /// Param count, param type indices, return type index, vararg byte.
    Function = 3,
    /// Field count, field type indices, field bit offsets.
    Struct = 4,
    /// Followed by a null-terminated textual snapshot.
    Unimplemented = 255,
}

impl TypeKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Void),
            1 => Some(Self::Integer),
            2 => Some(Self::Ptr),
            3 => Some(Self::Function),
            4 => Some(Self::Struct),
            255 => Some(Self::Unimplemented),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether records of this kind reference other types by index.
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::Function | Self::Struct)
    }
}
