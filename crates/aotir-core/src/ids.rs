//! Arena handles.

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub(crate) fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Position in the owning arena.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Raw value for serialization/debugging.
            #[inline]
            pub fn as_u32(self) -> u32 {
                self.0
            }

            /// Create a handle from a raw index. Use only for deserialization.
            #[inline]
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }
        }
    };
}

arena_id!(
    /// Handle to an interned type.
    TypeId
);
arena_id!(
    /// Handle to an interned constant.
    ConstId
);
arena_id!(
    /// Handle to a global variable.
    GlobalId
);
arena_id!(
    /// Handle to a function.
    FuncId
);
arena_id!(
    /// Handle to a basic block.
    BlockId
);
arena_id!(
    /// Handle to an instruction.
    InstId
);
arena_id!(
    /// Handle to a formal argument.
    ArgId
);

/// Types pre-interned by every [`crate::Types`] arena, in this order.
impl TypeId {
    pub const VOID: Self = Self(0);
    pub const I1: Self = Self(1);
    pub const I8: Self = Self(2);
    pub const I32: Self = Self(3);
    pub const I64: Self = Self(4);
    /// Pointer in address space 0.
    pub const PTR: Self = Self(5);
}
