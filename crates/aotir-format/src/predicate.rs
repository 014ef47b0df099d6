//! Comparison predicates for bytecode.
//!
//! The encoder writes these as the payload of a `Predicate` operand.

/// Integer comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// unsigned `>`
    UnsignedGreater,
    /// unsigned `>=`
    UnsignedGreaterEqual,
    /// unsigned `<`
    UnsignedLess,
    /// unsigned `<=`
    UnsignedLessEqual,
    /// signed `>`
    SignedGreater,
    /// signed `>=`
    SignedGreaterEqual,
    /// signed `<`
    SignedLess,
    /// signed `<=`
    SignedLessEqual,
}

impl Predicate {
    /// Decode from bytecode representation.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Equal),
            1 => Some(Self::NotEqual),
            2 => Some(Self::UnsignedGreater),
            3 => Some(Self::UnsignedGreaterEqual),
            4 => Some(Self::UnsignedLess),
            5 => Some(Self::UnsignedLessEqual),
            6 => Some(Self::SignedGreater),
            7 => Some(Self::SignedGreaterEqual),
            8 => Some(Self::SignedLess),
            9 => Some(Self::SignedLessEqual),
            _ => None,
        }
    }

    /// Encode for bytecode.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Equal => 0,
            Self::NotEqual => 1,
            Self::UnsignedGreater => 2,
            Self::UnsignedGreaterEqual => 3,
            Self::UnsignedLess => 4,
            Self::UnsignedLessEqual => 5,
            Self::SignedGreater => 6,
            Self::SignedGreaterEqual => 7,
            Self::SignedLess => 8,
            Self::SignedLessEqual => 9,
        }
    }

    /// Predicate as display string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::UnsignedGreater => "ugt",
            Self::UnsignedGreaterEqual => "uge",
            Self::UnsignedLess => "ult",
            Self::UnsignedLessEqual => "ule",
            Self::SignedGreater => "sgt",
            Self::SignedGreaterEqual => "sge",
            Self::SignedLess => "slt",
            Self::SignedLessEqual => "sle",
        }
    }

    /// Whether the comparison interprets its operands as signed.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Self::SignedGreater | Self::SignedGreaterEqual | Self::SignedLess | Self::SignedLessEqual
        )
    }
}
