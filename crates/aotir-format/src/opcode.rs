//! Instruction opcodes.

/// Opcode byte of an instruction record.
///
/// `Br` and `CondBr` are distinct: unconditional branches carry no operands,
/// conditional ones carry `(condition, true-target, false-target)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    Nop = 0,
    Load = 1,
    Store = 2,
    Alloca = 3,
    Call = 4,
    Br = 5,
    CondBr = 6,
    ICmp = 7,
    BinaryOperator = 8,
    Ret = 9,
    InsertValue = 10,
    PtrAdd = 11,
    Add = 12,
    Sub = 13,
    Mul = 14,
    Or = 15,
    And = 16,
    Xor = 17,
    Shl = 18,
    AShr = 19,
    FAdd = 20,
    FDiv = 21,
    FMul = 22,
    FRem = 23,
    FSub = 24,
    LShr = 25,
    SDiv = 26,
    SRem = 27,
    UDiv = 28,
    URem = 29,
    /// Escape marker: one operand holding the textual form of the instruction.
    Unimplemented = 255,
}

impl Opcode {
    /// Every opcode, in discriminant order.
    pub const ALL: [Opcode; 31] = [
        Self::Nop,
        Self::Load,
        Self::Store,
        Self::Alloca,
        Self::Call,
        Self::Br,
        Self::CondBr,
        Self::ICmp,
        Self::BinaryOperator,
        Self::Ret,
        Self::InsertValue,
        Self::PtrAdd,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Or,
        Self::And,
        Self::Xor,
        Self::Shl,
        Self::AShr,
        Self::FAdd,
        Self::FDiv,
        Self::FMul,
        Self::FRem,
        Self::FSub,
        Self::LShr,
        Self::SDiv,
        Self::SRem,
        Self::UDiv,
        Self::URem,
        Self::Unimplemented,
    ];

    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0..=29 => Some(Self::ALL[v as usize]),
            255 => Some(Self::Unimplemented),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Mnemonic used in listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nop => "nop",
            Self::Load => "load",
            Self::Store => "store",
            Self::Alloca => "alloca",
            Self::Call => "call",
            Self::Br => "br",
            Self::CondBr => "condbr",
            Self::ICmp => "icmp",
            Self::BinaryOperator => "binop",
            Self::Ret => "ret",
            Self::InsertValue => "insertvalue",
            Self::PtrAdd => "ptradd",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Or => "or",
            Self::And => "and",
            Self::Xor => "xor",
            Self::Shl => "shl",
            Self::AShr => "ashr",
            Self::FAdd => "fadd",
            Self::FDiv => "fdiv",
            Self::FMul => "fmul",
            Self::FRem => "frem",
            Self::FSub => "fsub",
            Self::LShr => "lshr",
            Self::SDiv => "sdiv",
            Self::SRem => "srem",
            Self::UDiv => "udiv",
            Self::URem => "urem",
            Self::Unimplemented => "unimplemented",
        }
    }

    /// Whether this opcode is one of the dedicated binary-operator opcodes.
    pub fn is_binary_operator(self) -> bool {
        (Self::Add.as_u8()..=Self::URem.as_u8()).contains(&self.as_u8())
    }
}
