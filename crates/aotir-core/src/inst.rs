//! Instructions.

use crate::ids::{BlockId, TypeId};
use crate::value::Value;

/// Two-operand arithmetic and bitwise operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Or,
    And,
    Xor,
    Shl,
    AShr,
    LShr,
    SDiv,
    SRem,
    UDiv,
    URem,
    FAdd,
    FSub,
    FMul,
    FDiv,
    FRem,
}

impl BinOp {
    pub const ALL: [BinOp; 18] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Or,
        Self::And,
        Self::Xor,
        Self::Shl,
        Self::AShr,
        Self::LShr,
        Self::SDiv,
        Self::SRem,
        Self::UDiv,
        Self::URem,
        Self::FAdd,
        Self::FSub,
        Self::FMul,
        Self::FDiv,
        Self::FRem,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Or => "or",
            Self::And => "and",
            Self::Xor => "xor",
            Self::Shl => "shl",
            Self::AShr => "ashr",
            Self::LShr => "lshr",
            Self::SDiv => "sdiv",
            Self::SRem => "srem",
            Self::UDiv => "udiv",
            Self::URem => "urem",
            Self::FAdd => "fadd",
            Self::FSub => "fsub",
            Self::FMul => "fmul",
            Self::FDiv => "fdiv",
            Self::FRem => "frem",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

/// Float comparison predicates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FloatPredicate {
    False,
    Oeq,
    Ogt,
    Oge,
    Olt,
    Ole,
    One,
    Ord,
    Uno,
    Ueq,
    Ugt,
    Uge,
    Ult,
    Ule,
    Une,
    True,
}

impl FloatPredicate {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::False => "false",
            Self::Oeq => "oeq",
            Self::Ogt => "ogt",
            Self::Oge => "oge",
            Self::Olt => "olt",
            Self::Ole => "ole",
            Self::One => "one",
            Self::Ord => "ord",
            Self::Uno => "uno",
            Self::Ueq => "ueq",
            Self::Ugt => "ugt",
            Self::Uge => "uge",
            Self::Ult => "ult",
            Self::Ule => "ule",
            Self::Une => "une",
            Self::True => "true",
        }
    }
}

/// Comparison predicate held by a comparison instruction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CmpPredicate {
    Eq,
    Ne,
    Ugt,
    Uge,
    Ult,
    Ule,
    Sgt,
    Sge,
    Slt,
    Sle,
    Float(FloatPredicate),
}

impl CmpPredicate {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Ugt => "ugt",
            Self::Uge => "uge",
            Self::Ult => "ult",
            Self::Ule => "ule",
            Self::Sgt => "sgt",
            Self::Sge => "sge",
            Self::Slt => "slt",
            Self::Sle => "sle",
            Self::Float(p) => p.as_str(),
        }
    }

    /// Parse a predicate name. Integer names win where they overlap with
    /// unordered float names (`ugt`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let pred = match name {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "ugt" => Self::Ugt,
            "uge" => Self::Uge,
            "ult" => Self::Ult,
            "ule" => Self::Ule,
            "sgt" => Self::Sgt,
            "sge" => Self::Sge,
            "slt" => Self::Slt,
            "sle" => Self::Sle,
            "false" => Self::Float(FloatPredicate::False),
            "oeq" => Self::Float(FloatPredicate::Oeq),
            "ogt" => Self::Float(FloatPredicate::Ogt),
            "oge" => Self::Float(FloatPredicate::Oge),
            "olt" => Self::Float(FloatPredicate::Olt),
            "ole" => Self::Float(FloatPredicate::Ole),
            "one" => Self::Float(FloatPredicate::One),
            "ord" => Self::Float(FloatPredicate::Ord),
            "uno" => Self::Float(FloatPredicate::Uno),
            "ueq" => Self::Float(FloatPredicate::Ueq),
            "une" => Self::Float(FloatPredicate::Une),
            "true" => Self::Float(FloatPredicate::True),
            _ => return None,
        };
        Some(pred)
    }
}

/// What an instruction does.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum InstKind {
    /// `[ptr]`
    Load,
    /// `[value, ptr]`
    Store,
    /// `[]` or `[value]`
    Ret,
    /// `[aggregate, value]`
    InsertValue,
    /// `[count]`
    Alloca { allocated: TypeId },
    /// `[args..., callee]`
    Call,
    /// `[target]` or `[cond, false-target, true-target]`
    Br,
    /// `[base, indices...]`
    GetElementPtr { source: TypeId },
    /// `[lhs, rhs]`
    BinOp(BinOp),
    /// `[lhs, rhs]`
    ICmp(CmpPredicate),
    /// Debug or pseudo instruction; never part of the encoded program.
    Debug(String),
    /// Any instruction without a model here, by mnemonic.
    Other(String),
}

impl InstKind {
    pub fn is_debug_or_pseudo(&self) -> bool {
        matches!(self, Self::Debug(_))
    }

    pub fn mnemonic(&self) -> &str {
        match self {
            Self::Load => "load",
            Self::Store => "store",
            Self::Ret => "ret",
            Self::InsertValue => "insertvalue",
            Self::Alloca { .. } => "alloca",
            Self::Call => "call",
            Self::Br => "br",
            Self::GetElementPtr { .. } => "getelementptr",
            Self::BinOp(op) => op.as_str(),
            Self::ICmp(_) => "icmp",
            Self::Debug(name) | Self::Other(name) => name,
        }
    }

    /// Parse a mnemonic. Names starting with `dbg.` or `pseudo.` are debug
    /// instructions; unknown names become [`InstKind::Other`].
    ///
    /// Kinds with attributes (`alloca`, `getelementptr`, `icmp`) are built by
    /// the caller.
    pub fn from_mnemonic(name: &str) -> Self {
        match name {
            "load" => Self::Load,
            "store" => Self::Store,
            "ret" => Self::Ret,
            "insertvalue" => Self::InsertValue,
            "call" => Self::Call,
            "br" => Self::Br,
            _ if name.starts_with("dbg.") || name.starts_with("pseudo.") => {
                Self::Debug(name.to_owned())
            }
            _ => match BinOp::from_name(name) {
                Some(op) => Self::BinOp(op),
                None => Self::Other(name.to_owned()),
            },
        }
    }
}

/// An instruction.
#[derive(Clone, Debug)]
pub struct InstData {
    pub kind: InstKind,
    /// Result type; void when no value is produced.
    pub ty: TypeId,
    pub operands: Vec<Value>,
    pub name: Option<String>,
    /// Owning block.
    pub block: BlockId,
}

impl InstData {
    /// Whether this is a branch with a condition.
    pub fn is_conditional_branch(&self) -> bool {
        matches!(self.kind, InstKind::Br) && self.operands.len() == 3
    }

    /// Branch successor `i`. For a conditional branch, successor 0 is the
    /// true target and successor 1 the false target.
    pub fn successor(&self, i: usize) -> Option<&Value> {
        if !matches!(self.kind, InstKind::Br) {
            return None;
        }
        if self.is_conditional_branch() {
            match i {
                0 => self.operands.get(2),
                1 => self.operands.get(1),
                _ => None,
            }
        } else if i == 0 {
            self.operands.first()
        } else {
            None
        }
    }

    /// Branch condition, if conditional.
    pub fn condition(&self) -> Option<&Value> {
        if self.is_conditional_branch() {
            self.operands.first()
        } else {
            None
        }
    }

    /// Callee of a call (last operand).
    pub fn callee(&self) -> Option<&Value> {
        match self.kind {
            InstKind::Call => self.operands.last(),
            _ => None,
        }
    }
}
