//! Errors raised while encoding.
//!
//! Every variant is an internal-consistency violation: the input program is
//! malformed or the encoder has a bug. Encoding stops at the first one, and no
//! partial stream is returned.

/// Fatal error during encoding.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// An operand uses a value that has no location in the function being
    /// encoded: it was never defined, is defined later, or belongs to another
    /// function.
    #[error("in `{func}`: operand `{value}` refers to a value with no location")]
    UndefinedValue { func: String, value: String },

    #[error("in `{func}`: allocation count is not an integer constant: `{inst}`")]
    NonConstantAllocaCount { func: String, inst: String },

    #[error("in `{func}`: block {block} promised {expected} instructions but emitted {emitted}")]
    InstructionCountMismatch {
        func: String,
        block: usize,
        expected: usize,
        emitted: usize,
    },

    #[error("pointer type `{ty}` is {bytes} bytes wide, the stream only holds {word}-byte pointers")]
    PointerSizeMismatch { ty: String, bytes: u32, word: u32 },

    #[error("in `{func}`: comparison predicate `{pred}` is not supported: `{inst}`")]
    UnsupportedPredicate {
        func: String,
        pred: String,
        inst: String,
    },

    #[error("in `{func}`: pointer offset index is not an integer constant: `{inst}`")]
    NonConstantOffset { func: String, inst: String },

    #[error("in `{func}`: pointer offset index {index} does not address `{ty}`: `{inst}`")]
    InvalidOffsetIndex {
        func: String,
        index: usize,
        ty: String,
        inst: String,
    },

    #[error("function `{0}` has no binary index")]
    UnknownFunction(String),

    #[error("in `{func}`: block `{block}` does not belong to this function")]
    UnknownBlock { func: String, block: String },

    #[error("string {0:?} contains a NUL byte")]
    InteriorNul(String),

    #[error("value {value} does not fit in a {word}-byte size field")]
    SizeOverflow { value: u64, word: u32 },
}
