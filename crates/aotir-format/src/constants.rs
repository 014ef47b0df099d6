//! Fixed identity values and embedding names.

/// Every stream begins with this value (little-endian `u32`).
pub const MAGIC: u32 = 0xedd5_f00d;

/// Stream format version.
pub const VERSION: u32 = 0;

/// Object-file section that holds the stream.
pub const SECTION_NAME: &str = ".aot_ir";

/// Global label placed at the first byte of the stream.
pub const START_SYMBOL: &str = "aotir.ir.start";

/// Global label placed one past the last byte of the stream.
pub const STOP_SYMBOL: &str = "aotir.ir.stop";

/// Array of pointers to every global, in globals-table order.
pub const GLOBAL_PTRS_SYMBOL: &str = "__aotir_globalvar_ptrs";

/// Length of [`GLOBAL_PTRS_SYMBOL`] as a 64-bit integer.
pub const GLOBAL_LEN_SYMBOL: &str = "__aotir_globalvar_len";
