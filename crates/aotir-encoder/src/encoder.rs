//! Top-level encoding driver.
//!
//! Stream layout:
//!
//! ```text
//! header     magic:u32 version:u32
//! functions  count:size { name:cstr type_idx:size num_blocks:size block* }*
//! constants  count:size { type_idx:size num_bytes:size byte* }*
//! globals    count:size { thread_local:u8 name:cstr }*
//! types      count:size { kind:u8 payload }*
//! ```
//!
//! Sections are flushed in that order. Encoding functions is what fills the
//! tables, flushing constants can add types, and nothing after the globals
//! section adds constants or globals.

use aotir_core::{BlockId, FuncId, InstId, Program};
use aotir_format::{Header, WordSize};
use tracing::debug;

use crate::config::EncoderConfig;
use crate::index::{BlockIndex, FunctionIndex};
use crate::tables::{ConstantTable, GlobalTable, TypeTable};
use crate::value_map::ValueLocationMap;
use crate::writer::StreamWriter;
use crate::EncodeError;

/// `tracing` target for everything the encoder logs.
pub const TRACE_TARGET: &str = "aotir::encode";

/// Counters collected while encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub functions: usize,
    /// Functions without a body.
    pub declarations: usize,
    pub blocks: usize,
    /// Emitted instructions, escapes included.
    pub instructions: usize,
    /// Debug and pseudo instructions left out of the stream.
    pub skipped_instructions: usize,
    pub unimplemented_instructions: usize,
    pub unimplemented_operands: usize,
    pub unimplemented_constants: usize,
    pub unimplemented_types: usize,
    pub types: usize,
    pub constants: usize,
    pub globals: usize,
}

/// Result of encoding a program.
#[derive(Clone, Debug)]
pub struct EncodedModule {
    pub bytes: Vec<u8>,
    /// Names of the globals, in globals-table order. Entry `i` is the global
    /// that stream index `i` refers to.
    pub globals: Vec<String>,
    pub word_size: WordSize,
    pub stats: EncodeStats,
}

/// Encode `program` into a stream.
pub fn serialise(program: &Program, config: &EncoderConfig) -> Result<EncodedModule, EncodeError> {
    Encoder::new(program, *config).encode()
}

/// State of the function being encoded.
#[derive(Debug)]
pub(crate) struct FunctionScope<'p> {
    pub func: FuncId,
    pub name: &'p str,
    pub blocks: BlockIndex,
    pub values: ValueLocationMap,
    /// Position of the block being encoded.
    pub block: usize,
    /// Position the next emitted instruction gets in its block.
    pub next_inst: usize,
}

impl<'p> FunctionScope<'p> {
    pub fn new(program: &'p Program, func: FuncId) -> Self {
        Self {
            func,
            name: &program.function(func).name,
            blocks: BlockIndex::build(program, func),
            values: ValueLocationMap::new(),
            block: 0,
            next_inst: 0,
        }
    }
}

/// Encoding context: the program, the symbol tables and the output.
///
/// Nothing here is shared between runs; each [`Encoder`] owns its tables.
pub struct Encoder<'p> {
    pub(crate) program: &'p Program,
    pub(crate) out: StreamWriter,
    pub(crate) types: TypeTable,
    pub(crate) constants: ConstantTable,
    pub(crate) globals: GlobalTable,
    pub(crate) functions: FunctionIndex,
    pub(crate) stats: EncodeStats,
}

impl<'p> Encoder<'p> {
    pub fn new(program: &'p Program, config: EncoderConfig) -> Self {
        Self {
            program,
            out: StreamWriter::new(config.word_size),
            types: TypeTable::new(),
            constants: ConstantTable::new(),
            globals: GlobalTable::new(),
            functions: FunctionIndex::build(program),
            stats: EncodeStats::default(),
        }
    }

    pub fn encode(mut self) -> Result<EncodedModule, EncodeError> {
        let program = self.program;

        self.out.write_header(&Header::default());

        self.out.write_index(program.function_count())?;
        for (func, _) in program.functions() {
            self.encode_function(func)?;
        }

        self.write_constants()?;
        let globals = self.write_globals()?;
        self.write_types()?;

        self.stats.types = self.types.len();
        self.stats.constants = self.constants.len();
        self.stats.globals = self.globals.len();

        debug!(
            target: TRACE_TARGET,
            bytes = self.out.len(),
            functions = self.stats.functions,
            types = self.stats.types,
            constants = self.stats.constants,
            globals = self.stats.globals,
            "encoded program"
        );

        Ok(EncodedModule {
            word_size: self.out.word_size(),
            bytes: self.out.into_bytes(),
            globals,
            stats: self.stats,
        })
    }

    fn encode_function(&mut self, func: FuncId) -> Result<(), EncodeError> {
        let program = self.program;
        let data = program.function(func);

        self.out.write_cstr(&data.name)?;
        let ty = self.types.register(program.types(), data.ty);
        self.out.write_index(ty)?;
        self.out.write_index(data.blocks.len())?;

        let mut scope = FunctionScope::new(program, func);
        let before = self.stats.instructions;
        for (pos, &block) in data.blocks.iter().enumerate() {
            scope.block = pos;
            self.encode_block(&mut scope, block)?;
        }

        self.stats.functions += 1;
        self.stats.blocks += data.blocks.len();
        if data.is_declaration() {
            self.stats.declarations += 1;
        }
        debug!(
            target: TRACE_TARGET,
            function = %data.name,
            blocks = data.blocks.len(),
            instructions = self.stats.instructions - before,
            "encoded function"
        );
        Ok(())
    }

    fn encode_block(&mut self, scope: &mut FunctionScope<'p>, block: BlockId) -> Result<(), EncodeError> {
        let program = self.program;
        let all = &program.block(block).insts;
        let emitted: Vec<InstId> = all
            .iter()
            .copied()
            .filter(|&inst| !program.inst(inst).kind.is_debug_or_pseudo())
            .collect();
        self.stats.skipped_instructions += all.len() - emitted.len();

        let expected = emitted.len();
        self.out.write_index(expected)?;

        scope.next_inst = 0;
        for inst in emitted {
            self.encode_inst(scope, inst)?;
        }

        if scope.next_inst != expected {
            return Err(EncodeError::InstructionCountMismatch {
                func: scope.name.to_owned(),
                block: scope.block,
                expected,
                emitted: scope.next_inst,
            });
        }
        self.stats.instructions += expected;
        Ok(())
    }
}
