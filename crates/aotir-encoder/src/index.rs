//! Explicit tables from program handles to binary positions.
//!
//! The runtime addresses functions and blocks by position. Positions are
//! taken from program order once, here, so a handle that is not part of the
//! encoded program shows up as a missing entry instead of a wrong index.

use std::collections::HashMap;

use aotir_core::{BlockId, FuncId, Program};

/// Binary position of every function, in program order.
#[derive(Debug, Default)]
pub struct FunctionIndex {
    positions: HashMap<FuncId, usize>,
}

impl FunctionIndex {
    pub fn build(program: &Program) -> Self {
        let positions = program
            .functions()
            .enumerate()
            .map(|(pos, (id, _))| (id, pos))
            .collect();
        Self { positions }
    }

    pub fn get(&self, func: FuncId) -> Option<usize> {
        self.positions.get(&func).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Binary position of every block of one function.
#[derive(Debug, Default)]
pub struct BlockIndex {
    positions: HashMap<BlockId, usize>,
}

impl BlockIndex {
    pub fn build(program: &Program, func: FuncId) -> Self {
        let positions = program
            .function(func)
            .blocks
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, pos))
            .collect();
        Self { positions }
    }

    pub fn get(&self, block: BlockId) -> Option<usize> {
        self.positions.get(&block).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
