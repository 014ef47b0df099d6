//! The program arenas.

use std::collections::HashMap;

use crate::constant::{ConstantData, Constants, truncate};
use crate::ids::{ArgId, BlockId, ConstId, FuncId, GlobalId, InstId, TypeId};
use crate::inst::{InstData, InstKind};
use crate::layout::DataLayout;
use crate::printer;
use crate::types::{TypeData, Types};
use crate::value::Value;
use crate::ProgramError;

/// Widest integer constant the model can hold.
pub const MAX_INT_BITS: u32 = 128;

/// A formal argument.
#[derive(Clone, Debug)]
pub struct ArgData {
    pub func: FuncId,
    /// Position in the parameter list.
    pub arg_no: u32,
    pub ty: TypeId,
    pub name: Option<String>,
}

/// A basic block.
#[derive(Clone, Debug)]
pub struct BlockData {
    pub func: FuncId,
    pub label: Option<String>,
    /// Instructions in execution order, debug instructions included.
    pub insts: Vec<InstId>,
}

#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: String,
    /// Always a [`TypeData::Func`].
    pub ty: TypeId,
    pub args: Vec<ArgId>,
    pub blocks: Vec<BlockId>,
}

impl FunctionData {
    /// A function without a body.
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct GlobalData {
    pub name: String,
    /// Type of the stored value.
    pub ty: TypeId,
    pub thread_local: bool,
    pub initializer: Option<ConstId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Symbol {
    Global(GlobalId),
    Function(FuncId),
}

/// A whole program: every entity lives in an arena owned here.
///
/// Functions and globals share one namespace.
#[derive(Clone, Debug, Default)]
pub struct Program {
    pub layout: DataLayout,
    types: Types,
    constants: Constants,
    globals: Vec<GlobalData>,
    functions: Vec<FunctionData>,
    blocks: Vec<BlockData>,
    insts: Vec<InstData>,
    args: Vec<ArgData>,
    symbols: HashMap<String, Symbol>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: DataLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn types(&self) -> &Types {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut Types {
        &mut self.types
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    #[inline]
    pub fn type_data(&self, ty: TypeId) -> &TypeData {
        self.types.get(ty)
    }

    /// Intern a constant.
    pub fn intern_constant(&mut self, data: ConstantData) -> ConstId {
        self.constants.intern(data)
    }

    /// Intern an integer constant of type `ty`. `value` is truncated to the
    /// type's width, so negative values become their two's complement.
    pub fn const_int(&mut self, ty: TypeId, value: i128) -> Result<ConstId, ProgramError> {
        let bits = match self.types.get(ty) {
            TypeData::Int { bits } => *bits,
            _ => return Err(ProgramError::NotAnIntegerType(self.type_name(ty))),
        };
        if bits > MAX_INT_BITS {
            return Err(ProgramError::IntegerTooWide(bits));
        }
        let bits_value = truncate(value as u128, bits);
        Ok(self.constants.intern(ConstantData::Int {
            ty,
            bits: bits_value,
        }))
    }

    #[inline]
    pub fn constant(&self, id: ConstId) -> &ConstantData {
        self.constants.get(id)
    }

    pub fn add_global(
        &mut self,
        name: &str,
        ty: TypeId,
        thread_local: bool,
    ) -> Result<GlobalId, ProgramError> {
        let id = GlobalId::new(self.globals.len());
        self.claim_symbol(name, Symbol::Global(id))?;
        self.globals.push(GlobalData {
            name: name.to_owned(),
            ty,
            thread_local,
            initializer: None,
        });
        Ok(id)
    }

    pub fn set_initializer(&mut self, global: GlobalId, init: ConstId) {
        self.globals[global.index()].initializer = Some(init);
    }

    /// Constant holding the address of `global`.
    pub fn global_ref(&mut self, global: GlobalId) -> ConstId {
        self.constants.intern(ConstantData::Global(global))
    }

    #[inline]
    pub fn global(&self, id: GlobalId) -> &GlobalData {
        &self.globals[id.index()]
    }

    pub fn globals(&self) -> impl Iterator<Item = (GlobalId, &GlobalData)> {
        self.globals
            .iter()
            .enumerate()
            .map(|(i, g)| (GlobalId::new(i), g))
    }

    pub fn find_global(&self, name: &str) -> Option<GlobalId> {
        match self.symbols.get(name) {
            Some(Symbol::Global(id)) => Some(*id),
            _ => None,
        }
    }

    /// Add a function of type `ty`, creating one argument per parameter.
    pub fn add_function(&mut self, name: &str, ty: TypeId) -> Result<FuncId, ProgramError> {
        let params = match self.types.get(ty) {
            TypeData::Func { params, .. } => params.clone(),
            _ => return Err(ProgramError::NotAFunctionType(self.type_name(ty))),
        };

        let id = FuncId::new(self.functions.len());
        self.claim_symbol(name, Symbol::Function(id))?;

        let mut args = Vec::with_capacity(params.len());
        for (arg_no, ty) in params.into_iter().enumerate() {
            let arg = ArgId::new(self.args.len());
            self.args.push(ArgData {
                func: id,
                arg_no: arg_no as u32,
                ty,
                name: None,
            });
            args.push(arg);
        }

        self.functions.push(FunctionData {
            name: name.to_owned(),
            ty,
            args,
            blocks: Vec::new(),
        });
        Ok(id)
    }

    /// Constant holding the address of `func`.
    pub fn function_ref(&mut self, func: FuncId) -> ConstId {
        self.constants.intern(ConstantData::Function(func))
    }

    #[inline]
    pub fn function(&self, id: FuncId) -> &FunctionData {
        &self.functions[id.index()]
    }

    pub fn functions(&self) -> impl Iterator<Item = (FuncId, &FunctionData)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FuncId::new(i), f))
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn find_function(&self, name: &str) -> Option<FuncId> {
        match self.symbols.get(name) {
            Some(Symbol::Function(id)) => Some(*id),
            _ => None,
        }
    }

    #[inline]
    pub fn arg(&self, id: ArgId) -> &ArgData {
        &self.args[id.index()]
    }

    pub fn set_arg_name(&mut self, id: ArgId, name: &str) {
        self.args[id.index()].name = Some(name.to_owned());
    }

    /// Append a block to `func`.
    pub fn add_block(&mut self, func: FuncId, label: Option<&str>) -> BlockId {
        let id = BlockId::new(self.blocks.len());
        self.blocks.push(BlockData {
            func,
            label: label.map(str::to_owned),
            insts: Vec::new(),
        });
        self.functions[func.index()].blocks.push(id);
        id
    }

    #[inline]
    pub fn block(&self, id: BlockId) -> &BlockData {
        &self.blocks[id.index()]
    }

    /// Append an instruction to `block`.
    pub fn push_inst(
        &mut self,
        block: BlockId,
        kind: InstKind,
        ty: TypeId,
        operands: Vec<Value>,
        name: Option<&str>,
    ) -> InstId {
        let id = InstId::new(self.insts.len());
        self.insts.push(InstData {
            kind,
            ty,
            operands,
            name: name.map(str::to_owned),
            block,
        });
        self.blocks[block.index()].insts.push(id);
        id
    }

    /// Replace the operands of an instruction. Used to patch forward
    /// references once every instruction of a function exists.
    pub fn set_operands(&mut self, inst: InstId, operands: Vec<Value>) {
        self.insts[inst.index()].operands = operands;
    }

    /// Set the result type of an instruction.
    pub fn set_inst_type(&mut self, inst: InstId, ty: TypeId) {
        self.insts[inst.index()].ty = ty;
    }

    /// Type of the value `value` produces. Blocks and opaque operands have
    /// none.
    pub fn value_type(&self, value: &Value) -> Option<TypeId> {
        match value {
            Value::Const(c) => Some(self.constant(*c).ty()),
            Value::Arg(a) => Some(self.arg(*a).ty),
            Value::Inst(i) => Some(self.inst(*i).ty),
            Value::Block(_) | Value::Opaque(_) => None,
        }
    }

    #[inline]
    pub fn inst(&self, id: InstId) -> &InstData {
        &self.insts[id.index()]
    }

    /// Function owning an instruction.
    pub fn inst_function(&self, id: InstId) -> FuncId {
        self.block(self.inst(id).block).func
    }

    fn claim_symbol(&mut self, name: &str, symbol: Symbol) -> Result<(), ProgramError> {
        if self.symbols.contains_key(name) {
            return Err(ProgramError::DuplicateName(name.to_owned()));
        }
        self.symbols.insert(name.to_owned(), symbol);
        Ok(())
    }

    fn type_name(&self, ty: TypeId) -> String {
        printer::type_to_string(&self.types, ty)
    }
}
