//! JSON deserialization for program documents.
//!
//! Types are written the way LLVM prints them (`i32`, `ptr addrspace(1)`,
//! `{ i32, ptr }`, `[4 x i8]`, `%Pair`, `i32 (ptr, ...)`), or as an object for
//! function signatures. Operands are short strings:
//!
//! - `%x` - argument or instruction result
//! - `@f` - global variable or function address
//! - `label %entry` - basic block
//! - `i32 7`, `i1 true`, `ptr null`, `i8 undef`, `double 1.5` - constants
//! - `!text` - opaque operand kept as text
//!
//! Aggregate constants are objects: `{"type": "{ i32, i32 }", "elems": [...]}`.
//! Names resolve after every entity exists, so forward references load.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::ProgramError;
use crate::constant::ConstantData;
use crate::ids::{BlockId, ConstId, FuncId, InstId, TypeId};
use crate::inst::{CmpPredicate, InstKind};
use crate::layout::DataLayout;
use crate::program::Program;
use crate::types::{FloatKind, TypeData, Types};
use crate::value::Value;

impl Program {
    /// Parse a program from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ProgramError> {
        let raw: RawProgram = serde_json::from_str(json)?;
        raw.build()
    }
}

#[derive(Debug, Deserialize)]
struct RawProgram {
    #[serde(default)]
    data_layout: Option<DataLayout>,
    /// Named structs; `null` declares an opaque struct.
    #[serde(default)]
    structs: IndexMap<String, Option<RawStruct>>,
    #[serde(default)]
    globals: Vec<RawGlobal>,
    #[serde(default)]
    functions: Vec<RawFunction>,
}

#[derive(Debug, Deserialize)]
struct RawStruct {
    fields: Vec<RawType>,
    #[serde(default)]
    packed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawType {
    Text(String),
    Func {
        ret: Box<RawType>,
        #[serde(default)]
        params: Vec<RawType>,
        #[serde(default)]
        vararg: bool,
    },
}

#[derive(Debug, Deserialize)]
struct RawGlobal {
    name: String,
    #[serde(rename = "type")]
    ty: RawType,
    #[serde(default)]
    thread_local: bool,
    #[serde(default)]
    init: Option<RawOperand>,
}

#[derive(Debug, Deserialize)]
struct RawFunction {
    name: String,
    #[serde(default)]
    params: Vec<RawParam>,
    #[serde(default)]
    ret: Option<RawType>,
    #[serde(default)]
    vararg: bool,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawParam {
    Named {
        name: String,
        #[serde(rename = "type")]
        ty: RawType,
    },
    Anonymous(RawType),
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    insts: Vec<RawInst>,
}

#[derive(Debug, Deserialize)]
struct RawInst {
    #[serde(default)]
    name: Option<String>,
    op: String,
    /// Result type; defaults per opcode.
    #[serde(default, rename = "type")]
    ty: Option<RawType>,
    #[serde(default)]
    args: Vec<RawOperand>,
    /// Allocated type of an `alloca`.
    #[serde(default)]
    alloc: Option<RawType>,
    /// Source element type of a `getelementptr`.
    #[serde(default)]
    source: Option<RawType>,
    /// Predicate of an `icmp` / `fcmp`.
    #[serde(default)]
    pred: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOperand {
    Text(String),
    Aggregate {
        #[serde(rename = "type")]
        ty: RawType,
        elems: Vec<RawOperand>,
    },
}

/// Names visible inside one function body.
#[derive(Default)]
struct LocalScope {
    func: String,
    values: HashMap<String, Value>,
    blocks: HashMap<String, BlockId>,
}

impl LocalScope {
    fn define_value(&mut self, name: &str, value: Value) -> Result<(), ProgramError> {
        if self.values.insert(name.to_owned(), value).is_some() {
            return Err(ProgramError::DuplicateName(format!("%{name}")));
        }
        Ok(())
    }
}

impl RawProgram {
    fn build(self) -> Result<Program, ProgramError> {
        let mut program = Program::with_layout(self.data_layout.unwrap_or_default());

        // Declare every struct first so bodies may refer to each other.
        for name in self.structs.keys() {
            program.types_mut().declare_struct(name);
        }
        for (name, body) in &self.structs {
            let Some(body) = body else { continue };
            let id = program
                .types()
                .named(name)
                .ok_or_else(|| ProgramError::UnknownType(format!("%{name}")))?;
            let fields = body
                .fields
                .iter()
                .map(|f| resolve_type(program.types_mut(), f))
                .collect::<Result<Vec<_>, _>>()?;
            program
                .types_mut()
                .set_struct_body(id, fields, body.packed)?;
        }

        let mut global_ids = Vec::with_capacity(self.globals.len());
        for global in &self.globals {
            let ty = resolve_type(program.types_mut(), &global.ty)?;
            global_ids.push(program.add_global(&global.name, ty, global.thread_local)?);
        }

        let mut func_ids = Vec::with_capacity(self.functions.len());
        for func in &self.functions {
            let ty = function_type(program.types_mut(), func)?;
            let id = program.add_function(&func.name, ty)?;
            let args = program.function(id).args.clone();
            for (arg, param) in args.into_iter().zip(&func.params) {
                if let RawParam::Named { name, .. } = param {
                    program.set_arg_name(arg, name);
                }
            }
            func_ids.push(id);
        }

        // Initializers may name functions, so they come after all symbols.
        let empty = LocalScope::default();
        for (global, id) in self.globals.iter().zip(global_ids) {
            let Some(init) = &global.init else { continue };
            match resolve_operand(&mut program, &empty, init)? {
                Value::Const(c) => program.set_initializer(id, c),
                _ => return Err(ProgramError::MalformedConstant(describe(init))),
            }
        }

        for (func, id) in self.functions.iter().zip(func_ids) {
            build_body(&mut program, id, func)?;
        }

        Ok(program)
    }
}

fn function_type(types: &mut Types, func: &RawFunction) -> Result<TypeId, ProgramError> {
    let params = func
        .params
        .iter()
        .map(|p| match p {
            RawParam::Named { ty, .. } | RawParam::Anonymous(ty) => resolve_type(types, ty),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let ret = match &func.ret {
        Some(ret) => resolve_type(types, ret)?,
        None => TypeId::VOID,
    };
    Ok(types.func(params, ret, func.vararg))
}

fn build_body(program: &mut Program, func: FuncId, raw: &RawFunction) -> Result<(), ProgramError> {
    let mut scope = LocalScope {
        func: raw.name.clone(),
        ..LocalScope::default()
    };

    let args = program.function(func).args.clone();
    for arg in args {
        if let Some(name) = program.arg(arg).name.clone() {
            scope.define_value(&name, Value::Arg(arg))?;
        }
    }

    let mut blocks = Vec::with_capacity(raw.blocks.len());
    for block in &raw.blocks {
        let id = program.add_block(func, block.label.as_deref());
        if let Some(label) = &block.label {
            if scope.blocks.insert(label.clone(), id).is_some() {
                return Err(ProgramError::DuplicateName(format!("label %{label}")));
            }
        }
        blocks.push(id);
    }

    // Create every instruction before resolving operands: a phi-like
    // instruction may use a value defined further down.
    let mut pending: Vec<(InstId, &RawInst)> = Vec::new();
    for (block, id) in raw.blocks.iter().zip(blocks) {
        for inst in &block.insts {
            let kind = inst_kind(program.types_mut(), inst)?;
            let ty = match &inst.ty {
                Some(ty) => resolve_type(program.types_mut(), ty)?,
                None => default_result_type(&kind),
            };
            let inst_id = program.push_inst(id, kind, ty, Vec::new(), inst.name.as_deref());
            if let Some(name) = &inst.name {
                scope.define_value(name, Value::Inst(inst_id))?;
            }
            pending.push((inst_id, inst));
        }
    }

    for (inst_id, inst) in pending {
        let mut operands = inst
            .args
            .iter()
            .map(|a| resolve_operand(program, &scope, a))
            .collect::<Result<Vec<_>, _>>()?;
        if matches!(program.inst(inst_id).kind, InstKind::Alloca { .. }) && operands.is_empty() {
            operands.push(Value::Const(program.const_int(TypeId::I32, 1)?));
        }
        // A binary operator yields the type of its operands.
        if inst.ty.is_none() && matches!(program.inst(inst_id).kind, InstKind::BinOp(_)) {
            if let Some(ty) = operands.first().and_then(|v| program.value_type(v)) {
                program.set_inst_type(inst_id, ty);
            }
        }
        program.set_operands(inst_id, operands);

        if let Some(name) = &inst.name {
            if program.types().is_void(program.inst(inst_id).ty) {
                return Err(ProgramError::NamedVoidValue {
                    func: scope.func.clone(),
                    name: name.clone(),
                });
            }
        }
    }

    Ok(())
}

fn inst_kind(types: &mut Types, inst: &RawInst) -> Result<InstKind, ProgramError> {
    let missing = |attr| ProgramError::MissingAttribute {
        op: inst.op.clone(),
        attr,
    };
    let kind = match inst.op.as_str() {
        "alloca" => {
            let ty = inst.alloc.as_ref().ok_or_else(|| missing("alloc"))?;
            InstKind::Alloca {
                allocated: resolve_type(types, ty)?,
            }
        }
        "getelementptr" => {
            let ty = inst.source.as_ref().ok_or_else(|| missing("source"))?;
            InstKind::GetElementPtr {
                source: resolve_type(types, ty)?,
            }
        }
        "icmp" | "fcmp" => {
            let pred = inst.pred.as_ref().ok_or_else(|| missing("pred"))?;
            let pred = CmpPredicate::from_name(pred)
                .ok_or_else(|| ProgramError::UnknownPredicate(pred.clone()))?;
            InstKind::ICmp(pred)
        }
        op => InstKind::from_mnemonic(op),
    };
    Ok(kind)
}

fn default_result_type(kind: &InstKind) -> TypeId {
    match kind {
        InstKind::Alloca { .. } | InstKind::GetElementPtr { .. } => TypeId::PTR,
        InstKind::ICmp(_) => TypeId::I1,
        _ => TypeId::VOID,
    }
}

fn describe(operand: &RawOperand) -> String {
    match operand {
        RawOperand::Text(text) => text.clone(),
        RawOperand::Aggregate { .. } => "<aggregate>".to_owned(),
    }
}

fn resolve_operand(
    program: &mut Program,
    scope: &LocalScope,
    operand: &RawOperand,
) -> Result<Value, ProgramError> {
    let text = match operand {
        RawOperand::Text(text) => text.trim(),
        RawOperand::Aggregate { ty, elems } => {
            let ty = resolve_type(program.types_mut(), ty)?;
            let mut consts = Vec::with_capacity(elems.len());
            for elem in elems {
                match resolve_operand(program, scope, elem)? {
                    Value::Const(c) => consts.push(c),
                    _ => return Err(ProgramError::MalformedConstant(describe(elem))),
                }
            }
            let id = program.intern_constant(ConstantData::Aggregate { ty, elems: consts });
            return Ok(Value::Const(id));
        }
    };

    if let Some(opaque) = text.strip_prefix('!') {
        return Ok(Value::Opaque(opaque.to_owned()));
    }
    if let Some(label) = text.strip_prefix("label ") {
        let label = label.trim().trim_start_matches('%');
        return scope
            .blocks
            .get(label)
            .map(|&b| Value::Block(b))
            .ok_or_else(|| ProgramError::UnknownBlock {
                func: scope.func.clone(),
                label: label.to_owned(),
            });
    }
    if text.starts_with('%') || text.starts_with('@') {
        return resolve_name(program, scope, text);
    }

    let Some((ty_text, literal)) = text.rsplit_once(' ') else {
        return Err(ProgramError::MalformedOperand(text.to_owned()));
    };
    if literal.starts_with('%') || literal.starts_with('@') {
        return resolve_name(program, scope, literal);
    }
    let ty = parse_type(program.types_mut(), ty_text)?;
    let id = constant_literal(program, ty, literal)?;
    Ok(Value::Const(id))
}

fn resolve_name(program: &mut Program, scope: &LocalScope, name: &str) -> Result<Value, ProgramError> {
    if let Some(local) = name.strip_prefix('%') {
        return scope
            .values
            .get(local)
            .cloned()
            .ok_or_else(|| ProgramError::UnknownValue {
                func: scope.func.clone(),
                name: local.to_owned(),
            });
    }

    let symbol = name.trim_start_matches('@');
    if let Some(g) = program.find_global(symbol) {
        return Ok(Value::Const(program.global_ref(g)));
    }
    if let Some(f) = program.find_function(symbol) {
        return Ok(Value::Const(program.function_ref(f)));
    }
    Err(ProgramError::UnknownSymbol(symbol.to_owned()))
}

fn constant_literal(
    program: &mut Program,
    ty: TypeId,
    literal: &str,
) -> Result<ConstId, ProgramError> {
    let malformed = || ProgramError::MalformedConstant(literal.to_owned());
    match literal {
        "null" => return Ok(program.intern_constant(ConstantData::Null { ty })),
        "undef" | "poison" => return Ok(program.intern_constant(ConstantData::Undef { ty })),
        _ => {}
    }

    match program.type_data(ty).clone() {
        TypeData::Int { .. } => {
            let value = match literal {
                "true" => 1,
                "false" => 0,
                _ => parse_int(literal).ok_or_else(malformed)?,
            };
            program.const_int(ty, value)
        }
        TypeData::Float(kind) => {
            let bits = if let Some(hex) = literal.strip_prefix("0x") {
                u64::from_str_radix(hex, 16).map_err(|_| malformed())?
            } else {
                let value: f64 = literal.parse().map_err(|_| malformed())?;
                match kind {
                    FloatKind::Float => u64::from((value as f32).to_bits()),
                    _ => value.to_bits(),
                }
            };
            Ok(program.intern_constant(ConstantData::Float { ty, bits }))
        }
        _ => Err(malformed()),
    }
}

fn parse_int(literal: &str) -> Option<i128> {
    if let Some(hex) = literal.strip_prefix("0x") {
        return u128::from_str_radix(hex, 16).ok().map(|v| v as i128);
    }
    literal.parse().ok()
}

fn resolve_type(types: &mut Types, raw: &RawType) -> Result<TypeId, ProgramError> {
    match raw {
        RawType::Text(text) => parse_type(types, text),
        RawType::Func {
            ret,
            params,
            vararg,
        } => {
            let ret = resolve_type(types, ret)?;
            let params = params
                .iter()
                .map(|p| resolve_type(types, p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(types.func(params, ret, *vararg))
        }
    }
}

/// Parse a type written the way LLVM prints it.
pub fn parse_type(types: &mut Types, text: &str) -> Result<TypeId, ProgramError> {
    let mut parser = TypeParser { rest: text };
    let ty = parser.parse(types);
    parser.skip_ws();
    match ty {
        Some(ty) if parser.rest.is_empty() => Ok(ty),
        _ => Err(ProgramError::UnknownType(text.to_owned())),
    }
}

struct TypeParser<'a> {
    rest: &'a str,
}

impl<'a> TypeParser<'a> {
    fn skip_ws(&mut self) {
        let rest: &'a str = self.rest;
        self.rest = rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        let rest: &'a str = self.rest;
        match rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn word(&mut self) -> &'a str {
        self.skip_ws();
        let src: &'a str = self.rest;
        let end = src
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(src.len());
        let (word, rest) = src.split_at(end);
        self.rest = rest;
        word
    }

    fn number(&mut self) -> Option<u64> {
        self.word().parse().ok()
    }

    fn parse(&mut self, types: &mut Types) -> Option<TypeId> {
        let mut ty = self.parse_base(types)?;
        while self.eat("(") {
            let (params, vararg) = self.parse_list(types, ")")?;
            ty = types.func(params, ty, vararg);
        }
        Some(ty)
    }

    fn parse_base(&mut self, types: &mut Types) -> Option<TypeId> {
        if self.eat("<{") {
            let (fields, _) = self.parse_list(types, "}>")?;
            return Some(types.literal_struct(fields, true));
        }
        if self.eat("{") {
            let (fields, _) = self.parse_list(types, "}")?;
            return Some(types.literal_struct(fields, false));
        }
        if self.eat("[") {
            let len = self.number()?;
            if self.word() != "x" {
                return None;
            }
            let elem = self.parse(types)?;
            if !self.eat("]") {
                return None;
            }
            return Some(types.array(elem, len));
        }
        if self.eat("%") {
            return types.named(self.word());
        }

        let word = self.word();
        match word {
            "void" => Some(TypeId::VOID),
            "ptr" => {
                if self.eat("addrspace(") {
                    let space = u32::try_from(self.number()?).ok()?;
                    if !self.eat(")") {
                        return None;
                    }
                    Some(types.ptr(space))
                } else {
                    Some(TypeId::PTR)
                }
            }
            _ => {
                if let Some(kind) = FloatKind::from_name(word) {
                    return Some(types.float(kind));
                }
                let bits: u32 = word.strip_prefix('i')?.parse().ok()?;
                (bits > 0).then(|| types.int(bits))
            }
        }
    }

    /// Comma-separated types up to `close`. `...` marks a vararg list.
    fn parse_list(&mut self, types: &mut Types, close: &str) -> Option<(Vec<TypeId>, bool)> {
        let mut items = Vec::new();
        let mut vararg = false;
        if self.eat(close) {
            return Some((items, vararg));
        }
        loop {
            if self.eat("...") {
                vararg = true;
            } else {
                items.push(self.parse(types)?);
            }
            if self.eat(close) {
                return Some((items, vararg));
            }
            if !self.eat(",") {
                return None;
            }
        }
    }
}
