//! Textual rendering of types, values and instructions.
//!
//! The output reads like LLVM assembly (`%x = add i32 %a, %b`). It is what
//! unimplemented encodings carry, so it only has to be stable and readable,
//! not reparseable.

use std::fmt::Write as _;

use crate::constant::{ConstantData, sign_extend};
use crate::ids::{BlockId, ConstId, InstId, TypeId};
use crate::inst::{CmpPredicate, InstKind};
use crate::program::Program;
use crate::types::{TypeData, Types};
use crate::value::Value;

/// Render a type.
pub fn type_to_string(types: &Types, ty: TypeId) -> String {
    let mut out = String::new();
    write_type(&mut out, types, ty);
    out
}

fn write_type(out: &mut String, types: &Types, ty: TypeId) {
    let Some(data) = types.try_get(ty) else {
        write!(out, "<bad type {}>", ty.as_u32()).unwrap();
        return;
    };
    match data {
        TypeData::Void => out.push_str("void"),
        TypeData::Int { bits } => {
            write!(out, "i{bits}").unwrap();
        }
        TypeData::Ptr { addr_space: 0 } => out.push_str("ptr"),
        TypeData::Ptr { addr_space } => {
            write!(out, "ptr addrspace({addr_space})").unwrap();
        }
        TypeData::Float(kind) => out.push_str(kind.as_str()),
        TypeData::Func {
            params,
            ret,
            vararg,
        } => {
            write_type(out, types, *ret);
            out.push_str(" (");
            write_type_list(out, types, params);
            if *vararg {
                out.push_str(if params.is_empty() { "..." } else { ", ..." });
            }
            out.push(')');
        }
        TypeData::Struct(s) => match &s.name {
            Some(name) => {
                write!(out, "%{name}").unwrap();
            }
            None => {
                if s.packed {
                    out.push('<');
                }
                if s.fields.is_empty() {
                    out.push_str("{}");
                } else {
                    out.push_str("{ ");
                    write_type_list(out, types, &s.fields);
                    out.push_str(" }");
                }
                if s.packed {
                    out.push('>');
                }
            }
        },
        TypeData::Array { elem, len } => {
            write!(out, "[{len} x ").unwrap();
            write_type(out, types, *elem);
            out.push(']');
        }
    }
}

fn write_type_list(out: &mut String, types: &Types, list: &[TypeId]) {
    for (i, &ty) in list.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_type(out, types, ty);
    }
}

/// Render a constant with its type, e.g. `i32 7` or `ptr @g`.
pub fn constant_to_string(program: &Program, id: ConstId) -> String {
    constant_data_to_string(program, program.constant(id))
}

/// Like [`constant_to_string`], for a constant that need not be interned in
/// `program`.
pub fn constant_data_to_string(program: &Program, data: &ConstantData) -> String {
    let mut out = String::new();
    write_typed_constant(&mut out, program, data);
    out
}

fn write_typed_constant(out: &mut String, program: &Program, data: &ConstantData) {
    write_type(out, program.types(), data.ty());
    out.push(' ');
    write_constant_literal(out, program, data);
}

fn write_constant_literal(out: &mut String, program: &Program, data: &ConstantData) {
    match data {
        ConstantData::Int { ty, bits } => {
            let width = match program.type_data(*ty) {
                TypeData::Int { bits } => *bits,
                _ => 128,
            };
            if width == 1 {
                out.push_str(if *bits == 0 { "false" } else { "true" });
            } else {
                write!(out, "{}", sign_extend(*bits, width)).unwrap();
            }
        }
        ConstantData::Float { bits, .. } => {
            write!(out, "0x{bits:016X}").unwrap();
        }
        ConstantData::Null { .. } => out.push_str("null"),
        ConstantData::Undef { .. } => out.push_str("undef"),
        ConstantData::Aggregate { ty, elems } => {
            let (open, close) = match program.type_data(*ty) {
                TypeData::Array { .. } => ("[", "]"),
                _ => ("{ ", " }"),
            };
            out.push_str(open);
            for (i, &elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_typed_constant(out, program, program.constant(elem));
            }
            out.push_str(close);
        }
        ConstantData::Global(g) => {
            write!(out, "@{}", program.global(*g).name).unwrap();
        }
        ConstantData::Function(f) => {
            write!(out, "@{}", program.function(*f).name).unwrap();
        }
    }
}

/// Render an operand with its type, e.g. `i32 %x` or `label %entry`.
pub fn value_to_string(program: &Program, value: &Value) -> String {
    let mut out = String::new();
    write_typed_value(&mut out, program, value);
    out
}

fn write_typed_value(out: &mut String, program: &Program, value: &Value) {
    match value {
        Value::Const(c) => write_typed_constant(out, program, program.constant(*c)),
        Value::Arg(a) => {
            write_type(out, program.types(), program.arg(*a).ty);
            out.push(' ');
            write_value_ref(out, program, value);
        }
        Value::Inst(i) => {
            write_type(out, program.types(), program.inst(*i).ty);
            out.push(' ');
            write_value_ref(out, program, value);
        }
        Value::Block(_) => {
            out.push_str("label ");
            write_value_ref(out, program, value);
        }
        Value::Opaque(text) => out.push_str(text),
    }
}

/// Operand without its type, e.g. `%x`, `7`, `@g`.
fn write_value_ref(out: &mut String, program: &Program, value: &Value) {
    match value {
        Value::Const(c) => write_constant_literal(out, program, program.constant(*c)),
        Value::Arg(a) => {
            let arg = program.arg(*a);
            match &arg.name {
                Some(name) => {
                    write!(out, "%{name}").unwrap();
                }
                None => {
                    write!(out, "%arg{}", arg.arg_no).unwrap();
                }
            }
        }
        Value::Inst(i) => write_inst_ref(out, program, *i),
        Value::Block(b) => write_block_ref(out, program, *b),
        Value::Opaque(text) => out.push_str(text),
    }
}

fn write_inst_ref(out: &mut String, program: &Program, id: InstId) {
    match &program.inst(id).name {
        Some(name) => {
            write!(out, "%{name}").unwrap();
        }
        None => {
            write!(out, "%v{}", id.as_u32()).unwrap();
        }
    }
}

fn write_block_ref(out: &mut String, program: &Program, id: BlockId) {
    let block = program.block(id);
    match &block.label {
        Some(label) => {
            write!(out, "%{label}").unwrap();
        }
        None => {
            let pos = program
                .function(block.func)
                .blocks
                .iter()
                .position(|&b| b == id)
                .unwrap_or(id.index());
            write!(out, "%bb{pos}").unwrap();
        }
    }
}

/// Render an instruction, e.g. `%x = add i32 %a, %b`.
pub fn inst_to_string(program: &Program, id: InstId) -> String {
    let inst = program.inst(id);
    let types = program.types();
    let mut out = String::new();

    if !types.is_void(inst.ty) {
        write_inst_ref(&mut out, program, id);
        out.push_str(" = ");
    }

    let ops = &inst.operands;
    match &inst.kind {
        InstKind::Load => {
            out.push_str("load ");
            write_type(&mut out, types, inst.ty);
            write_operand_list(&mut out, program, ops, true);
        }
        InstKind::Ret if ops.is_empty() => out.push_str("ret void"),
        InstKind::Alloca { allocated } => {
            out.push_str("alloca ");
            write_type(&mut out, types, *allocated);
            write_operand_list(&mut out, program, ops, true);
        }
        InstKind::GetElementPtr { source } => {
            out.push_str("getelementptr ");
            write_type(&mut out, types, *source);
            write_operand_list(&mut out, program, ops, true);
        }
        InstKind::Call => {
            out.push_str("call ");
            write_type(&mut out, types, inst.ty);
            out.push(' ');
            if let Some((callee, args)) = ops.split_last() {
                write_value_ref(&mut out, program, callee);
                out.push('(');
                write_operand_list(&mut out, program, args, false);
                out.push(')');
            }
        }
        InstKind::Br if ops.len() == 3 => {
            // Targets print true first.
            let reordered = [ops[0].clone(), ops[2].clone(), ops[1].clone()];
            out.push_str("br ");
            write_operand_list(&mut out, program, &reordered, false);
        }
        InstKind::BinOp(op) => {
            out.push_str(op.as_str());
            write_untyped_pair(&mut out, program, ops);
        }
        InstKind::ICmp(pred) => {
            let mnemonic = match pred {
                CmpPredicate::Float(_) => "fcmp",
                _ => "icmp",
            };
            write!(out, "{mnemonic} {}", pred.as_str()).unwrap();
            write_untyped_pair(&mut out, program, ops);
        }
        kind => {
            out.push_str(kind.mnemonic());
            if !ops.is_empty() {
                out.push(' ');
                write_operand_list(&mut out, program, ops, false);
            }
        }
    }
    out
}

fn write_operand_list(out: &mut String, program: &Program, ops: &[Value], leading_comma: bool) {
    for (i, op) in ops.iter().enumerate() {
        if i > 0 || leading_comma {
            out.push_str(", ");
        }
        write_typed_value(out, program, op);
    }
}

/// `<ty> <lhs>, <rhs>` as used by arithmetic and comparisons.
fn write_untyped_pair(out: &mut String, program: &Program, ops: &[Value]) {
    out.push(' ');
    match ops {
        [lhs, rhs] => {
            write_typed_value(out, program, lhs);
            out.push_str(", ");
            write_value_ref(out, program, rhs);
        }
        _ => write_operand_list(out, program, ops, false),
    }
}
