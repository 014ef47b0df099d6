//! Operand encoding.
//!
//! Every operand is a kind byte followed by a kind-specific payload. Global
//! and function addresses are constants in the program model, so they are
//! classified before the generic constant case.

use aotir_core::printer::{type_to_string, value_to_string};
use aotir_core::{ConstantData, TypeId, Value};
use aotir_format::{OperandKind, Predicate};
use tracing::trace;

use crate::encoder::{Encoder, FunctionScope, TRACE_TARGET};
use crate::EncodeError;

impl Encoder<'_> {
    pub(crate) fn write_operand(
        &mut self,
        scope: &FunctionScope<'_>,
        value: &Value,
    ) -> Result<(), EncodeError> {
        let program = self.program;
        match value {
            Value::Const(c) => match program.constant(*c) {
                ConstantData::Global(global) => {
                    let index = self
                        .globals
                        .register(program, &mut self.constants, *global);
                    self.write_tagged_index(OperandKind::Global, index)
                }
                ConstantData::Function(func) => {
                    let index = self.functions.get(*func).ok_or_else(|| {
                        EncodeError::UnknownFunction(program.function(*func).name.clone())
                    })?;
                    self.write_tagged_index(OperandKind::Function, index)
                }
                data => self.write_constant_operand(data),
            },
            Value::Arg(arg) => {
                let arg = program.arg(*arg);
                if arg.func != scope.func {
                    return Err(self.undefined(scope, value));
                }
                self.write_tagged_index(OperandKind::Arg, arg.arg_no as usize)
            }
            Value::Inst(inst) => {
                let loc = scope
                    .values
                    .lookup(*inst)
                    .ok_or_else(|| self.undefined(scope, value))?;
                self.out.write_u8(OperandKind::LocalVariable.as_u8());
                self.out.write_index(loc.block)?;
                self.out.write_index(loc.inst)
            }
            Value::Block(block) => {
                let pos = scope
                    .blocks
                    .get(*block)
                    .ok_or_else(|| EncodeError::UnknownBlock {
                        func: scope.name.to_owned(),
                        block: value_to_string(program, value),
                    })?;
                self.write_tagged_index(OperandKind::Block, pos)
            }
            Value::Opaque(text) => {
                trace!(
                    target: TRACE_TARGET,
                    function = scope.name,
                    operand = %text,
                    "unimplemented operand"
                );
                self.stats.unimplemented_operands += 1;
                self.write_unimplemented_operand(text)
            }
        }
    }

    /// Constant operand, registering `data` in the constants table.
    pub(crate) fn write_constant_operand(&mut self, data: &ConstantData) -> Result<(), EncodeError> {
        let index = self.constants.index_of(data);
        self.write_tagged_index(OperandKind::Constant, index)
    }

    /// Type operand, registering `ty` in the types table.
    pub(crate) fn write_type_operand(&mut self, ty: TypeId) -> Result<(), EncodeError> {
        let index = self.types.register(self.program.types(), ty);
        self.write_tagged_index(OperandKind::Type, index)
    }

    pub(crate) fn write_predicate_operand(&mut self, pred: Predicate) {
        self.out.write_u8(OperandKind::Predicate.as_u8());
        self.out.write_u8(pred.to_byte());
    }

    pub(crate) fn write_unimplemented_operand(&mut self, text: &str) -> Result<(), EncodeError> {
        self.out.write_u8(OperandKind::Unimplemented.as_u8());
        self.out.write_cstr(text)
    }

    fn write_tagged_index(&mut self, kind: OperandKind, index: usize) -> Result<(), EncodeError> {
        self.out.write_u8(kind.as_u8());
        self.out.write_index(index)
    }

    fn undefined(&self, scope: &FunctionScope<'_>, value: &Value) -> EncodeError {
        EncodeError::UndefinedValue {
            func: scope.name.to_owned(),
            value: value_to_string(self.program, value),
        }
    }

    /// Textual form of a type, for escapes and diagnostics.
    pub(crate) fn type_text(&self, ty: TypeId) -> String {
        type_to_string(self.program.types(), ty)
    }
}
