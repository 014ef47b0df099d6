//! Instruction encoding.
//!
//! Record: `type_idx:size opcode:u8 num_operands:u32 operand*`.
//!
//! Loads, stores, returns, aggregate inserts and binary operators keep their
//! operands as they are. Allocations, calls, branches, pointer arithmetic and
//! comparisons are reshaped. Anything else becomes an `Unimplemented` record
//! whose single operand is the instruction's text.

use aotir_core::constant::sign_extend;
use aotir_core::printer::inst_to_string;
use aotir_core::{
    BinOp, CmpPredicate, ConstantData, InstData, InstId, InstKind, TypeData, TypeId, Value,
};
use aotir_format::{Opcode, Predicate};
use tracing::trace;

use crate::encoder::{Encoder, FunctionScope, TRACE_TARGET};
use crate::value_map::InstrLoc;
use crate::EncodeError;

/// Opcode of a binary operator.
pub fn binop_opcode(op: BinOp) -> Opcode {
    match op {
        BinOp::Add => Opcode::Add,
        BinOp::Sub => Opcode::Sub,
        BinOp::Mul => Opcode::Mul,
        BinOp::Or => Opcode::Or,
        BinOp::And => Opcode::And,
        BinOp::Xor => Opcode::Xor,
        BinOp::Shl => Opcode::Shl,
        BinOp::AShr => Opcode::AShr,
        BinOp::LShr => Opcode::LShr,
        BinOp::SDiv => Opcode::SDiv,
        BinOp::SRem => Opcode::SRem,
        BinOp::UDiv => Opcode::UDiv,
        BinOp::URem => Opcode::URem,
        BinOp::FAdd => Opcode::FAdd,
        BinOp::FSub => Opcode::FSub,
        BinOp::FMul => Opcode::FMul,
        BinOp::FDiv => Opcode::FDiv,
        BinOp::FRem => Opcode::FRem,
    }
}

/// Wire predicate of an integer comparison. Float predicates have none.
pub fn wire_predicate(pred: CmpPredicate) -> Option<Predicate> {
    let p = match pred {
        CmpPredicate::Eq => Predicate::Equal,
        CmpPredicate::Ne => Predicate::NotEqual,
        CmpPredicate::Ugt => Predicate::UnsignedGreater,
        CmpPredicate::Uge => Predicate::UnsignedGreaterEqual,
        CmpPredicate::Ult => Predicate::UnsignedLess,
        CmpPredicate::Ule => Predicate::UnsignedLessEqual,
        CmpPredicate::Sgt => Predicate::SignedGreater,
        CmpPredicate::Sge => Predicate::SignedGreaterEqual,
        CmpPredicate::Slt => Predicate::SignedLess,
        CmpPredicate::Sle => Predicate::SignedLessEqual,
        CmpPredicate::Float(_) => return None,
    };
    Some(p)
}

impl<'p> Encoder<'p> {
    /// Encode one instruction at the next position of the current block.
    pub(crate) fn encode_inst(
        &mut self,
        scope: &mut FunctionScope<'p>,
        id: InstId,
    ) -> Result<(), EncodeError> {
        let program = self.program;
        let inst = program.inst(id);
        let loc = InstrLoc::new(scope.block, scope.next_inst);

        match &inst.kind {
            InstKind::Load => self.encode_generic(scope, inst, Opcode::Load)?,
            InstKind::Store => self.encode_generic(scope, inst, Opcode::Store)?,
            InstKind::Ret => self.encode_generic(scope, inst, Opcode::Ret)?,
            InstKind::InsertValue => self.encode_generic(scope, inst, Opcode::InsertValue)?,
            InstKind::BinOp(op) => self.encode_generic(scope, inst, binop_opcode(*op))?,
            InstKind::Alloca { allocated } => self.encode_alloca(scope, id, *allocated)?,
            InstKind::Br if matches!(inst.operands.len(), 1 | 3) => {
                self.encode_branch(scope, inst)?
            }
            InstKind::Call => match inst.callee() {
                Some(callee) => self.encode_call(scope, inst, callee)?,
                None => self.encode_unimplemented(scope, id)?,
            },
            InstKind::GetElementPtr { source } => match inst.operands.split_first() {
                Some((base, indices)) => self.encode_ptr_add(scope, id, *source, base, indices)?,
                None => self.encode_unimplemented(scope, id)?,
            },
            InstKind::ICmp(pred) => match inst.operands.as_slice() {
                [lhs, rhs] => self.encode_icmp(scope, id, *pred, lhs, rhs)?,
                _ => self.encode_unimplemented(scope, id)?,
            },
            _ => self.encode_unimplemented(scope, id)?,
        }

        scope
            .values
            .record(id, !program.types().is_void(inst.ty), loc);
        scope.next_inst += 1;
        Ok(())
    }

    fn write_inst_header(
        &mut self,
        ty: TypeId,
        opcode: Opcode,
        num_operands: usize,
    ) -> Result<(), EncodeError> {
        let ty = self.types.register(self.program.types(), ty);
        self.out.write_index(ty)?;
        self.out.write_u8(opcode.as_u8());
        let num = u32::try_from(num_operands).map_err(|_| EncodeError::SizeOverflow {
            value: num_operands as u64,
            word: 4,
        })?;
        self.out.write_u32(num);
        Ok(())
    }

    fn encode_generic(
        &mut self,
        scope: &FunctionScope<'p>,
        inst: &InstData,
        opcode: Opcode,
    ) -> Result<(), EncodeError> {
        self.write_inst_header(inst.ty, opcode, inst.operands.len())?;
        for op in &inst.operands {
            self.write_operand(scope, op)?;
        }
        Ok(())
    }

    /// `[Type(allocated), count]`.
    fn encode_alloca(
        &mut self,
        scope: &FunctionScope<'p>,
        id: InstId,
        allocated: TypeId,
    ) -> Result<(), EncodeError> {
        let program = self.program;
        let inst = program.inst(id);
        let count = match inst.operands.as_slice() {
            [Value::Const(c)] if matches!(program.constant(*c), ConstantData::Int { .. }) => {
                &inst.operands[0]
            }
            _ => {
                return Err(EncodeError::NonConstantAllocaCount {
                    func: scope.name.to_owned(),
                    inst: inst_to_string(program, id),
                });
            }
        };

        self.write_inst_header(inst.ty, Opcode::Alloca, 2)?;
        self.write_type_operand(allocated)?;
        self.write_operand(scope, count)
    }

    /// Callee first, then the arguments in order.
    fn encode_call(
        &mut self,
        scope: &FunctionScope<'p>,
        inst: &InstData,
        callee: &Value,
    ) -> Result<(), EncodeError> {
        let args = &inst.operands[..inst.operands.len() - 1];
        self.write_inst_header(inst.ty, Opcode::Call, inst.operands.len())?;
        self.write_operand(scope, callee)?;
        for arg in args {
            self.write_operand(scope, arg)?;
        }
        Ok(())
    }

    /// Unconditional: `Br` with no operands. Conditional: `CondBr` with
    /// `(condition, true-target, false-target)`.
    fn encode_branch(
        &mut self,
        scope: &FunctionScope<'p>,
        inst: &InstData,
    ) -> Result<(), EncodeError> {
        match (inst.condition(), inst.successor(0), inst.successor(1)) {
            (Some(cond), Some(if_true), Some(if_false)) => {
                self.write_inst_header(inst.ty, Opcode::CondBr, 3)?;
                self.write_operand(scope, cond)?;
                self.write_operand(scope, if_true)?;
                self.write_operand(scope, if_false)
            }
            _ => self.write_inst_header(inst.ty, Opcode::Br, 0),
        }
    }

    /// `[base, Constant(i64 byte offset)]`.
    fn encode_ptr_add(
        &mut self,
        scope: &FunctionScope<'p>,
        id: InstId,
        source: TypeId,
        base: &Value,
        indices: &[Value],
    ) -> Result<(), EncodeError> {
        let program = self.program;
        let inst = program.inst(id);
        let offset = self.pointer_offset(scope, id, source, indices)?;

        self.write_inst_header(inst.ty, Opcode::PtrAdd, 2)?;
        self.write_operand(scope, base)?;
        self.write_constant_operand(&ConstantData::Int {
            ty: TypeId::I64,
            bits: u128::from(offset as u64),
        })
    }

    /// Fold constant indices into one byte offset, wrapping at 64 bits.
    ///
    /// The first index steps over whole `source` objects; each later index
    /// selects a struct field or an array element of the current type.
    fn pointer_offset(
        &self,
        scope: &FunctionScope<'p>,
        id: InstId,
        source: TypeId,
        indices: &[Value],
    ) -> Result<i64, EncodeError> {
        let program = self.program;
        let types = program.types();
        let layout = &program.layout;
        let invalid = |index: usize, ty: TypeId| EncodeError::InvalidOffsetIndex {
            func: scope.name.to_owned(),
            index,
            ty: self.type_text(ty),
            inst: inst_to_string(program, id),
        };

        let mut offset: i64 = 0;
        let mut current = source;
        for (pos, index) in indices.iter().enumerate() {
            let value = self.constant_index(scope, id, index)?;

            if pos == 0 {
                let size = layout
                    .alloc_size(types, source)
                    .ok_or_else(|| invalid(pos, source))?;
                offset = offset.wrapping_add(value.wrapping_mul(size as i64));
                continue;
            }

            match types.get(current) {
                TypeData::Struct(s) => {
                    let field = usize::try_from(value)
                        .ok()
                        .filter(|&f| f < s.fields.len())
                        .ok_or_else(|| invalid(pos, current))?;
                    let sl = layout
                        .struct_layout(types, current)
                        .ok_or_else(|| invalid(pos, current))?;
                    offset = offset.wrapping_add(sl.field_offsets[field] as i64);
                    current = s.fields[field];
                }
                TypeData::Array { elem, .. } => {
                    let size = layout
                        .alloc_size(types, *elem)
                        .ok_or_else(|| invalid(pos, current))?;
                    offset = offset.wrapping_add(value.wrapping_mul(size as i64));
                    current = *elem;
                }
                _ => return Err(invalid(pos, current)),
            }
        }
        Ok(offset)
    }

    /// Sign-extended value of a constant integer index.
    fn constant_index(
        &self,
        scope: &FunctionScope<'p>,
        id: InstId,
        index: &Value,
    ) -> Result<i64, EncodeError> {
        let program = self.program;
        if let Value::Const(c) = index {
            if let ConstantData::Int { ty, bits } = program.constant(*c) {
                if let TypeData::Int { bits: width } = program.type_data(*ty) {
                    return Ok(sign_extend(*bits, *width) as i64);
                }
            }
        }
        Err(EncodeError::NonConstantOffset {
            func: scope.name.to_owned(),
            inst: inst_to_string(program, id),
        })
    }

    /// `[lhs, Predicate, rhs]`.
    fn encode_icmp(
        &mut self,
        scope: &FunctionScope<'p>,
        id: InstId,
        pred: CmpPredicate,
        lhs: &Value,
        rhs: &Value,
    ) -> Result<(), EncodeError> {
        let program = self.program;
        let inst = program.inst(id);
        let wire = wire_predicate(pred).ok_or_else(|| EncodeError::UnsupportedPredicate {
            func: scope.name.to_owned(),
            pred: pred.as_str().to_owned(),
            inst: inst_to_string(program, id),
        })?;

        self.write_inst_header(inst.ty, Opcode::ICmp, 3)?;
        self.write_operand(scope, lhs)?;
        self.write_predicate_operand(wire);
        self.write_operand(scope, rhs)
    }

    /// One `Unimplemented` operand holding the instruction's text.
    fn encode_unimplemented(
        &mut self,
        scope: &FunctionScope<'p>,
        id: InstId,
    ) -> Result<(), EncodeError> {
        let program = self.program;
        let text = inst_to_string(program, id);
        trace!(
            target: TRACE_TARGET,
            function = scope.name,
            inst = %text,
            "unimplemented instruction"
        );
        self.stats.unimplemented_instructions += 1;

        self.write_inst_header(program.inst(id).ty, Opcode::Unimplemented, 1)?;
        self.write_unimplemented_operand(&text)
    }
}
