use aotir_core::{ConstantData, FloatKind, Program, TypeId};

use crate::{ConstantTable, GlobalTable, TypeTable};

#[test]
fn registering_twice_returns_the_same_index() {
    let mut program = Program::new();
    let pair = program
        .types_mut()
        .literal_struct(vec![TypeId::I32, TypeId::I64], false);
    let types = program.types();
    let mut table = TypeTable::new();

    let first = table.register(types, pair);
    let len = table.len();
    let second = table.register(types, pair);

    assert_eq!(first, second);
    assert_eq!(table.len(), len);
}

#[test]
fn structurally_equal_constants_share_an_index() {
    let mut table = ConstantTable::new();
    let seven = ConstantData::Int {
        ty: TypeId::I32,
        bits: 7,
    };
    let eight = ConstantData::Int {
        ty: TypeId::I32,
        bits: 8,
    };

    let a = table.index_of(&seven);
    let b = table.index_of(&eight);
    let c = table.index_of(&seven.clone());

    assert_eq!((a, b, c), (0, 1, 0));
    assert_eq!(table.len(), 2);
    assert_eq!(table.position(&eight), Some(1));
    assert_eq!(table.get(0), Some(&seven));
}

#[test]
fn struct_registers_its_fields_after_itself() {
    let mut program = Program::new();
    let types = program.types_mut();
    let inner = types.literal_struct(vec![TypeId::I8, TypeId::PTR], false);
    let outer = types.declare_struct("Outer");
    types
        .set_struct_body(outer, vec![TypeId::I64, inner], false)
        .unwrap();
    let mut table = TypeTable::new();

    let index = table.register(program.types(), outer);

    assert_eq!(index, 0);
    let order: Vec<TypeId> = table.iter().copied().collect();
    assert_eq!(
        order,
        vec![outer, TypeId::I64, inner, TypeId::I8, TypeId::PTR]
    );
}

#[test]
fn function_type_registers_return_then_params() {
    let mut program = Program::new();
    let f64_ty = program.types_mut().float(FloatKind::Double);
    let sig = program
        .types_mut()
        .func(vec![TypeId::PTR, f64_ty], TypeId::I32, false);
    let mut table = TypeTable::new();

    table.register(program.types(), sig);

    let order: Vec<TypeId> = table.iter().copied().collect();
    assert_eq!(order, vec![sig, TypeId::I32, TypeId::PTR, f64_ty]);
}

#[test]
fn shared_subtypes_are_registered_once() {
    let mut program = Program::new();
    let types = program.types_mut();
    let a = types.literal_struct(vec![TypeId::I32, TypeId::I32], false);
    let b = types.array(a, 4);
    let mut table = TypeTable::new();

    table.register(program.types(), b);
    table.register(program.types(), a);

    assert_eq!(table.len(), 3);
    assert_eq!(table.position(&TypeId::I32), Some(2));
}

#[test]
fn global_registers_its_initializer_once() {
    let mut program = Program::new();
    let g = program.add_global("counter", TypeId::I64, false).unwrap();
    let init = program.const_int(TypeId::I64, 42).unwrap();
    program.set_initializer(g, init);
    let mut globals = GlobalTable::new();
    let mut constants = ConstantTable::new();

    let first = globals.register(&program, &mut constants, g);
    let second = globals.register(&program, &mut constants, g);

    assert_eq!((first, second), (0, 0));
    assert_eq!(constants.len(), 1);
    assert_eq!(constants.get(0), Some(program.constant(init)));
}

#[test]
fn global_without_initializer_adds_no_constant() {
    let mut program = Program::new();
    let g = program.add_global("tls", TypeId::I32, true).unwrap();
    let mut globals = GlobalTable::new();
    let mut constants = ConstantTable::new();

    globals.register(&program, &mut constants, g);

    assert_eq!(globals.len(), 1);
    assert!(constants.is_empty());
}
