use crate::{ProgramError, TypeData, TypeId, Types};

#[test]
fn well_known_types_are_preinterned() {
    let mut types = Types::new();

    assert_eq!(types.int(1), TypeId::I1);
    assert_eq!(types.int(8), TypeId::I8);
    assert_eq!(types.int(32), TypeId::I32);
    assert_eq!(types.int(64), TypeId::I64);
    assert_eq!(types.ptr(0), TypeId::PTR);
    assert!(types.is_void(TypeId::VOID));
    assert_eq!(types.len(), 6);
}

#[test]
fn literal_types_deduplicate_by_shape() {
    let mut types = Types::new();

    let a = types.literal_struct(vec![TypeId::I32, TypeId::PTR], false);
    let b = types.literal_struct(vec![TypeId::I32, TypeId::PTR], false);
    let packed = types.literal_struct(vec![TypeId::I32, TypeId::PTR], true);

    assert_eq!(a, b);
    assert_ne!(a, packed);
}

#[test]
fn named_structs_are_identified_by_name() {
    let mut types = Types::new();

    let a = types.declare_struct("Node");
    let b = types.declare_struct("Node");
    let other = types.declare_struct("Leaf");

    assert_eq!(a, b);
    assert_ne!(a, other);
    assert_eq!(types.named("Node"), Some(a));
    assert_eq!(types.named("Missing"), None);
}

#[test]
fn named_struct_body_may_point_to_itself() {
    let mut types = Types::new();
    let node = types.declare_struct("Node");

    types
        .set_struct_body(node, vec![TypeId::I64, TypeId::PTR], false)
        .unwrap();

    let TypeData::Struct(s) = types.get(node) else {
        panic!("expected a struct");
    };
    assert!(!s.opaque);
    assert_eq!(s.fields, vec![TypeId::I64, TypeId::PTR]);
}

#[test]
fn named_struct_cannot_contain_itself_by_value() {
    let mut types = Types::new();
    let node = types.declare_struct("Node");
    let arr = types.array(node, 2);

    let err = types.set_struct_body(node, vec![arr], false).unwrap_err();

    assert!(matches!(err, ProgramError::RecursiveStruct(name) if name == "Node"));
}

#[test]
fn struct_fields_must_have_storage() {
    let mut types = Types::new();
    let s = types.declare_struct("S");
    let f = types.func(vec![], TypeId::VOID, false);

    assert!(types.set_struct_body(s, vec![TypeId::VOID], false).is_err());
    assert!(types.set_struct_body(s, vec![f], false).is_err());
}

#[test]
fn body_of_literal_struct_is_rejected() {
    let mut types = Types::new();
    let lit = types.literal_struct(vec![TypeId::I8], false);

    let err = types.set_struct_body(lit, vec![], false).unwrap_err();

    assert!(matches!(err, ProgramError::NotANamedStruct(_)));
}

#[test]
fn function_subtypes_list_return_first() {
    let mut types = Types::new();
    let f = types.func(vec![TypeId::I32, TypeId::PTR], TypeId::I64, false);

    assert_eq!(types.subtypes(f), vec![TypeId::I64, TypeId::I32, TypeId::PTR]);
}

#[test]
fn scalar_types_have_no_subtypes() {
    let types = Types::new();

    assert!(types.subtypes(TypeId::I32).is_empty());
    assert!(types.subtypes(TypeId::PTR).is_empty());
    assert!(types.subtypes(TypeId::VOID).is_empty());
}

#[test]
fn aggregate_subtypes() {
    let mut types = Types::new();
    let s = types.literal_struct(vec![TypeId::I8, TypeId::I32], false);
    let a = types.array(s, 3);

    assert_eq!(types.subtypes(s), vec![TypeId::I8, TypeId::I32]);
    assert_eq!(types.subtypes(a), vec![s]);
}
