use crate::{OperandKind, TypeKind};

#[test]
fn operand_kind_from_u8_valid() {
    assert_eq!(OperandKind::from_u8(0), Some(OperandKind::Constant));
    assert_eq!(OperandKind::from_u8(1), Some(OperandKind::LocalVariable));
    assert_eq!(OperandKind::from_u8(2), Some(OperandKind::Type));
    assert_eq!(OperandKind::from_u8(3), Some(OperandKind::Function));
    assert_eq!(OperandKind::from_u8(4), Some(OperandKind::Block));
    assert_eq!(OperandKind::from_u8(5), Some(OperandKind::Arg));
    assert_eq!(OperandKind::from_u8(6), Some(OperandKind::Global));
    assert_eq!(OperandKind::from_u8(7), Some(OperandKind::Predicate));
    assert_eq!(OperandKind::from_u8(255), Some(OperandKind::Unimplemented));
}

#[test]
fn operand_kind_from_u8_invalid() {
    assert_eq!(OperandKind::from_u8(8), None);
    assert_eq!(OperandKind::from_u8(254), None);
}

#[test]
fn type_kind_from_u8() {
    assert_eq!(TypeKind::from_u8(0), Some(TypeKind::Void));
    assert_eq!(TypeKind::from_u8(1), Some(TypeKind::Integer));
    assert_eq!(TypeKind::from_u8(2), Some(TypeKind::Ptr));
    assert_eq!(TypeKind::from_u8(3), Some(TypeKind::Function));
    assert_eq!(TypeKind::from_u8(4), Some(TypeKind::Struct));
    assert_eq!(TypeKind::from_u8(5), None);
    assert_eq!(TypeKind::from_u8(255), Some(TypeKind::Unimplemented));
}

#[test]
fn type_kind_is_aggregate() {
    assert!(TypeKind::Function.is_aggregate());
    assert!(TypeKind::Struct.is_aggregate());
    assert!(!TypeKind::Ptr.is_aggregate());
    assert!(!TypeKind::Integer.is_aggregate());
    assert!(!TypeKind::Unimplemented.is_aggregate());
}
