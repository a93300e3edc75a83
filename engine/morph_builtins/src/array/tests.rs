use super::*;
use crate::default_service;
use morph_core::{ConversionError, GenericConversionService};
use morph_types::Class;
use pretty_assertions::assert_eq;

fn service() -> GenericConversionService {
    default_service().unwrap_or_else(|e| panic!("{e}"))
}

fn strings(items: &[&str]) -> Value {
    Value::array(classes::string(), items.iter().map(|s| Value::string(*s)).collect())
}

fn list_of(element: &Class) -> TypeDescriptor {
    TypeDescriptor::collection(&classes::list(), Some(TypeDescriptor::value_of(element)))
}

#[test]
fn test_array_to_list() {
    let service = service();
    let result = service.convert(
        &strings(&["a"]),
        Some(&TypeDescriptor::value_of(&classes::string().array_of())),
        &list_of(&classes::string()),
    );
    assert_eq!(result.ok(), Some(Value::list(vec![Value::string("a")])));
}

#[test]
fn test_array_to_typed_set_converts_and_dedupes() {
    let service = service();
    let target = TypeDescriptor::collection(&classes::set(), Some(TypeDescriptor::value_of(&classes::integer())));
    let result = service.convert_to(&strings(&["1", "2", "1"]), &target);
    assert_eq!(
        result.ok(),
        Some(Value::collection(
            classes::linked_hash_set(),
            vec![Value::Int(1), Value::Int(2)]
        ))
    );
}

#[test]
fn test_primitive_array_to_list() {
    let service = service();
    let ints = Value::array(classes::prim_int(), vec![Value::Int(1), Value::Int(2)]);
    let result = service.convert_to(&ints, &list_of(&classes::long()));
    assert_eq!(result.ok(), Some(Value::list(vec![Value::Long(1), Value::Long(2)])));
}

#[test]
fn test_collection_to_primitive_array() {
    let service = service();
    let list = Value::list(vec![Value::string("4"), Value::string("5")]);
    let result = service.convert_to_class(&list, &classes::prim_int().array_of());
    assert_eq!(
        result.ok(),
        Some(Value::array(classes::prim_int(), vec![Value::Int(4), Value::Int(5)]))
    );
}

#[test]
fn test_null_element_into_primitive_array_fails() {
    let service = service();
    let list = Value::list(vec![Value::Null]);
    let result = service.convert_to_class(&list, &classes::prim_int().array_of());
    assert!(matches!(result, Err(ConversionError::ConversionFailed { .. })));
}

#[test]
fn test_array_to_array_bypass_returns_source() {
    let service = service();
    let source = strings(&["a"]);
    let result = service.convert_to_class(&source, &classes::object().array_of());
    assert!(matches!(result, Ok(ref v) if v.same(&source)));
}

#[test]
fn test_array_to_array_copies_when_elements_have_a_converter() {
    let service = service();
    let source = Value::array(classes::integer(), vec![Value::Int(1)]);
    let result = service.convert_to_class(&source, &classes::number().array_of());
    match result {
        Ok(ref v) => {
            assert!(!v.same(&source));
            assert_eq!(v.elements(), Some(&[Value::Int(1)][..]));
        }
        Err(e) => panic!("{e}"),
    }

    let result = service.convert_to_class(&source, &classes::string().array_of());
    assert_eq!(result.ok(), Some(strings(&["1"])));
}

#[test]
fn test_array_string_round_trip() {
    let service = service();
    let joined = service.convert_to_class(&strings(&["a", "b"]), &classes::string());
    assert!(matches!(joined, Ok(ref v) if v.as_str() == Some("a,b")));
    let split = service.convert_to_class(&Value::string("a, b"), &classes::string().array_of());
    assert_eq!(split.ok(), Some(strings(&["a", "b"])));
    let empty = service.convert_to_class(&Value::string(""), &classes::integer().array_of());
    assert_eq!(empty.ok(), Some(Value::array(classes::integer(), vec![])));
}

#[test]
fn test_array_to_single_object() {
    let service = service();
    let first = service.convert_to_class(&strings(&["9", "8"]), &classes::integer());
    assert!(matches!(first, Ok(Value::Int(9))));
    let none = service.convert_to_class(&strings(&[]), &classes::integer());
    assert!(matches!(none, Ok(Value::Null)));
}

#[test]
fn test_object_to_single_element_array() {
    let service = service();
    let result = service.convert_to_class(&Value::Int(3), &classes::string().array_of());
    assert_eq!(result.ok(), Some(strings(&["3"])));
}

#[test]
fn test_missing_target_element_type() {
    let service = service();
    let result = CollectionToArrayConverter.convert(
        &Value::list(vec![]),
        &TypeDescriptor::value_of(&classes::array_list()),
        &TypeDescriptor::value_of(&classes::object()),
        &service,
    );
    assert!(matches!(result, Err(ConversionError::InvalidState(ref m)) if m == "No target element type"));
}
