use super::*;
use crate::default_service;
use morph_core::GenericConversionService;
use pretty_assertions::assert_eq;

fn service() -> GenericConversionService {
    default_service().unwrap_or_else(|e| panic!("{e}"))
}

#[test]
fn test_stream_to_array() {
    let service = service();
    let stream = Value::stream(vec![Value::Int(1), Value::Int(2)]);
    let result = service.convert_to_class(&stream, &classes::integer().array_of());
    assert_eq!(
        result.ok(),
        Some(Value::array(classes::integer(), vec![Value::Int(1), Value::Int(2)]))
    );
}

#[test]
fn test_typed_stream_to_string_list() {
    let service = service();
    let stream = Value::stream(vec![Value::Int(3), Value::Int(4)]);
    let source_type = TypeDescriptor::stream(Some(TypeDescriptor::value_of(&classes::integer())));
    let target_type =
        TypeDescriptor::collection(&classes::list(), Some(TypeDescriptor::value_of(&classes::string())));
    let result = service.convert(&stream, Some(&source_type), &target_type);
    assert_eq!(
        result.ok(),
        Some(Value::list(vec![Value::string("3"), Value::string("4")]))
    );
}

#[test]
fn test_collection_to_stream() {
    let service = service();
    let list = Value::list(vec![Value::string("5"), Value::string("6")]);
    let target = TypeDescriptor::stream(Some(TypeDescriptor::value_of(&classes::long())));
    let result = service.convert_to(&list, &target);
    match result {
        Ok(Value::Stream(elements)) => {
            assert_eq!(*elements, vec![Value::Long(5), Value::Long(6)]);
        }
        other => panic!("expected a stream, got {other:?}"),
    }
}

#[test]
fn test_array_to_raw_stream() {
    let service = service();
    let array = Value::array(classes::string(), vec![Value::string("x")]);
    let result = service.convert_to_class(&array, &classes::stream());
    match result {
        Ok(Value::Stream(elements)) => assert_eq!(*elements, vec![Value::string("x")]),
        other => panic!("expected a stream, got {other:?}"),
    }
}

#[test]
fn test_matches_requires_element_conversion() {
    let service = service();
    let source = TypeDescriptor::stream(Some(TypeDescriptor::value_of(&classes::boolean())));
    let target = classes::uuid().array_of();
    assert!(!StreamConverter.matches(&source, &TypeDescriptor::value_of(&target), &service));
}

#[test]
fn test_null_streams_read_as_empty() {
    let service = service();
    let result = service.convert(
        &Value::Null,
        Some(&TypeDescriptor::stream(None)),
        &TypeDescriptor::collection(&classes::list(), None),
    );
    assert_eq!(result.ok(), Some(Value::list(vec![])));

    let result = service.convert(
        &Value::Null,
        Some(&TypeDescriptor::collection(&classes::list(), None)),
        &TypeDescriptor::stream(None),
    );
    match result {
        Ok(Value::Stream(elements)) => assert!(elements.is_empty()),
        other => panic!("expected a stream, got {other:?}"),
    }
}
