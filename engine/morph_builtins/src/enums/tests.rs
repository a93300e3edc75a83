use super::*;
use crate::default_service;
use morph_core::{converter_fn, ConverterRegistry, GenericConversionService};
use morph_types::ClassBuilder;
use pretty_assertions::assert_eq;

fn service() -> GenericConversionService {
    default_service().unwrap_or_else(|e| panic!("{e}"))
}

fn color() -> Class {
    ClassBuilder::enumeration("test.Color", ["RED", "GREEN", "BLUE"]).build()
}

fn desc(class: &Class) -> TypeDescriptor {
    TypeDescriptor::value_of(class)
}

#[test]
fn test_string_to_enum() {
    let service = service();
    let color = color();
    let green = service.convert_to_class(&Value::string(" GREEN "), &color);
    assert!(matches!(green, Ok(Value::Enum { ordinal: 1, .. })));
    let empty = service.convert_to_class(&Value::string(""), &color);
    assert!(matches!(empty, Ok(Value::Null)));
    let unknown = service.convert_to_class(&Value::string("PURPLE"), &color);
    match unknown {
        Err(ConversionError::ConversionFailed { cause, .. }) => {
            assert_eq!(cause.to_string(), "No enum constant test.Color.PURPLE");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn test_abstract_enum_target_is_rejected() {
    let service = service();
    let result = service.convert_to_class(&Value::string("RED"), &classes::enum_base());
    assert!(result.is_err());
}

#[test]
fn test_integer_to_enum() {
    let service = service();
    let color = color();
    let blue = service.convert_to_class(&Value::Int(2), &color);
    assert!(matches!(blue, Ok(ref v) if v.enum_name() == Some("BLUE")));
    assert!(service.convert_to_class(&Value::Int(3), &color).is_err());
    assert!(service.convert_to_class(&Value::Int(-1), &color).is_err());
}

#[test]
fn test_enum_to_string_and_integer() {
    let service = service();
    let color = color();
    let red = Value::enum_at(&color, 0).unwrap_or_else(|| panic!("RED"));
    let name = service.convert(&red, Some(&desc(&classes::enum_base())), &desc(&classes::string()));
    assert!(matches!(name, Ok(ref v) if v.as_str() == Some("RED")));
    let ordinal = service.convert_to_class(&red, &classes::integer());
    assert!(matches!(ordinal, Ok(Value::Int(0))));
}

#[test]
fn test_enum_round_trip_by_name() {
    let service = service();
    let color = color();
    for name in color.enum_constants() {
        let value = Value::enum_constant(&color, name).unwrap_or_else(|| panic!("{name}"));
        let text = service.convert_to_class(&value, &classes::string());
        let back = text.and_then(|t| service.convert_to_class(&t, &color));
        assert!(matches!(back, Ok(ref v) if *v == value), "{name}");
    }
}

#[test]
fn test_interface_converter_takes_precedence() {
    let named = ClassBuilder::interface("test.Named").build();
    let shade = ClassBuilder::enumeration("test.Shade", ["DARK"])
        .implements(named.clone())
        .build();
    let service = service();
    let plain = service.convert_to_class(&Value::enum_at(&shade, 0).unwrap_or(Value::Null), &classes::string());
    assert!(matches!(plain, Ok(ref v) if v.as_str() == Some("DARK")));
    assert!(EnumToStringConverter.matches(&desc(&shade), &desc(&classes::string()), &service));

    let registered = service.add_converter(converter_fn(
        "NamedToString",
        desc(&named),
        desc(&classes::string()),
        |_| Ok(Value::string("named")),
    ));
    assert!(registered.is_ok());
    assert!(!EnumToStringConverter.matches(&desc(&shade), &desc(&classes::string()), &service));
    assert!(EnumToStringConverter.matches(&desc(&classes::enum_base()), &desc(&classes::string()), &service));
    let via_interface = service.convert_to_class(&Value::enum_at(&shade, 0).unwrap_or(Value::Null), &classes::string());
    assert!(matches!(via_interface, Ok(ref v) if v.as_str() == Some("named")));
}
