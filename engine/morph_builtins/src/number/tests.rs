use super::*;
use crate::default_service;
use morph_core::GenericConversionService;
use proptest::prelude::*;

fn service() -> GenericConversionService {
    default_service().unwrap_or_else(|e| panic!("{e}"))
}

fn to(service: &GenericConversionService, value: Value, target: &Class) -> ConversionResult {
    service.convert_to_class(&value, target)
}

#[test]
fn test_integral_narrowing_checks_overflow() {
    assert!(matches!(convert_number(&Value::Int(127), &classes::byte()), Ok(Value::Byte(127))));
    assert!(convert_number(&Value::Int(128), &classes::byte()).is_err());
    assert!(convert_number(&Value::Long(i64::from(i32::MAX) + 1), &classes::integer()).is_err());
    assert!(matches!(
        convert_number(&Value::Long(-32768), &classes::short()),
        Ok(Value::Short(-32768))
    ));
}

#[test]
fn test_floating_to_integral_truncates() {
    assert!(matches!(convert_number(&Value::Double(3.7), &classes::integer()), Ok(Value::Int(3))));
    assert!(matches!(convert_number(&Value::Double(-3.7), &classes::long()), Ok(Value::Long(-3))));
    assert!(matches!(convert_number(&Value::Double(f64::NAN), &classes::long()), Ok(Value::Long(0))));
}

#[test]
fn test_instance_of_target_is_kept() {
    let result = convert_number(&Value::Int(5), &classes::number());
    assert!(matches!(result, Ok(Value::Int(5))));
    let result = convert_number(&Value::Int(5), &classes::prim_int());
    assert!(matches!(result, Ok(Value::Int(5))));
}

#[test]
fn test_unsupported_number_target() {
    let custom = morph_types::ClassBuilder::class("test.Fraction")
        .extends(classes::number())
        .build();
    let err = convert_number(&Value::Int(1), &custom);
    assert!(matches!(err, Err(ConversionError::InvalidArgument(ref m)) if m.contains("unsupported target class")));
}

#[test]
fn test_parse_number_strips_whitespace() {
    assert!(matches!(parse_number(" 1 2 ", &classes::integer()), Ok(Value::Int(12))));
    assert!(matches!(parse_number("+7", &classes::long()), Ok(Value::Long(7))));
    assert!(matches!(parse_number("2.5", &classes::double()), Ok(Value::Double(d)) if d == 2.5));
    assert!(matches!(parse_number("2.5", &classes::float()), Ok(Value::Float(f)) if f == 2.5));
}

#[test]
fn test_parse_number_hex() {
    assert!(matches!(parse_number("0x1F", &classes::integer()), Ok(Value::Int(31))));
    assert!(matches!(parse_number("#ff", &classes::short()), Ok(Value::Short(255))));
    assert!(matches!(parse_number("-0X10", &classes::long()), Ok(Value::Long(-16))));
    assert!(parse_number("0xFF", &classes::byte()).is_err());
    assert!(parse_number("0x-5", &classes::integer()).is_err());
    assert!(matches!(
        parse_number("-0x8000000000000000", &classes::long()),
        Ok(Value::Long(i64::MIN))
    ));
}

#[test]
fn test_parse_number_abstract_target() {
    assert!(matches!(parse_number("42", &classes::number()), Ok(Value::Long(42))));
    assert!(matches!(parse_number("4.5", &classes::number()), Ok(Value::Double(d)) if d == 4.5));
    assert!(parse_number("x", &classes::number()).is_err());
}

#[test]
fn test_parse_number_errors() {
    assert!(parse_number("abc", &classes::integer()).is_err());
    assert!(parse_number("300", &classes::byte()).is_err());
    assert!(matches!(
        parse_number("1", &classes::string()),
        Err(ConversionError::InvalidArgument(ref m)) if m == "Cannot convert String [1] to target class [String]"
    ));
}

#[test]
fn test_service_number_conversions() {
    let service = service();
    assert!(matches!(to(&service, Value::Int(65), &classes::long()), Ok(Value::Long(65))));
    assert!(matches!(to(&service, Value::string("65"), &classes::prim_int()), Ok(Value::Int(65))));
    assert!(matches!(to(&service, Value::string(""), &classes::integer()), Ok(Value::Null)));
    assert!(matches!(
        to(&service, Value::string(""), &classes::prim_int()),
        Err(ConversionError::ConversionFailed { .. })
    ));
    assert!(matches!(
        to(&service, Value::string("nope"), &classes::integer()),
        Err(ConversionError::ConversionFailed { .. })
    ));
}

#[test]
fn test_service_character_bridges() {
    let service = service();
    assert!(matches!(to(&service, Value::Int(65), &classes::character()), Ok(Value::Char('A'))));
    assert!(matches!(to(&service, Value::Char('A'), &classes::integer()), Ok(Value::Int(65))));
    assert!(matches!(to(&service, Value::Char('A'), &classes::prim_byte()), Ok(Value::Byte(65))));
    assert!(matches!(
        to(&service, Value::Int(0xD800), &classes::character()),
        Err(ConversionError::ConversionFailed { .. })
    ));
}

#[test]
fn test_character_outside_one_code_unit_fails() {
    let service = service();
    match to(&service, Value::Char('\u{1F600}'), &classes::integer()) {
        Err(ConversionError::ConversionFailed { cause, .. }) => {
            assert!(matches!(*cause, ConversionError::InvalidArgument(_)));
        }
        other => panic!("expected conversion failure, got {other:?}"),
    }
    assert!(matches!(
        to(&service, Value::Char('\u{FFFF}'), &classes::integer()),
        Ok(Value::Int(-1))
    ));
}

#[test]
fn test_same_number_class_is_noop() {
    let service = service();
    let result = to(&service, Value::Int(9), &classes::integer());
    assert!(matches!(result, Ok(Value::Int(9))));
    assert!(service.can_bypass_convert(
        Some(&TypeDescriptor::value_of(&classes::integer())),
        &TypeDescriptor::value_of(&classes::integer()),
    ));
}

proptest! {
    #[test]
    fn prop_int_string_round_trip(n in any::<i32>()) {
        let service = service();
        let text = to(&service, Value::Int(n), &classes::string());
        let back = text.and_then(|t| to(&service, t, &classes::integer()));
        prop_assert!(matches!(back, Ok(Value::Int(m)) if m == n));
    }

    #[test]
    fn prop_widening_never_fails(n in any::<i16>()) {
        prop_assert!(matches!(convert_number(&Value::Short(n), &classes::long()), Ok(Value::Long(m)) if m == i64::from(n)));
        prop_assert!(matches!(convert_number(&Value::Short(n), &classes::double()), Ok(Value::Double(_))));
    }
}
