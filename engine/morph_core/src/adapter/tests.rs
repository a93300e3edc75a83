use super::*;
use crate::converter::converter_fn;
use crate::error::ConversionError;
use crate::service::GenericConversionService;
use crate::test_support::desc;
use morph_types::classes::{integer, list, long, number, optional, string};
use morph_types::Class;
use pretty_assertions::assert_eq;

fn list_of(element: &Class) -> TypeDescriptor {
    TypeDescriptor::collection(&list(), Some(desc(element)))
}

fn parse_int() -> Arc<dyn Converter> {
    converter_fn("ParseInt", desc(&string()), desc(&integer()), |v| {
        v.as_str()
            .and_then(|s| s.parse::<i32>().ok())
            .map(Value::Int)
            .ok_or_else(|| ConversionError::invalid_argument("not an int"))
    })
}

#[test]
fn test_adapter_requires_exact_target() {
    let service = GenericConversionService::new();
    let adapter = ConverterAdapter::new(parse_int(), &desc(&string()), desc(&integer()));
    assert!(adapter.matches(&desc(&string()), &desc(&integer()), &service));
    assert!(!adapter.matches(&desc(&string()), &desc(&number()), &service));
}

#[test]
fn test_adapter_checks_generic_targets() {
    let service = GenericConversionService::new();
    let split = converter_fn("Split", desc(&string()), list_of(&string()), |_| {
        Ok(Value::list(vec![]))
    });
    let adapter = ConverterAdapter::new(split, &desc(&string()), list_of(&string()));
    assert!(adapter.matches(&desc(&string()), &list_of(&string()), &service));
    assert!(!adapter.matches(&desc(&string()), &list_of(&integer()), &service));
    assert!(adapter.matches(&desc(&string()), &desc(&list()), &service));

    let raw = converter_fn("Raw", desc(&string()), desc(&list()), |_| {
        Ok(Value::list(vec![]))
    });
    let adapter = ConverterAdapter::new(raw, &desc(&string()), desc(&list()));
    assert!(adapter.matches(&desc(&string()), &list_of(&integer()), &service));
}

#[test]
fn test_adapter_null_source() {
    let service = GenericConversionService::new();
    let adapter = ConverterAdapter::new(parse_int(), &desc(&string()), desc(&integer()));
    let result = adapter.convert(&Value::Null, &desc(&string()), &desc(&integer()), &service);
    assert!(matches!(result, Ok(Value::Null)));

    let result = adapter.convert(&Value::Null, &desc(&string()), &desc(&optional()), &service);
    assert!(matches!(result, Ok(Value::Optional(None))));
}

#[test]
fn test_adapter_delegates() {
    let service = GenericConversionService::new();
    let adapter = ConverterAdapter::new(parse_int(), &desc(&string()), desc(&integer()));
    let result = adapter.convert(&Value::string("12"), &desc(&string()), &desc(&integer()), &service);
    assert!(matches!(result, Ok(Value::Int(12))));
    assert_eq!(adapter.name(), "ParseInt");
}

/// Produces converters only for `Integer` targets; the produced converter
/// refuses sources other than `String`.
struct IntegersOnly;

struct FromStringOnly;

impl Converter for FromStringOnly {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        None
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        Ok(Value::Int(source.to_string().len() as i32))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for FromStringOnly {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        _target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> bool {
        *source_type.ty() == string()
    }
}

impl ConverterFactory for IntegersOnly {
    fn convertible_type(&self) -> Option<ConvertiblePair> {
        Some(ConvertiblePair::new(morph_types::classes::object(), number()))
    }

    fn converter(&self, target: &Class) -> ConversionResult<Arc<dyn Converter>> {
        if *target == integer() {
            Ok(Arc::new(FromStringOnly))
        } else {
            Err(ConversionError::invalid_argument("integers only"))
        }
    }
}

#[test]
fn test_factory_adapter_matching() {
    let service = GenericConversionService::new();
    let pair = ConvertiblePair::new(morph_types::classes::object(), number());
    let adapter = ConverterFactoryAdapter::new(Arc::new(IntegersOnly), pair);

    assert!(adapter.matches(&desc(&string()), &desc(&integer()), &service));
    assert!(!adapter.matches(&desc(&long()), &desc(&integer()), &service));
    assert!(!adapter.matches(&desc(&string()), &desc(&long()), &service));
    assert_eq!(adapter.name(), "IntegersOnly");
}

#[test]
fn test_factory_adapter_converts_with_boxed_target() {
    let service = GenericConversionService::new();
    let pair = ConvertiblePair::new(morph_types::classes::object(), number());
    let adapter = ConverterFactoryAdapter::new(Arc::new(IntegersOnly), pair);
    let result = adapter.convert(
        &Value::string("abc"),
        &desc(&string()),
        &desc(&morph_types::classes::prim_int()),
        &service,
    );
    assert!(matches!(result, Ok(Value::Int(3))));
}
