//! Wrapping values into `Optional`.

use morph_core::{
    ConditionalConverter, ConversionResult, ConversionService, ConvertiblePair, GenericConverter,
};
use morph_types::{classes, TypeDescriptor, Value};

use crate::util::pair;

/// Wraps a value into an `Optional`, converting it to the declared content
/// type first. Null, empty arrays and empty collections become an empty
/// optional; an optional source is passed through.
pub struct ObjectToOptionalConverter;

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array { elements, .. } | Value::Collection { elements, .. } => elements.is_empty(),
        _ => false,
    }
}

impl GenericConverter for ObjectToOptionalConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        let optional = classes::optional();
        Some(vec![
            pair(&classes::collection(), &optional),
            pair(&classes::object().array_of(), &optional),
            pair(&classes::object(), &optional),
        ])
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }

    fn convert(
        &self,
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> ConversionResult {
        if source.is_null() {
            return Ok(Value::empty_optional());
        }
        if matches!(source, Value::Optional(_)) {
            return Ok(source.clone());
        }
        let Some(content_type) = target_type.element() else {
            return Ok(Value::some(source.clone()));
        };
        let target = service.convert(source, Some(source_type), content_type)?;
        if is_empty_container(&target) {
            Ok(Value::empty_optional())
        } else {
            Ok(Value::some(target))
        }
    }
}

impl ConditionalConverter for ObjectToOptionalConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        match target_type.element() {
            Some(content_type) => service.can_convert(Some(source_type), content_type),
            None => true,
        }
    }
}
