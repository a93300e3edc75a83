//! Streams to and from collections and arrays.
//!
//! Streams are materialized, so conversion collects them into a list and
//! delegates to the collection converters. A null stream reads as empty.

use morph_core::{
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, ConvertiblePair,
    GenericConverter,
};
use morph_types::{classes, TypeDescriptor, Value};

use crate::util::{elements_of, pair};

pub struct StreamConverter;

fn is_stream(descriptor: &TypeDescriptor) -> bool {
    classes::stream().is_assignable_from(descriptor.ty())
}

fn collection_of(element: Option<&TypeDescriptor>) -> TypeDescriptor {
    TypeDescriptor::collection(&classes::collection(), element.cloned())
}

impl GenericConverter for StreamConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        let stream = classes::stream();
        let object_array = classes::object().array_of();
        Some(vec![
            pair(&stream, &classes::collection()),
            pair(&stream, &object_array),
            pair(&classes::collection(), &stream),
            pair(&object_array, &stream),
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
        if is_stream(source_type) {
            let elements = if source.is_null() {
                Vec::new()
            } else {
                elements_of(source)?.to_vec()
            };
            let content = Value::list(elements);
            let list_type = TypeDescriptor::collection(&classes::list(), source_type.element().cloned());
            return service.convert(&content, Some(&list_type), target_type);
        }
        if is_stream(target_type) {
            let list_type = TypeDescriptor::collection(&classes::list(), target_type.element().cloned());
            let collected = service.convert(source, Some(source_type), &list_type)?;
            let elements = collected.elements().map(<[Value]>::to_vec).unwrap_or_default();
            return Ok(Value::stream(elements));
        }
        Err(ConversionError::invalid_state("Unexpected source/target types"))
    }
}

impl ConditionalConverter for StreamConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        if is_stream(source_type) {
            service.can_convert(Some(&collection_of(source_type.element())), target_type)
        } else if is_stream(target_type) {
            service.can_convert(Some(source_type), &collection_of(target_type.element()))
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests;
