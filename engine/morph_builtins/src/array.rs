//! Conversions whose source or target is an array.

use morph_core::{
    ConditionalConverter, ConversionResult, ConversionService, ConvertiblePair, GenericConverter,
};
use morph_types::{classes, TypeDescriptor, Value};

use crate::collection::{join_elements, StringToCollectionConverter};
use crate::util::{
    can_convert_elements, comma_split, create_collection, elements_of, pair, string_of,
    target_element,
};

fn object_array() -> morph_types::Class {
    classes::object().array_of()
}

/// Convert each element into an array of the target element type.
pub(crate) fn to_array(
    elements: &[Value],
    source_type: &TypeDescriptor,
    target_type: &TypeDescriptor,
    service: &dyn ConversionService,
) -> ConversionResult {
    let element_type = target_element(target_type)?;
    let converted = elements
        .iter()
        .map(|element| service.convert(element, source_type.element_for(element).as_ref(), element_type))
        .collect::<ConversionResult<Vec<_>>>()?;
    Ok(Value::array(element_type.ty().clone(), converted))
}

/// Array to a collection, converting elements when the target declares an
/// element type.
pub struct ArrayToCollectionConverter;

impl GenericConverter for ArrayToCollectionConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&object_array(), &classes::collection())])
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
            return Ok(Value::Null);
        }
        let elements = elements_of(source)?;
        let converted = match target_type.element() {
            None => elements.to_vec(),
            Some(element_type) => elements
                .iter()
                .map(|element| {
                    service.convert(element, source_type.element_for(element).as_ref(), element_type)
                })
                .collect::<ConversionResult<Vec<_>>>()?,
        };
        create_collection(target_type.ty(), converted)
    }
}

impl ConditionalConverter for ArrayToCollectionConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(source_type.element(), target_type.element(), service)
    }
}

/// Collection to an array of the target element type.
pub struct CollectionToArrayConverter;

impl GenericConverter for CollectionToArrayConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::collection(), &object_array())])
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
            return Ok(Value::Null);
        }
        to_array(elements_of(source)?, source_type, target_type, service)
    }
}

impl ConditionalConverter for CollectionToArrayConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(source_type.element(), target_type.element(), service)
    }
}

/// Array to array. The source is returned as it is when its elements need
/// no conversion.
pub struct ArrayToArrayConverter;

impl GenericConverter for ArrayToArrayConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&object_array(), &object_array())])
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
            return Ok(Value::Null);
        }
        if let Some(element_type) = target_type.element() {
            if service.can_bypass_convert(source_type.element(), element_type) {
                return Ok(source.clone());
            }
        }
        to_array(elements_of(source)?, source_type, target_type, service)
    }
}

impl ConditionalConverter for ArrayToArrayConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(source_type.element(), target_type.element(), service)
    }
}

/// Array to a comma-delimited string.
pub struct ArrayToStringConverter;

impl GenericConverter for ArrayToStringConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&object_array(), &classes::string())])
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
            return Ok(Value::Null);
        }
        join_elements(elements_of(source)?, source_type, target_type, service)
    }
}

impl ConditionalConverter for ArrayToStringConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        service.can_convert(source_type.element(), target_type)
    }
}

/// Comma-delimited string to an array; fields are trimmed and converted.
pub struct StringToArrayConverter;

impl GenericConverter for StringToArrayConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::string(), &object_array())])
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
            return Ok(Value::Null);
        }
        let element_type = target_element(target_type)?;
        let converted = comma_split(string_of(source)?)
            .into_iter()
            .map(|field| service.convert(&Value::string(field.trim()), Some(source_type), element_type))
            .collect::<ConversionResult<Vec<_>>>()?;
        Ok(Value::array(element_type.ty().clone(), converted))
    }
}

impl ConditionalConverter for StringToArrayConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        StringToCollectionConverter.matches(source_type, target_type, service)
    }
}

/// Array to a single object: the first element, converted.
pub struct ArrayToObjectConverter;

impl GenericConverter for ArrayToObjectConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&object_array(), &classes::object())])
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
            return Ok(Value::Null);
        }
        if source_type.is_assignable_to(target_type) {
            return Ok(source.clone());
        }
        match elements_of(source)?.first() {
            None => Ok(Value::Null),
            Some(first) => service.convert(first, source_type.element_for(first).as_ref(), target_type),
        }
    }
}

impl ConditionalConverter for ArrayToObjectConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(source_type.element(), Some(target_type), service)
    }
}

/// Single object to a one-element array.
pub struct ObjectToArrayConverter;

impl GenericConverter for ObjectToArrayConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::object(), &object_array())])
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
            return Ok(Value::Null);
        }
        let element_type = target_element(target_type)?;
        let element = service.convert(source, Some(source_type), element_type)?;
        Ok(Value::array(element_type.ty().clone(), vec![element]))
    }
}

impl ConditionalConverter for ObjectToArrayConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(Some(source_type), target_type.element(), service)
    }
}

#[cfg(test)]
mod tests;
