//! Conversions whose source or target is a collection.

use morph_core::{
    ConditionalConverter, ConversionResult, ConversionService, ConvertiblePair, GenericConverter,
};
use morph_types::{classes, TypeDescriptor, Value};

use crate::util::{can_convert_elements, comma_split, create_collection, elements_of, pair, string_of};

/// Join converted elements with commas. Null elements render as `null`.
pub(crate) fn join_elements(
    elements: &[Value],
    source_type: &TypeDescriptor,
    target_type: &TypeDescriptor,
    service: &dyn ConversionService,
) -> ConversionResult {
    let mut parts = Vec::with_capacity(elements.len());
    for element in elements {
        let converted = service.convert(element, source_type.element_for(element).as_ref(), target_type)?;
        parts.push(converted.to_string());
    }
    Ok(Value::string(parts.join(",")))
}

/// Collection to collection.
///
/// The source itself is returned when it is already an instance of the
/// target class and no element changed identity during conversion.
pub struct CollectionToCollectionConverter;

impl GenericConverter for CollectionToCollectionConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::collection(), &classes::collection())])
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
        let mut copy_required = !target_type.ty().is_instance(source);
        if !copy_required && elements.is_empty() {
            return Ok(source.clone());
        }
        let Some(element_type) = target_type.element() else {
            if !copy_required {
                return Ok(source.clone());
            }
            return create_collection(target_type.ty(), elements.to_vec());
        };
        let mut converted = Vec::with_capacity(elements.len());
        for element in elements {
            let target = service.convert(element, source_type.element_for(element).as_ref(), element_type)?;
            copy_required |= !target.same(element);
            converted.push(target);
        }
        if copy_required {
            create_collection(target_type.ty(), converted)
        } else {
            Ok(source.clone())
        }
    }
}

impl ConditionalConverter for CollectionToCollectionConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(source_type.element(), target_type.element(), service)
    }
}

/// Collection to a comma-delimited string. Empty collections give `""`.
pub struct CollectionToStringConverter;

impl GenericConverter for CollectionToStringConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::collection(), &classes::string())])
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

impl ConditionalConverter for CollectionToStringConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        service.can_convert(source_type.element(), target_type)
    }
}

/// Comma-delimited string to a collection; fields are trimmed, and
/// converted when the target declares an element type.
pub struct StringToCollectionConverter;

impl GenericConverter for StringToCollectionConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::string(), &classes::collection())])
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
        let fields = comma_split(string_of(source)?);
        let elements = match target_type.element() {
            None => fields
                .into_iter()
                .map(|field| Value::string(field.trim()))
                .collect(),
            Some(element_type) => fields
                .into_iter()
                .map(|field| service.convert(&Value::string(field.trim()), Some(source_type), element_type))
                .collect::<ConversionResult<Vec<_>>>()?,
        };
        create_collection(target_type.ty(), elements)
    }
}

impl ConditionalConverter for StringToCollectionConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        let Some(element) = target_type.element() else {
            return true;
        };
        service.can_convert(Some(source_type), element)
    }
}

/// Collection to a single object: the first element, converted.
pub struct CollectionToObjectConverter;

impl GenericConverter for CollectionToObjectConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::collection(), &classes::object())])
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

impl ConditionalConverter for CollectionToObjectConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(source_type.element(), Some(target_type), service)
    }
}

/// Single object to a one-element collection.
pub struct ObjectToCollectionConverter;

impl GenericConverter for ObjectToCollectionConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::object(), &classes::collection())])
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
        let element = match target_type.element() {
            Some(element_type) if !element_type.is_collection() => {
                service.convert(source, Some(source_type), element_type)?
            }
            _ => source.clone(),
        };
        create_collection(target_type.ty(), vec![element])
    }
}

impl ConditionalConverter for ObjectToCollectionConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(Some(source_type), target_type.element(), service)
    }
}
