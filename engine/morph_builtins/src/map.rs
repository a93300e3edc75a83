//! Map to map conversion.

use morph_core::{
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, ConvertiblePair,
    GenericConverter,
};
use morph_types::{classes, TypeDescriptor, Value};

use crate::util::{can_convert_elements, create_map, pair};

/// Map to map, converting keys and values the target declares types for.
///
/// The source itself is returned when it is already an instance of the
/// target class and no key or value changed identity.
pub struct MapToMapConverter;

fn convert_slot(
    value: &Value,
    source_slot: Option<TypeDescriptor>,
    target_slot: Option<&TypeDescriptor>,
    service: &dyn ConversionService,
) -> ConversionResult {
    match target_slot {
        None => Ok(value.clone()),
        Some(target) => service.convert(value, source_slot.as_ref(), target),
    }
}

impl GenericConverter for MapToMapConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::map(), &classes::map())])
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
        let entries = source.entries().ok_or_else(|| {
            ConversionError::invalid_state(format!("Expected a map, got [{source}]"))
        })?;
        let mut copy_required = !target_type.ty().is_instance(source);
        if !copy_required && entries.is_empty() {
            return Ok(source.clone());
        }
        let mut converted = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let target_key = convert_slot(key, source_type.map_key_for(key), target_type.map_key(), service)?;
            let target_value = convert_slot(
                value,
                source_type.map_value_for(value),
                target_type.map_value(),
                service,
            )?;
            copy_required |= !target_key.same(key) || !target_value.same(value);
            converted.push((target_key, target_value));
        }
        if copy_required {
            create_map(target_type.ty(), converted)
        } else {
            Ok(source.clone())
        }
    }
}

impl ConditionalConverter for MapToMapConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        can_convert_elements(source_type.map_key(), target_type.map_key(), service)
            && can_convert_elements(source_type.map_value(), target_type.map_value(), service)
    }
}
