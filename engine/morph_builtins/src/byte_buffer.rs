//! `ByteBuffer` to and from byte arrays and anything convertible to them.

use bytes::Bytes;
use morph_core::{
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, ConvertiblePair,
    GenericConverter,
};
use morph_types::{classes, TypeDescriptor, Value};

use crate::util::{elements_of, pair};

pub struct ByteBufferConverter;

fn byte_array_type() -> TypeDescriptor {
    TypeDescriptor::value_of(&classes::prim_byte().array_of())
}

fn is_byte_buffer(descriptor: &TypeDescriptor) -> bool {
    descriptor.is_assignable_to(&TypeDescriptor::value_of(&classes::byte_buffer()))
}

fn is_byte_array(descriptor: &TypeDescriptor) -> bool {
    descriptor.is_assignable_to(&byte_array_type())
}

/// Copy the buffer's bytes into a fresh `byte[]`.
fn to_byte_array(bytes: &Bytes) -> Value {
    let elements = bytes
        .iter()
        .map(|&b| Value::Byte(i8::from_ne_bytes([b])))
        .collect();
    Value::array(classes::prim_byte(), elements)
}

fn from_byte_array(array: &Value) -> ConversionResult<Bytes> {
    elements_of(array)?
        .iter()
        .map(|element| match *element {
            Value::Byte(b) => Ok(b.to_ne_bytes()[0]),
            _ => Err(ConversionError::invalid_state(format!(
                "Expected a byte, got [{element}]"
            ))),
        })
        .collect::<ConversionResult<Vec<u8>>>()
        .map(Bytes::from)
}

impl ByteBufferConverter {
    fn from_buffer(
        bytes: &Bytes,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> ConversionResult {
        let array = to_byte_array(bytes);
        if is_byte_array(target_type) {
            return Ok(array);
        }
        service.convert(&array, Some(&byte_array_type()), target_type)
    }

    fn to_buffer(
        source: &Value,
        source_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> ConversionResult {
        let array = if matches!(source, Value::Array { component, .. } if *component == classes::prim_byte()) {
            source.clone()
        } else {
            service.convert(source, Some(source_type), &byte_array_type())?
        };
        if array.is_null() {
            return Ok(Value::byte_buffer(Bytes::new()));
        }
        Ok(Value::ByteBuffer(from_byte_array(&array)?))
    }
}

impl GenericConverter for ByteBufferConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        let buffer = classes::byte_buffer();
        let bytes = classes::prim_byte().array_of();
        Some(vec![
            pair(&buffer, &bytes),
            pair(&bytes, &buffer),
            pair(&buffer, &classes::object()),
            pair(&classes::object(), &buffer),
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
        let buffer_target = is_byte_buffer(target_type);
        if let Value::ByteBuffer(bytes) = source {
            return if buffer_target {
                Ok(Value::ByteBuffer(bytes.clone()))
            } else {
                Self::from_buffer(bytes, target_type, service)
            };
        }
        if buffer_target {
            return Self::to_buffer(source, source_type, service);
        }
        if source.is_null() {
            return Ok(Value::Null);
        }
        Err(ConversionError::invalid_state("Unexpected source/target types"))
    }
}

impl ConditionalConverter for ByteBufferConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        let buffer_target = is_byte_buffer(target_type);
        if is_byte_buffer(source_type) {
            return buffer_target
                || is_byte_array(target_type)
                || service.can_convert(Some(&byte_array_type()), target_type);
        }
        buffer_target
            && (is_byte_array(source_type)
                || service.can_convert(Some(source_type), &byte_array_type()))
    }
}
