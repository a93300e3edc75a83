//! Enum conversions by constant name and by ordinal.

use std::sync::Arc;

use morph_core::{
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, Converter,
    ConverterFactory, ConvertiblePair,
};
use morph_types::{classes, Class, TypeDescriptor, Value};

use crate::util::{declared, enum_type, string_of};

/// Declines when an interface the source enum implements is itself
/// convertible to the target, so converters registered for that interface
/// are not shadowed by the generic enum rendering.
fn no_interface_converts(
    source_type: &TypeDescriptor,
    target_type: &TypeDescriptor,
    service: &dyn ConversionService,
) -> bool {
    !source_type
        .ty()
        .all_interfaces()
        .iter()
        .any(|interface| service.can_convert(Some(&TypeDescriptor::value_of(interface)), target_type))
}

/// Looks up enum constants by name. Empty strings become null.
pub struct StringToEnumConverterFactory;

struct StringToEnum {
    enum_class: Class,
}

impl Converter for StringToEnum {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::string(), &self.enum_class)
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let text = string_of(source)?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        let name = text.trim();
        Value::enum_constant(&self.enum_class, name).ok_or_else(|| {
            ConversionError::invalid_argument(format!(
                "No enum constant {}.{name}",
                self.enum_class
            ))
        })
    }
}

impl ConverterFactory for StringToEnumConverterFactory {
    fn convertible_type(&self) -> Option<ConvertiblePair> {
        Some(ConvertiblePair::new(classes::string(), classes::enum_base()))
    }

    fn converter(&self, target: &Class) -> ConversionResult<Arc<dyn Converter>> {
        Ok(Arc::new(StringToEnum {
            enum_class: enum_type(target)?,
        }))
    }
}

/// Looks up enum constants by ordinal.
pub struct IntegerToEnumConverterFactory;

struct IntegerToEnum {
    enum_class: Class,
}

impl Converter for IntegerToEnum {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::integer(), &self.enum_class)
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let Value::Int(ordinal) = *source else {
            return Err(ConversionError::invalid_state(format!(
                "Expected an integer, got [{source}]"
            )));
        };
        usize::try_from(ordinal)
            .ok()
            .and_then(|ordinal| Value::enum_at(&self.enum_class, ordinal))
            .ok_or_else(|| {
                ConversionError::invalid_argument(format!(
                    "Ordinal {ordinal} out of range for {} with {} constants",
                    self.enum_class,
                    self.enum_class.enum_constants().len()
                ))
            })
    }
}

impl ConverterFactory for IntegerToEnumConverterFactory {
    fn convertible_type(&self) -> Option<ConvertiblePair> {
        Some(ConvertiblePair::new(classes::integer(), classes::enum_base()))
    }

    fn converter(&self, target: &Class) -> ConversionResult<Arc<dyn Converter>> {
        Ok(Arc::new(IntegerToEnum {
            enum_class: enum_type(target)?,
        }))
    }
}

/// Renders an enum constant as its name.
pub struct EnumToStringConverter;

impl Converter for EnumToStringConverter {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::enum_base(), &classes::string())
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        source
            .enum_name()
            .map(Value::string)
            .ok_or_else(|| ConversionError::invalid_state(format!("Not an enum constant: [{source}]")))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for EnumToStringConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        no_interface_converts(source_type, target_type, service)
    }
}

/// Renders an enum constant as its ordinal.
pub struct EnumToIntegerConverter;

impl Converter for EnumToIntegerConverter {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::enum_base(), &classes::integer())
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let Value::Enum { ordinal, .. } = *source else {
            return Err(ConversionError::invalid_state(format!(
                "Not an enum constant: [{source}]"
            )));
        };
        i32::try_from(ordinal).map(Value::Int).map_err(ConversionError::other)
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for EnumToIntegerConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        no_interface_converts(source_type, target_type, service)
    }
}

#[cfg(test)]
mod tests;
