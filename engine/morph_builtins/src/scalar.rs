//! String, character, boolean and UUID scalars.

use morph_core::{ConversionError, ConversionResult, Converter};
use morph_types::{classes, TypeDescriptor, Value};
use uuid::Uuid;

use crate::util::{declared, string_of};

/// Renders any value through its display form. Registered explicitly for
/// each source class it serves.
pub struct ObjectToStringConverter;

impl Converter for ObjectToStringConverter {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::object(), &classes::string())
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        Ok(Value::string(source.to_string()))
    }
}

/// Single-character strings to `Character`. Empty strings become null.
pub struct StringToCharacterConverter;

impl Converter for StringToCharacterConverter {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::string(), &classes::character())
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let text = string_of(source)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Value::Null),
            (Some(c), None) => Ok(Value::Char(c)),
            (Some(_), Some(_)) => Err(ConversionError::invalid_argument(format!(
                "Can only convert a [String] with length of 1 to a [Character]; string value '{text}' has length of {}",
                text.chars().count()
            ))),
        }
    }
}

const TRUE_VALUES: [&str; 4] = ["true", "on", "yes", "1"];
const FALSE_VALUES: [&str; 4] = ["false", "off", "no", "0"];

/// Case-insensitive boolean words. Blank strings become null.
pub struct StringToBooleanConverter;

impl Converter for StringToBooleanConverter {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::string(), &classes::boolean())
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let text = string_of(source)?;
        let word = text.trim().to_lowercase();
        if word.is_empty() {
            Ok(Value::Null)
        } else if TRUE_VALUES.contains(&word.as_str()) {
            Ok(Value::Bool(true))
        } else if FALSE_VALUES.contains(&word.as_str()) {
            Ok(Value::Bool(false))
        } else {
            Err(ConversionError::invalid_argument(format!(
                "Invalid boolean value '{text}'"
            )))
        }
    }
}

/// Parses UUID text. Blank strings become null.
pub struct StringToUuidConverter;

impl Converter for StringToUuidConverter {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::string(), &classes::uuid())
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let text = string_of(source)?.trim();
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Uuid::parse_str(text)
            .map(Value::Uuid)
            .map_err(ConversionError::other)
    }
}
