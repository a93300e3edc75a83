//! Numeric conversions: number to number, string to number and the
//! character/number bridges.

use std::sync::Arc;

use morph_core::{
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, Converter,
    ConverterFactory, ConvertiblePair,
};
use morph_types::{classes, Class, TypeDescriptor, Value};

use crate::util::{declared, string_of};

/// Boxed numeric target classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NumberKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl NumberKind {
    fn of(class: &Class) -> Option<Self> {
        let class = class.boxed();
        let kind = if class == classes::byte() {
            NumberKind::Byte
        } else if class == classes::short() {
            NumberKind::Short
        } else if class == classes::integer() {
            NumberKind::Int
        } else if class == classes::long() {
            NumberKind::Long
        } else if class == classes::float() {
            NumberKind::Float
        } else if class == classes::double() {
            NumberKind::Double
        } else {
            return None;
        };
        Some(kind)
    }
}

/// Integral value of a number; floating values truncate and saturate.
fn long_value(number: &Value) -> Option<i64> {
    match *number {
        Value::Byte(n) => Some(i64::from(n)),
        Value::Short(n) => Some(i64::from(n)),
        Value::Int(n) => Some(i64::from(n)),
        Value::Long(n) => Some(n),
        Value::Float(n) => Some(n as i64),
        Value::Double(n) => Some(n as i64),
        _ => None,
    }
}

fn double_value(number: &Value) -> Option<f64> {
    match *number {
        Value::Float(n) => Some(f64::from(n)),
        Value::Double(n) => Some(n),
        _ => long_value(number).map(|n| n as f64),
    }
}

/// Narrowing to 16 bits; floating values go through a 32-bit integer first.
fn short_value(number: &Value) -> Option<i16> {
    match *number {
        Value::Float(n) => Some((n as i32) as i16),
        Value::Double(n) => Some((n as i32) as i16),
        _ => long_value(number).map(|n| n as i16),
    }
}

fn type_name(value: &Value) -> String {
    value.class().map_or_else(|| "null".to_string(), |c| c.name())
}

/// Convert a number to a numeric target class with overflow checks on
/// integral narrowing. Instances of the target are returned as they are.
pub(crate) fn convert_number(number: &Value, target: &Class) -> ConversionResult {
    if target.boxed().is_instance(number) {
        return Ok(number.clone());
    }
    let overflow = || {
        ConversionError::invalid_argument(format!(
            "Could not convert number [{number}] of type [{}] to target class [{target}]: overflow",
            type_name(number)
        ))
    };
    let not_a_number =
        || ConversionError::invalid_argument(format!("Not a number: [{number}]"));
    let Some(kind) = NumberKind::of(target) else {
        return Err(ConversionError::invalid_argument(format!(
            "Could not convert number [{number}] of type [{}] to unsupported target class [{target}]",
            type_name(number)
        )));
    };
    let value = match kind {
        NumberKind::Byte => {
            let n = long_value(number).ok_or_else(not_a_number)?;
            Value::Byte(i8::try_from(n).map_err(|_| overflow())?)
        }
        NumberKind::Short => {
            let n = long_value(number).ok_or_else(not_a_number)?;
            Value::Short(i16::try_from(n).map_err(|_| overflow())?)
        }
        NumberKind::Int => {
            let n = long_value(number).ok_or_else(not_a_number)?;
            Value::Int(i32::try_from(n).map_err(|_| overflow())?)
        }
        NumberKind::Long => Value::Long(long_value(number).ok_or_else(not_a_number)?),
        NumberKind::Float => Value::Float(double_value(number).ok_or_else(not_a_number)? as f32),
        NumberKind::Double => Value::Double(double_value(number).ok_or_else(not_a_number)?),
    };
    Ok(value)
}

fn is_hex_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    digits.starts_with("0x") || digits.starts_with("0X") || digits.starts_with('#')
}

/// Decode a hex literal with an optional leading minus sign and a `0x`,
/// `0X` or `#` prefix.
fn decode_hex(text: &str) -> ConversionResult<i64> {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .or_else(|| rest.strip_prefix('#'))
        .unwrap_or(rest);
    if digits.starts_with(['-', '+']) {
        return Err(ConversionError::invalid_argument(format!(
            "Sign character in wrong position: [{text}]"
        )));
    }
    i64::from_str_radix(&format!("{sign}{digits}"), 16).map_err(ConversionError::other)
}

fn parse_integral<T>(trimmed: &str) -> ConversionResult<T>
where
    T: TryFrom<i64> + std::str::FromStr,
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    if is_hex_number(trimmed) {
        let n = decode_hex(trimmed)?;
        T::try_from(n).map_err(|_| {
            ConversionError::invalid_argument(format!("Value out of range: [{trimmed}]"))
        })
    } else {
        trimmed.parse::<T>().map_err(ConversionError::other)
    }
}

/// Parse text into an instance of a numeric target class.
///
/// All whitespace is removed first. Integral targets accept hex literals.
/// The abstract `Number` target yields a `Long` for integral text and a
/// `Double` otherwise.
pub(crate) fn parse_number(text: &str, target: &Class) -> ConversionResult {
    let trimmed: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let value = match NumberKind::of(target) {
        Some(NumberKind::Byte) => Value::Byte(parse_integral(&trimmed)?),
        Some(NumberKind::Short) => Value::Short(parse_integral(&trimmed)?),
        Some(NumberKind::Int) => Value::Int(parse_integral(&trimmed)?),
        Some(NumberKind::Long) => Value::Long(parse_integral(&trimmed)?),
        Some(NumberKind::Float) => {
            Value::Float(trimmed.parse().map_err(ConversionError::other)?)
        }
        Some(NumberKind::Double) => {
            Value::Double(trimmed.parse().map_err(ConversionError::other)?)
        }
        None if *target == classes::number() => match parse_integral::<i64>(&trimmed) {
            Ok(n) => Value::Long(n),
            Err(_) => Value::Double(trimmed.parse().map_err(ConversionError::other)?),
        },
        None => {
            return Err(ConversionError::invalid_argument(format!(
                "Cannot convert String [{text}] to target class [{target}]"
            )))
        }
    };
    Ok(value)
}

/// Converts between any two number classes.
pub struct NumberToNumberConverterFactory;

struct NumberToNumber {
    target: Class,
}

impl Converter for NumberToNumber {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::number(), &self.target)
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        convert_number(source, &self.target)
    }
}

impl ConverterFactory for NumberToNumberConverterFactory {
    fn convertible_type(&self) -> Option<ConvertiblePair> {
        Some(ConvertiblePair::new(classes::number(), classes::number()))
    }

    fn converter(&self, target: &Class) -> ConversionResult<Arc<dyn Converter>> {
        Ok(Arc::new(NumberToNumber {
            target: target.clone(),
        }))
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }
}

impl ConditionalConverter for NumberToNumberConverterFactory {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> bool {
        source_type != target_type
    }
}

/// Parses strings into any number class. Empty strings become null.
pub struct StringToNumberConverterFactory;

struct StringToNumber {
    target: Class,
}

impl Converter for StringToNumber {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::string(), &self.target)
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let text = string_of(source)?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        parse_number(text, &self.target)
    }
}

impl ConverterFactory for StringToNumberConverterFactory {
    fn convertible_type(&self) -> Option<ConvertiblePair> {
        Some(ConvertiblePair::new(classes::string(), classes::number()))
    }

    fn converter(&self, target: &Class) -> ConversionResult<Arc<dyn Converter>> {
        Ok(Arc::new(StringToNumber {
            target: target.clone(),
        }))
    }
}

/// Converts a character's 16-bit code to any number class.
pub struct CharacterToNumberFactory;

struct CharacterToNumber {
    target: Class,
}

impl Converter for CharacterToNumber {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::character(), &self.target)
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let Value::Char(c) = *source else {
            return Err(ConversionError::invalid_state(format!(
                "Expected a character, got [{source}]"
            )));
        };
        let code = u16::try_from(u32::from(c)).map_err(|_| {
            ConversionError::invalid_argument(format!(
                "Character [{c}] has no single 16-bit code unit"
            ))
        })?;
        convert_number(&Value::Short(code as i16), &self.target)
    }
}

impl ConverterFactory for CharacterToNumberFactory {
    fn convertible_type(&self) -> Option<ConvertiblePair> {
        Some(ConvertiblePair::new(classes::character(), classes::number()))
    }

    fn converter(&self, target: &Class) -> ConversionResult<Arc<dyn Converter>> {
        Ok(Arc::new(CharacterToNumber {
            target: target.clone(),
        }))
    }
}

/// Interprets a number's low 16 bits as a character code.
pub struct NumberToCharacterConverter;

impl Converter for NumberToCharacterConverter {
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        declared(&classes::number(), &classes::character())
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        let code = short_value(source).ok_or_else(|| {
            ConversionError::invalid_state(format!("Expected a number, got [{source}]"))
        })? as u16;
        char::from_u32(u32::from(code)).map(Value::Char).ok_or_else(|| {
            ConversionError::invalid_argument(format!(
                "Code unit 0x{code:04X} of [{source}] is not a character on its own"
            ))
        })
    }
}

#[cfg(test)]
mod tests;
