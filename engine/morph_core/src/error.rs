//! Conversion errors.
//!
//! Every failure surfaces synchronously as a `ConversionError`; the engine
//! never retries and never hands back a value of the wrong type.

use std::fmt::Display;

use morph_types::{BoxError, TypeDescriptor, Value};

/// Result of a conversion step.
pub type ConversionResult<T = Value> = Result<T, ConversionError>;

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A matched converter failed while converting.
    #[error(
        "Failed to convert from type [{}] to type [{target_type}] for value [{}]: {cause}",
        describe(.source_type),
        describe(.value)
    )]
    ConversionFailed {
        source_type: Option<TypeDescriptor>,
        target_type: TypeDescriptor,
        value: Option<Value>,
        #[source]
        cause: Box<ConversionError>,
    },

    /// No converter applies and the source is not assignable to the target.
    #[error(
        "No converter found capable of converting from type [{}] to type [{target_type}]",
        describe(.source_type)
    )]
    ConverterNotFound {
        source_type: Option<TypeDescriptor>,
        target_type: TypeDescriptor,
    },

    /// Caller broke a contract (wrong instance, unresolvable registration).
    #[error("{0}")]
    InvalidArgument(String),

    /// Internal invariant violated.
    #[error("{0}")]
    InvalidState(String),

    /// Error raised by application code, such as a parse failure.
    #[error("{0}")]
    Other(BoxError),
}

fn describe<T: Display>(item: &Option<T>) -> String {
    match item {
        Some(item) => item.to_string(),
        None => "null".to_string(),
    }
}

impl ConversionError {
    pub fn failed(
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
        value: &Value,
        cause: ConversionError,
    ) -> Self {
        ConversionError::ConversionFailed {
            source_type: source_type.cloned(),
            target_type: target_type.clone(),
            value: (!value.is_null()).then(|| value.clone()),
            cause: Box::new(cause),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ConversionError::InvalidArgument(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ConversionError::InvalidState(message.into())
    }

    pub fn other(error: impl Into<BoxError>) -> Self {
        ConversionError::Other(error.into())
    }

    /// The wrapped cause of a `ConversionFailed`.
    pub fn cause(&self) -> Option<&ConversionError> {
        match self {
            ConversionError::ConversionFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
