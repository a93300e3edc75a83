//! Adapters from the developer-facing strategies to `GenericConverter`.

use std::sync::Arc;

use morph_types::{TypeDescriptor, Value};

use crate::converter::{
    ConditionalConverter, ConversionService, Converter, ConverterFactory, GenericConverter,
};
use crate::error::ConversionResult;
use crate::pair::ConvertiblePair;
use crate::service::convert_null_source;

/// A `Converter` plus its resolved source and target types.
pub(crate) struct ConverterAdapter {
    converter: Arc<dyn Converter>,
    pair: ConvertiblePair,
    target_type: TypeDescriptor,
}

impl ConverterAdapter {
    pub(crate) fn new(
        converter: Arc<dyn Converter>,
        source_type: &TypeDescriptor,
        target_type: TypeDescriptor,
    ) -> Self {
        ConverterAdapter {
            converter,
            pair: ConvertiblePair::new(source_type.ty().clone(), target_type.ty().clone()),
            target_type,
        }
    }
}

impl GenericConverter for ConverterAdapter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![self.pair.clone()])
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> ConversionResult {
        if source.is_null() {
            return Ok(convert_null_source(target_type));
        }
        self.converter.convert(source)
    }

    fn name(&self) -> String {
        self.converter.name()
    }
}

impl ConditionalConverter for ConverterAdapter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        // Exact declared target only, never a supertype slot.
        if *self.pair.target() != target_type.object_type() {
            return false;
        }
        if target_type.has_generics()
            && !self.target_type.is_assignable_to(target_type)
            && !self.target_type.has_unresolved_generics()
        {
            return false;
        }
        self.converter
            .as_conditional()
            .is_none_or(|conditional| {
                conditional.matches(source_type, target_type, service)
            })
    }
}

/// A `ConverterFactory` plus its declared source and target family.
pub(crate) struct ConverterFactoryAdapter {
    factory: Arc<dyn ConverterFactory>,
    pair: ConvertiblePair,
}

impl ConverterFactoryAdapter {
    pub(crate) fn new(factory: Arc<dyn ConverterFactory>, pair: ConvertiblePair) -> Self {
        ConverterFactoryAdapter { factory, pair }
    }
}

impl GenericConverter for ConverterFactoryAdapter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![self.pair.clone()])
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> ConversionResult {
        if source.is_null() {
            return Ok(convert_null_source(target_type));
        }
        self.factory
            .converter(&target_type.object_type())?
            .convert(source)
    }

    fn name(&self) -> String {
        self.factory.name()
    }
}

impl ConditionalConverter for ConverterFactoryAdapter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        if let Some(conditional) = self.factory.as_conditional() {
            if !conditional.matches(source_type, target_type, service) {
                return false;
            }
        }
        // A factory that cannot serve this target does not match it.
        match self.factory.converter(&target_type.object_type()) {
            Ok(converter) => converter.as_conditional().is_none_or(|conditional| {
                conditional.matches(source_type, target_type, service)
            }),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests;
