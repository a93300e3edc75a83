//! The generic conversion service.
//!
//! Orchestrates cache lookup, hierarchy search, null and identity handling
//! and error translation around the converter index.
//!
//! # Concurrency
//!
//! Registration takes the index write lock, mutates and clears the cache
//! before releasing it. Resolution holds a recursive read lock across the
//! search and the cache insert, so a concurrent mutation can never be
//! followed by a stale insert; conditional converters may call back into
//! the service while it is held. Converters themselves are invoked with no
//! lock held.

use std::fmt;
use std::sync::Arc;

use morph_types::{classes, Class, TypeDescriptor, Value};
use parking_lot::RwLock;

use crate::adapter::{ConverterAdapter, ConverterFactoryAdapter};
use crate::cache::{CacheStats, ResolutionCache, Resolved};
use crate::converter::{
    ConversionService, Converter, ConverterFactory, ConverterRegistry, GenericConverter,
};
use crate::error::{ConversionError, ConversionResult};
use crate::pair::ConvertiblePair;
use crate::registry::Converters;

/// Result of converting a null source: an empty optional for optional
/// targets, otherwise null.
pub fn convert_null_source(target_type: &TypeDescriptor) -> Value {
    if target_type.object_type() == classes::optional() {
        Value::empty_optional()
    } else {
        Value::Null
    }
}

/// Conversion service backed by a mutable converter registry.
///
/// Owned by the application and shared by reference; every instance has an
/// independent registry and cache.
pub struct GenericConversionService {
    converters: RwLock<Converters>,
    cache: ResolutionCache,
}

impl GenericConversionService {
    /// An empty service with no converters registered.
    pub fn new() -> Self {
        GenericConversionService {
            converters: RwLock::new(Converters::default()),
            cache: ResolutionCache::new(),
        }
    }

    /// Hit/miss counters and current size of the resolution cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of distinct pairs with registered converters.
    pub fn pair_count(&self) -> usize {
        self.converters.read().pair_count()
    }

    /// Mutate the index and invalidate the cache under one write lock.
    fn mutate<R>(&self, what: &str, f: impl FnOnce(&mut Converters) -> R) -> R {
        let mut converters = self.converters.write();
        let result = f(&mut converters);
        let dropped = self.cache.clear();
        tracing::debug!(what, dropped, "resolution cache cleared");
        result
    }

    #[tracing::instrument(level = "trace", skip_all, fields(source = %source_type, target = %target_type))]
    fn resolve(&self, source_type: &TypeDescriptor, target_type: &TypeDescriptor) -> Resolved {
        if let Some(hit) = self.cache.get(source_type, target_type) {
            tracing::trace!("cache hit");
            return hit;
        }
        let converters = self.converters.read_recursive();
        let resolved = match converters.find(source_type, target_type, self) {
            Some(converter) => Resolved::Converter(converter),
            None if source_type.is_assignable_to(target_type) => Resolved::NoOp,
            None => {
                tracing::trace!("no converter");
                Resolved::NoMatch
            }
        };
        self.cache.insert(source_type, target_type, resolved.clone());
        resolved
    }

    fn invoke(
        &self,
        converter: &dyn GenericConverter,
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
    ) -> ConversionResult {
        match converter.convert(source, source_type, target_type, self) {
            Ok(result) => Ok(result),
            Err(failed @ ConversionError::ConversionFailed { .. }) => Err(failed),
            Err(cause) => Err(ConversionError::failed(
                Some(source_type),
                target_type,
                source,
                cause,
            )),
        }
    }

    fn converter_not_found(
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
    ) -> ConversionResult {
        if source.is_null() {
            check_not_primitive(Some(source_type), target_type)?;
            return Ok(Value::Null);
        }
        if source_type.is_assignable_to(target_type) && target_type.object_type().is_instance(source) {
            return Ok(source.clone());
        }
        Err(ConversionError::ConverterNotFound {
            source_type: Some(source_type.clone()),
            target_type: target_type.clone(),
        })
    }
}

/// A primitive target never receives null.
fn check_not_primitive(
    source_type: Option<&TypeDescriptor>,
    target_type: &TypeDescriptor,
) -> ConversionResult<()> {
    if target_type.is_primitive() {
        return Err(ConversionError::failed(
            source_type,
            target_type,
            &Value::Null,
            ConversionError::invalid_argument("A null value cannot be assigned to a primitive type"),
        ));
    }
    Ok(())
}

fn handle_result(
    source_type: Option<&TypeDescriptor>,
    target_type: &TypeDescriptor,
    result: Value,
) -> ConversionResult {
    if result.is_null() {
        check_not_primitive(source_type, target_type)?;
    }
    Ok(result)
}

impl Default for GenericConversionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionService for GenericConversionService {
    fn can_convert(&self, source_type: Option<&TypeDescriptor>, target_type: &TypeDescriptor) -> bool {
        match source_type {
            None => true,
            Some(source_type) => !matches!(self.resolve(source_type, target_type), Resolved::NoMatch),
        }
    }

    fn can_bypass_convert(
        &self,
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
    ) -> bool {
        match source_type {
            None => true,
            Some(source_type) => matches!(self.resolve(source_type, target_type), Resolved::NoOp),
        }
    }

    fn convert(
        &self,
        source: &Value,
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
    ) -> ConversionResult {
        let Some(source_type) = source_type else {
            if !source.is_null() {
                return Err(ConversionError::invalid_argument(
                    "Source must be null if the source type is absent",
                ));
            }
            return handle_result(None, target_type, convert_null_source(target_type));
        };
        if !source.is_null() && !source_type.object_type().is_instance(source) {
            return Err(ConversionError::invalid_argument(format!(
                "Source to convert from must be an instance of [{source_type}]; instead it was a [{}]",
                source.class().map_or_else(|| "null".to_string(), |c| c.name())
            )));
        }
        match self.resolve(source_type, target_type) {
            Resolved::Converter(converter) => {
                let result = self.invoke(converter.as_ref(), source, source_type, target_type)?;
                handle_result(Some(source_type), target_type, result)
            }
            Resolved::NoOp => handle_result(Some(source_type), target_type, source.clone()),
            Resolved::NoMatch => Self::converter_not_found(source, source_type, target_type),
        }
    }
}

impl ConverterRegistry for GenericConversionService {
    fn add_converter(&self, converter: Arc<dyn Converter>) -> ConversionResult<()> {
        let Some((source_type, target_type)) = converter.convertible_type() else {
            return Err(ConversionError::invalid_argument(format!(
                "Unable to determine source type and target type for converter [{}]",
                converter.name()
            )));
        };
        self.add_generic_converter(Arc::new(ConverterAdapter::new(
            converter,
            &source_type,
            target_type,
        )))
    }

    fn add_converter_for(
        &self,
        source: &Class,
        target: &Class,
        converter: Arc<dyn Converter>,
    ) -> ConversionResult<()> {
        self.add_generic_converter(Arc::new(ConverterAdapter::new(
            converter,
            &TypeDescriptor::value_of(source),
            TypeDescriptor::value_of(target),
        )))
    }

    fn add_generic_converter(&self, converter: Arc<dyn GenericConverter>) -> ConversionResult<()> {
        let name = converter.name();
        self.mutate("add", |converters| converters.add(converter))?;
        tracing::debug!(converter = %name, "converter registered");
        Ok(())
    }

    fn add_converter_factory(&self, factory: Arc<dyn ConverterFactory>) -> ConversionResult<()> {
        let Some(pair) = factory.convertible_type() else {
            return Err(ConversionError::invalid_argument(format!(
                "Unable to determine source type and target type for converter factory [{}]",
                factory.name()
            )));
        };
        self.add_generic_converter(Arc::new(ConverterFactoryAdapter::new(factory, pair)))
    }

    fn remove_convertible(&self, source: &Class, target: &Class) {
        let pair = ConvertiblePair::new(source.clone(), target.clone());
        let removed = self.mutate("remove", |converters| converters.remove(&pair));
        tracing::debug!(%pair, removed, "convertible removed");
    }
}

impl fmt::Display for GenericConversionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ConversionService converters =")?;
        for line in self.converters.read().describe() {
            writeln!(f, "\t{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for GenericConversionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericConversionService")
            .field("pairs", &self.pair_count())
            .field("cache", &self.cache_stats())
            .finish()
    }
}
