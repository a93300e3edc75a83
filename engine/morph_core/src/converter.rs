//! Strategy traits.
//!
//! Four converging contracts:
//!
//! - `Converter`: converts one declared source type to one target type
//! - `ConverterFactory`: produces converters for a family of targets
//! - `GenericConverter`: the uniform contract the registry stores; the two
//!   simpler strategies are adapted into it at registration
//! - `ConditionalConverter`: a `matches` predicate layered on the coarse
//!   `(source, target)` class indexing
//!
//! Converters receive the service as a parameter rather than holding a
//! reference to it, so one converter instance can serve any service.

use std::sync::Arc;

use morph_types::{Class, TypeDescriptor, Value};

use crate::error::ConversionResult;
use crate::pair::ConvertiblePair;

/// Last path segment of a type name, used for diagnostics.
pub fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Refines coarse pair matching with a runtime check.
pub trait ConditionalConverter: Send + Sync {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool;
}

/// Uniform converter contract stored by the registry.
pub trait GenericConverter: Send + Sync {
    /// Pairs this converter is indexed under. `None` marks a global
    /// converter, which must then be conditional.
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>>;

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        None
    }

    /// Convert a value known to be an instance of `source_type`.
    fn convert(
        &self,
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> ConversionResult;

    fn name(&self) -> String {
        short_type_name::<Self>()
    }
}

/// A 1:1 converter between two declared types.
pub trait Converter: Send + Sync {
    /// Declared `(source, target)` types. `None` when they cannot be
    /// determined, which makes registration fail.
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)>;

    /// Convert a non-null source value.
    fn convert(&self, source: &Value) -> ConversionResult;

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        None
    }

    fn name(&self) -> String {
        short_type_name::<Self>()
    }
}

/// A 1:N converter: one source type to any subtype of a target family.
pub trait ConverterFactory: Send + Sync {
    /// Declared `(source, target family)` classes.
    fn convertible_type(&self) -> Option<ConvertiblePair>;

    /// A converter producing instances of `target`.
    fn converter(&self, target: &Class) -> ConversionResult<Arc<dyn Converter>>;

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        None
    }

    fn name(&self) -> String {
        short_type_name::<Self>()
    }
}

/// Query and execute surface.
pub trait ConversionService: Send + Sync {
    /// Whether a value of `source_type` can be converted to `target_type`.
    /// An absent source type means a null value, which is always convertible.
    fn can_convert(&self, source_type: Option<&TypeDescriptor>, target_type: &TypeDescriptor)
        -> bool;

    /// Whether conversion would hand back the source unchanged.
    fn can_bypass_convert(
        &self,
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
    ) -> bool;

    /// Convert `source`, described by `source_type`, to `target_type`.
    ///
    /// An absent `source_type` requires a null `source`.
    fn convert(
        &self,
        source: &Value,
        source_type: Option<&TypeDescriptor>,
        target_type: &TypeDescriptor,
    ) -> ConversionResult;

    fn can_convert_classes(&self, source: Option<&Class>, target: &Class) -> bool {
        let source_type = source.map(TypeDescriptor::value_of);
        self.can_convert(source_type.as_ref(), &TypeDescriptor::value_of(target))
    }

    /// Convert to a raw class, describing the source by its runtime class.
    fn convert_to_class(&self, source: &Value, target: &Class) -> ConversionResult {
        self.convert_to(source, &TypeDescriptor::value_of(target))
    }

    /// Convert to a descriptor, describing the source by its runtime class.
    fn convert_to(&self, source: &Value, target_type: &TypeDescriptor) -> ConversionResult {
        let source_type = TypeDescriptor::for_value(source);
        self.convert(source, source_type.as_ref(), target_type)
    }
}

/// Registration surface.
///
/// Every mutation invalidates all memoized resolutions.
pub trait ConverterRegistry {
    /// Register a converter under its declared types.
    fn add_converter(&self, converter: Arc<dyn Converter>) -> ConversionResult<()>;

    /// Register a converter under explicit source and target classes.
    fn add_converter_for(
        &self,
        source: &Class,
        target: &Class,
        converter: Arc<dyn Converter>,
    ) -> ConversionResult<()>;

    fn add_generic_converter(&self, converter: Arc<dyn GenericConverter>) -> ConversionResult<()>;

    fn add_converter_factory(&self, factory: Arc<dyn ConverterFactory>) -> ConversionResult<()>;

    /// Drop every converter registered for exactly this pair.
    fn remove_convertible(&self, source: &Class, target: &Class);
}

/// Converter backed by a closure.
pub struct FnConverter<F> {
    name: String,
    source: TypeDescriptor,
    target: TypeDescriptor,
    f: F,
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&Value) -> ConversionResult + Send + Sync,
{
    fn convertible_type(&self) -> Option<(TypeDescriptor, TypeDescriptor)> {
        Some((self.source.clone(), self.target.clone()))
    }

    fn convert(&self, source: &Value) -> ConversionResult {
        (self.f)(source)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Build a named converter from a closure.
pub fn converter_fn<F>(
    name: impl Into<String>,
    source: TypeDescriptor,
    target: TypeDescriptor,
    f: F,
) -> Arc<dyn Converter>
where
    F: Fn(&Value) -> ConversionResult + Send + Sync + 'static,
{
    Arc::new(FnConverter {
        name: name.into(),
        source,
        target,
        f,
    })
}

