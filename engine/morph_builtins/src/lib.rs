//! Built-in converter catalogue and the default conversion service.
//!
//! Registration order matters: within one `(source, target)` pair the most
//! recently registered converter is tried first, so later groups override
//! earlier ones where they overlap.
//!
//! 1. scalars (numbers, strings, characters, booleans, enums, UUIDs)
//! 2. arrays, collections, maps and streams
//! 3. `ByteBuffer`
//! 4. declared-member conventions and entity lookup
//! 5. the string fallback
//! 6. `Optional` wrapping

mod array;
mod byte_buffer;
mod collection;
mod config;
mod entity;
mod enums;
mod map;
mod number;
mod object;
mod optional;
mod scalar;
mod stream;
mod util;

use std::sync::Arc;

use morph_core::{ConversionResult, ConverterRegistry, GenericConversionService};
use morph_types::classes;

pub use array::{
    ArrayToArrayConverter, ArrayToCollectionConverter, ArrayToObjectConverter,
    ArrayToStringConverter, CollectionToArrayConverter, ObjectToArrayConverter,
    StringToArrayConverter,
};
pub use byte_buffer::ByteBufferConverter;
pub use collection::{
    CollectionToCollectionConverter, CollectionToObjectConverter, CollectionToStringConverter,
    ObjectToCollectionConverter, StringToCollectionConverter,
};
pub use config::ConversionConfig;
pub use entity::IdToEntityConverter;
pub use enums::{
    EnumToIntegerConverter, EnumToStringConverter, IntegerToEnumConverterFactory,
    StringToEnumConverterFactory,
};
pub use map::MapToMapConverter;
pub use number::{
    CharacterToNumberFactory, NumberToCharacterConverter, NumberToNumberConverterFactory,
    StringToNumberConverterFactory,
};
pub use object::{FallbackObjectToStringConverter, MemberLookup, ObjectToObjectConverter};
pub use optional::ObjectToOptionalConverter;
pub use scalar::{
    ObjectToStringConverter, StringToBooleanConverter, StringToCharacterConverter,
    StringToUuidConverter,
};
pub use stream::StreamConverter;

/// Register the scalar converters.
pub fn add_scalar_converters(registry: &dyn ConverterRegistry) -> ConversionResult<()> {
    let to_string = Arc::new(ObjectToStringConverter);

    registry.add_converter_factory(Arc::new(NumberToNumberConverterFactory))?;
    registry.add_converter_factory(Arc::new(StringToNumberConverterFactory))?;
    registry.add_converter_for(&classes::number(), &classes::string(), to_string.clone())?;

    registry.add_converter(Arc::new(StringToCharacterConverter))?;
    registry.add_converter_for(&classes::character(), &classes::string(), to_string.clone())?;

    registry.add_converter(Arc::new(NumberToCharacterConverter))?;
    registry.add_converter_factory(Arc::new(CharacterToNumberFactory))?;

    registry.add_converter(Arc::new(StringToBooleanConverter))?;
    registry.add_converter_for(&classes::boolean(), &classes::string(), to_string.clone())?;

    registry.add_converter_factory(Arc::new(StringToEnumConverterFactory))?;
    registry.add_converter(Arc::new(EnumToStringConverter))?;

    registry.add_converter_factory(Arc::new(IntegerToEnumConverterFactory))?;
    registry.add_converter(Arc::new(EnumToIntegerConverter))?;

    registry.add_converter(Arc::new(StringToUuidConverter))?;
    registry.add_converter_for(&classes::uuid(), &classes::string(), to_string)?;
    Ok(())
}

/// Register the array, collection, map and stream converters.
pub fn add_collection_converters(registry: &dyn ConverterRegistry) -> ConversionResult<()> {
    registry.add_generic_converter(Arc::new(ArrayToCollectionConverter))?;
    registry.add_generic_converter(Arc::new(CollectionToArrayConverter))?;

    registry.add_generic_converter(Arc::new(ArrayToArrayConverter))?;
    registry.add_generic_converter(Arc::new(CollectionToCollectionConverter))?;
    registry.add_generic_converter(Arc::new(MapToMapConverter))?;

    registry.add_generic_converter(Arc::new(ArrayToStringConverter))?;
    registry.add_generic_converter(Arc::new(StringToArrayConverter))?;

    registry.add_generic_converter(Arc::new(ArrayToObjectConverter))?;
    registry.add_generic_converter(Arc::new(ObjectToArrayConverter))?;

    registry.add_generic_converter(Arc::new(CollectionToStringConverter))?;
    registry.add_generic_converter(Arc::new(StringToCollectionConverter))?;

    registry.add_generic_converter(Arc::new(CollectionToObjectConverter))?;
    registry.add_generic_converter(Arc::new(ObjectToCollectionConverter))?;

    registry.add_generic_converter(Arc::new(StreamConverter))?;
    Ok(())
}

/// Register every built-in converter.
pub fn add_default_converters(registry: &dyn ConverterRegistry) -> ConversionResult<()> {
    add_configured_converters(registry, &ConversionConfig::default())
}

/// Register the built-in converter groups `config` enables, in the
/// canonical order.
pub fn add_configured_converters(
    registry: &dyn ConverterRegistry,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    if config.scalar_converters {
        add_scalar_converters(registry)?;
    }
    if config.collection_converters {
        add_collection_converters(registry)?;
    }
    if config.byte_buffer_converters {
        registry.add_generic_converter(Arc::new(ByteBufferConverter))?;
    }
    let lookup = Arc::new(MemberLookup::new());
    if config.convention_converters {
        registry.add_generic_converter(Arc::new(ObjectToObjectConverter::new(lookup.clone())))?;
        registry.add_generic_converter(Arc::new(IdToEntityConverter))?;
    }
    if config.fallback_to_string {
        registry.add_generic_converter(Arc::new(FallbackObjectToStringConverter::new(lookup)))?;
    }
    if config.optional_converters {
        registry.add_generic_converter(Arc::new(ObjectToOptionalConverter))?;
    }
    tracing::debug!(?config, "built-in converters registered");
    Ok(())
}

/// A service with every built-in converter registered.
pub fn default_service() -> ConversionResult<GenericConversionService> {
    service_with_config(&ConversionConfig::default())
}

/// A service with the built-in groups `config` enables.
pub fn service_with_config(config: &ConversionConfig) -> ConversionResult<GenericConversionService> {
    let service = GenericConversionService::new();
    add_configured_converters(&service, config)?;
    Ok(service)
}

#[cfg(test)]
mod tests;
