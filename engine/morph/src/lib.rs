//! Runtime type conversion between dynamically typed values.
//!
//! A conversion service answers "can a value of type S become a value of
//! type T" and performs the conversion, choosing among registered
//! converters by walking the class hierarchies of both types. Resolutions,
//! negative ones included, are memoized until the registry changes.
//!
//! ```text
//! let service = morph::default_service()?;
//! let target = TypeDescriptor::collection(&classes::list(), Some(TypeDescriptor::value_of(&classes::integer())));
//! let numbers = service.convert_to(&Value::string("1,2,3"), &target)?;
//! ```
//!
//! # Crates
//!
//! - `morph_types`: classes, type descriptors, values and declared members
//! - `morph_core`: converter traits, registry, resolution and the service
//! - `morph_builtins`: the built-in converter catalogue

use std::sync::Once;

pub use morph_builtins::{
    add_collection_converters, add_configured_converters, add_default_converters,
    add_scalar_converters, default_service, service_with_config, ConversionConfig, MemberLookup,
};
pub use morph_core::{
    class_hierarchy, convert_null_source, converter_fn, short_type_name, CacheStats,
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, Converter,
    ConverterFactory, ConverterRegistry, ConvertiblePair, FnConverter, GenericConversionService,
    GenericConverter,
};
pub use morph_types::{
    classes, BoxError, Class, ClassBuilder, ClassKind, Constructor, Heap, Invoker, Method,
    Payload, TypeDescriptor, Value,
};

/// The built-in converters, for registering individually.
pub mod builtins {
    pub use morph_builtins::{
        ArrayToArrayConverter, ArrayToCollectionConverter, ArrayToObjectConverter,
        ArrayToStringConverter, ByteBufferConverter, CharacterToNumberFactory,
        CollectionToArrayConverter, CollectionToCollectionConverter, CollectionToObjectConverter,
        CollectionToStringConverter, EnumToIntegerConverter, EnumToStringConverter,
        FallbackObjectToStringConverter, IdToEntityConverter, IntegerToEnumConverterFactory,
        MapToMapConverter, NumberToCharacterConverter, NumberToNumberConverterFactory,
        ObjectToArrayConverter, ObjectToCollectionConverter, ObjectToObjectConverter,
        ObjectToOptionalConverter, ObjectToStringConverter, StreamConverter,
        StringToArrayConverter, StringToBooleanConverter, StringToCharacterConverter,
        StringToCollectionConverter, StringToEnumConverterFactory, StringToNumberConverterFactory,
        StringToUuidConverter,
    };
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output.
///
/// Only installs a subscriber when `RUST_LOG` is set. Safe to call multiple
/// times. Enable with `RUST_LOG=morph_core=debug` for registry changes or
/// `RUST_LOG=morph_core=trace` for every resolution.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
