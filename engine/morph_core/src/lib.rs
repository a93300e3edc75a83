//! Converter registry and resolution for the morph conversion engine.
//!
//! # Architecture
//!
//! - `converter`: the strategy traits and the service/registry surfaces
//! - `adapter`: lifts `Converter` and `ConverterFactory` into
//!   `GenericConverter`
//! - `registry`: the pair index and global converter list
//! - `hierarchy`: candidate class ordering, which fixes precedence
//! - `cache`: memoized resolutions, negative results included
//! - `service`: `GenericConversionService`, tying the above together

mod adapter;
mod cache;
mod converter;
mod error;
mod hierarchy;
mod pair;
mod registry;
mod service;

pub use cache::CacheStats;
pub use converter::{
    converter_fn, short_type_name, ConditionalConverter, ConversionService, Converter,
    ConverterFactory, ConverterRegistry, FnConverter, GenericConverter,
};
pub use error::{ConversionError, ConversionResult};
pub use hierarchy::class_hierarchy;
pub use pair::ConvertiblePair;
pub use service::{convert_null_source, GenericConversionService};

#[cfg(test)]
mod test_support;
