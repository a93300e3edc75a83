//! Type model for the morph conversion engine.
//!
//! - `Class`: identity-compared runtime class handles with superclass,
//!   interface, array and enum structure
//! - `classes`: the well-known classes every conversion speaks about
//! - `TypeDescriptor`: raw class plus generic element/key/value slots
//! - `Value`: the dynamic payload being converted
//! - `member`: methods and constructors declared for convention-based
//!   conversion, standing in for runtime reflection

mod class;
pub mod classes;
mod descriptor;
pub mod member;
mod value;

pub use class::{Class, ClassBuilder, ClassKind};
pub use descriptor::TypeDescriptor;
pub use member::{BoxError, Constructor, Invoker, Method};
pub use value::{Heap, Payload, Value};
