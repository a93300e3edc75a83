//! Dynamic values flowing through conversions.
//!
//! # Heap Values
//!
//! Strings, arrays, collections, maps, optionals, streams and opaque objects
//! live behind `Heap<T>`, whose constructor is crate-private. Build them with
//! the factory methods on `Value`:
//!
//! ```text
//! let s = Value::string("hello");
//! let list = Value::list(vec![Value::Int(1)]);
//! let opt = Value::some(Value::Int(42));
//! ```
//!
//! Cloning a heap value shares the allocation, so `Value::same` can answer
//! "is this the very same object" the way reference identity would.

mod heap;

use std::any::Any;
use std::fmt;
use std::num::FpCategory;

use bytes::Bytes;
use uuid::Uuid;

use crate::class::Class;
use crate::classes;

pub use heap::Heap;

/// Payload type of an opaque application object.
pub type Payload = dyn Any + Send + Sync;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// Absence of a value.
    Null,

    // Scalars (inline)
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Uuid(Uuid),
    /// Enum constant, identified by its class and ordinal.
    Enum { class: Class, ordinal: usize },

    // Heap types
    Str(Heap<String>),
    /// Array with an explicit component class.
    Array {
        component: Class,
        elements: Heap<Vec<Value>>,
    },
    /// Collection instance of a concrete collection class.
    Collection {
        class: Class,
        elements: Heap<Vec<Value>>,
    },
    /// Map instance of a concrete map class, in insertion order.
    Map {
        class: Class,
        entries: Heap<Vec<(Value, Value)>>,
    },
    Optional(Option<Heap<Value>>),
    /// Materialized stream of elements.
    Stream(Heap<Vec<Value>>),
    ByteBuffer(Bytes),
    /// Opaque application object of a user-defined class.
    Object { class: Class, data: Heap<Payload> },
}

impl Value {
    // Factory methods

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// The named constant of an enum class.
    pub fn enum_constant(class: &Class, name: &str) -> Option<Self> {
        let ordinal = class.enum_ordinal(name)?;
        Some(Value::Enum {
            class: class.clone(),
            ordinal,
        })
    }

    /// The constant at `ordinal` of an enum class.
    pub fn enum_at(class: &Class, ordinal: usize) -> Option<Self> {
        (ordinal < class.enum_constants().len()).then(|| Value::Enum {
            class: class.clone(),
            ordinal,
        })
    }

    pub fn array(component: Class, elements: Vec<Value>) -> Self {
        Value::Array {
            component,
            elements: Heap::new(elements),
        }
    }

    /// A collection of the given concrete class.
    ///
    /// Set-like classes drop repeated elements, keeping the first occurrence.
    pub fn collection(class: Class, elements: Vec<Value>) -> Self {
        let elements = if classes::set().is_assignable_from(&class) {
            let mut unique: Vec<Value> = Vec::with_capacity(elements.len());
            for element in elements {
                if !unique.contains(&element) {
                    unique.push(element);
                }
            }
            unique
        } else {
            elements
        };
        Value::Collection {
            class,
            elements: Heap::new(elements),
        }
    }

    /// An `ArrayList`.
    pub fn list(elements: Vec<Value>) -> Self {
        Value::collection(classes::array_list(), elements)
    }

    /// A map of the given concrete class. A repeated key replaces the earlier
    /// value in place.
    pub fn map(class: Class, entries: Vec<(Value, Value)>) -> Self {
        let mut unique: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match unique.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => unique.push((key, value)),
            }
        }
        Value::Map {
            class,
            entries: Heap::new(unique),
        }
    }

    pub fn some(value: Value) -> Self {
        Value::Optional(Some(Heap::new(value)))
    }

    pub fn empty_optional() -> Self {
        Value::Optional(None)
    }

    pub fn stream(elements: Vec<Value>) -> Self {
        Value::Stream(Heap::new(elements))
    }

    pub fn byte_buffer(bytes: impl Into<Bytes>) -> Self {
        Value::ByteBuffer(bytes.into())
    }

    /// An opaque object of a user-defined class.
    pub fn object<T: Any + Send + Sync>(class: Class, data: T) -> Self {
        Value::Object {
            class,
            data: Heap::from_arc(std::sync::Arc::new(data)),
        }
    }

    // Accessors

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of an array, collection or stream.
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array { elements, .. }
            | Value::Collection { elements, .. }
            | Value::Stream(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Constant name of an enum value.
    pub fn enum_name(&self) -> Option<&str> {
        match self {
            Value::Enum { class, ordinal } => {
                class.enum_constants().get(*ordinal).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Downcast the payload of an opaque object.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object { data, .. } => (**data).downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Runtime class of the value. `None` for `Null`.
    pub fn class(&self) -> Option<Class> {
        let class = match self {
            Value::Null => return None,
            Value::Bool(_) => classes::boolean(),
            Value::Char(_) => classes::character(),
            Value::Byte(_) => classes::byte(),
            Value::Short(_) => classes::short(),
            Value::Int(_) => classes::integer(),
            Value::Long(_) => classes::long(),
            Value::Float(_) => classes::float(),
            Value::Double(_) => classes::double(),
            Value::Uuid(_) => classes::uuid(),
            Value::Str(_) => classes::string(),
            Value::Optional(_) => classes::optional(),
            Value::Stream(_) => classes::stream(),
            Value::ByteBuffer(_) => classes::byte_buffer(),
            Value::Array { component, .. } => component.array_of(),
            Value::Enum { class, .. }
            | Value::Collection { class, .. }
            | Value::Map { class, .. }
            | Value::Object { class, .. } => class.clone(),
        };
        Some(class)
    }

    /// Reference identity for heap values, equality for scalars.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.ptr_eq(b),
            (
                Value::Array {
                    component: c1,
                    elements: a,
                },
                Value::Array {
                    component: c2,
                    elements: b,
                },
            ) => c1 == c2 && a.ptr_eq(b),
            (Value::Collection { elements: a, .. }, Value::Collection { elements: b, .. })
            | (Value::Stream(a), Value::Stream(b)) => a.ptr_eq(b),
            (Value::Map { entries: a, .. }, Value::Map { entries: b, .. }) => a.ptr_eq(b),
            (Value::Optional(Some(a)), Value::Optional(Some(b))) => a.ptr_eq(b),
            (Value::Object { data: a, .. }, Value::Object { data: b, .. }) => a.ptr_eq(b),
            (Value::ByteBuffer(a), Value::ByteBuffer(b)) => {
                a.as_ptr() == b.as_ptr() && a.len() == b.len()
            }
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (
                Value::Enum {
                    class: c1,
                    ordinal: o1,
                },
                Value::Enum {
                    class: c2,
                    ordinal: o2,
                },
            ) => c1 == c2 && o1 == o2,
            (
                Value::Array {
                    component: c1,
                    elements: a,
                },
                Value::Array {
                    component: c2,
                    elements: b,
                },
            ) => c1 == c2 && a == b,
            (
                Value::Collection {
                    class: c1,
                    elements: a,
                },
                Value::Collection {
                    class: c2,
                    elements: b,
                },
            ) => c1 == c2 && a == b,
            (
                Value::Map {
                    class: c1,
                    entries: a,
                },
                Value::Map {
                    class: c2,
                    entries: b,
                },
            ) => c1 == c2 && a == b,
            (Value::Optional(a), Value::Optional(b)) => a == b,
            (Value::Stream(a), Value::Stream(b)) => a.ptr_eq(b),
            (Value::ByteBuffer(a), Value::ByteBuffer(b)) => a == b,
            (Value::Object { data: a, .. }, Value::Object { data: b, .. }) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Render a floating value the way `toString` on a boxed float does:
/// plain decimal for magnitudes in `[1e-3, 1e7)` and zero, otherwise
/// `d.dddE<n>`.
fn write_floating(
    f: &mut fmt::Formatter<'_>,
    plain: String,
    scientific: String,
    magnitude: f64,
) -> fmt::Result {
    if magnitude.is_nan() {
        return f.write_str("NaN");
    }
    if magnitude.classify() == FpCategory::Zero || (1e-3..1e7).contains(&magnitude) {
        if plain.contains('.') {
            return f.write_str(&plain);
        }
        return write!(f, "{plain}.0");
    }
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    if mantissa.contains('.') {
        write!(f, "{mantissa}E{exponent}")
    } else {
        write!(f, "{mantissa}.0E{exponent}")
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Byte(n) => write!(f, "{n}"),
            Value::Short(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Double(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(x) => write_floating(f, x.to_string(), format!("{x:e}"), f64::from(x.abs())),
            Value::Double(x) => write_floating(f, x.to_string(), format!("{x:e}"), x.abs()),
            Value::Uuid(u) => write!(f, "{}", u.hyphenated()),
            Value::Str(s) => f.write_str(s),
            Value::Enum { .. } => f.write_str(self.enum_name().unwrap_or("?")),
            Value::Array { elements, .. } | Value::Collection { elements, .. } => {
                write_seq(f, "[", elements, "]")
            }
            Value::Map { entries, .. } => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Value::Optional(Some(inner)) => write!(f, "Optional[{}]", **inner),
            Value::Optional(None) => f.write_str("Optional.empty"),
            Value::Stream(elements) => write_seq(f, "Stream[", elements, "]"),
            Value::ByteBuffer(bytes) => write!(f, "ByteBuffer[len={}]", bytes.len()),
            Value::Object { class, data } => {
                if let Some((_, method)) = class.find_method("toString", &[]) {
                    if let Ok(Value::Str(s)) = method.invoke(std::slice::from_ref(self)) {
                        return f.write_str(&s);
                    }
                }
                write!(f, "{}@{:x}", class.name(), data.addr())
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::Char(c) => write!(f, "{c:?}"),
            Value::Array { component, elements } => {
                write!(f, "{component}{:?}", &**elements)
            }
            Value::Collection { class, elements } => write!(f, "{class}{:?}", &**elements),
            Value::Map { class, entries } => write!(f, "{class}{:?}", &**entries),
            Value::Stream(elements) => write!(f, "Stream{:?}", &**elements),
            _ => write!(f, "{self}"),
        }
    }
}
