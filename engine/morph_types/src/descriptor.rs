//! Type descriptors: the unit of "what is being converted".
//!
//! A descriptor is a raw class plus the optional generic slots a conversion
//! cares about: the element type of an array, collection, stream or optional,
//! and the key/value types of a map. Descriptors are immutable, compare
//! structurally and are used as resolution cache keys.

use std::fmt;

use crate::class::Class;
use crate::classes;
use crate::value::Value;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    ty: Class,
    element: Option<Box<TypeDescriptor>>,
    key: Option<Box<TypeDescriptor>>,
    value: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Descriptor for a raw class. Arrays get their component as element.
    pub fn value_of(class: &Class) -> Self {
        let element = class
            .component()
            .map(|component| Box::new(TypeDescriptor::value_of(component)));
        TypeDescriptor {
            ty: class.clone(),
            element,
            key: None,
            value: None,
        }
    }

    /// Descriptor for the runtime class of `value`. `None` for `Null`.
    pub fn for_value(value: &Value) -> Option<Self> {
        value.class().map(|class| TypeDescriptor::value_of(&class))
    }

    /// A collection class with an optional element type.
    pub fn collection(class: &Class, element: Option<TypeDescriptor>) -> Self {
        TypeDescriptor {
            ty: class.clone(),
            element: element.map(Box::new),
            key: None,
            value: None,
        }
    }

    /// A map class with optional key and value types.
    pub fn map(class: &Class, key: Option<TypeDescriptor>, value: Option<TypeDescriptor>) -> Self {
        TypeDescriptor {
            ty: class.clone(),
            element: None,
            key: key.map(Box::new),
            value: value.map(Box::new),
        }
    }

    /// An array of `element`.
    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor {
            ty: element.ty.array_of(),
            element: Some(Box::new(element)),
            key: None,
            value: None,
        }
    }

    /// `Optional<inner>`, or a raw `Optional` when `inner` is absent.
    pub fn optional(inner: Option<TypeDescriptor>) -> Self {
        TypeDescriptor::collection(&classes::optional(), inner)
    }

    /// `Stream<element>`, or a raw `Stream` when `element` is absent.
    pub fn stream(element: Option<TypeDescriptor>) -> Self {
        TypeDescriptor::collection(&classes::stream(), element)
    }

    /// The raw class.
    pub fn ty(&self) -> &Class {
        &self.ty
    }

    /// The raw class with primitives boxed.
    pub fn object_type(&self) -> Class {
        self.ty.boxed()
    }

    pub fn name(&self) -> String {
        self.ty.name()
    }

    pub fn is_primitive(&self) -> bool {
        self.ty.is_primitive()
    }

    pub fn is_array(&self) -> bool {
        self.ty.is_array()
    }

    pub fn is_collection(&self) -> bool {
        classes::collection().is_assignable_from(&self.ty)
    }

    pub fn is_map(&self) -> bool {
        classes::map().is_assignable_from(&self.ty)
    }

    /// Element type of an array, collection, stream or optional.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        self.element.as_deref()
    }

    pub fn map_key(&self) -> Option<&TypeDescriptor> {
        self.key.as_deref()
    }

    pub fn map_value(&self) -> Option<&TypeDescriptor> {
        self.value.as_deref()
    }

    /// Element type narrowed to an actual element.
    ///
    /// Without a declared element type the element's own runtime class is
    /// used; `None` only when both are absent.
    pub fn element_for(&self, element: &Value) -> Option<TypeDescriptor> {
        narrow_slot(self.element(), element)
    }

    pub fn map_key_for(&self, key: &Value) -> Option<TypeDescriptor> {
        narrow_slot(self.map_key(), key)
    }

    pub fn map_value_for(&self, value: &Value) -> Option<TypeDescriptor> {
        narrow_slot(self.map_value(), value)
    }

    /// This descriptor with its raw class replaced by the runtime class of
    /// `value`. Generic slots are kept; a `Null` value narrows nothing.
    #[must_use]
    pub fn narrow(&self, value: &Value) -> TypeDescriptor {
        let Some(class) = value.class() else {
            return self.clone();
        };
        let element = match class.component() {
            Some(component) => Some(Box::new(TypeDescriptor::value_of(component))),
            None => self.element.clone(),
        };
        TypeDescriptor {
            ty: class,
            element,
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }

    /// Whether a value described by `self` can be stored in `other`.
    ///
    /// Compares boxed raw classes first, then element types for two arrays or
    /// two collections and key/value types for two maps. A missing nested
    /// type on either side does not restrict assignability.
    pub fn is_assignable_to(&self, other: &TypeDescriptor) -> bool {
        if !other.object_type().is_assignable_from(&self.object_type()) {
            return false;
        }
        let both_arrays = self.is_array() && other.is_array();
        if both_arrays || (self.is_collection() && other.is_collection()) {
            nested_assignable(self.element(), other.element())
        } else if self.is_map() && other.is_map() {
            nested_assignable(self.map_key(), other.map_key())
                && nested_assignable(self.map_value(), other.map_value())
        } else {
            true
        }
    }

    /// Whether a parameterized type is described (arrays do not count).
    pub fn has_generics(&self) -> bool {
        !self.is_array() && (self.element.is_some() || self.key.is_some() || self.value.is_some())
    }

    /// Whether a generic slot the raw class declares is left unresolved.
    pub fn has_unresolved_generics(&self) -> bool {
        if let Some(element) = self.element() {
            if element.has_unresolved_generics() {
                return true;
            }
        }
        if self.is_array() {
            return false;
        }
        let needs_element = self.is_collection()
            || self.ty == classes::stream()
            || self.ty == classes::optional();
        if needs_element && self.element.is_none() {
            return true;
        }
        if self.is_map() {
            return match (self.map_key(), self.map_value()) {
                (Some(key), Some(value)) => {
                    key.has_unresolved_generics() || value.has_unresolved_generics()
                }
                _ => true,
            };
        }
        false
    }
}

fn narrow_slot(declared: Option<&TypeDescriptor>, value: &Value) -> Option<TypeDescriptor> {
    match declared {
        Some(declared) => Some(declared.narrow(value)),
        None => TypeDescriptor::for_value(value),
    }
}

fn nested_assignable(from: Option<&TypeDescriptor>, to: Option<&TypeDescriptor>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => from.is_assignable_to(to),
        _ => true,
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array() {
            return match self.element() {
                Some(element) => write!(f, "{element}[]"),
                None => write!(f, "{}", self.ty),
            };
        }
        write!(f, "{}", self.ty)?;
        match (self.element(), self.map_key(), self.map_value()) {
            (Some(element), _, _) => write!(f, "<{element}>"),
            (None, Some(key), Some(value)) => write!(f, "<{key}, {value}>"),
            (None, Some(key), None) => write!(f, "<{key}, ?>"),
            (None, None, Some(value)) => write!(f, "<?, {value}>"),
            (None, None, None) => Ok(()),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({self})")
    }
}
