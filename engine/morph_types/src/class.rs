//! Runtime class handles.
//!
//! A `Class` is the raw type of a conversion slot. The engine needs a small
//! slice of what a reflective host would offer: identity, the superclass
//! chain, directly implemented interfaces, array wrapping, enum constants and
//! primitive boxing. Everything else about a type lives outside this crate.
//!
//! # Design
//!
//! Defined classes are shared `Arc<ClassDef>` handles compared by pointer
//! identity, so two classes with the same name are still distinct types.
//! Array classes are structural: `Integer[]` built twice is the same class,
//! which mirrors how a runtime hands out one array class per component.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use smallvec::SmallVec;

use crate::classes;
use crate::member::{Constructor, Method};
use crate::value::Value;

/// What sort of type a class definition describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Primitive,
}

/// Shared definition behind a non-array `Class`.
pub struct ClassDef {
    name: String,
    kind: ClassKind,
    superclass: Option<Class>,
    interfaces: Vec<Class>,
    constants: Vec<String>,
    wrapper: Option<Class>,
    members: RwLock<Members>,
}

#[derive(Default)]
struct Members {
    methods: Vec<Method>,
    constructors: Vec<Constructor>,
}

/// Handle to a runtime class. Cheap to clone.
#[derive(Clone)]
pub struct Class(Repr);

#[derive(Clone)]
enum Repr {
    Defined(Arc<ClassDef>),
    Array(Arc<Class>),
}

impl Class {
    fn from_def(def: ClassDef) -> Self {
        Class(Repr::Defined(Arc::new(def)))
    }

    fn def(&self) -> Option<&ClassDef> {
        match &self.0 {
            Repr::Defined(def) => Some(def),
            Repr::Array(_) => None,
        }
    }

    /// Fully qualified name; arrays render as `Component[]`.
    pub fn name(&self) -> String {
        match &self.0 {
            Repr::Defined(def) => def.name.clone(),
            Repr::Array(component) => format!("{}[]", component.name()),
        }
    }

    /// Name without its package prefix.
    pub fn simple_name(&self) -> String {
        match &self.0 {
            Repr::Defined(def) => match def.name.rfind('.') {
                Some(dot) => def.name[dot + 1..].to_string(),
                None => def.name.clone(),
            },
            Repr::Array(component) => format!("{}[]", component.simple_name()),
        }
    }

    pub fn kind(&self) -> ClassKind {
        self.def().map_or(ClassKind::Class, |def| def.kind)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.0, Repr::Array(_))
    }

    pub fn is_interface(&self) -> bool {
        self.kind() == ClassKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == ClassKind::Enum
    }

    pub fn is_primitive(&self) -> bool {
        self.kind() == ClassKind::Primitive
    }

    /// Component class of an array class.
    pub fn component(&self) -> Option<&Class> {
        match &self.0 {
            Repr::Array(component) => Some(component),
            Repr::Defined(_) => None,
        }
    }

    /// The array class whose component is `self`.
    #[must_use]
    pub fn array_of(&self) -> Class {
        Class(Repr::Array(Arc::new(self.clone())))
    }

    /// Direct superclass.
    ///
    /// `None` for `Object`, interfaces and primitives. Arrays extend `Object`.
    pub fn superclass(&self) -> Option<Class> {
        match &self.0 {
            Repr::Defined(def) => def.superclass.clone(),
            Repr::Array(_) => Some(classes::object()),
        }
    }

    /// Directly implemented interfaces, in declaration order.
    ///
    /// For an interface these are the interfaces it extends.
    pub fn interfaces(&self) -> Vec<Class> {
        match &self.0 {
            Repr::Defined(def) => def.interfaces.clone(),
            Repr::Array(_) => vec![classes::serializable()],
        }
    }

    /// Interfaces implemented by this class and its superclasses.
    ///
    /// An interface yields itself. Superinterfaces of the collected interfaces
    /// are not expanded.
    pub fn all_interfaces(&self) -> Vec<Class> {
        if self.is_interface() {
            return vec![self.clone()];
        }
        let mut found: Vec<Class> = Vec::new();
        let mut current = Some(self.clone());
        while let Some(class) = current {
            for ifc in class.interfaces() {
                if !found.contains(&ifc) {
                    found.push(ifc);
                }
            }
            current = class.superclass();
        }
        found
    }

    /// Enum constant names in ordinal order. Empty for non-enums.
    pub fn enum_constants(&self) -> &[String] {
        match self.def() {
            Some(def) => &def.constants,
            None => &[],
        }
    }

    /// Ordinal of the named constant.
    pub fn enum_ordinal(&self, name: &str) -> Option<usize> {
        self.enum_constants().iter().position(|c| c == name)
    }

    /// The wrapper class for a primitive, otherwise `self`.
    #[must_use]
    pub fn boxed(&self) -> Class {
        self.def()
            .and_then(|def| def.wrapper.clone())
            .unwrap_or_else(|| self.clone())
    }

    /// Whether a value of class `other` can be stored in a slot of `self`.
    ///
    /// Reflexive. Follows the superclass chain and implemented interfaces.
    /// `Object` accepts every reference type. Arrays are covariant over
    /// reference components and exact over primitive components. No boxing.
    pub fn is_assignable_from(&self, other: &Class) -> bool {
        if self == other {
            return true;
        }
        if self.is_primitive() || other.is_primitive() {
            return false;
        }
        if let Some(other_component) = other.component() {
            return match self.component() {
                Some(component) => {
                    !component.is_primitive()
                        && !other_component.is_primitive()
                        && component.is_assignable_from(other_component)
                }
                None => *self == classes::object() || *self == classes::serializable(),
            };
        }
        if self.is_array() {
            return false;
        }
        if *self == classes::object() {
            return true;
        }
        other.ancestors().iter().any(|ancestor| ancestor == self)
    }

    /// Assignability that also accepts a primitive/wrapper pairing.
    pub fn is_assignable_with_boxing(&self, other: &Class) -> bool {
        if self.is_assignable_from(other) {
            return true;
        }
        if self.is_primitive() {
            return !other.is_primitive() && *other == self.boxed();
        }
        other.is_primitive() && self.is_assignable_from(&other.boxed())
    }

    /// Whether `value` is an instance of this class. `Null` never is.
    pub fn is_instance(&self, value: &Value) -> bool {
        value
            .class()
            .is_some_and(|class| self.is_assignable_from(&class))
    }

    /// Every superclass and interface reachable from `self`, excluding `self`,
    /// nearest first.
    fn ancestors(&self) -> SmallVec<[Class; 8]> {
        let mut out: SmallVec<[Class; 8]> = SmallVec::new();
        let mut cursor = self.clone();
        let mut i = 0;
        loop {
            for next in cursor.superclass().into_iter().chain(cursor.interfaces()) {
                if next != *self && !out.contains(&next) {
                    out.push(next);
                }
            }
            let Some(following) = out.get(i) else {
                break;
            };
            cursor = following.clone();
            i += 1;
        }
        out
    }

    /// Declare a method on this class. Array classes carry no members.
    pub fn declare_method(&self, method: Method) {
        if let Some(def) = self.def() {
            def.members.write().methods.push(method);
        }
    }

    /// Declare a constructor on this class. Array classes carry no members.
    pub fn declare_constructor(&self, constructor: Constructor) {
        if let Some(def) = self.def() {
            def.members.write().constructors.push(constructor);
        }
    }

    /// Methods declared directly on this class.
    pub fn declared_methods(&self) -> Vec<Method> {
        self.def()
            .map(|def| def.members.read().methods.clone())
            .unwrap_or_default()
    }

    /// Find a method by name and exact parameter classes on this class or any
    /// ancestor. Returns the declaring class alongside the method.
    pub fn find_method(&self, name: &str, params: &[Class]) -> Option<(Class, Method)> {
        let mut search = vec![self.clone()];
        search.extend(self.ancestors());
        search.into_iter().find_map(|owner| {
            let found = owner
                .declared_methods()
                .into_iter()
                .find(|m| m.name() == name && m.params() == params);
            found.map(|method| (owner, method))
        })
    }

    /// Find a static method by name and exact parameter classes.
    pub fn find_static_method(&self, name: &str, params: &[Class]) -> Option<Method> {
        self.find_method(name, params)
            .map(|(_, method)| method)
            .filter(Method::is_static)
    }

    /// Find a constructor declared on this class with exact parameter classes.
    pub fn find_constructor(&self, params: &[Class]) -> Option<Constructor> {
        let def = self.def()?;
        let members = def.members.read();
        members
            .constructors
            .iter()
            .find(|c| c.params() == params)
            .cloned()
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Repr::Defined(a), Repr::Defined(b)) => Arc::ptr_eq(a, b),
            (Repr::Array(a), Repr::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Repr::Defined(def) => {
                0u8.hash(state);
                std::ptr::hash(Arc::as_ptr(def), state);
            }
            Repr::Array(component) => {
                1u8.hash(state);
                component.hash(state);
            }
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.name())
    }
}

/// Builder for class, interface and enum definitions.
///
/// ```text
/// let named = ClassBuilder::interface("com.acme.Named").build();
/// let color = ClassBuilder::enumeration("com.acme.Color", ["RED", "GREEN"])
///     .implements(named)
///     .build();
/// ```
pub struct ClassBuilder {
    name: String,
    kind: ClassKind,
    superclass: Option<Class>,
    interfaces: Vec<Class>,
    constants: Vec<String>,
    wrapper: Option<Class>,
}

impl ClassBuilder {
    fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        ClassBuilder {
            name: name.into(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            constants: Vec::new(),
            wrapper: None,
        }
    }

    /// A concrete class extending `Object` unless told otherwise.
    pub fn class(name: impl Into<String>) -> Self {
        let mut builder = Self::new(name, ClassKind::Class);
        builder.superclass = Some(classes::object());
        builder
    }

    /// An interface. Superinterfaces are added with `implements`.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, ClassKind::Interface)
    }

    /// An enum extending `Enum` with the given constants in ordinal order.
    pub fn enumeration<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::new(name, ClassKind::Enum);
        builder.superclass = Some(classes::enum_base());
        builder.constants = constants.into_iter().map(Into::into).collect();
        builder
    }

    pub(crate) fn root(name: &str) -> Self {
        Self::new(name, ClassKind::Class)
    }

    pub(crate) fn primitive(name: &str, wrapper: Class) -> Self {
        let mut builder = Self::new(name, ClassKind::Primitive);
        builder.wrapper = Some(wrapper);
        builder
    }

    #[must_use]
    pub fn extends(mut self, superclass: Class) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: Class) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn build(self) -> Class {
        Class::from_def(ClassDef {
            name: self.name,
            kind: self.kind,
            superclass: self.superclass,
            interfaces: self.interfaces,
            constants: self.constants,
            wrapper: self.wrapper,
            members: RwLock::new(Members::default()),
        })
    }
}
