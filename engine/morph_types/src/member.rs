//! Declared conversion members.
//!
//! There is no runtime reflection to discover `toX()` methods, `valueOf`
//! factories or constructors, so applications declare the members they want
//! the convention-based converters to see. A class without declared members
//! never matches those converters.

use std::fmt;
use std::sync::Arc;

use crate::class::Class;
use crate::value::Value;

/// Error type raised by user code invoked through a member.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Callable behind a member. Instance methods receive the receiver first.
pub type Invoker = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// A named method declared on a class.
#[derive(Clone)]
pub struct Method {
    name: String,
    is_static: bool,
    params: Vec<Class>,
    returns: Class,
    invoker: Invoker,
}

impl Method {
    /// An instance method taking no arguments besides the receiver.
    pub fn instance<F>(name: impl Into<String>, returns: Class, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Method {
            name: name.into(),
            is_static: false,
            params: Vec::new(),
            returns,
            invoker: Arc::new(move |args: &[Value]| match args.first() {
                Some(receiver) => f(receiver),
                None => Err("missing receiver".into()),
            }),
        }
    }

    /// A static method taking exactly one argument.
    pub fn static_unary<F>(name: impl Into<String>, param: Class, returns: Class, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Method {
            name: name.into(),
            is_static: true,
            params: vec![param],
            returns,
            invoker: Arc::new(move |args: &[Value]| match args {
                [arg] => f(arg),
                _ => Err(format!("expected 1 argument, got {}", args.len()).into()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn params(&self) -> &[Class] {
        &self.params
    }

    pub fn returns(&self) -> &Class {
        &self.returns
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, BoxError> {
        (self.invoker)(args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(Class::name).collect();
        write!(
            f,
            "{}{}({}) -> {}",
            if self.is_static { "static " } else { "" },
            self.name,
            params.join(", "),
            self.returns
        )
    }
}

/// A single-argument constructor declared on a class.
#[derive(Clone)]
pub struct Constructor {
    params: Vec<Class>,
    invoker: Invoker,
}

impl Constructor {
    pub fn unary<F>(param: Class, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Constructor {
            params: vec![param],
            invoker: Arc::new(move |args: &[Value]| match args {
                [arg] => f(arg),
                _ => Err(format!("expected 1 argument, got {}", args.len()).into()),
            }),
        }
    }

    pub fn params(&self) -> &[Class] {
        &self.params
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, BoxError> {
        (self.invoker)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(Class::name).collect();
        write!(f, "new({})", params.join(", "))
    }
}
