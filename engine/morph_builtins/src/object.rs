//! Convention-based conversion through declared members.
//!
//! For a `(source, target)` class pair the first of these that exists is
//! used:
//!
//! 1. an instance method `to<TargetSimpleName>()` on the source class,
//!    returning something assignable to the target
//! 2. a static `valueOf`, `of` or `from` on the target class taking exactly
//!    the source class
//! 3. a target constructor taking exactly the source class
//!
//! The member found for a target class is remembered and reused as long as
//! it still applies to the source class at hand.

use std::sync::Arc;

use dashmap::DashMap;
use morph_core::{
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, ConvertiblePair,
    GenericConverter,
};
use morph_types::{classes, Class, Constructor, Method, TypeDescriptor, Value};
use rustc_hash::FxBuildHasher;

use crate::util::pair;

const FACTORY_METHODS: [&str; 3] = ["valueOf", "of", "from"];

#[derive(Clone)]
enum Member {
    /// A method with the class it was found on.
    Method { owner: Class, method: Method },
    Constructor(Constructor),
}

impl Member {
    fn applies_to(&self, source: &Class) -> bool {
        match self {
            Member::Method { owner, method } if !method.is_static() => {
                owner.is_assignable_with_boxing(source)
            }
            Member::Method { method, .. } => method.params().first() == Some(source),
            Member::Constructor(constructor) => constructor.params().first() == Some(source),
        }
    }

    fn invoke(&self, source: &Value) -> Result<Value, morph_types::BoxError> {
        let args = std::slice::from_ref(source);
        match self {
            Member::Method { method, .. } => method.invoke(args),
            Member::Constructor(constructor) => constructor.invoke(args),
        }
    }
}

/// Member resolution shared by the convention converters, cached per
/// target class.
#[derive(Default)]
pub struct MemberLookup {
    by_target: DashMap<Class, Member, FxBuildHasher>,
}

impl MemberLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `target` can be produced from `source` through a member.
    pub fn has_conversion_member(&self, target: &Class, source: &Class) -> bool {
        self.member(target, source).is_some()
    }

    fn member(&self, target: &Class, source: &Class) -> Option<Member> {
        if let Some(cached) = self.by_target.get(target) {
            if cached.applies_to(source) {
                return Some(cached.clone());
            }
        }
        let member = to_method(target, source)
            .or_else(|| factory_method(target, source))
            .or_else(|| factory_constructor(target, source))?;
        tracing::trace!(%source, %target, "conversion member resolved");
        self.by_target.insert(target.clone(), member.clone());
        Some(member)
    }
}

fn to_method(target: &Class, source: &Class) -> Option<Member> {
    if *target == classes::string() || *source == classes::string() {
        return None;
    }
    let (owner, method) = source.find_method(&format!("to{}", target.simple_name()), &[])?;
    (!method.is_static() && target.is_assignable_with_boxing(method.returns()))
        .then_some(Member::Method { owner, method })
}

fn factory_method(target: &Class, source: &Class) -> Option<Member> {
    if *target == classes::string() {
        return None;
    }
    let params = [source.clone()];
    FACTORY_METHODS.iter().find_map(|name| {
        target
            .find_static_method(name, &params)
            .map(|method| Member::Method {
                owner: target.clone(),
                method,
            })
    })
}

fn factory_constructor(target: &Class, source: &Class) -> Option<Member> {
    target
        .find_constructor(std::slice::from_ref(source))
        .map(Member::Constructor)
}

/// Converts between arbitrary classes through declared members.
pub struct ObjectToObjectConverter {
    lookup: Arc<MemberLookup>,
}

impl ObjectToObjectConverter {
    pub fn new(lookup: Arc<MemberLookup>) -> Self {
        ObjectToObjectConverter { lookup }
    }
}

impl GenericConverter for ObjectToObjectConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::object(), &classes::object())])
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }

    fn convert(
        &self,
        source: &Value,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> ConversionResult {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let (source_class, target_class) = (source_type.ty(), target_type.ty());
        let Some(member) = self.lookup.member(target_class, source_class) else {
            return Err(ConversionError::invalid_state(format!(
                "No to{simple}() method exists on {source_class}, and no static valueOf/of/from({source_class}) method or {simple}({source_class}) constructor exists on {target_class}.",
                simple = target_class.simple_name()
            )));
        };
        member.invoke(source).map_err(|cause| {
            ConversionError::failed(
                Some(source_type),
                target_type,
                source,
                ConversionError::other(cause),
            )
        })
    }
}

impl ConditionalConverter for ObjectToObjectConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> bool {
        source_type.ty() != target_type.ty()
            && self.lookup.has_conversion_member(target_type.ty(), source_type.ty())
    }
}

/// Renders any value as a string, for sources that are character sequences
/// or can be rebuilt from a string through a declared member.
pub struct FallbackObjectToStringConverter {
    lookup: Arc<MemberLookup>,
}

impl FallbackObjectToStringConverter {
    pub fn new(lookup: Arc<MemberLookup>) -> Self {
        FallbackObjectToStringConverter { lookup }
    }
}

impl GenericConverter for FallbackObjectToStringConverter {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        Some(vec![pair(&classes::object(), &classes::string())])
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        Some(self)
    }

    fn convert(
        &self,
        source: &Value,
        _source_type: &TypeDescriptor,
        _target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> ConversionResult {
        if source.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::string(source.to_string()))
    }
}

impl ConditionalConverter for FallbackObjectToStringConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        _target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> bool {
        let source = source_type.object_type();
        if source == classes::string() {
            return false;
        }
        classes::char_sequence().is_assignable_from(&source)
            || self.lookup.has_conversion_member(&source, &classes::string())
    }
}
