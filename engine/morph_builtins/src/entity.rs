//! Entity lookup by identifier.
//!
//! A target class that declares a static `find<SimpleName>(id)` method
//! returning the class itself can be produced from anything convertible to
//! the method's parameter type.

use morph_core::{
    ConditionalConverter, ConversionError, ConversionResult, ConversionService, ConvertiblePair,
    GenericConverter,
};
use morph_types::{classes, Class, Method, TypeDescriptor, Value};

use crate::util::pair;

pub struct IdToEntityConverter;

fn finder(entity: &Class) -> Option<Method> {
    let name = format!("find{}", entity.simple_name());
    entity.declared_methods().into_iter().find(|method| {
        method.is_static()
            && method.name() == name
            && method.params().len() == 1
            && method.returns() == entity
    })
}

fn id_type(method: &Method) -> Option<TypeDescriptor> {
    method.params().first().map(TypeDescriptor::value_of)
}

impl GenericConverter for IdToEntityConverter {
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
        service: &dyn ConversionService,
    ) -> ConversionResult {
        if source.is_null() {
            return Ok(Value::Null);
        }
        let Some((method, id_type)) = finder(target_type.ty())
            .and_then(|method| id_type(&method).map(|id_type| (method, id_type)))
        else {
            return Err(ConversionError::invalid_state("No finder method"));
        };
        let id = service.convert(source, Some(source_type), &id_type)?;
        method.invoke(std::slice::from_ref(&id)).map_err(|cause| {
            ConversionError::failed(Some(source_type), target_type, source, ConversionError::other(cause))
        })
    }
}

impl ConditionalConverter for IdToEntityConverter {
    fn matches(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> bool {
        finder(target_type.ty())
            .as_ref()
            .and_then(id_type)
            .is_some_and(|id_type| service.can_convert(Some(source_type), &id_type))
    }
}
