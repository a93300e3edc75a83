//! Stub converters shared by unit tests.

use std::sync::Arc;

use morph_types::{Class, TypeDescriptor, Value};

use crate::converter::{ConditionalConverter, ConversionService, GenericConverter};
use crate::error::ConversionResult;
use crate::pair::ConvertiblePair;

/// Generic converter that answers with its own name.
pub(crate) struct Stub {
    pub name: &'static str,
    pub pairs: Option<Vec<ConvertiblePair>>,
    pub conditional: bool,
    pub accept: bool,
}

impl Stub {
    pub(crate) fn for_pair(name: &'static str, source: &Class, target: &Class) -> Arc<Self> {
        Arc::new(Stub {
            name,
            pairs: Some(vec![ConvertiblePair::new(source.clone(), target.clone())]),
            conditional: false,
            accept: true,
        })
    }

    pub(crate) fn refusing(name: &'static str, source: &Class, target: &Class) -> Arc<Self> {
        Arc::new(Stub {
            name,
            pairs: Some(vec![ConvertiblePair::new(source.clone(), target.clone())]),
            conditional: true,
            accept: false,
        })
    }

    pub(crate) fn global(name: &'static str) -> Arc<Self> {
        Arc::new(Stub {
            name,
            pairs: None,
            conditional: true,
            accept: true,
        })
    }
}

impl GenericConverter for Stub {
    fn convertible_types(&self) -> Option<Vec<ConvertiblePair>> {
        self.pairs.clone()
    }

    fn as_conditional(&self) -> Option<&dyn ConditionalConverter> {
        self.conditional.then_some(self as &dyn ConditionalConverter)
    }

    fn convert(
        &self,
        _source: &Value,
        _source_type: &TypeDescriptor,
        _target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> ConversionResult {
        Ok(Value::string(self.name))
    }

    fn name(&self) -> String {
        self.name.to_string()
    }
}

impl ConditionalConverter for Stub {
    fn matches(
        &self,
        _source_type: &TypeDescriptor,
        _target_type: &TypeDescriptor,
        _service: &dyn ConversionService,
    ) -> bool {
        self.accept
    }
}

pub(crate) fn desc(class: &Class) -> TypeDescriptor {
    TypeDescriptor::value_of(class)
}
