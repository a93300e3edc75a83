//! Converter index.
//!
//! Pair-indexed converter lists plus the pair-agnostic global converters.
//! Pure data: locking and cache invalidation belong to the service.

use std::collections::VecDeque;
use std::sync::Arc;

use morph_types::TypeDescriptor;
use rustc_hash::FxHashMap;

use crate::converter::{ConversionService, GenericConverter};
use crate::error::{ConversionError, ConversionResult};
use crate::hierarchy::class_hierarchy;
use crate::pair::ConvertiblePair;

/// Converters registered for one exact pair, most recent first.
#[derive(Default)]
struct ConvertersForPair {
    converters: VecDeque<Arc<dyn GenericConverter>>,
}

impl ConvertersForPair {
    fn add(&mut self, converter: Arc<dyn GenericConverter>) {
        self.converters.push_front(converter);
    }

    fn find(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> Option<Arc<dyn GenericConverter>> {
        self.converters
            .iter()
            .find(|converter| matches(converter.as_ref(), source_type, target_type, service))
            .cloned()
    }

    fn describe(&self) -> String {
        let names: Vec<String> = self.converters.iter().map(|c| c.name()).collect();
        names.join(", ")
    }
}

fn matches(
    converter: &dyn GenericConverter,
    source_type: &TypeDescriptor,
    target_type: &TypeDescriptor,
    service: &dyn ConversionService,
) -> bool {
    converter
        .as_conditional()
        .is_none_or(|conditional| {
            conditional.matches(source_type, target_type, service)
        })
}

#[derive(Default)]
pub(crate) struct Converters {
    global: Vec<Arc<dyn GenericConverter>>,
    by_pair: FxHashMap<ConvertiblePair, ConvertersForPair>,
}

impl Converters {
    /// Index a converter under each declared pair, or as a global converter
    /// when it declares none.
    pub(crate) fn add(&mut self, converter: Arc<dyn GenericConverter>) -> ConversionResult<()> {
        match converter.convertible_types() {
            None => {
                if converter.as_conditional().is_none() {
                    return Err(ConversionError::invalid_state(format!(
                        "Only conditional converters may return no convertible types: {}",
                        converter.name()
                    )));
                }
                if !self.global.iter().any(|g| Arc::ptr_eq(g, &converter)) {
                    self.global.push(converter);
                }
            }
            Some(pairs) => {
                for pair in pairs {
                    self.by_pair
                        .entry(pair)
                        .or_default()
                        .add(Arc::clone(&converter));
                }
            }
        }
        Ok(())
    }

    /// Drop the whole list for an exact pair.
    pub(crate) fn remove(&mut self, pair: &ConvertiblePair) -> bool {
        self.by_pair.remove(pair).is_some()
    }

    /// Walk the candidate pairs, then the global converters.
    pub(crate) fn find(
        &self,
        source_type: &TypeDescriptor,
        target_type: &TypeDescriptor,
        service: &dyn ConversionService,
    ) -> Option<Arc<dyn GenericConverter>> {
        let source_candidates = class_hierarchy(source_type.ty());
        let target_candidates = class_hierarchy(target_type.ty());
        for source_candidate in &source_candidates {
            for target_candidate in &target_candidates {
                let pair = ConvertiblePair::new(source_candidate.clone(), target_candidate.clone());
                let Some(list) = self.by_pair.get(&pair) else {
                    continue;
                };
                if let Some(converter) = list.find(source_type, target_type, service) {
                    tracing::trace!(%pair, converter = %converter.name(), "matched pair");
                    return Some(converter);
                }
            }
        }
        self.global
            .iter()
            .find(|converter| matches(converter.as_ref(), source_type, target_type, service))
            .cloned()
    }

    /// One line per registered pair, sorted.
    pub(crate) fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .by_pair
            .iter()
            .map(|(pair, list)| format!("{pair} : {}", list.describe()))
            .collect();
        lines.extend(self.global.iter().map(|g| format!("global : {}", g.name())));
        lines.sort();
        lines
    }

    pub(crate) fn pair_count(&self) -> usize {
        self.by_pair.len()
    }
}
