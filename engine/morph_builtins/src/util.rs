//! Helpers shared by the built-in converters.

use morph_core::{ConversionError, ConversionResult, ConversionService, ConvertiblePair};
use morph_types::{classes, Class, TypeDescriptor, Value};

pub(crate) fn pair(source: &Class, target: &Class) -> ConvertiblePair {
    ConvertiblePair::new(source.clone(), target.clone())
}

/// Declared types for a 1:1 converter.
pub(crate) fn declared(source: &Class, target: &Class) -> Option<(TypeDescriptor, TypeDescriptor)> {
    Some((TypeDescriptor::value_of(source), TypeDescriptor::value_of(target)))
}

/// Whether elements of one container type can become elements of another.
///
/// Unknown element types are optimistic: the per-element conversion decides
/// at runtime. A target element type that merely narrows the source element
/// type is accepted as well.
pub(crate) fn can_convert_elements(
    source_element: Option<&TypeDescriptor>,
    target_element: Option<&TypeDescriptor>,
    service: &dyn ConversionService,
) -> bool {
    let (Some(source), Some(target)) = (source_element, target_element) else {
        return true;
    };
    service.can_convert(Some(source), target) || source.ty().is_assignable_with_boxing(target.ty())
}

/// The enum class `class` is or descends from.
pub(crate) fn enum_type(class: &Class) -> ConversionResult<Class> {
    let mut current = Some(class.clone());
    while let Some(candidate) = current {
        if candidate.is_enum() {
            return Ok(candidate);
        }
        current = candidate.superclass();
    }
    Err(ConversionError::invalid_argument(format!(
        "The target type {class} does not refer to an enum"
    )))
}

/// A collection instance for a target collection class.
///
/// `Set` and `Collection` become `LinkedHashSet`, `List` becomes
/// `ArrayList`; concrete collection classes are used as they are.
pub(crate) fn create_collection(class: &Class, elements: Vec<Value>) -> ConversionResult {
    let concrete = if class.is_interface() {
        if *class == classes::set() || *class == classes::collection() {
            classes::linked_hash_set()
        } else if *class == classes::list() {
            classes::array_list()
        } else {
            return Err(ConversionError::invalid_argument(format!(
                "Unsupported Collection interface: {class}"
            )));
        }
    } else if classes::collection().is_assignable_from(class) {
        class.clone()
    } else {
        return Err(ConversionError::invalid_argument(format!(
            "Unsupported Collection type: {class}"
        )));
    };
    Ok(Value::collection(concrete, elements))
}

/// A map instance for a target map class. `Map` becomes `LinkedHashMap`.
pub(crate) fn create_map(class: &Class, entries: Vec<(Value, Value)>) -> ConversionResult {
    let concrete = if *class == classes::map() {
        classes::linked_hash_map()
    } else if !class.is_interface() && classes::map().is_assignable_from(class) {
        class.clone()
    } else {
        return Err(ConversionError::invalid_argument(format!(
            "Unsupported Map type: {class}"
        )));
    };
    Ok(Value::map(concrete, entries))
}

/// Split a comma-delimited list. Empty input has no fields; empty fields
/// between commas are kept.
pub(crate) fn comma_split(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split(',').collect()
    }
}

/// Element type of a target container, required for building arrays.
pub(crate) fn target_element(target_type: &TypeDescriptor) -> ConversionResult<&TypeDescriptor> {
    target_type
        .element()
        .ok_or_else(|| ConversionError::invalid_state("No target element type"))
}

/// Elements of a container value that the converter was matched for.
pub(crate) fn elements_of(source: &Value) -> ConversionResult<&[Value]> {
    source.elements().ok_or_else(|| {
        ConversionError::invalid_state(format!("Expected an array or collection, got [{source}]"))
    })
}

pub(crate) fn string_of(source: &Value) -> ConversionResult<&str> {
    source
        .as_str()
        .ok_or_else(|| ConversionError::invalid_state(format!("Expected a string, got [{source}]")))
}
