use super::*;
use morph_core::ConversionService;
use morph_types::Value;
use pretty_assertions::assert_eq;

#[test]
fn test_default_service_lists_builtins() {
    let service = default_service().unwrap_or_else(|e| panic!("{e}"));
    let listing = service.to_string();
    assert!(listing.starts_with("ConversionService converters =\n"));
    assert!(listing.contains("\tString -> Number : StringToNumberConverterFactory\n"));
    assert!(listing.contains("\tObject -> Object : IdToEntityConverter, ObjectToObjectConverter\n"));
    assert!(listing.contains("\tNumber -> String : ObjectToStringConverter\n"));
}

#[test]
fn test_disabled_groups_are_not_registered() {
    let config = ConversionConfig {
        fallback_to_string: false,
        optional_converters: false,
        ..ConversionConfig::default()
    };
    let service = service_with_config(&config).unwrap_or_else(|e| panic!("{e}"));
    assert!(!service.to_string().contains("FallbackObjectToStringConverter"));
    assert!(!service.can_convert_classes(Some(&classes::string()), &classes::optional()));

    let full = default_service().unwrap_or_else(|e| panic!("{e}"));
    assert!(full.can_convert_classes(Some(&classes::string()), &classes::optional()));
}

#[test]
fn test_scalars_only() {
    let config = ConversionConfig {
        collection_converters: false,
        byte_buffer_converters: false,
        convention_converters: false,
        fallback_to_string: false,
        optional_converters: false,
        ..ConversionConfig::default()
    };
    let service = service_with_config(&config).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        service.convert_to_class(&Value::string("8"), &classes::long()).ok(),
        Some(Value::Long(8))
    );
    assert!(!service.can_convert_classes(Some(&classes::string()), &classes::list()));
}

#[test]
fn test_registering_twice_prefers_latest() {
    let service = default_service().unwrap_or_else(|e| panic!("{e}"));
    let pairs = service.pair_count();
    add_default_converters(&service).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(service.pair_count(), pairs);
}
