use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_empty_document_enables_everything() {
    assert_eq!(ConversionConfig::from_json("{}").ok(), Some(ConversionConfig::default()));
}

#[test]
fn test_partial_document_keeps_defaults() {
    let config = ConversionConfig::from_json(r#"{ "fallback_to_string": false }"#);
    assert_eq!(
        config.ok(),
        Some(ConversionConfig {
            fallback_to_string: false,
            ..ConversionConfig::default()
        })
    );
}

#[test]
fn test_unknown_fields_are_rejected() {
    let config = ConversionConfig::from_json(r#"{ "time_converters": true }"#);
    assert!(matches!(config, Err(ConversionError::Other(_))));
}

#[test]
fn test_malformed_document() {
    assert!(ConversionConfig::from_json("not json").is_err());
}
