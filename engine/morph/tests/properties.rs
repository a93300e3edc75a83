//! Property tests over text round trips through the default service.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use morph::{classes, default_service, ConversionService, TypeDescriptor, Value};
use proptest::prelude::*;

fn list_of_integers() -> TypeDescriptor {
    TypeDescriptor::collection(&classes::list(), Some(TypeDescriptor::value_of(&classes::integer())))
}

proptest! {
    #[test]
    fn long_text_round_trip(n in any::<i64>()) {
        let service = default_service().unwrap();
        let text = service.convert_to_class(&Value::Long(n), &classes::string()).unwrap();
        let back = service.convert_to_class(&text, &classes::long()).unwrap();
        prop_assert_eq!(back, Value::Long(n));
    }

    #[test]
    fn integer_list_round_trip(items in proptest::collection::vec(any::<i32>(), 0..16)) {
        let service = default_service().unwrap();
        let list = Value::list(items.iter().copied().map(Value::Int).collect());
        let text = service.convert_to_class(&list, &classes::string()).unwrap();
        let back = service.convert_to(&text, &list_of_integers()).unwrap();
        prop_assert_eq!(back.elements().unwrap(), list.elements().unwrap());
    }

    #[test]
    fn boolean_keywords_ignore_case(word in prop::sample::select(vec!["true", "on", "yes", "1"]), upper in any::<bool>()) {
        let service = default_service().unwrap();
        let text = if upper { word.to_uppercase() } else { word.to_string() };
        let parsed = service.convert_to_class(&Value::string(text), &classes::boolean()).unwrap();
        prop_assert_eq!(parsed, Value::Bool(true));
    }

    #[test]
    fn narrowing_never_panics(n in any::<i64>()) {
        let service = default_service().unwrap();
        let result = service.convert_to_class(&Value::Long(n), &classes::byte());
        let fits = i8::try_from(n).is_ok();
        prop_assert_eq!(result.is_ok(), fits);
    }
}
