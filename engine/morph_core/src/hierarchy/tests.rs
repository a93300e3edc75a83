use super::*;
use morph_types::classes::{
    array_list, char_sequence, collection, comparable, enum_base, hash_set, integer, iterable,
    linked_hash_set, list, number, object, prim_int, serializable, set, string,
};
use morph_types::ClassBuilder;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn names(classes: &[Class]) -> Vec<String> {
    classes.iter().map(Class::name).collect()
}

#[test]
fn test_integer_hierarchy() {
    assert_eq!(
        class_hierarchy(&integer()),
        vec![integer(), number(), comparable(), serializable(), object()]
    );
}

#[test]
fn test_primitive_is_boxed_first() {
    assert_eq!(class_hierarchy(&prim_int()), class_hierarchy(&integer()));
}

#[test]
fn test_string_hierarchy() {
    assert_eq!(
        class_hierarchy(&string()),
        vec![string(), serializable(), comparable(), char_sequence(), object()]
    );
}

#[test]
fn test_array_hierarchy_rewraps_candidates() {
    assert_eq!(
        names(&class_hierarchy(&integer().array_of())),
        vec![
            "Integer[]",
            "Number[]",
            "Comparable[]",
            "Serializable[]",
            "Object[]",
            "Object"
        ]
    );
}

#[test]
fn test_primitive_array_hierarchy() {
    assert_eq!(
        class_hierarchy(&prim_int().array_of()),
        vec![prim_int().array_of(), object().array_of(), object()]
    );
}

#[test]
fn test_enum_hierarchy() {
    let named = ClassBuilder::interface("test.Named").build();
    let color = ClassBuilder::enumeration("test.Color", ["RED"])
        .implements(named.clone())
        .build();
    assert_eq!(
        class_hierarchy(&color),
        vec![
            color,
            named,
            enum_base(),
            comparable(),
            serializable(),
            object()
        ]
    );
}

#[test]
fn test_enum_base_hierarchy() {
    assert_eq!(
        class_hierarchy(&enum_base()),
        vec![enum_base(), comparable(), serializable(), object()]
    );
}

#[test]
fn test_superclass_inserted_after_candidate() {
    let i1 = ClassBuilder::interface("test.I1").build();
    let i2 = ClassBuilder::interface("test.I2").build();
    let i3 = ClassBuilder::interface("test.I3").build();
    let a = ClassBuilder::class("test.A").implements(i3.clone()).build();
    let b = ClassBuilder::class("test.B")
        .extends(a.clone())
        .implements(i2.clone())
        .build();
    let c = ClassBuilder::class("test.C")
        .extends(b.clone())
        .implements(i1.clone())
        .build();
    assert_eq!(
        class_hierarchy(&c),
        vec![c, b, a, i1, i2, i3, object()]
    );
}

#[test]
fn test_collection_hierarchy() {
    assert_eq!(
        class_hierarchy(&linked_hash_set()),
        vec![
            linked_hash_set(),
            hash_set(),
            set(),
            serializable(),
            collection(),
            iterable(),
            object()
        ]
    );
    assert_eq!(
        class_hierarchy(&array_list()),
        vec![
            array_list(),
            list(),
            serializable(),
            collection(),
            iterable(),
            object()
        ]
    );
}

#[test]
fn test_interface_hierarchy() {
    assert_eq!(
        class_hierarchy(&list()),
        vec![list(), collection(), iterable(), object()]
    );
}

fn arb_class() -> impl Strategy<Value = Class> {
    let base = prop::sample::select(vec![
        integer(),
        string(),
        number(),
        array_list(),
        linked_hash_set(),
        list(),
        enum_base(),
        comparable(),
        object(),
    ]);
    (base, any::<bool>()).prop_map(|(class, wrap)| if wrap { class.array_of() } else { class })
}

proptest! {
    #[test]
    fn prop_starts_with_type_and_ends_with_object(class in arb_class()) {
        let hierarchy = class_hierarchy(&class);
        prop_assert_eq!(hierarchy.first(), Some(&class));
        prop_assert_eq!(hierarchy.last(), Some(&object()));
    }

    #[test]
    fn prop_candidates_are_unique(class in arb_class()) {
        let hierarchy = class_hierarchy(&class);
        let unique: FxHashSet<Class> = hierarchy.iter().cloned().collect();
        prop_assert_eq!(unique.len(), hierarchy.len());
    }

    #[test]
    fn prop_every_candidate_accepts_the_type(class in arb_class()) {
        for candidate in class_hierarchy(&class) {
            prop_assert!(candidate.is_assignable_from(&class));
        }
    }

    #[test]
    fn prop_array_candidates_are_arrays(class in arb_class()) {
        prop_assume!(class.is_array());
        let hierarchy = class_hierarchy(&class);
        let (last, rest) = hierarchy.split_last().unwrap_or_else(|| unreachable!());
        prop_assert_eq!(last, &object());
        for candidate in rest {
            prop_assert!(candidate.is_array());
        }
    }
}
