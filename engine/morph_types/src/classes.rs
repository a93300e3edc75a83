//! Well-known classes.
//!
//! Created once per process on first use. Every accessor returns a clone of
//! the same handle, so identity comparisons against these are stable.

use std::sync::OnceLock;

use crate::class::{Class, ClassBuilder};

struct WellKnown {
    object: Class,
    serializable: Class,
    comparable: Class,
    char_sequence: Class,
    string: Class,
    number: Class,
    byte: Class,
    short: Class,
    integer: Class,
    long: Class,
    float: Class,
    double: Class,
    boolean: Class,
    character: Class,
    prim_byte: Class,
    prim_short: Class,
    prim_int: Class,
    prim_long: Class,
    prim_float: Class,
    prim_double: Class,
    prim_boolean: Class,
    prim_char: Class,
    enum_base: Class,
    iterable: Class,
    collection: Class,
    list: Class,
    set: Class,
    array_list: Class,
    linked_list: Class,
    hash_set: Class,
    linked_hash_set: Class,
    map: Class,
    hash_map: Class,
    linked_hash_map: Class,
    optional: Class,
    stream: Class,
    byte_buffer: Class,
    uuid: Class,
}

fn well_known() -> &'static WellKnown {
    static CLASSES: OnceLock<WellKnown> = OnceLock::new();
    CLASSES.get_or_init(build)
}

fn build() -> WellKnown {
    let object = ClassBuilder::root("Object").build();
    let class = |name: &str| ClassBuilder::root(name).extends(object.clone());
    let interface = ClassBuilder::interface;

    let serializable = interface("Serializable").build();
    let comparable = interface("Comparable").build();
    let char_sequence = interface("CharSequence").build();
    let string = class("String")
        .implements(serializable.clone())
        .implements(comparable.clone())
        .implements(char_sequence.clone())
        .build();

    let number = class("Number").implements(serializable.clone()).build();
    let numeric = |name: &str| {
        ClassBuilder::root(name)
            .extends(number.clone())
            .implements(comparable.clone())
            .build()
    };
    let byte = numeric("Byte");
    let short = numeric("Short");
    let integer = numeric("Integer");
    let long = numeric("Long");
    let float = numeric("Float");
    let double = numeric("Double");
    let boolean = class("Boolean")
        .implements(serializable.clone())
        .implements(comparable.clone())
        .build();
    let character = class("Character")
        .implements(serializable.clone())
        .implements(comparable.clone())
        .build();

    let enum_base = class("Enum")
        .implements(comparable.clone())
        .implements(serializable.clone())
        .build();

    let iterable = interface("Iterable").build();
    let collection = interface("Collection").implements(iterable.clone()).build();
    let list = interface("List").implements(collection.clone()).build();
    let set = interface("Set").implements(collection.clone()).build();
    let array_list = class("ArrayList")
        .implements(list.clone())
        .implements(serializable.clone())
        .build();
    let linked_list = class("LinkedList")
        .implements(list.clone())
        .implements(serializable.clone())
        .build();
    let hash_set = class("HashSet")
        .implements(set.clone())
        .implements(serializable.clone())
        .build();
    let linked_hash_set = ClassBuilder::root("LinkedHashSet")
        .extends(hash_set.clone())
        .implements(set.clone())
        .implements(serializable.clone())
        .build();
    let map = interface("Map").build();
    let hash_map = class("HashMap")
        .implements(map.clone())
        .implements(serializable.clone())
        .build();
    let linked_hash_map = ClassBuilder::root("LinkedHashMap")
        .extends(hash_map.clone())
        .implements(map.clone())
        .build();

    let optional = class("Optional").build();
    let stream = class("Stream").build();
    let byte_buffer = class("ByteBuffer").implements(comparable.clone()).build();
    let uuid = class("Uuid")
        .implements(serializable.clone())
        .implements(comparable.clone())
        .build();

    WellKnown {
        prim_byte: ClassBuilder::primitive("byte", byte.clone()).build(),
        prim_short: ClassBuilder::primitive("short", short.clone()).build(),
        prim_int: ClassBuilder::primitive("int", integer.clone()).build(),
        prim_long: ClassBuilder::primitive("long", long.clone()).build(),
        prim_float: ClassBuilder::primitive("float", float.clone()).build(),
        prim_double: ClassBuilder::primitive("double", double.clone()).build(),
        prim_boolean: ClassBuilder::primitive("boolean", boolean.clone()).build(),
        prim_char: ClassBuilder::primitive("char", character.clone()).build(),
        object,
        serializable,
        comparable,
        char_sequence,
        string,
        number,
        byte,
        short,
        integer,
        long,
        float,
        double,
        boolean,
        character,
        enum_base,
        iterable,
        collection,
        list,
        set,
        array_list,
        linked_list,
        hash_set,
        linked_hash_set,
        map,
        hash_map,
        linked_hash_map,
        optional,
        stream,
        byte_buffer,
        uuid,
    }
}

macro_rules! accessors {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name() -> Class {
                well_known().$name.clone()
            }
        )*
    };
}

accessors! {
    /// Root of every reference type.
    object,
    serializable,
    comparable,
    char_sequence,
    string,
    /// Abstract base of the boxed numeric classes.
    number,
    byte,
    short,
    integer,
    long,
    float,
    double,
    boolean,
    character,
    prim_byte,
    prim_short,
    prim_int,
    prim_long,
    prim_float,
    prim_double,
    prim_boolean,
    prim_char,
    /// Common base of every enum class.
    enum_base,
    iterable,
    collection,
    list,
    set,
    array_list,
    linked_list,
    hash_set,
    linked_hash_set,
    map,
    hash_map,
    linked_hash_map,
    optional,
    stream,
    byte_buffer,
    uuid,
}
