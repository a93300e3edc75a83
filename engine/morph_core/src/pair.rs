//! Coarse index key for converter lookup.

use std::fmt;

use morph_types::Class;

/// An exact `(source, target)` class pair.
///
/// Equality is class identity; the pair knows nothing about hierarchies.
/// Hierarchy awareness comes from the resolver trying every candidate pair.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConvertiblePair {
    source: Class,
    target: Class,
}

impl ConvertiblePair {
    pub fn new(source: Class, target: Class) -> Self {
        ConvertiblePair { source, target }
    }

    pub fn source(&self) -> &Class {
        &self.source
    }

    pub fn target(&self) -> &Class {
        &self.target
    }
}

impl fmt::Display for ConvertiblePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

impl fmt::Debug for ConvertiblePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConvertiblePair({self})")
    }
}
