//! Candidate class ordering for resolution.
//!
//! `class_hierarchy` decides converter precedence for every lookup that
//! misses an exact pair, so its ordering is fixed, not incidental:
//!
//! 1. the class itself (primitives boxed)
//! 2. walking the growing list in order: each candidate's superclass is
//!    inserted directly after the candidate (unless it is `Object` or
//!    `Enum`), then its interfaces are appended at the end
//! 3. for enums, `Enum` and its interfaces
//! 4. `Object`, array-wrapped then plain
//!
//! For array types the walk runs over component classes and every
//! discovered candidate is re-wrapped as an array. Each class appears once.

use morph_types::{classes, Class};
use rustc_hash::FxHashSet;

struct Walk {
    hierarchy: Vec<Class>,
    visited: FxHashSet<Class>,
}

impl Walk {
    fn add(&mut self, index: usize, class: Class, as_array: bool) {
        let class = if as_array { class.array_of() } else { class };
        if self.visited.insert(class.clone()) {
            self.hierarchy.insert(index, class);
        }
    }

    fn push(&mut self, class: Class, as_array: bool) {
        self.add(self.hierarchy.len(), class, as_array);
    }

    fn push_interfaces(&mut self, class: &Class, as_array: bool) {
        for interface in class.interfaces() {
            self.push(interface, as_array);
        }
    }
}

/// Ordered, deduplicated candidates for `ty`, most specific first.
pub fn class_hierarchy(ty: &Class) -> Vec<Class> {
    let mut walk = Walk {
        hierarchy: Vec::with_capacity(20),
        visited: FxHashSet::default(),
    };
    let array = ty.is_array();
    walk.add(0, ty.boxed(), false);

    let object = classes::object();
    let enum_base = classes::enum_base();

    let mut i = 0;
    while i < walk.hierarchy.len() {
        let current = &walk.hierarchy[i];
        let candidate = if array {
            current.component().cloned().unwrap_or_else(|| current.clone())
        } else {
            current.boxed()
        };
        if let Some(superclass) = candidate.superclass() {
            if superclass != object && superclass != enum_base {
                walk.add(i + 1, superclass, array);
            }
        }
        walk.push_interfaces(&candidate, array);
        i += 1;
    }

    if enum_base.is_assignable_from(ty) {
        walk.push(enum_base.clone(), array);
        walk.push(enum_base.clone(), false);
        walk.push_interfaces(&enum_base, array);
    }

    walk.push(object.clone(), array);
    walk.push(object, false);
    walk.hierarchy
}

#[cfg(test)]
mod tests;
