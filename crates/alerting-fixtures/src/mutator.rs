//! Mutators: shareable callbacks that override fields of a generated entity.

use std::sync::Arc;

/// Overrides fields of an entity in place.
pub type Mutator<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// Wraps a closure as a [`Mutator`].
pub fn mutator<T>(f: impl Fn(&mut T) + Send + Sync + 'static) -> Mutator<T> {
    Arc::new(f)
}

/// Applies `mutators` to `value` in order.
pub fn apply_all<T>(value: &mut T, mutators: &[Mutator<T>]) {
    for m in mutators {
        m(value);
    }
}
