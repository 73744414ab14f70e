use std::cmp::Ordering;

/// Orders keys for a [`TreeMap`](crate::collections::tree::TreeMap).
///
/// Returning [`Ordering::Equal`] means that two keys are the same key, so the map will replace
/// the value rather than store both. It is a logic error for a comparator to be inconsistent
/// (e.g. not transitive) while keys are stored in a map, although this isn't checked.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Comparator<K> for F {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}

/// The [`Comparator`] for keys that implement [`Ord`], deferring to [`Ord::cmp`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// A [`Comparator`] that reverses the one it wraps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self.0.compare(rhs, lhs)
    }
}
