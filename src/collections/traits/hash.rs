use std::hash::{BuildHasher, Hash, RandomState};

/// Produces the hash code for a key in a [`HashTable`](crate::collections::hash::HashTable).
///
/// Keys that are equal under the table's [`KeyEq`] must produce equal hashes. Only the low bits
/// of the hash select a slot, so hashers should spread entropy into them.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

impl<K: ?Sized, F: Fn(&K) -> u64> KeyHasher<K> for F {
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

/// The [`KeyHasher`] for keys that implement [`Hash`], using a [`BuildHasher`] (SipHash through
/// [`RandomState`] by default).
#[derive(Debug, Default, Clone)]
pub struct StdHash<B: BuildHasher = RandomState>(pub B);

impl<K: Hash + ?Sized, B: BuildHasher> KeyHasher<K> for StdHash<B> {
    fn hash_key(&self, key: &K) -> u64 {
        self.0.hash_one(key)
    }
}

/// Decides whether two keys in a [`HashTable`](crate::collections::hash::HashTable) are the same
/// key.
pub trait KeyEq<K: ?Sized> {
    fn keys_eq(&self, lhs: &K, rhs: &K) -> bool;
}

impl<K: ?Sized, F: Fn(&K, &K) -> bool> KeyEq<K> for F {
    fn keys_eq(&self, lhs: &K, rhs: &K) -> bool {
        self(lhs, rhs)
    }
}

/// The [`KeyEq`] for keys that implement [`Eq`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalEq;

impl<K: Eq + ?Sized> KeyEq<K> for NaturalEq {
    fn keys_eq(&self, lhs: &K, rhs: &K) -> bool {
        lhs == rhs
    }
}
