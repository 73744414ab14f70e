use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;

use super::HashTable;
use crate::collections::traits::{KeyEq, KeyHasher, NaturalEq, StdHash, Stringifier};
use crate::sync::{ReadFrame, RwSync, WriteFrame};
use crate::util::error::CapacityOverflow;
use crate::util::result::ResultExtension;

/// A [`HashTable`] that can be shared between threads, with every operation framed by an
/// [`RwSync`].
///
/// Lookups run inside a read frame and can proceed in parallel, while insertion, removal and
/// resizing take a write frame. Values are cloned out of the table rather than borrowed.
///
/// To traverse the table with a [`Cursor`](super::Cursor), or to make several operations atomic,
/// open a frame with [`SyncHashTable::read`] or [`SyncHashTable::write`].
///
/// # Panics
/// Every method panics if another thread panicked while mutating the table, see [`RwSync`].
pub struct SyncHashTable<K, V, H = StdHash, E = NaturalEq> {
    pub(crate) inner: RwSync<HashTable<K, V, H, E>>,
}

impl<K: Hash + Eq, V> SyncHashTable<K, V> {
    /// Creates a new, empty SyncHashTable using the keys' [`Hash`] and [`Eq`] implementations.
    pub fn new() -> SyncHashTable<K, V> {
        SyncHashTable::from_table(HashTable::new())
    }
}

impl<K, V, H, E> SyncHashTable<K, V, H, E> {
    /// Creates a new, empty SyncHashTable with the provided `hasher` and `eq`uality function.
    pub fn with_fns(hasher: H, eq: E) -> SyncHashTable<K, V, H, E> {
        SyncHashTable::from_table(HashTable::with_fns(hasher, eq))
    }

    /// Creates a new, empty SyncHashTable with the provided `hasher`, `eq`uality function and
    /// stringifier.
    pub fn with_fns_and_stringifier(
        hasher: H,
        eq: E,
        fmt: Stringifier<K, V>,
    ) -> SyncHashTable<K, V, H, E> {
        SyncHashTable::from_table(HashTable::with_fns_and_stringifier(hasher, eq, fmt))
    }

    /// Wraps an existing `table` for sharing.
    pub const fn from_table(table: HashTable<K, V, H, E>) -> SyncHashTable<K, V, H, E> {
        SyncHashTable {
            inner: RwSync::new(table),
        }
    }

    /// Opens a read frame over the table. The table can't be mutated until the frame is dropped.
    pub fn read(&self) -> ReadFrame<'_, HashTable<K, V, H, E>> {
        self.inner.read()
    }

    /// Opens a write frame over the table. No other thread can access the table until the frame
    /// is dropped.
    pub fn write(&self) -> WriteFrame<'_, HashTable<K, V, H, E>> {
        self.inner.write()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity()
    }

    pub fn collision_rate(&self) -> f64 {
        self.read().collision_rate()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    /// Resizes the table inside a write frame, see [`HashTable::resize`].
    pub fn resize(&self, min_capacity: usize) {
        self.try_resize(min_capacity).throw()
    }

    /// Resizes the table inside a write frame, see [`HashTable::try_resize`].
    pub fn try_resize(&self, min_capacity: usize) -> Result<(), CapacityOverflow> {
        self.write().try_resize(min_capacity)
    }

    pub fn shrink_to_fit(&self) {
        self.write().shrink_to_fit();
    }

    /// Renders the table inside a read frame, see [`HashTable::render`].
    pub fn render(&self) -> String {
        self.read().render()
    }

    /// Prints the table inside a read frame, see [`HashTable::print`].
    pub fn print(&self) {
        self.read().print();
    }

    /// Consumes the SyncHashTable, returning the table inside.
    pub fn into_inner(self) -> HashTable<K, V, H, E> {
        self.inner.into_inner().throw()
    }
}

impl<K, V, H: KeyHasher<K>, E: KeyEq<K>> SyncHashTable<K, V, H, E> {
    /// Returns a clone of the value associated with `key`, if there is one.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.read().get(key).cloned()
    }

    /// Returns true if there is a value associated with `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.read().contains(key)
    }

    /// Inserts the provided `key`-`value` pair, returning the previous value for an equal key.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.write().insert(key, value)
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.write().remove(key)
    }

    /// Runs `f` on the value associated with `key` inside a write frame, returning its result.
    pub fn update<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.write().get_mut(key).map(f)
    }
}

impl<K: Clone, V: Clone, H: Clone, E: Clone> Clone for SyncHashTable<K, V, H, E> {
    /// Clones the table inside a read frame. The clone has its own lock.
    fn clone(&self) -> Self {
        SyncHashTable::from_table(self.read().clone())
    }
}

impl<K: Hash + Eq, V> Default for SyncHashTable<K, V> {
    fn default() -> Self {
        SyncHashTable::new()
    }
}

impl<K, V, H, E> From<HashTable<K, V, H, E>> for SyncHashTable<K, V, H, E> {
    fn from(table: HashTable<K, V, H, E>) -> Self {
        SyncHashTable::from_table(table)
    }
}

impl<K: Debug, V: Debug, H: Debug, E: Debug> Debug for SyncHashTable<K, V, H, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncHashTable")
            .field("inner", &self.inner)
            .finish()
    }
}
