use std::fmt::{self, Debug, Formatter};

use super::TreeMap;
use crate::collections::traits::{Comparator, NaturalOrder, Stringifier};
use crate::sync::{ReadFrame, RwSync, WriteFrame};
use crate::util::result::ResultExtension;

/// A [`TreeMap`] that can be shared between threads, with every operation framed by an
/// [`RwSync`].
///
/// Operations that only inspect the map (`get`, `contains`, `len`, ...) run inside a read frame,
/// so they can proceed in parallel. Operations that mutate it (`insert`, `remove`, `clear`) run
/// inside a write frame and exclude everything else. Values are cloned out of the map, because a
/// reference can't outlive the frame it was read in.
///
/// For anything that needs more than one operation to be atomic, such as traversal with a
/// [`Cursor`](super::Cursor), open a frame with [`SyncTreeMap::read`] or [`SyncTreeMap::write`]
/// and use the [`TreeMap`] inside directly.
///
/// # Panics
/// Every method panics if another thread panicked while mutating the map, see [`RwSync`].
pub struct SyncTreeMap<K, V, C = NaturalOrder> {
    pub(crate) inner: RwSync<TreeMap<K, V, C>>,
}

impl<K: Ord, V> SyncTreeMap<K, V> {
    /// Creates a new, empty SyncTreeMap ordered by the keys' [`Ord`] implementation.
    pub const fn new() -> SyncTreeMap<K, V> {
        SyncTreeMap::from_map(TreeMap::new())
    }
}

impl<K, V, C> SyncTreeMap<K, V, C> {
    /// Creates a new, empty SyncTreeMap that orders its keys with `cmp`.
    pub const fn with_comparator(cmp: C) -> SyncTreeMap<K, V, C> {
        SyncTreeMap::from_map(TreeMap::with_comparator(cmp))
    }

    /// Creates a new, empty SyncTreeMap that orders its keys with `cmp` and renders its entries
    /// with `fmt`.
    pub const fn with_comparator_and_stringifier(
        cmp: C,
        fmt: Stringifier<K, V>,
    ) -> SyncTreeMap<K, V, C> {
        SyncTreeMap::from_map(TreeMap::with_comparator_and_stringifier(cmp, fmt))
    }

    /// Wraps an existing `map` for sharing.
    pub const fn from_map(map: TreeMap<K, V, C>) -> SyncTreeMap<K, V, C> {
        SyncTreeMap {
            inner: RwSync::new(map),
        }
    }

    /// Opens a read frame over the map. The map can't be mutated until the frame is dropped.
    pub fn read(&self) -> ReadFrame<'_, TreeMap<K, V, C>> {
        self.inner.read()
    }

    /// Opens a write frame over the map. No other thread can access the map until the frame is
    /// dropped.
    pub fn write(&self) -> WriteFrame<'_, TreeMap<K, V, C>> {
        self.inner.write()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the height of the tree, see [`TreeMap::height`].
    pub fn height(&self) -> usize {
        self.read().height()
    }

    /// Removes every entry from the map.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Renders the map inside a read frame, see [`TreeMap::render`].
    pub fn render(&self) -> String {
        self.read().render()
    }

    /// Prints the map inside a read frame, see [`TreeMap::print`].
    pub fn print(&self) {
        self.read().print();
    }

    /// Consumes the SyncTreeMap, returning the map inside.
    pub fn into_inner(self) -> TreeMap<K, V, C> {
        self.inner.into_inner().throw()
    }
}

impl<K, V: Clone, C: Comparator<K>> SyncTreeMap<K, V, C> {
    /// Returns a clone of the value associated with `key`, if there is one.
    pub fn get(&self, key: &K) -> Option<V> {
        self.read().get(key).cloned()
    }
}

impl<K, V, C: Comparator<K>> SyncTreeMap<K, V, C> {
    /// Inserts the provided `key`-`value` pair, returning the previous value for an equal key.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.write().insert(key, value)
    }

    /// Returns true if there is a value associated with `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.read().contains(key)
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

impl<K: Clone, V: Clone, C: Clone> Clone for SyncTreeMap<K, V, C> {
    /// Clones the map inside a read frame. The clone has its own lock and shares nothing with the
    /// original.
    fn clone(&self) -> Self {
        SyncTreeMap::from_map(self.read().clone())
    }
}

impl<K: Ord, V> Default for SyncTreeMap<K, V> {
    fn default() -> Self {
        SyncTreeMap::new()
    }
}

impl<K, V, C> From<TreeMap<K, V, C>> for SyncTreeMap<K, V, C> {
    fn from(map: TreeMap<K, V, C>) -> Self {
        SyncTreeMap::from_map(map)
    }
}

impl<K: Debug, V: Debug, C: Debug> Debug for SyncTreeMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncTreeMap")
            .field("inner", &self.inner)
            .finish()
    }
}
