use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use super::{Bucket, Chain};

/// A type for traversing a [`HashTable`](super::HashTable), slot by slot and then along each
/// chain. Produces values of type `(&K, &V)`.
///
/// The order depends on the hashes of the keys and the capacity of the table, so it isn't
/// meaningful beyond being the same for two tables with the same contents and capacity.
///
/// A Cursor borrows the table it traverses, so the table can't be mutated while a Cursor exists.
/// For a [`SyncHashTable`](super::SyncHashTable), a Cursor is created from a read frame and lives
/// no longer than it.
///
/// See [`HashTable::cursor`](super::HashTable::cursor).
pub struct Cursor<'a, K, V> {
    pub(crate) slots: &'a [Chain<K, V>],
    pub(crate) slot: usize,
    pub(crate) current: Option<&'a Bucket<K, V>>,
    pub(crate) visited: usize,
    pub(crate) len: usize,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(slots: &'a [Chain<K, V>], len: usize) -> Cursor<'a, K, V> {
        let mut cursor = Cursor {
            slots,
            slot: 0,
            current: None,
            visited: 0,
            len,
        };
        cursor.current = cursor.next_occupied();
        cursor
    }

    /// Returns true if there are entries left to visit.
    pub const fn has_next(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the number of entries this Cursor has produced so far.
    pub const fn visited(&self) -> usize {
        self.visited
    }

    /// Scans forward from the next unvisited slot, returning the root of the first non-empty
    /// chain.
    fn next_occupied(&mut self) -> Option<&'a Bucket<K, V>> {
        while let Some(chain) = self.slots.get(self.slot) {
            self.slot += 1;
            if let Some(bucket) = chain.as_deref() {
                return Some(bucket);
            }
        }
        None
    }
}

impl<'a, K, V> Iterator for Cursor<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.current?;

        self.current = match bucket.next.as_deref() {
            Some(next) => Some(next),
            None => self.next_occupied(),
        };
        self.visited += 1;

        Some((&bucket.key, &bucket.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.visited;
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for Cursor<'_, K, V> {}

impl<K, V> FusedIterator for Cursor<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current.map(|bucket| (&bucket.key, &bucket.value)))
            .field("visited", &self.visited)
            .field("len", &self.len)
            .finish()
    }
}
