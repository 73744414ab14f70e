use std::iter::FusedIterator;
use std::{mem, vec};

use super::{Chain, Cursor, HashTable};

impl<K, V, H, E> IntoIterator for HashTable<K, V, H, E> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::take(&mut self.len);

        IntoIter {
            slots: mem::take(&mut self.slots).into_vec().into_iter(),
            chain: None,
            len,
        }
    }
}

/// A type for owned iteration over a [`HashTable`], in cursor order. Produces values of type
/// `(K, V)`.
pub struct IntoIter<K, V> {
    pub(crate) slots: vec::IntoIter<Chain<K, V>>,
    pub(crate) chain: Chain<K, V>,
    pub(crate) len: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.chain.is_none() {
            self.chain = self.slots.next()?;
        }

        let mut bucket = self.chain.take()?;
        self.chain = bucket.next.take();
        self.len -= 1;

        Some((bucket.key, bucket.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<'a, K, V, H, E> IntoIterator for &'a HashTable<K, V, H, E> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.cursor())
    }
}

/// A type for borrowed iteration over a [`HashTable`], in cursor order. Produces values of type
/// `(&K, &V)`.
///
/// See [`HashTable::iter`].
pub struct Iter<'a, K, V>(pub(crate) Cursor<'a, K, V>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A type for borrowed iteration over the keys of a [`HashTable`].
///
/// See [`HashTable::keys`].
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// A type for borrowed iteration over the values of a [`HashTable`].
///
/// See [`HashTable::values`].
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
