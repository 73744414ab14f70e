use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash};
use std::{iter, mem};

use super::{Cursor, Iter, Keys, Values};
use crate::collections::traits::{KeyEq, KeyHasher, NaturalEq, StdHash, Stringifier};
use crate::util::error::{CapacityOverflow, MissingStringifier};
use crate::util::fmt::DebugRaw;
use crate::util::result::ResultExtension;

/// The capacity of every new HashTable, and the smallest capacity a HashTable will resize to.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

const GROWTH_FACTOR: usize = 2;

const LOAD_FACTOR_NUMERATOR: usize = 3;
const LOAD_FACTOR_DENOMINATOR: usize = 4;

/// A map of keys to values stored in an array of chains, using a [`KeyHasher`] to pick a slot for
/// each key and a [`KeyEq`] to tell keys in the same chain apart.
///
/// The capacity is always a power of two, starting at [`DEFAULT_INITIAL_CAPACITY`], so a slot is
/// chosen from the low bits of a key's hash. The HashTable doubles its capacity whenever an
/// insertion would find it already at the load factor of 3/4. Each bucket caches the hash of its
/// key, which is checked before calling the equality function and reused when resizing.
///
/// It is a logic error for keys in a HashTable to be manipulated in a way that changes their hash
/// or equality. Because of this, HashTable's API prevents mutable access to its keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the HashTable.
/// - `c`: The capacity of the HashTable.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`*, `O(n + c)` |
/// | `get` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `resize` | `O(n + c)` |
/// | `clear` | `O(n + c)` |
///
/// \* Keys that share a slot are searched one after the other, so these take additional time in
/// proportion to the length of the chain. A poor hasher can put every key in one chain, making
/// them `O(n)`.
pub struct HashTable<K, V, H = StdHash, E = NaturalEq> {
    pub(crate) slots: Box<[Chain<K, V>]>,
    pub(crate) len: usize,
    pub(crate) hasher: H,
    pub(crate) eq: E,
    pub(crate) fmt: Option<Stringifier<K, V>>,
}

pub(crate) type Chain<K, V> = Option<Box<Bucket<K, V>>>;

pub(crate) struct Bucket<K, V> {
    pub key: K,
    pub value: V,
    pub hash: u64,
    pub next: Chain<K, V>,
}

impl<K, V> Bucket<K, V> {
    pub const fn new(key: K, value: V, hash: u64) -> Bucket<K, V> {
        Bucket {
            key,
            value,
            hash,
            next: None,
        }
    }
}

impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Creates a new, empty HashTable that hashes keys with their [`Hash`] implementation and a
    /// [`RandomState`](std::hash::RandomState), and compares them with [`Eq`].
    pub fn new() -> HashTable<K, V> {
        HashTable::with_fns(StdHash::default(), NaturalEq)
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashTable<K, V, StdHash<B>> {
    /// Creates a new, empty HashTable that hashes keys with their [`Hash`] implementation and the
    /// provided `build_hasher`.
    pub fn with_hasher(build_hasher: B) -> HashTable<K, V, StdHash<B>> {
        HashTable::with_fns(StdHash(build_hasher), NaturalEq)
    }
}

impl<K, V, H, E> HashTable<K, V, H, E> {
    /// Creates a new, empty HashTable with the provided `hasher` and `eq`uality function.
    pub fn with_fns(hasher: H, eq: E) -> HashTable<K, V, H, E> {
        HashTable {
            slots: empty_slots(DEFAULT_INITIAL_CAPACITY),
            len: 0,
            hasher,
            eq,
            fmt: None,
        }
    }

    /// Creates a new, empty HashTable with the provided `hasher` and `eq`uality function, which
    /// renders its entries with `fmt`.
    pub fn with_fns_and_stringifier(
        hasher: H,
        eq: E,
        fmt: Stringifier<K, V>,
    ) -> HashTable<K, V, H, E> {
        let mut table = HashTable::with_fns(hasher, eq);
        table.fmt = Some(fmt);
        table
    }

    /// Sets the function used to render entries, see [`HashTable::render`].
    pub fn set_stringifier(&mut self, fmt: Stringifier<K, V>) {
        self.fmt = Some(fmt);
    }

    /// Returns the hasher used by this HashTable.
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the number of entries in the HashTable.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashTable contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the HashTable. This is always a power of two, no less than
    /// [`DEFAULT_INITIAL_CAPACITY`].
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Removes every entry from the HashTable, keeping its capacity.
    pub fn clear(&mut self) {
        let released = self.len;

        for slot in self.slots.iter_mut() {
            let mut chain = slot.take();
            // Drop iteratively, chains can be arbitrarily long.
            while let Some(mut bucket) = chain {
                chain = bucket.next.take();
            }
        }

        self.len = 0;

        if released > 0 {
            log::debug!("cleared HashTable, released {released} entries");
        }
    }

    /// Resizes the HashTable so that it can hold at least `min_capacity` entries without
    /// exceeding its load factor. The new capacity is the smallest power-of-two multiple of
    /// [`DEFAULT_INITIAL_CAPACITY`] that fits. Requests below the current length are treated as
    /// requests for the current length, so no entry is ever lost.
    ///
    /// # Panics
    /// Panics if the required capacity exceeds `usize::MAX`.
    pub fn resize(&mut self, min_capacity: usize) {
        self.try_resize(min_capacity).throw()
    }

    /// Resizes the HashTable as with [`HashTable::resize`], returning an [`Err`] rather than
    /// panicking if the required capacity exceeds `usize::MAX`.
    pub fn try_resize(&mut self, min_capacity: usize) -> Result<(), CapacityOverflow> {
        let target = capacity_for(min_capacity.max(self.len))?;

        if target != self.capacity() {
            self.realloc_with_cap(target);
        }

        Ok(())
    }

    /// Shrinks the HashTable to the smallest capacity that holds its current entries.
    pub fn shrink_to_fit(&mut self) {
        log::trace!("shrinking HashTable with {} entries", self.len);
        self.resize(self.len);
    }

    /// Returns the share of entries that didn't get a slot of their own, between 0.0 (no
    /// collisions) and 1.0 (every entry in one chain). Useful for judging a hasher.
    pub fn collision_rate(&self) -> f64 {
        if self.len <= 1 {
            return 0.0;
        }

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        1.0 - (occupied - 1) as f64 / (self.len - 1) as f64
    }

    /// Returns a [`Cursor`] that visits every entry, slot by slot and then along each chain.
    pub fn cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.slots, self.len)
    }

    /// Returns an iterator over all entries in the HashTable, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all keys in the HashTable, as references.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over all values in the HashTable, as references.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Renders every entry with the HashTable's stringifier, as `[a, b, ...]` in cursor order.
    ///
    /// # Panics
    /// Panics if the HashTable has no stringifier, see [`HashTable::try_render`].
    pub fn render(&self) -> String {
        self.try_render().throw()
    }

    /// Renders every entry as with [`HashTable::render`], returning an [`Err`] rather than
    /// panicking if the HashTable has no stringifier.
    pub fn try_render(&self) -> Result<String, MissingStringifier> {
        let fmt = self.fmt.ok_or(MissingStringifier)?;
        let entries: Vec<String> = self.iter().map(|(k, v)| fmt(k, v)).collect();
        Ok(format!("[{}]", entries.join(", ")))
    }

    /// Prints the HashTable to standard output on a single line, see [`HashTable::render`].
    ///
    /// # Panics
    /// Panics if the HashTable has no stringifier.
    pub fn print(&self) {
        println!("{}", self.render());
    }

    /// Determines whether the HashTable's length has reached the load factor, meaning that it
    /// should grow before inserting new entries.
    pub(crate) fn should_grow(&self) -> bool {
        self.len >= self.capacity() * LOAD_FACTOR_NUMERATOR / LOAD_FACTOR_DENOMINATOR
    }

    /// Grows the HashTable by the growth factor.
    pub(crate) fn grow(&mut self) {
        let new_cap = self.capacity()
            .checked_mul(GROWTH_FACTOR)
            .ok_or(CapacityOverflow)
            .throw();

        self.realloc_with_cap(new_cap);
    }

    /// Moves every bucket into a new array of `new_cap` slots. The cached hashes are reused, so
    /// no key is hashed again.
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) {
        log::trace!(
            "resizing HashTable from {} to {new_cap} slots for {} entries",
            self.capacity(),
            self.len
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(new_cap));

        for mut chain in old_slots.into_vec() {
            while let Some(mut bucket) = chain {
                chain = bucket.next.take();
                self.append(bucket);
            }
        }
    }

    /// Attaches a detached `bucket` to the end of the chain its cached hash selects. Doesn't
    /// update the length.
    pub(crate) fn append(&mut self, bucket: Box<Bucket<K, V>>) {
        let slot = self.slot_for(bucket.hash);
        let mut link = &mut self.slots[slot];

        while let Some(existing) = link {
            link = &mut existing.next;
        }

        *link = Some(bucket);
    }

    /// Selects the slot for a hash from its low bits. The capacity is a power of two, so this is
    /// the hash modulo the capacity.
    pub(crate) fn slot_for(&self, hash: u64) -> usize {
        (hash & (self.capacity() as u64 - 1)) as usize
    }
}

impl<K, V, H: KeyHasher<K>, E: KeyEq<K>> HashTable<K, V, H, E> {
    /// Inserts the provided `key`-`value` pair into the HashTable, growing it first if it has
    /// reached its load factor. If the key was already associated with a value, the previous
    /// value is returned.
    ///
    /// As with the standard library, the key isn't changed if it already exists.
    ///
    /// # Panics
    /// Panics if growing the HashTable would overflow its capacity.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.should_grow() {
            self.grow();
        }

        let hash = self.hasher.hash_key(&key);
        let slot = self.slot_for(hash);
        let mut link = &mut self.slots[slot];

        while let Some(bucket) = link {
            if bucket.hash == hash && self.eq.keys_eq(&key, &bucket.key) {
                return Some(mem::replace(&mut bucket.value, value));
            }
            link = &mut bucket.next;
        }

        *link = Some(Box::new(Bucket::new(key, value, hash)));
        self.len += 1;
        None
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no entry.
    pub fn get_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|bucket| (&bucket.key, &bucket.value))
    }

    /// Returns a reference to the value associated with the provided `key` or None if the table
    /// contains no value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|bucket| &bucket.value)
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if
    /// the table contains no value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hasher.hash_key(key);
        let slot = self.slot_for(hash);
        let mut link = &mut self.slots[slot];

        while let Some(bucket) = link {
            if bucket.hash == hash && self.eq.keys_eq(key, &bucket.key) {
                return Some(&mut bucket.value);
            }
            link = &mut bucket.next;
        }

        None
    }

    /// Returns true if there is a value associated with the provided `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry associated with `key`, returning it if it exists. The rest of the chain
    /// keeps its order.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hasher.hash_key(key);
        let slot = self.slot_for(hash);
        let position = self.chain_position(slot, hash, key)?;

        let mut link = &mut self.slots[slot];
        for _ in 0..position {
            match link {
                Some(bucket) => link = &mut bucket.next,
                None => return None,
            }
        }

        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len -= 1;

        Some((removed.key, removed.value))
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Walks the chain for `key`, returning its bucket if present.
    pub(crate) fn find(&self, key: &K) -> Option<&Bucket<K, V>> {
        let hash = self.hasher.hash_key(key);
        let mut link = self.slots[self.slot_for(hash)].as_deref();

        while let Some(bucket) = link {
            if bucket.hash == hash && self.eq.keys_eq(key, &bucket.key) {
                return Some(bucket);
            }
            link = bucket.next.as_deref();
        }

        None
    }

    /// Returns how many buckets precede the one holding `key` in the chain at `slot`.
    fn chain_position(&self, slot: usize, hash: u64, key: &K) -> Option<usize> {
        chain_iter(&self.slots[slot])
            .position(|bucket| bucket.hash == hash && self.eq.keys_eq(key, &bucket.key))
    }
}

/// Calculates the capacity needed to hold `min_len` entries at the load factor, rounded up to a
/// power-of-two multiple of the default capacity.
pub(crate) fn capacity_for(min_len: usize) -> Result<usize, CapacityOverflow> {
    let needed = min_len
        .checked_mul(LOAD_FACTOR_DENOMINATOR)
        .ok_or(CapacityOverflow)?
        .div_ceil(LOAD_FACTOR_NUMERATOR);

    let mut cap = DEFAULT_INITIAL_CAPACITY;
    while cap < needed {
        cap = cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow)?;
    }

    Ok(cap)
}

fn empty_slots<K, V>(cap: usize) -> Box<[Chain<K, V>]> {
    iter::repeat_with(|| None).take(cap).collect()
}

/// Iterates over the buckets of a chain, from the slot root to the end.
pub(crate) fn chain_iter<K, V>(chain: &Chain<K, V>) -> impl Iterator<Item = &Bucket<K, V>> {
    iter::successors(chain.as_deref(), |bucket| bucket.next.as_deref())
}

impl<K: Clone, V: Clone, H: Clone, E: Clone> Clone for HashTable<K, V, H, E> {
    /// Creates an independent copy of the HashTable with the same capacity, placing a copy of
    /// each entry by its cached hash.
    fn clone(&self) -> Self {
        let mut copy = HashTable {
            slots: empty_slots(self.capacity()),
            len: 0,
            hasher: self.hasher.clone(),
            eq: self.eq.clone(),
            fmt: self.fmt,
        };

        for bucket in self.slots.iter().flat_map(chain_iter) {
            copy.append(Box::new(Bucket::new(
                bucket.key.clone(),
                bucket.value.clone(),
                bucket.hash,
            )));
            copy.len += 1;
        }

        copy
    }
}

impl<K, V, H, E> Drop for HashTable<K, V, H, E> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        HashTable::new()
    }
}

impl<K, V, H: KeyHasher<K>, E: KeyEq<K>> Extend<(K, V)> for HashTable<K, V, H, E> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}

impl<K: Debug, V: Debug, H: Debug, E: Debug> Debug for HashTable<K, V, H, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let slots = self.slots.iter()
            .map(|chain| {
                let buckets: Vec<String> = chain_iter(chain)
                    .map(|bucket| format!("({:?}: {:?})", bucket.key, bucket.value))
                    .collect();

                DebugRaw(if buckets.is_empty() { "-".into() } else { buckets.join(" -> ") })
            })
            .collect::<Vec<_>>();

        f.debug_struct("HashTable")
            .field("slots", &slots)
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .field("hasher", &self.hasher)
            .field("eq", &self.eq)
            .finish()
    }
}

impl<K: Debug, V: Debug, H, E> Display for HashTable<K, V, H, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
