#![cfg(test)]

/// A key that carries its own hash, so tests can decide exactly which keys collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualHash<T: Eq> {
    pub hash: u64,
    pub value: T,
}

impl<T: Eq> ManualHash<T> {
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash {
            hash,
            value,
        }
    }
}

/// Hashes a [`ManualHash`] to the hash it was constructed with.
pub fn manual_hash<T: Eq>(key: &ManualHash<T>) -> u64 {
    key.hash
}

/// Hashes an integer to itself.
pub fn identity_hash(key: &u32) -> u64 {
    u64::from(*key)
}
