//! A module containing [`HashTable`] and associated types.
//!
//! Besides [`SyncHashTable`], the other types here are for traversal: [`Cursor`] walks a
//! borrowed table slot by slot, and [`Iter`], [`Keys`], [`Values`] and [`IntoIter`] wrap it (or
//! the owned table) as iterators.
//!
//! As a note, there is no mutable iterator over entries or keys because mutating the keys of a
//! HashTable in place would cause a logic error.
//!
//! [`HashTable`], [`Cursor`] and [`SyncHashTable`] are also re-exported under the parent module.

mod cursor;
mod hash_table;
mod iter;
mod sync_hash_table;

pub use cursor::*;
pub use hash_table::*;
pub use iter::*;
pub use sync_hash_table::*;
