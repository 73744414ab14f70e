//! Hash-based collection types. Primarily revolves around [`HashTable`], a separate-chaining
//! table whose hashing and equality are supplied by the user.

pub mod table;

#[doc(inline)]
pub use table::{Cursor, HashTable, SyncHashTable};
