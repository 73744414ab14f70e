//! Ordered collection types backed by a self-balancing binary search tree. Primarily revolves
//! around [`TreeMap`] and its accompanying [`Cursor`] type.

pub mod map;

#[doc(inline)]
pub use map::{Cursor, SyncTreeMap, Traversal, TreeMap};
