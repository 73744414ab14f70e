//! Generic container types that take their key behaviour from functions supplied at construction.
//!
//! # Purpose
//! [`tree::TreeMap`] keeps its entries ordered with a [`Comparator`](traits::Comparator), while
//! [`hash::HashTable`] locates them with a [`KeyHasher`](traits::KeyHasher) and
//! [`KeyEq`](traits::KeyEq) pair. Both accept an optional
//! [`Stringifier`](traits::Stringifier) for rendering themselves as text.
//!
//! # Method
//! Each container owns its entries through raw links (tree nodes) or boxed chains (table
//! buckets), and offers a [`Cursor`](tree::Cursor) type that borrows it for traversal. A shared
//! version of each lives alongside it, built on [`RwSync`](crate::sync::RwSync).

pub mod hash;
pub mod traits;
pub mod tree;

#[doc(inline)]
pub use crate::util::error::{CapacityOverflow, MissingStringifier};
