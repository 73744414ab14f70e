//! This crate is a small set of generic containers that take their element behaviour from the
//! user rather than from trait bounds alone.
//!
//! # Purpose
//! Two containers sit at the centre: an ordered map backed by a red-black tree
//! ([`TreeMap`](collections::tree::TreeMap)) and a separate-chaining hash table
//! ([`HashTable`](collections::hash::HashTable)). Each is built around a set of functions
//! supplied at construction: a comparator for the map, a hasher and an equality function for the
//! table, and an optional stringifier used for printing. The natural orderings and [`Hash`]
//! implementations are provided as defaults, but any closure with the right signature works too.
//!
//! # Sharing
//! Both containers can be used directly, where the borrow checker rules out a cursor outliving a
//! mutation, or behind the reader/writer primitive in [`sync`] via
//! [`SyncTreeMap`](collections::tree::SyncTreeMap) and
//! [`SyncHashTable`](collections::hash::SyncHashTable). The shared versions take `&self` for
//! every operation, taking a read frame for inspection and a write frame for mutation.
//!
//! # Error Handling
//! Missing entries are never errors, they're reported as [`None`] or `false`. Misuse (rendering
//! a container that wasn't given a stringifier, growing past `usize::MAX`, touching a poisoned
//! lock) panics by default, with a `try_` variant of each such method returning a strongly typed
//! error instead. The errors themselves are zero-sized structs that implement
//! [`Error`](std::error::Error).
//!
//! # Dependencies
//! `derive_more` removes the repetitive `Display` / `Error` implementations and `log` is used
//! for the few places where the containers do something expensive behind the caller's back.
//!
//! [`Hash`]: std::hash::Hash

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;
pub mod sync;

pub(crate) mod util;
