//! Traits describing the behaviour that containers borrow from their users.
//!
//! Containers in this crate don't require their keys to implement [`Ord`] or
//! [`Hash`](std::hash::Hash) directly. Instead, they store a comparator, hasher or equality
//! function and call it for every key operation. Each trait has a blanket implementation for
//! closures and function pointers with the matching signature, as well as a zero-sized default
//! that defers to the standard traits.

mod compare;
mod hash;
mod stringify;

pub use compare::*;
pub use hash::*;
pub use stringify::*;
