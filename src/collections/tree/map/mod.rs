//! A module containing [`TreeMap`] and associated types.
//!
//! [`Cursor`] provides pre-order, in-order and post-order traversal over a borrowed map, while
//! [`Iter`], [`Keys`], [`Values`] and [`IntoIter`] cover the usual in-order iteration.
//! [`SyncTreeMap`] shares a map between threads.
//!
//! [`TreeMap`], [`Cursor`], [`Traversal`] and [`SyncTreeMap`] are also re-exported under the parent
//! module.

mod cursor;
mod iter;
mod node;
mod print;
mod sync_tree_map;
mod tests;
mod tree_map;

pub use cursor::*;
pub use iter::*;
pub(crate) use node::*;
pub use sync_tree_map::*;
pub use tree_map::*;
