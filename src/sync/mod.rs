//! A reader/writer synchronization primitive for sharing containers between threads.
//!
//! [`RwSync`] frames each operation: any number of threads may hold a read frame at once, while a
//! write frame excludes every other frame. The shared containers,
//! [`SyncTreeMap`](crate::collections::tree::SyncTreeMap) and
//! [`SyncHashTable`](crate::collections::hash::SyncHashTable), are built on top of it.

mod rw_sync;
mod tests;

pub use rw_sync::*;
#[doc(inline)]
pub use crate::util::error::PoisonedSync;
