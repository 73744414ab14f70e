#![cfg(test)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A value that counts how many of its clones have been dropped, used to check that containers
/// release every entry exactly once.
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Arc<AtomicUsize>);

impl CountedDrop {
    pub fn new() -> CountedDrop {
        CountedDrop(Arc::new(AtomicUsize::new(0)))
    }

    pub fn dropped(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}
