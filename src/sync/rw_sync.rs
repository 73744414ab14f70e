use std::fmt::{self, Debug, Formatter};
use std::ops::{Deref, DerefMut};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::util::error::PoisonedSync;
use crate::util::result::ResultExtension;

/// A value protected by a reader/writer lock.
///
/// Opening a frame may block until the frames that exclude it are closed, frames are closed by
/// dropping them. No fairness is guaranteed, so a steady stream of readers can starve a writer.
///
/// If a thread panics while holding a frame, the value may be left half-updated. Every later
/// attempt to open a frame fails with [`PoisonedSync`] (or panics, for the non-`try` methods).
pub struct RwSync<T> {
    lock: RwLock<T>,
}

/// A read frame over an [`RwSync`], created with [`RwSync::read`]. Other read frames may be open
/// at the same time, write frames may not.
pub struct ReadFrame<'a, T>(RwLockReadGuard<'a, T>);

/// A write frame over an [`RwSync`], created with [`RwSync::write`]. No other frames may be open
/// at the same time.
pub struct WriteFrame<'a, T>(RwLockWriteGuard<'a, T>);

impl<T> RwSync<T> {
    /// Wraps `value` so that it can be shared between threads.
    pub const fn new(value: T) -> RwSync<T> {
        RwSync {
            lock: RwLock::new(value),
        }
    }

    /// Opens a read frame, blocking while a write frame is open.
    ///
    /// # Panics
    /// Panics if the primitive has been poisoned.
    pub fn read(&self) -> ReadFrame<'_, T> {
        self.try_read().throw()
    }

    /// Opens a read frame, returning an [`Err`] rather than panicking if the primitive has been
    /// poisoned.
    pub fn try_read(&self) -> Result<ReadFrame<'_, T>, PoisonedSync> {
        self.lock.read()
            .map(ReadFrame)
            .map_err(|_| PoisonedSync)
    }

    /// Opens a write frame, blocking while any other frame is open.
    ///
    /// # Panics
    /// Panics if the primitive has been poisoned.
    pub fn write(&self) -> WriteFrame<'_, T> {
        self.try_write().throw()
    }

    /// Opens a write frame, returning an [`Err`] rather than panicking if the primitive has been
    /// poisoned.
    pub fn try_write(&self) -> Result<WriteFrame<'_, T>, PoisonedSync> {
        self.lock.write()
            .map(WriteFrame)
            .map_err(|_| PoisonedSync)
    }

    /// Runs `f` inside a read frame, closing the frame before returning its result.
    ///
    /// # Panics
    /// Panics if the primitive has been poisoned.
    pub fn with_read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.read())
    }

    /// Runs `f` inside a write frame, closing the frame before returning its result.
    ///
    /// # Panics
    /// Panics if the primitive has been poisoned.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.write())
    }

    /// Returns true if a thread panicked while holding a frame.
    pub fn is_poisoned(&self) -> bool {
        self.lock.is_poisoned()
    }

    /// Returns a mutable reference to the value. No frame is needed, because the borrow is
    /// exclusive.
    pub fn get_mut(&mut self) -> Result<&mut T, PoisonedSync> {
        self.lock.get_mut().map_err(|_| PoisonedSync)
    }

    /// Consumes the primitive, returning the value it protected.
    pub fn into_inner(self) -> Result<T, PoisonedSync> {
        self.lock.into_inner().map_err(|_| PoisonedSync)
    }
}

impl<T: Default> Default for RwSync<T> {
    fn default() -> Self {
        RwSync::new(T::default())
    }
}

impl<T> From<T> for RwSync<T> {
    fn from(value: T) -> Self {
        RwSync::new(value)
    }
}

impl<T: Debug> Debug for RwSync<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("RwSync");
        match self.lock.try_read() {
            Ok(value) => dbg.field("value", &*value),
            Err(_) => dbg.field("value", &format_args!("<locked>")),
        };
        dbg.finish()
    }
}

impl<T> Deref for ReadFrame<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> Deref for WriteFrame<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for WriteFrame<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Debug> Debug for ReadFrame<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadFrame").field(&*self.0).finish()
    }
}

impl<T: Debug> Debug for WriteFrame<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WriteFrame").field(&*self.0).finish()
    }
}
