use derive_more::{Display, Error};

/// A container was asked to render itself without being given a
/// [`Stringifier`](crate::collections::traits::Stringifier).
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("container has no stringifier to render its entries with")]
pub struct MissingStringifier;

/// A capacity calculation exceeded `usize::MAX`.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("capacity overflow")]
pub struct CapacityOverflow;

/// A thread panicked while holding a frame of an [`RwSync`](crate::sync::RwSync), so the
/// protected value may be only partially updated.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("synchronized container was poisoned by a panicking frame")]
pub struct PoisonedSync;
