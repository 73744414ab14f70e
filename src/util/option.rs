use std::hint;

pub(crate) trait OptionExtension<T> {
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    /// Unwraps a value that the surrounding structure guarantees is present, such as the
    /// grandparent of a red node or the sibling of a black one.
    ///
    /// Debug builds check the guarantee with [`unreachable!`], release builds rely on it through
    /// [`unreachable_unchecked`](hint::unreachable_unchecked).
    #[track_caller]
    unsafe fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None if cfg!(debug_assertions) => unreachable!(),
            // SAFETY: It is the responsibility of the caller to ensure that None is impossible when
            // invoking this method.
            None => unsafe { hint::unreachable_unchecked() },
        }
    }
}
