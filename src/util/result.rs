use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// Unwraps an [`Ok`], or panics with the [`Display`](std::fmt::Display) message of the
    /// error. This is the bridge between each `try_` method and its panicking counterpart.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        self.unwrap_or_else(|error| panic!("{error}"))
    }
}
