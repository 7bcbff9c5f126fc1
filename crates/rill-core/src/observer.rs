use crate::error::StreamError;

/// Consumer side of a stream.
///
/// An observer receives zero or more [`Observer::next`] calls followed by at
/// most one terminal call ([`Observer::error`] or [`Observer::complete`]).
/// Observers are `Send` so an externally driven source may call them from
/// another thread.
pub trait Observer<T>: Send {
    /// Accept the next value.
    fn next(&mut self, value: T);

    /// Accept a terminal failure.
    fn error(&mut self, error: StreamError);

    /// Accept the terminal completion signal.
    fn complete(&mut self);

    /// Returns `true` once this observer will accept nothing further.
    ///
    /// Sources poll this between values so that a chain terminated or
    /// disposed downstream stops pulling from its producer. Plain consumers
    /// never close on their own.
    fn is_closed(&self) -> bool {
        false
    }
}

/// A type-erased observer, as handed to [`crate::Observable::subscribe`].
pub type BoxObserver<T> = Box<dyn Observer<T>>;

impl<T, O: Observer<T> + ?Sized> Observer<T> for Box<O> {
    fn next(&mut self, value: T) {
        (**self).next(value);
    }

    fn error(&mut self, error: StreamError) {
        (**self).error(error);
    }

    fn complete(&mut self) {
        (**self).complete();
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// An observer assembled from three closures.
pub struct CallbackObserver<N, C, F> {
    on_next: N,
    on_complete: C,
    on_error: F,
}

impl<N, C, F> CallbackObserver<N, C, F> {
    /// Build an observer from next, completion, and failure callbacks.
    pub fn new(on_next: N, on_complete: C, on_error: F) -> Self {
        Self {
            on_next,
            on_complete,
            on_error,
        }
    }
}

impl<N> CallbackObserver<N, fn(), fn(StreamError)> {
    /// Build an observer that only cares about values.
    ///
    /// Terminal events are accepted and ignored.
    pub fn next_only(on_next: N) -> Self {
        Self::new(on_next, || {}, |_| {})
    }
}

impl<T, N, C, F> Observer<T> for CallbackObserver<N, C, F>
where
    N: FnMut(T) + Send,
    C: FnMut() + Send,
    F: FnMut(StreamError) + Send,
{
    fn next(&mut self, value: T) {
        (self.on_next)(value);
    }

    fn error(&mut self, error: StreamError) {
        (self.on_error)(error);
    }

    fn complete(&mut self) {
        (self.on_complete)();
    }
}
