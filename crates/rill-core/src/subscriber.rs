use crate::disposable::DisposeFlag;
use crate::error::StreamError;
use crate::observer::{BoxObserver, Observer};

/// The guarded downstream end of one subscription.
///
/// Every operator and source delivers through a `Subscriber`, which enforces
/// the stream protocol regardless of how the upstream behaves:
/// - nothing is forwarded once the subscription's [`DisposeFlag`] is set;
/// - nothing is forwarded after a terminal event;
/// - at most one terminal event reaches the downstream observer.
///
/// [`Observer::is_closed`] also reports a downstream that has closed, so an
/// operator that terminates the chain on its own (a failed `try_map`, a
/// captured panic) is visible to the source driving it.
pub struct Subscriber<T> {
    downstream: BoxObserver<T>,
    flag: DisposeFlag,
    terminated: bool,
}

impl<T> Subscriber<T> {
    /// Wrap `downstream`, gating delivery on `flag`.
    pub fn new(downstream: BoxObserver<T>, flag: DisposeFlag) -> Self {
        Self {
            downstream,
            flag,
            terminated: false,
        }
    }

    /// Returns `true` once a terminal event has been delivered.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The dispose flag this subscriber checks.
    pub fn flag(&self) -> &DisposeFlag {
        &self.flag
    }

    fn is_gated(&self) -> bool {
        self.terminated || self.flag.is_disposed()
    }
}

impl<T> Observer<T> for Subscriber<T> {
    fn next(&mut self, value: T) {
        if self.is_gated() {
            return;
        }
        self.downstream.next(value);
    }

    fn error(&mut self, error: StreamError) {
        if self.is_gated() {
            return;
        }
        self.terminated = true;
        self.downstream.error(error);
    }

    fn complete(&mut self) {
        if self.is_gated() {
            return;
        }
        self.terminated = true;
        self.downstream.complete();
    }

    fn is_closed(&self) -> bool {
        self.is_gated() || self.downstream.is_closed()
    }
}
