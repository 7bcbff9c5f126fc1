use std::fmt;
use std::sync::{Arc, Mutex};

use rill_core::{
    BoxObserver, DisposeFlag, Observable, Observer, StreamError, Subscriber, Subscription,
};
use tracing::debug;

type Hook = Box<dyn FnOnce() + Send>;

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Producer handle given to the closure of a [`create`] source.
///
/// An emitter may be cloned, stored, and driven after `subscribe` has
/// returned, from any thread. Events sent after the subscription is disposed
/// or terminated are dropped. Emitting from inside the observer's own
/// callback is not supported.
pub struct Emitter<T> {
    subscriber: Arc<Mutex<Subscriber<T>>>,
    flag: DisposeFlag,
    hooks: Arc<Mutex<Vec<Hook>>>,
}

impl<T> Emitter<T> {
    fn new(subscriber: Subscriber<T>) -> Self {
        let flag = subscriber.flag().clone();
        Self {
            subscriber: Arc::new(Mutex::new(subscriber)),
            flag,
            hooks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Emit a value.
    pub fn next(&self, value: T) {
        if self.flag.is_disposed() {
            return;
        }
        self.subscriber
            .lock()
            .expect("emitter lock poisoned")
            .next(value);
    }

    /// Terminate the stream with a failure.
    pub fn error(&self, error: impl Into<StreamError>) {
        if self.flag.is_disposed() {
            return;
        }
        self.subscriber
            .lock()
            .expect("emitter lock poisoned")
            .error(error.into());
    }

    /// Terminate the stream with completion.
    pub fn complete(&self) {
        if self.flag.is_disposed() {
            return;
        }
        self.subscriber
            .lock()
            .expect("emitter lock poisoned")
            .complete();
    }

    /// Returns `true` once nothing more will be delivered: the subscription
    /// was disposed, a terminal event was sent, or an operator further down
    /// the chain terminated it.
    ///
    /// Long-running producers should poll this and stop early.
    pub fn is_closed(&self) -> bool {
        self.flag.is_disposed()
            || self
                .subscriber
                .lock()
                .expect("emitter lock poisoned")
                .is_closed()
    }

    /// Register a hook that runs when the subscription is disposed.
    ///
    /// If the subscription is already disposed, the hook runs immediately.
    pub fn on_dispose(&self, hook: impl FnOnce() + Send + 'static) {
        let mut hooks = self.hooks.lock().expect("hook lock poisoned");
        if self.flag.is_disposed() {
            drop(hooks);
            hook();
            return;
        }
        hooks.push(Box::new(hook));
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            subscriber: Arc::clone(&self.subscriber),
            flag: self.flag.clone(),
            hooks: Arc::clone(&self.hooks),
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("disposed", &self.flag.is_disposed())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// A source whose emissions are driven by a user closure.
///
/// The closure runs once per subscription and receives a fresh [`Emitter`].
pub struct Create<T, F> {
    producer: F,
    _item: std::marker::PhantomData<fn() -> T>,
}

impl<T, F> Observable for Create<T, F>
where
    F: Fn(Emitter<T>),
{
    type Item = T;

    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        let flag = DisposeFlag::new();
        let emitter = Emitter::new(Subscriber::new(observer, flag.clone()));
        let hooks = Arc::clone(&emitter.hooks);

        (self.producer)(emitter);

        Subscription::new(flag).with_teardown(move || {
            let pending: Vec<Hook> = hooks.lock().expect("hook lock poisoned").drain(..).collect();
            debug!(hooks = pending.len(), "running source teardown");
            for hook in pending {
                hook();
            }
        })
    }
}

/// Build a source from a closure that drives an [`Emitter`].
pub fn create<T, F>(producer: F) -> Create<T, F>
where
    F: Fn(Emitter<T>),
{
    Create {
        producer,
        _item: std::marker::PhantomData,
    }
}
