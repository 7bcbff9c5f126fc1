use std::fmt;
use std::marker::PhantomData;

use rill_core::{
    BoxObserver, DisposeFlag, Observable, Observer, StreamError, Subscriber, Subscription,
};

/// A source that completes immediately without emitting.
pub struct Empty<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> Observable for Empty<T> {
    type Item = T;

    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        let flag = DisposeFlag::new();
        Subscriber::new(observer, flag.clone()).complete();
        Subscription::new(flag)
    }
}

impl<T> fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Empty")
    }
}

/// A source that never emits and never terminates.
pub struct Never<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> Observable for Never<T> {
    type Item = T;

    fn subscribe(&self, _observer: BoxObserver<T>) -> Subscription {
        Subscription::new(DisposeFlag::new())
    }
}

impl<T> fmt::Debug for Never<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Never")
    }
}

/// A source that fails immediately with a fixed error.
pub struct Fail<T> {
    error: StreamError,
    _item: PhantomData<fn() -> T>,
}

impl<T> Observable for Fail<T> {
    type Item = T;

    fn subscribe(&self, observer: BoxObserver<T>) -> Subscription {
        let flag = DisposeFlag::new();
        Subscriber::new(observer, flag.clone()).error(self.error.clone());
        Subscription::new(flag)
    }
}

impl<T> fmt::Debug for Fail<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fail").field("error", &self.error).finish()
    }
}

/// Complete immediately.
pub fn empty<T>() -> Empty<T> {
    Empty { _item: PhantomData }
}

/// Never emit anything.
pub fn never<T>() -> Never<T> {
    Never { _item: PhantomData }
}

/// Fail immediately with `error`.
pub fn fail<T>(error: impl Into<StreamError>) -> Fail<T> {
    Fail {
        error: error.into(),
        _item: PhantomData,
    }
}
