use std::sync::Arc;

use crate::disposable::Subscription;
use crate::observer::BoxObserver;

/// Producer side of a stream.
///
/// An `Observable` is a description, not a running process: every call to
/// [`Observable::subscribe`] starts an independent emission sequence and
/// returns the [`Subscription`] that controls it. Emission may begin (and
/// even finish) before `subscribe` returns.
///
/// Failures are reported through the observer's `error` callback, never as
/// a return value of `subscribe`.
pub trait Observable {
    /// Type of the values this observable emits.
    type Item;

    /// Start a new subscription delivering events to `observer`.
    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription;
}

/// A shareable, type-erased observable.
pub type BoxObservable<T> = Arc<dyn Observable<Item = T> + Send + Sync>;

impl<O: Observable + ?Sized> Observable for Arc<O> {
    type Item = O::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        (**self).subscribe(observer)
    }
}

impl<O: Observable + ?Sized> Observable for Box<O> {
    type Item = O::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        (**self).subscribe(observer)
    }
}

impl<O: Observable + ?Sized> Observable for &O {
    type Item = O::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        (**self).subscribe(observer)
    }
}
