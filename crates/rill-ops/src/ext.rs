use std::fmt;
use std::sync::Arc;

use rill_core::{BoxObservable, CallbackObserver, Observable, StreamError, Subscription};

use crate::distinct::{DistinctUntilChanged, PartialEqComparator};
use crate::filter::{Exclude, Filter, TryFilter};
use crate::map::{Map, TryMap};
use crate::skip::Skip;
use crate::start_with::StartWith;

/// Fluent composition for every [`Observable`].
///
/// Each combinator consumes `self` and returns a new observable wrapping it;
/// the original is never altered. Wrap a source in an `Arc` (or call
/// [`ObservableExt::boxed`]) to compose several chains over one source.
///
/// ```rust
/// use rill_core::{Observable, Recorder};
/// use rill_ops::ObservableExt;
/// use rill_sources::from_iter;
///
/// let recorder = Recorder::new();
/// from_iter(vec![1, 1, 2, 3, 3, 4])
///     .distinct_until_changed()
///     .skip(1)
///     .map(|x| x * 10)
///     .exclude(|x| *x == 30)
///     .start_with(0)
///     .subscribe(Box::new(recorder.clone()));
/// assert_eq!(recorder.values(), vec![0, 20, 40]);
/// assert!(recorder.is_completed());
/// ```
pub trait ObservableExt: Observable + Sized {
    /// Emit `seed` before anything the upstream emits.
    fn start_with(self, seed: Self::Item) -> StartWith<Self, Self::Item> {
        StartWith::new(self, seed)
    }

    /// Suppress the first `count` values of each subscription.
    fn skip(self, count: usize) -> Skip<Self> {
        Skip::new(self, count)
    }

    /// Suppress values equal (by `PartialEq`) to the last forwarded one.
    fn distinct_until_changed(self) -> DistinctUntilChanged<Self, PartialEqComparator<Self::Item>>
    where
        Self::Item: PartialEq,
    {
        DistinctUntilChanged::by_partial_eq(self)
    }

    /// Suppress values that `eq` considers equal to the last forwarded one.
    fn distinct_until_changed_by<E>(self, eq: E) -> DistinctUntilChanged<Self, E>
    where
        E: Fn(&Self::Item, &Self::Item) -> bool + Send + Sync + 'static,
    {
        DistinctUntilChanged::new(self, eq)
    }

    /// Transform every value.
    fn map<U, F>(self, transform: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U + Send + Sync + 'static,
    {
        Map::new(self, transform)
    }

    /// Transform every value, failing the stream on the first `Err`.
    ///
    /// A `StreamError` is delivered as is; other errors are labelled
    /// `StreamError::Operator { operator: "try_map", .. }`.
    fn try_map<U, E, F>(self, transform: F) -> TryMap<Self, F>
    where
        F: Fn(Self::Item) -> Result<U, E> + Send + Sync + 'static,
        E: fmt::Display + 'static,
    {
        TryMap::new(self, transform)
    }

    /// Keep only values matching `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync + 'static,
    {
        Filter::new(self, predicate)
    }

    /// Keep only values matching `predicate`, failing the stream on the
    /// first `Err`.
    fn try_filter<E, P>(self, predicate: P) -> TryFilter<Self, P>
    where
        P: Fn(&Self::Item) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display + 'static,
    {
        TryFilter::new(self, predicate)
    }

    /// Drop values matching `predicate`.
    fn exclude<P>(self, predicate: P) -> Exclude<Self, P>
    where
        P: Fn(&Self::Item) -> bool + Send + Sync + 'static,
    {
        Filter::exclude(self, predicate)
    }

    /// Subscribe with next, completion, and failure callbacks.
    fn subscribe_with<N, C, F>(&self, on_next: N, on_complete: C, on_error: F) -> Subscription
    where
        N: FnMut(Self::Item) + Send + 'static,
        C: FnMut() + Send + 'static,
        F: FnMut(StreamError) + Send + 'static,
    {
        self.subscribe(Box::new(CallbackObserver::new(on_next, on_complete, on_error)))
    }

    /// Subscribe with a next callback only; terminal events are ignored.
    fn subscribe_next<N>(&self, on_next: N) -> Subscription
    where
        N: FnMut(Self::Item) + Send + 'static,
    {
        self.subscribe(Box::new(CallbackObserver::next_only(on_next)))
    }

    /// Erase the concrete operator type.
    fn boxed(self) -> BoxObservable<Self::Item>
    where
        Self: Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

impl<O: Observable> ObservableExt for O {}
