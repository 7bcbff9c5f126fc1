use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rill_core::{BoxObserver, Observable, Observer, StreamError, Subscriber, Subscription};
use tracing::{debug, trace};

use crate::config::OperatorConfig;
use crate::fault::{invoke, operator_error};
use crate::lift::lift;

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// A pure test over a borrowed value.
///
/// Implemented for every `Fn(&T) -> bool + Send + Sync` closure, and for
/// [`Negate`].
pub trait Predicate<T: ?Sized>: Send + Sync {
    fn test(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn test(&self, value: &T) -> bool {
        self(value)
    }
}

/// The logical negation of a predicate.
#[derive(Clone, Copy, Debug)]
pub struct Negate<P>(pub P);

impl<T: ?Sized, P: Predicate<T>> Predicate<T> for Negate<P> {
    fn test(&self, value: &T) -> bool {
        !self.0.test(value)
    }
}

// ---------------------------------------------------------------------------
// Filter / Exclude
// ---------------------------------------------------------------------------

/// Forwards only the values for which the predicate holds.
pub struct Filter<S, P> {
    source: S,
    predicate: Arc<P>,
    name: &'static str,
    config: OperatorConfig,
}

/// Forwards only the values for which the predicate does **not** hold.
///
/// This is a [`Filter`] over the [`Negate`]d predicate.
pub type Exclude<S, P> = Filter<S, Negate<P>>;

impl<S, P> Filter<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Arc::new(predicate),
            name: "filter",
            config: OperatorConfig::default(),
        }
    }

    /// Replace the operator configuration.
    pub fn with_config(mut self, config: OperatorConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, P> Filter<S, Negate<P>> {
    /// Build the complement of [`Filter::new`].
    pub fn exclude(source: S, predicate: P) -> Self {
        Self {
            name: "exclude",
            ..Filter::new(source, Negate(predicate))
        }
    }
}

impl<S, P> Observable for Filter<S, P>
where
    S: Observable,
    S::Item: 'static,
    P: Predicate<S::Item> + 'static,
{
    type Item = S::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        let predicate = Arc::clone(&self.predicate);
        let name = self.name;
        let config = self.config.clone();
        lift(name, &self.source, observer, move |downstream| {
            Box::new(FilterObserver {
                downstream,
                predicate,
                name,
                config,
            })
        })
    }
}

struct FilterObserver<T, P> {
    downstream: Subscriber<T>,
    predicate: Arc<P>,
    name: &'static str,
    config: OperatorConfig,
}

impl<T, P: Predicate<T>> Observer<T> for FilterObserver<T, P> {
    fn next(&mut self, value: T) {
        if self.downstream.is_closed() {
            return;
        }
        match invoke(&self.config, self.name, || self.predicate.test(&value)) {
            Ok(true) => self.downstream.next(value),
            Ok(false) => trace!(operator = self.name, label = self.config.label(), "value suppressed"),
            Err(error) => self.downstream.error(error),
        }
    }

    fn error(&mut self, error: StreamError) {
        debug!(operator = self.name, label = self.config.label(), %error, "failure passed through");
        self.downstream.error(error);
    }

    fn complete(&mut self) {
        debug!(operator = self.name, label = self.config.label(), "completion passed through");
        self.downstream.complete();
    }

    fn is_closed(&self) -> bool {
        self.downstream.is_closed()
    }
}

// ---------------------------------------------------------------------------
// TryFilter
// ---------------------------------------------------------------------------

/// Like [`Filter`], but the predicate is fallible.
///
/// An `Err` is converted into a [`StreamError`] and delivered as the
/// subscription's failure.
pub struct TryFilter<S, P> {
    source: S,
    predicate: Arc<P>,
    config: OperatorConfig,
}

impl<S, P> TryFilter<S, P> {
    pub fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate: Arc::new(predicate),
            config: OperatorConfig::default(),
        }
    }

    /// Replace the operator configuration.
    pub fn with_config(mut self, config: OperatorConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, P, E> Observable for TryFilter<S, P>
where
    S: Observable,
    S::Item: 'static,
    P: Fn(&S::Item) -> Result<bool, E> + Send + Sync + 'static,
    E: fmt::Display + 'static,
{
    type Item = S::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        let predicate = Arc::clone(&self.predicate);
        let config = self.config.clone();
        lift("try_filter", &self.source, observer, move |downstream| {
            Box::new(TryFilterObserver {
                downstream,
                predicate,
                config,
                _error: PhantomData,
            })
        })
    }
}

struct TryFilterObserver<T, P, E> {
    downstream: Subscriber<T>,
    predicate: Arc<P>,
    config: OperatorConfig,
    _error: PhantomData<fn() -> E>,
}

impl<T, P, E> Observer<T> for TryFilterObserver<T, P, E>
where
    P: Fn(&T) -> Result<bool, E> + Send + Sync,
    E: fmt::Display + 'static,
{
    fn next(&mut self, value: T) {
        if self.downstream.is_closed() {
            return;
        }
        match invoke(&self.config, "try_filter", || (self.predicate)(&value)) {
            Ok(Ok(true)) => self.downstream.next(value),
            Ok(Ok(false)) => trace!(operator = "try_filter", label = self.config.label(), "value suppressed"),
            Ok(Err(error)) => self.downstream.error(operator_error("try_filter", error)),
            Err(error) => self.downstream.error(error),
        }
    }

    fn error(&mut self, error: StreamError) {
        debug!(operator = "try_filter", label = self.config.label(), %error, "failure passed through");
        self.downstream.error(error);
    }

    fn complete(&mut self) {
        debug!(operator = "try_filter", label = self.config.label(), "completion passed through");
        self.downstream.complete();
    }

    fn is_closed(&self) -> bool {
        self.downstream.is_closed()
    }
}
