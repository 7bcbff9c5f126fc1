use std::sync::Arc;

use rill_core::{BoxObserver, Observable, Observer, StreamError, Subscriber, Subscription};
use tracing::{debug, trace};

use crate::config::OperatorConfig;
use crate::fault::invoke;
use crate::lift::lift;

/// Comparator used by [`DistinctUntilChanged::by_partial_eq`].
pub type PartialEqComparator<T> = fn(&T, &T) -> bool;

/// Suppresses values equal to the most recently forwarded one.
///
/// Equality is always explicit: either the payload's `PartialEq` (via
/// [`DistinctUntilChanged::by_partial_eq`]) or a caller-supplied comparator.
/// The first value of every subscription is forwarded. A suppressed value
/// does not replace the remembered one.
pub struct DistinctUntilChanged<S, E> {
    source: S,
    eq: Arc<E>,
    config: OperatorConfig,
}

impl<S, E> DistinctUntilChanged<S, E> {
    /// Compare consecutive values with `eq`.
    pub fn new(source: S, eq: E) -> Self {
        Self {
            source,
            eq: Arc::new(eq),
            config: OperatorConfig::default(),
        }
    }

    /// Replace the operator configuration.
    pub fn with_config(mut self, config: OperatorConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S> DistinctUntilChanged<S, PartialEqComparator<S::Item>>
where
    S: Observable,
    S::Item: PartialEq,
{
    /// Compare consecutive values with the payload's `PartialEq`.
    pub fn by_partial_eq(source: S) -> Self {
        Self::new(source, <S::Item as PartialEq>::eq)
    }
}

impl<S, E> Observable for DistinctUntilChanged<S, E>
where
    S: Observable,
    S::Item: Clone + Send + 'static,
    E: Fn(&S::Item, &S::Item) -> bool + Send + Sync + 'static,
{
    type Item = S::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        let eq = Arc::clone(&self.eq);
        let config = self.config.clone();
        lift("distinct_until_changed", &self.source, observer, move |downstream| {
            Box::new(DistinctObserver {
                downstream,
                eq,
                config,
                state: DistinctState { previous: None },
            })
        })
    }
}

/// Last forwarded value of a single subscription; `None` until the first.
struct DistinctState<T> {
    previous: Option<T>,
}

struct DistinctObserver<T, E> {
    downstream: Subscriber<T>,
    eq: Arc<E>,
    config: OperatorConfig,
    state: DistinctState<T>,
}

impl<T, E> Observer<T> for DistinctObserver<T, E>
where
    T: Clone + Send,
    E: Fn(&T, &T) -> bool + Send + Sync,
{
    fn next(&mut self, value: T) {
        if self.downstream.is_closed() {
            return;
        }
        let changed = match &self.state.previous {
            None => true,
            Some(previous) => {
                match invoke(&self.config, "distinct_until_changed", || {
                    !(self.eq)(previous, &value)
                }) {
                    Ok(changed) => changed,
                    Err(error) => {
                        self.downstream.error(error);
                        return;
                    }
                }
            }
        };

        if changed {
            self.state.previous = Some(value.clone());
            self.downstream.next(value);
        } else {
            trace!(label = self.config.label(), "distinct_until_changed suppressed repeat");
        }
    }

    fn error(&mut self, error: StreamError) {
        debug!(operator = "distinct_until_changed", %error, "failure passed through");
        self.downstream.error(error);
    }

    fn complete(&mut self) {
        debug!(operator = "distinct_until_changed", "completion passed through");
        self.downstream.complete();
    }

    fn is_closed(&self) -> bool {
        self.downstream.is_closed()
    }
}
