use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rill_core::{BoxObserver, Observable, Observer, StreamError, Subscriber, Subscription};
use tracing::debug;

use crate::config::OperatorConfig;
use crate::fault::{invoke, operator_error};
use crate::lift::lift;

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Forwards `transform(value)` for every upstream value.
pub struct Map<S, F> {
    source: S,
    transform: Arc<F>,
    config: OperatorConfig,
}

impl<S, F> Map<S, F> {
    pub fn new(source: S, transform: F) -> Self {
        Self {
            source,
            transform: Arc::new(transform),
            config: OperatorConfig::default(),
        }
    }

    /// Replace the operator configuration.
    pub fn with_config(mut self, config: OperatorConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, F, U> Observable for Map<S, F>
where
    S: Observable,
    S::Item: 'static,
    F: Fn(S::Item) -> U + Send + Sync + 'static,
    U: 'static,
{
    type Item = U;

    fn subscribe(&self, observer: BoxObserver<U>) -> Subscription {
        let transform = Arc::clone(&self.transform);
        let config = self.config.clone();
        lift("map", &self.source, observer, move |downstream| {
            Box::new(MapObserver {
                downstream,
                transform,
                config,
                _input: PhantomData,
            })
        })
    }
}

struct MapObserver<T, U, F> {
    downstream: Subscriber<U>,
    transform: Arc<F>,
    config: OperatorConfig,
    _input: PhantomData<fn(T)>,
}

impl<T, U, F> Observer<T> for MapObserver<T, U, F>
where
    F: Fn(T) -> U + Send + Sync,
{
    fn next(&mut self, value: T) {
        if self.downstream.is_closed() {
            return;
        }
        match invoke(&self.config, "map", || (self.transform)(value)) {
            Ok(mapped) => self.downstream.next(mapped),
            Err(error) => self.downstream.error(error),
        }
    }

    fn error(&mut self, error: StreamError) {
        debug!(operator = "map", label = self.config.label(), %error, "failure passed through");
        self.downstream.error(error);
    }

    fn complete(&mut self) {
        debug!(operator = "map", label = self.config.label(), "completion passed through");
        self.downstream.complete();
    }

    fn is_closed(&self) -> bool {
        self.downstream.is_closed()
    }
}

// ---------------------------------------------------------------------------
// TryMap
// ---------------------------------------------------------------------------

/// Like [`Map`], but the transform is fallible.
///
/// An `Err` is converted into a [`StreamError`] and delivered as the
/// subscription's failure; later upstream values are ignored.
pub struct TryMap<S, F> {
    source: S,
    transform: Arc<F>,
    config: OperatorConfig,
}

impl<S, F> TryMap<S, F> {
    pub fn new(source: S, transform: F) -> Self {
        Self {
            source,
            transform: Arc::new(transform),
            config: OperatorConfig::default(),
        }
    }

    /// Replace the operator configuration.
    pub fn with_config(mut self, config: OperatorConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, F, U, E> Observable for TryMap<S, F>
where
    S: Observable,
    S::Item: 'static,
    F: Fn(S::Item) -> Result<U, E> + Send + Sync + 'static,
    E: fmt::Display + 'static,
    U: 'static,
{
    type Item = U;

    fn subscribe(&self, observer: BoxObserver<U>) -> Subscription {
        let transform = Arc::clone(&self.transform);
        let config = self.config.clone();
        lift("try_map", &self.source, observer, move |downstream| {
            Box::new(TryMapObserver {
                downstream,
                transform,
                config,
                _input: PhantomData,
            })
        })
    }
}

struct TryMapObserver<T, U, F> {
    downstream: Subscriber<U>,
    transform: Arc<F>,
    config: OperatorConfig,
    _input: PhantomData<fn(T)>,
}

impl<T, U, E, F> Observer<T> for TryMapObserver<T, U, F>
where
    F: Fn(T) -> Result<U, E> + Send + Sync,
    E: fmt::Display + 'static,
{
    fn next(&mut self, value: T) {
        if self.downstream.is_closed() {
            return;
        }
        match invoke(&self.config, "try_map", || (self.transform)(value)) {
            Ok(Ok(mapped)) => self.downstream.next(mapped),
            Ok(Err(error)) => {
                let error = operator_error("try_map", error);
                debug!(operator = "try_map", label = self.config.label(), %error, "transform failed");
                self.downstream.error(error);
            }
            Err(error) => self.downstream.error(error),
        }
    }

    fn error(&mut self, error: StreamError) {
        debug!(operator = "try_map", label = self.config.label(), %error, "failure passed through");
        self.downstream.error(error);
    }

    fn complete(&mut self) {
        debug!(operator = "try_map", label = self.config.label(), "completion passed through");
        self.downstream.complete();
    }

    fn is_closed(&self) -> bool {
        self.downstream.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::{Notification, Recorder};
    use rill_sources::{create, from_iter, Emitter};

    #[test]
    fn transforms_in_order() {
        let recorder = Recorder::new();
        Map::new(from_iter(vec![1, 2, 3]), |x: i32| x * 10).subscribe(Box::new(recorder.clone()));
        assert_eq!(recorder.values(), vec![10, 20, 30]);
        assert!(recorder.is_completed());
    }

    #[test]
    fn changes_item_type() {
        let recorder = Recorder::new();
        Map::new(from_iter(vec![1u8, 2]), |x: u8| format!("#{x}"))
            .subscribe(Box::new(recorder.clone()));
        assert_eq!(recorder.values(), vec!["#1".to_string(), "#2".to_string()]);
    }

    #[test]
    fn value_then_failure_never_completes() {
        let source = create(|tx: Emitter<i32>| {
            tx.next(5);
            tx.error("E");
        });
        let recorder = Recorder::new();
        Map::new(source, |x: i32| x * 2).subscribe(Box::new(recorder.clone()));
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Next(10), Notification::Error(StreamError::new("E"))]
        );
        assert!(!recorder.is_completed());
    }

    #[test]
    fn captured_panic_terminates() {
        let recorder = Recorder::new();
        Map::new(from_iter(vec![2, 0, 5]), |x: i32| 10 / x)
            .with_config(OperatorConfig::capturing().labeled("ratio"))
            .subscribe(Box::new(recorder.clone()));

        assert_eq!(recorder.values(), vec![5]);
        let error = recorder.error().unwrap();
        assert!(matches!(error, StreamError::Panicked { operator: "map", .. }));
        assert!(!recorder.is_completed());
    }

    #[test]
    #[should_panic(expected = "unsupported value")]
    fn default_policy_lets_panics_unwind() {
        Map::new(from_iter(vec![1]), |_: i32| -> i32 { panic!("unsupported value") })
            .subscribe(Box::new(Recorder::new()));
    }

    #[test]
    fn try_map_routes_err_to_failure() {
        let recorder = Recorder::new();
        TryMap::new(from_iter(vec!["1", "x", "3"]), |s: &str| {
            s.parse::<i32>()
                .map_err(|e| StreamError::operator("try_map", e.to_string()))
        })
        .subscribe(Box::new(recorder.clone()));

        assert_eq!(recorder.values(), vec![1]);
        assert!(matches!(
            recorder.error(),
            Some(StreamError::Operator { operator: "try_map", .. })
        ));
        assert!(!recorder.is_completed());
    }

    #[test]
    fn try_map_all_ok_completes() {
        let recorder = Recorder::new();
        TryMap::new(from_iter(vec![1, 2]), |x: i32| Ok::<_, StreamError>(x + 1))
            .subscribe(Box::new(recorder.clone()));
        assert_eq!(recorder.values(), vec![2, 3]);
        assert!(recorder.is_completed());
    }

    #[test]
    fn try_map_labels_foreign_errors() {
        let recorder = Recorder::new();
        TryMap::new(from_iter(vec!["4", "four"]), |s: &str| s.parse::<i32>())
            .subscribe(Box::new(recorder.clone()));

        assert_eq!(recorder.values(), vec![4]);
        assert_eq!(
            recorder.error(),
            Some(StreamError::operator("try_map", "invalid digit found in string"))
        );
    }

    #[test]
    fn captured_panic_stops_an_unbounded_source() {
        let recorder = Recorder::new();
        Map::new(from_iter(0u32..), |x: u32| if x < 2 { x } else { panic!("too far") })
            .with_config(OperatorConfig::capturing())
            .subscribe(Box::new(recorder.clone()));

        assert_eq!(recorder.values(), vec![0, 1]);
        assert!(recorder.error().is_some_and(|e| e.is_panic()));
    }
}
