use rill_core::{BoxObserver, Observable, Observer, StreamError, Subscriber, Subscription};
use tracing::{debug, trace};

use crate::lift::lift;

/// Suppresses the first `count` values of each subscription.
#[derive(Clone, Debug)]
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }
}

impl<S> Observable for Skip<S>
where
    S: Observable,
    S::Item: 'static,
{
    type Item = S::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        let state = SkipState {
            remaining: self.count,
        };
        lift("skip", &self.source, observer, move |downstream| {
            Box::new(SkipObserver { downstream, state })
        })
    }
}

/// Countdown owned by a single subscription.
struct SkipState {
    remaining: usize,
}

struct SkipObserver<T> {
    downstream: Subscriber<T>,
    state: SkipState,
}

impl<T> Observer<T> for SkipObserver<T> {
    fn next(&mut self, value: T) {
        if self.state.remaining > 0 {
            self.state.remaining -= 1;
            trace!(remaining = self.state.remaining, "skip suppressed value");
            return;
        }
        self.downstream.next(value);
    }

    fn error(&mut self, error: StreamError) {
        debug!(operator = "skip", %error, "failure passed through");
        self.downstream.error(error);
    }

    fn complete(&mut self) {
        debug!(operator = "skip", "completion passed through");
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
    fn drops_leading_values() {
        let recorder = Recorder::new();
        Skip::new(from_iter(vec![10, 20, 30]), 2).subscribe(Box::new(recorder.clone()));
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Next(30), Notification::Completed]
        );
    }

    #[test]
    fn zero_forwards_everything() {
        let recorder = Recorder::new();
        Skip::new(from_iter(vec![1, 2]), 0).subscribe(Box::new(recorder.clone()));
        assert_eq!(recorder.values(), vec![1, 2]);
    }

    #[test]
    fn count_beyond_length_still_completes() {
        let recorder = Recorder::new();
        Skip::new(from_iter(vec![1, 2]), 5).subscribe(Box::new(recorder.clone()));
        assert_eq!(recorder.notifications(), vec![Notification::Completed]);
    }

    #[test]
    fn failure_passes_through_while_skipping() {
        let source = create(|tx: Emitter<i32>| {
            tx.next(1);
            tx.error("lost");
        });
        let recorder = Recorder::new();
        Skip::new(source, 3).subscribe(Box::new(recorder.clone()));
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Error(StreamError::new("lost"))]
        );
    }

    #[test]
    fn countdown_resets_per_subscription() {
        let op = Skip::new(from_iter(vec![1, 2, 3]), 1);
        let first = Recorder::new();
        let second = Recorder::new();
        op.subscribe(Box::new(first.clone()));
        op.subscribe(Box::new(second.clone()));
        assert_eq!(first.values(), vec![2, 3]);
        assert_eq!(second.values(), vec![2, 3]);
    }
}
