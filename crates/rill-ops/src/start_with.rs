use rill_core::{BoxObserver, Observable, Observer, Subscription};

use crate::lift::lift;

/// Emits a seed value, then everything the upstream emits.
///
/// The seed is delivered synchronously on every subscription, before the
/// upstream is subscribed, so it is always the first value observed even
/// when the upstream terminates without emitting.
#[derive(Clone, Debug)]
pub struct StartWith<S, T> {
    source: S,
    seed: T,
}

impl<S, T> StartWith<S, T> {
    pub fn new(source: S, seed: T) -> Self {
        Self { source, seed }
    }
}

impl<S, T> Observable for StartWith<S, T>
where
    S: Observable<Item = T>,
    T: Clone + 'static,
{
    type Item = T;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        let seed = self.seed.clone();
        lift("start_with", &self.source, observer, move |mut downstream| {
            downstream.next(seed);
            Box::new(downstream)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::{Notification, Recorder, StreamError};
    use rill_sources::{empty, fail, from_iter};

    #[test]
    fn seed_precedes_upstream() {
        let recorder = Recorder::new();
        StartWith::new(from_iter(vec![1, 2]), 0).subscribe(Box::new(recorder.clone()));
        assert_eq!(recorder.values(), vec![0, 1, 2]);
        assert!(recorder.is_completed());
    }

    #[test]
    fn seed_before_empty_completion() {
        let recorder = Recorder::new();
        StartWith::new(empty(), 0).subscribe(Box::new(recorder.clone()));
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Next(0), Notification::Completed]
        );
    }

    #[test]
    fn seed_before_immediate_failure() {
        let recorder = Recorder::new();
        StartWith::new(fail("down"), 9).subscribe(Box::new(recorder.clone()));
        assert_eq!(
            recorder.notifications(),
            vec![Notification::Next(9), Notification::Error(StreamError::new("down"))]
        );
    }

    #[test]
    fn seed_repeats_per_subscription() {
        let op = StartWith::new(from_iter(vec![5]), 4);
        for _ in 0..3 {
            let recorder = Recorder::new();
            op.subscribe(Box::new(recorder.clone()));
            assert_eq!(recorder.values(), vec![4, 5]);
        }
    }
}
