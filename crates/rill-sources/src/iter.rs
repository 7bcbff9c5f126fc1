use rill_core::{BoxObserver, DisposeFlag, Observable, Observer, Subscriber, Subscription};
use tracing::debug;

/// A source that emits every item of an iterable, then completes.
///
/// The iterable is cloned per subscription, so every subscriber sees the
/// full sequence. Emission runs synchronously inside `subscribe` and stops
/// early if the subscription is closed.
#[derive(Clone, Debug)]
pub struct FromIter<I> {
    items: I,
}

impl<I> FromIter<I> {
    /// Wrap an iterable.
    pub fn new(items: I) -> Self {
        Self { items }
    }
}

impl<I> Observable for FromIter<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;

    fn subscribe(&self, observer: BoxObserver<Self::Item>) -> Subscription {
        let flag = DisposeFlag::new();
        let mut subscriber = Subscriber::new(observer, flag.clone());

        // Checked before each pull so a chain closed downstream stops the
        // iterator, even an unbounded one.
        let mut items = self.items.clone().into_iter();
        let mut emitted = 0usize;
        while !subscriber.is_closed() {
            let Some(item) = items.next() else {
                subscriber.complete();
                break;
            };
            subscriber.next(item);
            emitted += 1;
        }

        debug!(emitted, "iterator source stopped");
        Subscription::new(flag)
    }
}

/// Emit every item of `items`, then complete.
pub fn from_iter<I: IntoIterator + Clone>(items: I) -> FromIter<I> {
    FromIter::new(items)
}

/// Emit a single value, then complete.
pub fn just<T: Clone>(value: T) -> FromIter<[T; 1]> {
    FromIter::new([value])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_core::{Notification, Recorder};

    #[test]
    fn emits_all_then_completes() {
        let recorder = Recorder::new();
        from_iter(vec![1, 2, 3]).subscribe(Box::new(recorder.clone()));
        assert_eq!(
            recorder.notifications(),
            vec![
                Notification::Next(1),
                Notification::Next(2),
                Notification::Next(3),
                Notification::Completed,
            ]
        );
    }

    #[test]
    fn each_subscription_replays() {
        let source = from_iter(0..3);
        let first = Recorder::new();
        let second = Recorder::new();
        source.subscribe(Box::new(first.clone()));
        source.subscribe(Box::new(second.clone()));
        assert_eq!(first.values(), vec![0, 1, 2]);
        assert_eq!(second.values(), vec![0, 1, 2]);
    }

    #[test]
    fn just_emits_once() {
        let recorder = Recorder::new();
        just("x").subscribe(Box::new(recorder.clone()));
        assert_eq!(recorder.values(), vec!["x"]);
        assert!(recorder.is_completed());
    }

    /// Accepts `limit` values, then reports itself closed.
    struct Bounded {
        seen: Vec<u64>,
        limit: usize,
    }

    impl Observer<u64> for Bounded {
        fn next(&mut self, value: u64) {
            self.seen.push(value);
        }

        fn error(&mut self, _error: rill_core::StreamError) {}

        fn complete(&mut self) {}

        fn is_closed(&self) -> bool {
            self.seen.len() >= self.limit
        }
    }

    #[test]
    fn stops_pulling_once_downstream_closes() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulled);
        let source = from_iter((0u64..).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        // Unbounded iterator: returning at all shows the loop honours the
        // downstream.
        source.subscribe(Box::new(Bounded {
            seen: Vec::new(),
            limit: 3,
        }));
        assert_eq!(pulled.load(Ordering::SeqCst), 3);
    }
}
