use std::sync::{Arc, Mutex};

use crate::error::StreamError;
use crate::observer::Observer;

/// One event of a stream, reified as a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification<T> {
    /// A value.
    Next(T),
    /// Terminal failure.
    Error(StreamError),
    /// Terminal completion.
    Completed,
}

impl<T> Notification<T> {
    /// Returns `true` for `Error` and `Completed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// Replay this notification into an observer.
    pub fn deliver<O: Observer<T> + ?Sized>(self, observer: &mut O) {
        match self {
            Self::Next(value) => observer.next(value),
            Self::Error(error) => observer.error(error),
            Self::Completed => observer.complete(),
        }
    }
}

/// An observer that records every notification it receives.
///
/// Clones share the same log, so a clone can be handed to `subscribe` while
/// the original is kept for inspection. Intended for tests and embedding.
#[derive(Debug)]
pub struct Recorder<T> {
    log: Arc<Mutex<Vec<Notification<T>>>>,
}

impl<T> Recorder<T> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of notifications received so far.
    pub fn len(&self) -> usize {
        self.log.lock().expect("recorder lock poisoned").len()
    }

    /// Returns `true` if nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a completion was received.
    pub fn is_completed(&self) -> bool {
        self.log
            .lock()
            .expect("recorder lock poisoned")
            .iter()
            .any(|n| matches!(n, Notification::Completed))
    }

    /// Returns `true` if any terminal event was received.
    pub fn is_terminated(&self) -> bool {
        self.log
            .lock()
            .expect("recorder lock poisoned")
            .iter()
            .any(Notification::is_terminal)
    }

    /// The first failure received, if any.
    pub fn error(&self) -> Option<StreamError> {
        self.log
            .lock()
            .expect("recorder lock poisoned")
            .iter()
            .find_map(|n| match n {
                Notification::Error(e) => Some(e.clone()),
                _ => None,
            })
    }
}

impl<T: Clone> Recorder<T> {
    /// Snapshot of every notification in arrival order.
    pub fn notifications(&self) -> Vec<Notification<T>> {
        self.log.lock().expect("recorder lock poisoned").clone()
    }

    /// Snapshot of the values received, in arrival order.
    pub fn values(&self) -> Vec<T> {
        self.log
            .lock()
            .expect("recorder lock poisoned")
            .iter()
            .filter_map(|n| match n {
                Notification::Next(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Observer<T> for Recorder<T> {
    fn next(&mut self, value: T) {
        self.log
            .lock()
            .expect("recorder lock poisoned")
            .push(Notification::Next(value));
    }

    fn error(&mut self, error: StreamError) {
        self.log
            .lock()
            .expect("recorder lock poisoned")
            .push(Notification::Error(error));
    }

    fn complete(&mut self) {
        self.log
            .lock()
            .expect("recorder lock poisoned")
            .push(Notification::Completed);
    }
}
