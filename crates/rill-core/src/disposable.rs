use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

/// A handle that releases the resources of one subscription.
///
/// Implementations must be idempotent: disposing twice has the same effect
/// as disposing once.
pub trait Disposable: Send + Sync {
    /// Stop routing events to the subscription and release its resources.
    fn dispose(&self);

    /// Returns `true` once [`Disposable::dispose`] has been called.
    fn is_disposed(&self) -> bool;
}

// ---------------------------------------------------------------------------
// DisposeFlag
// ---------------------------------------------------------------------------

/// Shared "disposed" marker for one subscription.
///
/// Cloning shares the underlying flag. Every observer wrapper in an operator
/// chain holds a clone and checks it before forwarding.
#[derive(Clone, Default)]
pub struct DisposeFlag(Arc<AtomicBool>);

impl DisposeFlag {
    /// Create a fresh, not-yet-disposed flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the flag disposed. Returns `true` only for the call that
    /// actually flipped it.
    pub fn dispose(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    /// Whether the flag has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl fmt::Debug for DisposeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DisposeFlag")
            .field(&self.is_disposed())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

type Teardown = Box<dyn FnOnce() + Send>;

/// The [`Disposable`] returned by every `subscribe` call.
///
/// An operator's subscription owns the subscription of its upstream, so
/// disposing the outermost handle disposes the whole chain down to the
/// source. Dropping a `Subscription` does **not** dispose it.
pub struct Subscription {
    flag: DisposeFlag,
    upstream: Option<Box<Subscription>>,
    teardown: Mutex<Option<Teardown>>,
}

impl Subscription {
    /// Create a subscription controlled by the given flag.
    pub fn new(flag: DisposeFlag) -> Self {
        Self {
            flag,
            upstream: None,
            teardown: Mutex::new(None),
        }
    }

    /// Create a subscription that also disposes `upstream` when disposed.
    pub fn chained(flag: DisposeFlag, upstream: Subscription) -> Self {
        Self {
            flag,
            upstream: Some(Box::new(upstream)),
            teardown: Mutex::new(None),
        }
    }

    /// A subscription that is already disposed.
    ///
    /// Used by sources that have nothing left to release.
    pub fn closed() -> Self {
        let flag = DisposeFlag::new();
        flag.dispose();
        Self::new(flag)
    }

    /// Attach a hook that runs exactly once, on the first dispose.
    pub fn with_teardown(self, teardown: impl FnOnce() + Send + 'static) -> Self {
        *self.teardown.lock().expect("teardown lock poisoned") = Some(Box::new(teardown));
        self
    }

    /// The flag shared with the observers of this subscription.
    pub fn flag(&self) -> &DisposeFlag {
        &self.flag
    }

    /// Number of subscriptions in this chain, this one included.
    pub fn depth(&self) -> usize {
        1 + self.upstream.as_ref().map_or(0, |up| up.depth())
    }
}

impl Disposable for Subscription {
    fn dispose(&self) {
        if !self.flag.dispose() {
            return;
        }
        debug!(depth = self.depth(), "subscription disposed");

        if let Some(upstream) = &self.upstream {
            upstream.dispose();
        }
        let teardown = self.teardown.lock().expect("teardown lock poisoned").take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    fn is_disposed(&self) -> bool {
        self.flag.is_disposed()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn flag_flips_once() {
        let flag = DisposeFlag::new();
        let shared = flag.clone();
        assert!(!shared.is_disposed());
        assert!(flag.dispose());
        assert!(!shared.dispose());
        assert!(shared.is_disposed());
    }

    #[test]
    fn dispose_propagates_upstream() {
        let source = DisposeFlag::new();
        let middle = DisposeFlag::new();
        let outer = DisposeFlag::new();

        let sub = Subscription::chained(
            outer.clone(),
            Subscription::chained(middle.clone(), Subscription::new(source.clone())),
        );
        assert_eq!(sub.depth(), 3);

        sub.dispose();
        assert!(outer.is_disposed());
        assert!(middle.is_disposed());
        assert!(source.is_disposed());
    }

    #[test]
    fn teardown_runs_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = Subscription::new(DisposeFlag::new()).with_teardown(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        sub.dispose();
        sub.dispose();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sub.is_disposed());
    }

    #[test]
    fn dropping_does_not_dispose() {
        let flag = DisposeFlag::new();
        drop(Subscription::new(flag.clone()));
        assert!(!flag.is_disposed());
    }

    #[test]
    fn closed_subscription_is_disposed() {
        assert!(Subscription::closed().is_disposed());
    }
}
