use rill_core::{BoxObserver, DisposeFlag, Observable, Subscriber, Subscription};
use tracing::debug;

/// Subscribe `source` through an operator wrapper.
///
/// Creates the subscription's [`DisposeFlag`], guards the downstream observer
/// with a [`Subscriber`], lets `wrap` build the per-subscription observer that
/// is handed upstream, and chains the resulting subscription to the
/// upstream's so that disposal reaches the source.
pub(crate) fn lift<S, U, W>(
    operator: &'static str,
    source: &S,
    observer: BoxObserver<U>,
    wrap: W,
) -> Subscription
where
    S: Observable,
    W: FnOnce(Subscriber<U>) -> BoxObserver<S::Item>,
{
    let flag = DisposeFlag::new();
    let downstream = Subscriber::new(observer, flag.clone());
    debug!(operator, "subscribing upstream");
    let upstream = source.subscribe(wrap(downstream));
    Subscription::chained(flag, upstream)
}
