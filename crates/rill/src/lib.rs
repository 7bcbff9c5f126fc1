//! Push-based stream composition.
//!
//! An [`Observable`] pushes values to an [`Observer`] until it completes or
//! fails. Operators wrap an observable to produce a new one without touching
//! the original; subscribing to the outermost operator subscribes the whole
//! chain, and disposing the returned [`Subscription`] stops it.
//!
//! # Quick Start
//!
//! ```rust
//! use rill::prelude::*;
//!
//! let recorder = Recorder::new();
//! let sub = from_iter(vec![10, 20, 20, 30])
//!     .distinct_until_changed()
//!     .skip(1)
//!     .map(|x| x / 10)
//!     .subscribe(Box::new(recorder.clone()));
//!
//! assert_eq!(recorder.values(), vec![2, 3]);
//! assert!(recorder.is_completed());
//! sub.dispose();
//! ```

pub use rill_core::{
    BoxObservable, BoxObserver, CallbackObserver, Disposable, DisposeFlag, Notification,
    Observable, Observer, Recorder, StreamError, StreamResult, Subscriber, Subscription,
};
pub use rill_ops::{
    ConfigError, ConfigResult, DistinctUntilChanged, Exclude, FaultPolicy, Filter, Map, Negate,
    ObservableExt, OperatorConfig, Predicate, Skip, StartWith, TryFilter, TryMap,
};
pub use rill_sources::{create, empty, fail, from_iter, just, never, Emitter};

/// Everything needed to build and consume a stream.
pub mod prelude {
    pub use rill_core::{Disposable, Observable, Observer, Recorder, StreamError, Subscription};
    pub use rill_ops::{FaultPolicy, ObservableExt, OperatorConfig};
    pub use rill_sources::{create, empty, fail, from_iter, just, never, Emitter};
}
