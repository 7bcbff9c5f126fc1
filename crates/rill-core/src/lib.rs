//! Foundation contracts for Rill, a push-based stream composition library.
//!
//! Every other Rill crate depends on `rill-core`. It defines the protocol a
//! stream follows and nothing else: no operators, no sources.
//!
//! # Key Types
//!
//! - [`Observable`] — a description of how to produce a stream once subscribed
//! - [`Observer`] — the consumer contract: next, error, complete
//! - [`Subscription`] / [`Disposable`] — the handle that stops a subscription
//! - [`Subscriber`] — guarded downstream end enforcing the stream protocol
//! - [`StreamError`] — payload of the failure channel
//! - [`Recorder`] — an observer that records what it receives

pub mod disposable;
pub mod error;
pub mod notification;
pub mod observable;
pub mod observer;
pub mod subscriber;

pub use disposable::{DisposeFlag, Disposable, Subscription};
pub use error::{StreamError, StreamResult};
pub use notification::{Notification, Recorder};
pub use observable::{BoxObservable, Observable};
pub use observer::{BoxObserver, CallbackObserver, Observer};
pub use subscriber::Subscriber;
