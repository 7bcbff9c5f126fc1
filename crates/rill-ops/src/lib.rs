//! Stream operators for Rill.
//!
//! Every operator is a decorator: it holds one upstream [`Observable`] plus
//! its parameters, and implements `Observable` by subscribing upstream with a
//! wrapped observer. Completion and failure pass through unchanged. Mutable
//! operator state (the skip countdown, the last distinct value) lives in the
//! wrapping observer and is created fresh for each subscription.
//!
//! Operators that run user functions accept an [`OperatorConfig`] whose
//! [`FaultPolicy`] decides whether a panic unwinds (the default) or is routed
//! to the failure channel. `try_map` and `try_filter` route `Err` results to
//! the failure channel explicitly.
//!
//! [`Observable`]: rill_core::Observable

pub mod config;
pub mod distinct;
pub mod error;
pub mod ext;
pub mod filter;
pub mod map;
pub mod skip;
pub mod start_with;

mod fault;
mod lift;

pub use config::{FaultPolicy, OperatorConfig};
pub use distinct::{DistinctUntilChanged, PartialEqComparator};
pub use error::{ConfigError, ConfigResult};
pub use ext::ObservableExt;
pub use filter::{Exclude, Filter, Negate, Predicate, TryFilter};
pub use map::{Map, TryMap};
pub use skip::Skip;
pub use start_with::StartWith;
