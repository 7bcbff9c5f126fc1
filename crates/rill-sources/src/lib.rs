//! Terminal source observables for Rill.
//!
//! Operators wrap an upstream observable; the sources here are where a chain
//! bottoms out. [`from_iter`], [`just`], [`empty`], [`never`], and [`fail`]
//! emit synchronously inside `subscribe`. [`create`] hands the caller an
//! [`Emitter`] that can be stored and driven later, from any thread.

pub mod basic;
pub mod create;
pub mod iter;

pub use basic::{empty, fail, never, Empty, Fail, Never};
pub use create::{create, Create, Emitter};
pub use iter::{from_iter, just, FromIter};
