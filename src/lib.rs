//! Lazily evaluated, composable continuation-chain futures.
//!
//! A [`Future`] is a move-only pipeline of callbacks threaded together by a
//! [`Chain`]: each stage receives the previous stage's [`Outcome`] and a
//! [`Promise`] for the next one, and may settle it inline or stash the
//! promise and settle it later. Nothing runs until [`Future::done`] attaches
//! the terminal sink, and a pipeline that is dropped unterminated runs
//! nothing at all. Failures carry an application-chosen error type and skip
//! past value continuations until a [`Future::fail`] or [`Future::map`]
//! stage claims them; the `&`, `|` and `>>` operators combine pipelines into
//! concurrent joins, races and sequenced joins.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod chain;
mod executor;
mod failure;
mod future;
mod outcome;
mod promise;
mod resolution;
mod tuples;

pub use chain::Chain;
pub use executor::{Executor, Task};
pub use failure::Failure;
pub use future::{err, ok, ready, Future, Joined};
pub use outcome::Outcome;
pub use promise::Promise;
pub use resolution::Resolution;
pub use tuples::{Append, Concat, Prepend};
