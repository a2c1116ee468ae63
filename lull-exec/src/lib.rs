// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Serialized and superseding execution.
//!
//! - [`RunQueue`] runs one action at most once at a time and coalesces the
//!   calls that arrive meanwhile into a bounded number of follow-up runs
//! - [`Sequencer`] starts units of work that supersede each other and exposes
//!   a single [`Completion`](lull_core::Completion) resolving with the outcome
//!   of the most recent one

#[macro_use]
#[allow(unused_macros)]
mod logging;

pub mod run_queue;
pub mod sequencer;

pub use run_queue::{RunOutcome, RunQueue, RunQueueConfig};
pub use sequencer::{Sequencer, TaskSequencer};
