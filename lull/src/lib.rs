// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Lull
//!
//! Three primitives for event-driven code that has to tame bursts of triggers.
//!
//! ## Overview
//!
//! - [`EventCooldown`] / [`Cooldown`]: collapse a burst of signals into one
//!   delayed action, delivering the value passed last
//! - [`RunQueue`]: run an idempotent action at most once at a time and
//!   coalesce the calls made meanwhile into a bounded number of follow-ups
//! - [`Sequencer`]: start units of work that supersede each other, observed
//!   through a single [`Completion`]
//!
//! The primitives are independent of each other and of any particular async
//! runtime; timers and spawning go through [`lull_runtime`], with tokio as the
//! default and smol behind the `runtime-smol` feature.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lull::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> lull::Result<()> {
//!     let document = Arc::new(String::from("draft"));
//!
//!     // Save at most one copy at a time, with one save queued behind it
//!     let saver = Arc::new(RunQueue::new(&document, |doc: Arc<String>| async move {
//!         println!("saving {} bytes", doc.len());
//!         Ok::<(), std::io::Error>(())
//!     }));
//!
//!     // Save two seconds after the last keystroke, at the latest after five
//!     let autosave = Cooldown::with_config(
//!         CooldownConfig::new(Duration::from_secs(2)).max_accumulation(Duration::from_secs(5)),
//!         {
//!             let saver = saver.clone();
//!             move || {
//!                 let saver = saver.clone();
//!                 tokio::spawn(async move { saver.run_async().await });
//!             }
//!         },
//!     )?;
//!
//!     autosave.accumulate();
//!     Ok(())
//! }
//! ```

pub use lull_cooldown::{Cooldown, CooldownConfig, CooldownTimer, EventCooldown};
pub use lull_core::{CancellationToken, Completion, LullError, Result};
pub use lull_exec::{RunOutcome, RunQueue, RunQueueConfig, Sequencer, TaskSequencer};
pub use lull_runtime::{DefaultRuntime, Executor, Runtime, Timer};

#[cfg(feature = "runtime-tokio")]
pub use lull_runtime::{TokioExecutor, TokioRuntime};

#[cfg(feature = "runtime-smol")]
pub use lull_runtime::{SmolExecutor, SmolRuntime};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CancellationToken, Completion, Cooldown, CooldownConfig, EventCooldown, LullError,
        RunOutcome, RunQueue, RunQueueConfig, Sequencer, TaskSequencer,
    };
}
