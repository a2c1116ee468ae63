// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core building blocks shared by the lull primitives.
//!
//! - [`LullError`] / [`Result`] - the error type every primitive reports through
//! - [`CancellationToken`] - cooperative, linkable cancellation signal
//! - [`Completion`] - one-shot result slot observable by many waiters
//! - [`Mutex`] - the lock used for internal state transitions

pub mod cancellation_token;
pub mod completion;
pub mod error;
pub mod lull_mutex;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::completion::Completion;
pub use self::error::{LullError, Result};
pub use self::lull_mutex::Mutex;
