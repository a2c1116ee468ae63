// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the lull workspace.
//!
//! Development and testing only.
//!
//! - [`Recorder`] - collects every value an action was invoked with
//! - [`Gate`] - parks actions until the test lets them through
//! - [`TestError`] - error type for failing actions
//! - [`helpers`] - scheduling helpers for paused-clock tests

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod gate;
pub mod helpers;
pub mod recorder;
pub mod test_error;

pub use gate::Gate;
pub use helpers::{advance_and_settle, settle};
pub use recorder::Recorder;
pub use test_error::TestError;
