// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime collaborators for the lull primitives.
//!
//! The primitives never talk to an async runtime directly. They sleep through a
//! [`Timer`](timer::Timer), spawn through an [`Executor`](executor::Executor),
//! and pick both from a [`Runtime`](runtime::Runtime).
//!
//! Select the runtime via feature flags:
//! - `runtime-tokio` (default) - [`TokioRuntime`]
//! - `runtime-smol` - [`SmolRuntime`]

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
compile_error!("lull-runtime needs `runtime-tokio` or `runtime-smol`");

pub mod executor;
pub mod impls;
pub mod runtime;
pub mod task;
pub mod timer;

pub use executor::Executor;
pub use runtime::Runtime;
pub use task::LullTask;
pub use timer::Timer;

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{TokioExecutor, TokioRuntime, TokioTimer};

#[cfg(feature = "runtime-smol")]
pub use impls::smol::{SmolExecutor, SmolRuntime, SmolTimer};

#[cfg(feature = "runtime-tokio")]
pub type DefaultRuntime = TokioRuntime;

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub type DefaultRuntime = SmolRuntime;
