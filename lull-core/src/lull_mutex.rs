// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lock guarding internal state transitions.
//!
//! Never held across an `.await` or a user callback.

pub use parking_lot::{Mutex, MutexGuard};
