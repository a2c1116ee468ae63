// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounced triggers.
//!
//! A cooldown waits for a silence gap after the last signal before running its
//! action. Every [`accumulate`](EventCooldown::accumulate) restarts the gap; only
//! the value passed last is delivered. [`now`](EventCooldown::now) skips the wait.
//!
//! - [`EventCooldown<T>`] carries a value to the action
//! - [`Cooldown`] is the unit variant for plain notifications
//! - [`CooldownTimer`] is the single-shot delay both are built on
//!
//! Optional ceilings ([`CooldownConfig`]) force a fire under a continuous
//! stream of signals so the action is never postponed forever.
//!
//! # Example
//!
//! ```rust,no_run
//! use lull_cooldown::EventCooldown;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cooldown = EventCooldown::new(Duration::from_millis(200), |query: String| {
//!     println!("searching for {query}");
//! });
//!
//! cooldown.accumulate("l".to_string());
//! cooldown.accumulate("lu".to_string());
//! cooldown.accumulate("lull".to_string());
//! // ~200ms later: "searching for lull", once
//! # }
//! ```

#[macro_use]
#[allow(unused_macros)]
mod logging;

mod config;
mod cooldown;
mod cooldown_timer;
mod event_cooldown;

pub use config::CooldownConfig;
pub use cooldown::Cooldown;
pub use cooldown_timer::CooldownTimer;
pub use event_cooldown::EventCooldown;
