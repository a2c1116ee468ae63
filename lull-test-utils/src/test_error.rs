// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_core::LullError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Test error: {0}")]
pub struct TestError(pub String);

impl TestError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Whether `error` wraps a `TestError` carrying `msg`.
    pub fn is_wrapped_in(error: &LullError, msg: &str) -> bool {
        matches!(error, LullError::UserError(_)) && error.to_string().contains(msg)
    }
}
