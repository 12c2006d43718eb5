// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied cancellation and deadlines for store operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cancellation signal with an optional deadline.
///
/// Clones share the same flag, so a request handler can hand one clone to
/// the engine and keep another to call [`Cancellation::cancel`].
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A signal that never fires.
    pub fn none() -> Self {
        Cancellation::default()
    }

    /// Fires once `timeout` has elapsed from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Cancellation { flag: Arc::default(), deadline: Instant::now().checked_add(timeout) }
    }

    /// Returns a clone sharing this flag but with the given deadline.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        Cancellation { flag: Arc::clone(&self.flag), deadline: Some(deadline) }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True once cancelled or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
