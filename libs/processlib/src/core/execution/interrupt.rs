// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Cooperative cancellation for blocking connection operations.
//!
//! The guard side raises the signal by closing a channel; a closed channel
//! makes every `select!` arm on the receiver ready at once, so all blocked
//! waiters wake, and the signal stays raised for late observers.

use std::fmt;

use crossbeam_channel::{bounded, never, Receiver, Sender, TryRecvError};

/// Marker returned by a blocking operation that was cancelled.
///
/// Interruption is not an error: the current run iteration exits cleanly
/// without executing the algorithm or publishing partial outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interrupted")
    }
}

/// Raises the paired [`InterruptSignal`] when dropped.
pub struct InterruptGuard {
    _tx: Sender<()>,
}

/// Cancellation signal observed inside blocking waits.
///
/// Cheap to clone; every clone observes the same raise.
#[derive(Clone)]
pub struct InterruptSignal {
    rx: Receiver<()>,
}

impl InterruptSignal {
    /// New guard/signal pair. Dropping the guard raises the signal.
    pub fn pair() -> (InterruptGuard, InterruptSignal) {
        let (tx, rx) = bounded(0);
        (InterruptGuard { _tx: tx }, InterruptSignal { rx })
    }

    /// A signal that can never be raised.
    pub fn none() -> Self {
        Self { rx: never() }
    }

    pub fn is_raised(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Channel to `select!` on alongside data channels. Ready iff raised.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

impl fmt::Debug for InterruptSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterruptSignal")
            .field("raised", &self.is_raised())
            .finish()
    }
}
