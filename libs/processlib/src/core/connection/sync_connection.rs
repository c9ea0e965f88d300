// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Immediate hand-off connection: no buffering, latest value wins.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::core::error::Result;
use crate::core::execution::{InterruptSignal, Interrupted};

use super::{ConnectionEndpoint, DataConnection, DataFrame, Endpoints};

/// Connection without an intermediate buffer.
///
/// A published value is available the instant `publish` returns and
/// disappears on the first `transfer`. Publishing over an unconsumed value
/// overwrites it; that loss is the documented hand-off semantics, not a
/// defect.
pub struct SyncConnection {
    ends: Endpoints,
    tx: Sender<DataFrame>,
    rx: Receiver<DataFrame>,
}

impl SyncConnection {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        Self {
            ends: Endpoints::default(),
            tx,
            rx,
        }
    }
}

impl Default for SyncConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl DataConnection for SyncConnection {
    fn set_source(&self, endpoint: Option<ConnectionEndpoint>) -> Result<()> {
        self.ends.bind_source(endpoint)
    }

    fn set_destination(&self, endpoint: Option<ConnectionEndpoint>) -> Result<()> {
        self.ends.bind_destination(endpoint)
    }

    fn source(&self) -> Option<ConnectionEndpoint> {
        self.ends.source()
    }

    fn destination(&self) -> Option<ConnectionEndpoint> {
        self.ends.destination()
    }

    fn publish(
        &self,
        frame: DataFrame,
        _interrupt: &InterruptSignal,
    ) -> std::result::Result<(), Interrupted> {
        // Force-push: discard the stale value if the consumer has not
        // drained it yet. Never suspends.
        let mut frame = frame;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(returned)) => {
                    let _ = self.rx.try_recv();
                    frame = returned;
                }
                // We hold the receiver, so the channel cannot disconnect.
                Err(TrySendError::Disconnected(_)) => return Ok(()),
            }
        }
    }

    fn transfer(
        &self,
        blocking: bool,
        interrupt: &InterruptSignal,
    ) -> std::result::Result<Option<DataFrame>, Interrupted> {
        if !blocking {
            return Ok(self.rx.try_recv().ok());
        }
        crossbeam_channel::select! {
            recv(self.rx) -> frame => Ok(frame.ok()),
            recv(interrupt.receiver()) -> _ => Err(Interrupted),
        }
    }

    fn is_data_available(&self) -> bool {
        !self.rx.is_empty()
    }

    fn is_queued(&self) -> bool {
        false
    }

    fn clear(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}
