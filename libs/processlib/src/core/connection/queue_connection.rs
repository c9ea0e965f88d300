// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! FIFO queued connection, the "data queue" variant.
//!
//! Published values accumulate in order until consumed. A bounded queue
//! applies backpressure: `publish` suspends on a full queue until the
//! consumer drains a slot or the publisher's interrupt is raised.

use crossbeam_channel::{Receiver, Sender};

use crate::core::error::Result;
use crate::core::execution::{InterruptSignal, Interrupted};

use super::{ConnectionEndpoint, DataConnection, DataFrame, Endpoints};

/// Default capacity for bounded queue connections.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4;

pub struct QueueConnection {
    ends: Endpoints,
    tx: Sender<DataFrame>,
    rx: Receiver<DataFrame>,
    bounded: bool,
}

impl QueueConnection {
    /// Bounded FIFO queue. Capacities below 1 are clamped to 1.
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        Self {
            ends: Endpoints::default(),
            tx,
            rx,
            bounded: true,
        }
    }

    /// Unbounded FIFO queue; `publish` never suspends.
    pub fn unbounded() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            ends: Endpoints::default(),
            tx,
            rx,
            bounded: false,
        }
    }

    /// Number of published, unconsumed values.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl Default for QueueConnection {
    fn default() -> Self {
        Self::bounded(DEFAULT_QUEUE_CAPACITY)
    }
}

impl DataConnection for QueueConnection {
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
        interrupt: &InterruptSignal,
    ) -> std::result::Result<(), Interrupted> {
        if !self.bounded {
            let _ = self.tx.send(frame);
            return Ok(());
        }
        crossbeam_channel::select! {
            send(self.tx, frame) -> result => {
                // We hold the receiver, so the send cannot fail.
                let _ = result;
                Ok(())
            }
            recv(interrupt.receiver()) -> _ => Err(Interrupted),
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
        true
    }

    fn clear(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{DataBlock, Value};

    fn frame(value: i64) -> DataFrame {
        DataFrame {
            block: DataBlock::from_values(vec![Value::Int(value)]),
            range: 0..1,
        }
    }

    fn take(conn: &QueueConnection) -> Option<i64> {
        conn.transfer(false, &InterruptSignal::none())
            .unwrap()
            .map(|f| f.values()[0].as_int())
    }

    #[test]
    fn test_fifo_order() {
        let conn = QueueConnection::bounded(8);
        let none = InterruptSignal::none();
        for v in [1, 2, 3] {
            conn.publish(frame(v), &none).unwrap();
        }
        assert_eq!(conn.len(), 3);
        assert_eq!(take(&conn), Some(1));
        assert_eq!(take(&conn), Some(2));
        assert_eq!(take(&conn), Some(3));
        assert_eq!(take(&conn), None);
    }

    #[test]
    fn test_bounded_publish_blocks_until_drained() {
        let conn = std::sync::Arc::new(QueueConnection::bounded(1));
        let none = InterruptSignal::none();
        conn.publish(frame(1), &none).unwrap();

        let publisher = {
            let conn = conn.clone();
            std::thread::spawn(move || {
                conn.publish(frame(2), &InterruptSignal::none()).unwrap();
            })
        };
        std::thread::sleep(std::time::Duration::from_millis(50));
        // Producer is parked on the full queue until we drain a slot.
        assert!(!publisher.is_finished());
        assert_eq!(take(&conn), Some(1));
        publisher.join().unwrap();
        assert_eq!(take(&conn), Some(2));
    }

    #[test]
    fn test_bounded_publish_interrupted() {
        let conn = std::sync::Arc::new(QueueConnection::bounded(1));
        conn.publish(frame(1), &InterruptSignal::none()).unwrap();

        let (guard, signal) = InterruptSignal::pair();
        let publisher = {
            let conn = conn.clone();
            std::thread::spawn(move || conn.publish(frame(2), &signal))
        };
        std::thread::sleep(std::time::Duration::from_millis(50));
        drop(guard);
        assert_eq!(publisher.join().unwrap(), Err(Interrupted));
        // The stale first value is still there; the aborted one is not.
        assert_eq!(conn.len(), 1);
    }

    #[test]
    fn test_unbounded_never_blocks() {
        let conn = QueueConnection::unbounded();
        let none = InterruptSignal::none();
        for v in 0..100 {
            conn.publish(frame(v), &none).unwrap();
        }
        assert_eq!(conn.len(), 100);
        assert_eq!(take(&conn), Some(0));
    }

    #[test]
    fn test_clear_discards_everything() {
        let conn = QueueConnection::bounded(8);
        let none = InterruptSignal::none();
        for v in [1, 2, 3] {
            conn.publish(frame(v), &none).unwrap();
        }
        conn.clear();
        assert!(conn.is_empty());
        assert!(!conn.is_data_available());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let conn = QueueConnection::bounded(0);
        conn.publish(frame(1), &InterruptSignal::none()).unwrap();
        assert_eq!(take(&conn), Some(1));
    }
}
