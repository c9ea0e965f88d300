// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use crate::core::connection::DEFAULT_QUEUE_CAPACITY;

/// Tunables for a started process's worker loop and default wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Capacity used for queued connections created by
    /// [`ExecutableProcess::connect_to`](crate::core::process::ExecutableProcess::connect_to).
    pub queue_capacity: usize,

    /// Minimum interval between run steps in milliseconds.
    ///
    /// `0` lets the worker loop run as fast as its blocking transfers allow;
    /// source processes with no needed inputs use this to pace production.
    pub run_interval_ms: u32,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            run_interval_ms: 0,
        }
    }
}

impl ExecutionConfig {
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            queue_capacity,
            ..Self::default()
        }
    }

    pub fn with_interval(mut self, run_interval_ms: u32) -> Self {
        self.run_interval_ms = run_interval_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExecutionConfig::default();
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.run_interval_ms, 0);
    }

    #[test]
    fn test_constructors() {
        let config = ExecutionConfig::new(16).with_interval(5);
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.run_interval_ms, 5);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ExecutionConfig::new(8).with_interval(10);
        let json = serde_json::to_string(&config).unwrap();
        let back: ExecutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
