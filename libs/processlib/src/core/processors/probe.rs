// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::data::DataComponent;
use crate::core::error::Result;
use crate::core::process::{ExecutableProcess, ProcessBody, ProcessInfo, ProcessIo};

/// Shared log of values observed by a [`Probe`].
pub type ProbeLog = Arc<Mutex<Vec<f64>>>;

/// Sink body recording every value seen on input `in`.
pub struct Probe {
    log: ProbeLog,
}

impl Probe {
    pub fn new(log: ProbeLog) -> Self {
        Self { log }
    }
}

impl ProcessBody for Probe {
    fn execute(&mut self, io: &ProcessIo<'_>) -> anyhow::Result<()> {
        let value = io.input("in")?.get_double("")?;
        self.log.lock().push(value);
        Ok(())
    }
}

/// Build a recording sink with a single `in` port; returns the process and
/// the shared log it appends to.
pub fn probe(name: &str) -> Result<(ExecutableProcess, ProbeLog)> {
    let log = ProbeLog::default();
    let process = ExecutableProcess::new(
        ProcessInfo::new(name).with_description("records observed input values"),
        Probe::new(log.clone()),
    );
    process.add_input("in", DataComponent::quantity("in", None))?;
    Ok((process, log))
}
