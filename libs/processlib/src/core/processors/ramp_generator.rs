// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::data::DataComponent;
use crate::core::error::Result;
use crate::core::process::{ExecutableProcess, ProcessBody, ProcessInfo, ProcessIo};

/// Source body emitting an arithmetic sequence on output `out`, one value
/// per run step.
pub struct RampGenerator {
    start: f64,
    step: f64,
    next: f64,
}

impl RampGenerator {
    pub fn new(start: f64, step: f64) -> Self {
        Self {
            start,
            step,
            next: start,
        }
    }
}

impl ProcessBody for RampGenerator {
    fn init(&mut self, _io: &ProcessIo<'_>) -> anyhow::Result<()> {
        self.next = self.start;
        Ok(())
    }

    fn execute(&mut self, io: &ProcessIo<'_>) -> anyhow::Result<()> {
        io.output("out")?.set_double("", self.next)?;
        self.next += self.step;
        Ok(())
    }
}

/// Build a ramp source process with a single `out` quantity port.
pub fn ramp_generator(name: &str, start: f64, step: f64) -> Result<ExecutableProcess> {
    let process = ExecutableProcess::new(
        ProcessInfo::new(name).with_description("arithmetic sequence source"),
        RampGenerator::new(start, step),
    );
    process.add_output("out", DataComponent::quantity("out", None))?;
    Ok(process)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_sequence() {
        let process = ramp_generator("ramp", 1.0, 1.0).unwrap();
        process.init().unwrap();
        for expected in [1.0, 2.0, 3.0] {
            process.run().unwrap();
            assert_eq!(process.output("out").unwrap().get_double("").unwrap(), expected);
        }
    }

    #[test]
    fn test_reinit_restarts_sequence() {
        let process = ramp_generator("ramp", 10.0, 5.0).unwrap();
        process.init().unwrap();
        process.run().unwrap();
        process.run().unwrap();
        process.init().unwrap();
        process.run().unwrap();
        assert_eq!(process.output("out").unwrap().get_double("").unwrap(), 10.0);
    }
}
