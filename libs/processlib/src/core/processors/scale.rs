// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::data::DataComponent;
use crate::core::error::Result;
use crate::core::process::{ExecutableProcess, ProcessBody, ProcessInfo, ProcessIo};

/// Transform body computing `out = in * gain`.
///
/// `gain` is a parameter port seeded with a default at init time; a config
/// actor or an upstream parameter connection can overwrite it between run
/// steps.
pub struct Scale {
    default_gain: f64,
}

impl Scale {
    pub fn new(default_gain: f64) -> Self {
        Self { default_gain }
    }
}

impl ProcessBody for Scale {
    fn init(&mut self, io: &ProcessIo<'_>) -> anyhow::Result<()> {
        io.parameter("gain")?.set_double("", self.default_gain)?;
        Ok(())
    }

    fn execute(&mut self, io: &ProcessIo<'_>) -> anyhow::Result<()> {
        let x = io.input("in")?.get_double("")?;
        let gain = io.parameter("gain")?.get_double("")?;
        io.output("out")?.set_double("", x * gain)?;
        Ok(())
    }
}

/// Build a scaling process: input `in`, output `out`, parameter `gain`.
pub fn scale(name: &str, gain: f64) -> Result<ExecutableProcess> {
    let process = ExecutableProcess::new(
        ProcessInfo::new(name).with_description("multiplies input by a gain parameter"),
        Scale::new(gain),
    );
    process.add_input("in", DataComponent::quantity("in", None))?;
    process.add_output("out", DataComponent::quantity("out", None))?;
    process.add_parameter("gain", DataComponent::quantity("gain", None))?;
    Ok(process)
}
