// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Typed access to port buffers for process algorithms.

use std::sync::Arc;

use crate::core::data::{DataBlock, DataComponent, Value};
use crate::core::error::{ProcessError, Result};
use crate::core::ports::Port;

use super::ExecutableProcess;

/// Read/write view over one port's backing block.
///
/// Paths are slash-separated and resolved against the port's component
/// tree; the empty path addresses the port root (which must then be a
/// scalar for the typed accessors).
pub struct PortView {
    port: Arc<Port>,
    block: DataBlock,
}

impl PortView {
    pub(crate) fn for_port(port: Arc<Port>) -> Result<Self> {
        let block = port
            .block()
            .ok_or_else(|| ProcessError::NotInitialized(format!("port {}", port.name())))?;
        Ok(Self { port, block })
    }

    pub fn component(&self) -> &DataComponent {
        self.port.component()
    }

    pub fn block(&self) -> &DataBlock {
        &self.block
    }

    fn slot(&self, path: &str) -> Result<usize> {
        let resolved = self.port.component().resolve(path)?;
        if !resolved.component.is_scalar() {
            return Err(ProcessError::Incompatible(format!(
                "{} of port {} is not a scalar",
                resolved.component.name(),
                self.port.name()
            )));
        }
        Ok(resolved.offset)
    }

    pub fn get(&self, path: &str) -> Result<Value> {
        Ok(self.block.get(self.slot(path)?))
    }

    pub fn set(&self, path: &str, value: Value) -> Result<()> {
        self.block.set(self.slot(path)?, value);
        Ok(())
    }

    pub fn get_bool(&self, path: &str) -> Result<bool> {
        Ok(self.get(path)?.as_bool())
    }

    pub fn get_int(&self, path: &str) -> Result<i64> {
        Ok(self.get(path)?.as_int())
    }

    pub fn get_double(&self, path: &str) -> Result<f64> {
        Ok(self.get(path)?.as_double())
    }

    pub fn get_text(&self, path: &str) -> Result<String> {
        Ok(self.get(path)?.as_text())
    }

    pub fn set_bool(&self, path: &str, value: bool) -> Result<()> {
        self.set(path, Value::Bool(value))
    }

    pub fn set_int(&self, path: &str, value: i64) -> Result<()> {
        self.set(path, Value::Int(value))
    }

    pub fn set_double(&self, path: &str, value: f64) -> Result<()> {
        self.set(path, Value::Double(value))
    }

    pub fn set_text(&self, path: &str, value: &str) -> Result<()> {
        self.set(path, Value::Text(value.to_string()))
    }
}

/// Port access handed to [`ProcessBody`](super::ProcessBody) hooks.
pub struct ProcessIo<'a> {
    process: &'a ExecutableProcess,
}

impl<'a> ProcessIo<'a> {
    pub(crate) fn new(process: &'a ExecutableProcess) -> Self {
        Self { process }
    }

    pub fn input(&self, name: &str) -> Result<PortView> {
        self.process.input(name)
    }

    pub fn output(&self, name: &str) -> Result<PortView> {
        self.process.output(name)
    }

    pub fn parameter(&self, name: &str) -> Result<PortView> {
        self.process.parameter(name)
    }
}
