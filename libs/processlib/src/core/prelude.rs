// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Commonly used types for `use processlib::prelude::*`.

pub use crate::core::{
    // Errors
    error::{ProcessError, Result},

    // Connections
    connection::{DataConnection, QueueConnection, SyncConnection},

    // Data model
    data::{DataComponent, ScalarKind, Value},

    // Ports
    ports::PortSection,

    // Processes
    process::{ExecutableProcess, ProcessBody, ProcessInfo, ProcessIo, RunStep},

    // Execution
    execution::{ExecutionConfig, InterruptSignal, ProcessState},
};
