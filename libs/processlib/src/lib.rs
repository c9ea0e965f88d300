// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Concurrent dataflow engine for executable process chains.
//!
//! A graph is assembled from [`ExecutableProcess`] instances whose named
//! input/output/parameter ports are wired together with
//! [`DataConnection`]s. Each started process owns one worker that
//! repeatedly blocks until its required inputs are available, executes its
//! algorithm, and publishes outputs downstream. There is no central
//! scheduler: synchronization across processes is mediated entirely by the
//! connections.

// Re-export crossbeam_channel so callers can select on an interrupt signal
// alongside their own channels.
pub use crossbeam_channel;

pub mod core;

pub use crate::core::{
    connection::{
        ConnectionEndpoint, ConnectionGroup, DataConnection, DataFrame, QueueConnection,
        SyncConnection, DEFAULT_QUEUE_CAPACITY,
    },
    data::{ComponentShape, DataBlock, DataComponent, LeafSignature, ScalarKind, Value},
    error::{ProcessError, Result},
    execution::{
        ExecutionConfig, InterruptGuard, InterruptSignal, Interrupted, ProcessState, WorkerPool,
    },
    ports::{Port, PortList, PortSection},
    process::{ExecutableProcess, PortView, ProcessBody, ProcessInfo, ProcessIo, RunStep},
};
