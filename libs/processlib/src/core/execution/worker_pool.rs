// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Pluggable worker spawning for started processes.

/// Externally-owned executor that can host process worker loops.
///
/// [`ExecutableProcess::start_on`](crate::core::process::ExecutableProcess::start_on)
/// submits the loop to the pool exactly once; the task runs until the
/// process stops or fails. A pool must therefore dedicate one unit of
/// concurrency per started process — a size-limited pool that queues tasks
/// behind long-running ones will starve the graph.
pub trait WorkerPool: Send + Sync {
    /// Run `task` on a pool worker. `name` is the process instance name,
    /// usable for thread naming and diagnostics.
    fn spawn(&self, name: &str, task: Box<dyn FnOnce() + Send + 'static>);
}
