// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Process worker main loop.
//!
//! Drives repeated run steps for a started process until a stop request or
//! an execution failure. Failures stop this process only; the error goes to
//! the caller-supplied callback, never retried.

use std::sync::Arc;

use crate::core::error::ProcessError;
use crate::core::process::{ExecutableProcess, RunStep};

use super::InterruptSignal;

pub(crate) type ErrorCallback = Box<dyn FnOnce(ProcessError) + Send>;

pub(crate) fn run_process_loop(
    process: Arc<ExecutableProcess>,
    interrupt: InterruptSignal,
    on_error: ErrorCallback,
) {
    let id = process.name().to_string();
    tracing::info!("[{}] worker started", id);

    let mut on_error = Some(on_error);
    loop {
        if interrupt.is_raised() || !process.is_started() {
            break;
        }

        match process.run_with(&interrupt) {
            Ok(RunStep::Completed) => {
                let interval_ms = process.execution_config().run_interval_ms;
                if interval_ms > 0 {
                    std::thread::sleep(std::time::Duration::from_millis(u64::from(interval_ms)));
                }
            }
            Ok(RunStep::Interrupted) => break,
            Err(e) => {
                tracing::warn!("[{}] run failed, stopping worker: {}", id, e);
                process.mark_stopped();
                if let Some(callback) = on_error.take() {
                    callback(e);
                }
                break;
            }
        }
    }

    process.finish_worker();
    tracing::debug!("[{}] worker stopped", id);
}
