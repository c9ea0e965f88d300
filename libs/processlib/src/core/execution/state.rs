use serde::{Deserialize, Serialize};

/// Lifecycle state of an executable process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Constructed; ports may still be added
    Created,
    /// Port buffers allocated, ready to run
    Initialized,
    /// Worker actively driving run steps
    Running,
    /// Worker exited, on a stop request or an execution failure
    Stopped,
    /// Terminal; buffers cleared and the process no longer runnable
    Disposed,
}
