// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Directed data-transfer edges between process ports.
//!
//! A connection binds an upstream port (or sub-component) to a downstream
//! one and carries published value snapshots across worker threads. Two
//! behavioral variants exist: [`SyncConnection`] hands off immediately
//! (latest value wins), [`QueueConnection`] buffers FIFO.

mod group;
mod queue_connection;
mod sync_connection;

pub use group::ConnectionGroup;
pub use queue_connection::{QueueConnection, DEFAULT_QUEUE_CAPACITY};
pub use sync_connection::SyncConnection;

use std::fmt;
use std::ops::Range;

use parking_lot::Mutex;

use crate::core::data::{DataBlock, LeafSignature, Value};
use crate::core::error::{ProcessError, Result};
use crate::core::execution::{InterruptSignal, Interrupted};
use crate::core::ports::PortSection;

/// One bound end of a connection: a process-side port or sub-component.
#[derive(Debug, Clone)]
pub struct ConnectionEndpoint {
    /// Instance name of the owning process.
    pub process: String,
    /// Port collection the component was resolved in.
    pub section: PortSection,
    /// Port name.
    pub port: String,
    /// Path below the port root; empty for the root itself.
    pub path: String,
    /// Slot range the component covers within the port block.
    pub range: Range<usize>,
    /// Flattened scalar leaves, for compatibility validation.
    pub signature: Vec<LeafSignature>,
}

impl ConnectionEndpoint {
    /// `process.port` or `process.port/path` label for diagnostics.
    pub fn label(&self) -> String {
        if self.path.is_empty() {
            format!("{}.{}", self.process, self.port)
        } else {
            format!("{}.{}/{}", self.process, self.port, self.path)
        }
    }
}

/// A published value snapshot travelling along a connection: the source
/// port's backing block plus the slot range the connection covers.
///
/// The block handle is shared, not copied; the publisher renews its own
/// buffer when queuing so in-flight frames stay independent.
#[derive(Clone, Debug)]
pub struct DataFrame {
    pub block: DataBlock,
    pub range: Range<usize>,
}

impl DataFrame {
    /// Snapshot of the covered slot values.
    pub fn values(&self) -> Vec<Value> {
        self.block.read_range(self.range.clone())
    }
}

/// Directed edge between an upstream port and a downstream port.
///
/// Endpoints are bound by [`ExecutableProcess::connect`]
/// (crate::core::process::ExecutableProcess::connect); data moves with
/// [`publish`](DataConnection::publish) on the source side and
/// [`transfer`](DataConnection::transfer) on the destination side. Both
/// blocking operations honor the interrupt signal of the calling worker.
pub trait DataConnection: Send + Sync {
    /// Bind or unbind (`None`) the source end. Binding validates structural
    /// compatibility against an already-bound destination.
    fn set_source(&self, endpoint: Option<ConnectionEndpoint>) -> Result<()>;

    /// Bind or unbind (`None`) the destination end; validates like
    /// [`set_source`](DataConnection::set_source).
    fn set_destination(&self, endpoint: Option<ConnectionEndpoint>) -> Result<()>;

    fn source(&self) -> Option<ConnectionEndpoint>;

    fn destination(&self) -> Option<ConnectionEndpoint>;

    /// Push one value snapshot onto the connection. May suspend when a
    /// bounded queue is full; an interrupt aborts the wait.
    fn publish(
        &self,
        frame: DataFrame,
        interrupt: &InterruptSignal,
    ) -> std::result::Result<(), Interrupted>;

    /// Take the next value. `blocking` suspends until data arrives or the
    /// interrupt signal is raised; otherwise returns `None` when idle.
    fn transfer(
        &self,
        blocking: bool,
        interrupt: &InterruptSignal,
    ) -> std::result::Result<Option<DataFrame>, Interrupted>;

    /// Non-blocking availability check: `true` once published and not yet
    /// consumed.
    fn is_data_available(&self) -> bool;

    /// Queued connections force the publisher to renew its output buffer
    /// after every publish.
    fn is_queued(&self) -> bool;

    /// Discard buffered, untransferred data.
    fn clear(&self);
}

impl fmt::Debug for dyn DataConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataConnection")
            .field("source", &self.source().map(|e| e.label()))
            .field("destination", &self.destination().map(|e| e.label()))
            .field("queued", &self.is_queued())
            .finish()
    }
}

#[derive(Default)]
struct EndpointPair {
    source: Option<ConnectionEndpoint>,
    destination: Option<ConnectionEndpoint>,
}

/// Endpoint bookkeeping shared by the connection implementations.
#[derive(Default)]
pub(crate) struct Endpoints {
    pair: Mutex<EndpointPair>,
}

impl Endpoints {
    pub(crate) fn bind_source(&self, endpoint: Option<ConnectionEndpoint>) -> Result<()> {
        let mut pair = self.pair.lock();
        if let (Some(src), Some(dst)) = (&endpoint, &pair.destination) {
            check_compatible(src, dst)?;
        }
        pair.source = endpoint;
        Ok(())
    }

    pub(crate) fn bind_destination(&self, endpoint: Option<ConnectionEndpoint>) -> Result<()> {
        let mut pair = self.pair.lock();
        if let (Some(src), Some(dst)) = (&pair.source, &endpoint) {
            check_compatible(src, dst)?;
        }
        pair.destination = endpoint;
        Ok(())
    }

    pub(crate) fn source(&self) -> Option<ConnectionEndpoint> {
        self.pair.lock().source.clone()
    }

    pub(crate) fn destination(&self) -> Option<ConnectionEndpoint> {
        self.pair.lock().destination.clone()
    }
}

/// Structural and unit compatibility: flattened leaves must match one for
/// one, kind and unit included.
fn check_compatible(source: &ConnectionEndpoint, destination: &ConnectionEndpoint) -> Result<()> {
    if source.signature != destination.signature {
        return Err(ProcessError::Incompatible(format!(
            "{} and {} have different structures",
            source.label(),
            destination.label()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::DataComponent;

    pub(super) fn endpoint_for(
        process: &str,
        section: PortSection,
        component: &DataComponent,
    ) -> ConnectionEndpoint {
        ConnectionEndpoint {
            process: process.to_string(),
            section,
            port: component.name().to_string(),
            path: String::new(),
            range: 0..component.slot_count(),
            signature: component.signature(),
        }
    }

    #[test]
    fn test_compatible_endpoints_bind() {
        let ends = Endpoints::default();
        let out = DataComponent::quantity("out", Some("m"));
        let inp = DataComponent::quantity("in", Some("m"));
        ends.bind_source(Some(endpoint_for("a", PortSection::Output, &out)))
            .unwrap();
        ends.bind_destination(Some(endpoint_for("b", PortSection::Input, &inp)))
            .unwrap();
        assert_eq!(ends.source().unwrap().process, "a");
        assert_eq!(ends.destination().unwrap().process, "b");
    }

    #[test]
    fn test_unit_mismatch_rejected() {
        let ends = Endpoints::default();
        let out = DataComponent::quantity("out", Some("m"));
        let inp = DataComponent::quantity("in", Some("s"));
        ends.bind_source(Some(endpoint_for("a", PortSection::Output, &out)))
            .unwrap();
        let err = ends
            .bind_destination(Some(endpoint_for("b", PortSection::Input, &inp)))
            .unwrap_err();
        assert!(matches!(err, ProcessError::Incompatible(_)));
        // The failed bind leaves the destination unbound.
        assert!(ends.destination().is_none());
    }

    #[test]
    fn test_structure_mismatch_rejected() {
        let ends = Endpoints::default();
        let out = DataComponent::record(
            "out",
            vec![
                DataComponent::quantity("x", None),
                DataComponent::quantity("y", None),
            ],
        );
        let inp = DataComponent::quantity("in", None);
        ends.bind_destination(Some(endpoint_for("b", PortSection::Input, &inp)))
            .unwrap();
        assert!(matches!(
            ends.bind_source(Some(endpoint_for("a", PortSection::Output, &out))),
            Err(ProcessError::Incompatible(_))
        ));
    }

    #[test]
    fn test_unbind() {
        let ends = Endpoints::default();
        let out = DataComponent::quantity("out", None);
        ends.bind_source(Some(endpoint_for("a", PortSection::Output, &out)))
            .unwrap();
        ends.bind_source(None).unwrap();
        assert!(ends.source().is_none());
    }

    #[test]
    fn test_endpoint_label() {
        let component = DataComponent::record(
            "pos",
            vec![
                DataComponent::quantity("lat", None),
                DataComponent::quantity("lon", None),
            ],
        );
        let mut endpoint = endpoint_for("nav", PortSection::Input, &component);
        assert_eq!(endpoint.label(), "nav.pos");
        endpoint.path = "lat".to_string();
        assert_eq!(endpoint.label(), "nav.pos/lat");
    }
}
