// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Executable process: the node of the dataflow graph.
//!
//! A process owns three named port collections, the per-port connection
//! groups, and the init/run/start/stop lifecycle. Once started it owns one
//! worker that repeats single run steps; distinct processes run on
//! independent workers and synchronize only through their connections.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::{Mutex, RwLock};

use crate::core::connection::{
    ConnectionEndpoint, ConnectionGroup, DataConnection, DataFrame, QueueConnection,
};
use crate::core::data::{DataBlock, DataComponent};
use crate::core::error::{ProcessError, Result};
use crate::core::execution::{
    run_process_loop, ErrorCallback, ExecutionConfig, InterruptGuard, InterruptSignal,
    ProcessState, WorkerPool,
};
use crate::core::ports::{Port, PortList, PortSection};

use super::{PortView, ProcessIo, ProcessInfo};

/// Outcome of a single run step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStep {
    /// Inputs transferred, algorithm executed, outputs published
    Completed,
    /// Cancelled during a blocking wait; nothing executed or published
    Interrupted,
}

/// User-supplied algorithm hosted by an [`ExecutableProcess`].
pub trait ProcessBody: Send {
    /// Called once during `init`, after port buffers are allocated. The
    /// default does nothing; bodies use it to seed parameter defaults or
    /// reset internal state.
    fn init(&mut self, _io: &ProcessIo<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// One execution step: read the populated input/parameter buffers,
    /// write the output buffers.
    fn execute(&mut self, io: &ProcessIo<'_>) -> anyhow::Result<()>;
}

struct Worker {
    guard: Option<InterruptGuard>,
    signal: InterruptSignal,
    thread: Option<JoinHandle<()>>,
}

/// A dataflow process instance.
///
/// Typical life of a process:
///
/// 1. construct with [`ExecutableProcess::new`], declare ports;
/// 2. wire with [`connect`](ExecutableProcess::connect) /
///    [`connect_to`](ExecutableProcess::connect_to);
/// 3. [`init`](ExecutableProcess::init) to allocate port buffers;
/// 4. either drive [`run`](ExecutableProcess::run) from an external
///    scheduler (gated by [`can_run`](ExecutableProcess::can_run)), or
///    [`start`](ExecutableProcess::start) a worker that loops until
///    [`stop`](ExecutableProcess::stop).
pub struct ExecutableProcess {
    info: ProcessInfo,
    inputs: RwLock<PortList>,
    outputs: RwLock<PortList>,
    params: RwLock<PortList>,
    input_groups: RwLock<HashMap<String, ConnectionGroup>>,
    output_groups: RwLock<HashMap<String, ConnectionGroup>>,
    param_groups: RwLock<HashMap<String, ConnectionGroup>>,
    body: Mutex<Box<dyn ProcessBody>>,
    exec_config: Mutex<ExecutionConfig>,
    state: Mutex<ProcessState>,
    initialized: AtomicBool,
    started: AtomicBool,
    worker: Mutex<Option<Worker>>,
}

impl ExecutableProcess {
    pub fn new(info: ProcessInfo, body: impl ProcessBody + 'static) -> Self {
        Self {
            info,
            inputs: RwLock::new(PortList::new()),
            outputs: RwLock::new(PortList::new()),
            params: RwLock::new(PortList::new()),
            input_groups: RwLock::new(HashMap::new()),
            output_groups: RwLock::new(HashMap::new()),
            param_groups: RwLock::new(HashMap::new()),
            body: Mutex::new(Box::new(body)),
            exec_config: Mutex::new(ExecutionConfig::default()),
            state: Mutex::new(ProcessState::Created),
            initialized: AtomicBool::new(false),
            started: AtomicBool::new(false),
            worker: Mutex::new(None),
        }
    }

    pub fn info(&self) -> &ProcessInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn state(&self) -> ProcessState {
        *self.state.lock()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn execution_config(&self) -> ExecutionConfig {
        self.exec_config.lock().clone()
    }

    pub fn set_execution_config(&self, config: ExecutionConfig) {
        *self.exec_config.lock() = config;
    }

    fn ports(&self, section: PortSection) -> &RwLock<PortList> {
        match section {
            PortSection::Input => &self.inputs,
            PortSection::Output => &self.outputs,
            PortSection::Parameter => &self.params,
        }
    }

    fn groups(&self, section: PortSection) -> &RwLock<HashMap<String, ConnectionGroup>> {
        match section {
            PortSection::Input => &self.input_groups,
            PortSection::Output => &self.output_groups,
            PortSection::Parameter => &self.param_groups,
        }
    }

    fn add_port(&self, section: PortSection, name: &str, component: DataComponent) -> Result<()> {
        if self.is_initialized() {
            return Err(ProcessError::IllegalState(format!(
                "ports of {} are fixed once initialized",
                self.name()
            )));
        }
        self.ports(section).write().add(name, component)?;
        Ok(())
    }

    pub fn add_input(&self, name: &str, component: DataComponent) -> Result<()> {
        self.add_port(PortSection::Input, name, component)
    }

    pub fn add_output(&self, name: &str, component: DataComponent) -> Result<()> {
        self.add_port(PortSection::Output, name, component)
    }

    pub fn add_parameter(&self, name: &str, component: DataComponent) -> Result<()> {
        self.add_port(PortSection::Parameter, name, component)
    }

    fn port_view(&self, section: PortSection, name: &str) -> Result<PortView> {
        let port = self
            .ports(section)
            .read()
            .get(name)
            .ok_or_else(|| ProcessError::PortNotFound(format!("{section} {name}")))?;
        PortView::for_port(port)
    }

    /// View over an input port's buffer. Requires `init`.
    pub fn input(&self, name: &str) -> Result<PortView> {
        self.port_view(PortSection::Input, name)
    }

    /// View over an output port's buffer. Requires `init`.
    pub fn output(&self, name: &str) -> Result<PortView> {
        self.port_view(PortSection::Output, name)
    }

    /// View over a parameter port's buffer. Requires `init`.
    ///
    /// Parameter writes between executions are the caller's to serialize
    /// against the process's own run steps.
    pub fn parameter(&self, name: &str) -> Result<PortView> {
        self.port_view(PortSection::Parameter, name)
    }

    /// Registered input ports, in declaration order.
    pub fn input_ports(&self) -> Vec<Arc<Port>> {
        self.inputs.read().iter().cloned().collect()
    }

    /// Registered output ports, in declaration order.
    pub fn output_ports(&self) -> Vec<Arc<Port>> {
        self.outputs.read().iter().cloned().collect()
    }

    /// Registered parameter ports, in declaration order.
    pub fn parameter_ports(&self) -> Vec<Arc<Port>> {
        self.params.read().iter().cloned().collect()
    }

    /// Connections attached to one input port.
    pub fn input_connections(&self, port: &str) -> Vec<Arc<dyn DataConnection>> {
        Self::group_connections(&self.input_groups, port)
    }

    /// Connections attached to one output port.
    pub fn output_connections(&self, port: &str) -> Vec<Arc<dyn DataConnection>> {
        Self::group_connections(&self.output_groups, port)
    }

    /// Connections attached to one parameter port.
    pub fn parameter_connections(&self, port: &str) -> Vec<Arc<dyn DataConnection>> {
        Self::group_connections(&self.param_groups, port)
    }

    fn group_connections(
        groups: &RwLock<HashMap<String, ConnectionGroup>>,
        port: &str,
    ) -> Vec<Arc<dyn DataConnection>> {
        groups
            .read()
            .get(port)
            .map(|g| g.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Override the "needed" flag of one port's connection group.
    ///
    /// A group with no connections stays not-needed regardless of the
    /// override.
    pub fn set_connections_needed(
        &self,
        section: PortSection,
        port: &str,
        needed: bool,
    ) -> Result<()> {
        if self.ports(section).read().get(port).is_none() {
            return Err(ProcessError::PortNotFound(format!("{section} {port}")));
        }
        self.groups(section)
            .write()
            .entry(port.to_string())
            .or_default()
            .set_needed(needed);
        Ok(())
    }

    /// Allocate a backing block for every port lacking one and run the
    /// body's init hook. Safe to call repeatedly before `start`.
    pub fn init(&self) -> Result<()> {
        if self.is_started() {
            return Err(ProcessError::IllegalState(format!(
                "{} cannot be re-initialized while started",
                self.name()
            )));
        }
        if self.state() == ProcessState::Disposed {
            return Err(ProcessError::IllegalState(format!(
                "{} is disposed",
                self.name()
            )));
        }

        for section in [
            PortSection::Input,
            PortSection::Output,
            PortSection::Parameter,
        ] {
            let ports = self.ports(section).read();
            for port in ports.iter() {
                if port.component().slot_count() == 0 {
                    return Err(ProcessError::Init {
                        process: self.name().to_string(),
                        reason: format!("{section} port {} has no scalar leaves", port.name()),
                    });
                }
                if !port.has_data() {
                    port.set_block(DataBlock::for_component(port.component()));
                }
            }
        }

        let io = ProcessIo::new(self);
        self.body
            .lock()
            .init(&io)
            .map_err(|e| ProcessError::Init {
                process: self.name().to_string(),
                reason: format!("{e:#}"),
            })?;

        self.initialized.store(true, Ordering::SeqCst);
        *self.state.lock() = ProcessState::Initialized;
        tracing::debug!("[{}] initialized", self.name());
        Ok(())
    }

    /// Wire a connection to the component at `path` inside one of this
    /// process's port trees.
    ///
    /// Output-side components become the connection's source; input and
    /// parameter components become its destination. Destinations enforce
    /// at most one incoming connection along any ancestor chain, and both
    /// ends are validated for structural/unit compatibility once bound.
    pub fn connect(
        &self,
        section: PortSection,
        path: &str,
        connection: &Arc<dyn DataConnection>,
    ) -> Result<()> {
        let (port_name, sub_path) = split_path(path);
        let port = self.ports(section).read().get(port_name).ok_or_else(|| {
            ProcessError::Wiring(format!(
                "component {path:?} not found in the {section} ports of {}",
                self.name()
            ))
        })?;
        let resolved = port.component().resolve(sub_path)?;
        let endpoint = ConnectionEndpoint {
            process: self.name().to_string(),
            section,
            port: port_name.to_string(),
            path: sub_path.to_string(),
            range: resolved.offset..resolved.offset + resolved.component.slot_count(),
            signature: resolved.component.signature(),
        };

        match section {
            PortSection::Output => {
                connection.set_source(Some(endpoint))?;
                self.output_groups
                    .write()
                    .entry(port_name.to_string())
                    .or_default()
                    .push(connection.clone());
            }
            PortSection::Input | PortSection::Parameter => {
                let groups = self.groups(section);
                let mut guard = groups.write();
                let group = guard.entry(port_name.to_string()).or_default();
                for existing in group.iter() {
                    if let Some(dest) = existing.destination() {
                        if dest.process == self.name() && paths_overlap(&dest.path, sub_path) {
                            return Err(ProcessError::Wiring(format!(
                                "{} already receives a connection on {:?}",
                                endpoint.label(),
                                dest.path
                            )));
                        }
                    }
                }
                connection.set_destination(Some(endpoint))?;
                group.push(connection.clone());
            }
        }

        tracing::debug!("[{}] connected {section} {path}", self.name());
        Ok(())
    }

    /// Detach a connection from whichever of this process's ports holds it,
    /// unbinding the corresponding end.
    ///
    /// A connection not attached to this process is a reported error, not a
    /// silent no-op.
    pub fn disconnect(&self, connection: &Arc<dyn DataConnection>) -> Result<()> {
        for section in [
            PortSection::Input,
            PortSection::Output,
            PortSection::Parameter,
        ] {
            let removed = {
                let mut guard = self.groups(section).write();
                guard.values_mut().any(|group| group.remove(connection))
            };
            if removed {
                if section == PortSection::Output {
                    connection.set_source(None)?;
                } else {
                    connection.set_destination(None)?;
                }
                tracing::debug!("[{}] disconnected a {section} connection", self.name());
                return Ok(());
            }
        }
        Err(ProcessError::ConnectionNotFound(format!(
            "connection is not attached to {}",
            self.name()
        )))
    }

    /// Wire this process's output component to another process's input
    /// component with a new bounded queue connection sized by this
    /// process's execution config.
    pub fn connect_to(
        &self,
        output_path: &str,
        destination: &ExecutableProcess,
        input_path: &str,
    ) -> Result<Arc<dyn DataConnection>> {
        let connection: Arc<dyn DataConnection> = Arc::new(QueueConnection::bounded(
            self.execution_config().queue_capacity,
        ));
        self.connect(PortSection::Output, output_path, &connection)?;
        if let Err(e) = destination.connect(PortSection::Input, input_path, &connection) {
            let _ = self.disconnect(&connection);
            return Err(e);
        }
        Ok(connection)
    }

    /// Non-blocking admission check: `true` iff initialized, every needed
    /// input and parameter group has data on all members, and every needed
    /// output group has been drained.
    pub fn can_run(&self) -> bool {
        if !self.is_initialized() {
            return false;
        }
        let inputs_ready = self
            .input_groups
            .read()
            .values()
            .filter(|g| g.is_needed())
            .all(|g| g.iter().all(|c| c.is_data_available()));
        let params_ready = self
            .param_groups
            .read()
            .values()
            .filter(|g| g.is_needed())
            .all(|g| g.iter().all(|c| c.is_data_available()));
        let outputs_drained = self
            .output_groups
            .read()
            .values()
            .filter(|g| g.is_needed())
            .all(|g| g.iter().all(|c| !c.is_data_available()));
        inputs_ready && params_ready && outputs_drained
    }

    /// One execution step with the worker's interrupt signal (or none when
    /// driven externally before `start`).
    pub fn run(&self) -> Result<RunStep> {
        let signal = if self.is_started() {
            self.worker
                .lock()
                .as_ref()
                .map(|w| w.signal.clone())
                .unwrap_or_else(InterruptSignal::none)
        } else {
            InterruptSignal::none()
        };
        self.run_with(&signal)
    }

    /// One execution step: block-transfer needed inputs, best-effort
    /// transfer parameters, execute the body, publish needed outputs.
    ///
    /// Raising `interrupt` during any blocking wait aborts the step cleanly:
    /// the body is not executed and no outputs are published for that
    /// iteration.
    pub fn run_with(&self, interrupt: &InterruptSignal) -> Result<RunStep> {
        if !self.is_initialized() {
            return Err(ProcessError::NotInitialized(format!(
                "process {}",
                self.name()
            )));
        }

        // 1. Needed inputs, blocking.
        if self.transfer_section(PortSection::Input, true, interrupt)? == RunStep::Interrupted {
            return Ok(RunStep::Interrupted);
        }

        // 2. Parameters, best effort.
        if self.transfer_section(PortSection::Parameter, false, interrupt)? == RunStep::Interrupted
        {
            return Ok(RunStep::Interrupted);
        }

        // 3. The algorithm.
        let io = ProcessIo::new(self);
        if let Err(source) = self.body.lock().execute(&io) {
            let error = ProcessError::Execution {
                process: self.name().to_string(),
                source,
            };
            tracing::error!("[{}] {error}", self.name());
            return Err(error);
        }

        // 4. Publish, unless cancelled while executing.
        if interrupt.is_raised() {
            return Ok(RunStep::Interrupted);
        }
        self.publish_outputs(interrupt)
    }

    fn transfer_section(
        &self,
        section: PortSection,
        blocking: bool,
        interrupt: &InterruptSignal,
    ) -> Result<RunStep> {
        let ports = self.ports(section).read();
        let groups = self.groups(section).read();
        for (port_name, group) in groups.iter() {
            if !group.is_needed() {
                continue;
            }
            let port = ports
                .get(port_name)
                .ok_or_else(|| ProcessError::PortNotFound(format!("{section} {port_name}")))?;
            let block = port.block().ok_or_else(|| {
                ProcessError::NotInitialized(format!("port {port_name} of {}", self.name()))
            })?;
            for connection in group.iter() {
                match connection.transfer(blocking, interrupt) {
                    Err(_) => return Ok(RunStep::Interrupted),
                    Ok(None) => {}
                    Ok(Some(frame)) => {
                        let dest = connection.destination().ok_or_else(|| {
                            ProcessError::Wiring(format!(
                                "unbound destination on a {section} connection of {}",
                                self.name()
                            ))
                        })?;
                        let values = frame.values();
                        if values.len() != dest.range.len() {
                            return Err(ProcessError::Incompatible(format!(
                                "received {} values for the {} slots of {}",
                                values.len(),
                                dest.range.len(),
                                dest.label()
                            )));
                        }
                        block.write_range(dest.range.start, &values);
                    }
                }
            }
        }
        Ok(RunStep::Completed)
    }

    fn publish_outputs(&self, interrupt: &InterruptSignal) -> Result<RunStep> {
        let ports = self.outputs.read();
        let groups = self.output_groups.read();
        for (port_name, group) in groups.iter() {
            if !group.is_needed() {
                continue;
            }
            let port = ports
                .get(port_name)
                .ok_or_else(|| ProcessError::PortNotFound(format!("output {port_name}")))?;
            let block = port.block().ok_or_else(|| {
                ProcessError::NotInitialized(format!("port {port_name} of {}", self.name()))
            })?;
            for connection in group.iter() {
                let range = connection
                    .source()
                    .map(|s| s.range)
                    .unwrap_or(0..block.len());
                let frame = DataFrame {
                    block: block.clone(),
                    range,
                };
                if connection.publish(frame, interrupt).is_err() {
                    return Ok(RunStep::Interrupted);
                }
            }
            if group.any_queued() {
                // Detach the published storage so the next execution cannot
                // mutate values already queued downstream.
                port.set_block(block.renew());
            }
        }
        Ok(RunStep::Completed)
    }

    /// Start a worker on a dedicated thread. Idempotent while started;
    /// initializes first if needed.
    ///
    /// `on_error` receives the single fatal error that stops the worker, if
    /// one occurs. The worker never restarts on its own.
    pub fn start<F>(self: &Arc<Self>, on_error: F) -> Result<()>
    where
        F: FnOnce(ProcessError) + Send + 'static,
    {
        self.start_inner(None, Box::new(on_error))
    }

    /// Start the worker loop on an externally-owned pool instead of a
    /// dedicated thread.
    pub fn start_on<F>(self: &Arc<Self>, pool: &dyn WorkerPool, on_error: F) -> Result<()>
    where
        F: FnOnce(ProcessError) + Send + 'static,
    {
        self.start_inner(Some(pool), Box::new(on_error))
    }

    fn start_inner(
        self: &Arc<Self>,
        pool: Option<&dyn WorkerPool>,
        on_error: ErrorCallback,
    ) -> Result<()> {
        let mut worker = self.worker.lock();
        if self.is_started() {
            return Ok(());
        }
        if !self.is_initialized() {
            self.init()?;
        }

        let (guard, signal) = InterruptSignal::pair();
        self.started.store(true, Ordering::SeqCst);
        *self.state.lock() = ProcessState::Running;

        let task = {
            let process = Arc::clone(self);
            let signal = signal.clone();
            move || run_process_loop(process, signal, on_error)
        };
        let thread = match pool {
            Some(pool) => {
                pool.spawn(self.name(), Box::new(task));
                None
            }
            None => {
                let handle = std::thread::Builder::new()
                    .name(format!("process-{}", self.name()))
                    .spawn(task)
                    .inspect_err(|_| {
                        self.started.store(false, Ordering::SeqCst);
                        *self.state.lock() = ProcessState::Initialized;
                    })?;
                Some(handle)
            }
        };
        *worker = Some(Worker {
            guard: Some(guard),
            signal,
            thread,
        });
        tracing::info!("[{}] started", self.name());
        Ok(())
    }

    /// Request the worker to stop. Idempotent, non-blocking: a worker
    /// blocked in a transfer or publish is woken and exits after the
    /// current iteration. Use [`join`](ExecutableProcess::join) to await
    /// termination.
    pub fn stop(&self) {
        if !self.started.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(worker) = self.worker.lock().as_mut() {
            worker.guard.take();
        }
        tracing::debug!("[{}] stop requested", self.name());
    }

    /// Wait for the dedicated worker thread to terminate. No-op for
    /// pool-hosted workers or when never started. Must not be called from
    /// the worker itself.
    pub fn join(&self) {
        let thread = { self.worker.lock().as_mut().and_then(|w| w.thread.take()) };
        if let Some(thread) = thread {
            let _ = thread.join();
        }
    }

    /// Stop, discard buffered connection data, and mark the process
    /// terminally disposed. Connections themselves stay shared with peer
    /// processes and are not destroyed.
    pub fn dispose(&self) {
        self.stop();
        for section in [
            PortSection::Input,
            PortSection::Output,
            PortSection::Parameter,
        ] {
            for group in self.groups(section).read().values() {
                group.clear_buffers();
            }
        }
        self.initialized.store(false, Ordering::SeqCst);
        *self.state.lock() = ProcessState::Disposed;
        tracing::debug!("[{}] disposed", self.name());
    }

    /// Flag the process stopped after a fatal run error (worker-side).
    pub(crate) fn mark_stopped(&self) {
        self.started.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.lock().as_mut() {
            worker.guard.take();
        }
    }

    /// Worker exit: Running collapses to Stopped; Disposed stays terminal.
    pub(crate) fn finish_worker(&self) {
        let mut state = self.state.lock();
        if *state == ProcessState::Running {
            *state = ProcessState::Stopped;
        }
    }
}

impl std::fmt::Debug for ExecutableProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableProcess")
            .field("name", &self.name())
            .field("state", &self.state())
            .field("inputs", &self.inputs.read().len())
            .field("outputs", &self.outputs.read().len())
            .field("params", &self.params.read().len())
            .finish()
    }
}

/// Split `port/sub/path` into the port name and the remaining path.
fn split_path(path: &str) -> (&str, &str) {
    match path.split_once('/') {
        Some((port, rest)) => (port, rest),
        None => (path, ""),
    }
}

/// Whether two destination paths conflict: equal, or one an ancestor of the
/// other, segment-wise. The empty path is the port root and conflicts with
/// everything.
fn paths_overlap(a: &str, b: &str) -> bool {
    let a: Vec<&str> = a.split('/').filter(|s| !s.is_empty()).collect();
    let b: Vec<&str> = b.split('/').filter(|s| !s.is_empty()).collect();
    let common = a.len().min(b.len());
    a[..common] == b[..common]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connection::SyncConnection;
    use crate::core::data::Value;

    struct Noop;
    impl ProcessBody for Noop {
        fn execute(&mut self, _io: &ProcessIo<'_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn sync_conn() -> Arc<dyn DataConnection> {
        Arc::new(SyncConnection::new())
    }

    fn nav_process() -> ExecutableProcess {
        let process = ExecutableProcess::new(ProcessInfo::new("nav"), Noop);
        process
            .add_input(
                "pos",
                DataComponent::record(
                    "pos",
                    vec![
                        DataComponent::quantity("lat", None),
                        DataComponent::quantity("lon", None),
                    ],
                ),
            )
            .unwrap();
        process
            .add_output("speed", DataComponent::quantity("speed", Some("m/s")))
            .unwrap();
        process
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("x"), ("x", ""));
        assert_eq!(split_path("pos/lat"), ("pos", "lat"));
        assert_eq!(split_path("track/2/alt"), ("track", "2/alt"));
    }

    #[test]
    fn test_paths_overlap() {
        assert!(paths_overlap("", ""));
        assert!(paths_overlap("", "lat"));
        assert!(paths_overlap("lat", ""));
        assert!(paths_overlap("lat", "lat"));
        assert!(!paths_overlap("lat", "lon"));
        assert!(paths_overlap("a/b", "a/b/c"));
        assert!(!paths_overlap("a/b", "a/c"));
    }

    #[test]
    fn test_connect_unknown_component() {
        let process = nav_process();
        let conn = sync_conn();
        assert!(matches!(
            process.connect(PortSection::Input, "bogus", &conn),
            Err(ProcessError::Wiring(_))
        ));
        assert!(matches!(
            process.connect(PortSection::Input, "pos/depth", &conn),
            Err(ProcessError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_destination_exclusivity_along_ancestors() {
        let process = nav_process();
        let first = sync_conn();
        process
            .connect(PortSection::Input, "pos/lat", &first)
            .unwrap();

        // Same component, the whole port, and the same leaf again all clash.
        for path in ["pos/lat", "pos"] {
            let conn = sync_conn();
            assert!(
                matches!(
                    process.connect(PortSection::Input, path, &conn),
                    Err(ProcessError::Wiring(_))
                ),
                "expected conflict on {path}"
            );
        }

        // A sibling leaf is fine.
        let sibling = sync_conn();
        process
            .connect(PortSection::Input, "pos/lon", &sibling)
            .unwrap();
        assert_eq!(process.input_connections("pos").len(), 2);
    }

    #[test]
    fn test_output_fan_out_allowed() {
        let process = nav_process();
        let a = sync_conn();
        let b = sync_conn();
        process.connect(PortSection::Output, "speed", &a).unwrap();
        process.connect(PortSection::Output, "speed", &b).unwrap();
        assert_eq!(process.output_connections("speed").len(), 2);
    }

    #[test]
    fn test_disconnect_unbinds_and_errors_when_absent() {
        let process = nav_process();
        let conn = sync_conn();
        process
            .connect(PortSection::Input, "pos/lat", &conn)
            .unwrap();
        assert!(conn.destination().is_some());

        process.disconnect(&conn).unwrap();
        assert!(conn.destination().is_none());
        assert!(process.input_connections("pos").is_empty());

        assert!(matches!(
            process.disconnect(&conn),
            Err(ProcessError::ConnectionNotFound(_))
        ));
    }

    #[test]
    fn test_run_before_init_fails() {
        let process = nav_process();
        assert!(matches!(
            process.run(),
            Err(ProcessError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_init_allocates_blocks() {
        let process = nav_process();
        process.init().unwrap();
        assert_eq!(process.state(), ProcessState::Initialized);
        let view = process.input("pos").unwrap();
        assert_eq!(view.block().len(), 2);
        view.set_double("lat", 51.5).unwrap();
        assert_eq!(view.get_double("lat").unwrap(), 51.5);
    }

    #[test]
    fn test_ports_fixed_after_init() {
        let process = nav_process();
        process.init().unwrap();
        assert!(matches!(
            process.add_input("late", DataComponent::count("late")),
            Err(ProcessError::IllegalState(_))
        ));
    }

    #[test]
    fn test_init_rejects_empty_record() {
        let process = ExecutableProcess::new(ProcessInfo::new("bad"), Noop);
        process
            .add_input("empty", DataComponent::record("empty", vec![]))
            .unwrap();
        assert!(matches!(
            process.init(),
            Err(ProcessError::Init { .. })
        ));
        assert!(!process.is_initialized());
    }

    #[test]
    fn test_can_run_gating() {
        let process = nav_process();
        assert!(!process.can_run());
        process.init().unwrap();
        // No connections at all: nothing needed, admission passes.
        assert!(process.can_run());

        let conn = sync_conn();
        process.connect(PortSection::Input, "pos", &conn).unwrap();
        assert!(!process.can_run());

        conn.publish(
            DataFrame {
                block: DataBlock::from_values(vec![Value::Double(1.0), Value::Double(2.0)]),
                range: 0..2,
            },
            &InterruptSignal::none(),
        )
        .unwrap();
        assert!(process.can_run());

        // An undrained needed output blocks admission.
        let out = sync_conn();
        process.connect(PortSection::Output, "speed", &out).unwrap();
        assert!(process.can_run());
        out.publish(
            DataFrame {
                block: DataBlock::from_values(vec![Value::Double(0.0)]),
                range: 0..1,
            },
            &InterruptSignal::none(),
        )
        .unwrap();
        assert!(!process.can_run());
    }

    #[test]
    fn test_needed_override_unblocks_admission() {
        let process = nav_process();
        process.init().unwrap();
        let conn = sync_conn();
        process.connect(PortSection::Input, "pos", &conn).unwrap();
        assert!(!process.can_run());
        process
            .set_connections_needed(PortSection::Input, "pos", false)
            .unwrap();
        assert!(process.can_run());
    }

    #[test]
    fn test_dispose_is_terminal() {
        let process = nav_process();
        process.init().unwrap();
        process.dispose();
        assert_eq!(process.state(), ProcessState::Disposed);
        assert!(!process.is_initialized());
        assert!(matches!(
            process.init(),
            Err(ProcessError::IllegalState(_))
        ));
    }
}
