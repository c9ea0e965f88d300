//! Named, ordered port collections for a process instance.
//!
//! Every process owns three [`PortList`]s (inputs, outputs, parameters).
//! A port pairs a name with a [`DataComponent`] describing its shape and,
//! once the process is initialized, the [`DataBlock`] backing the whole
//! component tree.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::data::{DataBlock, DataComponent};
use crate::core::error::{ProcessError, Result};

/// Which of the three port collections a port belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortSection {
    Input,
    Output,
    Parameter,
}

impl fmt::Display for PortSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSection::Input => write!(f, "input"),
            PortSection::Output => write!(f, "output"),
            PortSection::Parameter => write!(f, "parameter"),
        }
    }
}

/// A named, typed data slot on a process instance.
pub struct Port {
    name: String,
    component: DataComponent,
    block: Mutex<Option<DataBlock>>,
}

impl Port {
    fn new(name: &str, mut component: DataComponent) -> Self {
        // Keep the component root name and the registered port name in sync.
        component.set_name(name);
        Self {
            name: name.to_string(),
            component,
            block: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> &DataComponent {
        &self.component
    }

    /// Current backing block, `None` until the owning process initializes.
    pub fn block(&self) -> Option<DataBlock> {
        self.block.lock().clone()
    }

    /// Whether a backing block has been assigned.
    pub fn has_data(&self) -> bool {
        self.block.lock().is_some()
    }

    pub(crate) fn set_block(&self, block: DataBlock) {
        *self.block.lock() = Some(block);
    }
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Port")
            .field("name", &self.name)
            .field("slots", &self.component.slot_count())
            .field("has_data", &self.has_data())
            .finish()
    }
}

/// Ordered, name-indexed port registry.
///
/// Insertion order is preserved for positional lookup. Ports cannot be
/// removed; a process's port set is fixed once it initializes.
#[derive(Default)]
pub struct PortList {
    ports: Vec<Arc<Port>>,
    index: HashMap<String, usize>,
}

impl PortList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new named port. The component root is renamed to `name`.
    pub fn add(&mut self, name: &str, component: DataComponent) -> Result<Arc<Port>> {
        if self.index.contains_key(name) {
            return Err(ProcessError::DuplicatePort(name.to_string()));
        }
        let port = Arc::new(Port::new(name, component));
        self.index.insert(name.to_string(), self.ports.len());
        self.ports.push(port.clone());
        Ok(port)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Port>> {
        self.index.get(name).map(|&i| self.ports[i].clone())
    }

    pub fn get_at(&self, index: usize) -> Option<Arc<Port>> {
        self.ports.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Port>> {
        self.ports.iter()
    }
}
