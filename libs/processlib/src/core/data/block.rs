// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::DataComponent;

/// A single scalar slot value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
}

impl Value {
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(v) => *v,
            Value::Int(v) => *v != 0,
            Value::Double(v) => *v != 0.0,
            Value::Text(v) => !v.is_empty(),
        }
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Value::Bool(v) => i64::from(*v),
            Value::Int(v) => *v,
            Value::Double(v) => *v as i64,
            Value::Text(v) => v.parse().unwrap_or(0),
        }
    }

    pub fn as_double(&self) -> f64 {
        match self {
            Value::Bool(v) => f64::from(u8::from(*v)),
            Value::Int(v) => *v as f64,
            Value::Double(v) => *v,
            Value::Text(v) => v.parse().unwrap_or(f64::NAN),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
            Value::Text(v) => v.clone(),
        }
    }
}

/// Flat slot storage shared by a whole port component tree.
///
/// Cloning a block shares storage (a cheap handle copy); [`DataBlock::renew`]
/// produces a structurally identical block with independent storage. The
/// engine renews an output block after publishing on a queued connection so
/// no two in-flight values ever share a mutable backing buffer.
#[derive(Clone, Debug)]
pub struct DataBlock {
    slots: Arc<RwLock<Vec<Value>>>,
}

impl DataBlock {
    /// Zero-initialized storage for a component tree.
    pub fn for_component(component: &DataComponent) -> Self {
        Self::from_values(component.default_values())
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            slots: Arc::new(RwLock::new(values)),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Value of one slot. Panics if `slot` is out of range; slot indices
    /// come from component resolution and are validated there.
    pub fn get(&self, slot: usize) -> Value {
        self.slots.read()[slot].clone()
    }

    pub fn set(&self, slot: usize, value: Value) {
        self.slots.write()[slot] = value;
    }

    pub fn get_bool(&self, slot: usize) -> bool {
        self.get(slot).as_bool()
    }

    pub fn get_int(&self, slot: usize) -> i64 {
        self.get(slot).as_int()
    }

    pub fn get_double(&self, slot: usize) -> f64 {
        self.get(slot).as_double()
    }

    pub fn get_text(&self, slot: usize) -> String {
        self.get(slot).as_text()
    }

    pub fn set_bool(&self, slot: usize, value: bool) {
        self.set(slot, Value::Bool(value));
    }

    pub fn set_int(&self, slot: usize, value: i64) {
        self.set(slot, Value::Int(value));
    }

    pub fn set_double(&self, slot: usize, value: f64) {
        self.set(slot, Value::Double(value));
    }

    pub fn set_text(&self, slot: usize, value: &str) {
        self.set(slot, Value::Text(value.to_string()));
    }

    /// Consistent snapshot of a slot range.
    pub fn read_range(&self, range: Range<usize>) -> Vec<Value> {
        self.slots.read()[range].to_vec()
    }

    /// Overwrite a slot range starting at `start`.
    pub fn write_range(&self, start: usize, values: &[Value]) {
        let mut slots = self.slots.write();
        slots[start..start + values.len()].clone_from_slice(values);
    }

    /// Structurally identical copy with independent storage.
    pub fn renew(&self) -> DataBlock {
        Self::from_values(self.slots.read().clone())
    }

    /// Whether two handles point at the same backing storage.
    pub fn shares_storage_with(&self, other: &DataBlock) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }
}
