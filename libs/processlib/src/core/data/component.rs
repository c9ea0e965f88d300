// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use super::Value;
use crate::core::error::{ProcessError, Result};

/// Scalar leaf type of a component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    Bool,
    Int,
    Double,
    Text,
}

impl ScalarKind {
    /// The zero value slots of this kind start out with.
    pub fn default_value(&self) -> Value {
        match self {
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::Int => Value::Int(0),
            ScalarKind::Double => Value::Double(0.0),
            ScalarKind::Text => Value::Text(String::new()),
        }
    }
}

/// Shape of a component: a typed scalar leaf, a record of named fields, or
/// a fixed-size array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentShape {
    Scalar {
        kind: ScalarKind,
        unit: Option<String>,
    },
    Record {
        fields: Vec<DataComponent>,
    },
    Array {
        element: Box<DataComponent>,
        len: usize,
    },
}

/// One scalar leaf of a flattened component tree.
///
/// Connection endpoints are compatible when their flattened leaf sequences
/// match leaf-for-leaf, kind and unit included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafSignature {
    pub kind: ScalarKind,
    pub unit: Option<String>,
}

/// A sub-component resolved from a path, with its slot offset below the
/// resolution root.
#[derive(Debug)]
pub struct ResolvedComponent<'a> {
    pub component: &'a DataComponent,
    pub offset: usize,
}

/// A named, typed data structure description.
///
/// Components are immutable once attached to a port; only the root name is
/// rewritten when the component is registered, so the port name and the
/// component name stay in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataComponent {
    name: String,
    shape: ComponentShape,
}

impl DataComponent {
    pub fn new(name: &str, shape: ComponentShape) -> Self {
        Self {
            name: name.to_string(),
            shape,
        }
    }

    /// Boolean scalar.
    pub fn boolean(name: &str) -> Self {
        Self::new(
            name,
            ComponentShape::Scalar {
                kind: ScalarKind::Bool,
                unit: None,
            },
        )
    }

    /// Integer scalar (a count, an index).
    pub fn count(name: &str) -> Self {
        Self::new(
            name,
            ComponentShape::Scalar {
                kind: ScalarKind::Int,
                unit: None,
            },
        )
    }

    /// Double scalar with an optional unit of measure.
    pub fn quantity(name: &str, unit: Option<&str>) -> Self {
        Self::new(
            name,
            ComponentShape::Scalar {
                kind: ScalarKind::Double,
                unit: unit.map(str::to_string),
            },
        )
    }

    /// Free-text scalar.
    pub fn text(name: &str) -> Self {
        Self::new(
            name,
            ComponentShape::Scalar {
                kind: ScalarKind::Text,
                unit: None,
            },
        )
    }

    /// Record of named fields.
    pub fn record(name: &str, fields: Vec<DataComponent>) -> Self {
        Self::new(name, ComponentShape::Record { fields })
    }

    /// Fixed-size array of a homogeneous element.
    pub fn array(name: &str, element: DataComponent, len: usize) -> Self {
        Self::new(
            name,
            ComponentShape::Array {
                element: Box::new(element),
                len,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn shape(&self) -> &ComponentShape {
        &self.shape
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.shape, ComponentShape::Scalar { .. })
    }

    /// Whether this component has addressable sub-components.
    pub fn has_subcomponents(&self) -> bool {
        !self.is_scalar()
    }

    /// Number of flat scalar slots this component occupies.
    pub fn slot_count(&self) -> usize {
        match &self.shape {
            ComponentShape::Scalar { .. } => 1,
            ComponentShape::Record { fields } => fields.iter().map(DataComponent::slot_count).sum(),
            ComponentShape::Array { element, len } => element.slot_count() * len,
        }
    }

    /// Flattened scalar-leaf sequence, in slot order.
    pub fn signature(&self) -> Vec<LeafSignature> {
        let mut leaves = Vec::with_capacity(self.slot_count());
        self.collect_signature(&mut leaves);
        leaves
    }

    fn collect_signature(&self, leaves: &mut Vec<LeafSignature>) {
        match &self.shape {
            ComponentShape::Scalar { kind, unit } => leaves.push(LeafSignature {
                kind: *kind,
                unit: unit.clone(),
            }),
            ComponentShape::Record { fields } => {
                for field in fields {
                    field.collect_signature(leaves);
                }
            }
            ComponentShape::Array { element, len } => {
                for _ in 0..*len {
                    element.collect_signature(leaves);
                }
            }
        }
    }

    /// Default values for every slot, in slot order.
    pub(crate) fn default_values(&self) -> Vec<Value> {
        self.signature()
            .iter()
            .map(|leaf| leaf.kind.default_value())
            .collect()
    }

    /// Resolve a slash-separated path below this component.
    ///
    /// The empty path resolves to the component itself. Record segments are
    /// field names; array segments are decimal indices.
    pub fn resolve(&self, path: &str) -> Result<ResolvedComponent<'_>> {
        let mut current = self;
        let mut offset = 0;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match &current.shape {
                ComponentShape::Scalar { .. } => {
                    return Err(ProcessError::ComponentNotFound(format!(
                        "{} has no sub-component {segment:?}",
                        current.name
                    )));
                }
                ComponentShape::Record { fields } => {
                    let mut found = None;
                    for field in fields {
                        if field.name == segment {
                            found = Some(field);
                            break;
                        }
                        offset += field.slot_count();
                    }
                    current = found.ok_or_else(|| {
                        ProcessError::ComponentNotFound(format!(
                            "record {} has no field {segment:?}",
                            current.name
                        ))
                    })?;
                }
                ComponentShape::Array { element, len } => {
                    let index: usize = segment.parse().map_err(|_| {
                        ProcessError::ComponentNotFound(format!(
                            "array {} expects a numeric index, got {segment:?}",
                            current.name
                        ))
                    })?;
                    if index >= *len {
                        return Err(ProcessError::ComponentNotFound(format!(
                            "index {index} out of bounds for array {} of length {len}",
                            current.name
                        )));
                    }
                    offset += index * element.slot_count();
                    current = element;
                }
            }
        }
        Ok(ResolvedComponent {
            component: current,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> DataComponent {
        DataComponent::record(
            "pos",
            vec![
                DataComponent::quantity("lat", Some("deg")),
                DataComponent::quantity("lon", Some("deg")),
                DataComponent::quantity("alt", Some("m")),
            ],
        )
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(DataComponent::count("n").slot_count(), 1);
        assert_eq!(position().slot_count(), 3);
        assert_eq!(
            DataComponent::array("track", position(), 4).slot_count(),
            12
        );
    }

    #[test]
    fn test_resolve_empty_path_is_root() {
        let pos = position();
        let resolved = pos.resolve("").unwrap();
        assert_eq!(resolved.offset, 0);
        assert_eq!(resolved.component.name(), "pos");
    }

    #[test]
    fn test_resolve_record_field_offsets() {
        let pos = position();
        assert_eq!(pos.resolve("lat").unwrap().offset, 0);
        assert_eq!(pos.resolve("lon").unwrap().offset, 1);
        assert_eq!(pos.resolve("alt").unwrap().offset, 2);
    }

    #[test]
    fn test_resolve_nested_array_path() {
        let track = DataComponent::array("track", position(), 4);
        let resolved = track.resolve("2/alt").unwrap();
        assert_eq!(resolved.offset, 2 * 3 + 2);
        assert!(resolved.component.is_scalar());
    }

    #[test]
    fn test_resolve_unknown_field() {
        let pos = position();
        assert!(matches!(
            pos.resolve("depth"),
            Err(ProcessError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_below_scalar_fails() {
        let n = DataComponent::count("n");
        assert!(matches!(
            n.resolve("anything"),
            Err(ProcessError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_array_bounds() {
        let track = DataComponent::array("track", position(), 4);
        assert!(track.resolve("3").is_ok());
        assert!(matches!(
            track.resolve("4"),
            Err(ProcessError::ComponentNotFound(_))
        ));
        assert!(matches!(
            track.resolve("lat"),
            Err(ProcessError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_signature_flattening() {
        let sig = position().signature();
        assert_eq!(sig.len(), 3);
        assert_eq!(sig[0].kind, ScalarKind::Double);
        assert_eq!(sig[0].unit.as_deref(), Some("deg"));
        assert_eq!(sig[2].unit.as_deref(), Some("m"));
    }

    #[test]
    fn test_serde_round_trip() {
        let track = DataComponent::array("track", position(), 2);
        let json = serde_json::to_string(&track).unwrap();
        let back: DataComponent = serde_json::from_str(&json).unwrap();
        assert_eq!(track, back);
    }
}
