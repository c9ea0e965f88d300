// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Structured data model carried through process ports.
//!
//! A [`DataComponent`] describes the shape of a port: a typed scalar leaf,
//! a record of named fields, or a fixed-size array. A [`DataBlock`] holds
//! the flat slot storage a whole port tree shares; nested components map
//! onto contiguous slot ranges of the same block.

mod block;
mod component;

pub use block::{DataBlock, Value};
pub use component::{ComponentShape, DataComponent, LeafSignature, ResolvedComponent, ScalarKind};
