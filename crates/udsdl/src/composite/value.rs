// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic field access for generated composite types.
//!
//! DSDL field names that collide with Rust keywords are stored with a
//! trailing underscore (`type` becomes `type_`). [`get_attribute`] and
//! [`set_attribute`] let callers use the original DSDL names; the underscore
//! retry is handled here so generated [`Fields`] impls only ever see their
//! storage names.

use crate::error::{Error, Result};

/// Dynamically typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    /// Unsigned integer of any DSDL width up to 64 bits.
    Unsigned(u64),
    /// Signed integer of any DSDL width up to 64 bits.
    Integer(i64),
    /// Floating point (binary16/32/64 all widen to f64 here).
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn from_u32(v: u32) -> Self {
        Value::Unsigned(u64::from(v))
    }

    pub fn from_i32(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }

    pub fn from_f32(v: f32) -> Self {
        Value::Float(f64::from(v))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Unsigned(_) => "unsigned",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
        }
    }
}

/// Field reflection implemented by generated composite types.
///
/// Implementations match on the *storage* name only; the original-name
/// aliasing lives in the free functions below.
pub trait Fields {
    /// Reads a field by its storage name. `None` if no such field exists.
    fn get(&self, name: &str) -> Option<Value>;

    /// Writes a field by its storage name. `AttributeMissing` if no such
    /// field exists, `AttributeType` if the value shape does not fit.
    fn set(&mut self, name: &str, value: &Value) -> Result<()>;
}

/// Reads a field by its original DSDL name, retrying with a trailing
/// underscore for names that collide with reserved identifiers.
pub fn get_attribute<T: Fields>(obj: &T, name: &str) -> Result<Value> {
    if let Some(v) = obj.get(name) {
        return Ok(v);
    }
    if let Some(v) = obj.get(&format!("{}_", name)) {
        return Ok(v);
    }
    Err(Error::AttributeMissing { name: name.to_string() })
}

/// Writes a field by its original DSDL name, with the same underscore retry
/// as [`get_attribute`]. Never creates fields that do not exist.
pub fn set_attribute<T: Fields>(obj: &mut T, name: &str, value: &Value) -> Result<()> {
    match obj.set(name, value) {
        Err(Error::AttributeMissing { .. }) => match obj.set(&format!("{}_", name), value) {
            Err(Error::AttributeMissing { .. }) => {
                Err(Error::AttributeMissing { name: name.to_string() })
            }
            other => other,
        },
        other => other,
    }
}
