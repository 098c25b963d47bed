// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Composite-type descriptors consumed from the schema model.
//!
//! The adapter generator runs offline against the DSDL schema tree and emits
//! one `'static` descriptor per composite type. The codec core never parses
//! schemas; it only reads these.

use std::fmt;

/// DSDL type version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeVersion {
    pub major: u8,
    pub minor: u8,
}

impl TypeVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for TypeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Schema metadata for one composite type.
///
/// `parent_service` is set on the nested `Request`/`Response` halves of a
/// service type and points at the service's own descriptor.
#[derive(Debug, PartialEq, Eq)]
pub struct CompositeTypeDescriptor {
    /// Dotted path, e.g. `uavcan.node.Heartbeat`.
    pub full_name: &'static str,
    /// Final path component, e.g. `Heartbeat`.
    pub short_name: &'static str,
    pub version: TypeVersion,
    /// Stable port identifier, present for the regulated subset of types.
    pub fixed_port_id: Option<u16>,
    pub parent_service: Option<&'static CompositeTypeDescriptor>,
    /// Upper bound on the serialized representation; encode buffers are
    /// pre-sized to this.
    pub max_serialized_size_bytes: usize,
    /// Lower bound in bits; the decode pre-check uses this.
    pub min_serialized_size_bits: usize,
}

impl CompositeTypeDescriptor {
    pub const fn new(
        full_name: &'static str,
        short_name: &'static str,
        version: TypeVersion,
        fixed_port_id: Option<u16>,
        parent_service: Option<&'static CompositeTypeDescriptor>,
        max_serialized_size_bytes: usize,
        min_serialized_size_bits: usize,
    ) -> Self {
        Self {
            full_name,
            short_name,
            version,
            fixed_port_id,
            parent_service,
            max_serialized_size_bytes,
            min_serialized_size_bits,
        }
    }

    /// Dotted-path components of the full name.
    pub fn name_components(&self) -> impl Iterator<Item = &'static str> {
        self.full_name.split('.')
    }

    /// Namespace prefix (the full name minus the final component).
    pub fn namespace(&self) -> &'static str {
        match self.full_name.rfind('.') {
            Some(idx) => &self.full_name[..idx],
            None => "",
        }
    }

    /// True for the nested request/response half of a service type.
    pub fn is_service_member(&self) -> bool {
        self.parent_service.is_some()
    }
}

/// Renders the canonical `name.major.minor` form used in log records and
/// error messages.
impl fmt::Display for CompositeTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.full_name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static HEARTBEAT: CompositeTypeDescriptor = CompositeTypeDescriptor::new(
        "uavcan.node.Heartbeat",
        "Heartbeat",
        TypeVersion::new(1, 0),
        Some(7509),
        None,
        7,
        56,
    );

    #[test]
    fn test_name_helpers() {
        assert_eq!(HEARTBEAT.namespace(), "uavcan.node");
        assert_eq!(
            HEARTBEAT.name_components().collect::<Vec<_>>(),
            vec!["uavcan", "node", "Heartbeat"]
        );
        assert!(!HEARTBEAT.is_service_member());
    }

    #[test]
    fn test_display_form() {
        assert_eq!(HEARTBEAT.to_string(), "uavcan.node.Heartbeat.1.0");
        assert_eq!(TypeVersion::new(1, 2).to_string(), "1.2");
    }
}
