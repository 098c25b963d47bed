// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor-to-adapter resolution.
//!
//! Generated code registers every adapter at load time under its
//! `(full_name, major, minor)` key; runtime lookups then resolve a schema
//! descriptor to the adapter that implements it. Reserved-identifier
//! suffixing is a generator concern -- the registry only ever sees final
//! keys.
//!
//! # Architecture
//!
//! ```text
//! REGISTRY (static global)
//! +-- RwLock<HashMap<Key, AdapterEntry>>
//!
//! Key
//! +-- full_name: &'static str
//! +-- (major, minor)
//!
//! AdapterEntry (one per registered adapter)
//! +-- descriptor: &'static CompositeTypeDescriptor
//! +-- fixed_port_id (adapter-declared, checked against the descriptor)
//! +-- rust_type_id  (identity for adapter <-> entry round trips)
//! +-- kind: Message | Service { request, response }
//! ```
//!
//! Nested service halves resolve in two steps, mirroring their dotted names:
//! the parent service entry is found first, then the `Request`/`Response`
//! descriptor it links to is looked up by short name.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::composite::{model_of, CompositeOwned, FixedPort, Service};
use crate::error::{Error, Result};
use crate::types::CompositeTypeDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key {
    full_name: &'static str,
    major: u8,
    minor: u8,
}

impl Key {
    fn of(descriptor: &CompositeTypeDescriptor) -> Self {
        Self {
            full_name: descriptor.full_name,
            major: descriptor.version.major,
            minor: descriptor.version.minor,
        }
    }
}

/// What a registered adapter is.
#[derive(Debug, Clone, Copy)]
pub enum AdapterKind {
    Message,
    /// Service adapters are not serializable; they link to their halves.
    Service {
        request: &'static CompositeTypeDescriptor,
        response: &'static CompositeTypeDescriptor,
    },
}

/// Registry record for one adapter.
#[derive(Debug, Clone)]
pub struct AdapterEntry {
    pub descriptor: &'static CompositeTypeDescriptor,
    /// Adapter-declared fixed port identifier; absent for non-fixed types.
    pub fixed_port_id: Option<u16>,
    pub kind: AdapterKind,
    rust_type_id: TypeId,
}

impl AdapterEntry {
    /// True when this entry was registered for the adapter type `T`.
    /// `adapter_of(model_of::<T>())` always satisfies `is::<T>()`.
    pub fn is<T: 'static>(&self) -> bool {
        self.rust_type_id == TypeId::of::<T>()
    }
}

fn registry() -> &'static RwLock<HashMap<Key, AdapterEntry>> {
    static REGISTRY: OnceLock<RwLock<HashMap<Key, AdapterEntry>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

fn insert<T: 'static>(
    descriptor: &'static CompositeTypeDescriptor,
    fixed_port_id: Option<u16>,
    kind: AdapterKind,
) {
    // When both the descriptor and the adapter declare a port, they must
    // agree; a mismatch is a generator bug.
    if let (Some(declared), Some(modeled)) = (fixed_port_id, descriptor.fixed_port_id) {
        debug_assert_eq!(declared, modeled, "fixed port mismatch for {}", descriptor);
    }
    let entry = AdapterEntry {
        descriptor,
        fixed_port_id,
        kind,
        rust_type_id: TypeId::of::<T>(),
    };
    registry().write().insert(Key::of(descriptor), entry);
}

/// Registers a plain composite adapter. Latest registration for a key wins.
pub fn register<T>()
where
    T: CompositeOwned + 'static,
{
    insert::<T>(model_of::<T>(), None, AdapterKind::Message);
}

/// Registers a composite adapter that carries a fixed port identifier.
pub fn register_fixed_port<T>()
where
    T: CompositeOwned + FixedPort + 'static,
{
    insert::<T>(model_of::<T>(), Some(T::FIXED_PORT_ID), AdapterKind::Message);
}

/// Registers a service adapter together with its request and response
/// halves.
pub fn register_service<S>()
where
    S: Service + 'static,
    S::Request: 'static,
    S::Response: 'static,
{
    let request = model_of::<S::Request>();
    let response = model_of::<S::Response>();
    insert::<S>(model_of::<S>(), None, AdapterKind::Service { request, response });
    insert::<S::Request>(request, None, AdapterKind::Message);
    insert::<S::Response>(response, None, AdapterKind::Message);
}

/// Registers a service adapter that carries a fixed port identifier.
pub fn register_service_fixed_port<S>()
where
    S: Service + FixedPort + 'static,
    S::Request: 'static,
    S::Response: 'static,
{
    let request = model_of::<S::Request>();
    let response = model_of::<S::Response>();
    insert::<S>(
        model_of::<S>(),
        Some(S::FIXED_PORT_ID),
        AdapterKind::Service { request, response },
    );
    insert::<S::Request>(request, None, AdapterKind::Message);
    insert::<S::Response>(response, None, AdapterKind::Message);
}

/// Resolves a schema descriptor to its registered adapter. Inverse of
/// [`model_of`]. Failure is a programmer fault (missing registration),
/// never a format error.
pub fn adapter_of(model: &CompositeTypeDescriptor) -> Result<AdapterEntry> {
    if let Some(parent) = model.parent_service {
        // demo.GetInfo.Request resolves via demo.GetInfo, then Request.
        let service = lookup(parent)?;
        let nested = match service.kind {
            AdapterKind::Service { request, response } => match model.short_name {
                "Request" => request,
                "Response" => response,
                _ => return Err(unknown(model)),
            },
            AdapterKind::Message => return Err(unknown(model)),
        };
        return lookup(nested);
    }
    lookup(model)
}

fn lookup(model: &CompositeTypeDescriptor) -> Result<AdapterEntry> {
    registry()
        .read()
        .get(&Key::of(model))
        .cloned()
        .ok_or_else(|| unknown(model))
}

fn unknown(model: &CompositeTypeDescriptor) -> Error {
    Error::UnknownType {
        full_name: model.full_name.to_string(),
        major: model.version.major,
        minor: model.version.minor,
    }
}
