// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # UDSDL - UAVCAN v1 DSDL serialization core
//!
//! The bit-level codec that translates between in-memory composite-type
//! values and their on-wire byte representation as defined by the UAVCAN
//! data-type specification language (DSDL). Schema parsing, code generation
//! and transport are out of scope: this crate is the runtime the generated
//! adapters link against.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use udsdl::{deserialize, serialize, Result};
//! # use udsdl::{Composite, CompositeTypeDescriptor, Deserializer, Serializer, TypeVersion};
//! # static HEARTBEAT: CompositeTypeDescriptor = CompositeTypeDescriptor::new(
//! #     "uavcan.node.Heartbeat", "Heartbeat", TypeVersion::new(1, 0), Some(7509), None, 7, 56);
//! # struct Heartbeat { uptime: u32, health: u8 }
//! # impl<'de> Composite<'de> for Heartbeat {
//! #     const MAX_SERIALIZED_SIZE_BYTES: usize = 7;
//! #     fn model() -> &'static CompositeTypeDescriptor { &HEARTBEAT }
//! #     fn serialize_aligned(&self, ser: &mut Serializer) -> Result<()> {
//! #         ser.write_aligned_u32(self.uptime)?;
//! #         ser.write_aligned_unsigned(self.health.into(), 2)
//! #     }
//! #     fn deserialize_aligned(des: &mut Deserializer<'de>) -> Result<Self> {
//! #         des.require_remaining_bits(34)?;
//! #         Ok(Self { uptime: des.read_aligned_u32()?, health: des.read_aligned_unsigned(2)? as u8 })
//! #     }
//! # }
//!
//! fn main() -> Result<()> {
//!     let heartbeat = Heartbeat { uptime: 120, health: 0 };
//!
//!     // One or more byte-aligned fragments; concatenated = wire form.
//!     let fragments = serialize(&heartbeat)?;
//!
//!     // Malformed input comes back as None, never as an error.
//!     let views: Vec<&[u8]> = fragments.iter().map(Vec::as_slice).collect();
//!     let decoded: Option<Heartbeat> = deserialize(&views)?;
//!     assert!(decoded.is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------------+
//! |                     Generated type adapters                      |
//! |     impl Composite / FixedPort / Service / Fields per type       |
//! +------------------------------------------------------------------+
//! |                       Composite contract                         |
//! |  serialize -> fragments | deserialize -> Option | registry       |
//! +------------------------------------------------------------------+
//! |                      Serializer / Deserializer                   |
//! |  tier 1: aligned standard widths (zero-copy array views)         |
//! |  tier 2: aligned arbitrary bit lengths                           |
//! |  tier 3: unaligned bits, bytes, integers, floats                 |
//! +------------------------------------------------------------------+
//! |                          Bit cursor                              |
//! |  consumed + remaining == 8 * capacity, monotonic advance         |
//! +------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Serializer`] | Appends typed values at a bit cursor over a pre-sized buffer |
//! | [`Deserializer`] | Consumes typed values from a borrowed byte region |
//! | [`Composite`] | Contract implemented by every generated adapter |
//! | [`CompositeTypeDescriptor`] | Schema metadata consumed from the generator |
//! | [`Error`] | Format errors vs. programmer faults, kept strictly apart |
//!
//! ## Wire format
//!
//! Little-endian integers, two's-complement signed values, IEEE 754 floats,
//! MSB-first bit order within each byte, top-level representations padded
//! with zero bits to a whole byte. See [`ser`] for the full rules.

/// Contract between generated adapters and the codec (traits, top-level
/// serialize/deserialize, dynamic field access, constants).
pub mod composite;
/// Crate error type: format errors vs. programmer faults.
pub mod error;
/// Descriptor-to-adapter resolution, populated at adapter load time.
pub mod registry;
/// Bit-level wire codec (cursor, serializer, deserializer).
pub mod ser;
/// Schema model consumed by the codec.
pub mod types;

pub use composite::constants::{encode_constant, restore_constant};
pub use composite::{
    deserialize, deserialize_zero_copy, fixed_port_id, get_attribute, max_serialized_size_bytes,
    model_of, serialize, set_attribute, Composite, CompositeOwned, Fields, FixedPort, Service,
    Value,
};
pub use error::{Error, Result};
pub use registry::{adapter_of, AdapterEntry, AdapterKind};
pub use ser::{Deserializer, Serializer};
pub use types::{CompositeTypeDescriptor, TypeVersion};
