// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Crate-wide error type for the DSDL serialization core.
//!
//! Three families of failures are kept strictly apart so that tests can tell
//! implementation bugs from malformed input:
//!
//! - [`Error::Format`] -- the input is not a valid serialized representation
//!   of the declared type. This is the only variant that the top-level
//!   [`deserialize`](crate::composite::deserialize) boundary converts into
//!   `Ok(None)`.
//! - [`Error::NotSerializable`] -- an attempt to run the wire codec on a
//!   service-level type, which only groups a request and a response.
//! - Everything else is a programmer fault: cursor overruns without a
//!   pre-check, writes past the pre-sized buffer, unresolvable registry
//!   lookups, attribute misuse. These always propagate to the caller.

use std::fmt;

/// Error type shared by the serializer, deserializer and composite layers.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input is not a valid serialized representation (short stream, invalid
    /// variable-length header, failed pre-check).
    Format { reason: String },
    /// The cursor would move past the end of the buffer. Encoding: the caller
    /// failed to pre-size the buffer to the declared maximum. Decoding: a read
    /// or skip was issued without a `require_remaining_bits` pre-check.
    OutOfRange {
        offset_bits: usize,
        requested_bits: usize,
        capacity_bits: usize,
    },
    /// The wire codec was invoked on a service-level type.
    NotSerializable { type_name: &'static str },
    /// No adapter is registered for the requested descriptor.
    UnknownType {
        full_name: String,
        major: u8,
        minor: u8,
    },
    /// Attribute lookup failed even after the trailing-underscore retry.
    AttributeMissing { name: String },
    /// Attribute exists but the supplied value has an incompatible shape.
    AttributeType {
        name: String,
        expected: &'static str,
    },
    /// A constant blob produced by the adapter generator failed to decode.
    Constant { reason: String },
}

impl Error {
    /// True for malformed-input failures, the only kind that the top-level
    /// deserialize boundary swallows.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Format { reason } => write!(f, "invalid serialized representation: {}", reason),
            Error::OutOfRange {
                offset_bits,
                requested_bits,
                capacity_bits,
            } => write!(
                f,
                "cursor out of range: {} bits requested at bit offset {} of {}",
                requested_bits, offset_bits, capacity_bits
            ),
            Error::NotSerializable { type_name } => {
                write!(f, "service type {} cannot be serialized", type_name)
            }
            Error::UnknownType {
                full_name,
                major,
                minor,
            } => write!(f, "no adapter registered for {}.{}.{}", full_name, major, minor),
            Error::AttributeMissing { name } => write!(f, "no such attribute: {}", name),
            Error::AttributeType { name, expected } => {
                write!(f, "attribute {} expects a {} value", name, expected)
            }
            Error::Constant { reason } => write!(f, "malformed constant blob: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;
