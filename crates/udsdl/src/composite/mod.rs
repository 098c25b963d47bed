// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Contract between generated type adapters and the bit-level codec.
//!
//! The adapter generator emits one Rust type per DSDL composite. Each
//! implements [`Composite`]: a descriptor accessor, a declared maximum
//! serialized size, and the two codec entry points. Service types group a
//! request and a response and are not serializable as a unit; their adapters
//! fail both codec calls with [`Error::NotSerializable`] and expose the
//! nested halves through the [`Service`] trait.
//!
//! # Aliasing
//!
//! A decoded value may contain array fields that alias the input region
//! (the aligned primitive-array fast path). The `'de` parameter on
//! [`Composite`] binds such values to the buffer they were decoded from;
//! types that own all their fields implement the trait for every lifetime
//! and thereby satisfy [`CompositeOwned`].
//!
//! [`Error::NotSerializable`]: crate::error::Error::NotSerializable

pub mod constants;
pub mod value;

pub use value::{get_attribute, set_attribute, Fields, Value};

use crate::error::Result;
use crate::ser::{Deserializer, Serializer};
use crate::types::CompositeTypeDescriptor;

/// Codec contract implemented by every generated composite adapter.
pub trait Composite<'de>: Sized {
    /// Schema-declared upper bound on the serialized representation.
    /// Encode buffers are pre-sized to this; writes never grow them.
    const MAX_SERIALIZED_SIZE_BYTES: usize;

    /// The schema descriptor this adapter was generated from.
    fn model() -> &'static CompositeTypeDescriptor;

    /// Appends the canonical serialized representation of `self`.
    /// The serializer cursor must be byte-aligned on entry.
    fn serialize_aligned(&self, ser: &mut Serializer) -> Result<()>;

    /// Consumes one instance from the deserializer. The cursor must be
    /// byte-aligned on entry. Implementations start with a
    /// `require_remaining_bits` pre-check against the schema-declared
    /// minimum, so malformed input surfaces as a format error rather than a
    /// cursor fault.
    fn deserialize_aligned(des: &mut Deserializer<'de>) -> Result<Self>;
}

/// Adapter whose decoded values never borrow from the input buffer.
/// Blanket-implemented for every type that decodes at any input lifetime.
pub trait CompositeOwned: for<'de> Composite<'de> {}

impl<T> CompositeOwned for T where T: for<'de> Composite<'de> {}

/// Adapter generated from a type that carries a fixed port identifier.
/// The declared constant always agrees with the descriptor; registration
/// checks the two against each other.
pub trait FixedPort {
    const FIXED_PORT_ID: u16;
}

/// Adapter generated from a service type. The marker itself satisfies
/// [`Composite`] by failing both codec calls with `NotSerializable`; the
/// nested halves are ordinary composite adapters.
pub trait Service: CompositeOwned {
    type Request: CompositeOwned;
    type Response: CompositeOwned;
}

/// Obtains the schema descriptor of an adapter. Inverse of
/// [`crate::registry::adapter_of`].
pub fn model_of<'de, T: Composite<'de>>() -> &'static CompositeTypeDescriptor {
    T::model()
}

pub fn max_serialized_size_bytes<'de, T: Composite<'de>>() -> usize {
    T::MAX_SERIALIZED_SIZE_BYTES
}

pub fn fixed_port_id<T: FixedPort>() -> u16 {
    T::FIXED_PORT_ID
}

/// Constructs the serialized representation of a top-level object as a
/// sequence of byte-aligned fragments whose concatenation is the canonical
/// representation, padded with zero bits to a whole byte.
///
/// At least one fragment is always returned (possibly empty). The sequence
/// form leaves room for future scatter-gather encoders; today a single
/// fragment is produced.
pub fn serialize<'de, T: Composite<'de>>(value: &T) -> Result<Vec<Vec<u8>>> {
    let mut ser = Serializer::new(T::MAX_SERIALIZED_SIZE_BYTES);
    value.serialize_aligned(&mut ser)?;
    Ok(vec![ser.into_bytes()])
}

/// Constructs an instance of `T` from its fragmented serialized
/// representation. A single fragment is used directly; multiple fragments
/// are concatenated into a contiguous region first.
///
/// Malformed input yields `Ok(None)` -- never an error -- with an INFO
/// record naming the descriptor and dumping the deserializer state. Errors
/// escaping this function indicate a bug in the adapter or its caller, not
/// bad input.
pub fn deserialize<T: CompositeOwned>(fragments: &[&[u8]]) -> Result<Option<T>> {
    // join() of a single fragment would copy it, so that path is avoided.
    if let [single] = fragments {
        return deserialize_zero_copy(*single);
    }
    let contiguous = fragments.concat();
    deserialize_zero_copy(&contiguous)
}

/// Variant of [`deserialize`] for a contiguous representation, usable with
/// adapters whose decoded values alias the input region: the result is bound
/// to the buffer's lifetime. The input must not be mutated or freed while
/// the decoded value is alive -- the borrow checker enforces exactly that.
pub fn deserialize_zero_copy<'de, T: Composite<'de>>(source: &'de [u8]) -> Result<Option<T>> {
    let mut des = Deserializer::new(source);
    match T::deserialize_aligned(&mut des) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_format() => {
            // Explicit level check: the state dump base64-encodes the whole
            // input, which is too expensive to build unconditionally.
            if log::log_enabled!(log::Level::Info) {
                log::info!(
                    "[DSDL] Invalid serialized representation of {}: {} ({})",
                    T::model(),
                    des,
                    err
                );
            }
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
