// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed bit-level reader over a borrowed byte region.
//!
//! The deserializer never copies or mutates its input. Aligned byte and
//! primitive-array reads hand out views into the input region when the host
//! byte order and pointer alignment allow it; decoded values holding such
//! views are bound to the input's lifetime by the `'a` parameter.
//!
//! Every top-level decode must start with [`Deserializer::require_remaining_bits`]
//! using the schema-declared minimum. Skipping the pre-check turns short
//! input into an [`Error::OutOfRange`] fault instead of a recoverable format
//! error; the distinction is what lets tests tell implementation bugs from
//! malformed input.
//!
//! [`Error::OutOfRange`]: crate::error::Error::OutOfRange

use std::borrow::Cow;
use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use half::f16;

use super::cursor::BitCursor;
use super::{sign_extend, unpack_bits_msb, unsigned_from_wire, WirePrimitive};
use crate::error::Result;

/// Generate aligned read methods for standard-width primitives
/// (bounds-checked slice, `from_le_bytes`, advance).
macro_rules! impl_read_aligned {
    ($($name:ident => $t:ty: $size:expr),* $(,)?) => {
        $(
            pub fn $name(&mut self) -> Result<$t> {
                let bytes = self.read_aligned_bytes($size)?;
                let mut tmp = [0u8; $size];
                tmp.copy_from_slice(bytes);
                Ok(<$t>::from_le_bytes(tmp))
            }
        )*
    };
}

/// Generate unaligned read methods for floats (LE bytes through the
/// gathering path).
macro_rules! impl_read_unaligned_float {
    ($($name:ident => $t:ty: $size:expr),* $(,)?) => {
        $(
            pub fn $name(&mut self) -> Result<$t> {
                let bytes = self.read_unaligned_bytes($size)?;
                let mut tmp = [0u8; $size];
                tmp.copy_from_slice(&bytes);
                Ok(<$t>::from_le_bytes(tmp))
            }
        )*
    };
}

/// Bit-level deserializer over a borrowed input region.
///
/// Multiple deserializers may share one input region; none of them mutates
/// it. A single instance must not be shared across threads.
pub struct Deserializer<'a> {
    buf: &'a [u8],
    cursor: BitCursor,
}

impl<'a> Deserializer<'a> {
    /// Wraps the source representation without copying it.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            buf: source,
            cursor: BitCursor::new(source.len()),
        }
    }

    pub fn capacity_bytes(&self) -> usize {
        self.cursor.capacity_bytes()
    }

    pub fn consumed_bits(&self) -> usize {
        self.cursor.consumed_bits()
    }

    pub fn remaining_bits(&self) -> usize {
        self.cursor.remaining_bits()
    }

    pub fn is_aligned(&self) -> bool {
        self.cursor.is_aligned()
    }

    /// Decode pre-check: fails with a format error if fewer than
    /// `inclusive_minimum` bits remain. Must be the first call of every
    /// top-level decode.
    pub fn require_remaining_bits(&self, inclusive_minimum: usize) -> Result<()> {
        self.cursor.require_remaining_bits(inclusive_minimum)
    }

    /// Advances over padding bits.
    pub fn skip_bits(&mut self, n_bits: usize) -> Result<()> {
        self.cursor.advance(n_bits)
    }

    //
    // Tier 1: byte-aligned, standard widths.
    //

    impl_read_aligned! {
        read_aligned_u8 => u8: 1,
        read_aligned_u16 => u16: 2,
        read_aligned_u32 => u32: 4,
        read_aligned_u64 => u64: 8,
        read_aligned_i8 => i8: 1,
        read_aligned_i16 => i16: 2,
        read_aligned_i32 => i32: 4,
        read_aligned_i64 => i64: 8,
        read_aligned_f16 => f16: 2,
        read_aligned_f32 => f32: 4,
        read_aligned_f64 => f64: 8,
    }

    /// Returns a view of `count` input bytes at a byte-aligned cursor.
    /// True zero copy; the view lives as long as the input region.
    pub fn read_aligned_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        debug_assert!(self.cursor.is_aligned());
        let bits = count * 8;
        if bits > self.cursor.remaining_bits() {
            return Err(self.cursor.out_of_range(bits));
        }
        let bo = self.cursor.byte_offset();
        let out = &self.buf[bo..bo + count];
        self.cursor.advance(bits)?;
        Ok(out)
    }

    /// Reads a fixed-size array of standard-width primitives at a
    /// byte-aligned cursor. On little-endian hosts, when the input region
    /// happens to be suitably aligned for `T`, the result borrows the input
    /// (zero copy); otherwise a fresh copy is returned. The two are
    /// indistinguishable to consumers apart from mutability.
    pub fn read_aligned_primitive_array<T: WirePrimitive>(
        &mut self,
        count: usize,
    ) -> Result<Cow<'a, [T]>> {
        debug_assert!(self.cursor.is_aligned());
        let size = T::BITS / 8;
        let bits = count * T::BITS;
        if bits > self.cursor.remaining_bits() {
            return Err(self.cursor.out_of_range(bits));
        }
        let bo = self.cursor.byte_offset();
        let span = &self.buf[bo..bo + count * size];
        self.cursor.advance(bits)?;
        if cfg!(target_endian = "little") {
            // SAFETY: WirePrimitive is sealed to fixed-width numeric types
            // with no invalid bit patterns; align_to only reinterprets the
            // middle part when the pointer is suitably aligned for T.
            let (head, body, _tail) = unsafe { span.align_to::<T>() };
            if head.is_empty() && body.len() == count {
                return Ok(Cow::Borrowed(body));
            }
        }
        let mut out = Vec::with_capacity(count);
        for chunk in span.chunks_exact(size) {
            out.push(T::read_le(chunk));
        }
        Ok(Cow::Owned(out))
    }

    /// Unpacks an MSB-first bit array at a byte-aligned cursor. Always a
    /// fresh allocation (the layout transformation rules out sharing). The
    /// cursor advances by exactly `count` bits.
    pub fn read_aligned_bit_array(&mut self, count: usize) -> Result<Vec<bool>> {
        debug_assert!(self.cursor.is_aligned());
        if count > self.cursor.remaining_bits() {
            return Err(self.cursor.out_of_range(count));
        }
        let bo = self.cursor.byte_offset();
        let span = &self.buf[bo..bo + (count + 7) / 8];
        self.cursor.advance(count)?;
        Ok(unpack_bits_msb(span, count))
    }

    //
    // Tier 2: byte-aligned, arbitrary bit length.
    //

    /// Reads an unsigned integer of `bit_length` bits at a byte-aligned
    /// cursor: whole bytes contribute all eight bits, the final byte its high
    /// bits.
    pub fn read_aligned_unsigned(&mut self, bit_length: usize) -> Result<u64> {
        debug_assert!((1..=64).contains(&bit_length));
        debug_assert!(self.cursor.is_aligned());
        if bit_length > self.cursor.remaining_bits() {
            return Err(self.cursor.out_of_range(bit_length));
        }
        let bo = self.cursor.byte_offset();
        let span = &self.buf[bo..bo + (bit_length + 7) / 8];
        self.cursor.advance(bit_length)?;
        Ok(unsigned_from_wire(span, bit_length))
    }

    /// Two's-complement variant of [`read_aligned_unsigned`]
    /// (`bit_length >= 2`).
    ///
    /// [`read_aligned_unsigned`]: Self::read_aligned_unsigned
    pub fn read_aligned_signed(&mut self, bit_length: usize) -> Result<i64> {
        debug_assert!(bit_length >= 2);
        Ok(sign_extend(self.read_aligned_unsigned(bit_length)?, bit_length))
    }

    //
    // Tier 3: no alignment assumptions.
    //

    /// Reads the single bit under the cursor (bit `7 - offset%8` of the
    /// current byte).
    pub fn read_unaligned_bit(&mut self) -> Result<bool> {
        if self.cursor.remaining_bits() < 1 {
            return Err(self.cursor.out_of_range(1));
        }
        let mask = 1 << (7 - self.cursor.intra_byte_offset());
        let out = self.buf[self.cursor.byte_offset()] & mask == mask;
        self.cursor.advance(1)?;
        Ok(out)
    }

    /// Reads `count` whole bytes at an arbitrary bit position.
    ///
    /// At the stream end the final source byte is allowed to be short by up
    /// to seven bits; the missing low bits read as zero and the cursor
    /// saturates at the buffer end. This is legitimate only when the caller
    /// has pre-checked the remaining length; a larger shortfall is an
    /// out-of-range fault with the cursor untouched.
    pub fn read_unaligned_bytes(&mut self, count: usize) -> Result<Cow<'a, [u8]>> {
        if count == 0 {
            return Ok(Cow::Borrowed(&[]));
        }
        if self.cursor.is_aligned() {
            return Ok(Cow::Borrowed(self.read_aligned_bytes(count)?));
        }
        let bits = count * 8;
        if bits > self.cursor.remaining_bits() + 7 {
            return Err(self.cursor.out_of_range(bits));
        }
        // Unaligned gather: each output byte spans two adjacent input bytes.
        // The read-ahead branches on the buffer end rather than trapping,
        // so only legitimately-zero padding is ever observed.
        let left = self.cursor.intra_byte_offset();
        let right = 8 - left;
        let mut out = vec![0u8; count];
        let mut bo = self.cursor.byte_offset();
        for slot in out.iter_mut() {
            let mut x = self.buf[bo] << left;
            if bo + 1 < self.buf.len() {
                x |= self.buf[bo + 1] >> right;
            }
            *slot = x;
            bo += 1;
        }
        self.cursor.advance_clamped(bits);
        Ok(Cow::Owned(out))
    }

    pub fn read_unaligned_unsigned(&mut self, bit_length: usize) -> Result<u64> {
        debug_assert!((1..=64).contains(&bit_length));
        if self.cursor.is_aligned() {
            return self.read_aligned_unsigned(bit_length);
        }
        if bit_length > self.cursor.remaining_bits() {
            return Err(self.cursor.out_of_range(bit_length));
        }
        let start = self.cursor.consumed_bits();
        let bytes = self.read_unaligned_bytes((bit_length + 7) / 8)?;
        // Discard the gathered-but-unconsumed trailing bits.
        let overshoot = self.cursor.consumed_bits() - (start + bit_length);
        self.cursor.retreat(overshoot);
        Ok(unsigned_from_wire(&bytes, bit_length))
    }

    /// Two's-complement variant of [`read_unaligned_unsigned`]
    /// (`bit_length >= 2`).
    ///
    /// [`read_unaligned_unsigned`]: Self::read_unaligned_unsigned
    pub fn read_unaligned_signed(&mut self, bit_length: usize) -> Result<i64> {
        debug_assert!(bit_length >= 2);
        Ok(sign_extend(self.read_unaligned_unsigned(bit_length)?, bit_length))
    }

    impl_read_unaligned_float! {
        read_unaligned_f16 => f16: 2,
        read_unaligned_f32 => f32: 4,
        read_unaligned_f64 => f64: 8,
    }

    pub fn read_unaligned_bit_array(&mut self, count: usize) -> Result<Vec<bool>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.cursor.is_aligned() {
            return self.read_aligned_bit_array(count);
        }
        if count > self.cursor.remaining_bits() {
            return Err(self.cursor.out_of_range(count));
        }
        let start = self.cursor.consumed_bits();
        let bytes = self.read_unaligned_bytes((count + 7) / 8)?;
        let overshoot = self.cursor.consumed_bits() - (start + count);
        self.cursor.retreat(overshoot);
        Ok(unpack_bits_msb(&bytes, count))
    }

    pub fn read_unaligned_primitive_array<T: WirePrimitive>(
        &mut self,
        count: usize,
    ) -> Result<Cow<'a, [T]>> {
        if self.cursor.is_aligned() {
            return self.read_aligned_primitive_array(count);
        }
        let size = T::BITS / 8;
        let bytes = self.read_unaligned_bytes(count * size)?;
        let mut out = Vec::with_capacity(count);
        for chunk in bytes.chunks_exact(size) {
            out.push(T::read_le(chunk));
        }
        Ok(Cow::Owned(out))
    }
}

/// State dump for diagnostics. Rendered into the INFO record that the
/// top-level deserialize boundary emits for malformed input.
impl fmt::Display for Deserializer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deserializer(consumed_bits={}, remaining_bits={}, buffer_base64={})",
            self.cursor.consumed_bits(),
            self.cursor.remaining_bits(),
            BASE64.encode(self.buf)
        )
    }
}
