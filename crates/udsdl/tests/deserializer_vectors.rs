// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Golden byte vectors for the bit codec. Each scenario is written twice:
// the serializer must produce the literal bytes, and the deserializer must
// recover the original values from them. The vectors interleave all three
// codec tiers so that cross-tier cursor handling is covered.

#![allow(clippy::unusual_byte_groupings)]

use std::borrow::Cow;

use half::f16;
use udsdl::{Deserializer, Serializer};

/// Aligned scenario: standard-width primitives, floats, sub-byte integers
/// with explicit padding, a primitive array and two bit arrays.
const ALIGNED_SAMPLE: [u8; 45] = [
    0xA7, // u8
    0xEF, 0xCD, 0xAB, 0x90, 0x78, 0x56, 0x34, 0x12, // i64
    0x88, 0xA9, 0xCB, 0xED, // i32 -0x1234_5678
    0xFE, 0xFF, // i16 -2
    0x00, // padding
    0x7F, // i8 127
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F, // f64 1.0
    0x00, 0x00, 0x80, 0x3F, // f32 1.0
    0x00, 0x7C, // f16 +inf
    0xDA, 0xE0, // u12 0xEDA + 4 bits padding
    0xDA, 0xBE, // u16 0xBEDA
    0xFE, 0x80, // i9 -2 + 7 bits padding
    0xAD, 0xDE, 0xEF, 0xBE, // u16[2] = [0xDEAD, 0xBEEF]
    0xA3, 0xE6, // 16-bit bool array
    0xA3, 0xD0, // 13-bit bool array + 3 bits trailing padding
];

const BITS_16: [bool; 16] = [
    true, false, true, false, false, false, true, true, true, true, true, false, false, true,
    true, false,
];

const BITS_13: [bool; 13] = [
    true, false, true, false, false, false, true, true, true, true, false, true, false,
];

#[test]
fn aligned_scenario_serializes_to_golden_bytes() {
    let mut ser = Serializer::new(45);
    ser.write_aligned_u8(0b1010_0111).expect("u8");
    ser.write_aligned_i64(0x1234_5678_90AB_CDEF).expect("i64");
    ser.write_aligned_i32(-0x1234_5678).expect("i32");
    ser.write_aligned_i16(-2).expect("i16");
    ser.skip_bits(8).expect("padding");
    ser.write_aligned_i8(127).expect("i8");
    ser.write_aligned_f64(1.0).expect("f64");
    ser.write_aligned_f32(1.0).expect("f32");
    ser.write_aligned_f16(f16::INFINITY).expect("f16");
    ser.write_aligned_unsigned(0xEDA, 12).expect("u12");
    ser.skip_bits(4).expect("padding");
    ser.write_aligned_unsigned(0xBEDA, 16).expect("u16");
    ser.write_aligned_signed(-2, 9).expect("i9");
    ser.skip_bits(7).expect("padding");
    ser.write_aligned_primitive_array::<u16>(&[0xDEAD, 0xBEEF]).expect("u16 array");
    ser.write_aligned_bit_array(&BITS_16).expect("16 bits");
    ser.write_aligned_bit_array(&BITS_13).expect("13 bits");
    assert_eq!(ser.remaining_bits(), 3);
    assert_eq!(ser.into_bytes(), ALIGNED_SAMPLE);
}

#[test]
fn aligned_scenario_deserializes_from_golden_bytes() {
    let mut des = Deserializer::new(&ALIGNED_SAMPLE);
    assert_eq!(des.remaining_bits(), 45 * 8);
    des.require_remaining_bits(0).expect("zero always fits");
    des.require_remaining_bits(45 * 8).expect("exact fit");
    assert!(des.require_remaining_bits(45 * 8 + 1).unwrap_err().is_format());

    assert_eq!(des.read_aligned_u8().expect("u8"), 0b1010_0111);
    assert_eq!(des.read_aligned_i64().expect("i64"), 0x1234_5678_90AB_CDEF);
    assert_eq!(des.read_aligned_i32().expect("i32"), -0x1234_5678);
    assert_eq!(des.read_aligned_i16().expect("i16"), -2);

    assert_eq!(des.remaining_bits(), 45 * 8 - 8 - 64 - 32 - 16);
    des.skip_bits(8).expect("padding");
    assert_eq!(des.remaining_bits(), 45 * 8 - 8 - 64 - 32 - 16 - 8);

    assert_eq!(des.read_aligned_i8().expect("i8"), 127);
    assert_eq!(des.read_aligned_f64().expect("f64"), 1.0);
    assert_eq!(des.read_aligned_f32().expect("f32"), 1.0);
    assert_eq!(des.read_aligned_f16().expect("f16"), f16::INFINITY);

    assert_eq!(des.read_aligned_unsigned(12).expect("u12"), 0xEDA);
    des.skip_bits(4).expect("padding");
    assert_eq!(des.read_aligned_unsigned(16).expect("u16"), 0xBEDA);
    assert_eq!(des.read_aligned_signed(9).expect("i9"), -2);
    des.skip_bits(7).expect("padding");

    let array = des.read_aligned_primitive_array::<u16>(2).expect("u16 array");
    assert_eq!(array.as_ref(), &[0xDEAD, 0xBEEF]);

    assert_eq!(des.read_aligned_bit_array(16).expect("16 bits"), BITS_16);
    assert_eq!(des.read_aligned_bit_array(13).expect("13 bits"), BITS_13);

    assert_eq!(des.remaining_bits(), 3);
    assert_eq!(des.consumed_bits() + des.remaining_bits(), 45 * 8);
}

#[test]
fn aligned_reads_past_end_are_faults_not_format_errors() {
    let buf = [1u8, 2, 3];
    let mut des = Deserializer::new(&buf);
    assert!(des.read_aligned_bit_array(0).expect("empty").is_empty());
    assert!(des.read_aligned_bytes(0).expect("empty").is_empty());
    assert_eq!(des.remaining_bits(), 24);

    assert!(!des.read_aligned_bit_array(100).unwrap_err().is_format());
    assert!(!des.read_aligned_bytes(10).unwrap_err().is_format());
    assert!(!des.read_aligned_unsigned(64).unwrap_err().is_format());
    assert!(!des.skip_bits(64).unwrap_err().is_format());
    assert_eq!(des.remaining_bits(), 24, "failed reads leave the cursor in place");
}

/// Unaligned scenario: bit arrays and byte strings at shifting offsets,
/// sub-byte integers, floats and a primitive array all off the byte
/// boundary, closed out by five bits of padding.
const UNALIGNED_SAMPLE: [u8; 31] = [
    0xA3, 0xF4, 0xE8, 0x91, 0xA2, 0xB3, 0x12, 0x34, 0x56, 0x9F, 0xF3, 0x2F, 0xC0, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x1E, 0x07, 0xE0, 0x00, 0x10, 0x07, 0xE0, 0x1F, 0x95, 0xBB, 0xDD, 0xF7,
    0xC0,
];

const BITS_11: [bool; 11] = [
    true, false, true, false, false, false, true, true, true, true, true,
];

const BITS_10: [bool; 10] = [
    true, false, true, false, false, true, true, true, false, true,
];

#[test]
fn unaligned_scenario_serializes_to_golden_bytes() {
    let mut ser = Serializer::new(31);
    ser.write_unaligned_bit_array(&BITS_11).expect("11 bits");
    ser.write_unaligned_bit_array(&BITS_10).expect("10 bits");
    ser.write_unaligned_bytes(&[0x12, 0x34, 0x56]).expect("bytes");
    ser.write_unaligned_bit_array(&[false, true, true]).expect("3 bits");
    ser.write_unaligned_bytes(&[0x12, 0x34, 0x56]).expect("bytes");
    for bit in [true, false, false, true, true] {
        ser.write_unaligned_bit(bit).expect("bit");
    }
    ser.write_unaligned_signed(-2, 8).expect("i8");
    ser.write_unaligned_unsigned(0b111_0110_0101, 11).expect("u11");
    ser.write_unaligned_unsigned(0b110, 3).expect("u3");
    ser.write_unaligned_f64(1.0).expect("f64");
    ser.write_unaligned_f32(1.0).expect("f32");
    ser.write_unaligned_f16(f16::NEG_INFINITY).expect("f16");
    ser.write_unaligned_primitive_array::<u16>(&[0xDEAD, 0xBEEF]).expect("u16 array");
    assert_eq!(ser.remaining_bits(), 5);
    assert_eq!(ser.into_bytes(), UNALIGNED_SAMPLE);
}

#[test]
fn unaligned_scenario_deserializes_from_golden_bytes() {
    let mut des = Deserializer::new(&UNALIGNED_SAMPLE);
    assert_eq!(des.remaining_bits(), 31 * 8);
    des.require_remaining_bits(31 * 8).expect("pre-check");

    assert_eq!(des.read_unaligned_bit_array(11).expect("11 bits"), BITS_11);
    assert_eq!(des.read_unaligned_bit_array(10).expect("10 bits"), BITS_10);

    assert_eq!(des.read_unaligned_bytes(3).expect("bytes").as_ref(), &[0x12, 0x34, 0x56]);
    assert_eq!(
        des.read_unaligned_bit_array(3).expect("3 bits"),
        vec![false, true, true]
    );
    assert_eq!(des.read_unaligned_bytes(3).expect("bytes").as_ref(), &[0x12, 0x34, 0x56]);

    assert!(des.read_unaligned_bit().expect("bit"));
    assert!(!des.read_unaligned_bit().expect("bit"));
    assert!(!des.read_unaligned_bit().expect("bit"));
    assert!(des.read_unaligned_bit().expect("bit"));
    assert!(des.read_unaligned_bit().expect("bit"));

    assert_eq!(des.read_unaligned_signed(8).expect("i8"), -2);
    assert_eq!(des.read_unaligned_unsigned(11).expect("u11"), 0b111_0110_0101);
    assert_eq!(des.read_unaligned_unsigned(3).expect("u3"), 0b110);

    assert!(!des.is_aligned());
    assert_eq!(des.read_unaligned_f64().expect("f64"), 1.0);
    assert_eq!(des.read_unaligned_f32().expect("f32"), 1.0);
    assert_eq!(des.read_unaligned_f16().expect("f16"), f16::NEG_INFINITY);

    let array = des.read_unaligned_primitive_array::<u16>(2).expect("u16 array");
    assert_eq!(array.as_ref(), &[0xDEAD, 0xBEEF]);

    des.skip_bits(5).expect("padding");
    assert!(des.is_aligned());
    assert_eq!(des.remaining_bits(), 0);
    assert_eq!(des.consumed_bits() + des.remaining_bits(), 31 * 8);
}

#[test]
fn unaligned_byte_reads_track_offsets_across_realignment() {
    // The first gather starts three bits in; the second lands back on a
    // byte boundary and must take the zero-copy path.
    let buf = [0b1010_1010, 0b0101_1101, 0b1100_1100, 0b1001_0001];
    let mut des = Deserializer::new(&buf);
    assert_eq!(
        des.read_unaligned_bit_array(3).expect("3 bits"),
        vec![true, false, true]
    );
    assert_eq!(des.read_unaligned_bytes(0).expect("empty").as_ref(), &[] as &[u8]);
    assert_eq!(
        des.read_unaligned_bytes(2).expect("two bytes").as_ref(),
        &[0b0101_0010, 0b1110_1110]
    );
    assert_eq!(
        des.read_unaligned_bytes(1).expect("one byte").as_ref(),
        &[0b0110_0100]
    );
    assert_eq!(des.consumed_bits(), 27);
    assert_eq!(des.remaining_bits(), 5);
    assert!(!des.read_unaligned_bytes(2).unwrap_err().is_format());
    assert_eq!(des.consumed_bits(), 27);

    let mut des = Deserializer::new(&buf);
    assert_eq!(des.read_unaligned_bytes(0).expect("empty").as_ref(), &[] as &[u8]);
    let head = des.read_unaligned_bytes(2).expect("aligned");
    assert!(matches!(head, Cow::Borrowed(_)), "aligned gather borrows the input");
    assert_eq!(head.as_ref(), &[0b1010_1010, 0b0101_1101]);
    assert_eq!(des.read_unaligned_bytes(1).expect("byte").as_ref(), &[0b1100_1100]);
    assert_eq!(des.remaining_bits(), 8);
    assert!(!des.read_unaligned_bytes(2).unwrap_err().is_format());
}
