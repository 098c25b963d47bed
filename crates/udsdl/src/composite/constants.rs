// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compact textual encoding for adapter constants.
//!
//! Generated adapters embed their DSDL constants as plain Rust literals; the
//! wire codec never touches this module. The adapter generator additionally
//! stores each constant in a compact opaque form (gzip-compressed tagged
//! value, base64 text) so that schema tooling can compare regenerated output
//! against what is checked in. [`restore_constant`] recovers the value from
//! that text; [`encode_constant`] is its inverse.
//!
//! Layout of the decompressed payload: one tag byte, then a little-endian
//! (or raw, for strings and bytes) payload.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::value::Value;
use crate::error::{Error, Result};

const TAG_BOOL: u8 = 0x01;
const TAG_UNSIGNED: u8 = 0x02;
const TAG_INTEGER: u8 = 0x03;
const TAG_FLOAT: u8 = 0x04;
const TAG_STRING: u8 = 0x05;
const TAG_BYTES: u8 = 0x06;

fn constant_error(reason: impl Into<String>) -> Error {
    Error::Constant { reason: reason.into() }
}

/// Produces the compact textual form of a constant value.
pub fn encode_constant(value: &Value) -> Result<String> {
    let mut raw = Vec::new();
    match value {
        Value::Bool(v) => {
            raw.push(TAG_BOOL);
            raw.push(u8::from(*v));
        }
        Value::Unsigned(v) => {
            raw.push(TAG_UNSIGNED);
            raw.extend_from_slice(&v.to_le_bytes());
        }
        Value::Integer(v) => {
            raw.push(TAG_INTEGER);
            raw.extend_from_slice(&v.to_le_bytes());
        }
        Value::Float(v) => {
            raw.push(TAG_FLOAT);
            raw.extend_from_slice(&v.to_le_bytes());
        }
        Value::String(v) => {
            raw.push(TAG_STRING);
            raw.extend_from_slice(v.as_bytes());
        }
        Value::Bytes(v) => {
            raw.push(TAG_BYTES);
            raw.extend_from_slice(v);
        }
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&raw)
        .map_err(|e| constant_error(format!("compression failed: {}", e)))?;
    let compressed = encoder
        .finish()
        .map_err(|e| constant_error(format!("compression failed: {}", e)))?;
    Ok(BASE64.encode(compressed))
}

/// Recovers a constant value from its compact textual form. Only invoked by
/// generator tooling; a failure here means the generated source was
/// corrupted, not that wire input was malformed.
pub fn restore_constant(text: &str) -> Result<Value> {
    let compressed = BASE64
        .decode(text)
        .map_err(|e| constant_error(format!("bad base64: {}", e)))?;
    let mut raw = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut raw)
        .map_err(|e| constant_error(format!("bad gzip stream: {}", e)))?;
    let (tag, payload) = raw
        .split_first()
        .ok_or_else(|| constant_error("empty payload"))?;
    match *tag {
        TAG_BOOL => match payload {
            [0] => Ok(Value::Bool(false)),
            [1] => Ok(Value::Bool(true)),
            _ => Err(constant_error("bad bool payload")),
        },
        TAG_UNSIGNED => Ok(Value::Unsigned(u64::from_le_bytes(fixed_payload(payload)?))),
        TAG_INTEGER => Ok(Value::Integer(i64::from_le_bytes(fixed_payload(payload)?))),
        TAG_FLOAT => Ok(Value::Float(f64::from_le_bytes(fixed_payload(payload)?))),
        TAG_STRING => String::from_utf8(payload.to_vec())
            .map(Value::String)
            .map_err(|_| constant_error("string payload is not UTF-8")),
        TAG_BYTES => Ok(Value::Bytes(payload.to_vec())),
        other => Err(constant_error(format!("unknown tag {:#04x}", other))),
    }
}

fn fixed_payload(payload: &[u8]) -> Result<[u8; 8]> {
    if payload.len() != 8 {
        return Err(constant_error(format!(
            "expected 8 payload bytes, found {}",
            payload.len()
        )));
    }
    let mut out = [0u8; 8];
    out.copy_from_slice(payload);
    Ok(out)
}
