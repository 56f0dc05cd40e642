//! The generic tagged-value codec.
//!
//! Every value is a single marker byte followed by its payload. Multi-byte numbers are little
//! endian. Str and Bin payloads are prefixed by the shortest available length encoding, and the
//! decoder rejects anything else, so each value has exactly one encoding.

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::marker::Marker;
use crate::value::Value;
use crate::MAX_VALUE_SIZE;

fn check_len(len: usize) -> Result<()> {
    if len > MAX_VALUE_SIZE {
        Err(Error::LengthTooLong {
            max: MAX_VALUE_SIZE,
            actual: len,
        })
    } else {
        Ok(())
    }
}

/// Serialize a value onto a byte vector.
pub fn serialize_value(buf: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Null => buf.push(Marker::Null.into()),
        Value::Bool(v) => buf.push(if *v { Marker::True } else { Marker::False }.into()),
        Value::I32(v) => {
            buf.push(Marker::Int32.into());
            buf.extend_from_slice(&v.to_le_bytes());
        }
        Value::I64(v) => {
            buf.push(Marker::Int64.into());
            buf.extend_from_slice(&v.to_le_bytes());
        }
        Value::F32(v) => {
            buf.push(Marker::F32.into());
            buf.extend_from_slice(&v.to_bits().to_le_bytes());
        }
        Value::F64(v) => {
            buf.push(Marker::F64.into());
            buf.extend_from_slice(&v.to_bits().to_le_bytes());
        }
        Value::Str(v) => serialize_str(buf, v)?,
        Value::Bin(v) => serialize_bin(buf, v)?,
    }
    Ok(())
}

/// Serialize a string onto a byte vector.
pub fn serialize_str(buf: &mut Vec<u8>, v: &str) -> Result<()> {
    let len = v.len();
    check_len(len)?;
    if len <= 31 {
        buf.push(Marker::FixStr(len as u8).into());
    } else if len <= u8::MAX as usize {
        buf.push(Marker::Str8.into());
        buf.push(len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(Marker::Str16.into());
        buf.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        buf.push(Marker::Str32.into());
        buf.extend_from_slice(&(len as u32).to_le_bytes());
    }
    buf.extend_from_slice(v.as_bytes());
    Ok(())
}

/// Serialize a byte sequence onto a byte vector.
pub fn serialize_bin(buf: &mut Vec<u8>, v: &[u8]) -> Result<()> {
    let len = v.len();
    check_len(len)?;
    if len <= u8::MAX as usize {
        buf.push(Marker::Bin8.into());
        buf.push(len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(Marker::Bin16.into());
        buf.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        buf.push(Marker::Bin32.into());
        buf.extend_from_slice(&(len as u32).to_le_bytes());
    }
    buf.extend_from_slice(v);
    Ok(())
}

fn take<'a>(raw: &mut &'a [u8], len: usize, step: &'static str) -> Result<&'a [u8]> {
    let data: &'a [u8] = *raw;
    if len > data.len() {
        return Err(Error::LengthTooShort {
            step,
            actual: data.len(),
            expected: len,
        });
    }
    let (bytes, rest) = data.split_at(len);
    *raw = rest;
    Ok(bytes)
}

fn take_str(raw: &mut &[u8], len: usize, step: &'static str) -> Result<String> {
    let bytes = take(raw, len, step)?;
    std::str::from_utf8(bytes)
        .map(String::from)
        .map_err(|e| Error::BadEncode(format!("{}", e)))
}

// Reads a length prefix of 1, 2, or 4 bytes, checking it against the size limit and the shortest
// encoding rule. `min` is the smallest length this prefix width may carry.
fn read_len(raw: &mut &[u8], width: usize, min: usize, step: &'static str) -> Result<usize> {
    let actual = raw.len();
    let short = |_| Error::LengthTooShort {
        step,
        actual,
        expected: width,
    };
    let len = match width {
        1 => raw.read_u8().map_err(short)? as usize,
        2 => raw.read_u16::<LittleEndian>().map_err(short)? as usize,
        _ => raw.read_u32::<LittleEndian>().map_err(short)? as usize,
    };
    if len < min {
        return Err(Error::BadEncode(format!(
            "Got length = {} on step [{}]. This is not the shortest encoding.",
            len, step
        )));
    }
    check_len(len)?;
    Ok(len)
}

/// Read a single value from the front of `raw`, advancing it past the value.
pub fn read_value(raw: &mut &[u8]) -> Result<Value> {
    let byte = raw.read_u8().map_err(|_| Error::LengthTooShort {
        step: "decode marker",
        actual: 0,
        expected: 1,
    })?;
    let actual = raw.len();
    let value = match Marker::from_u8(byte) {
        Marker::Reserved => {
            return Err(Error::BadEncode(format!(
                "Reserved marker 0x{:x} found",
                byte
            )))
        }
        Marker::Null => Value::Null,
        Marker::False => Value::Bool(false),
        Marker::True => Value::Bool(true),
        Marker::Int32 => {
            let v = raw.read_i32::<LittleEndian>().map_err(|_| Error::LengthTooShort {
                step: "decode Int32",
                actual,
                expected: 4,
            })?;
            Value::I32(v)
        }
        Marker::Int64 => {
            let v = raw.read_i64::<LittleEndian>().map_err(|_| Error::LengthTooShort {
                step: "decode Int64",
                actual,
                expected: 8,
            })?;
            Value::I64(v)
        }
        Marker::F32 => {
            let v = raw.read_u32::<LittleEndian>().map_err(|_| Error::LengthTooShort {
                step: "decode F32",
                actual,
                expected: 4,
            })?;
            Value::F32(f32::from_bits(v))
        }
        Marker::F64 => {
            let v = raw.read_u64::<LittleEndian>().map_err(|_| Error::LengthTooShort {
                step: "decode F64",
                actual,
                expected: 8,
            })?;
            Value::F64(f64::from_bits(v))
        }
        Marker::FixStr(len) => Value::Str(take_str(raw, len as usize, "get FixStr content")?),
        Marker::Str8 => {
            let len = read_len(raw, 1, 32, "decode Str8 length")?;
            Value::Str(take_str(raw, len, "get Str8 content")?)
        }
        Marker::Str16 => {
            let len = read_len(raw, 2, u8::MAX as usize + 1, "decode Str16 length")?;
            Value::Str(take_str(raw, len, "get Str16 content")?)
        }
        Marker::Str32 => {
            let len = read_len(raw, 4, u16::MAX as usize + 1, "decode Str32 length")?;
            Value::Str(take_str(raw, len, "get Str32 content")?)
        }
        Marker::Bin8 => {
            let len = read_len(raw, 1, 0, "decode Bin8 length")?;
            Value::Bin(take(raw, len, "get Bin8 content")?.to_vec())
        }
        Marker::Bin16 => {
            let len = read_len(raw, 2, u8::MAX as usize + 1, "decode Bin16 length")?;
            Value::Bin(take(raw, len, "get Bin16 content")?.to_vec())
        }
        Marker::Bin32 => {
            let len = read_len(raw, 4, u16::MAX as usize + 1, "decode Bin32 length")?;
            Value::Bin(take(raw, len, "get Bin32 content")?.to_vec())
        }
    };
    Ok(value)
}

/// Read a value that must be a string.
pub fn read_str(raw: &mut &[u8]) -> Result<String> {
    match read_value(raw)? {
        Value::Str(v) => Ok(v),
        v => Err(Error::BadEncode(format!("Expected Str, got {}", v.kind()))),
    }
}

/// Read a value that must be either a string or null.
pub fn read_optional_str(raw: &mut &[u8]) -> Result<Option<String>> {
    match read_value(raw)? {
        Value::Str(v) => Ok(Some(v)),
        Value::Null => Ok(None),
        v => Err(Error::BadEncode(format!("Expected Str or Null, got {}", v.kind()))),
    }
}

/// Read a value that must be a 32-bit float.
pub fn read_f32(raw: &mut &[u8]) -> Result<f32> {
    match read_value(raw)? {
        Value::F32(v) => Ok(v),
        v => Err(Error::BadEncode(format!("Expected F32, got {}", v.kind()))),
    }
}
