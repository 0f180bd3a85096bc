//! # MessagePack Field Encoding
//!
//! This module encodes the two field kinds a tuple can hold, unsigned integers
//! and byte strings, using the corresponding subset of the MessagePack format
//! (<https://msgpack.org/>). Every encoded value starts with a tag byte, so a
//! buffer of encoded fields is self-describing and can be walked front to back.
//!
//! ## Encoding Format
//!
//! | Value Range              | Bytes | Format                         |
//! |--------------------------|-------|--------------------------------|
//! | uint 0 - 0x7F            | 1     | `[value]`                      |
//! | uint 0x80 - u8::MAX      | 2     | `[0xCC, u8]`                   |
//! | uint ..= u16::MAX        | 3     | `[0xCD, u16 big-endian]`       |
//! | uint ..= u32::MAX        | 5     | `[0xCE, u32 big-endian]`       |
//! | uint > u32::MAX          | 9     | `[0xCF, u64 big-endian]`       |
//! | string len 0 - 31        | 1+n   | `[0xA0 \| len, bytes..]`       |
//! | string len ..= u8::MAX   | 2+n   | `[0xD9, len, bytes..]`         |
//! | string len ..= u16::MAX  | 3+n   | `[0xDA, len u16 BE, bytes..]`  |
//! | string len > u16::MAX    | 5+n   | `[0xDB, len u32 BE, bytes..]`  |
//!
//! ## Byte Order
//!
//! Multi-byte integers are always big-endian on the wire, independent of the
//! host. Writes go through `to_be_bytes` and reads through `from_be_bytes`, so
//! encoded tuples are portable between hosts.
//!
//! ## Boundary Values
//!
//! - 0x7F: maximum fixint / 0x80: minimum uint8
//! - 0xFF: maximum uint8 / 0x100: minimum uint16
//! - 0xFFFF: maximum uint16 / 0x10000: minimum uint32
//! - 0xFFFF_FFFF: maximum uint32 / 0x1_0000_0000: minimum uint64
//! - string length 31: maximum fixstr / 32: minimum str8
//! - string length 255: maximum str8 / 256: minimum str16
//! - string length 65535: maximum str16 / 65536: minimum str32
//!
//! ## Usage Example
//!
//! ```rust
//! use msgtuple::encoding::msgpack::{decode_uint, encode_uint, uint_len};
//!
//! let mut buf = [0u8; 9];
//! let written = encode_uint(300, &mut buf);
//! assert_eq!(written, uint_len(300));
//! assert_eq!(&buf[..written], &[0xCD, 0x01, 0x2C]);
//!
//! let (value, read) = decode_uint(&buf).unwrap();
//! assert_eq!((value, read), (300, 3));
//! ```
//!
//! ## Zero-Copy Design
//!
//! - `encode_*` write into a caller-provided slice and return bytes written
//! - `decode_*` read from a slice and return (value, bytes_read)
//! - `decode_string` returns a sub-slice of the input, never a copy
//!
//! The slice encoders index the output directly; callers size the slice with
//! `uint_len`/`string_len` first. `Tuple` does this before every append.
//!
//! ## Error Handling
//!
//! Decoders return `eyre::Result`:
//! - Empty buffer: "empty buffer for uint decode"
//! - Truncated encoding: "truncated uint16 payload"
//! - Tag of the wrong family: "expected uint tag, found 0xa3"

use eyre::{bail, ensure, Result};

use crate::types::FieldValue;

pub mod tag {
    pub const POSITIVE_FIXINT_MAX: u8 = 0x7F;

    pub const FIXSTR_MIN: u8 = 0xA0;
    pub const FIXSTR_MAX: u8 = 0xBF;
    pub const FIXSTR_LEN_MASK: u8 = 0x1F;
    pub const FIXSTR_MAX_LEN: usize = 31;

    pub const UINT8: u8 = 0xCC;
    pub const UINT16: u8 = 0xCD;
    pub const UINT32: u8 = 0xCE;
    pub const UINT64: u8 = 0xCF;

    pub const STR8: u8 = 0xD9;
    pub const STR16: u8 = 0xDA;
    pub const STR32: u8 = 0xDB;

    pub fn is_uint(tag: u8) -> bool {
        tag <= POSITIVE_FIXINT_MAX || (UINT8..=UINT64).contains(&tag)
    }

    pub fn is_string(tag: u8) -> bool {
        (FIXSTR_MIN..=FIXSTR_MAX).contains(&tag) || (STR8..=STR32).contains(&tag)
    }
}

pub fn uint_len(value: u64) -> usize {
    if value <= tag::POSITIVE_FIXINT_MAX as u64 {
        1
    } else if value <= u8::MAX as u64 {
        2
    } else if value <= u16::MAX as u64 {
        3
    } else if value <= u32::MAX as u64 {
        5
    } else {
        9
    }
}

/// Encoded size of a string of `len` bytes, header included.
pub fn string_len(len: usize) -> usize {
    debug_assert!(len <= u32::MAX as usize, "string of {} bytes exceeds str32", len);
    let header = if len <= tag::FIXSTR_MAX_LEN {
        1
    } else if len <= u8::MAX as usize {
        2
    } else if len <= u16::MAX as usize {
        3
    } else {
        5
    };
    header + len
}

pub fn encode_uint(value: u64, buf: &mut [u8]) -> usize {
    if value <= tag::POSITIVE_FIXINT_MAX as u64 {
        buf[0] = value as u8;
        1
    } else if value <= u8::MAX as u64 {
        buf[0] = tag::UINT8;
        buf[1] = value as u8;
        2
    } else if value <= u16::MAX as u64 {
        buf[0] = tag::UINT16;
        buf[1..3].copy_from_slice(&(value as u16).to_be_bytes());
        3
    } else if value <= u32::MAX as u64 {
        buf[0] = tag::UINT32;
        buf[1..5].copy_from_slice(&(value as u32).to_be_bytes());
        5
    } else {
        buf[0] = tag::UINT64;
        buf[1..9].copy_from_slice(&value.to_be_bytes());
        9
    }
}

/// Writes the string header and payload. `bytes.len()` must fit in a u32.
pub fn encode_string(bytes: &[u8], buf: &mut [u8]) -> usize {
    let len = bytes.len();
    debug_assert!(len <= u32::MAX as usize, "string of {} bytes exceeds str32", len);
    let header = if len <= tag::FIXSTR_MAX_LEN {
        buf[0] = tag::FIXSTR_MIN | len as u8;
        1
    } else if len <= u8::MAX as usize {
        buf[0] = tag::STR8;
        buf[1] = len as u8;
        2
    } else if len <= u16::MAX as usize {
        buf[0] = tag::STR16;
        buf[1..3].copy_from_slice(&(len as u16).to_be_bytes());
        3
    } else {
        buf[0] = tag::STR32;
        buf[1..5].copy_from_slice(&(len as u32).to_be_bytes());
        5
    };
    buf[header..header + len].copy_from_slice(bytes);
    header + len
}

pub fn encode_uint_to(value: u64, buf: &mut Vec<u8>) {
    let start = buf.len();
    buf.resize(start + uint_len(value), 0);
    encode_uint(value, &mut buf[start..]);
}

pub fn encode_string_to(bytes: &[u8], buf: &mut Vec<u8>) {
    let start = buf.len();
    buf.resize(start + string_len(bytes.len()), 0);
    encode_string(bytes, &mut buf[start..]);
}

#[inline]
fn read_be<const N: usize>(buf: &[u8], what: &str) -> Result<[u8; N]> {
    ensure!(buf.len() > N, "truncated {} payload", what);
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[1..1 + N]);
    Ok(out)
}

#[inline]
pub fn decode_uint(buf: &[u8]) -> Result<(u64, usize)> {
    ensure!(!buf.is_empty(), "empty buffer for uint decode");

    let first = buf[0];

    match first {
        0..=tag::POSITIVE_FIXINT_MAX => Ok((first as u64, 1)),
        tag::UINT8 => {
            let b = read_be::<1>(buf, "uint8")?;
            Ok((b[0] as u64, 2))
        }
        tag::UINT16 => {
            let b = read_be::<2>(buf, "uint16")?;
            Ok((u16::from_be_bytes(b) as u64, 3))
        }
        tag::UINT32 => {
            let b = read_be::<4>(buf, "uint32")?;
            Ok((u32::from_be_bytes(b) as u64, 5))
        }
        tag::UINT64 => {
            let b = read_be::<8>(buf, "uint64")?;
            Ok((u64::from_be_bytes(b), 9))
        }
        _ => bail!("expected uint tag, found {:#04x}", first),
    }
}

#[inline]
pub fn decode_string(buf: &[u8]) -> Result<(&[u8], usize)> {
    ensure!(!buf.is_empty(), "empty buffer for string decode");

    let first = buf[0];

    let (len, header) = match first {
        tag::FIXSTR_MIN..=tag::FIXSTR_MAX => ((first & tag::FIXSTR_LEN_MASK) as usize, 1),
        tag::STR8 => (read_be::<1>(buf, "str8 length")?[0] as usize, 2),
        tag::STR16 => (
            u16::from_be_bytes(read_be::<2>(buf, "str16 length")?) as usize,
            3,
        ),
        tag::STR32 => (
            u32::from_be_bytes(read_be::<4>(buf, "str32 length")?) as usize,
            5,
        ),
        _ => bail!("expected string tag, found {:#04x}", first),
    };

    let end = header + len;
    ensure!(
        buf.len() >= end,
        "truncated string: need {} bytes, have {}",
        end,
        buf.len()
    );
    Ok((&buf[header..end], end))
}

/// Decodes whichever field kind the tag announces.
pub fn decode_value(buf: &[u8]) -> Result<(FieldValue<'_>, usize)> {
    ensure!(!buf.is_empty(), "empty buffer for value decode");

    let first = buf[0];
    if tag::is_uint(first) {
        let (v, n) = decode_uint(buf)?;
        Ok((FieldValue::Uint(v), n))
    } else if tag::is_string(first) {
        let (s, n) = decode_string(buf)?;
        Ok((FieldValue::Str(s), n))
    } else {
        bail!("unsupported msgpack tag {:#04x}", first)
    }
}
