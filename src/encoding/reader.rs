//! # Sequential Field Reader
//!
//! `MsgReader` is a forward-only cursor over encoded fields. Each `read_*`
//! call decodes the value at the cursor and advances past it, which leaves the
//! cursor exactly at the start of the following field. The comparator relies on
//! this to walk consecutive key parts without consulting the offset table.
//!
//! ```rust
//! use msgtuple::encoding::msgpack::{encode_string_to, encode_uint_to};
//! use msgtuple::encoding::MsgReader;
//!
//! let mut buf = Vec::new();
//! encode_uint_to(7, &mut buf);
//! encode_string_to(b"foo", &mut buf);
//!
//! let mut reader = MsgReader::new(&buf);
//! assert_eq!(reader.read_uint().unwrap(), 7);
//! assert_eq!(reader.read_str().unwrap(), b"foo");
//! assert!(reader.is_empty());
//! ```

use eyre::Result;

use crate::encoding::msgpack::{decode_string, decode_uint, decode_value};
use crate::types::FieldValue;

#[derive(Debug, Clone, Copy)]
pub struct MsgReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MsgReader<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub fn read_uint(&mut self) -> Result<u64> {
        let (value, n) = decode_uint(self.remaining())?;
        self.pos += n;
        Ok(value)
    }

    #[inline]
    pub fn read_str(&mut self) -> Result<&'a [u8]> {
        let (bytes, n) = decode_string(self.remaining())?;
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_value(&mut self) -> Result<FieldValue<'a>> {
        let (value, n) = decode_value(self.remaining())?;
        self.pos += n;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::msgpack::{encode_string_to, encode_uint_to};

    #[test]
    fn reader_advances_past_each_value() {
        let mut buf = Vec::new();
        encode_uint_to(5, &mut buf);
        encode_string_to(b"foo", &mut buf);
        encode_uint_to(70000, &mut buf);

        let mut reader = MsgReader::new(&buf);
        assert_eq!(reader.read_uint().unwrap(), 5);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_str().unwrap(), b"foo");
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.read_uint().unwrap(), 70000);
        assert_eq!(reader.position(), buf.len());
        assert!(reader.is_empty());
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut buf = Vec::new();
        encode_string_to(b"x", &mut buf);

        let mut reader = MsgReader::new(&buf);
        assert!(reader.read_uint().is_err());
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_str().unwrap(), b"x");
    }

    #[test]
    fn read_past_end_fails() {
        let mut reader = MsgReader::new(&[0x01]);
        assert_eq!(reader.read_uint().unwrap(), 1);
        assert!(reader.read_uint().is_err());
        assert!(reader.read_value().is_err());
    }

    #[test]
    fn read_value_is_self_describing() {
        let mut buf = Vec::new();
        encode_string_to(b"ab", &mut buf);
        encode_uint_to(0xFF, &mut buf);

        let mut reader = MsgReader::new(&buf);
        assert_eq!(reader.read_value().unwrap(), FieldValue::Str(b"ab"));
        assert_eq!(reader.read_value().unwrap(), FieldValue::Uint(0xFF));
    }
}
