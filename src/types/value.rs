//! # Field Values
//!
//! `FieldValue<'a>` is the decoded form of one tuple field. String payloads
//! borrow from the tuple buffer, so decoding a field never copies.

use std::fmt;

use super::FieldType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldValue<'a> {
    Uint(u64),
    Str(&'a [u8]),
}

impl<'a> FieldValue<'a> {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Uint(_) => FieldType::Uint,
            FieldValue::Str(_) => FieldType::String,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match *self {
            FieldValue::Uint(v) => Some(v),
            FieldValue::Str(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match *self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Uint(_) => None,
        }
    }
}

impl From<u64> for FieldValue<'_> {
    fn from(v: u64) -> Self {
        FieldValue::Uint(v)
    }
}

impl<'a> From<&'a [u8]> for FieldValue<'a> {
    fn from(s: &'a [u8]) -> Self {
        FieldValue::Str(s)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Str(s.as_bytes())
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Uint(v) => write!(f, "{}", v),
            FieldValue::Str(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
        }
    }
}
