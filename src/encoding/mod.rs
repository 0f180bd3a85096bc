//! # Encoding Module
//!
//! This module provides the binary field format for tuples:
//!
//! - **MessagePack subset**: Tag-prefixed big-endian encoding of unsigned
//!   integers and byte strings
//! - **Reader**: Forward-only cursor that decodes consecutive fields

pub mod msgpack;
pub mod reader;

pub use msgpack::{
    decode_string, decode_uint, decode_value, encode_string, encode_uint, string_len, uint_len,
};
pub use reader::MsgReader;
