//! Fuzz testing for the field decoder.
//!
//! This fuzz target feeds arbitrary byte sequences to the MessagePack decoders
//! to ensure malformed or truncated input is reported as an error without
//! panicking or reading out of bounds.

#![no_main]

use libfuzzer_sys::fuzz_target;

use msgtuple::encoding::msgpack::{decode_string, decode_uint, decode_value};
use msgtuple::encoding::MsgReader;

fuzz_target!(|data: &[u8]| {
    if let Ok((_, n)) = decode_uint(data) {
        assert!(n <= data.len());
    }

    if let Ok((s, n)) = decode_string(data) {
        assert!(n <= data.len());
        assert!(s.len() < n);
    }

    let mut reader = MsgReader::new(data);
    while !reader.is_empty() {
        let before = reader.position();
        if reader.read_value().is_err() {
            break;
        }
        assert!(reader.position() > before);
    }

    let _ = decode_value(data);
});
