//! # Tuple Comparison
//!
//! Lexicographic comparison of two tuples under a `KeyDef`.
//!
//! ## Cursor Reuse
//!
//! Locating a field by index goes through the tuple's offset table. Decoding a
//! field, on the other hand, leaves the read cursor exactly at the next field.
//! So when part `i` names the field right after part `i - 1`, the comparator
//! keeps decoding from where it stopped instead of looking the field up again:
//!
//! ```text
//! parts: (1, uint) (2, uint) (5, str) (6, str)
//!         lookup    reuse     lookup   reuse
//! ```
//!
//! Reuse only changes how a field is found, never which field is compared.
//! It also lets sequential parts reach fields beyond the cached offset range
//! as long as the run started inside it.
//!
//! ## Strategies
//!
//! | Strategy | Work per compare |
//! |----------|------------------|
//! | `General` | offset lookup per non-sequential part, decode per part |
//! | `FirstFieldUint` | two uint decodes at `first_field_offset` |
//!
//! ## Errors
//!
//! A field whose encoded tag does not match the part's declared type, or a
//! part whose field cannot be located, fails the comparison. Error context
//! is only built on the failure path, so successful comparisons do not
//! allocate.

use std::cmp::Ordering;

use eyre::{Result, WrapErr};

use crate::encoding::msgpack::decode_uint;
use crate::encoding::MsgReader;
use crate::tuple::Tuple;
use crate::types::FieldType;

use super::def::{CompareStrategy, KeyDef};

/// A comparison function bound to one key definition.
#[derive(Debug, Clone, Copy)]
pub struct TupleComparator<'k> {
    def: &'k KeyDef,
}

impl<'k> TupleComparator<'k> {
    pub fn new(def: &'k KeyDef) -> Self {
        Self { def }
    }

    pub fn key_def(&self) -> &'k KeyDef {
        self.def
    }

    #[inline]
    pub fn compare(&self, a: &Tuple, b: &Tuple) -> Result<Ordering> {
        let def = self.key_def();
        match def.strategy() {
            CompareStrategy::General => compare_general(def, a, b),
            CompareStrategy::FirstFieldUint => compare_first_field_uint(a, b),
        }
    }
}

impl KeyDef {
    #[inline]
    pub fn compare(&self, a: &Tuple, b: &Tuple) -> Result<Ordering> {
        self.comparator().compare(a, b)
    }
}

pub fn compare_general(def: &KeyDef, a: &Tuple, b: &Tuple) -> Result<Ordering> {
    let parts = def.parts();
    debug_assert!(!parts.is_empty());

    let mut cur_a = MsgReader::new(&[]);
    let mut cur_b = MsgReader::new(&[]);

    for (i, part) in parts.iter().enumerate() {
        if !def.is_sequential(i) {
            cur_a = a
                .reader_at(part.field_no)
                .wrap_err_with(|| format!("key part {}: left tuple", i))?;
            cur_b = b
                .reader_at(part.field_no)
                .wrap_err_with(|| format!("key part {}: right tuple", i))?;
        }

        let ord = match part.field_type {
            FieldType::Uint => {
                let va = cur_a.read_uint().wrap_err_with(|| {
                    format!("key part {}: left field {} is not a uint", i, part.field_no)
                })?;
                let vb = cur_b.read_uint().wrap_err_with(|| {
                    format!("key part {}: right field {} is not a uint", i, part.field_no)
                })?;
                va.cmp(&vb)
            }
            FieldType::String => {
                let sa = cur_a.read_str().wrap_err_with(|| {
                    format!("key part {}: left field {} is not a string", i, part.field_no)
                })?;
                let sb = cur_b.read_str().wrap_err_with(|| {
                    format!("key part {}: right field {} is not a string", i, part.field_no)
                })?;
                sa.cmp(sb)
            }
        };

        if ord != Ordering::Equal {
            return Ok(ord);
        }
    }

    Ok(Ordering::Equal)
}

/// Compares field 0 of both tuples as uints, skipping the key part machinery.
#[inline]
pub fn compare_first_field_uint(a: &Tuple, b: &Tuple) -> Result<Ordering> {
    let (va, _) = decode_uint(a.first_field()).wrap_err("left field 0 is not a uint")?;
    let (vb, _) = decode_uint(b.first_field()).wrap_err("right field 0 is not a uint")?;
    Ok(va.cmp(&vb))
}
