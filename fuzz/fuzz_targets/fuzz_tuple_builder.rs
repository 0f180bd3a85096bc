//! Fuzz testing for tuple construction and comparison.
//!
//! This fuzz target appends arbitrary fields to bounded tuples and compares
//! them under an arbitrary key definition. Appends past capacity, lookups past
//! the cached range and type mismatches must all surface as errors.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use msgtuple::{FieldType, FieldValue, KeyDef, KeyPart, Tuple};

#[derive(Debug, Arbitrary)]
struct TupleInput {
    capacity: u16,
    max_offsets: u8,
    num_offsets: u8,
    left: Vec<FuzzField>,
    right: Vec<FuzzField>,
    parts: Vec<(u8, bool)>,
}

#[derive(Debug, Arbitrary)]
enum FuzzField {
    Uint(u64),
    Str(Vec<u8>),
}

impl FuzzField {
    fn as_value(&self) -> FieldValue<'_> {
        match self {
            FuzzField::Uint(v) => FieldValue::Uint(*v),
            FuzzField::Str(s) => FieldValue::Str(s),
        }
    }
}

fn build(input: &TupleInput, fields: &[FuzzField]) -> Option<Tuple> {
    let mut tuple = Tuple::with_capacity(input.capacity as usize, input.max_offsets as usize).ok()?;
    tuple.reset(input.num_offsets as usize).ok()?;
    for field in fields {
        let used = tuple.data_used();
        if tuple.append(field.as_value()).is_err() {
            assert_eq!(tuple.data_used(), used);
            break;
        }
    }
    for (i, field) in tuple.fields().enumerate() {
        let value = field.expect("appended fields decode");
        if i < tuple.num_offsets() {
            assert_eq!(tuple.field(i).expect("cached field decodes"), value);
        }
    }
    Some(tuple)
}

fuzz_target!(|input: TupleInput| {
    let (Some(left), Some(right)) = (build(&input, &input.left), build(&input, &input.right)) else {
        return;
    };

    let parts: Vec<KeyPart> = input
        .parts
        .iter()
        .map(|&(field_no, is_uint)| {
            let ty = if is_uint { FieldType::Uint } else { FieldType::String };
            KeyPart::new(field_no as usize % 20, ty)
        })
        .collect();

    let Ok(def) = KeyDef::new(&parts) else {
        return;
    };

    if let (Ok(ab), Ok(ba)) = (def.compare(&left, &right), def.compare(&right, &left)) {
        assert_eq!(ab, ba.reverse());
    }
});
