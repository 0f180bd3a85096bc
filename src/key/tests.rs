//! Tests for the key module

use std::cmp::Ordering;

use super::*;
use crate::config::MAX_KEY_PARTS;
use crate::tuple::Tuple;
use crate::types::{FieldType, FieldValue};

fn tuple_of(num_offsets: usize, values: &[FieldValue<'_>]) -> Tuple {
    Tuple::from_values(num_offsets, values).unwrap()
}

fn xy() -> (Tuple, Tuple) {
    let x = tuple_of(
        3,
        &[FieldValue::Uint(5), FieldValue::from("foo"), FieldValue::Uint(9)],
    );
    let y = tuple_of(
        3,
        &[FieldValue::Uint(5), FieldValue::from("foo"), FieldValue::Uint(3)],
    );
    (x, y)
}

mod key_def_tests {
    use super::*;

    #[test]
    fn empty_key_def_is_rejected() {
        let err = KeyDef::new(&[]).unwrap_err();
        assert!(err.to_string().contains("at least one part"));
    }

    #[test]
    fn key_def_accepts_max_parts() {
        let parts: Vec<_> = (0..MAX_KEY_PARTS)
            .map(|i| KeyPart::new(i, FieldType::Uint))
            .collect();
        let def = KeyDef::new(&parts).unwrap();
        assert_eq!(def.part_count(), MAX_KEY_PARTS);
        assert_eq!(def.max_field_no(), MAX_KEY_PARTS - 1);
    }

    #[test]
    fn key_def_rejects_too_many_parts() {
        let parts: Vec<_> = (0..=MAX_KEY_PARTS)
            .map(|i| KeyPart::new(i, FieldType::Uint))
            .collect();
        let err = KeyDef::new(&parts).unwrap_err();
        assert!(err.to_string().contains("limit is 16"));
    }

    #[test]
    fn default_strategy_is_general() {
        let def = KeyDef::new(&[KeyPart::new(0, FieldType::Uint)]).unwrap();
        assert_eq!(def.strategy(), CompareStrategy::General);
    }

    #[test]
    fn first_field_uint_requires_matching_shape() {
        assert!(KeyDef::with_strategy(
            &[KeyPart::new(0, FieldType::Uint)],
            CompareStrategy::FirstFieldUint
        )
        .is_ok());

        assert!(KeyDef::with_strategy(
            &[KeyPart::new(1, FieldType::Uint)],
            CompareStrategy::FirstFieldUint
        )
        .is_err());

        assert!(KeyDef::with_strategy(
            &[KeyPart::new(0, FieldType::String)],
            CompareStrategy::FirstFieldUint
        )
        .is_err());

        assert!(KeyDef::with_strategy(
            &[
                KeyPart::new(0, FieldType::Uint),
                KeyPart::new(1, FieldType::Uint)
            ],
            CompareStrategy::FirstFieldUint
        )
        .is_err());
    }

    #[test]
    fn first_field_uint_constructor_matches_validated_form() {
        let validated = KeyDef::with_strategy(
            &[KeyPart::new(0, FieldType::Uint)],
            CompareStrategy::FirstFieldUint,
        )
        .unwrap();
        assert_eq!(KeyDef::first_field_uint(), validated);
    }

    #[test]
    fn is_sequential_detects_consecutive_fields() {
        let def = KeyDef::new(&[
            KeyPart::new(1, FieldType::Uint),
            KeyPart::new(2, FieldType::Uint),
            KeyPart::new(4, FieldType::String),
            KeyPart::new(3, FieldType::String),
            KeyPart::new(4, FieldType::String),
        ])
        .unwrap();

        assert!(!def.is_sequential(0));
        assert!(def.is_sequential(1));
        assert!(!def.is_sequential(2));
        assert!(!def.is_sequential(3));
        assert!(def.is_sequential(4));
        assert!(!def.is_sequential(5));
    }

    #[test]
    fn is_sequential_handles_max_field_number() {
        let def = KeyDef::new(&[
            KeyPart::new(usize::MAX, FieldType::Uint),
            KeyPart::new(0, FieldType::Uint),
        ])
        .unwrap();
        assert!(!def.is_sequential(1));

        let def = KeyDef::new(&[
            KeyPart::new(usize::MAX - 1, FieldType::Uint),
            KeyPart::new(usize::MAX, FieldType::Uint),
        ])
        .unwrap();
        assert!(def.is_sequential(1));
    }

    #[test]
    fn comparator_is_bound_to_key_def() {
        let def = KeyDef::new(&[KeyPart::new(2, FieldType::Uint)]).unwrap();
        let cmp = def.comparator();
        assert!(std::ptr::eq(cmp.key_def(), &def));
    }
}

mod compare_tests {
    use super::*;

    #[test]
    fn compare_by_third_field() {
        let (x, y) = xy();
        let def = KeyDef::new(&[KeyPart::new(2, FieldType::Uint)]).unwrap();
        assert_eq!(def.compare(&x, &y).unwrap(), Ordering::Greater);
        assert_eq!(def.compare(&y, &x).unwrap(), Ordering::Less);
    }

    #[test]
    fn compare_by_first_field_ties() {
        let (x, y) = xy();
        let def = KeyDef::new(&[KeyPart::new(0, FieldType::Uint)]).unwrap();
        assert_eq!(def.compare(&x, &y).unwrap(), Ordering::Equal);
    }

    #[test]
    fn tie_on_first_part_falls_through_to_next() {
        let (x, y) = xy();
        let def = KeyDef::new(&[
            KeyPart::new(0, FieldType::Uint),
            KeyPart::new(1, FieldType::String),
            KeyPart::new(2, FieldType::Uint),
        ])
        .unwrap();
        assert_eq!(def.compare(&x, &y).unwrap(), Ordering::Greater);
    }

    #[test]
    fn first_difference_short_circuits() {
        let a = tuple_of(2, &[FieldValue::Uint(1), FieldValue::from("zzz")]);
        let b = tuple_of(2, &[FieldValue::Uint(2), FieldValue::Uint(0)]);
        let def = KeyDef::new(&[
            KeyPart::new(0, FieldType::Uint),
            KeyPart::new(1, FieldType::String),
        ])
        .unwrap();
        // field 1 of `b` is not a string, but it is never decoded
        assert_eq!(def.compare(&a, &b).unwrap(), Ordering::Less);
    }

    #[test]
    fn identical_tuples_compare_equal() {
        let (x, _) = xy();
        let def = KeyDef::new(&[
            KeyPart::new(2, FieldType::Uint),
            KeyPart::new(1, FieldType::String),
            KeyPart::new(0, FieldType::Uint),
        ])
        .unwrap();
        assert_eq!(def.compare(&x, &x.clone()).unwrap(), Ordering::Equal);
    }

    #[test]
    fn strings_compare_bytewise_then_by_length() {
        let def = KeyDef::new(&[KeyPart::new(0, FieldType::String)]).unwrap();
        let t = |s: &str| tuple_of(1, &[FieldValue::from(s)]);

        assert_eq!(def.compare(&t("abc"), &t("abd")).unwrap(), Ordering::Less);
        assert_eq!(def.compare(&t("abc"), &t("ab")).unwrap(), Ordering::Greater);
        assert_eq!(def.compare(&t(""), &t("a")).unwrap(), Ordering::Less);
        assert_eq!(def.compare(&t("same"), &t("same")).unwrap(), Ordering::Equal);
    }

    #[test]
    fn strings_with_high_bytes_compare_unsigned() {
        let def = KeyDef::new(&[KeyPart::new(0, FieldType::String)]).unwrap();
        let a = tuple_of(1, &[FieldValue::Str(&[0x01])]);
        let b = tuple_of(1, &[FieldValue::Str(&[0xFF])]);
        assert_eq!(def.compare(&a, &b).unwrap(), Ordering::Less);
    }

    #[test]
    fn uints_across_encoding_widths_compare_numerically() {
        let def = KeyDef::new(&[KeyPart::new(0, FieldType::Uint)]).unwrap();
        let values = [0u64, 0x7F, 0x80, 0xFF, 0x100, 0xFFFF, 0x1_0000, u64::MAX];
        for w in values.windows(2) {
            let a = tuple_of(1, &[FieldValue::Uint(w[0])]);
            let b = tuple_of(1, &[FieldValue::Uint(w[1])]);
            assert_eq!(def.compare(&a, &b).unwrap(), Ordering::Less, "{:?}", w);
        }
    }

    #[test]
    fn sequential_parts_reach_beyond_cached_range() {
        let a = tuple_of(
            2,
            &[FieldValue::Uint(0), FieldValue::Uint(1), FieldValue::Uint(2)],
        );
        let b = tuple_of(
            2,
            &[FieldValue::Uint(0), FieldValue::Uint(1), FieldValue::Uint(3)],
        );
        let def = KeyDef::new(&[
            KeyPart::new(1, FieldType::Uint),
            KeyPart::new(2, FieldType::Uint),
        ])
        .unwrap();
        assert_eq!(def.compare(&a, &b).unwrap(), Ordering::Less);
    }

    #[test]
    fn lookup_beyond_cached_range_fails() {
        let (x, y) = xy();
        let mut narrow = Tuple::new();
        narrow.reset(1).unwrap();
        for field in x.fields() {
            narrow.append(field.unwrap()).unwrap();
        }

        let def = KeyDef::new(&[KeyPart::new(2, FieldType::Uint)]).unwrap();
        let err = def.compare(&narrow, &y).unwrap_err();
        assert!(format!("{:#}", err).contains("beyond the cached offset range"));
    }

    #[test]
    fn declared_type_mismatch_fails() {
        let (x, y) = xy();
        let def = KeyDef::new(&[KeyPart::new(1, FieldType::Uint)]).unwrap();
        let err = def.compare(&x, &y).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("is not a uint"), "{}", msg);
        assert!(msg.contains("expected uint tag"), "{}", msg);
    }

    #[test]
    fn each_part_uses_its_own_type() {
        let a = tuple_of(2, &[FieldValue::Uint(7), FieldValue::from("b")]);
        let b = tuple_of(2, &[FieldValue::Uint(7), FieldValue::from("a")]);
        let def = KeyDef::new(&[
            KeyPart::new(0, FieldType::Uint),
            KeyPart::new(1, FieldType::String),
        ])
        .unwrap();
        assert_eq!(def.compare(&a, &b).unwrap(), Ordering::Greater);
    }

    #[test]
    fn first_field_uint_matches_general() {
        let general = KeyDef::new(&[KeyPart::new(0, FieldType::Uint)]).unwrap();
        let fast = KeyDef::first_field_uint();

        let values = [0u64, 5, 300, 70000, u64::MAX];
        for &va in &values {
            for &vb in &values {
                let a = tuple_of(1, &[FieldValue::Uint(va), FieldValue::from("x")]);
                let b = tuple_of(4, &[FieldValue::Uint(vb), FieldValue::Uint(1)]);
                assert_eq!(
                    fast.compare(&a, &b).unwrap(),
                    general.compare(&a, &b).unwrap(),
                    "{} vs {}",
                    va,
                    vb
                );
            }
        }
    }

    #[test]
    fn first_field_uint_rejects_string_field() {
        let a = tuple_of(1, &[FieldValue::from("x")]);
        let b = tuple_of(1, &[FieldValue::Uint(1)]);
        assert!(KeyDef::first_field_uint().compare(&a, &b).is_err());
    }

    #[test]
    fn first_field_uint_rejects_empty_tuple() {
        let mut empty = Tuple::new();
        empty.reset(1).unwrap();
        let b = tuple_of(1, &[FieldValue::Uint(1)]);
        assert!(compare_first_field_uint(&empty, &b).is_err());
    }

    #[test]
    fn comparator_dispatches_on_strategy() {
        let (x, y) = xy();
        let fast = KeyDef::first_field_uint();
        assert_eq!(fast.comparator().compare(&x, &y).unwrap(), Ordering::Equal);

        let def = KeyDef::new(&[KeyPart::new(2, FieldType::Uint)]).unwrap();
        assert_eq!(
            def.comparator().compare(&x, &y).unwrap(),
            compare_general(&def, &x, &y).unwrap()
        );
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Field {
        Uint(u64),
        Str(Vec<u8>),
    }

    impl Field {
        fn as_value(&self) -> FieldValue<'_> {
            match self {
                Field::Uint(v) => FieldValue::Uint(*v),
                Field::Str(s) => FieldValue::Str(s),
            }
        }
    }

    const FIELDS: usize = 4;
    const TYPES: [FieldType; FIELDS] = [
        FieldType::Uint,
        FieldType::String,
        FieldType::String,
        FieldType::Uint,
    ];

    fn arb_uint() -> impl Strategy<Value = u64> {
        prop_oneof![0u64..4, 0x7Eu64..0x82, 0xFEu64..0x102, any::<u64>()]
    }

    fn arb_fields() -> impl Strategy<Value = Vec<Field>> {
        (
            arb_uint(),
            prop::collection::vec(0u8..4, 0..4),
            prop::collection::vec(any::<u8>(), 0..40),
            arb_uint(),
        )
            .prop_map(|(a, b, c, d)| {
                vec![Field::Uint(a), Field::Str(b), Field::Str(c), Field::Uint(d)]
            })
    }

    fn arb_key_def() -> impl Strategy<Value = KeyDef> {
        prop::sample::subsequence((0..FIELDS).collect::<Vec<_>>(), 1..=FIELDS)
            .prop_shuffle()
            .prop_map(|order| {
                let parts: Vec<_> = order
                    .into_iter()
                    .map(|f| KeyPart::new(f, TYPES[f]))
                    .collect();
                KeyDef::new(&parts).unwrap()
            })
    }

    fn build(fields: &[Field]) -> Tuple {
        let values: Vec<_> = fields.iter().map(Field::as_value).collect();
        Tuple::from_values(FIELDS, &values).unwrap()
    }

    fn reference_order(def: &KeyDef, a: &[Field], b: &[Field]) -> Ordering {
        for part in def.parts() {
            let ord = match (&a[part.field_no], &b[part.field_no]) {
                (Field::Uint(x), Field::Uint(y)) => x.cmp(y),
                (Field::Str(x), Field::Str(y)) => x.cmp(y),
                _ => unreachable!("fields are generated with fixed types"),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    proptest! {
        #[test]
        fn compare_matches_lexicographic_reference(
            def in arb_key_def(),
            a in arb_fields(),
            b in arb_fields(),
        ) {
            let (ta, tb) = (build(&a), build(&b));
            prop_assert_eq!(def.compare(&ta, &tb).unwrap(), reference_order(&def, &a, &b));
        }

        #[test]
        fn compare_is_antisymmetric(
            def in arb_key_def(),
            a in arb_fields(),
            b in arb_fields(),
        ) {
            let (ta, tb) = (build(&a), build(&b));
            let ab = def.compare(&ta, &tb).unwrap();
            let ba = def.compare(&tb, &ta).unwrap();
            prop_assert_eq!(ab, ba.reverse());
        }

        #[test]
        fn compare_is_transitive(
            def in arb_key_def(),
            a in arb_fields(),
            b in arb_fields(),
            c in arb_fields(),
        ) {
            let mut tuples = [build(&a), build(&b), build(&c)];
            tuples.sort_by(|x, y| def.compare(x, y).unwrap());
            prop_assert_ne!(def.compare(&tuples[0], &tuples[1]).unwrap(), Ordering::Greater);
            prop_assert_ne!(def.compare(&tuples[1], &tuples[2]).unwrap(), Ordering::Greater);
            prop_assert_ne!(def.compare(&tuples[0], &tuples[2]).unwrap(), Ordering::Greater);
        }

        #[test]
        fn sequential_and_non_sequential_agree_with_reference(
            a in arb_fields(),
            b in arb_fields(),
        ) {
            let sequential = KeyDef::new(&[
                KeyPart::new(1, FieldType::String),
                KeyPart::new(2, FieldType::String),
            ]).unwrap();
            let reversed = KeyDef::new(&[
                KeyPart::new(2, FieldType::String),
                KeyPart::new(1, FieldType::String),
            ]).unwrap();
            let (ta, tb) = (build(&a), build(&b));

            prop_assert_eq!(
                sequential.compare(&ta, &tb).unwrap(),
                reference_order(&sequential, &a, &b)
            );
            prop_assert_eq!(
                reversed.compare(&ta, &tb).unwrap(),
                reference_order(&reversed, &a, &b)
            );
        }

        #[test]
        fn fast_path_agrees_with_general(a in arb_fields(), b in arb_fields()) {
            let general = KeyDef::new(&[KeyPart::new(0, FieldType::Uint)]).unwrap();
            let (ta, tb) = (build(&a), build(&b));
            prop_assert_eq!(
                KeyDef::first_field_uint().compare(&ta, &tb).unwrap(),
                general.compare(&ta, &tb).unwrap()
            );
        }
    }
}
