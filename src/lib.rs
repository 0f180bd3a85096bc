//! # msgtuple - Packed Tuples with Cached Offsets
//!
//! msgtuple stores a record of variable-typed fields in one contiguous buffer
//! and orders such records by caller-chosen key definitions. This
//! implementation prioritizes:
//!
//! - **Compact self-describing fields**: MessagePack uint and string encodings
//! - **O(1) access to a field prefix**: cached offsets live in the tuple buffer
//! - **Allocation-free comparison**: the comparator only borrows its inputs
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cmp::Ordering;
//! use msgtuple::{FieldType, KeyDef, KeyPart, Tuple};
//!
//! let mut x = Tuple::new();
//! x.reset(3)?;
//! x.append_uint(5)?;
//! x.append_string(b"foo")?;
//! x.append_uint(9)?;
//!
//! let mut y = Tuple::new();
//! y.reset(3)?;
//! y.append_uint(5)?;
//! y.append_string(b"foo")?;
//! y.append_uint(3)?;
//!
//! let by_third = KeyDef::new(&[KeyPart::new(2, FieldType::Uint)])?;
//! assert_eq!(by_third.compare(&x, &y)?, Ordering::Greater);
//!
//! let by_first = KeyDef::first_field_uint();
//! assert_eq!(by_first.comparator().compare(&x, &y)?, Ordering::Equal);
//! # Ok::<(), eyre::Report>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Key Definitions & Comparator       │
//! ├─────────────────────────────────────┤
//! │   Tuple (offset table + payload)     │
//! ├─────────────────────────────────────┤
//! │   MessagePack Field Encoding         │
//! └─────────────────────────────────────┘
//! ```
//!
//! Data flows upward only. The comparator never mutates a tuple and a tuple
//! knows nothing about key definitions.
//!
//! ## Module Overview
//!
//! - [`config`]: Sizing constants and their compile-time checks
//! - [`encoding`]: Field codec and sequential reader
//! - [`types`]: `FieldType` and `FieldValue`
//! - [`tuple`]: The tuple buffer
//! - [`key`]: Key definitions and comparison strategies

pub mod config;
pub mod encoding;
pub mod key;
pub mod tuple;
pub mod types;

pub use key::{CompareStrategy, KeyDef, KeyPart, TupleComparator};
pub use tuple::Tuple;
pub use types::{FieldType, FieldValue};
