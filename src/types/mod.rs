//! # Field Type System
//!
//! Shared vocabulary for the tuple and key modules.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `FieldType` | Declared type of a key part (uint or string) |
//! | `FieldValue<'a>` | Decoded field, strings borrowed from the tuple |

mod field_type;
mod value;

pub use field_type::FieldType;
pub use value::FieldValue;
