//! # Field Types
//!
//! The closed set of field types a tuple can hold. Key definitions declare one
//! of these per part and the comparator decodes the field accordingly.
//!
//! | Type | Wire tags |
//! |------|-----------|
//! | Uint | positive fixint, uint8, uint16, uint32, uint64 |
//! | String | fixstr, str8, str16, str32 |

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Uint,
    String,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Uint => "uint",
            FieldType::String => "string",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
