//! # Tuples with Cached Field Offsets
//!
//! A tuple is a packed record of variable-length fields encoded back to back.
//! Because every field has a variable size, reaching field N would normally
//! mean decoding fields 0..N. To avoid that, a tuple caches the byte position
//! of its first `num_offsets` fields. The cache lives in the same buffer as
//! the fields, in front of them.
//!
//! ## Tuple Binary Layout
//!
//! ```text
//! first_field_offset (struct member)
//!        │
//!        ▼
//! +------+------+-----+--------+--------+--------+-----+----------+
//! | off1 | off2 | ... | field0 | field1 | field2 | ... |  unused  |
//! +------+------+-----+--------+--------+--------+-----+----------+
//! |<- (num_offsets-1) * 4 ->|<----- data_used ------->|
//! ```
//!
//! | Component | Type | Description |
//! |-----------|------|-------------|
//! | **Offset Table** | `[u32 LE; num_offsets - 1]` | Positions of fields 1..num_offsets |
//! | **Field Payload** | MessagePack | Fields in append order |
//!
//! Field 0's position is stored outside the buffer because every comparison
//! needs it.
//!
//! ## Access Rules
//!
//! - `field_at(i)` for `i < num_offsets`: O(1) via the cache
//! - `field_at(i)` for `i >= num_offsets`: error, there is no scan fallback
//! - `fields()`: decodes every field in order, cached or not
//!
//! ## Capacity
//!
//! The buffer is allocated once. An append that does not fit fails and leaves
//! the tuple unchanged; the buffer never grows.

mod buffer;
mod iter;


pub use buffer::Tuple;
pub use iter::FieldIter;
