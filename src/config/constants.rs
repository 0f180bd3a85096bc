//! # Tuple and Key Definition Constants
//!
//! This module centralizes all sizing constants, grouping interdependent values
//! together and documenting their relationships.
//!
//! ## Dependency Graph
//!
//! ```text
//! DEFAULT_FIELD_COUNT (16)
//!       │
//!       ├─> DEFAULT_TUPLE_DATA_SIZE (16 bytes per field on average)
//!       │
//!       └─> DEFAULT_MAX_OFFSETS (one cached offset per field)
//!             │
//!             └─> offset table = (DEFAULT_MAX_OFFSETS - 1) * OFFSET_ENTRY_SIZE
//!                 must fit inside DEFAULT_TUPLE_DATA_SIZE
//!
//! MAX_KEY_PARTS (16)
//!       Upper bound on parts in a key definition. Parts live inline in a
//!       SmallVec of this size so key definitions never spill to the heap.
//! ```
//!
//! ## Critical Invariants
//!
//! 1. `DEFAULT_MAX_OFFSETS >= 1` (field 0 is always cached)
//! 2. The largest default offset table fits in the default buffer

// ============================================================================
// KEY DEFINITION LIMITS
// ============================================================================

/// Maximum number of parts in a single key definition.
pub const MAX_KEY_PARTS: usize = 16;

// ============================================================================
// TUPLE LAYOUT
// These constants are tightly coupled - changing one may require changing others
// ============================================================================

/// Width of one cached offset entry in the tuple's offset table.
/// Entries are stored as little-endian u32 at the start of the buffer.
pub const OFFSET_ENTRY_SIZE: usize = 4;

/// Number of fields a default-sized tuple is expected to hold.
pub const DEFAULT_FIELD_COUNT: usize = 16;

/// Byte capacity of a tuple created with `Tuple::new()`.
pub const DEFAULT_TUPLE_DATA_SIZE: usize = 16 * DEFAULT_FIELD_COUNT;

/// Maximum `num_offsets` accepted by a tuple created with `Tuple::new()`.
pub const DEFAULT_MAX_OFFSETS: usize = DEFAULT_FIELD_COUNT;

/// Size in bytes of an offset table caching `num_offsets` fields.
/// Field 0 is stored outside the table, hence the `- 1`.
pub const fn offset_table_size(num_offsets: usize) -> usize {
    num_offsets.saturating_sub(1) * OFFSET_ENTRY_SIZE
}

const _: () = assert!(DEFAULT_MAX_OFFSETS >= 1, "field 0 must always be cached");

const _: () = assert!(
    offset_table_size(DEFAULT_MAX_OFFSETS) < DEFAULT_TUPLE_DATA_SIZE,
    "default offset table must leave room for field payload"
);

const _: () = assert!(
    OFFSET_ENTRY_SIZE == std::mem::size_of::<u32>(),
    "offset entries are encoded as u32"
);
