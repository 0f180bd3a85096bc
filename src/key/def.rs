//! # Key Definitions
//!
//! A `KeyDef` is an ordered list of `(field_no, field_type)` parts plus the
//! comparison strategy chosen for it. Tuples are ordered lexicographically by
//! the listed fields, in list order; fields not listed are ignored. Different
//! key definitions over the same tuples give different orders, which is what
//! lets several indexes coexist over one set of tuples.
//!
//! ```rust
//! use msgtuple::{FieldType, KeyDef, KeyPart};
//!
//! // Order by field 3, then by field 0 when field 3 ties.
//! let def = KeyDef::new(&[
//!     KeyPart::new(3, FieldType::String),
//!     KeyPart::new(0, FieldType::Uint),
//! ])?;
//! assert_eq!(def.part_count(), 2);
//! # Ok::<(), eyre::Report>(())
//! ```

use eyre::{ensure, Result};
use smallvec::SmallVec;

use crate::config::MAX_KEY_PARTS;
use crate::types::FieldType;

use super::compare::TupleComparator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPart {
    pub field_no: usize,
    pub field_type: FieldType,
}

impl KeyPart {
    pub const fn new(field_no: usize, field_type: FieldType) -> Self {
        Self {
            field_no,
            field_type,
        }
    }
}

/// How a `KeyDef` compares tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareStrategy {
    /// Walks every part, reusing the decode cursor across consecutive fields.
    #[default]
    General,
    /// Decodes field 0 of each tuple as a uint and nothing else. Only valid
    /// for a key of exactly one `(0, Uint)` part.
    FirstFieldUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDef {
    parts: SmallVec<[KeyPart; MAX_KEY_PARTS]>,
    strategy: CompareStrategy,
}

impl KeyDef {
    pub fn new(parts: &[KeyPart]) -> Result<Self> {
        Self::with_strategy(parts, CompareStrategy::General)
    }

    pub fn with_strategy(parts: &[KeyPart], strategy: CompareStrategy) -> Result<Self> {
        ensure!(!parts.is_empty(), "key definition needs at least one part");
        ensure!(
            parts.len() <= MAX_KEY_PARTS,
            "key definition has {} parts, limit is {}",
            parts.len(),
            MAX_KEY_PARTS
        );

        if strategy == CompareStrategy::FirstFieldUint {
            ensure!(
                parts == [KeyPart::new(0, FieldType::Uint)],
                "FirstFieldUint strategy requires a single (0, uint) part, got {:?}",
                parts
            );
        }

        tracing::debug!(parts = parts.len(), ?strategy, "key definition created");

        Ok(Self {
            parts: SmallVec::from_slice(parts),
            strategy,
        })
    }

    pub fn first_field_uint() -> Self {
        Self {
            parts: SmallVec::from_slice(&[KeyPart::new(0, FieldType::Uint)]),
            strategy: CompareStrategy::FirstFieldUint,
        }
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn strategy(&self) -> CompareStrategy {
        self.strategy
    }

    /// True when part `i` reads the field right after part `i - 1`, so the
    /// cursor left by the previous decode is already positioned on it.
    #[inline]
    pub fn is_sequential(&self, i: usize) -> bool {
        i > 0
            && i < self.parts.len()
            && self.parts[i - 1].field_no.checked_add(1) == Some(self.parts[i].field_no)
    }

    /// Highest field number referenced by any part.
    pub fn max_field_no(&self) -> usize {
        self.parts.iter().map(|p| p.field_no).max().unwrap_or(0)
    }

    pub fn comparator(&self) -> TupleComparator<'_> {
        TupleComparator::new(self)
    }
}
