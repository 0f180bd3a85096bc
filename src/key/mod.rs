//! # Key Definitions and Tuple Comparison
//!
//! This module orders tuples by an ordered subset of their fields.
//!
//! ## Module Structure
//!
//! - `def`: `KeyPart`, `KeyDef` and the `CompareStrategy` selection
//! - `compare`: the comparator bound to a key definition
//!
//! ## Contract
//!
//! For a fixed key definition, `compare` is a total order over tuples whose
//! key fields have the declared types: it is antisymmetric, transitive, and
//! returns `Equal` only when every key field is equal. Each strategy
//! implements the same contract.

pub mod compare;
pub mod def;

#[cfg(test)]
mod tests;

pub use compare::{compare_first_field_uint, compare_general, TupleComparator};
pub use def::{CompareStrategy, KeyDef, KeyPart};
