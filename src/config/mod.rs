//! # Configuration Module
//!
//! This module centralizes the sizing constants for tuples and key definitions.
//! Constants that depend on each other are co-located and their relationships
//! are enforced through compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: All numeric configuration values with dependency documentation

pub mod constants;
pub use constants::*;
