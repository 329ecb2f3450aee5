//! Pure aggregation over domain collections.
//!
//! # Responsibility
//! - Sorting, grouping and summary functions consumed by list screens.
//! - Keep this layer free of storage and I/O concerns.
//!
//! # Invariants
//! - Functions never mutate their inputs and keep no state between calls.
//! - Empty input produces empty (or all-zero) output, never an error.

pub mod finance;
pub mod jobs;
