//! Tree reshaping - extraction and unflattening of JSON objects
//!
//! This module handles the two reshaping families: extracting a subset of
//! an object's properties into an array, and unflattening delimiter-encoded
//! property names (`config__version`) into nested objects or arrays.
//!
//! Every operation follows the same snapshot-then-apply pattern: decisions
//! are materialized from a read-only pass before any mutation is applied,
//! so a map is never modified while it is being iterated.

pub mod extract;
pub mod types;
pub mod unflatten;

pub use extract::{extract_to_array, extract_to_array_starts_with};
pub use types::{PropertyMigration, ReshapeTarget, DEFAULT_DELIMITER};
pub use unflatten::{unflatten_recursive, unflatten_split_delimiter, unflatten_with};
