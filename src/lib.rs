//! # Anvil - JSON Reshaping Toolkit
//!
//! A unified library for reshaping in-memory JSON trees: path-based node
//! lookup, property extraction into arrays, and unflattening of
//! delimiter-encoded property names into nested structure.
//!
//! ## Modules
//!
//! - **select**: Resolve dot-delimited paths to typed node views
//! - **reshape**: Extract properties to arrays and unflatten flat keys
//!
//! ## Quick Start
//!
//! ### Unflattening
//!
//! ```rust
//! use anvil::reshape::{unflatten_recursive, DEFAULT_DELIMITER};
//! use serde_json::{json, Value};
//!
//! let mut doc = match json!({
//!     "title": "Legend",
//!     "config__version": 3,
//!     "config__address": {"street": "123 Main St"}
//! }) {
//!     Value::Object(map) => map,
//!     _ => unreachable!(),
//! };
//!
//! unflatten_recursive(&mut doc, DEFAULT_DELIMITER);
//!
//! // doc = {"title": "Legend", "config": {"version": 3, "address": {...}}}
//! assert_eq!(doc["config"]["version"], 3);
//! ```
//!
//! ### Path selection
//!
//! ```rust
//! use anvil::select::select_node;
//! use serde_json::{json, Map, Value};
//!
//! let root = json!({"person": {"address": {"city": "New York"}}});
//!
//! let address: Option<&Map<String, Value>> =
//!     select_node(&root, "person.address").unwrap();
//! assert_eq!(address.unwrap().get("city").unwrap(), "New York");
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufRead, Write};

pub mod error;
pub mod reshape;
pub mod select;

// Re-export commonly used types for convenience
pub use error::ReshapeError;
pub use reshape::{
    extract_to_array, extract_to_array_starts_with, unflatten_recursive,
    unflatten_split_delimiter, unflatten_with, PropertyMigration, ReshapeTarget,
    DEFAULT_DELIMITER,
};
pub use select::{select_node, NodeView};

/// Main entry point: unflatten a stream of newline-delimited JSON objects
///
/// Each line is parsed, recursively unflattened with `delimiter`, and
/// written back out as one line. Non-object values pass through unchanged;
/// blank lines are skipped.
pub fn unflatten_stream<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    delimiter: &str,
) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("Failed to read line")?;
        if line.trim().is_empty() {
            continue;
        }

        let mut value: Value = serde_json::from_str(&line)
            .context("Failed to parse JSON")?;

        if let Value::Object(obj) = &mut value {
            unflatten_recursive(obj, delimiter);
        }

        let json = serde_json::to_string(&value)
            .context("Failed to serialize JSON")?;
        writeln!(writer, "{}", json)
            .context("Failed to write line")?;
    }

    Ok(())
}
