//! Path-based node lookup over a JSON tree
//!
//! Paths are dot-delimited, case-sensitive property names. Navigation
//! through arrays is not supported: a path may *end at* an array (request
//! `&Vec<Value>`), but it can never step through one.

use crate::error::{ReshapeError, Result};
use serde_json::{Map, Value};

/// A typed view of a JSON node, used to state what `select_node` should
/// return.
///
/// Implemented for borrowed containers (`&Map<String, Value>`,
/// `&Vec<Value>`), borrowed strings, scalar copies (`bool`, `i64`, `u64`,
/// `f64`), and `&Value` itself for untyped access.
pub trait NodeView<'a>: Sized {
    /// Whether this view names an array node. Only array views may resolve
    /// a path whose final segment lands on an array.
    const EXPECTS_ARRAY: bool = false;

    /// Downcast a node to this view, or `None` on a kind mismatch.
    fn from_node(node: &'a Value) -> Option<Self>;
}

impl<'a> NodeView<'a> for &'a Value {
    fn from_node(node: &'a Value) -> Option<Self> {
        Some(node)
    }
}

impl<'a> NodeView<'a> for &'a Map<String, Value> {
    fn from_node(node: &'a Value) -> Option<Self> {
        node.as_object()
    }
}

impl<'a> NodeView<'a> for &'a Vec<Value> {
    const EXPECTS_ARRAY: bool = true;

    fn from_node(node: &'a Value) -> Option<Self> {
        match node {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl<'a> NodeView<'a> for &'a str {
    fn from_node(node: &'a Value) -> Option<Self> {
        node.as_str()
    }
}

impl<'a> NodeView<'a> for bool {
    fn from_node(node: &'a Value) -> Option<Self> {
        node.as_bool()
    }
}

impl<'a> NodeView<'a> for i64 {
    fn from_node(node: &'a Value) -> Option<Self> {
        node.as_i64()
    }
}

impl<'a> NodeView<'a> for u64 {
    fn from_node(node: &'a Value) -> Option<Self> {
        node.as_u64()
    }
}

impl<'a> NodeView<'a> for f64 {
    fn from_node(node: &'a Value) -> Option<Self> {
        node.as_f64()
    }
}

/// Find a node using a period-delimited, case-sensitive path.
///
/// Returns `Ok(None)` when a segment is missing or the resolved node is not
/// of the requested view type; neither is an error. Fails with
/// [`ReshapeError::ArrayTraversal`] when the path tries to navigate through
/// an array — unless the array is hit at the *final* segment and the
/// requested view is an array, in which case the array itself is returned.
///
/// # Example
/// ```rust
/// use anvil::select::select_node;
/// use serde_json::{json, Map, Value};
///
/// let root = json!({"personOne": {"spouse": {"address": {"city": "New York"}}}});
///
/// let address: Option<&Map<String, Value>> =
///     select_node(&root, "personOne.spouse.address").unwrap();
/// assert_eq!(address.unwrap().get("city").unwrap(), "New York");
///
/// let missing: Option<&Value> = select_node(&root, "personOne.pet").unwrap();
/// assert!(missing.is_none());
/// ```
pub fn select_node<'a, T: NodeView<'a>>(root: &'a Value, path: &str) -> Result<Option<T>> {
    if path.is_empty() {
        return Err(ReshapeError::MissingArgument("path"));
    }

    let segments: Vec<&str> = path.split('.').collect();
    let mut current = root;

    for (idx, segment) in segments.iter().enumerate() {
        match current {
            Value::Object(properties) => match properties.get(*segment) {
                Some(child) => current = child,
                None => return Ok(None),
            },
            Value::Array(_) => {
                // The path may target the array itself, but only at the end
                if idx == segments.len() - 1 && T::EXPECTS_ARRAY {
                    return Ok(T::from_node(current));
                }

                return Err(ReshapeError::ArrayTraversal {
                    segment: (*segment).to_string(),
                    path: path.to_string(),
                });
            }
            // Scalar with segments left to resolve: not found
            _ => return Ok(None),
        }
    }

    Ok(T::from_node(current))
}
