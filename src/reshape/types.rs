use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default delimiter between container and field in flattened property
/// names. Double underscore, matching how AKS-style environment variables
/// encode nesting levels.
pub const DEFAULT_DELIMITER: &str = "__";

/// One candidate property move computed during an unflatten pass
///
/// Migrations are ephemeral: a classifier produces them during the snapshot
/// phase of a single pass and they are discarded once the pass completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyMigration {
    /// The property name on the source object
    pub source_key: String,

    /// The name of the container (object or array) created on the target
    pub container: String,

    /// The field name created on an object container; ignored for array
    /// containers, and a record without one is skipped silently
    pub field: Option<String>,

    /// Whether the source value is itself an array
    pub is_array: bool,
}

impl PropertyMigration {
    pub fn new(
        source_key: impl Into<String>,
        container: impl Into<String>,
        field: Option<String>,
        is_array: bool,
    ) -> Self {
        PropertyMigration {
            source_key: source_key.into(),
            container: container.into(),
            field,
            is_array,
        }
    }
}

/// Where migrated properties land
///
/// The reference semantics allow the source object to double as its own
/// target parent; `InPlace` expresses that without aliasing two mutable
/// borrows of the same map.
#[derive(Debug)]
pub enum ReshapeTarget<'a> {
    /// Create containers on the source object itself
    InPlace,
    /// Create containers on a separate parent object
    Parent(&'a mut Map<String, Value>),
}
