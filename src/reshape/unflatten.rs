//! Delimiter-driven unflattening of flat property names into nested
//! structure
//!
//! The engine turns properties like `config__version` into a nested
//! `config` object (or array) on a target parent, driven by a classifier
//! that decides per property whether and how it participates.

use crate::reshape::types::{PropertyMigration, ReshapeTarget};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Move properties from `source` into containers on `target`, as directed
/// by `classify`.
///
/// The pass runs in three phases:
///
/// 1. **Snapshot**: every property is offered to `classify` once; the
///    resulting migration records (with cloned values) are frozen before
///    any mutation, so the pass is safe even when the target is the source
///    itself.
/// 2. **Apply**: records are applied in snapshot order. A container is an
///    array if *any* record targeting it is array-flagged — one array
///    sibling promotes the whole container, and every record headed there
///    lands in the array (source arrays are spliced element by element,
///    everything else is appended whole). Otherwise the container is an
///    object and the record's value is written under its field name;
///    records without a field name are skipped silently. Containers are
///    created lazily, replacing any non-matching value already in the slot.
/// 3. **Removal**: when `remove_source_property` is set, every snapshotted
///    key is deleted from `source` after all insertions.
///
/// Returns `true` if the classifier selected at least one property.
///
/// # Example
/// ```rust
/// use anvil::reshape::{unflatten_with, PropertyMigration, ReshapeTarget};
/// use serde_json::{json, Value};
///
/// let mut source = match json!({"title": "T", "config__version": 3}) {
///     Value::Object(map) => map,
///     _ => unreachable!(),
/// };
///
/// let changed = unflatten_with(&mut source, true, ReshapeTarget::InPlace, |key, value| {
///     let (container, field) = key.split_once("__")?;
///     Some(PropertyMigration::new(key, container, Some(field.to_string()), value.is_array()))
/// });
///
/// assert!(changed);
/// assert_eq!(source.get("config").unwrap()["version"], 3);
/// assert!(!source.contains_key("config__version"));
/// ```
pub fn unflatten_with<F>(
    source: &mut Map<String, Value>,
    remove_source_property: bool,
    target: ReshapeTarget<'_>,
    mut classify: F,
) -> bool
where
    F: FnMut(&str, &Value) -> Option<PropertyMigration>,
{
    // Snapshot phase: freeze every decision (and clone the values) before
    // touching either map
    let mut migrations: Vec<(PropertyMigration, Value)> = Vec::new();

    for (key, value) in source.iter() {
        if let Some(migration) = classify(key, value) {
            migrations.push((migration, value.clone()));
        }
    }

    if migrations.is_empty() {
        return false;
    }

    // A single array-flagged sibling promotes its container to an array for
    // the whole batch
    let array_containers: HashSet<String> = migrations
        .iter()
        .filter(|(migration, _)| migration.is_array)
        .map(|(migration, _)| migration.container.clone())
        .collect();

    let keys_to_remove: Vec<String> = if remove_source_property {
        migrations
            .iter()
            .map(|(migration, _)| migration.source_key.clone())
            .collect()
    } else {
        Vec::new()
    };

    {
        let target_map: &mut Map<String, Value> = match target {
            ReshapeTarget::InPlace => &mut *source,
            ReshapeTarget::Parent(parent) => parent,
        };

        for (migration, value) in migrations {
            if array_containers.contains(&migration.container) {
                let items = array_slot(target_map, &migration.container);

                if migration.is_array {
                    // Splice the source array's elements, preserving order
                    if let Value::Array(elements) = value {
                        items.extend(elements);
                    }
                } else {
                    items.push(value);
                }
            } else if let Some(field) = migration.field {
                let fields = object_slot(target_map, &migration.container);
                fields.insert(field, value);
            }
            // Object-designated records without a field name are a no-op
        }
    }

    // Removal runs strictly after all insertions
    for key in &keys_to_remove {
        source.remove(key);
    }

    true
}

/// Unflatten properties whose names split into exactly two parts on
/// `delimiter`.
///
/// Part 0 names the container, part 1 names the field, and array-valued
/// properties mark their container as an array. Keys producing zero, one,
/// or three-or-more parts are ignored — `a__b__c` does not participate at
/// all. An empty delimiter is a no-op.
///
/// # Example
/// ```rust
/// use anvil::reshape::{unflatten_split_delimiter, ReshapeTarget, DEFAULT_DELIMITER};
/// use serde_json::{json, Value};
///
/// let mut source = match json!({
///     "title": "Eternal Sunshine of a Spotless Mind",
///     "config__version": 3,
///     "config__address": {"street": "123 Main St"}
/// }) {
///     Value::Object(map) => map,
///     _ => unreachable!(),
/// };
///
/// unflatten_split_delimiter(&mut source, true, ReshapeTarget::InPlace, DEFAULT_DELIMITER);
///
/// assert_eq!(source.get("config").unwrap()["version"], 3);
/// assert_eq!(source.get("config").unwrap()["address"]["street"], "123 Main St");
/// assert!(!source.contains_key("config__version"));
/// ```
pub fn unflatten_split_delimiter(
    source: &mut Map<String, Value>,
    remove_source_property: bool,
    target: ReshapeTarget<'_>,
    delimiter: &str,
) -> bool {
    if delimiter.is_empty() {
        return false;
    }

    unflatten_with(source, remove_source_property, target, |key, value| {
        let parts: Vec<&str> = key.split(delimiter).collect();
        if parts.len() != 2 {
            return None;
        }

        Some(PropertyMigration::new(
            key,
            parts[0],
            Some(parts[1].to_string()),
            value.is_array(),
        ))
    })
}

/// Unflatten `source` in place, then recurse into every remaining
/// Object-valued property, depth-first, with the same delimiter.
///
/// Matched source properties are always removed, regardless of caller
/// intent, so the recursive walk never reprocesses an already-migrated key.
/// Array elements are deliberately **not** recursed into: only Object
/// children are unflattened. Running this on an already-normalized tree is
/// a no-op.
///
/// # Example
/// ```rust
/// use anvil::reshape::{unflatten_recursive, DEFAULT_DELIMITER};
/// use serde_json::{json, Value};
///
/// let mut source = match json!({
///     "name": "Bob Marley",
///     "birth__date": "1945-02-06",
///     "birth__place": {"city": "Nine Mile", "country": "Jamaica"}
/// }) {
///     Value::Object(map) => map,
///     _ => unreachable!(),
/// };
///
/// unflatten_recursive(&mut source, DEFAULT_DELIMITER);
///
/// assert_eq!(source.get("birth").unwrap()["date"], "1945-02-06");
/// assert_eq!(source.get("birth").unwrap()["place"]["city"], "Nine Mile");
/// ```
pub fn unflatten_recursive(source: &mut Map<String, Value>, delimiter: &str) {
    // Removal is forced so the walk below never sees a migrated key twice
    unflatten_split_delimiter(source, true, ReshapeTarget::InPlace, delimiter);

    for (_, value) in source.iter_mut() {
        if let Value::Object(child) = value {
            unflatten_recursive(child, delimiter);
        }
    }
}

/// Fetch the array at `parent[key]`, creating one (and replacing any
/// non-array value in the slot) if needed.
fn array_slot<'a>(parent: &'a mut Map<String, Value>, key: &str) -> &'a mut Vec<Value> {
    let slot = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));

    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }

    match slot {
        Value::Array(items) => items,
        _ => unreachable!(),
    }
}

/// Fetch the object at `parent[key]`, creating one (and replacing any
/// non-object value in the slot) if needed.
fn object_slot<'a>(parent: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }

    match slot {
        Value::Object(fields) => fields,
        _ => unreachable!(),
    }
}
