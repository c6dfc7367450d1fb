//! Property extraction into arrays

use serde_json::{Map, Value};

/// Deep-clone every property whose value is non-null and satisfies
/// `predicate` into a new array, preserving source iteration order.
///
/// When `remove_source_property` is set, the originating properties are
/// deleted from `source` — only after the full scan completes, so the map
/// is never mutated while being iterated. With the flag off, `source` is
/// never mutated.
///
/// # Example
/// ```rust
/// use anvil::reshape::extract_to_array;
/// use serde_json::{json, Value};
///
/// let mut source = match json!({
///     "personOne": {"name": "Alice"},
///     "personTwo": {"name": "Bob"},
///     "city": "New York"
/// }) {
///     Value::Object(map) => map,
///     _ => unreachable!(),
/// };
///
/// let people = extract_to_array(&mut source, true, |key, _| key.starts_with("person"));
///
/// assert_eq!(people.len(), 2);
/// assert!(!source.contains_key("personOne"));
/// assert!(source.contains_key("city"));
/// ```
pub fn extract_to_array<F>(
    source: &mut Map<String, Value>,
    remove_source_property: bool,
    mut predicate: F,
) -> Vec<Value>
where
    F: FnMut(&str, &Value) -> bool,
{
    let mut results = Vec::new();
    let mut keys_to_remove = Vec::new();

    for (key, value) in source.iter() {
        if !value.is_null() && predicate(key, value) {
            results.push(value.clone());

            if remove_source_property {
                keys_to_remove.push(key.clone());
            }
        }
    }

    // Remove after the scan, never while iterating
    for key in &keys_to_remove {
        source.remove(key);
    }

    results
}

/// Deep-clone every property whose name starts with `starts_with` into a
/// new array.
///
/// An empty prefix returns an empty array immediately without scanning.
/// The case-insensitive comparison is ordinal (ASCII case folding).
pub fn extract_to_array_starts_with(
    source: &mut Map<String, Value>,
    remove_source_property: bool,
    starts_with: &str,
    case_sensitive: bool,
) -> Vec<Value> {
    if starts_with.is_empty() {
        return Vec::new();
    }

    if case_sensitive {
        extract_to_array(source, remove_source_property, |key, _| {
            key.starts_with(starts_with)
        })
    } else {
        extract_to_array(source, remove_source_property, |key, _| {
            starts_with_ignore_ascii_case(key, starts_with)
        })
    }
}

fn starts_with_ignore_ascii_case(key: &str, prefix: &str) -> bool {
    key.len() >= prefix.len()
        && key.is_char_boundary(prefix.len())
        && key[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_people() -> Map<String, Value> {
        let value = json!({
            "personOne": {
                "name": "Alice",
                "age": 30,
                "city": "New York",
                "spouse": {
                    "name": "John",
                    "age": 32,
                    "favoriteColors": ["blue", "green"],
                    "address": {
                        "street": "123 Main St",
                        "city": "New York",
                        "zip": "10001"
                    }
                }
            },
            "personTwo": {"name": "Bob", "age": 25, "city": "Los Angeles"},
            "perSONThree": {"name": "James"},
            "musicians": [
                {"name": "John Doe"},
                {"name": "Jane Smith"}
            ]
        });

        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn names_of(items: &[Value]) -> Vec<&str> {
        items
            .iter()
            .filter_map(|item| item.get("name").and_then(Value::as_str))
            .collect()
    }

    #[test]
    fn test_starts_with_case_sensitive() {
        let mut source = sample_people();

        let actual = extract_to_array_starts_with(&mut source, true, "perSON", true);

        assert_eq!(actual.len(), 1);
        assert_eq!(names_of(&actual), vec!["James"]);

        assert!(!source.contains_key("perSONThree"));
        assert!(source.contains_key("personOne"));
        assert!(source.contains_key("personTwo"));
    }

    #[test]
    fn test_starts_with_case_insensitive() {
        let mut source = sample_people();

        let actual = extract_to_array_starts_with(&mut source, true, "perSON", false);

        assert_eq!(actual.len(), 3);
        let names = names_of(&actual);
        assert!(names.contains(&"Alice"));
        assert!(names.contains(&"Bob"));
        assert!(names.contains(&"James"));

        assert!(!source.contains_key("personOne"));
        assert!(!source.contains_key("personTwo"));
        assert!(!source.contains_key("perSONThree"));
    }

    #[test]
    fn test_source_untouched_when_removal_is_off() {
        let mut source = sample_people();
        let before = source.clone();

        let first = extract_to_array_starts_with(&mut source, false, "perSON", false);
        let second = extract_to_array_starts_with(&mut source, false, "perSON", false);

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(source, before);
    }

    #[test]
    fn test_array_valued_property_is_extracted_whole() {
        let mut source = sample_people();

        let actual = extract_to_array_starts_with(&mut source, false, "musicians", false);

        // The array property itself becomes the single extracted item
        assert_eq!(actual.len(), 1);
        let musicians = actual[0].as_array().unwrap();
        assert_eq!(names_of(musicians), vec!["John Doe", "Jane Smith"]);
        assert!(source.contains_key("musicians"));
    }

    #[test]
    fn test_empty_prefix_returns_empty_without_scanning() {
        let mut source = sample_people();
        let before = source.clone();

        let actual = extract_to_array_starts_with(&mut source, true, "", false);

        assert!(actual.is_empty());
        assert_eq!(source, before);
    }

    #[test]
    fn test_null_values_are_skipped() {
        let mut source = match json!({"keepA": 1, "keepB": null}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let actual = extract_to_array(&mut source, true, |key, _| key.starts_with("keep"));

        assert_eq!(actual, vec![json!(1)]);
        assert!(source.contains_key("keepB"));
        assert!(!source.contains_key("keepA"));
    }

    #[test]
    fn test_extraction_preserves_source_order() {
        let mut source = match json!({"b": 2, "a": 1, "c": 3}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let actual = extract_to_array(&mut source, false, |_, _| true);

        assert_eq!(actual, vec![json!(2), json!(1), json!(3)]);
    }

    #[test]
    fn test_extracted_values_are_independent_clones() {
        let mut source = sample_people();

        let mut actual = extract_to_array_starts_with(&mut source, false, "personO", true);

        // Deep structure came across intact
        let person = actual[0].as_object().unwrap();
        assert_eq!(person.get("name").unwrap(), "Alice");
        let spouse = person.get("spouse").unwrap().as_object().unwrap();
        assert_eq!(spouse.get("name").unwrap(), "John");
        let colors = spouse.get("favoriteColors").unwrap().as_array().unwrap();
        assert_eq!(colors.len(), 2);
        let address = spouse.get("address").unwrap().as_object().unwrap();
        assert_eq!(address.get("street").unwrap(), "123 Main St");

        // Mutating the clone never reaches the source
        actual[0]["spouse"]["name"] = json!("Johnny");
        let original_spouse = &source["personOne"]["spouse"];
        assert_eq!(original_spouse["name"], "John");
    }
}
