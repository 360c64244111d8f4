//! Dotted-path lookup into configuration payloads.
//!
//! Configuration blobs are nested JSON mappings. History projection
//! addresses values inside them with dot-separated paths ("roi.x",
//! "trigger.delay"), resolved best-effort: a path that does not exist is
//! simply absent, never an error.

use serde_json::Value;

/// Resolve a dotted path inside a JSON value.
///
/// Each path component descends one level into an object. Returns `None` if
/// any component is missing or if a non-final component is not an object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use hutchdb_types::path::get;
///
/// let config = json!({"roi": {"x": 10, "y": 20}, "gain": 5});
/// assert_eq!(get(&config, "gain"), Some(&json!(5)));
/// assert_eq!(get(&config, "roi.x"), Some(&json!(10)));
/// assert_eq!(get(&config, "roi.z"), None);
/// ```
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for component in path.split('.') {
        current = current.as_object()?.get(component)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_lookup() {
        let v = json!({"gain": 5});
        assert_eq!(get(&v, "gain"), Some(&json!(5)));
    }

    #[test]
    fn nested_lookup() {
        let v = json!({"a": {"b": {"c": true}}});
        assert_eq!(get(&v, "a.b.c"), Some(&json!(true)));
        assert_eq!(get(&v, "a.b"), Some(&json!({"c": true})));
    }

    #[test]
    fn missing_component_is_none() {
        let v = json!({"a": {"b": 1}});
        assert_eq!(get(&v, "a.c"), None);
        assert_eq!(get(&v, "x"), None);
    }

    #[test]
    fn descending_into_a_leaf_is_none() {
        let v = json!({"a": 1});
        assert_eq!(get(&v, "a.b"), None);
    }

    #[test]
    fn array_values_are_returned_whole() {
        let v = json!({"shape": [512, 512]});
        assert_eq!(get(&v, "shape"), Some(&json!([512, 512])));
        // Paths do not index into arrays.
        assert_eq!(get(&v, "shape.0"), None);
    }
}
