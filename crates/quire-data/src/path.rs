//! Path lookup into the data tree.

use serde_json::Value;

/// Split a path into its keys.
///
/// Both `.` and `/` act as separators and empty segments are dropped, so
/// `"tags.h1/bitmap"` and `"tags/h1/bitmap/"` both yield
/// `["tags", "h1", "bitmap"]`.
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(['.', '/']).filter(|s| !s.is_empty()).collect()
}

/// Last key of a path, or the whole path when it has no separators.
///
/// # Examples
///
/// ```
/// use quire_data::last_segment;
///
/// assert_eq!(last_segment("tools/h1"), "h1");
/// assert_eq!(last_segment("tags"), "tags");
/// ```
#[must_use]
pub fn last_segment(path: &str) -> &str {
    split_path(path).last().copied().unwrap_or(path)
}

/// Walk `keys` from `root`.
///
/// Objects are indexed by key, arrays by a numeric key. Any other step
/// yields `None`; a missing path is never an error.
pub fn get_path<'a, S: AsRef<str>>(root: &'a Value, keys: &[S]) -> Option<&'a Value> {
    keys.iter().try_fold(root, |node, key| {
        let key = key.as_ref();
        match node {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

/// Look up a delimited path (see [`split_path`]).
#[must_use]
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    get_path(root, &split_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_split_path_mixed_separators() {
        assert_eq!(split_path("tags.h1/bitmap"), vec!["tags", "h1", "bitmap"]);
        assert_eq!(split_path("/a//b/"), vec!["a", "b"]);
        assert!(split_path("").is_empty());
    }

    #[test]
    fn test_lookup_nested_object() {
        let data = json!({"tags": {"h1": {"bitmap": {"id": "bitm"}}}});
        assert_eq!(lookup(&data, "tags/h1/bitmap/id"), Some(&json!("bitm")));
    }

    #[test]
    fn test_lookup_array_index() {
        let data = json!({"rows": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(lookup(&data, "rows.1.name"), Some(&json!("b")));
        assert_eq!(lookup(&data, "rows.x.name"), None);
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let data = json!({"a": 1});
        assert_eq!(lookup(&data, "a.b"), None);
        assert_eq!(lookup(&data, "z"), None);
    }

    #[test]
    fn test_lookup_empty_path_is_root() {
        let data = json!({"a": 1});
        assert_eq!(lookup(&data, ""), Some(&data));
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("a.b.c"), "c");
        assert_eq!(last_segment("a/b/"), "b");
    }
}
