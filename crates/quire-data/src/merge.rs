//! Deep merge of data trees.

use serde_json::Value;

/// Merge `overlay` on top of `base`.
///
/// Precedence rules:
/// - objects merge key by key, recursively; new keys are appended after the
///   keys already present in `base`
/// - arrays are replaced wholesale, never concatenated
/// - any other conflict takes the `overlay` value
#[must_use]
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let previous = slot.take();
                        *slot = deep_merge(previous, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_merge_local_scalar_wins() {
        let merged = deep_merge(json!({"a": 1, "b": 2}), json!({"b": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn test_merge_nested_objects() {
        let global = json!({"tags": {"h1": {"bitmap": {"id": "bitm"}}}});
        let local = json!({"tags": {"h1": {"model": {"id": "mode"}}}});
        let merged = deep_merge(global, local);
        assert_eq!(
            merged,
            json!({"tags": {"h1": {"bitmap": {"id": "bitm"}, "model": {"id": "mode"}}}})
        );
    }

    #[test]
    fn test_merge_arrays_replace() {
        let merged = deep_merge(json!({"list": [1, 2, 3]}), json!({"list": [4]}));
        assert_eq!(merged, json!({"list": [4]}));
    }

    #[test]
    fn test_merge_object_replaced_by_scalar() {
        let merged = deep_merge(json!({"a": {"b": 1}}), json!({"a": "flat"}));
        assert_eq!(merged, json!({"a": "flat"}));
    }

    #[test]
    fn test_merge_preserves_key_order() {
        let merged = deep_merge(json!({"z": 1, "a": 2}), json!({"z": 3, "m": 4}));
        let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_merge_null_overlay_wins() {
        let merged = deep_merge(json!({"a": 1}), json!({"a": null}));
        assert_eq!(merged, json!({"a": null}));
    }
}
