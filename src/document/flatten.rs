//! Flattening of a nested JSON document into addressable leaves.

use serde_json::Value;

/// Reserved top-level key holding feature toggles.
///
/// The subtree under this key is excluded from flattening and handled by
/// [`extract_features`](crate::document::extract_features) instead.
pub const FEATURE_MANAGEMENT: &str = "FeatureManagement";

/// A terminal (childless) node of the configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Separator-joined path from the document root to this node.
    pub path: String,
    /// String rendering of the node's value.
    pub value: String,
}

/// Flatten a parsed document into its leaves.
///
/// Every node with no children produces one [`Leaf`], addressed by the chain of
/// property names and array indices from the root, joined with `separator`. The
/// reserved [`FEATURE_MANAGEMENT`] subtree is excluded entirely. An empty
/// document produces an empty set; a scalar root has no addressable children
/// and also produces an empty set (the root object requirement is enforced at
/// parse time).
///
/// # Examples
///
/// ```rust
/// use appconfig_sync::document::flatten;
///
/// let document = serde_json::json!({"a": {"b": 1, "c": 2}});
/// let leaves = flatten(&document, ':');
///
/// assert_eq!(leaves.len(), 2);
/// assert_eq!(leaves[0].path, "a:b");
/// assert_eq!(leaves[0].value, "1");
/// ```
pub fn flatten(document: &Value, separator: char) -> Vec<Leaf> {
    let mut leaves = Vec::new();
    match document {
        Value::Object(map) => {
            for (key, child) in map {
                if key == FEATURE_MANAGEMENT {
                    continue;
                }
                walk(child, key.clone(), separator, &mut leaves);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(child, index.to_string(), separator, &mut leaves);
            }
        }
        _ => {}
    }
    leaves
}

fn walk(node: &Value, path: String, separator: char, leaves: &mut Vec<Leaf>) {
    match node {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                walk(child, format!("{path}{separator}{key}"), separator, leaves);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                walk(child, format!("{path}{separator}{index}"), separator, leaves);
            }
        }
        // Childless: scalars, and empty containers which flatten to their JSON text.
        other => leaves.push(Leaf {
            path,
            value: render(other),
        }),
    }
}

/// Render a childless node as the string stored in the remote setting.
///
/// Strings are taken verbatim (unquoted), null renders as the empty string, and
/// everything else uses its compact JSON text.
fn render(node: &Value) -> String {
    match node {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_object() {
        let document = json!({"a": {"b": 1, "c": 2}});
        let leaves = flatten(&document, ':');

        assert_eq!(
            leaves,
            vec![
                Leaf {
                    path: "a:b".to_string(),
                    value: "1".to_string()
                },
                Leaf {
                    path: "a:c".to_string(),
                    value: "2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_flatten_custom_separator() {
        let document = json!({"a": {"b": 1}});
        let leaves = flatten(&document, '/');

        assert_eq!(leaves[0].path, "a/b");
    }

    #[test]
    fn test_flatten_array_indices() {
        let document = json!({"servers": ["alpha", "beta"]});
        let leaves = flatten(&document, ':');

        assert_eq!(leaves[0].path, "servers:0");
        assert_eq!(leaves[0].value, "alpha");
        assert_eq!(leaves[1].path, "servers:1");
        assert_eq!(leaves[1].value, "beta");
    }

    #[test]
    fn test_flatten_scalar_rendering() {
        let document = json!({
            "str": "hello",
            "num": 3.5,
            "flag": true,
            "nothing": null
        });
        let leaves = flatten(&document, ':');

        let value_of = |path: &str| {
            leaves
                .iter()
                .find(|l| l.path == path)
                .map(|l| l.value.clone())
                .unwrap()
        };
        assert_eq!(value_of("str"), "hello");
        assert_eq!(value_of("num"), "3.5");
        assert_eq!(value_of("flag"), "true");
        assert_eq!(value_of("nothing"), "");
    }

    #[test]
    fn test_flatten_excludes_feature_management() {
        let document = json!({
            "a": 1,
            "FeatureManagement": {"Beta": true}
        });
        let leaves = flatten(&document, ':');

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].path, "a");
    }

    #[test]
    fn test_flatten_keeps_similarly_named_keys() {
        // Exclusion is by exact top-level key, not path prefix.
        let document = json!({"FeatureManagementX": {"a": 1}});
        let leaves = flatten(&document, ':');

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].path, "FeatureManagementX:a");
    }

    #[test]
    fn test_flatten_empty_document() {
        let document = json!({});
        assert!(flatten(&document, ':').is_empty());
    }

    #[test]
    fn test_flatten_empty_containers_are_leaves() {
        let document = json!({"empty_obj": {}, "empty_arr": []});
        let leaves = flatten(&document, ':');

        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[1].value, "{}");
        assert_eq!(leaves[0].value, "[]");
    }

    #[test]
    fn test_flatten_deep_nesting() {
        let document = json!({"a": {"b": {"c": {"d": "deep"}}}});
        let leaves = flatten(&document, ':');

        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].path, "a:b:c:d");
        assert_eq!(leaves[0].value, "deep");
    }
}
