//! Feature-flag extraction from the reserved subtree.

use crate::document::FEATURE_MANAGEMENT;
use crate::error::{Result, SyncError};
use serde_json::Value;

/// A named boolean toggle declared under the feature-management subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Feature name, as declared in the document.
    pub name: String,
    /// Whether the feature is enabled.
    pub enabled: bool,
}

/// Extract the features declared under the reserved [`FEATURE_MANAGEMENT`] key.
///
/// Each direct child of the subtree becomes one [`Feature`]. A document without
/// the reserved key yields an empty set. A non-boolean child value fails the
/// run with an error naming the offending key.
///
/// # Errors
///
/// Returns [`SyncError::FeatureError`] when the subtree is not an object or a
/// child value is not a boolean.
pub fn extract_features(document: &Value) -> Result<Vec<Feature>> {
    let Some(subtree) = document.get(FEATURE_MANAGEMENT) else {
        return Ok(Vec::new());
    };

    let Some(map) = subtree.as_object() else {
        return Err(SyncError::FeatureError {
            key: FEATURE_MANAGEMENT.to_string(),
            reason: "expected an object of boolean toggles".to_string(),
        });
    };

    let mut features = Vec::with_capacity(map.len());
    for (name, value) in map {
        match value.as_bool() {
            Some(enabled) => features.push(Feature {
                name: name.clone(),
                enabled,
            }),
            None => {
                return Err(SyncError::FeatureError {
                    key: name.clone(),
                    reason: format!("expected a boolean, got {value}"),
                });
            }
        }
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_features() {
        let document = json!({"FeatureManagement": {"Beta": true, "Alpha": false}});
        let features = extract_features(&document).unwrap();

        assert!(features.contains(&Feature {
            name: "Beta".to_string(),
            enabled: true
        }));
        assert!(features.contains(&Feature {
            name: "Alpha".to_string(),
            enabled: false
        }));
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn test_missing_subtree_is_empty() {
        let document = json!({"a": 1});
        assert!(extract_features(&document).unwrap().is_empty());
    }

    #[test]
    fn test_non_boolean_value_fails() {
        let document = json!({"FeatureManagement": {"Beta": "yes"}});
        let err = extract_features(&document).unwrap_err();

        assert!(err.to_string().contains("Beta"));
    }

    #[test]
    fn test_non_object_subtree_fails() {
        let document = json!({"FeatureManagement": [true, false]});
        assert!(extract_features(&document).is_err());
    }

    #[test]
    fn test_empty_subtree() {
        let document = json!({"FeatureManagement": {}});
        assert!(extract_features(&document).unwrap().is_empty());
    }
}
