//! The canonical setting record exchanged with the remote store.

use crate::document::{ClassifiedLeaf, Feature};
use crate::store::Observation;
use serde_json::json;

/// Content type marking a Key Vault secret reference.
pub const SECRET_REFERENCE_CONTENT_TYPE: &str =
    "application/vnd.microsoft.appconfig.keyvaultref+json;charset=utf-8";

/// Content type marking a feature flag.
pub const FEATURE_FLAG_CONTENT_TYPE: &str =
    "application/vnd.microsoft.appconfig.ff+json;charset=utf-8";

/// Key prefix under which App Configuration stores feature flags.
pub const FEATURE_FLAG_KEY_PREFIX: &str = ".appconfig.featureflag/";

/// The canonical unit written to the remote store.
///
/// Settings are constructed by the category builders below and never mutated
/// afterwards. Plain settings carry no content type; secret references and
/// feature flags carry a JSON payload under their respective media types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Store key.
    pub key: String,
    /// Value payload.
    pub value: String,
    /// Media type of the payload, absent for plain settings.
    pub content_type: Option<String>,
    /// Label applied to the setting, when the run has one.
    pub label: Option<String>,
}

impl Setting {
    /// Build a plain configuration setting from a classified leaf.
    pub fn plain(leaf: &ClassifiedLeaf, label: Option<&str>) -> Self {
        Self {
            key: leaf.key.clone(),
            value: leaf.value.clone(),
            content_type: None,
            label: label.map(str::to_string),
        }
    }

    /// Build a Key Vault secret-reference setting.
    ///
    /// The leaf's key already has the `uri` segment stripped; the raw vault URI
    /// is wrapped in the `{"uri": ...}` payload the store expects.
    pub fn secret_reference(leaf: &ClassifiedLeaf, label: Option<&str>) -> Self {
        Self {
            key: leaf.key.clone(),
            value: json!({ "uri": leaf.value }).to_string(),
            content_type: Some(SECRET_REFERENCE_CONTENT_TYPE.to_string()),
            label: label.map(str::to_string),
        }
    }

    /// Build a feature-flag setting under the `.appconfig.featureflag/` prefix.
    pub fn feature_flag(feature: &Feature, label: Option<&str>) -> Self {
        let payload = json!({
            "id": feature.name,
            "description": "",
            "enabled": feature.enabled,
            "conditions": { "client_filters": [] }
        });

        Self {
            key: format!("{FEATURE_FLAG_KEY_PREFIX}{}", feature.name),
            value: payload.to_string(),
            content_type: Some(FEATURE_FLAG_CONTENT_TYPE.to_string()),
            label: label.map(str::to_string),
        }
    }

    /// Build the setting for a classified leaf, picking the category from its
    /// classification.
    pub fn from_leaf(leaf: &ClassifiedLeaf, label: Option<&str>) -> Self {
        if leaf.is_secret_reference {
            Self::secret_reference(leaf, label)
        } else {
            Self::plain(leaf, label)
        }
    }

    /// Whether the observed remote state already matches this setting.
    ///
    /// Content types must be equal. JSON payloads (secret references and
    /// feature flags) are compared as parsed values, so key-order differences
    /// in the stored form never count as a mismatch; plain values compare as
    /// strings. An absent observation never matches.
    pub fn matches(&self, observation: &Observation) -> bool {
        let Observation::Present {
            value,
            content_type,
        } = observation
        else {
            return false;
        };

        if content_type.as_deref() != self.content_type.as_deref() {
            return false;
        }

        if self.has_json_payload() {
            match (
                serde_json::from_str::<serde_json::Value>(&self.value),
                serde_json::from_str::<serde_json::Value>(value),
            ) {
                (Ok(desired), Ok(current)) => desired == current,
                // Unparsable stored payload: fall back to string equality.
                _ => self.value == *value,
            }
        } else {
            self.value == *value
        }
    }

    fn has_json_payload(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct == SECRET_REFERENCE_CONTENT_TYPE || ct == FEATURE_FLAG_CONTENT_TYPE)
    }
}
