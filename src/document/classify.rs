//! Secret-reference classification of flattened leaves.

use crate::document::Leaf;
use regex::Regex;
use std::sync::LazyLock;

/// Final path segment marking a candidate secret reference.
const SECRET_SEGMENT: &str = "uri";

/// Values must point at a Key Vault host to count as a secret reference.
static VAULT_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://.+\.vault\.azure\.net").expect("vault URI pattern is valid")
});

/// A leaf with its setting category resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLeaf {
    /// Store key the leaf will be written under.
    pub key: String,
    /// Raw leaf value.
    pub value: String,
    /// Whether the value is a Key Vault secret reference.
    pub is_secret_reference: bool,
}

/// Classify a leaf as a secret reference or plain configuration.
///
/// A leaf is a secret reference iff its final path segment is literally `uri`
/// (case-sensitive) and its value matches `^https://.+\.vault\.azure\.net`. When
/// both hold, the trailing `<separator>uri` is stripped from the path to form
/// the store key. A `uri` segment with a non-vault value stays plain — the
/// suffix alone never triggers classification, so an `https://example.com/...`
/// value keeps its full path.
pub fn classify(leaf: Leaf, separator: char) -> ClassifiedLeaf {
    let suffix = format!("{separator}{SECRET_SEGMENT}");
    let is_secret = leaf.path.ends_with(&suffix) && VAULT_URI.is_match(&leaf.value);
    let key = if is_secret {
        leaf.path[..leaf.path.len() - suffix.len()].to_string()
    } else {
        leaf.path
    };

    ClassifiedLeaf {
        key,
        value: leaf.value,
        is_secret_reference: is_secret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: &str, value: &str) -> Leaf {
        Leaf {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_vault_uri_is_secret_reference() {
        let classified = classify(
            leaf("db:uri", "https://myvault.vault.azure.net/secrets/x"),
            ':',
        );

        assert!(classified.is_secret_reference);
        assert_eq!(classified.key, "db");
        assert_eq!(classified.value, "https://myvault.vault.azure.net/secrets/x");
    }

    #[test]
    fn test_non_vault_uri_stays_plain() {
        let classified = classify(leaf("db:uri", "https://example.com/x"), ':');

        assert!(!classified.is_secret_reference);
        assert_eq!(classified.key, "db:uri");
    }

    #[test]
    fn test_suffix_required() {
        // A vault URI under any other segment name is plain.
        let classified = classify(
            leaf("db:endpoint", "https://myvault.vault.azure.net/secrets/x"),
            ':',
        );

        assert!(!classified.is_secret_reference);
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        let classified = classify(
            leaf("db:Uri", "https://myvault.vault.azure.net/secrets/x"),
            ':',
        );

        assert!(!classified.is_secret_reference);
        assert_eq!(classified.key, "db:Uri");
    }

    #[test]
    fn test_top_level_uri_segment_stays_plain() {
        // No preceding separator, so there is nothing to strip.
        let classified = classify(
            leaf("uri", "https://myvault.vault.azure.net/secrets/x"),
            ':',
        );

        assert!(!classified.is_secret_reference);
        assert_eq!(classified.key, "uri");
    }

    #[test]
    fn test_custom_separator() {
        let classified = classify(
            leaf("db/uri", "https://myvault.vault.azure.net/secrets/x"),
            '/',
        );

        assert!(classified.is_secret_reference);
        assert_eq!(classified.key, "db");
    }

    #[test]
    fn test_plain_http_scheme_rejected() {
        let classified = classify(leaf("db:uri", "http://myvault.vault.azure.net/x"), ':');

        assert!(!classified.is_secret_reference);
    }
}
