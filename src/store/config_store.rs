//! Remote configuration store trait.

use crate::error::Result;
use crate::setting::Setting;
use async_trait::async_trait;

/// The store's current state for a given key and label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// No setting exists under the key and label.
    Absent,
    /// A setting exists with the given value and content type.
    Present {
        /// Stored value payload.
        value: String,
        /// Stored content type, absent for plain settings.
        content_type: Option<String>,
    },
}

/// Trait for remote configuration stores.
///
/// Implement this trait to reconcile against stores other than Azure App
/// Configuration (e.g. an in-process fixture in tests). Implementations must be
/// safe for concurrent use: the reconciler issues many get/set round trips at
/// once through a shared reference.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the current setting under `key` and `label`, if any.
    ///
    /// Resolves the exact match for the pair; `None` label addresses the
    /// store's unlabeled entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or replies with an
    /// unexpected status.
    async fn get(&self, key: &str, label: Option<&str>) -> Result<Observation>;

    /// Create or replace the setting unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects or fails the write.
    async fn set(&self, setting: &Setting) -> Result<()>;

    /// Get a human-readable name for this store (for logging/debugging).
    fn name(&self) -> String;
}
