//! Reconciliation of desired settings against the remote store.

use crate::document::{classify, extract_features, flatten};
use crate::error::{Result, SyncError};
use crate::setting::Setting;
use crate::store::ConfigStore;
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

/// The full set of settings one run intends the store to hold.
///
/// Built once from the parsed document and immutable afterwards. Leaves come
/// first in document order, followed by the feature flags; order carries no
/// meaning downstream since reconciliation is per-key.
#[derive(Debug)]
pub struct SyncPlan {
    settings: Vec<Setting>,
}

impl SyncPlan {
    /// Build the desired settings from a parsed document.
    ///
    /// Flattens the document with `separator`, classifies secret references,
    /// extracts feature flags from the reserved subtree, and stamps every
    /// setting with the run's `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the feature-management subtree contains a
    /// non-boolean value.
    pub fn build(document: &Value, separator: char, label: Option<&str>) -> Result<Self> {
        let mut settings = Vec::new();

        for leaf in flatten(document, separator) {
            let classified = classify(leaf, separator);
            settings.push(Setting::from_leaf(&classified, label));
        }
        for feature in extract_features(document)? {
            settings.push(Setting::feature_flag(&feature, label));
        }

        Ok(Self { settings })
    }

    /// The settings to reconcile.
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Number of settings in the plan.
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Whether the plan holds no settings.
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

/// A reconciliation failure attributed to its setting key.
#[derive(Debug)]
pub struct KeyFailure {
    /// Key of the setting whose get or set failed.
    pub key: String,
    /// The underlying error.
    pub error: SyncError,
}

/// Result of one reconciliation run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// `(key, value)` per setting written this run, in plan order.
    pub written: Vec<(String, String)>,
    /// Number of settings that were already in sync.
    pub skipped: usize,
    /// Per-key failures.
    pub failures: Vec<KeyFailure>,
}

impl SyncReport {
    /// Whether every setting reconciled without error.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Outcome {
    Written,
    Skipped,
}

/// Reconcile every setting against the store, concurrently.
///
/// Each setting is handled independently: the store is queried for the current
/// entry under the setting's key and label, and a write is issued only when the
/// value or content type differs. All units run to completion even when some
/// fail — a failure is attributed to its key in the returned report and never
/// suppresses sibling results.
pub async fn reconcile(store: &dyn ConfigStore, settings: &[Setting]) -> SyncReport {
    debug!(store = %store.name(), count = settings.len(), "reconciling settings");

    let units = settings.iter().map(|setting| reconcile_one(store, setting));
    let results = join_all(units).await;

    let mut report = SyncReport::default();
    for (setting, result) in settings.iter().zip(results) {
        match result {
            Ok(Outcome::Written) => report
                .written
                .push((setting.key.clone(), setting.value.clone())),
            Ok(Outcome::Skipped) => report.skipped += 1,
            Err(error) => {
                warn!(key = %setting.key, %error, "reconciliation failed");
                report.failures.push(KeyFailure {
                    key: setting.key.clone(),
                    error,
                });
            }
        }
    }
    report
}

/// Query-then-conditional-write for a single setting.
async fn reconcile_one(store: &dyn ConfigStore, setting: &Setting) -> Result<Outcome> {
    let observation = store.get(&setting.key, setting.label.as_deref()).await?;
    if setting.matches(&observation) {
        debug!(key = %setting.key, "already in sync");
        return Ok(Outcome::Skipped);
    }

    // Unconditional upsert; a concurrent external writer between the read and
    // this write is overwritten (last write wins).
    store.set(setting).await?;
    debug!(key = %setting.key, "written");
    Ok(Outcome::Written)
}
