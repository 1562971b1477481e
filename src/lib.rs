//! # appconfig-sync
//!
//! Sync hierarchical JSON configuration into Azure App Configuration with minimal writes.
//!
//! ## Overview
//!
//! `appconfig-sync` reads a nested JSON configuration document, flattens it into a
//! set of store settings, and reconciles an Azure App Configuration instance to
//! match — writing only the settings that differ:
//!
//! - Leaves become plain key-value settings, paths joined with a configurable separator
//! - Leaves ending in `.uri` whose value points at a Key Vault host become secret references
//! - Entries under the reserved `FeatureManagement` subtree become feature flags
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use appconfig_sync::prelude::*;
//! use appconfig_sync::store::AppConfigClient;
//!
//! # async fn example() -> appconfig_sync::error::Result<()> {
//! let document: serde_json::Value = serde_json::from_str(r#"
//!     {
//!         "database": { "host": "localhost", "port": 5432 },
//!         "FeatureManagement": { "Beta": true }
//!     }
//! "#)?;
//!
//! let plan = SyncPlan::build(&document, ':', Some("production"))?;
//! let store = AppConfigClient::from_connection_string(
//!     "Endpoint=https://example.azconfig.io;Id=abc;Secret=c2VjcmV0",
//! )?;
//!
//! let report = reconcile(&store, plan.settings()).await;
//! for (key, value) in &report.written {
//!     println!("{key} -> {value}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Reconciliation
//!
//! Every setting is reconciled independently and concurrently: the store is queried
//! for the current value under the same key and label, and a write is issued only
//! when the value or content type differs. Re-running against an in-sync store
//! issues zero writes. Settings absent from the document are never deleted, and no
//! optimistic-concurrency token is used (last write wins).

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod reconcile;
pub mod setting;
pub mod store;

mod cli;

pub use cli::Options;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::error::{Result, SyncError};
    pub use crate::reconcile::{SyncPlan, SyncReport, reconcile};
    pub use crate::setting::Setting;
    pub use crate::store::{ConfigStore, Observation};
}
