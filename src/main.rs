//! appconfig-sync CLI - import a JSON configuration document into Azure App Configuration.

use appconfig_sync::Options;
use appconfig_sync::prelude::*;
use appconfig_sync::store::AppConfigClient;
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Options::parse();
    match run(options).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Run one synchronization pass. Returns whether every setting reconciled
/// without error.
async fn run(options: Options) -> Result<bool> {
    let raw = tokio::fs::read_to_string(&options.path).await?;
    let document: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| SyncError::ParseError(format!("{}: {e}", options.path.display())))?;
    if !document.is_object() {
        return Err(SyncError::ParseError(format!(
            "{}: root must be a JSON object",
            options.path.display()
        )));
    }

    let plan = SyncPlan::build(&document, options.separator, options.label.as_deref())?;
    let store = AppConfigClient::from_connection_string(&options.connection_string)?;

    println!(
        "Updating settings using label '{}'...",
        options.label.as_deref().unwrap_or("")
    );
    let report = reconcile(&store, plan.settings()).await;

    for (key, value) in &report.written {
        println!("{key} -> {value}");
    }
    for failure in &report.failures {
        eprintln!("{}: {}", failure.key, failure.error);
    }
    println!("Done.");

    Ok(report.is_success())
}
