//! Command-line options.

use clap::Parser;
use std::path::PathBuf;

/// Sync a JSON configuration document into Azure App Configuration.
#[derive(Debug, Parser)]
#[command(name = "appconfig-sync", version, about)]
pub struct Options {
    /// Path to the configuration file.
    pub path: PathBuf,

    /// Label applied to every imported setting.
    #[arg(long)]
    pub label: Option<String>,

    /// Store connection string (Endpoint=...;Id=...;Secret=...).
    #[arg(long, env = "APPCONFIG_CONNECTION_STRING", hide_env_values = true)]
    pub connection_string: String,

    /// Separator joining flattened key segments.
    #[arg(long, default_value_t = ':')]
    pub separator: char,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::parse_from([
            "appconfig-sync",
            "config.json",
            "--connection-string",
            "Endpoint=https://e.azconfig.io;Id=a;Secret=cw==",
        ]);

        assert_eq!(options.path, PathBuf::from("config.json"));
        assert_eq!(options.label, None);
        assert_eq!(options.separator, ':');
    }

    #[test]
    fn test_all_options() {
        let options = Options::parse_from([
            "appconfig-sync",
            "config.json",
            "--label",
            "prod",
            "--separator",
            "/",
            "--connection-string",
            "Endpoint=https://e.azconfig.io;Id=a;Secret=cw==",
        ]);

        assert_eq!(options.label.as_deref(), Some("prod"));
        assert_eq!(options.separator, '/');
    }

    #[test]
    fn test_path_is_required() {
        let result = Options::try_parse_from([
            "appconfig-sync",
            "--connection-string",
            "Endpoint=https://e.azconfig.io;Id=a;Secret=cw==",
        ]);

        assert!(result.is_err());
    }
}
