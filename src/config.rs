//! Runtime configuration
//!
//! Everything that varies between runs comes from the command line or the
//! environment. Tax rate and date format are fixed constants of their modules.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{BakfietsError, Result};

/// Default log filter when logging to a file
pub const FILE_LOG_FILTER: &str = "info";
/// Default log filter when logging to stderr
pub const STDERR_LOG_FILTER: &str = "warn";

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalogue JSON document
    pub catalogue_path: PathBuf,
    /// Log destination, stderr when `None`
    pub log_file: Option<PathBuf>,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl AppConfig {
    /// Build the configuration from parsed arguments
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if cli.catalogue.as_os_str().is_empty() {
            return Err(BakfietsError::config("catalogue path is empty"));
        }

        let log_filter = if cli.log_file.is_some() {
            FILE_LOG_FILTER
        } else {
            STDERR_LOG_FILTER
        };

        Ok(Self {
            catalogue_path: cli.catalogue.clone(),
            log_file: cli.log_file.clone(),
            log_filter: log_filter.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_stderr_logging_is_quiet() {
        let cli = Cli::try_parse_from(["bakfiets", "--catalogue", "shop.json"]).unwrap();
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.catalogue_path, PathBuf::from("shop.json"));
        assert_eq!(config.log_filter, STDERR_LOG_FILTER);
    }

    #[test]
    fn test_log_file_raises_level() {
        let cli = Cli::try_parse_from([
            "bakfiets",
            "--catalogue",
            "shop.json",
            "--log-file",
            "bakfiets.log",
        ])
        .unwrap();
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("bakfiets.log")));
        assert_eq!(config.log_filter, FILE_LOG_FILTER);
    }

    #[test]
    fn test_empty_catalogue_path_is_rejected() {
        let cli = Cli {
            catalogue: PathBuf::new(),
            log_file: None,
            command: None,
        };
        assert!(matches!(
            AppConfig::from_cli(&cli),
            Err(BakfietsError::Config(_))
        ));
    }
}
