pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "receipts.db";
pub const DEFAULT_OPEN_TIMEOUT_MS: u64 = 1000;
pub const MAX_OPEN_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "receipt-points"))]
#[cfg_attr(feature = "cli", command(about = "Scores purchase receipts and serves their reward points"))]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_HOST))]
    pub host: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_PORT))]
    pub port: u16,

    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_DB_PATH))]
    pub db_path: String,

    #[cfg_attr(feature = "cli", arg(long, default_value_t = DEFAULT_OPEN_TIMEOUT_MS))]
    pub open_timeout_ms: u64,

    #[cfg_attr(feature = "cli", arg(long, help = "Use a throwaway database that is deleted on exit"))]
    pub temporary: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Load settings from a TOML file instead"))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub json_logs: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: DEFAULT_DB_PATH.to_string(),
            open_timeout_ms: DEFAULT_OPEN_TIMEOUT_MS,
            temporary: false,
            config: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn db_path(&self) -> &str {
        &self.db_path
    }

    fn open_timeout(&self) -> Duration {
        Duration::from_millis(self.open_timeout_ms)
    }

    fn temporary(&self) -> bool {
        self.temporary
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_server_settings(self)
    }
}

/// 各種設定來源共用的檢查
pub fn validate_server_settings<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_non_empty_string("host", config.host())?;
    validate_range("port", config.port(), 1, u16::MAX)?;
    if !config.temporary() {
        validate_path("db_path", config.db_path())?;
    }
    validate_range(
        "open_timeout_ms",
        config.open_timeout().as_millis() as u64,
        1,
        MAX_OPEN_TIMEOUT_MS,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.open_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let config = CliConfig {
            port: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            db_path: String::new(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        // 暫存資料庫不需要路徑
        let config = CliConfig {
            db_path: String::new(),
            temporary: true,
            ..CliConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = CliConfig {
            open_timeout_ms: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "receipt-points",
            "--port",
            "9090",
            "--db-path",
            "/tmp/points.db",
            "--verbose",
        ]);
        assert_eq!(config.port(), 9090);
        assert_eq!(config.db_path(), "/tmp/points.db");
        assert!(config.verbose);
        assert!(!config.temporary());
    }
}
