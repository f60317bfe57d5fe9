//! Check configuration

use crate::error::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings read from `config.toml`; command-line flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CheckConfig {
    /// Oozie server port
    pub port: Option<u16>,

    /// Days of workflow history to examine
    pub days: Option<u32>,

    /// Maximum number of coordinators to check
    pub limit: Option<u32>,

    /// Default user filter
    pub user: Option<String>,

    /// Default name filter
    pub name: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
}

impl CheckConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CheckResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_config_path() {
                Some(p) => p,
                None => return Ok(CheckConfig::default()),
            },
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            Self::parse(&contents)
        } else {
            Ok(CheckConfig::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn parse(contents: &str) -> CheckResult<Self> {
        toml::from_str(contents).map_err(|e| CheckError::Config(e.to_string()))
    }

    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("oozie-check").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert!(config.port.is_none());
        assert!(config.user.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let config = CheckConfig::load(Some("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_parse_config() {
        let config = CheckConfig::parse(
            r#"
port = 11443
days = 7
user = "t4b"
timeout_seconds = 10
"#,
        )
        .unwrap();
        assert_eq!(config.port, Some(11443));
        assert_eq!(config.days, Some(7));
        assert_eq!(config.user.as_deref(), Some("t4b"));
        assert_eq!(config.timeout_seconds, Some(10));
        assert!(config.limit.is_none());
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = CheckConfig::parse("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }
}
