use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::kind::EntityKind;

/// Upstream default page size
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Configuration for ghdash, read from ~/.ghdash/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST API root
    pub base_url: String,
    /// Web UI root used for external links
    pub web_url: String,
    pub per_page: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            web_url: "https://github.com".to_string(),
            per_page: DEFAULT_PER_PAGE,
            user_agent: concat!("ghdash/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_tab: EntityKind,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_tab: EntityKind::Activity,
        }
    }
}

impl DashConfig {
    /// Load config from the default location, falling back to defaults when
    /// the file does not exist. Environment overrides are applied last.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load config from an explicit path without environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.normalize();
        Ok(config)
    }

    /// Config file path: $GHDASH_CONFIG or ~/.ghdash/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var("GHDASH_CONFIG") {
            return PathBuf::from(path);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ghdash/config.toml")
    }

    /// Apply GHDASH_API_URL and GHDASH_PER_PAGE
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("GHDASH_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(raw) = env::var("GHDASH_PER_PAGE") {
            self.api.per_page = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "GHDASH_PER_PAGE".to_string(),
                reason: format!("'{}' is not a positive integer", raw),
            })?;
        }
        self.normalize();
        Ok(())
    }

    /// Clamp page size and strip trailing slashes from URLs
    fn normalize(&mut self) {
        self.api.per_page = self.api.per_page.clamp(1, MAX_PER_PAGE);
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self.api.web_url = self.api.web_url.trim_end_matches('/').to_string();
    }

    /// Render as TOML for `config show` / `config init`
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Invalid {
            key: "config".to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DashConfig::default());
        assert_eq!(config.api.per_page, 30);
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://ghe.example.com/api/v3/\"\nper_page = 500\n\n[display]\ndefault_tab = \"snippet\""
        )
        .unwrap();

        let config = DashConfig::load_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.api.per_page, MAX_PER_PAGE);
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.display.default_tab, EntityKind::Snippet);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        let err = DashConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn toml_round_trip() {
        let config = DashConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("default_tab = \"activity\""));
        let parsed: DashConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
