//! Configuration for the operations layer.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};

/// Public MLB stats API.
pub const DEFAULT_STATS_API_BASE: &str = "https://statsapi.mlb.com/api/v1";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: [&str; 7] = [
    "stats_api_base",
    "data_dir",
    "page_size",
    "request_timeout_secs",
    "supabase_url",
    "supabase_key",
    "user_id",
];

/// Configuration for Mentaculous operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the stats API.
    #[serde(default = "default_stats_api_base")]
    pub stats_api_base: String,

    /// Directory holding the ledger records.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Ledger entries per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// HTTP client timeout in seconds (0 disables the timeout).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Supabase project URL for backups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supabase_url: Option<String>,

    /// Supabase anon key. Only read from the environment or set per session.
    #[serde(skip_serializing, default)]
    pub supabase_key: Option<String>,

    /// User id recorded with backups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

fn default_stats_api_base() -> String {
    DEFAULT_STATS_API_BASE.to_string()
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "mentaculous", "mentaculous")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".mentaculous"))
}

fn default_page_size() -> usize {
    mentaculous_core::DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_var(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_api_base: default_stats_api_base(),
            data_dir: default_data_dir(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            supabase_url: None,
            supabase_key: None,
            user_id: None,
        }
    }
}

impl Config {
    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        Ok(Self::load_file()?.with_env_overrides())
    }

    /// Load only what the config file holds, defaults for the rest.
    ///
    /// This is the value to edit and [`save`](Self::save) back, so that
    /// environment overrides never end up in the file.
    pub fn load_file() -> OpsResult<Self> {
        match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                Ok(serde_json::from_str(&contents)?)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Apply environment variables on top of the loaded values.
    pub fn with_env_overrides(self) -> Self {
        Self {
            stats_api_base: env_var("MTC_STATS_API_BASE").unwrap_or(self.stats_api_base),
            data_dir: env_var("MTC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.data_dir),
            page_size: env_parse("MTC_PAGE_SIZE").unwrap_or(self.page_size),
            request_timeout_secs: env_parse("MTC_REQUEST_TIMEOUT_SECS")
                .unwrap_or(self.request_timeout_secs),
            supabase_url: env_var("SUPABASE_URL").or(self.supabase_url),
            supabase_key: env_var("SUPABASE_ANON_KEY").or(self.supabase_key),
            user_id: env_var("MTC_USER_ID").or(self.user_id),
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, contents)?;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// `MTC_CONFIG_DIR` replaces the platform config directory.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(dir) = env_var("MTC_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }
        ProjectDirs::from("com", "mentaculous", "mentaculous")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Check if backup credentials are configured.
    pub fn has_backup(&self) -> bool {
        self.backup_credentials().is_ok()
    }

    /// Backup URL and key; blank values count as missing.
    pub fn backup_credentials(&self) -> OpsResult<(&str, &str)> {
        let url = self.supabase_url.as_deref().filter(|s| !s.trim().is_empty());
        let key = self.supabase_key.as_deref().filter(|s| !s.trim().is_empty());
        match (url, key) {
            (Some(url), Some(key)) => Ok((url, key)),
            _ => Err(OpsError::BackupNotConfigured),
        }
    }

    /// Page size, never zero.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "stats_api_base" => Some(self.stats_api_base.clone()),
            "data_dir" => Some(self.data_dir.display().to_string()),
            "page_size" => Some(self.page_size.to_string()),
            "request_timeout_secs" => Some(self.request_timeout_secs.to_string()),
            "supabase_url" => self.supabase_url.clone(),
            "supabase_key" => self.supabase_key.as_ref().map(|_| "***".to_string()),
            "user_id" => self.user_id.clone(),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key {
            "stats_api_base" => {
                self.stats_api_base = value.trim_end_matches('/').to_string();
            }
            "data_dir" => {
                self.data_dir = PathBuf::from(value);
            }
            "page_size" => {
                self.page_size = value
                    .parse()
                    .ok()
                    .filter(|n: &usize| *n > 0)
                    .ok_or_else(|| OpsError::Config(format!("Invalid page size: {}", value)))?;
            }
            "request_timeout_secs" => {
                self.request_timeout_secs = value
                    .parse()
                    .map_err(|_| OpsError::Config(format!("Invalid number: {}", value)))?;
            }
            "supabase_url" => {
                self.supabase_url = Some(value.trim_end_matches('/').to_string());
            }
            "supabase_key" => {
                self.supabase_key = Some(value.to_string());
            }
            "user_id" => {
                self.user_id = Some(value.to_string());
            }
            _ => {
                return Err(OpsError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.stats_api_base, DEFAULT_STATS_API_BASE);
        assert_eq!(config.page_size, 32);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.has_backup());
        assert!(matches!(
            config.backup_credentials(),
            Err(OpsError::BackupNotConfigured)
        ));
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("page_size", "10").unwrap();
        config.set("supabase_url", "https://abc.supabase.co/").unwrap();
        config.set("supabase_key", "secret").unwrap();

        assert_eq!(config.get("page_size").as_deref(), Some("10"));
        assert_eq!(
            config.get("supabase_url").as_deref(),
            Some("https://abc.supabase.co")
        );
        assert_eq!(config.get("supabase_key").as_deref(), Some("***"));
        assert!(config.has_backup());
        assert_eq!(
            config.backup_credentials().unwrap(),
            ("https://abc.supabase.co", "secret")
        );
    }

    #[test]
    fn test_blank_backup_credentials_are_missing() {
        let mut config = Config::default();
        config.set("supabase_url", "https://abc.supabase.co").unwrap();
        config.set("supabase_key", "  ").unwrap();
        assert!(!config.has_backup());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("page_size", "0").is_err());
        assert!(config.set("page_size", "many").is_err());
        assert!(config.set("request_timeout_secs", "-1").is_err());
        assert!(config.set("nope", "1").is_err());
        assert_eq!(config.page_size, 32);
    }

    #[test]
    fn test_key_never_serialized() {
        let mut config = Config::default();
        config.supabase_key = Some("secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));

        let back: Config = serde_json::from_str(&json).unwrap();
        assert!(back.supabase_key.is_none());
    }

    #[test]
    fn test_every_key_is_readable() {
        let mut config = Config::default();
        config.set("supabase_url", "https://x").unwrap();
        config.set("supabase_key", "k").unwrap();
        config.set("user_id", "me").unwrap();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "missing {key}");
        }
    }
}
