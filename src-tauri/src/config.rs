//! Site Configuration
//!
//! Read once at startup from `site.toml` in the app config dir, then
//! environment overrides. Injected into commands through managed state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use site_content::forms::{AttachmentLimits, MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES};

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix joined onto relative image paths
    pub image_base_url: String,
    /// Root for locally served media; relative paths resolve against the app data dir
    pub media_dir: PathBuf,
    pub database_file: String,
    /// trace, debug, info, warn, error
    pub log_level: String,
    pub log_retention_files: usize,
    pub max_attachments: usize,
    pub max_attachment_bytes: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            image_base_url: "asset://localhost".to_string(),
            media_dir: PathBuf::from("media"),
            database_file: "pls_site.db".to_string(),
            log_level: "info".to_string(),
            log_retention_files: 7,
            max_attachments: MAX_ATTACHMENTS,
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
        }
    }
}

/// The part of the configuration the UI is allowed to see
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub image_base_url: String,
    pub max_attachments: usize,
    pub max_attachment_bytes: u64,
}

impl SiteConfig {
    /// Load `site.toml` from `config_dir`; a missing file means defaults
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            Self::parse(&text).map_err(|source| ConfigError::Parse { path, source })?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Environment overrides, looked up through `var`
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("PLS_IMAGE_BASE_URL") {
            self.image_base_url = url;
        }
        if let Some(dir) = var("PLS_MEDIA_DIR") {
            self.media_dir = PathBuf::from(dir);
        }
        if let Some(level) = var("PLS_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    pub fn media_root(&self, data_dir: &Path) -> PathBuf {
        if self.media_dir.is_absolute() {
            self.media_dir.clone()
        } else {
            data_dir.join(&self.media_dir)
        }
    }

    pub fn attachment_limits(&self) -> AttachmentLimits {
        AttachmentLimits {
            max_count: self.max_attachments,
            max_bytes: self.max_attachment_bytes,
        }
    }

    pub fn public(&self) -> PublicConfig {
        PublicConfig {
            image_base_url: self.image_base_url.clone(),
            max_attachments: self.max_attachments,
            max_attachment_bytes: self.max_attachment_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = SiteConfig::parse("image_base_url = \"https://cdn.example.com\"\n").unwrap();
        assert_eq!(config.image_base_url, "https://cdn.example.com");
        assert_eq!(config.max_attachments, 5);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = SiteConfig::default();
        config.apply_overrides(|key| match key {
            "PLS_LOG_LEVEL" => Some("debug".to_string()),
            "PLS_MEDIA_DIR" => Some("/srv/media".to_string()),
            _ => None,
        });
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.media_root(Path::new("/data")), PathBuf::from("/srv/media"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut expected = SiteConfig::default();
        expected.apply_overrides(|key| std::env::var(key).ok());
        assert_eq!(SiteConfig::load(dir.path()).unwrap(), expected);
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "max_attachments = \"many\"").unwrap();
        let err = SiteConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_relative_media_dir_under_data_dir() {
        let config = SiteConfig::default();
        assert_eq!(
            config.media_root(Path::new("/data")),
            PathBuf::from("/data/media")
        );
    }
}
