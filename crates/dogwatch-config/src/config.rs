use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://api.dognzb.cr";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dognzb: DogNzbConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DogNzbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout handed to the HTTP transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for DogNzbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config if the file exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = reqwest::Url::parse(&self.dognzb.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid dognzb.base_url '{}': {}", self.dognzb.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow::anyhow!("dognzb.base_url must use http or https, got '{}'", url.scheme()));
        }

        if self.dognzb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("dognzb.timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    pub fn base_url(&self) -> anyhow::Result<reqwest::Url> {
        self.validate()?;
        Ok(reqwest::Url::parse(&self.dognzb.base_url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            dognzb: DogNzbConfig {
                base_url: "http://localhost:8080".to_string(),
                timeout_secs: 5,
            },
            logging: LoggingConfig {
                file: Some(PathBuf::from("/var/log/dogwatch.log")),
            },
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.dognzb.base_url, "http://localhost:8080");
        assert_eq!(loaded.dognzb.timeout_secs, 5);
        assert_eq!(loaded.logging.file, Some(PathBuf::from("/var/log/dogwatch.log")));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[dognzb]\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.dognzb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.dognzb.timeout_secs, 10);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.dognzb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.dognzb.timeout_secs, 30);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url().unwrap().as_str(), "https://api.dognzb.cr/");

        config.dognzb.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.dognzb.base_url = "ftp://api.dognzb.cr".to_string();
        assert!(config.validate().is_err());

        config.dognzb.base_url = DEFAULT_BASE_URL.to_string();
        config.dognzb.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
