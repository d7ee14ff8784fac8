use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Environment variable consulted when no `--api` flag is given.
pub const API_KEY_ENV: &str = "DOGNZB_API";

const API_KEY: &str = "dognzb_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_api_key(&self) -> Option<&String> {
        self.get(API_KEY).filter(|key| !key.is_empty())
    }

    pub fn set_api_key(&mut self, key: String) {
        self.set(API_KEY.to_string(), key);
    }

    pub fn clear_api_key(&mut self) {
        self.remove(API_KEY);
    }
}

/// Where the API key in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Env,
    CredentialStore,
}

impl fmt::Display for ApiKeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKeySource::Flag => write!(f, "--api flag"),
            ApiKeySource::Env => write!(f, "{} environment variable", API_KEY_ENV),
            ApiKeySource::CredentialStore => write!(f, "credentials file"),
        }
    }
}

/// Pick the API key: flag first, then environment, then the credential store.
/// Empty values count as absent.
pub fn resolve_api_key(
    flag: Option<&str>,
    env: Option<&str>,
    store: &CredentialStore,
) -> Result<(String, ApiKeySource)> {
    if let Some(key) = flag.filter(|k| !k.is_empty()) {
        return Ok((key.to_string(), ApiKeySource::Flag));
    }

    if let Some(key) = env.filter(|k| !k.is_empty()) {
        return Ok((key.to_string(), ApiKeySource::Env));
    }

    if let Some(key) = store.get_api_key() {
        return Ok((key.clone(), ApiKeySource::CredentialStore));
    }

    Err(anyhow::anyhow!("missing required flag: -a, --api"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_api_key("0123456789abcdef".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_api_key(), Some(&"0123456789abcdef".to_string()));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.load().unwrap();
        assert!(store.get_api_key().is_none());
    }

    #[test]
    fn test_clear_api_key() {
        let mut store = CredentialStore::new(PathBuf::from("unused.toml"));
        store.set_api_key("abc".to_string());
        store.clear_api_key();
        assert!(store.get_api_key().is_none());
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        let mut store = CredentialStore::new(PathBuf::from("unused.toml"));
        store.set_api_key("stored".to_string());

        let (key, source) = resolve_api_key(Some("flag"), Some("env"), &store).unwrap();
        assert_eq!((key.as_str(), source), ("flag", ApiKeySource::Flag));

        let (key, source) = resolve_api_key(None, Some("env"), &store).unwrap();
        assert_eq!((key.as_str(), source), ("env", ApiKeySource::Env));

        let (key, source) = resolve_api_key(Some(""), Some(""), &store).unwrap();
        assert_eq!((key.as_str(), source), ("stored", ApiKeySource::CredentialStore));
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let store = CredentialStore::new(PathBuf::from("unused.toml"));
        let err = resolve_api_key(None, None, &store).unwrap_err();
        assert_eq!(err.to_string(), "missing required flag: -a, --api");
    }
}
