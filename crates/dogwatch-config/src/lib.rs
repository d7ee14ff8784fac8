pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, DogNzbConfig, LoggingConfig, DEFAULT_BASE_URL};
pub use credentials::{resolve_api_key, ApiKeySource, CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, container_base_path};
