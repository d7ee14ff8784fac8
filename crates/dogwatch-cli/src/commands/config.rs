use crate::output::{mask_secret, Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use dogwatch_config::{resolve_api_key, Config, CredentialStore, PathManager, API_KEY_ENV};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, api_flag: Option<&str>, path_manager: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, api_flag, path_manager, output),
        ConfigCommands::SetKey { key } => set_key(key, path_manager, output),
        ConfigCommands::ClearKey => clear_key(path_manager, output),
        ConfigCommands::SetUrl { url } => update_config(path_manager, output, |config| {
            config.dognzb.base_url = url;
        }),
        ConfigCommands::SetTimeout { seconds } => update_config(path_manager, output, |config| {
            config.dognzb.timeout_secs = seconds;
        }),
    }
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store.load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    Ok(cred_store)
}

fn show_config(full: bool, api_flag: Option<&str>, path_manager: &PathManager, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let cred_store = load_credentials(path_manager)?;

    let env_key = std::env::var(API_KEY_ENV).ok();
    let (api_key, source) = match resolve_api_key(api_flag, env_key.as_deref(), &cred_store) {
        Ok((key, source)) => {
            let shown = if full { key } else { mask_secret(&key) };
            (shown, source.to_string())
        }
        Err(_) => ("<not set>".to_string(), "-".to_string()),
    };
    let log_file = config.logging.file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display().to_string())]);
            table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.dognzb.base_url)]);
            table.add_row(vec![Cell::new("Timeout (s)"), Cell::new(config.dognzb.timeout_secs)]);
            table.add_row(vec![Cell::new("API key"), Cell::new(&api_key)]);
            table.add_row(vec![Cell::new("API key source"), Cell::new(&source)]);
            table.add_row(vec![Cell::new("Log file"), Cell::new(&log_file)]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let data = json!({
                "type": "config",
                "config_file": config_file.display().to_string(),
                "base_url": config.dognzb.base_url,
                "timeout_secs": config.dognzb.timeout_secs,
                "api_key": api_key,
                "api_key_source": source,
                "log_file": log_file,
            });
            let rendered = if output.format() == OutputFormat::Json {
                serde_json::to_string(&data)?
            } else {
                serde_json::to_string_pretty(&data)?
            };
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn set_key(key: String, path_manager: &PathManager, output: &Output) -> Result<()> {
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let mut cred_store = load_credentials(path_manager)?;
    cred_store.set_api_key(key);
    cred_store.save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Saved API key to {}", path_manager.credentials_file().display()));
    Ok(())
}

fn clear_key(path_manager: &PathManager, output: &Output) -> Result<()> {
    let mut cred_store = load_credentials(path_manager)?;
    if cred_store.get_api_key().is_none() {
        output.info("No stored API key to clear");
        return Ok(());
    }

    cred_store.clear_api_key();
    cred_store.save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
    output.success("Cleared stored API key");
    Ok(())
}

fn update_config(path_manager: &PathManager, output: &Output, apply: impl FnOnce(&mut Config)) -> Result<()> {
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file).unwrap_or_else(|e| {
        output.warn(format!("Ignoring unreadable config at {}: {}", config_file.display(), e));
        Config::default()
    });

    apply(&mut config);
    config.validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;

    config.save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Updated {}", config_file.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_output() -> Output {
        Output::new(OutputFormat::Human, true)
    }

    #[test]
    fn test_set_and_clear_key() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());

        set_key("  0123456789abcdef ".to_string(), &paths, &quiet_output()).unwrap();
        let store = load_credentials(&paths).unwrap();
        assert_eq!(store.get_api_key().map(String::as_str), Some("0123456789abcdef"));

        clear_key(&paths, &quiet_output()).unwrap();
        let store = load_credentials(&paths).unwrap();
        assert!(store.get_api_key().is_none());
    }

    #[test]
    fn test_set_key_rejects_blank() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        assert!(set_key("   ".to_string(), &paths, &quiet_output()).is_err());
    }

    #[test]
    fn test_update_config_validates_before_saving() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());

        update_config(&paths, &quiet_output(), |c| c.dognzb.base_url = "http://localhost:9000".to_string()).unwrap();
        let config = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(config.dognzb.base_url, "http://localhost:9000");

        let result = update_config(&paths, &quiet_output(), |c| c.dognzb.timeout_secs = 0);
        assert!(result.is_err());
        let config = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(config.dognzb.timeout_secs, 30);
    }

    #[test]
    fn test_update_config_replaces_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        std::fs::write(paths.config_file(), "not = [valid toml").unwrap();

        update_config(&paths, &quiet_output(), |c| c.dognzb.base_url = "http://localhost:9000".to_string()).unwrap();
        let config = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(config.dognzb.base_url, "http://localhost:9000");
        assert_eq!(config.dognzb.timeout_secs, 30);
    }
}
