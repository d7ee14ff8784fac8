use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use dogwatch_client::{DogNzbClient, ReqwestGet};
use dogwatch_config::{resolve_api_key, Config, CredentialStore, PathManager, API_KEY_ENV};
use dogwatch_models::WatchlistKind;
use std::time::Duration;
use tracing::{debug, info};

/// Build a client from the resolved API key and the config file.
pub fn connect(
    api_flag: Option<&str>,
    path_manager: &PathManager,
    config: &Config,
) -> Result<DogNzbClient<ReqwestGet>> {
    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store.load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let env_key = std::env::var(API_KEY_ENV).ok();
    let (api_key, source) = resolve_api_key(api_flag, env_key.as_deref(), &cred_store)
        .map_err(|e| eyre!("{}", e))?;
    debug!("Using DogNZB API key from {}", source);

    let base_url = config.base_url()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;
    let http = ReqwestGet::new(Duration::from_secs(config.dognzb.timeout_secs))
        .wrap_err("Failed to create HTTP client")?;

    Ok(DogNzbClient::new(api_key, base_url, http))
}

pub async fn run_list(client: &DogNzbClient<ReqwestGet>, kind: WatchlistKind, output: &Output) -> Result<()> {
    let items = client
        .list(kind)
        .await
        .wrap_err_with(|| format!("Failed to list {} watchlist", kind))?;

    info!("Listed {} {} watchlist items", items.len(), kind);
    output.items(kind, &items);
    Ok(())
}

pub async fn run_add(client: &DogNzbClient<ReqwestGet>, kind: WatchlistKind, ids: &[String], output: &Output) -> Result<()> {
    let mut failed = 0;
    for id in ids {
        match client.add(kind, id).await {
            Ok(()) => output.success(format!("Added {} to {} watchlist", id, kind)),
            Err(e) => {
                failed += 1;
                output.error(format!("Failed to add {}: {}", id, e));
            }
        }
    }
    finish("add", failed, ids.len())
}

pub async fn run_remove(client: &DogNzbClient<ReqwestGet>, kind: WatchlistKind, ids: &[String], output: &Output) -> Result<()> {
    let mut failed = 0;
    for id in ids {
        match client.remove(kind, id).await {
            Ok(ack) => {
                let detail = if ack.description.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", ack.description)
                };
                output.success(format!("Removed {} from {} watchlist{}", id, kind, detail));
            }
            Err(e) => {
                failed += 1;
                output.error(format!("Failed to remove {}: {}", id, e));
            }
        }
    }
    finish("remove", failed, ids.len())
}

fn finish(verb: &str, failed: usize, total: usize) -> Result<()> {
    if failed > 0 {
        return Err(eyre!("{} of {} {} requests failed", failed, total, verb));
    }
    Ok(())
}
