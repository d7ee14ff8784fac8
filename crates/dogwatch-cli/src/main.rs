use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{eyre, Report};
use commands::{config, watchlist};
use dogwatch_config::{Config, PathManager};
use dogwatch_models::WatchlistKind;
use std::path::Path;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "dogwatch")]
#[command(about = "dogwatch is a cli tool to interact with DogNZB's Watchlists")]
#[command(version)]
struct Cli {
    /// DogNZB API key (falls back to $DOGNZB_API, then the stored key)
    #[arg(short, long, global = true, value_name = "APIKEY")]
    api: Option<String>,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors and requested data
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the items on a watchlist
    List {
        #[command(subcommand)]
        target: ListTarget,
    },
    /// Add items to a watchlist
    Add {
        #[command(subcommand)]
        target: ItemTarget,
    },
    /// Remove items from a watchlist
    Remove {
        #[command(subcommand)]
        target: ItemTarget,
    },
    /// Print the version number of dogwatch
    Version,
    /// Manage the stored API key and settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ListTarget {
    /// The movies watchlist
    Movies,
    /// The TV watchlist
    Tv,
}

impl From<ListTarget> for WatchlistKind {
    fn from(target: ListTarget) -> Self {
        match target {
            ListTarget::Movies => WatchlistKind::Movie,
            ListTarget::Tv => WatchlistKind::Tv,
        }
    }
}

#[derive(Subcommand)]
enum ItemTarget {
    /// Movies, by IMDB id (e.g. tt0113277)
    Movies {
        #[arg(required = true, value_name = "IMDB_ID")]
        ids: Vec<String>,
    },
    /// TV shows, by TVDB id (e.g. 269613)
    Tv {
        #[arg(required = true, value_name = "TVDB_ID")]
        ids: Vec<String>,
    },
}

impl ItemTarget {
    fn into_parts(self) -> (WatchlistKind, Vec<String>) {
        match self {
            ItemTarget::Movies { ids } => (WatchlistKind::Movie, ids),
            ItemTarget::Tv { ids } => (WatchlistKind::Tv, ids),
        }
    }
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current settings (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the API key in the credentials file
    SetKey {
        key: String,
    },
    /// Remove the stored API key
    ClearKey,
    /// Set the DogNZB base URL
    SetUrl {
        url: String,
    },
    /// Set the request timeout in seconds
    SetTimeout {
        seconds: u64,
    },
}

/// Load the config file. A broken file falls back to defaults and the error
/// is kept for the commands that need real settings, so `version` and
/// `config` still work and can repair it.
fn load_config(config_file: &Path) -> (Config, Option<Report>) {
    match Config::load_or_default(config_file) {
        Ok(config) => (config, None),
        Err(e) => (
            Config::default(),
            Some(eyre!("Failed to load config from {}: {}", config_file.display(), e)),
        ),
    }
}

fn require_config(config: &Config, error: Option<Report>) -> color_eyre::Result<&Config> {
    match error {
        Some(e) => Err(e),
        None => Ok(config),
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let path_manager = PathManager::default();
    let (config, config_error) = load_config(&path_manager.config_file());

    logging::init_logging_with_file(cli.verbose, cli.quiet, config.logging.file.clone())
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let api = cli.api.as_deref();

    match cli.command {
        Commands::Version => {
            output.version(env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Config { cmd } => config::run_config(cmd, api, &path_manager, &output),
        Commands::List { target } => {
            let client = watchlist::connect(api, &path_manager, require_config(&config, config_error)?)?;
            watchlist::run_list(&client, target.into(), &output).await
        }
        Commands::Add { target } => {
            let (kind, ids) = target.into_parts();
            let client = watchlist::connect(api, &path_manager, require_config(&config, config_error)?)?;
            watchlist::run_add(&client, kind, &ids, &output).await
        }
        Commands::Remove { target } => {
            let (kind, ids) = target.into_parts();
            let client = watchlist::connect(api, &path_manager, require_config(&config, config_error)?)?;
            watchlist::run_remove(&client, kind, &ids, &output).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_tv() {
        let cli = Cli::try_parse_from(["dogwatch", "-a", "key", "add", "tv", "269613", "334824"]).unwrap();
        assert_eq!(cli.api.as_deref(), Some("key"));
        match cli.command {
            Commands::Add { target } => {
                let (kind, ids) = target.into_parts();
                assert_eq!(kind, WatchlistKind::Tv);
                assert_eq!(ids, ["269613", "334824"]);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_list_movies_with_trailing_global_flag() {
        let cli = Cli::try_parse_from(["dogwatch", "list", "movies", "--api", "k", "-vv"]).unwrap();
        assert_eq!(cli.api.as_deref(), Some("k"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::List { target } => assert_eq!(WatchlistKind::from(target), WatchlistKind::Movie),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_remove_requires_an_id() {
        assert!(Cli::try_parse_from(["dogwatch", "remove", "movies"]).is_err());
    }

    #[test]
    fn test_broken_config_only_blocks_watchlist_commands() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.toml");
        std::fs::write(&config_file, "[dognzb\nbase_url = ").unwrap();

        let (config, error) = load_config(&config_file);
        assert_eq!(config.dognzb.base_url, dogwatch_config::DEFAULT_BASE_URL);
        let err = require_config(&config, error).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));

        let (config, error) = load_config(&dir.path().join("missing.toml"));
        assert!(require_config(&config, error).is_ok());
    }
}
