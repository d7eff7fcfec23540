use std::path::PathBuf;

use clap::Args;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix of environment overrides, e.g. `TALENTBOARD_API__BASE_URL`.
pub const ENV_PREFIX: &str = "TALENTBOARD";

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG_NAME: &str = "talentboard";

/// Configuration flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, global = true, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// REST API base URL
    #[arg(long, global = true, env = "API_BASE_URL")]
    pub base_url: Option<String>,

    /// Session storage file
    #[arg(long, global = true, env = "SESSION_PATH")]
    pub session_path: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub filter: String,
    pub json: bool,
}

impl AppConfig {
    /// Layer defaults, config file, `TALENTBOARD_*` environment and CLI flags.
    ///
    /// Priority: CLI flag > CLI env var > `TALENTBOARD_*` env > config file > defaults.
    pub fn load(args: &ConfigArgs) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("api.base_url", "http://localhost:5000/api")?
            .set_default("storage.backend", "file")?
            .set_default("storage.path", ".talentboard/session.json")?
            .set_default("logging.filter", "info")?
            .set_default("logging.json", false)?;

        builder = match &args.config {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(base_url) = &args.base_url {
            builder = builder.set_override("api.base_url", base_url.as_str())?;
        }
        if let Some(path) = &args.session_path {
            builder = builder.set_override("storage.path", path.to_string_lossy().as_ref())?;
        }
        if args.ephemeral {
            builder = builder.set_override("storage.backend", "memory")?;
        }
        if let Some(json) = args.log_json {
            builder = builder.set_override("logging.json", json)?;
        }

        builder.build()?.try_deserialize()
    }
}
