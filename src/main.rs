//! talentboard command-line front end.
//!
//! Stands in for the view layer: each subcommand calls into the client core
//! and prints what it returns as JSON.

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::match_same_arms)]

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use talentboard::api::{Client, ResourceQuery};
use talentboard::config::{AppConfig, ConfigArgs, LoggingConfig, StorageBackend};
use talentboard::guard::{RouteGuard, RouteTable};
use talentboard::search::SearchAggregator;
use talentboard::session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse job offers
    Jobs {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Contract type (CDI, CDD, Freelance, ...)
        #[arg(long = "type")]
        contract: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Browse talent profiles
    Talents {
        #[arg(long)]
        skill: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Browse projects
    Projects {
        #[arg(long)]
        search: Option<String>,
    },
    /// Search projects, talents and jobs at once
    Search { query: Option<String> },
    /// Store a session for an existing user
    Login {
        #[arg(long)]
        user_id: String,
        #[arg(long, env = "TALENTBOARD_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Reload the session from storage and show it
    Sync,
    /// Check whether a route may be opened
    Navigate { path: String },
    /// List my job applications
    Applications,
    /// List conversations, or the thread with one user
    Messages {
        #[arg(long = "with")]
        with_user: Option<String>,
    },
    /// List my notifications
    Notifications,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config).context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        name: "config.loaded",
        base_url = %config.api.base_url,
        storage = ?config.storage.backend,
        "Configuration loaded"
    );

    let storage: Arc<dyn SessionStorage> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileStorage::new(&config.storage.path)),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    };
    let session = SessionStore::load(storage);
    let client = Client::new(&config.api.base_url, session.clone())
        .context("invalid API base URL")?;

    run(cli.command, &client, &session).await
}

async fn run(command: Command, client: &Client, session: &SessionStore) -> anyhow::Result<()> {
    match command {
        Command::Jobs {
            category,
            location,
            contract,
            search,
        } => {
            let query = ResourceQuery::new()
                .filter("category", category)
                .filter("location", location)
                .filter("type", contract)
                .filter("search", search);
            print_json(&client.jobs().list(&query).await?)
        }
        Command::Talents {
            skill,
            location,
            available,
        } => {
            let query = ResourceQuery::new()
                .filter("skill", skill)
                .filter("location", location)
                .filter("available", available);
            print_json(&client.talents().list(&query).await?)
        }
        Command::Projects { search } => {
            let query = ResourceQuery::new().filter("search", search);
            print_json(&client.projects().list(&query).await?)
        }
        Command::Search { query } => {
            let results = SearchAggregator::new(client.clone())
                .search(query.as_deref())
                .await;
            print_json(&results)
        }
        Command::Login { user_id, token } => {
            let user = client.auth().user(&user_id).await?;
            session
                .login(user, token)
                .context("failed to store session")?;
            print_json(&session_view(session))
        }
        Command::Logout => {
            session.logout().context("stored session could not be removed")?;
            print_json(&session_view(session))
        }
        Command::Whoami => print_json(&session_view(session)),
        Command::Sync => {
            session.sync();
            print_json(&session_view(session))
        }
        Command::Navigate { path } => {
            let guard = RouteGuard::new(session.clone(), RouteTable::default());
            print_json(&guard.navigate(&path))
        }
        Command::Applications => print_json(&client.applications().mine().await?),
        Command::Messages { with_user } => match with_user {
            Some(user_id) => print_json(&client.messages().thread(&user_id).await?),
            None => print_json(&client.messages().conversations().await?),
        },
        Command::Notifications => print_json(&client.notifications().list().await?),
    }
}

/// Session as shown to the user; the token itself is never printed.
fn session_view(session: &SessionStore) -> serde_json::Value {
    let snapshot = session.snapshot();
    serde_json::json!({
        "authenticated": snapshot.is_authenticated(),
        "user": snapshot.user(),
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Initialize tracing (M-LOG-STRUCTURED). `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .init();
    }
}
