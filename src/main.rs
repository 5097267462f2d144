use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobboard_server::config::{AppConfig, CliConfig, FileConfig};
use jobboard_server::server::ServerConfig;
use jobboard_server::sqlite_persistence::open_with_retry;
use jobboard_server::{
    run_server, HttpExternalJobSource, RequestsLoggingLevel, SqliteJobStore, SqliteUserStore,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the jobs and user SQLite databases.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// URL of the external jobs API.
    #[clap(long, env = "EXTERNAL_API_JOB_URL")]
    pub external_jobs_url: Option<String>,

    /// Timeout in seconds for external jobs API requests.
    #[clap(long, default_value_t = 10)]
    pub external_jobs_timeout_sec: u64,

    /// How many times to try opening a database before giving up.
    #[clap(long, default_value_t = 5)]
    pub db_connect_retries: u32,

    /// Pause between database open attempts, in milliseconds.
    #[clap(long, default_value_t = 5000)]
    pub db_retry_interval_ms: u64,

    /// Path to a TOML config file. Values in it override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            db_dir: args.db_dir.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            external_jobs_url: args.external_jobs_url.clone(),
            external_jobs_timeout_sec: args.external_jobs_timeout_sec,
            db_connect_retries: args.db_connect_retries,
            db_retry_interval_ms: args.db_retry_interval_ms,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&CliConfig::from(&cli_args), file_config)?;
    let retry_policy = config.db_retry_policy();

    info!("Opening jobs database at {:?}...", config.jobs_db_path());
    let job_store = open_with_retry("jobs database", retry_policy, || {
        SqliteJobStore::new(config.jobs_db_path())
    })
    .await?;

    info!("Opening user database at {:?}...", config.user_db_path());
    let user_store = open_with_retry("user database", retry_policy, || {
        SqliteUserStore::new(config.user_db_path())
    })
    .await?;

    let external_source = HttpExternalJobSource::new(
        config.external_jobs_url.clone(),
        config.external_jobs_timeout_sec,
    )?;
    info!("External jobs API configured at {}", external_source.url());

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level.clone(),
        port: config.port,
    };

    info!("Ready to serve at port {}!", config.port);
    run_server(
        server_config,
        Arc::new(job_store),
        Arc::new(user_store),
        Arc::new(external_source),
    )
    .await
}
