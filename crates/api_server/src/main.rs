use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use tokio::net::TcpListener;

use lpforge_api_server::logging::{self, LogFormat};
use lpforge_api_server::router;
use lpforge_model_store::{
    DatabaseConfig, ModelStore, ReferenceAuditApi, StoreConfig,
};

#[derive(Parser, Debug)]
#[command(name = "lpforge", about = "Linear-programming model entity service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API.
    Serve {
        #[arg(long, env = "LPFORGE_DATA_DIR", default_value = ".")]
        data_dir: PathBuf,
        #[arg(long, env = "LPFORGE_BIND", default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },
    /// Report references that no longer resolve.
    Audit {
        #[arg(long, env = "LPFORGE_DATA_DIR", default_value = ".")]
        data_dir: PathBuf,
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(LogFormat::from_env()).context("install log subscriber")?;
    match cli.command {
        Command::Serve {
            data_dir,
            bind,
            database_url,
        } => {
            serve(&data_dir, bind, database_url.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Audit {
            data_dir,
            database_url,
        } => audit(&data_dir, database_url.as_deref()).await,
    }
}

async fn open(data_dir: &Path, database_url: Option<&str>) -> Result<ModelStore> {
    let Some(url) = database_url else {
        return ModelStore::open(data_dir)
            .await
            .with_context(|| format!("open store in {}", data_dir.display()));
    };
    let mut config = StoreConfig::load_or_init(data_dir)
        .with_context(|| format!("load config from {}", data_dir.display()))?;
    config.database = DatabaseConfig::from_url(url).context("parse --database-url")?;
    ModelStore::connect(&config, data_dir)
        .await
        .with_context(|| format!("connect {} store", config.backend_name()))
}

async fn serve(data_dir: &Path, bind: SocketAddr, database_url: Option<&str>) -> Result<()> {
    let store = open(data_dir, database_url).await?;
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    info!("api: listening on http://{bind}");
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;
    info!("api: shut down");
    Ok(())
}

async fn audit(data_dir: &Path, database_url: Option<&str>) -> Result<ExitCode> {
    let store = open(data_dir, database_url).await?;
    let dangling = store
        .dangling_references()
        .await
        .context("scan references")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&dangling).context("encode audit report")?
    );
    if dangling.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("api: failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
