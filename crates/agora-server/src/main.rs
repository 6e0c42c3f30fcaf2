//! agora server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured store, and serves the JSON API over HTTP.
//!
//! ```sh
//! cargo run -p agora-server --bin agora -- --memory
//! ```

use std::{path::PathBuf, sync::Arc};

use agora_core::store::TopicStore;
use agora_server::{Backend, ServerConfig, expand_tilde, seed::seed};
use agora_store_memory::MemoryStore;
use agora_store_sqlite::SqliteStore;
use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Agora topic voting server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Keep everything in memory, ignoring `backend` and `store_path`.
  #[arg(long)]
  memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("AGORA"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if cli.memory {
    server_cfg.backend = Backend::Memory;
  }

  match server_cfg.backend {
    Backend::Memory => {
      tracing::info!("using in-memory store");
      serve(MemoryStore::new(), &server_cfg).await
    }
    Backend::Sqlite => {
      let store_path = expand_tilde(&server_cfg.store_path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      tracing::info!(path = ?store_path, "using sqlite store");
      serve(store, &server_cfg).await
    }
  }
}

async fn serve<S>(store: S, cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: TopicStore + 'static,
{
  let store = Arc::new(store);
  if cfg.seed {
    seed(Arc::clone(&store)).await.context("failed to seed demo data")?;
  }

  let app = agora_server::app(store);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
