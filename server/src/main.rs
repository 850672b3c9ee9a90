// Furniture Inventory - flat-file inventory web application
// Entry point and application setup

use anyhow::Context;
use clap::Parser;
use furniture_inventory::app;
use furniture_inventory::config::AppConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "furniture-inventory",
    about = "Furniture inventory web application",
    version
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// JSON file holding the item collection
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Directory for uploaded photos
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Origin prepended to stored photo URLs
    #[arg(long)]
    public_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "furniture_inventory=debug,tower_http=info,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting furniture inventory");

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(upload_dir) = cli.upload_dir {
        config.upload_dir = upload_dir;
    }
    if let Some(base) = cli.public_base_url {
        config.public_base_url = Some(base);
    }
    config.validate().context("Invalid configuration")?;

    let state = app::setup(config)
        .await
        .context("Failed to initialize storage")?;

    app::serve(state).await.context("Server error")?;

    Ok(())
}
