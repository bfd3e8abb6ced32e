//! Violet Server - song catalog service
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use violet_server::{create_router, AppState, CatalogService, ServerConfig};

#[derive(Parser)]
#[command(name = "violet-server")]
#[command(about = "Violet Player song catalog service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Load and validate configuration, then print it
    CheckConfig {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "violet_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, port } => {
            serve(config, port).await?;
        }
        Commands::CheckConfig { config } => {
            check_config(config)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = ServerConfig::load(config_path.as_deref())?;
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!("Starting Violet Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    if config.static_files.enabled && !config.static_files.root.exists() {
        tracing::warn!(
            "Static file root {:?} does not exist; /audio and /images will return 404",
            config.static_files.root
        );
    }

    // Catalog starts with the built-in songs
    let catalog = Arc::new(CatalogService::with_seed());
    tracing::info!("Catalog seeded with {} songs", catalog.len().await);

    let app_state = AppState::new(catalog, config.public_base_url()?);
    let app = create_router(app_state, &config)?;

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn check_config(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    println!("Configuration OK");

    Ok(())
}
