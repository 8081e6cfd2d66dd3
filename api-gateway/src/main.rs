//! Bank API server

use std::sync::Arc;

use account_service::{AccountService, AccountServiceConfig};
use api_gateway::config::AppConfig;
use api_gateway::{router, AppState};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Bank API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (defaults to 0.0.0.0:$PORT)
    #[clap(short, long)]
    addr: Option<String>,

    /// Keep accounts in memory even if DATABASE_URL is set
    #[clap(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();
    let config = AppConfig::new();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let log_level = if config.debug { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,account_service=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    debug!("Debug logging enabled");

    // Initialize the account service
    let account_service = match (&config.database_url, args.in_memory) {
        (Some(url), false) => {
            let mut service_config = AccountServiceConfig::from_env()
                .with_bank_password(config.bank_password.clone());
            service_config.database_url = url.clone();
            info!("Using PostgreSQL account store");
            AccountService::with_config(&service_config).await?
        }
        _ => {
            warn!("Using in-memory account store; accounts are lost on exit");
            AccountService::new()
        }
    };

    if account_service
        .ensure_bank_account(config.bank_password.as_deref())
        .await?
    {
        info!("Created BANK fee account");
    }

    let state = AppState::new(Arc::new(account_service));
    let app = router(state);

    // Start the server
    let addr = args.addr.unwrap_or_else(|| config.listen_addr());
    let addr: std::net::SocketAddr = addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
