use account_service::{AccountService, AccountServiceConfig};
use clap::{Parser, Subcommand};
use common::db::{init_db_pool, run_migrations};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Account Service CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Database URL (defaults to DATABASE_URL)
    #[arg(short, long, global = true)]
    database_url: Option<String>,

    /// Database pool size
    #[arg(short, long, global = true)]
    pool_size: Option<u32>,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,

    /// Create the BANK fee account if it is missing
    Bootstrap {
        /// Password for the BANK account (defaults to BANK_PASSWORD, else random)
        #[arg(short, long)]
        bank_password: Option<String>,
    },

    /// Print an account document without its password hash
    Inspect {
        /// Username to look up
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "account_service={0},common={0}",
            cli.log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = AccountServiceConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if let Some(pool_size) = cli.pool_size {
        config.db_pool_size = pool_size;
    }

    match cli.command {
        Commands::Migrate => {
            let pool = init_db_pool(&config.database_url, config.db_pool_size).await?;
            run_migrations(&pool).await?;
        }
        Commands::Bootstrap { bank_password } => {
            let config = match bank_password {
                Some(pw) => config.with_bank_password(Some(pw)),
                None => config,
            };
            if config.bank_password.is_none() {
                warn!("No BANK password configured, generating a random one");
            }

            let service = AccountService::with_config(&config).await?;
            if service.ensure_bank_account(config.bank_password.as_deref()).await? {
                info!("BANK account created");
            } else {
                info!("BANK account already exists");
            }
        }
        Commands::Inspect { username } => {
            let service = AccountService::with_config(&config).await?;
            match service.get_account(&username).await? {
                Some(view) => println!("{}", serde_json::to_string_pretty(&view)?),
                None => {
                    eprintln!("No such account: {}", username);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
