mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catsync-cli")]
#[command(about = "Shopify catalog sync command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one catalog sync now and print the summary
    Sync {
        /// Fetch and normalize the remote catalog without touching the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply pending database migrations
    Migrate,
    /// Print the local catalog table as JSON
    Products,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = catsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sync { dry_run: true } => commands::run_sync_dry_run(&config).await,
        Commands::Sync { dry_run: false } => {
            let pool = commands::connect(&config).await?;
            let result = commands::run_sync(&pool, &config).await;
            pool.close().await;
            result
        }
        Commands::Migrate => {
            let pool = commands::connect(&config).await?;
            let result = commands::run_migrate(&pool).await;
            pool.close().await;
            result
        }
        Commands::Products => {
            let pool = commands::connect(&config).await?;
            let result = commands::run_products(&pool).await;
            pool.close().await;
            result
        }
    }
}
