//! Medication Service - HTTP server for the medication catalogue.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medication_service_lib::config::MedicationServiceConfig;
use medication_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "medication-service")]
#[command(about = "Medication catalogue microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "MEDICATION_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "MEDICATION_SERVICE_PORT", default_value = "8001")]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = MedicationServiceConfig::from_env()?;
            config.service.host = host;
            config.service.port = port;
            medication_service_lib::run_server_with_config(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            medication_service_lib::run_migrations(migrate_action).await?;
        }
    }

    Ok(())
}
