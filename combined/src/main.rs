//! Combined binary for development - runs all services in one process.

use clap::{Parser, Subcommand};
use dbx::migration::MigrateAction;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pharmacy-platform")]
#[command(about = "Combined pharmacy platform binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "8000")]
        user_port: u16,
        #[arg(long, default_value = "8001")]
        medication_port: u16,
        #[arg(long, default_value = "8002")]
        pharmacy_port: u16,
    },
    /// Run database migrations for all services
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand, Clone, Copy)]
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

impl From<MigrateCommands> for MigrateAction {
    fn from(command: MigrateCommands) -> Self {
        match command {
            MigrateCommands::Up => MigrateAction::Up,
            MigrateCommands::Down => MigrateAction::Down,
            MigrateCommands::Status => MigrateAction::Status,
            MigrateCommands::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            user_port,
            medication_port,
            pharmacy_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  User service:       http://{}:{}", host, user_port);
            info!("  Medication service: http://{}:{}", host, medication_port);
            info!("  Pharmacy service:   http://{}:{}", host, pharmacy_port);

            let user_host = host.clone();
            let user_handle = tokio::spawn(async move {
                if let Err(e) = user_service_lib::run_embedded(&user_host, user_port).await {
                    error!("User service failed: {}", e);
                }
            });

            let medication_host = host.clone();
            let medication_handle = tokio::spawn(async move {
                if let Err(e) =
                    medication_service_lib::run_embedded(&medication_host, medication_port).await
                {
                    error!("Medication service failed: {}", e);
                }
            });

            let pharmacy_handle = tokio::spawn(async move {
                if let Err(e) = pharmacy_service_lib::run_embedded(&host, pharmacy_port).await {
                    error!("Pharmacy service failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = user_handle => {
                    error!("User service exited unexpectedly");
                }
                _ = medication_handle => {
                    error!("Medication service exited unexpectedly");
                }
                _ = pharmacy_handle => {
                    error!("Pharmacy service exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            let action = MigrateAction::from(action);
            user_service_lib::run_migrations(action).await?;
            medication_service_lib::run_migrations(action).await?;
            pharmacy_service_lib::run_migrations(action).await?;
        }
    }

    Ok(())
}
