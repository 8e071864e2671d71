//! User Service - HTTP server for user management.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_service_lib::config::UserServiceConfig;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User management microservice")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "USER_SERVICE_HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "USER_SERVICE_PORT", default_value = "8000")]
        port: u16,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Create the first administrator account
    SeedAdmin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
        #[arg(long)]
        phone_number: String,
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
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = UserServiceConfig::from_env()?;
            config.service.host = host;
            config.service.port = port;
            user_service_lib::run_server_with_config(config).await?;
        }
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(action.into()).await?;
        }
        Commands::SeedAdmin {
            email,
            password,
            phone_number,
        } => {
            user_service_lib::seed_admin(&email, &password, &phone_number).await?;
        }
    }

    Ok(())
}
