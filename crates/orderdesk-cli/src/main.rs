//! Orderdesk admin CLI — database migration and account bootstrap.
//!
//! Reads DATABASE_URL (and the rest of the service configuration) from the
//! environment, like the API binary.

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use orderdesk_core::{auth, Config};
use orderdesk_db::UserRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "orderdesk", about = "Orderdesk admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a superuser account
    CreateSuperuser {
        username: String,
        /// Passed as a flag (not prompted) so the command works in
        /// provisioning scripts.
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("Migrations applied.");
        }
        Commands::CreateSuperuser { username, password } => {
            let password_hash = auth::hash_password(&password)?;
            let users = UserRepository::new(pool.clone());
            let user = users.create_user(&username, &password_hash, true).await?;
            println!("Superuser '{}' created ({}).", user.username, user.id);
        }
    }

    Ok(())
}

async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}
