use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crm_maintenance as crm;

#[derive(Parser)]
#[command(name = "migration", about = "Manage the CRM maintenance schema", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<MigrationCommand>,
}

#[derive(Subcommand, Clone, Copy)]
enum MigrationCommand {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back every applied migration
    Down,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = crm::config::load_config().context("failed to load configuration")?;
    crm::config::init_tracing(cfg.log_level(), cfg.log_json);

    info!("Starting database migration");
    let pool = crm::db::establish_connection(cfg.database_url())
        .await
        .context("failed to connect to the CRM database")?;

    match cli.command.unwrap_or(MigrationCommand::Up) {
        MigrationCommand::Up => crm::db::run_migrations(&pool).await?,
        MigrationCommand::Down => crm::db::rollback_migrations(&pool).await?,
    }

    info!("Migration completed successfully");
    Ok(())
}
