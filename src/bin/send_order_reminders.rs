//! Logs a reminder line for every order placed in the last week.

use std::sync::Arc;

use chrono::Utc;

use crm_maintenance as crm;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    println!("Order reminders processed!");
}

async fn run() -> anyhow::Result<()> {
    let cfg = crm::config::load_config()?;
    crm::config::init_tracing(cfg.log_level(), cfg.log_json);

    let db_pool = crm::db::establish_connection_from_app_config(&cfg).await?;
    let log = crm::ActivityLog::new(&cfg.order_reminders_log_path);

    crm::jobs::send_order_reminders::run(Arc::new(db_pool), &log, Utc::now()).await?;
    Ok(())
}
