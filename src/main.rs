//! Deletes customers with no order in the past 365 days and appends the
//! count to the cleanup log. Takes no arguments.

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use crm_maintenance as crm;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = crm::config::load_config().context("failed to load configuration")?;
    crm::config::init_tracing(cfg.log_level(), cfg.log_json);

    let db_pool = crm::db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to the CRM database")?;

    let log = crm::ActivityLog::new(&cfg.cleanup_log_path);
    crm::jobs::clean_inactive_customers::run(Arc::new(db_pool), &log, Utc::now())
        .await
        .context("inactive customer cleanup failed")?;

    Ok(())
}
