//! Appends a liveness line to the heartbeat log, probing the CRM GraphQL
//! endpoint unless the probe is disabled.

use anyhow::Context;
use chrono::Utc;

use crm_maintenance as crm;
use crm::jobs::crm_heartbeat::{self, GraphqlProbe};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = crm::config::load_config().context("failed to load configuration")?;
    crm::config::init_tracing(cfg.log_level(), cfg.log_json);

    let probe = cfg
        .graphql_probe_endpoint()
        .map(|endpoint| GraphqlProbe::new(endpoint, cfg.heartbeat_timeout()))
        .transpose()?;

    let log = crm::ActivityLog::new(&cfg.heartbeat_log_path);
    crm_heartbeat::run(&log, probe.as_ref(), Utc::now())
        .await
        .context("failed to write heartbeat")?;

    Ok(())
}
