use chrono::{DateTime, Utc};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    activity_log::{format_local, ActivityLog, HEARTBEAT_TIMESTAMP_FORMAT},
    errors::ServiceError,
};

/// Result of asking the CRM GraphQL endpoint for `{ hello }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ok,
    HttpError(u16),
    Unreachable(String),
}

impl ProbeOutcome {
    fn describe(&self) -> String {
        match self {
            ProbeOutcome::Ok => "(GraphQL OK)".to_string(),
            ProbeOutcome::HttpError(status) => format!("(GraphQL ERROR {})", status),
            ProbeOutcome::Unreachable(reason) => format!("(GraphQL unreachable: {})", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphqlProbe {
    client: reqwest::Client,
    endpoint: String,
}

impl GraphqlProbe {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::ExternalServiceError(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Never fails: transport errors are reported as `Unreachable`.
    pub async fn check(&self) -> ProbeOutcome {
        debug!(endpoint = %self.endpoint, "Probing GraphQL endpoint");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": "{ hello }" }))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == reqwest::StatusCode::OK => ProbeOutcome::Ok,
            Ok(resp) => ProbeOutcome::HttpError(resp.status().as_u16()),
            Err(err) => ProbeOutcome::Unreachable(err.to_string()),
        }
    }
}

pub fn heartbeat_line(at: DateTime<Utc>, outcome: Option<&ProbeOutcome>) -> String {
    let timestamp = format_local(at, HEARTBEAT_TIMESTAMP_FORMAT);
    match outcome {
        Some(outcome) => format!("{} CRM is alive {}", timestamp, outcome.describe()),
        None => format!("{} CRM is alive", timestamp),
    }
}

/// Appends one heartbeat line, probing GraphQL first when a probe is given.
/// Returns the line written.
pub async fn run(
    log: &ActivityLog,
    probe: Option<&GraphqlProbe>,
    now: DateTime<Utc>,
) -> Result<String, ServiceError> {
    let outcome = match probe {
        Some(probe) => Some(probe.check().await),
        None => None,
    };

    let line = heartbeat_line(now, outcome.as_ref());
    log.append_line(&line).await?;

    info!(
        target: "crm_maintenance::jobs",
        outcome = ?outcome,
        "[cron:crm_heartbeat] done"
    );
    Ok(line)
}
