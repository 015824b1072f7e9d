use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::{
    activity_log::{cleanup_line, ActivityLog},
    commands::{customers::DeleteInactiveCustomersCommand, Command},
    db::DbPool,
    errors::ServiceError,
};

/// Deletes inactive customers as of `now` and appends the count to `log`.
///
/// Nothing is written when the delete fails. A failed append surfaces as
/// `ServiceError::LogWriteError` after the delete has already committed.
pub async fn run(
    db_pool: Arc<DbPool>,
    log: &ActivityLog,
    now: DateTime<Utc>,
) -> Result<u64, ServiceError> {
    let sweep = DeleteInactiveCustomersCommand::as_of(now)
        .execute(db_pool)
        .await?;

    log.append_line(&cleanup_line(now, sweep.deleted)).await?;

    info!(
        target: "crm_maintenance::jobs",
        deleted = sweep.deleted,
        log = %log.path().display(),
        "[cron:clean_inactive_customers] done"
    );
    Ok(sweep.deleted)
}
