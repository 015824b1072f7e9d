use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    activity_log::{format_local, ActivityLog, ASCTIME_FORMAT},
    commands::{
        orders::{reminder_window_start, ListRecentOrdersCommand, RecentOrder},
        Command,
    },
    db::DbPool,
    errors::ServiceError,
};

fn reminder_message(order: &RecentOrder) -> String {
    format!(
        "Reminder: Order {} for {}",
        order.order_id,
        order.customer_email.as_deref().unwrap_or("unknown customer")
    )
}

/// Logs a reminder for every order placed in the past week.
///
/// Failures are recorded in `log` as well as returned.
pub async fn run(
    db_pool: Arc<DbPool>,
    log: &ActivityLog,
    now: DateTime<Utc>,
) -> Result<usize, ServiceError> {
    match send_reminders(db_pool, log, now).await {
        Ok(sent) => {
            info!(
                target: "crm_maintenance::jobs",
                sent,
                "[cron:send_order_reminders] done"
            );
            Ok(sent)
        }
        Err(err) => {
            error!(target: "crm_maintenance::jobs", error = %err, "[cron:send_order_reminders] failed");
            let line = format!(
                "{} Error processing reminders: {}",
                format_local(Utc::now(), ASCTIME_FORMAT),
                err
            );
            if let Err(log_err) = log.append_line(&line).await {
                warn!(error = %log_err, "Could not record reminder failure");
            }
            Err(err)
        }
    }
}

async fn send_reminders(
    db_pool: Arc<DbPool>,
    log: &ActivityLog,
    now: DateTime<Utc>,
) -> Result<usize, ServiceError> {
    let orders = ListRecentOrdersCommand {
        since: reminder_window_start(now),
    }
    .execute(db_pool)
    .await?;

    for order in &orders {
        let line = format!(
            "{} {}",
            format_local(Utc::now(), ASCTIME_FORMAT),
            reminder_message(order)
        );
        log.append_line(&line).await?;
    }

    Ok(orders.len())
}
