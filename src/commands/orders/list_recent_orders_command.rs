use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{
    commands::Command,
    db::DbPool,
    entities::{
        customer::Entity as Customer,
        order::{self, Entity as Order},
    },
    errors::ServiceError,
};

pub const REMINDER_WINDOW_DAYS: i64 = 7;

/// Exactly `REMINDER_WINDOW_DAYS` before `now`; orders at this instant are included.
pub fn reminder_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(REMINDER_WINDOW_DAYS)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecentOrdersCommand {
    pub since: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub order_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub customer_email: Option<String>,
}

#[async_trait]
impl Command for ListRecentOrdersCommand {
    type Result = Vec<RecentOrder>;

    #[instrument(skip(self, db_pool), fields(since = %self.since))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        let rows = Order::find()
            .filter(order::Column::OrderDate.gte(self.since))
            .order_by_asc(order::Column::OrderDate)
            .find_also_related(Customer)
            .all(db)
            .await
            .map_err(|e| {
                error!("Failed to load recent orders: {}", e);
                ServiceError::DatabaseError(e)
            })?;

        info!(count = rows.len(), "Loaded recent orders");

        Ok(rows
            .into_iter()
            .map(|(order, customer)| RecentOrder {
                order_id: order.id,
                order_date: order.order_date,
                customer_email: customer.map(|c| c.email),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_starts_exactly_a_week_back() {
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 45, 12).unwrap();
        assert_eq!(
            reminder_window_start(now),
            Utc.with_ymd_and_hms(2026, 10, 8, 17, 45, 12).unwrap()
        );
    }
}
