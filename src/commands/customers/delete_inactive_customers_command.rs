use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use metrics::counter;
use sea_orm::sea_query::{Query, SimpleExpr};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::{
    commands::Command,
    db::DbPool,
    entities::{
        customer::{self, Entity as Customer},
        order::{self, Entity as Order},
    },
    errors::ServiceError,
};

/// Trailing window in which a customer must have placed an order to be kept.
pub const INACTIVITY_WINDOW_DAYS: i64 = 365;

/// Oldest order timestamp that still counts as recent activity.
pub fn inactivity_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(INACTIVITY_WINDOW_DAYS)
}

/// Deletes every customer with no order created on or after the cutoff.
///
/// Customers that never ordered anything are inactive too. Counting and
/// deleting share one transaction so the reported figure matches the rows
/// actually removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteInactiveCustomersCommand {
    /// Moment the sweep is evaluated at
    pub as_of: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactiveCustomerSweep {
    pub cutoff: DateTime<Utc>,
    /// Customers matching the predicate when the transaction started
    pub matched: u64,
    /// Customers actually deleted
    pub deleted: u64,
}

impl DeleteInactiveCustomersCommand {
    pub fn as_of(as_of: DateTime<Utc>) -> Self {
        Self { as_of }
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        inactivity_cutoff(self.as_of)
    }

    fn inactive_condition(cutoff: DateTime<Utc>) -> SimpleExpr {
        customer::Column::Id.not_in_subquery(
            Query::select()
                .column(order::Column::CustomerId)
                .from(Order)
                .and_where(order::Column::CreatedAt.gte(cutoff))
                .to_owned(),
        )
    }

    async fn sweep<C: ConnectionTrait>(
        &self,
        db: &C,
        cutoff: DateTime<Utc>,
    ) -> Result<(u64, u64), DbErr> {
        let matched = Customer::find()
            .filter(Self::inactive_condition(cutoff))
            .count(db)
            .await?;

        let result = Customer::delete_many()
            .filter(Self::inactive_condition(cutoff))
            .exec(db)
            .await?;

        Ok((matched, result.rows_affected))
    }
}

#[async_trait]
impl Command for DeleteInactiveCustomersCommand {
    type Result = InactiveCustomerSweep;

    #[instrument(skip(self, db_pool), fields(as_of = %self.as_of))]
    async fn execute(&self, db_pool: Arc<DbPool>) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();
        let cutoff = self.cutoff();

        let txn = db.begin().await.map_err(|e| {
            error!("Failed to open cleanup transaction: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        // Dropping an uncommitted transaction rolls it back.
        let (matched, deleted) = self.sweep(&txn, cutoff).await.map_err(|e| {
            error!("Failed to delete inactive customers: {}", e);
            ServiceError::DatabaseError(e)
        })?;

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        if matched != deleted {
            warn!(matched, deleted, "Inactive customer count changed during sweep");
        }

        counter!("crm.customers.deleted", deleted);
        info!(%cutoff, deleted, "Deleted inactive customers");

        Ok(InactiveCustomerSweep {
            cutoff,
            matched,
            deleted,
        })
    }
}
