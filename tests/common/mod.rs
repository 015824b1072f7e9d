#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use crm_maintenance::{
    activity_log::ActivityLog,
    db::{self, DbConfig, DbPool},
    entities::{customer, order},
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use tempfile::TempDir;
use uuid::Uuid;

/// Fixed evaluation instant so boundary cases are exact.
pub fn run_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    run_at() - Duration::days(days)
}

/// SQLite database in a temporary directory, migrated with the embedded migrator.
pub struct TestDb {
    dir: TempDir,
    pub pool: Arc<DbPool>,
}

impl TestDb {
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Database without any tables, for exercising store failures.
    pub async fn unmigrated() -> Self {
        Self::build(false).await
    }

    async fn build(migrate: bool) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("crm.db").display());
        let pool = db::establish_connection_with_config(&DbConfig {
            url,
            max_connections: 2,
            ..Default::default()
        })
        .await
        .expect("failed to create test database");

        if migrate {
            db::run_migrations(&pool)
                .await
                .expect("failed to run migrations in tests");
        }

        Self {
            dir,
            pool: Arc::new(pool),
        }
    }

    pub fn log(&self, name: &str) -> ActivityLog {
        ActivityLog::new(self.log_path(name))
    }

    pub fn log_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read_log(&self, name: &str) -> String {
        std::fs::read_to_string(self.log_path(name)).unwrap_or_default()
    }

    pub async fn insert_customer(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        customer::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            email: Set(format!("{}-{}@example.com", name.to_lowercase(), id.simple())),
            phone: Set(None),
            created_at: Set(days_ago(1000)),
            updated_at: Set(days_ago(1000)),
        }
        .insert(self.pool.as_ref())
        .await
        .expect("insert customer");
        id
    }

    pub async fn insert_order(&self, customer_id: Uuid, created_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        order::ActiveModel {
            id: Set(id),
            customer_id: Set(customer_id),
            total_amount: Set(Decimal::new(4999, 2)),
            order_date: Set(created_at),
            created_at: Set(created_at),
            updated_at: Set(created_at),
        }
        .insert(self.pool.as_ref())
        .await
        .expect("insert order");
        id
    }

    pub async fn customer_exists(&self, id: Uuid) -> bool {
        customer::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await
            .expect("load customer")
            .is_some()
    }

    pub async fn customer_count(&self) -> u64 {
        customer::Entity::find()
            .count(self.pool.as_ref())
            .await
            .expect("count customers")
    }

    pub async fn order_count(&self) -> u64 {
        order::Entity::find()
            .count(self.pool.as_ref())
            .await
            .expect("count orders")
    }
}
