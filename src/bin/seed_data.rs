//! Seed data script - populates the CRM database with demo customers and orders
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates (idempotently, keyed by email):
//! - 4 customers
//! - 5 orders dated now, for randomly chosen customers
//! - optionally, customers whose only order is older than the inactivity window

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

use crm_maintenance as crm;
use crm::entities::{customer, order};

#[derive(Parser)]
#[command(name = "seed-data", about = "Populate the CRM database with demo data", version)]
struct Cli {
    /// Also create this many customers whose last order is 400 days old
    #[arg(long, default_value_t = 0)]
    inactive: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = crm::config::load_config().context("failed to load configuration")?;
    crm::config::init_tracing(cfg.log_level(), cfg.log_json);
    cfg.auto_migrate = true;

    info!("=== CRM Seed Data ===");
    let db = crm::db::establish_connection_from_app_config(&cfg).await?;

    let customers = seed_customers(&db).await?;
    info!("Seeded {} customers", customers.len());

    let orders = seed_orders(&db, &customers).await?;
    info!("Created {} orders", orders);

    if cli.inactive > 0 {
        let stale = seed_inactive_customers(&db, cli.inactive).await?;
        info!("Created {} inactive customers", stale);
    }

    info!("=== Seed Data Complete ===");
    Ok(())
}

async fn get_or_create_customer(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    phone: Option<&str>,
    created_at: DateTime<Utc>,
) -> anyhow::Result<customer::Model> {
    if let Some(existing) = customer::Entity::find()
        .filter(customer::Column::Email.eq(email))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let model = customer::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        phone: Set(phone.map(str::to_string)),
        created_at: Set(created_at),
        updated_at: Set(created_at),
    }
    .insert(db)
    .await
    .with_context(|| format!("failed to create customer {}", email))?;

    Ok(model)
}

async fn create_order(
    db: &DatabaseConnection,
    customer_id: Uuid,
    total_amount: Decimal,
    at: DateTime<Utc>,
) -> anyhow::Result<order::Model> {
    let model = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        total_amount: Set(total_amount),
        order_date: Set(at),
        created_at: Set(at),
        updated_at: Set(at),
    }
    .insert(db)
    .await?;
    Ok(model)
}

async fn seed_customers(db: &DatabaseConnection) -> anyhow::Result<Vec<customer::Model>> {
    let customers_data = [
        ("Alice Johnson", "alice@example.com", Some("+1234567890")),
        ("Bob Smith", "bob@example.com", Some("123-456-7890")),
        ("Carol White", "carol@example.com", None),
        ("David Brown", "david@example.com", Some("+1987654321")),
    ];

    let now = Utc::now();
    let mut created = Vec::with_capacity(customers_data.len());
    for (name, email, phone) in customers_data {
        created.push(get_or_create_customer(db, name, email, phone, now).await?);
    }
    Ok(created)
}

async fn seed_orders(db: &DatabaseConnection, customers: &[customer::Model]) -> anyhow::Result<usize> {
    let prices = [dec!(999.99), dec!(699.99), dec!(399.99), dec!(199.99), dec!(89.99)];
    let now = Utc::now();
    let mut rng = rand::thread_rng();

    let mut count = 0;
    for _ in 0..5 {
        let (Some(customer), Some(price)) = (customers.choose(&mut rng), prices.choose(&mut rng))
        else {
            continue;
        };
        create_order(db, customer.id, *price, now).await?;
        count += 1;
    }
    Ok(count)
}

async fn seed_inactive_customers(db: &DatabaseConnection, count: u32) -> anyhow::Result<u32> {
    let long_ago = Utc::now() - Duration::days(400);
    for i in 0..count {
        let email = format!("dormant{}@example.com", i + 1);
        let customer =
            get_or_create_customer(db, &format!("Dormant Customer {}", i + 1), &email, None, long_ago)
                .await?;
        create_order(db, customer.id, dec!(19.99), long_ago).await?;
    }
    Ok(count)
}
