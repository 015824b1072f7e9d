mod common;

use assert_matches::assert_matches;
use chrono::Duration;
use common::{days_ago, run_at, TestDb};
use crm_maintenance::{
    commands::{orders::ListRecentOrdersCommand, Command},
    jobs::send_order_reminders,
    ServiceError,
};
use rstest::rstest;

const LOG: &str = "order_reminders_log.txt";

#[tokio::test]
async fn logs_one_reminder_per_order_in_the_last_week() {
    let db = TestDb::new().await;
    let alice = db.insert_customer("Alice").await;
    let recent = db.insert_order(alice, days_ago(2)).await;
    let edge = db.insert_order(alice, days_ago(6)).await;
    let stale = db.insert_order(alice, days_ago(30)).await;

    let sent = send_order_reminders::run(db.pool.clone(), &db.log(LOG), run_at())
        .await
        .unwrap();

    assert_eq!(sent, 2);
    let contents = db.read_log(LOG);
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains(&format!("Reminder: Order {} for alice-", edge)));
    assert!(contents.contains(&format!("Reminder: Order {} for alice-", recent)));
    assert!(!contents.contains(&stale.to_string()));
}

#[rstest]
#[case::exactly_a_week(Duration::days(7), 1)]
#[case::one_second_inside(Duration::days(7) - Duration::seconds(1), 1)]
#[case::one_second_past(Duration::days(7) + Duration::seconds(1), 0)]
#[case::hours_past_the_week(Duration::days(7) + Duration::hours(6), 0)]
#[tokio::test]
async fn reminder_window_is_exactly_seven_days(#[case] age: Duration, #[case] expected: usize) {
    let db = TestDb::new().await;
    let dave = db.insert_customer("Dave").await;
    db.insert_order(dave, run_at() - age).await;

    let sent = send_order_reminders::run(db.pool.clone(), &db.log(LOG), run_at())
        .await
        .unwrap();

    assert_eq!(sent, expected);
    assert_eq!(db.read_log(LOG).lines().count(), expected);
}

#[tokio::test]
async fn recent_orders_are_sorted_by_order_date_with_customer_email() {
    let db = TestDb::new().await;
    let bob = db.insert_customer("Bob").await;
    let later = db.insert_order(bob, run_at() - Duration::hours(1)).await;
    let earlier = db.insert_order(bob, days_ago(3)).await;

    let orders = ListRecentOrdersCommand {
        since: days_ago(7),
    }
    .execute(db.pool.clone())
    .await
    .unwrap();

    let ids: Vec<_> = orders.iter().map(|o| o.order_id).collect();
    assert_eq!(ids, vec![earlier, later]);
    assert!(orders
        .iter()
        .all(|o| o.customer_email.as_deref().is_some_and(|e| e.starts_with("bob-"))));
}

#[tokio::test]
async fn no_recent_orders_writes_nothing() {
    let db = TestDb::new().await;
    let carol = db.insert_customer("Carol").await;
    db.insert_order(carol, days_ago(60)).await;

    let sent = send_order_reminders::run(db.pool.clone(), &db.log(LOG), run_at())
        .await
        .unwrap();

    assert_eq!(sent, 0);
    assert!(db.read_log(LOG).is_empty());
}

#[tokio::test]
async fn failures_are_recorded_in_the_log() {
    let db = TestDb::unmigrated().await;

    let err = send_order_reminders::run(db.pool.clone(), &db.log(LOG), run_at())
        .await
        .unwrap_err();

    assert_matches!(err, ServiceError::DatabaseError(_));
    let contents = db.read_log(LOG);
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("Error processing reminders: Database error"));
}
