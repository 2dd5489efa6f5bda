//! The expiry lookahead window: inclusive bounds, ascending order, and no
//! already-expired or open-ended records.

mod common;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crewtrack_server::service::expiry::{self, ExpiringRecord, RecordKind};
use crewtrack_server::service::inductions::{self, CreateInduction};
use crewtrack_server::service::licenses::{self, CreateLicense};
use crewtrack_server::service::ServiceError;

const TODAY: (i32, u32, u32) = (2024, 5, 15);

fn today() -> NaiveDate {
    common::date(TODAY.0, TODAY.1, TODAY.2)
}

async fn seed_license(
    db: &DatabaseConnection,
    employee_id: i32,
    name: &str,
    expiry: NaiveDate,
) -> i32 {
    licenses::create_license(
        db,
        CreateLicense {
            employee_id,
            name: name.to_string(),
            license_number: None,
            issue_date: common::date(2020, 1, 1),
            expiry_date: expiry,
            issuing_authority: None,
            document_url: None,
            notes: None,
        },
        today(),
    )
    .await
    .expect("seed license")
    .id
}

#[tokio::test]
async fn window_is_inclusive_and_sorted_soonest_first() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;

    let expired = seed_license(&db, employee.id, "Expired", common::date(2024, 5, 14)).await;
    let last_day = seed_license(&db, employee.id, "LastDay", common::date(2024, 6, 14)).await;
    let due_today = seed_license(&db, employee.id, "DueToday", today()).await;
    let beyond = seed_license(&db, employee.id, "Beyond", common::date(2024, 6, 15)).await;

    let entries = expiry::query_expiring(&db, RecordKind::License, 30, today())
        .await
        .unwrap();

    let ids: Vec<i32> = entries
        .iter()
        .map(|entry| match &entry.record {
            ExpiringRecord::License(license) => license.id,
            ExpiringRecord::Induction(_) => panic!("only licenses were requested"),
        })
        .collect();
    // Soonest first; the expired and beyond-window records never appear.
    assert_eq!(ids, vec![due_today, last_day]);
    assert!(!ids.contains(&expired));
    assert!(!ids.contains(&beyond));

    assert_eq!(entries[0].days_remaining, 0);
    assert_eq!(entries[1].days_remaining, 30);
    assert_eq!(entries[0].employee.email, "dana@example.com");
}

#[tokio::test]
async fn zero_day_window_means_due_today_only() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;

    seed_license(&db, employee.id, "Tomorrow", common::date(2024, 5, 16)).await;
    let due_today = seed_license(&db, employee.id, "DueToday", today()).await;

    let entries = expiry::query_expiring(&db, RecordKind::License, 0, today())
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    match &entries[0].record {
        ExpiringRecord::License(license) => assert_eq!(license.id, due_today),
        ExpiringRecord::Induction(_) => panic!("only licenses were requested"),
    }
}

#[tokio::test]
async fn negative_window_is_rejected_before_the_datastore() {
    let db = common::setup_db().await;
    let err = expiry::query_expiring(&db, RecordKind::License, -1, today())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn nothing_expiring_is_an_empty_result_not_an_error() {
    let db = common::setup_db().await;
    let entries = expiry::query_expiring(&db, RecordKind::Induction, 30, today())
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn open_ended_inductions_never_appear() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;

    inductions::create_induction(
        &db,
        CreateInduction {
            employee_id: employee.id,
            name: "Site orientation".to_string(),
            completed_date: Some(common::date(2023, 2, 1)),
            expiry_date: None,
            status: None,
            provider: None,
            notes: None,
        },
        today(),
    )
    .await
    .unwrap();
    let renewable = inductions::create_induction(
        &db,
        CreateInduction {
            employee_id: employee.id,
            name: "Working at heights".to_string(),
            completed_date: Some(common::date(2023, 6, 1)),
            expiry_date: Some(common::date(2024, 6, 1)),
            status: None,
            provider: Some("SafetyCorp".to_string()),
            notes: None,
        },
        today(),
    )
    .await
    .unwrap();

    let entries = expiry::query_expiring(&db, RecordKind::Induction, 30, today())
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    match &entries[0].record {
        ExpiringRecord::Induction(induction) => assert_eq!(induction.id, renewable.id),
        ExpiringRecord::License(_) => panic!("only inductions were requested"),
    }
    assert_eq!(entries[0].days_remaining, 17);
}
