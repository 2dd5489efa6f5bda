//! License/induction lifecycle: status derived and stored on every write, and
//! the explicit ownership cascade when an employee is deleted.

mod common;

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crewtrack_server::entities::induction::InductionStatus;
use crewtrack_server::entities::license::LicenseStatus;
use crewtrack_server::entities::prelude::{Document, EmergencyContact, Induction, License};
use crewtrack_server::entities::{document, emergency_contact, induction, license};
use crewtrack_server::service::contacts::{self, CreateContact};
use crewtrack_server::service::documents::{self, CreateDocument};
use crewtrack_server::service::employees;
use crewtrack_server::service::inductions::{self, CreateInduction, UpdateInduction};
use crewtrack_server::service::licenses::{self, CreateLicense, UpdateLicense};
use crewtrack_server::service::status::license_details;
use crewtrack_server::service::ServiceError;

fn license_input(employee_id: i32, expiry: chrono::NaiveDate) -> CreateLicense {
    CreateLicense {
        employee_id,
        name: "Forklift licence".to_string(),
        license_number: Some("LF-2041".to_string()),
        issue_date: common::date(2023, 1, 1),
        expiry_date: expiry,
        issuing_authority: None,
        document_url: None,
        notes: None,
    }
}

#[tokio::test]
async fn license_status_is_derived_at_create_time() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;
    let today = common::date(2023, 1, 20);

    // 11 days remaining.
    let soon = licenses::create_license(
        &db,
        license_input(employee.id, common::date(2023, 1, 31)),
        today,
    )
    .await
    .unwrap();
    assert_eq!(soon.status, LicenseStatus::ExpiringSoon);

    let valid = licenses::create_license(
        &db,
        license_input(employee.id, common::date(2024, 1, 1)),
        today,
    )
    .await
    .unwrap();
    assert_eq!(valid.status, LicenseStatus::Valid);
}

#[tokio::test]
async fn create_rejects_expiry_on_or_before_issue() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;

    let err = licenses::create_license(
        &db,
        license_input(employee.id, common::date(2023, 1, 1)),
        common::date(2023, 1, 20),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn update_recomputes_status_from_new_dates() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;
    let today = common::date(2023, 6, 1);

    let license = licenses::create_license(
        &db,
        license_input(employee.id, common::date(2024, 1, 1)),
        today,
    )
    .await
    .unwrap();
    assert_eq!(license.status, LicenseStatus::Valid);

    let license = licenses::update_license(
        &db,
        license.id,
        UpdateLicense {
            expiry_date: Some(common::date(2023, 6, 10)),
            ..Default::default()
        },
        today,
    )
    .await
    .unwrap();
    assert_eq!(license.status, LicenseStatus::ExpiringSoon);
}

#[tokio::test]
async fn renewal_pending_survives_unrelated_patches() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;
    let today = common::date(2023, 6, 1);

    let license = licenses::create_license(
        &db,
        license_input(employee.id, common::date(2023, 6, 20)),
        today,
    )
    .await
    .unwrap();

    let license = licenses::update_license(
        &db,
        license.id,
        UpdateLicense {
            status: Some(LicenseStatus::RenewalPending),
            ..Default::default()
        },
        today,
    )
    .await
    .unwrap();
    assert_eq!(license.status, LicenseStatus::RenewalPending);

    // A notes-only patch must not drop the in-flight renewal.
    let license = licenses::update_license(
        &db,
        license.id,
        UpdateLicense {
            notes: Some("Renewal lodged 2023-05-30".to_string()),
            ..Default::default()
        },
        today,
    )
    .await
    .unwrap();
    assert_eq!(license.status, LicenseStatus::RenewalPending);
}

#[tokio::test]
async fn caller_supplied_status_must_match_derivation() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;
    let today = common::date(2023, 6, 1);

    let license = licenses::create_license(
        &db,
        license_input(employee.id, common::date(2024, 1, 1)),
        today,
    )
    .await
    .unwrap();

    let err = licenses::update_license(
        &db,
        license.id,
        UpdateLicense {
            status: Some(LicenseStatus::Expired),
            ..Default::default()
        },
        today,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn induction_expires_unless_completed() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;
    let today = common::date(2024, 5, 15);

    let stale = inductions::create_induction(
        &db,
        CreateInduction {
            employee_id: employee.id,
            name: "Confined spaces".to_string(),
            completed_date: None,
            expiry_date: Some(common::date(2024, 1, 1)),
            status: Some(InductionStatus::InProgress),
            provider: None,
            notes: None,
        },
        today,
    )
    .await
    .unwrap();
    assert_eq!(stale.status, InductionStatus::Expired);

    let completed = inductions::create_induction(
        &db,
        CreateInduction {
            employee_id: employee.id,
            name: "First aid".to_string(),
            completed_date: Some(common::date(2023, 12, 1)),
            expiry_date: Some(common::date(2024, 1, 1)),
            status: None,
            provider: None,
            notes: None,
        },
        today,
    )
    .await
    .unwrap();
    assert_eq!(completed.status, InductionStatus::Completed);
}

#[tokio::test]
async fn expired_cannot_be_requested_directly() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;
    let today = common::date(2024, 5, 15);

    let induction = inductions::create_induction(
        &db,
        CreateInduction {
            employee_id: employee.id,
            name: "Manual handling".to_string(),
            completed_date: None,
            expiry_date: None,
            status: None,
            provider: None,
            notes: None,
        },
        today,
    )
    .await
    .unwrap();
    assert_eq!(induction.status, InductionStatus::Pending);

    let err = inductions::update_induction(
        &db,
        induction.id,
        UpdateInduction {
            status: Some(InductionStatus::Expired),
            ..Default::default()
        },
        today,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn legacy_notes_still_surface_structured_details() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;

    let license = licenses::create_license(
        &db,
        CreateLicense {
            notes: Some("Authority: SafeWork NSW\nDocument: https://files.example/lic.pdf".into()),
            ..license_input(employee.id, common::date(2024, 1, 1))
        },
        common::date(2023, 6, 1),
    )
    .await
    .unwrap();

    let details = license_details(&license);
    assert_eq!(details.issuing_authority.as_deref(), Some("SafeWork NSW"));
    assert_eq!(
        details.document_url.as_deref(),
        Some("https://files.example/lic.pdf")
    );
}

#[tokio::test]
async fn deleting_an_employee_cascades_to_all_children() {
    let db = common::setup_db().await;
    let employee = common::seed_employee(&db, "dana@example.com").await;
    let bystander = common::seed_employee(&db, "sam@example.com").await;
    let today = common::date(2023, 6, 1);

    licenses::create_license(&db, license_input(employee.id, common::date(2024, 1, 1)), today)
        .await
        .unwrap();
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
        today,
    )
    .await
    .unwrap();
    contacts::create_contact(
        &db,
        CreateContact {
            employee_id: employee.id,
            name: "Alex".to_string(),
            relationship: "Partner".to_string(),
            phone: "0400 000 000".to_string(),
            email: None,
            address: None,
            is_primary: true,
        },
    )
    .await
    .unwrap();
    documents::create_document(
        &db,
        CreateDocument {
            employee_id: employee.id,
            name: "Contract".to_string(),
            file_url: "https://files.example/contract.pdf".to_string(),
        },
    )
    .await
    .unwrap();
    let kept = licenses::create_license(
        &db,
        license_input(bystander.id, common::date(2024, 1, 1)),
        today,
    )
    .await
    .unwrap();

    assert!(employees::delete_employee(&db, employee.id).await.unwrap());

    for count in [
        License::find()
            .filter(license::Column::EmployeeId.eq(employee.id))
            .count(&db)
            .await
            .unwrap(),
        Induction::find()
            .filter(induction::Column::EmployeeId.eq(employee.id))
            .count(&db)
            .await
            .unwrap(),
        EmergencyContact::find()
            .filter(emergency_contact::Column::EmployeeId.eq(employee.id))
            .count(&db)
            .await
            .unwrap(),
        Document::find()
            .filter(document::Column::EmployeeId.eq(employee.id))
            .count(&db)
            .await
            .unwrap(),
    ] {
        assert_eq!(count, 0);
    }

    // Another employee's records are untouched.
    assert!(License::find_by_id(kept.id).one(&db).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_missing_records_reports_absent() {
    let db = common::setup_db().await;
    assert!(!licenses::delete_license(&db, 7).await.unwrap());
    assert!(!inductions::delete_induction(&db, 7).await.unwrap());
    assert!(!employees::delete_employee(&db, 7).await.unwrap());
}
