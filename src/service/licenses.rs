use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::info;

use crate::entities::license::{self, LicenseStatus};
use crate::entities::prelude::License;

use super::employees::ensure_employee_exists;
use super::status::{derive_license_status, resolve_license_status, validate_license_dates};
use super::{require_non_empty, ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLicense {
    pub employee_id: i32,
    pub name: String,
    pub license_number: Option<String>,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub issuing_authority: Option<String>,
    pub document_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLicense {
    pub name: Option<String>,
    pub license_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<LicenseStatus>,
    pub issuing_authority: Option<String>,
    pub document_url: Option<String>,
    pub notes: Option<String>,
}

pub async fn create_license(
    db: &DatabaseConnection,
    input: CreateLicense,
    today: NaiveDate,
) -> ServiceResult<license::Model> {
    require_non_empty(&input.name, "name")?;
    validate_license_dates(input.issue_date, input.expiry_date)?;
    ensure_employee_exists(db, input.employee_id).await?;

    let status = resolve_license_status(None, input.expiry_date, today)?;
    let now = Utc::now().naive_utc();
    let license = license::ActiveModel {
        employee_id: Set(input.employee_id),
        name: Set(input.name),
        license_number: Set(input.license_number),
        issue_date: Set(input.issue_date),
        expiry_date: Set(input.expiry_date),
        status: Set(status),
        issuing_authority: Set(input.issuing_authority),
        document_url: Set(input.document_url),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        license_id = license.id,
        employee_id = license.employee_id,
        status = ?license.status,
        "created license"
    );
    Ok(license)
}

pub async fn update_license(
    db: &DatabaseConnection,
    license_id: i32,
    patch: UpdateLicense,
    today: NaiveDate,
) -> ServiceResult<license::Model> {
    if let Some(name) = &patch.name {
        require_non_empty(name, "name")?;
    }

    let license = License::find_by_id(license_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("license"))?;

    let issue_date = patch.issue_date.unwrap_or(license.issue_date);
    let expiry_date = patch.expiry_date.unwrap_or(license.expiry_date);
    validate_license_dates(issue_date, expiry_date)?;

    // An unrelated patch must not silently drop an in-flight renewal, but a
    // license that has since expired loses the renewal marker.
    let derived = derive_license_status(expiry_date, today);
    let requested = match patch.status {
        Some(status) => Some(status),
        None if license.status == LicenseStatus::RenewalPending
            && derived != LicenseStatus::Expired =>
        {
            Some(LicenseStatus::RenewalPending)
        }
        None => None,
    };
    let status = resolve_license_status(requested, expiry_date, today)?;

    let mut active = license.into_active_model();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(license_number) = patch.license_number {
        active.license_number = Set(Some(license_number));
    }
    if let Some(issuing_authority) = patch.issuing_authority {
        active.issuing_authority = Set(Some(issuing_authority));
    }
    if let Some(document_url) = patch.document_url {
        active.document_url = Set(Some(document_url));
    }
    if let Some(notes) = patch.notes {
        active.notes = Set(Some(notes));
    }
    active.issue_date = Set(issue_date);
    active.expiry_date = Set(expiry_date);
    active.status = Set(status);
    active.updated_at = Set(Utc::now().naive_utc());

    let license = active.update(db).await?;
    info!(
        license_id = license.id,
        status = ?license.status,
        "updated license"
    );
    Ok(license)
}

pub async fn delete_license(db: &DatabaseConnection, license_id: i32) -> ServiceResult<bool> {
    let res = License::delete_by_id(license_id).exec(db).await?;
    if res.rows_affected == 0 {
        return Ok(false);
    }
    info!(license_id, "deleted license");
    Ok(true)
}

pub async fn list_by_employee(
    db: &DatabaseConnection,
    employee_id: i32,
) -> ServiceResult<Vec<license::Model>> {
    ensure_employee_exists(db, employee_id).await?;
    let licenses = License::find()
        .filter(license::Column::EmployeeId.eq(employee_id))
        .order_by_asc(license::Column::ExpiryDate)
        .order_by_asc(license::Column::Id)
        .all(db)
        .await?;
    Ok(licenses)
}
