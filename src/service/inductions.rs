use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::info;

use crate::entities::induction::{self, InductionStatus};
use crate::entities::prelude::Induction;

use super::employees::ensure_employee_exists;
use super::status::derive_induction_status;
use super::{require_non_empty, ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInduction {
    pub employee_id: i32,
    pub name: String,
    pub completed_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<InductionStatus>,
    pub provider: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInduction {
    pub name: Option<String>,
    pub completed_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<InductionStatus>,
    pub provider: Option<String>,
    pub notes: Option<String>,
}

fn reject_expired_request(status: Option<InductionStatus>) -> ServiceResult<()> {
    if status == Some(InductionStatus::Expired) {
        return Err(ServiceError::InvalidArgument(
            "expired is derived from the expiry date and cannot be set directly".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_induction(
    db: &DatabaseConnection,
    input: CreateInduction,
    today: NaiveDate,
) -> ServiceResult<induction::Model> {
    require_non_empty(&input.name, "name")?;
    reject_expired_request(input.status)?;
    ensure_employee_exists(db, input.employee_id).await?;

    let base = input.status.unwrap_or(if input.completed_date.is_some() {
        InductionStatus::Completed
    } else {
        InductionStatus::Pending
    });
    let status = derive_induction_status(base, input.expiry_date, today);

    let now = Utc::now().naive_utc();
    let induction = induction::ActiveModel {
        employee_id: Set(input.employee_id),
        name: Set(input.name),
        completed_date: Set(input.completed_date),
        expiry_date: Set(input.expiry_date),
        status: Set(status),
        provider: Set(input.provider),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        induction_id = induction.id,
        employee_id = induction.employee_id,
        status = ?induction.status,
        "created induction"
    );
    Ok(induction)
}

pub async fn update_induction(
    db: &DatabaseConnection,
    induction_id: i32,
    patch: UpdateInduction,
    today: NaiveDate,
) -> ServiceResult<induction::Model> {
    if let Some(name) = &patch.name {
        require_non_empty(name, "name")?;
    }
    reject_expired_request(patch.status)?;

    let induction = Induction::find_by_id(induction_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("induction"))?;

    let expiry_date = patch.expiry_date.or(induction.expiry_date);
    let base = patch.status.unwrap_or(induction.status);
    let status = derive_induction_status(base, expiry_date, today);

    let mut active = induction.into_active_model();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(completed_date) = patch.completed_date {
        active.completed_date = Set(Some(completed_date));
    }
    if let Some(provider) = patch.provider {
        active.provider = Set(Some(provider));
    }
    if let Some(notes) = patch.notes {
        active.notes = Set(Some(notes));
    }
    active.expiry_date = Set(expiry_date);
    active.status = Set(status);
    active.updated_at = Set(Utc::now().naive_utc());

    let induction = active.update(db).await?;
    info!(
        induction_id = induction.id,
        status = ?induction.status,
        "updated induction"
    );
    Ok(induction)
}

pub async fn delete_induction(db: &DatabaseConnection, induction_id: i32) -> ServiceResult<bool> {
    let res = Induction::delete_by_id(induction_id).exec(db).await?;
    if res.rows_affected == 0 {
        return Ok(false);
    }
    info!(induction_id, "deleted induction");
    Ok(true)
}

pub async fn list_by_employee(
    db: &DatabaseConnection,
    employee_id: i32,
) -> ServiceResult<Vec<induction::Model>> {
    ensure_employee_exists(db, employee_id).await?;
    let inductions = Induction::find()
        .filter(induction::Column::EmployeeId.eq(employee_id))
        .order_by_asc(induction::Column::ExpiryDate)
        .order_by_asc(induction::Column::Id)
        .all(db)
        .await?;
    Ok(inductions)
}
