use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use crate::entities::employee::{self, EmployeeStatus};
use crate::entities::prelude::*;
use crate::entities::{document, emergency_contact, induction, license};

use super::{require_non_empty, ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub department: String,
    pub status: Option<EmployeeStatus>,
    pub hire_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub status: Option<EmployeeStatus>,
    pub hire_date: Option<NaiveDate>,
}

pub(crate) async fn ensure_employee_exists<C: ConnectionTrait>(
    conn: &C,
    employee_id: i32,
) -> ServiceResult<()> {
    let found = Employee::find_by_id(employee_id).count(conn).await?;
    if found == 0 {
        return Err(ServiceError::NotFound("employee"));
    }
    Ok(())
}

pub async fn create_employee(
    db: &DatabaseConnection,
    input: CreateEmployee,
) -> ServiceResult<employee::Model> {
    require_non_empty(&input.first_name, "first_name")?;
    require_non_empty(&input.last_name, "last_name")?;
    require_non_empty(&input.email, "email")?;
    require_non_empty(&input.position, "position")?;
    require_non_empty(&input.department, "department")?;

    let now = Utc::now().naive_utc();
    let employee = employee::ActiveModel {
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        email: Set(input.email),
        phone: Set(input.phone),
        position: Set(input.position),
        department: Set(input.department),
        status: Set(input.status.unwrap_or(EmployeeStatus::Pending)),
        hire_date: Set(input.hire_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(employee_id = employee.id, "created employee");
    Ok(employee)
}

pub async fn get_employee(db: &DatabaseConnection, employee_id: i32) -> ServiceResult<employee::Model> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("employee"))
}

pub async fn list_employees(db: &DatabaseConnection) -> ServiceResult<Vec<employee::Model>> {
    let employees = Employee::find()
        .order_by_asc(employee::Column::LastName)
        .order_by_asc(employee::Column::FirstName)
        .all(db)
        .await?;
    Ok(employees)
}

pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i32,
    patch: UpdateEmployee,
) -> ServiceResult<employee::Model> {
    for (value, field) in [
        (&patch.first_name, "first_name"),
        (&patch.last_name, "last_name"),
        (&patch.email, "email"),
        (&patch.position, "position"),
        (&patch.department, "department"),
    ] {
        if let Some(value) = value {
            require_non_empty(value, field)?;
        }
    }

    let employee = Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("employee"))?;

    let mut active = employee.into_active_model();
    if let Some(first_name) = patch.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = patch.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(email) = patch.email {
        active.email = Set(email);
    }
    if let Some(phone) = patch.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(position) = patch.position {
        active.position = Set(position);
    }
    if let Some(department) = patch.department {
        active.department = Set(department);
    }
    if let Some(status) = patch.status {
        active.status = Set(status);
    }
    if let Some(hire_date) = patch.hire_date {
        active.hire_date = Set(hire_date);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let employee = active.update(db).await?;
    info!(employee_id = employee.id, "updated employee");
    Ok(employee)
}

/// Ownership-aware cascade: child records never outlive their employee. The
/// schema carries `ON DELETE CASCADE` too, but the deletion is explicit here
/// so the behavior holds (and is testable) on any backend.
pub async fn delete_employee(db: &DatabaseConnection, employee_id: i32) -> ServiceResult<bool> {
    let txn = db.begin().await?;
    let Some(employee) = Employee::find_by_id(employee_id).one(&txn).await? else {
        return Ok(false);
    };

    License::delete_many()
        .filter(license::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    Induction::delete_many()
        .filter(induction::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    EmergencyContact::delete_many()
        .filter(emergency_contact::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    Document::delete_many()
        .filter(document::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    employee.into_active_model().delete(&txn).await?;
    txn.commit().await?;

    info!(employee_id, "deleted employee and dependent records");
    Ok(true)
}
