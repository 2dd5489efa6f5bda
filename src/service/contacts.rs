//! Primary-contact invariant manager. Every employee with at least one
//! emergency contact has exactly one with `is_primary = true`; all mutations
//! here run inside a single transaction over the employee's contact set so
//! concurrent promotions for the same employee linearize.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use crate::entities::{emergency_contact, prelude::EmergencyContact};

use super::employees::ensure_employee_exists;
use super::{require_non_empty, ServiceError, ServiceResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub employee_id: i32,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContact {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_primary: Option<bool>,
}

/// Read the whole contact set for an employee, taking row locks on Postgres.
/// SQLite serializes writers at the database level, so `FOR UPDATE` is
/// Postgres-only.
async fn contacts_for_update(
    txn: &DatabaseTransaction,
    employee_id: i32,
) -> Result<Vec<emergency_contact::Model>, DbErr> {
    let mut query = EmergencyContact::find()
        .filter(emergency_contact::Column::EmployeeId.eq(employee_id))
        .order_by_asc(emergency_contact::Column::Id);
    if txn.get_database_backend() == DbBackend::Postgres {
        query = query.lock_exclusive();
    }
    query.all(txn).await
}

/// Clear `is_primary` on every contact of the employee except `keep_id`.
async fn demote_siblings(
    txn: &DatabaseTransaction,
    employee_id: i32,
    keep_id: Option<i32>,
) -> Result<(), DbErr> {
    let mut update = EmergencyContact::update_many()
        .col_expr(emergency_contact::Column::IsPrimary, Expr::value(false))
        .col_expr(
            emergency_contact::Column::UpdatedAt,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(emergency_contact::Column::EmployeeId.eq(employee_id))
        .filter(emergency_contact::Column::IsPrimary.eq(true));
    if let Some(id) = keep_id {
        update = update.filter(emergency_contact::Column::Id.ne(id));
    }
    update.exec(txn).await?;
    Ok(())
}

pub async fn create_contact(
    db: &DatabaseConnection,
    input: CreateContact,
) -> ServiceResult<emergency_contact::Model> {
    require_non_empty(&input.name, "name")?;
    require_non_empty(&input.relationship, "relationship")?;
    require_non_empty(&input.phone, "phone")?;

    let txn = db.begin().await?;
    ensure_employee_exists(&txn, input.employee_id).await?;

    let siblings = contacts_for_update(&txn, input.employee_id).await?;
    // The first contact is always the primary, whatever the caller asked for;
    // otherwise a contact set could sit without any primary at all.
    let is_primary = input.is_primary || siblings.is_empty();
    if is_primary {
        demote_siblings(&txn, input.employee_id, None).await?;
    }

    let now = Utc::now().naive_utc();
    let contact = emergency_contact::ActiveModel {
        employee_id: Set(input.employee_id),
        name: Set(input.name),
        relationship: Set(input.relationship),
        phone: Set(input.phone),
        email: Set(input.email),
        address: Set(input.address),
        is_primary: Set(is_primary),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(
        contact_id = contact.id,
        employee_id = contact.employee_id,
        is_primary = contact.is_primary,
        "created emergency contact"
    );
    Ok(contact)
}

pub async fn update_contact(
    db: &DatabaseConnection,
    contact_id: i32,
    patch: UpdateContact,
) -> ServiceResult<emergency_contact::Model> {
    if let Some(name) = &patch.name {
        require_non_empty(name, "name")?;
    }
    if let Some(relationship) = &patch.relationship {
        require_non_empty(relationship, "relationship")?;
    }
    if let Some(phone) = &patch.phone {
        require_non_empty(phone, "phone")?;
    }

    let txn = db.begin().await?;
    let contact = EmergencyContact::find_by_id(contact_id)
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound("emergency contact"))?;

    // Lock the contact set before reasoning about primaries, so a concurrent
    // promotion cannot slip between the check and the write.
    let siblings = contacts_for_update(&txn, contact.employee_id).await?;
    match patch.is_primary {
        Some(true) => {
            // Idempotent when already primary: the filter below matches no rows.
            demote_siblings(&txn, contact.employee_id, Some(contact.id)).await?;
        }
        Some(false) if contact.is_primary => {
            let another_primary = siblings.iter().any(|c| c.id != contact.id && c.is_primary);
            if !another_primary {
                // Dropping the transaction rolls back; nothing was written.
                return Err(ServiceError::InvariantViolation(format!(
                    "employee {} would be left without a primary contact",
                    contact.employee_id
                )));
            }
        }
        _ => {}
    }

    let mut active: emergency_contact::ActiveModel = contact.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(relationship) = patch.relationship {
        active.relationship = Set(relationship);
    }
    if let Some(phone) = patch.phone {
        active.phone = Set(phone);
    }
    if let Some(email) = patch.email {
        active.email = Set(Some(email));
    }
    if let Some(address) = patch.address {
        active.address = Set(Some(address));
    }
    if let Some(is_primary) = patch.is_primary {
        active.is_primary = Set(is_primary);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let contact = active.update(&txn).await?;
    txn.commit().await?;

    info!(
        contact_id = contact.id,
        employee_id = contact.employee_id,
        is_primary = contact.is_primary,
        "updated emergency contact"
    );
    Ok(contact)
}

pub async fn delete_contact(db: &DatabaseConnection, contact_id: i32) -> ServiceResult<bool> {
    let txn = db.begin().await?;
    let Some(contact) = EmergencyContact::find_by_id(contact_id).one(&txn).await? else {
        return Ok(false);
    };

    let employee_id = contact.employee_id;
    let was_primary = contact.is_primary;
    let siblings = contacts_for_update(&txn, employee_id).await?;
    contact.delete(&txn).await?;

    // Deleting the primary must not leave the set without one: the oldest
    // surviving contact inherits the role.
    if was_primary {
        if let Some(heir) = siblings.into_iter().find(|c| c.id != contact_id) {
            let heir_id = heir.id;
            let mut active: emergency_contact::ActiveModel = heir.into();
            active.is_primary = Set(true);
            active.updated_at = Set(Utc::now().naive_utc());
            active.update(&txn).await?;
            info!(
                contact_id = heir_id,
                employee_id, "promoted replacement primary contact"
            );
        }
    }
    txn.commit().await?;

    info!(contact_id, employee_id, "deleted emergency contact");
    Ok(true)
}

pub async fn list_by_employee(
    db: &DatabaseConnection,
    employee_id: i32,
) -> ServiceResult<Vec<emergency_contact::Model>> {
    ensure_employee_exists(db, employee_id).await?;
    let contacts = EmergencyContact::find()
        .filter(emergency_contact::Column::EmployeeId.eq(employee_id))
        .order_by_desc(emergency_contact::Column::IsPrimary)
        .order_by_asc(emergency_contact::Column::Id)
        .all(db)
        .await?;
    Ok(contacts)
}

pub async fn get_primary_contact(
    db: &DatabaseConnection,
    employee_id: i32,
) -> ServiceResult<Option<emergency_contact::Model>> {
    ensure_employee_exists(db, employee_id).await?;
    let contact = EmergencyContact::find()
        .filter(emergency_contact::Column::EmployeeId.eq(employee_id))
        .filter(emergency_contact::Column::IsPrimary.eq(true))
        .one(db)
        .await?;
    Ok(contact)
}
