//! Document references only: the byte transfer happens in an external store,
//! this service keeps the name and URL attached to the owning employee.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::entities::document;
use crate::entities::prelude::Document;

use super::employees::ensure_employee_exists;
use super::{require_non_empty, ServiceResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub employee_id: i32,
    pub name: String,
    pub file_url: String,
}

pub async fn create_document(
    db: &DatabaseConnection,
    input: CreateDocument,
) -> ServiceResult<document::Model> {
    require_non_empty(&input.name, "name")?;
    require_non_empty(&input.file_url, "file_url")?;
    ensure_employee_exists(db, input.employee_id).await?;

    let document = document::ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set(input.employee_id),
        name: Set(input.name),
        file_url: Set(input.file_url),
        uploaded_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await?;

    info!(
        document_id = %document.id,
        employee_id = document.employee_id,
        "registered document reference"
    );
    Ok(document)
}

pub async fn delete_document(db: &DatabaseConnection, document_id: Uuid) -> ServiceResult<bool> {
    let res = Document::delete_by_id(document_id).exec(db).await?;
    if res.rows_affected == 0 {
        return Ok(false);
    }
    info!(document_id = %document_id, "deleted document reference");
    Ok(true)
}

pub async fn list_by_employee(
    db: &DatabaseConnection,
    employee_id: i32,
) -> ServiceResult<Vec<document::Model>> {
    ensure_employee_exists(db, employee_id).await?;
    let documents = Document::find()
        .filter(document::Column::EmployeeId.eq(employee_id))
        .order_by_desc(document::Column::UploadedAt)
        .all(db)
        .await?;
    Ok(documents)
}
