use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use uuid::Uuid;

use crate::service::documents::CreateDocument;
use crate::service::{self, ServiceError};

pub async fn create_document(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateDocument>,
) -> Response {
    match service::documents::create_document(&db, payload).await {
        Ok(document) => {
            crate::metrics::increment_records_created("document");
            (StatusCode::CREATED, Json(document)).into_response()
        }
        Err(err) => super::error_response(err),
    }
}

pub async fn delete_document(
    Extension(db): Extension<DatabaseConnection>,
    Path(document_id): Path<Uuid>,
) -> Response {
    match service::documents::delete_document(&db, document_id).await {
        Ok(true) => (StatusCode::OK, Json(json!({"message": "Document deleted"}))).into_response(),
        Ok(false) => super::error_response(ServiceError::NotFound("document")),
        Err(err) => super::error_response(err),
    }
}

pub async fn list_employee_documents(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
) -> Response {
    match service::documents::list_by_employee(&db, employee_id).await {
        Ok(documents) => (StatusCode::OK, Json(documents)).into_response(),
        Err(err) => super::error_response(err),
    }
}
