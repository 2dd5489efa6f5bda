use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::service::contacts::{CreateContact, UpdateContact};
use crate::service::{self, ServiceError};

// All is_primary writes go through the invariant manager; there is no raw
// column write anywhere in this module.

pub async fn create_emergency_contact(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateContact>,
) -> Response {
    match service::contacts::create_contact(&db, payload).await {
        Ok(contact) => {
            crate::metrics::increment_records_created("emergency_contact");
            (StatusCode::CREATED, Json(contact)).into_response()
        }
        Err(err) => super::error_response(err),
    }
}

pub async fn update_emergency_contact(
    Extension(db): Extension<DatabaseConnection>,
    Path(contact_id): Path<i32>,
    Json(payload): Json<UpdateContact>,
) -> Response {
    match service::contacts::update_contact(&db, contact_id, payload).await {
        Ok(contact) => (StatusCode::OK, Json(contact)).into_response(),
        Err(err) => super::error_response(err),
    }
}

pub async fn delete_emergency_contact(
    Extension(db): Extension<DatabaseConnection>,
    Path(contact_id): Path<i32>,
) -> Response {
    match service::contacts::delete_contact(&db, contact_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({"message": "Emergency contact deleted"})),
        )
            .into_response(),
        Ok(false) => super::error_response(ServiceError::NotFound("emergency contact")),
        Err(err) => super::error_response(err),
    }
}

pub async fn list_employee_contacts(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
) -> Response {
    match service::contacts::list_by_employee(&db, employee_id).await {
        Ok(contacts) => (StatusCode::OK, Json(contacts)).into_response(),
        Err(err) => super::error_response(err),
    }
}

/// `null` body means the employee exists but has no primary contact yet; a
/// missing employee is a 404.
pub async fn get_primary_contact(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
) -> Response {
    match service::contacts::get_primary_contact(&db, employee_id).await {
        Ok(contact) => (StatusCode::OK, Json(contact)).into_response(),
        Err(err) => super::error_response(err),
    }
}
