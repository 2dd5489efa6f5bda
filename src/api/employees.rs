use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::service::employees::{CreateEmployee, UpdateEmployee};
use crate::service::{self, ServiceError};

pub async fn list_employees(Extension(db): Extension<DatabaseConnection>) -> Response {
    match service::employees::list_employees(&db).await {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(err) => super::error_response(err),
    }
}

pub async fn create_employee(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateEmployee>,
) -> Response {
    match service::employees::create_employee(&db, payload).await {
        Ok(employee) => {
            crate::metrics::increment_records_created("employee");
            (StatusCode::CREATED, Json(employee)).into_response()
        }
        Err(err) => super::error_response(err),
    }
}

pub async fn get_employee(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
) -> Response {
    match service::employees::get_employee(&db, employee_id).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => super::error_response(err),
    }
}

pub async fn update_employee(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
    Json(payload): Json<UpdateEmployee>,
) -> Response {
    match service::employees::update_employee(&db, employee_id, payload).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => super::error_response(err),
    }
}

pub async fn delete_employee(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
) -> Response {
    match service::employees::delete_employee(&db, employee_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(json!({"message": "Employee and dependent records deleted"})),
        )
            .into_response(),
        Ok(false) => super::error_response(ServiceError::NotFound("employee")),
        Err(err) => super::error_response(err),
    }
}
