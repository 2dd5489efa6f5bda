use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::service::inductions::{CreateInduction, UpdateInduction};
use crate::service::{self, ServiceError};

pub async fn create_induction(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateInduction>,
) -> Response {
    match service::inductions::create_induction(&db, payload, super::today()).await {
        Ok(induction) => {
            crate::metrics::increment_records_created("induction");
            (StatusCode::CREATED, Json(induction)).into_response()
        }
        Err(err) => super::error_response(err),
    }
}

pub async fn update_induction(
    Extension(db): Extension<DatabaseConnection>,
    Path(induction_id): Path<i32>,
    Json(payload): Json<UpdateInduction>,
) -> Response {
    match service::inductions::update_induction(&db, induction_id, payload, super::today()).await {
        Ok(induction) => (StatusCode::OK, Json(induction)).into_response(),
        Err(err) => super::error_response(err),
    }
}

pub async fn delete_induction(
    Extension(db): Extension<DatabaseConnection>,
    Path(induction_id): Path<i32>,
) -> Response {
    match service::inductions::delete_induction(&db, induction_id).await {
        Ok(true) => (StatusCode::OK, Json(json!({"message": "Induction deleted"}))).into_response(),
        Ok(false) => super::error_response(ServiceError::NotFound("induction")),
        Err(err) => super::error_response(err),
    }
}

pub async fn list_employee_inductions(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
) -> Response {
    match service::inductions::list_by_employee(&db, employee_id).await {
        Ok(inductions) => (StatusCode::OK, Json(inductions)).into_response(),
        Err(err) => super::error_response(err),
    }
}
