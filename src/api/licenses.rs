use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::json;

use crate::entities::license;
use crate::service::licenses::{CreateLicense, UpdateLicense};
use crate::service::status::{license_details, LicenseDetails};
use crate::service::{self, ServiceError};

/// License row plus the structured sub-fields, falling back to the legacy
/// notes encoding for rows written before the dedicated columns existed.
#[derive(Serialize)]
pub struct LicenseResponse {
    #[serde(flatten)]
    pub license: license::Model,
    pub details: LicenseDetails,
}

impl From<license::Model> for LicenseResponse {
    fn from(model: license::Model) -> Self {
        let details = license_details(&model);
        Self {
            license: model,
            details,
        }
    }
}

pub async fn create_license(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreateLicense>,
) -> Response {
    match service::licenses::create_license(&db, payload, super::today()).await {
        Ok(license) => {
            crate::metrics::increment_records_created("license");
            (StatusCode::CREATED, Json(LicenseResponse::from(license))).into_response()
        }
        Err(err) => super::error_response(err),
    }
}

pub async fn update_license(
    Extension(db): Extension<DatabaseConnection>,
    Path(license_id): Path<i32>,
    Json(payload): Json<UpdateLicense>,
) -> Response {
    match service::licenses::update_license(&db, license_id, payload, super::today()).await {
        Ok(license) => (StatusCode::OK, Json(LicenseResponse::from(license))).into_response(),
        Err(err) => super::error_response(err),
    }
}

pub async fn delete_license(
    Extension(db): Extension<DatabaseConnection>,
    Path(license_id): Path<i32>,
) -> Response {
    match service::licenses::delete_license(&db, license_id).await {
        Ok(true) => (StatusCode::OK, Json(json!({"message": "License deleted"}))).into_response(),
        Ok(false) => super::error_response(ServiceError::NotFound("license")),
        Err(err) => super::error_response(err),
    }
}

pub async fn list_employee_licenses(
    Extension(db): Extension<DatabaseConnection>,
    Path(employee_id): Path<i32>,
) -> Response {
    match service::licenses::list_by_employee(&db, employee_id).await {
        Ok(licenses) => {
            let response: Vec<LicenseResponse> =
                licenses.into_iter().map(LicenseResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => super::error_response(err),
    }
}
