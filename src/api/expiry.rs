use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::service;
use crate::service::expiry::RecordKind;

#[derive(Deserialize)]
pub struct ExpiringParams {
    pub kind: RecordKind,
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_window_days() -> i64 {
    30
}

// GET /expiring?kind=license&window_days=30
pub async fn list_expiring(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<ExpiringParams>,
) -> Response {
    match service::expiry::query_expiring(&db, params.kind, params.window_days, super::today()).await
    {
        Ok(entries) => {
            crate::metrics::increment_expiry_queries();
            (StatusCode::OK, Json(entries)).into_response()
        }
        Err(err) => super::error_response(err),
    }
}
