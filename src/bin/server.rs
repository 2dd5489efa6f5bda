use axum::{
    routing::{get, post},
    Extension, Router,
};
use crewtrack_server::{api, migrator};
use sea_orm::{Database, DatabaseConnection};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    // Load .env if present (dotenvy)
    dotenvy::dotenv().ok();

    crewtrack_server::telemetry::init_telemetry("crewtrack-server");

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    use sea_orm_migration::MigratorTrait;
    migrator::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    crewtrack_server::metrics::init_metrics(&db).await;

    let app = app(db, prometheus_layer, metric_handle);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health_check() -> &'static str {
    "OK"
}

fn app(
    db: DatabaseConnection,
    prometheus_layer: axum_prometheus::PrometheusMetricLayer<'static>,
    metric_handle: metrics_exporter_prometheus::PrometheusHandle,
) -> Router {
    let cors_origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/employees",
            get(api::employees::list_employees).post(api::employees::create_employee),
        )
        .route(
            "/employees/:id",
            get(api::employees::get_employee)
                .patch(api::employees::update_employee)
                .delete(api::employees::delete_employee),
        )
        .route(
            "/employees/:id/licenses",
            get(api::licenses::list_employee_licenses),
        )
        .route(
            "/employees/:id/inductions",
            get(api::inductions::list_employee_inductions),
        )
        .route(
            "/employees/:id/emergency-contacts",
            get(api::emergency_contacts::list_employee_contacts),
        )
        .route(
            "/employees/:id/emergency-contacts/primary",
            get(api::emergency_contacts::get_primary_contact),
        )
        .route(
            "/employees/:id/documents",
            get(api::documents::list_employee_documents),
        )
        .route("/licenses", post(api::licenses::create_license))
        .route(
            "/licenses/:id",
            axum::routing::patch(api::licenses::update_license)
                .delete(api::licenses::delete_license),
        )
        .route("/inductions", post(api::inductions::create_induction))
        .route(
            "/inductions/:id",
            axum::routing::patch(api::inductions::update_induction)
                .delete(api::inductions::delete_induction),
        )
        .route(
            "/emergency-contacts",
            post(api::emergency_contacts::create_emergency_contact),
        )
        .route(
            "/emergency-contacts/:id",
            axum::routing::patch(api::emergency_contacts::update_emergency_contact)
                .delete(api::emergency_contacts::delete_emergency_contact),
        )
        .route("/documents", post(api::documents::create_document))
        .route(
            "/documents/:id",
            axum::routing::delete(api::documents::delete_document),
        )
        .route("/expiring", get(api::expiry::list_expiring))
        .layer(Extension(db))
        .layer(prometheus_layer)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());

                    // Dynamic span name: "METHOD /path"
                    let span_name = if let Some(path) = matched_path {
                        format!("{} {}", request.method(), path)
                    } else {
                        format!("{} {}", request.method(), request.uri().path())
                    };

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Filled in by handlers / on_response.
                        employee_id = tracing::field::Empty,
                        error = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(
                    |_request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                        // Keep request start quiet; completion carries the fields.
                    },
                )
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(
                    cors_origin
                        .parse::<axum::http::HeaderValue>()
                        .expect("CORS_ORIGIN must be a valid origin"),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                    axum::http::Method::DELETE,
                ])
                .allow_headers([axum::http::header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .route("/metrics", get(|| async move { metric_handle.render() }))
}
