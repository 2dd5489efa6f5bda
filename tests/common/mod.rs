use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crewtrack_server::entities::employee;
use crewtrack_server::migrator::Migrator;
use crewtrack_server::service::employees::{self, CreateEmployee};

/// Fresh in-memory database with the full schema applied. A single pooled
/// connection keeps every statement on the same SQLite instance.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn seed_employee(db: &DatabaseConnection, email: &str) -> employee::Model {
    employees::create_employee(
        db,
        CreateEmployee {
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            email: email.to_string(),
            phone: None,
            position: "Site Supervisor".to_string(),
            department: "Operations".to_string(),
            status: None,
            hire_date: date(2022, 3, 14),
        },
    )
    .await
    .expect("seed employee")
}
