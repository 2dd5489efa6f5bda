use sea_orm_migration::prelude::*;

mod m20260801_000001_create_employees;
mod m20260801_000002_create_licenses;
mod m20260801_000003_create_inductions;
mod m20260801_000004_create_emergency_contacts;
mod m20260801_000005_create_documents;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_employees::Migration),
            Box::new(m20260801_000002_create_licenses::Migration),
            Box::new(m20260801_000003_create_inductions::Migration),
            Box::new(m20260801_000004_create_emergency_contacts::Migration),
            Box::new(m20260801_000005_create_documents::Migration),
        ]
    }
}
