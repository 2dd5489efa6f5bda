use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{emergency_contact, employee, induction, license};

pub async fn init_metrics(db: &DatabaseConnection) {
    let employee_count = employee::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("crewtrack_employees_total").set(employee_count as f64);

    let license_count = license::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("crewtrack_licenses_total").set(license_count as f64);

    let induction_count = induction::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("crewtrack_inductions_total").set(induction_count as f64);

    let contact_count = emergency_contact::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("crewtrack_emergency_contacts_total").set(contact_count as f64);

    // Per-department headcount. Cardinality is the number of departments,
    // which stays small for this deployment.
    let employees = employee::Entity::find().all(db).await.unwrap_or_default();
    let departments: std::collections::BTreeSet<String> =
        employees.iter().map(|e| e.department.clone()).collect();
    for department in departments {
        let count = employee::Entity::find()
            .filter(employee::Column::Department.eq(department.clone()))
            .count(db)
            .await
            .unwrap_or(0);
        metrics::gauge!("crewtrack_department_employees_total", "department" => department)
            .set(count as f64);
    }

    tracing::info!(
        "Initialized metrics: Employees={}, Licenses={}, Inductions={}, Contacts={}",
        employee_count,
        license_count,
        induction_count,
        contact_count
    );
}

pub fn increment_records_created(kind: &str) {
    metrics::counter!("crewtrack_records_created_total", "kind" => kind.to_string()).increment(1);
}

pub fn increment_invariant_violations() {
    metrics::counter!("crewtrack_primary_contact_violations_total").increment(1);
}

pub fn increment_expiry_queries() {
    metrics::counter!("crewtrack_expiry_queries_total").increment(1);
}
