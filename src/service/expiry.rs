//! Forward-looking expiry lookahead for the compliance dashboard. Results are
//! sorted soonest-first; callers render them without re-sorting.

use chrono::{Duration, NaiveDate};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::prelude::{Induction, License};
use crate::entities::{employee, induction, license};

use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    License,
    Induction,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<employee::Model> for EmployeeSummary {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum ExpiringRecord {
    License(license::Model),
    Induction(induction::Model),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpiringEntry {
    pub days_remaining: i64,
    pub employee: EmployeeSummary,
    #[serde(flatten)]
    pub record: ExpiringRecord,
}

/// Records whose expiry falls in `[today, today + window_days]`, joined with
/// the owning employee and ordered by ascending expiry date. Already-expired
/// records and open-ended inductions (no expiry date) never appear.
pub async fn query_expiring(
    db: &DatabaseConnection,
    kind: RecordKind,
    window_days: i64,
    today: NaiveDate,
) -> ServiceResult<Vec<ExpiringEntry>> {
    if window_days < 0 {
        return Err(ServiceError::InvalidArgument(
            "window_days must be non-negative".to_string(),
        ));
    }
    let end = today + Duration::days(window_days);

    let entries = match kind {
        RecordKind::License => {
            let rows = License::find()
                .filter(license::Column::ExpiryDate.between(today, end))
                .order_by_asc(license::Column::ExpiryDate)
                .order_by_asc(license::Column::Id)
                .find_also_related(crate::entities::Employee)
                .all(db)
                .await?;
            rows.into_iter()
                .map(|(record, owner)| {
                    let owner = owner.ok_or_else(|| {
                        DbErr::Custom(format!("license {} has no owning employee", record.id))
                    })?;
                    Ok(ExpiringEntry {
                        days_remaining: (record.expiry_date - today).num_days(),
                        employee: owner.into(),
                        record: ExpiringRecord::License(record),
                    })
                })
                .collect::<Result<Vec<_>, DbErr>>()?
        }
        RecordKind::Induction => {
            let rows = Induction::find()
                .filter(induction::Column::ExpiryDate.is_not_null())
                .filter(induction::Column::ExpiryDate.between(today, end))
                .order_by_asc(induction::Column::ExpiryDate)
                .order_by_asc(induction::Column::Id)
                .find_also_related(crate::entities::Employee)
                .all(db)
                .await?;
            rows.into_iter()
                .map(|(record, owner)| {
                    let owner = owner.ok_or_else(|| {
                        DbErr::Custom(format!("induction {} has no owning employee", record.id))
                    })?;
                    let expiry = record.expiry_date.ok_or_else(|| {
                        DbErr::Custom(format!("induction {} lost its expiry date", record.id))
                    })?;
                    Ok(ExpiringEntry {
                        days_remaining: (expiry - today).num_days(),
                        employee: owner.into(),
                        record: ExpiringRecord::Induction(record),
                    })
                })
                .collect::<Result<Vec<_>, DbErr>>()?
        }
    };

    Ok(entries)
}
