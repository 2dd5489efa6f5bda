//! Pure status derivation. Every status value that reaches storage is produced
//! by (or validated against) this module; "today" is always passed in so the
//! rules stay deterministic under test.

use chrono::NaiveDate;

use crate::entities::induction::InductionStatus;
use crate::entities::license::{self, LicenseStatus};

use super::{ServiceError, ServiceResult};

/// Licenses within this many days of expiry count as expiring soon.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

pub fn derive_license_status(expiry_date: NaiveDate, today: NaiveDate) -> LicenseStatus {
    if expiry_date < today {
        LicenseStatus::Expired
    } else if (expiry_date - today).num_days() <= EXPIRY_WARNING_DAYS {
        LicenseStatus::ExpiringSoon
    } else {
        LicenseStatus::Valid
    }
}

/// The only path by which a caller-supplied license status reaches storage.
/// `RenewalPending` is a caller-driven state accepted while the license is
/// still alive; anything else must match the derived value.
pub fn resolve_license_status(
    requested: Option<LicenseStatus>,
    expiry_date: NaiveDate,
    today: NaiveDate,
) -> ServiceResult<LicenseStatus> {
    let derived = derive_license_status(expiry_date, today);
    match requested {
        None => Ok(derived),
        Some(LicenseStatus::RenewalPending) if derived != LicenseStatus::Expired => {
            Ok(LicenseStatus::RenewalPending)
        }
        Some(status) if status == derived => Ok(derived),
        Some(status) => Err(ServiceError::InvalidArgument(format!(
            "license status {status:?} contradicts its dates"
        ))),
    }
}

/// Inductions keep their caller-driven state (Pending/InProgress/Completed)
/// and are only forced to `Expired` when an expiry date has passed and the
/// item was never completed. Open-ended items (no expiry date) never expire.
pub fn derive_induction_status(
    current: InductionStatus,
    expiry_date: Option<NaiveDate>,
    today: NaiveDate,
) -> InductionStatus {
    match expiry_date {
        Some(expiry) if expiry < today && current != InductionStatus::Completed => {
            InductionStatus::Expired
        }
        _ => current,
    }
}

pub fn validate_license_dates(issue_date: NaiveDate, expiry_date: NaiveDate) -> ServiceResult<()> {
    if expiry_date <= issue_date {
        return Err(ServiceError::InvalidArgument(
            "expiry_date must be after issue_date".to_string(),
        ));
    }
    Ok(())
}

/// Structured sub-fields historically string-encoded into the notes column.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct LicenseDetails {
    pub issuing_authority: Option<String>,
    pub document_url: Option<String>,
}

/// Parse the legacy `Authority: ...` / `Document: ...` tagged lines out of a
/// free-form notes blob. Unrecognized lines are ignored.
pub fn parse_legacy_notes(notes: &str) -> LicenseDetails {
    let mut details = LicenseDetails::default();
    for line in notes.lines() {
        if let Some(rest) = line.trim().strip_prefix("Authority:") {
            let rest = rest.trim();
            if !rest.is_empty() {
                details.issuing_authority = Some(rest.to_string());
            }
        } else if let Some(rest) = line.trim().strip_prefix("Document:") {
            let rest = rest.trim();
            if !rest.is_empty() {
                details.document_url = Some(rest.to_string());
            }
        }
    }
    details
}

/// Structured columns win; rows written before the columns existed fall back
/// to the legacy notes encoding.
pub fn license_details(license: &license::Model) -> LicenseDetails {
    let legacy = license
        .notes
        .as_deref()
        .map(parse_legacy_notes)
        .unwrap_or_default();
    LicenseDetails {
        issuing_authority: license
            .issuing_authority
            .clone()
            .or(legacy.issuing_authority),
        document_url: license.document_url.clone().or(legacy.document_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn license_expired_strictly_before_today() {
        let today = date(2023, 6, 15);
        assert_eq!(
            derive_license_status(date(2023, 6, 14), today),
            LicenseStatus::Expired
        );
        // Expiring today is not expired yet.
        assert_eq!(
            derive_license_status(today, today),
            LicenseStatus::ExpiringSoon
        );
    }

    #[test]
    fn license_expiring_soon_window_is_inclusive() {
        let today = date(2023, 6, 15);
        assert_eq!(
            derive_license_status(date(2023, 7, 15), today),
            LicenseStatus::ExpiringSoon
        );
        assert_eq!(
            derive_license_status(date(2023, 7, 16), today),
            LicenseStatus::Valid
        );
    }

    #[test]
    fn license_eleven_days_out_is_expiring_soon() {
        // issue 2023-01-01, expiry 2023-01-31, today 2023-01-20.
        let status = derive_license_status(date(2023, 1, 31), date(2023, 1, 20));
        assert_eq!(status, LicenseStatus::ExpiringSoon);
    }

    #[test]
    fn renewal_pending_accepted_unless_expired() {
        let today = date(2023, 6, 15);
        let status = resolve_license_status(
            Some(LicenseStatus::RenewalPending),
            date(2023, 7, 1),
            today,
        )
        .unwrap();
        assert_eq!(status, LicenseStatus::RenewalPending);

        let err = resolve_license_status(
            Some(LicenseStatus::RenewalPending),
            date(2023, 6, 1),
            today,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn contradictory_requested_status_rejected() {
        let today = date(2023, 6, 15);
        let err =
            resolve_license_status(Some(LicenseStatus::Valid), date(2023, 6, 1), today).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn induction_only_expires_when_not_completed() {
        let today = date(2023, 6, 15);
        let past = Some(date(2023, 6, 1));
        assert_eq!(
            derive_induction_status(InductionStatus::Pending, past, today),
            InductionStatus::Expired
        );
        assert_eq!(
            derive_induction_status(InductionStatus::InProgress, past, today),
            InductionStatus::Expired
        );
        assert_eq!(
            derive_induction_status(InductionStatus::Completed, past, today),
            InductionStatus::Completed
        );
        assert_eq!(
            derive_induction_status(InductionStatus::Pending, None, today),
            InductionStatus::Pending
        );
    }

    #[test]
    fn expiry_before_issue_rejected() {
        assert!(validate_license_dates(date(2023, 1, 1), date(2023, 1, 31)).is_ok());
        assert!(validate_license_dates(date(2023, 1, 31), date(2023, 1, 1)).is_err());
        assert!(validate_license_dates(date(2023, 1, 1), date(2023, 1, 1)).is_err());
    }

    #[test]
    fn legacy_notes_parsing() {
        let details = parse_legacy_notes(
            "Renewed at head office.\nAuthority: SafeWork NSW\nDocument: https://files.example/lic-7.pdf",
        );
        assert_eq!(details.issuing_authority.as_deref(), Some("SafeWork NSW"));
        assert_eq!(
            details.document_url.as_deref(),
            Some("https://files.example/lic-7.pdf")
        );

        assert_eq!(parse_legacy_notes("plain remark"), LicenseDetails::default());
    }
}
