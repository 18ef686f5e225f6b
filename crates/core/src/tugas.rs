//! Tugas lifecycle constants and authorization rules.
//!
//! A tugas is created by a field officer (`penyuluh_id`) and assigned to a
//! consultant (`konsultan_id`). Only the creator may edit or delete it; only
//! the assignee may move its status. Status values are unordered: any value
//! may follow any other.

use crate::error::CoreError;
use crate::roles::ROLE_PENYULUH;
use crate::types::{Date, DbId};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Work has not started. Every new tugas starts here.
pub const STATUS_BELUM_DIKERJAKAN: &str = "Belum Dikerjakan";

/// Work is in progress.
pub const STATUS_SEDANG_BERLANGSUNG: &str = "Sedang Berlangsung";

/// Work is done.
pub const STATUS_SELESAI: &str = "Selesai";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_BELUM_DIKERJAKAN,
    STATUS_SEDANG_BERLANGSUNG,
    STATUS_SELESAI,
];

/// Status assigned on creation, regardless of what the client sent.
pub const INITIAL_STATUS: &str = STATUS_BELUM_DIKERJAKAN;

/// Category used when the creator leaves `jenis` out.
pub const DEFAULT_JENIS: &str = "Umum";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// The fields a new tugas cannot do without, once all are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields {
    /// Trimmed title.
    pub judul: String,
    pub konsultan_id: DbId,
    pub deadline: Date,
}

/// Check the fields a new tugas cannot do without.
///
/// A `judul` made only of whitespace counts as missing. The error lists every
/// missing field at once.
pub fn require_fields(
    judul: Option<&str>,
    konsultan_id: Option<DbId>,
    deadline: Option<Date>,
) -> Result<RequiredFields, CoreError> {
    let judul = judul.map(str::trim).filter(|j| !j.is_empty());

    match (judul, konsultan_id, deadline) {
        (Some(judul), Some(konsultan_id), Some(deadline)) => Ok(RequiredFields {
            judul: judul.to_string(),
            konsultan_id,
            deadline,
        }),
        (judul, konsultan_id, deadline) => {
            let mut missing = Vec::new();
            if judul.is_none() {
                missing.push("judul");
            }
            if konsultan_id.is_none() {
                missing.push("konsultan_id");
            }
            if deadline.is_none() {
                missing.push("deadline");
            }
            Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Trim a comment and reject it when nothing is left.
pub fn normalize_komentar(text: &str) -> Result<String, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Komentar must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/* --------------------------------------------------------------------------
Authorization
-------------------------------------------------------------------------- */

/// Only field officers may create a tugas.
pub fn ensure_can_create(role: &str) -> Result<(), CoreError> {
    if role == ROLE_PENYULUH {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{role}' is not permitted to create tugas"
        )))
    }
}

/// Only the creator may edit or delete a tugas.
pub fn ensure_creator(penyuluh_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if penyuluh_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You are not permitted to edit this tugas".into(),
        ))
    }
}

/// Only the assignee may change the status of a tugas.
pub fn ensure_assignee(konsultan_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if konsultan_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You are not permitted to update the status of this tugas".into(),
        ))
    }
}

/// Human-readable description stored with a status history entry.
pub fn status_change_note(old: &str, new: &str) -> String {
    format!("Status diubah dari '{old}' menjadi '{new}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    fn date() -> Date {
        Date::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_valid_statuses_accepted() {
        for status in VALID_STATUSES {
            assert!(validate_status(status).is_ok());
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        let err = validate_status("Dibatalkan").unwrap_err();
        assert!(err.to_string().contains("Invalid status"));
        assert_matches!(validate_status(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_status_match_is_exact() {
        assert!(validate_status("selesai").is_err());
        assert!(validate_status(" Selesai").is_err());
    }

    #[test]
    fn test_initial_status_is_not_started() {
        assert_eq!(INITIAL_STATUS, "Belum Dikerjakan");
    }

    #[test]
    fn test_required_fields_present() {
        let konsultan = Uuid::new_v4();
        let fields = require_fields(Some(" Survey "), Some(konsultan), Some(date())).unwrap();
        assert_eq!(fields.judul, "Survey");
        assert_eq!(fields.konsultan_id, konsultan);
        assert_eq!(fields.deadline, date());
    }

    #[test]
    fn test_required_fields_lists_all_missing() {
        let err = require_fields(None, None, None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("judul"));
        assert!(msg.contains("konsultan_id"));
        assert!(msg.contains("deadline"));
    }

    #[test]
    fn test_blank_judul_counts_as_missing() {
        let err = require_fields(Some("   "), Some(Uuid::new_v4()), Some(date())).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("judul"));
        assert!(!msg.contains("deadline"));
    }

    #[test]
    fn test_komentar_is_trimmed() {
        assert_eq!(normalize_komentar("  looks good  ").unwrap(), "looks good");
    }

    #[test]
    fn test_whitespace_komentar_rejected() {
        assert_matches!(normalize_komentar(" \t\n "), Err(CoreError::Validation(_)));
        assert_matches!(normalize_komentar(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_only_penyuluh_creates() {
        assert!(ensure_can_create(crate::roles::ROLE_PENYULUH).is_ok());
        assert_matches!(
            ensure_can_create(crate::roles::ROLE_KONSULTAN),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            ensure_can_create(crate::roles::ROLE_GAPOKTAN),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn test_creator_check() {
        let creator = Uuid::new_v4();
        assert!(ensure_creator(creator, creator).is_ok());
        assert_matches!(
            ensure_creator(creator, Uuid::new_v4()),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn test_assignee_check() {
        let assignee = Uuid::new_v4();
        let creator = Uuid::new_v4();
        assert!(ensure_assignee(assignee, assignee).is_ok());
        assert_matches!(ensure_assignee(assignee, creator), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_status_change_note_mentions_both_values() {
        let note = status_change_note(STATUS_BELUM_DIKERJAKAN, STATUS_SELESAI);
        assert!(note.contains("Belum Dikerjakan"));
        assert!(note.contains("Selesai"));
    }
}
