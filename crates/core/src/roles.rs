//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20250101000001_create_users.sql`.

use crate::error::CoreError;

/// Field officer. Creates and owns tugas.
pub const ROLE_PENYULUH: &str = "penyuluh";

/// Agricultural consultant. Receives tugas and reports their status.
pub const ROLE_KONSULTAN: &str = "konsultan_tani";

/// Farmer-group leader. Region-bound, listable by region.
pub const ROLE_GAPOKTAN: &str = "gapoktan";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_PENYULUH, ROLE_KONSULTAN, ROLE_GAPOKTAN];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

/// Roles that must always carry a `wilayah` label.
pub fn is_region_bound(role: &str) -> bool {
    role != ROLE_PENYULUH
}

/// Which side of a tugas a caller's listing is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Tugas the caller created (`penyuluh_id`).
    Creator,
    /// Tugas assigned to the caller (`konsultan_id`).
    Assignee,
}

/// Resolve the listing scope for a caller's role.
///
/// Only field officers and consultants have a tugas listing; every other
/// role is rejected.
pub fn list_scope_for_role(role: &str) -> Result<ListScope, CoreError> {
    match role {
        ROLE_PENYULUH => Ok(ListScope::Creator),
        ROLE_KONSULTAN => Ok(ListScope::Assignee),
        other => Err(CoreError::Validation(format!(
            "Role '{other}' has no tugas listing"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_valid_roles_accepted() {
        assert!(validate_role(ROLE_PENYULUH).is_ok());
        assert!(validate_role(ROLE_KONSULTAN).is_ok());
        assert!(validate_role(ROLE_GAPOKTAN).is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_matches!(validate_role("admin"), Err(CoreError::Validation(_)));
        assert_matches!(validate_role(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_only_penyuluh_is_not_region_bound() {
        assert!(!is_region_bound(ROLE_PENYULUH));
        assert!(is_region_bound(ROLE_KONSULTAN));
        assert!(is_region_bound(ROLE_GAPOKTAN));
    }

    #[test]
    fn test_list_scope_dispatch() {
        assert_eq!(list_scope_for_role(ROLE_PENYULUH).unwrap(), ListScope::Creator);
        assert_eq!(list_scope_for_role(ROLE_KONSULTAN).unwrap(), ListScope::Assignee);
    }

    #[test]
    fn test_list_scope_rejects_gapoktan() {
        let err = list_scope_for_role(ROLE_GAPOKTAN).unwrap_err();
        assert!(err.to_string().contains("gapoktan"));
    }
}
