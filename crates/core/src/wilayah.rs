//! Region (`wilayah`) labels.

use crate::error::CoreError;
use crate::roles::{is_region_bound, ROLE_PENYULUH};

/// Sentinel stored for region-bound users who registered without a region.
pub const DEFAULT_WILAYAH: &str = "Belum Ditentukan";

/// Trim a region label and reject it when nothing is left.
pub fn normalize_wilayah(label: &str) -> Result<String, CoreError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Wilayah must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Only field officers keep a list of covered regions.
pub fn ensure_can_cover_wilayah(role: &str) -> Result<(), CoreError> {
    if role == ROLE_PENYULUH {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Role '{role}' cannot record covered wilayah"
        )))
    }
}

/// Derive the region stored on a newly registered profile.
///
/// Region-bound roles always get a label, falling back to [`DEFAULT_WILAYAH`]
/// when none (or only whitespace) was supplied. Field officers keep whatever
/// they sent, which may be nothing.
pub fn wilayah_for_registration(role: &str, wilayah: Option<&str>) -> Option<String> {
    let supplied = wilayah
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string);

    if is_region_bound(role) {
        Some(supplied.unwrap_or_else(|| DEFAULT_WILAYAH.to_string()))
    } else {
        supplied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_GAPOKTAN, ROLE_KONSULTAN, ROLE_PENYULUH};

    #[test]
    fn test_region_bound_role_gets_default() {
        assert_eq!(
            wilayah_for_registration(ROLE_KONSULTAN, None).as_deref(),
            Some(DEFAULT_WILAYAH)
        );
        assert_eq!(
            wilayah_for_registration(ROLE_GAPOKTAN, Some("  ")).as_deref(),
            Some(DEFAULT_WILAYAH)
        );
    }

    #[test]
    fn test_supplied_region_is_kept() {
        assert_eq!(
            wilayah_for_registration(ROLE_GAPOKTAN, Some(" East ")).as_deref(),
            Some("East")
        );
    }

    #[test]
    fn test_penyuluh_region_is_optional() {
        assert_eq!(wilayah_for_registration(ROLE_PENYULUH, None), None);
        assert_eq!(
            wilayah_for_registration(ROLE_PENYULUH, Some("East")).as_deref(),
            Some("East")
        );
    }

    #[test]
    fn test_only_penyuluh_covers_regions() {
        assert!(ensure_can_cover_wilayah(ROLE_PENYULUH).is_ok());
        assert!(matches!(
            ensure_can_cover_wilayah(ROLE_GAPOKTAN),
            Err(CoreError::Forbidden(_))
        ));
        assert!(ensure_can_cover_wilayah(ROLE_KONSULTAN).is_err());
    }

    #[test]
    fn test_blank_label_rejected() {
        assert!(normalize_wilayah("   ").is_err());
        assert_eq!(normalize_wilayah(" West ").unwrap(), "West");
    }
}
