//! Update classification for watched packages
//!
//! This module provides:
//! - `classify`: semantic-version severity of a version transition
//! - `UpdateStatus`: per-package outcome of comparing a saved snapshot
//!   against the latest published version

use crate::domain::{UpdateType, Version};
use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Classify the transition from `old_version` to `new_version`
///
/// Components are compared in order and the first one where the newer
/// version is ahead decides the result. Equal versions and downgrades both
/// yield `UpdateType::None`.
pub fn classify(old_version: &str, new_version: &str) -> Result<UpdateType, VersionError> {
    let old = Version::parse(old_version)?;
    let new = Version::parse(new_version)?;
    Ok(classify_versions(&old, &new))
}

/// Classify two already parsed versions
pub fn classify_versions(old: &Version, new: &Version) -> UpdateType {
    let steps = [
        (old.major.cmp(&new.major), UpdateType::Major),
        (old.minor.cmp(&new.minor), UpdateType::Minor),
        (old.patch.cmp(&new.patch), UpdateType::Patch),
    ];

    for (ordering, update_type) in steps {
        match ordering {
            Ordering::Less => return update_type,
            Ordering::Greater => return UpdateType::None,
            Ordering::Equal => continue,
        }
    }

    UpdateType::None
}

/// Outcome of checking one package against its saved version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    /// No saved version to compare against
    Untracked,
    /// Saved version was compared with the latest one
    Classified {
        saved: String,
        update_type: UpdateType,
    },
    /// Saved or latest version could not be parsed
    Malformed { saved: String, reason: String },
}

impl UpdateStatus {
    /// Returns the update type if an update is available
    pub fn available_update(&self) -> Option<UpdateType> {
        match self {
            UpdateStatus::Classified { update_type, .. } if update_type.is_update() => {
                Some(*update_type)
            }
            _ => None,
        }
    }

    /// Returns true if the comparison failed
    pub fn is_malformed(&self) -> bool {
        matches!(self, UpdateStatus::Malformed { .. })
    }
}

/// Compare a package's saved version (if any) with its current version
pub fn check_update(saved: Option<&str>, current: &str) -> UpdateStatus {
    let Some(saved) = saved else {
        return UpdateStatus::Untracked;
    };

    match classify(saved, current) {
        Ok(update_type) => UpdateStatus::Classified {
            saved: saved.to_string(),
            update_type,
        },
        Err(e) => UpdateStatus::Malformed {
            saved: saved.to_string(),
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_major() {
        assert_eq!(classify("1.2.3", "2.0.0").unwrap(), UpdateType::Major);
    }

    #[test]
    fn test_classify_minor() {
        assert_eq!(classify("1.2.3", "1.3.0").unwrap(), UpdateType::Minor);
    }

    #[test]
    fn test_classify_patch() {
        assert_eq!(classify("1.2.3", "1.2.9").unwrap(), UpdateType::Patch);
    }

    #[test]
    fn test_classify_equal() {
        assert_eq!(classify("1.2.3", "1.2.3").unwrap(), UpdateType::None);
    }

    #[test]
    fn test_classify_major_wins_over_lower_components() {
        assert_eq!(classify("1.9.9", "2.0.0").unwrap(), UpdateType::Major);
        assert_eq!(classify("1.5.7", "3.1.2").unwrap(), UpdateType::Major);
    }

    #[test]
    fn test_classify_minor_wins_over_lower_patch() {
        assert_eq!(classify("1.2.9", "1.3.0").unwrap(), UpdateType::Minor);
    }

    #[test]
    fn test_classify_multi_digit_components() {
        assert_eq!(classify("1.9.0", "1.10.0").unwrap(), UpdateType::Minor);
        assert_eq!(classify("9.0.0", "10.0.0").unwrap(), UpdateType::Major);
    }

    #[test]
    fn test_classify_downgrade_is_none() {
        assert_eq!(classify("2.0.0", "1.0.0").unwrap(), UpdateType::None);
        assert_eq!(classify("1.3.0", "1.2.5").unwrap(), UpdateType::None);
        assert_eq!(classify("1.2.3", "1.2.0").unwrap(), UpdateType::None);
    }

    #[test]
    fn test_classify_downgrade_with_larger_lower_component_is_none() {
        // Lower components only matter when the higher ones are equal
        assert_eq!(classify("2.0.0", "1.5.0").unwrap(), UpdateType::None);
        assert_eq!(classify("1.3.0", "1.2.9").unwrap(), UpdateType::None);
    }

    #[test]
    fn test_classify_identity_over_samples() {
        for v in ["0.0.0", "0.1.0", "1.2.3", "10.20.30"] {
            assert_eq!(classify(v, v).unwrap(), UpdateType::None);
        }
    }

    #[test]
    fn test_classify_matches_first_differing_component() {
        let samples = [(0, 0, 0), (0, 0, 1), (0, 1, 0), (1, 0, 0), (1, 2, 3), (2, 0, 5)];
        for a in samples {
            for b in samples {
                let old = Version::new(a.0, a.1, a.2);
                let new = Version::new(b.0, b.1, b.2);
                let expected = if old >= new {
                    UpdateType::None
                } else if old.major != new.major {
                    UpdateType::Major
                } else if old.minor != new.minor {
                    UpdateType::Minor
                } else {
                    UpdateType::Patch
                };
                assert_eq!(classify_versions(&old, &new), expected, "{} -> {}", old, new);
            }
        }
    }

    #[test]
    fn test_classify_malformed_old() {
        let err = classify("1.2", "1.3.0").unwrap_err();
        assert!(matches!(err, VersionError::Malformed { ref input, .. } if input == "1.2"));
    }

    #[test]
    fn test_classify_malformed_new() {
        let err = classify("1.2.3", "2.0.0-beta.1").unwrap_err();
        assert!(err.to_string().contains("2.0.0-beta.1"));
    }

    #[test]
    fn test_classify_malformed_inputs() {
        for bad in ["", "1", "1.2.3.4", "a.b.c", "v1.2.3", "+1.2.3"] {
            assert!(classify(bad, "1.0.0").is_err(), "{} should be rejected", bad);
            assert!(classify("1.0.0", bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_check_update_untracked() {
        assert_eq!(check_update(None, "1.0.0"), UpdateStatus::Untracked);
    }

    #[test]
    fn test_check_update_classified() {
        let status = check_update(Some("1.0.0"), "1.1.0");
        assert_eq!(
            status,
            UpdateStatus::Classified {
                saved: "1.0.0".to_string(),
                update_type: UpdateType::Minor,
            }
        );
        assert_eq!(status.available_update(), Some(UpdateType::Minor));
    }

    #[test]
    fn test_check_update_no_change_has_no_available_update() {
        let status = check_update(Some("1.0.0"), "1.0.0");
        assert_eq!(status.available_update(), None);
        assert!(!status.is_malformed());
    }

    #[test]
    fn test_check_update_malformed() {
        let status = check_update(Some("latest"), "1.0.0");
        assert!(status.is_malformed());
        assert_eq!(status.available_update(), None);
        if let UpdateStatus::Malformed { saved, reason } = status {
            assert_eq!(saved, "latest");
            assert!(reason.contains("malformed version"));
        }
    }

    #[test]
    fn test_update_status_serialization() {
        let status = check_update(Some("1.0.0"), "2.0.0");
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "classified");
        assert_eq!(json["update_type"], "MAJOR");
    }
}
