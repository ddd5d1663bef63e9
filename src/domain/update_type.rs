//! Semantic version change classification result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a version transition
///
/// Variants are declared from least to most severe so the derived `Ord`
/// gives MAJOR > MINOR > PATCH > NONE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateType {
    /// No newer version (equal or older)
    None,
    /// Patch version change (fixes)
    Patch,
    /// Minor version change (features)
    Minor,
    /// Major version change (breaking)
    Major,
}

impl UpdateType {
    /// Get the display label
    pub fn label(&self) -> &'static str {
        match self {
            UpdateType::None => "NONE",
            UpdateType::Patch => "PATCH",
            UpdateType::Minor => "MINOR",
            UpdateType::Major => "MAJOR",
        }
    }

    /// Returns true if this represents an available update
    pub fn is_update(&self) -> bool {
        *self != UpdateType::None
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
