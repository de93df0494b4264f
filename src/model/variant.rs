//! Per-role template alternatives.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reserved alternative marking templates rendered for the secondary project
pub const SECONDARY_INDICATOR: &str = "secondary";

/// Which of the generated projects an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    Main,
    Secondary,
}

impl ProjectRole {
    pub fn from_is_main(is_main: bool) -> Self {
        if is_main {
            ProjectRole::Main
        } else {
            ProjectRole::Secondary
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self, ProjectRole::Main)
    }
}

/// Alternatives active while rendering templates for one project role.
///
/// The secondary marker is present if and only if the set was derived for
/// [`ProjectRole::Secondary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet {
    alternatives: BTreeSet<String>,
}

impl VariantSet {
    pub fn for_role(base: &BTreeSet<String>, role: ProjectRole) -> Self {
        let mut alternatives: BTreeSet<String> = base
            .iter()
            .filter(|a| a.as_str() != SECONDARY_INDICATOR)
            .cloned()
            .collect();
        if role == ProjectRole::Secondary {
            alternatives.insert(SECONDARY_INDICATOR.to_string());
        }
        Self { alternatives }
    }

    pub fn contains(&self, alternative: &str) -> bool {
        self.alternatives.contains(alternative)
    }

    pub fn is_secondary(&self) -> bool {
        self.contains(SECONDARY_INDICATOR)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.alternatives.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BTreeSet<String> {
        ["mp_metrics", "mp_jwt_auth"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_main_role_has_no_marker() {
        let set = VariantSet::for_role(&base(), ProjectRole::Main);
        assert!(!set.is_secondary());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_secondary_role_adds_marker() {
        let set = VariantSet::for_role(&base(), ProjectRole::Secondary);
        assert!(set.is_secondary());
        assert!(set.contains("mp_metrics"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_marker_in_base_is_dropped_for_main() {
        let mut base = base();
        base.insert(SECONDARY_INDICATOR.to_string());

        let set = VariantSet::for_role(&base, ProjectRole::Main);
        assert!(!set.is_secondary());
    }

    #[test]
    fn test_role_from_is_main() {
        assert_eq!(ProjectRole::from_is_main(true), ProjectRole::Main);
        assert!(!ProjectRole::from_is_main(false).is_main());
    }
}
