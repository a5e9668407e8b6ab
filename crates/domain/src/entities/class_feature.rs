//! Class feature entity.
//!
//! Represents abilities a character gains from their class as they level up.
//! The class reference viewer groups these by level; no use tracking lives
//! here.

use serde::{Deserialize, Serialize};

/// A class feature gained at a specific level.
///
/// Simple data struct: all fields are public because any combination of
/// values is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassFeature {
    /// Unique identifier for this feature
    pub id: String,
    /// ID of the class that grants this feature
    pub class_id: String,
    /// Display name of the feature
    pub name: String,
    /// Level at which this feature is gained
    pub level: u8,
    /// Full description of what the feature does
    #[serde(default)]
    pub description: String,
}

impl ClassFeature {
    /// Create a new class feature.
    pub fn new(
        id: impl Into<String>,
        class_id: impl Into<String>,
        name: impl Into<String>,
        level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            class_id: class_id.into(),
            name: name.into(),
            level,
            description: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_feature_equality() {
        let mut feature = ClassFeature::new("wizard_spellbook", "wizard", "Spellbook", 1);
        feature.description = "You start with a spellbook...".into();

        let other = feature.clone();
        assert_eq!(feature, other);
    }
}
