//! JSON-file content adapter.
//!
//! Loads the spell compendium and class feature tables from a content
//! directory at startup (`spells.json`, `class_features.json`) and serves
//! them from memory. Content is read-only at runtime.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use grimoire_domain::{ClassFeature, Spell};

use super::ports::{FeatureRepo, RepoError, SpellRepo};

/// Spell and class-feature content backed by JSON files.
pub struct JsonContent {
    spells: HashMap<String, Spell>,
    spell_order: Vec<String>,
    features: Vec<ClassFeature>,
}

impl JsonContent {
    /// Load content from a directory containing `spells.json` and, optionally,
    /// `class_features.json`.
    pub fn load(dir: &Path) -> Result<Self, RepoError> {
        let spells: Vec<Spell> = read_json(&dir.join("spells.json"))?;
        let features_path = dir.join("class_features.json");
        let features: Vec<ClassFeature> = if features_path.exists() {
            read_json(&features_path)?
        } else {
            Vec::new()
        };

        tracing::info!(
            spells = spells.len(),
            features = features.len(),
            dir = %dir.display(),
            "Loaded content"
        );

        let spell_order = spells.iter().map(|s| s.id.clone()).collect();
        let spells = spells.into_iter().map(|s| (s.id.clone(), s)).collect();
        Ok(Self {
            spells,
            spell_order,
            features,
        })
    }

    /// Build content from already-parsed records.
    #[cfg(test)]
    pub fn from_records(spells: Vec<Spell>, features: Vec<ClassFeature>) -> Self {
        let spell_order = spells.iter().map(|s| s.id.clone()).collect();
        let spells = spells.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self {
            spells,
            spell_order,
            features,
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RepoError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RepoError::Storage(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| RepoError::Serialization(format!("{}: {e}", path.display())))
}

#[async_trait]
impl SpellRepo for JsonContent {
    async fn get(&self, id: &str) -> Result<Option<Spell>, RepoError> {
        Ok(self.spells.get(id).cloned())
    }

    async fn get_many(&self, ids: &[String]) -> Result<Vec<Spell>, RepoError> {
        // Unknown IDs are skipped, not errors; callers render what exists.
        Ok(ids
            .iter()
            .filter_map(|id| self.spells.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> Result<Vec<Spell>, RepoError> {
        Ok(self
            .spell_order
            .iter()
            .filter_map(|id| self.spells.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl FeatureRepo for JsonContent {
    async fn list_for_class(&self, class_id: &str) -> Result<Vec<ClassFeature>, RepoError> {
        Ok(self
            .features
            .iter()
            .filter(|f| f.class_id == class_id)
            .cloned()
            .collect())
    }
}
