//! Content browsing use cases.
//!
//! Read-only queries over the spell compendium and class feature tables.

use std::collections::BTreeMap;
use std::sync::Arc;

use grimoire_domain::{
    filter_spells, group_features_by_level, ClassFeature, CostFilter, Spell, SpellFilter,
};

use crate::infrastructure::ports::{FeatureRepo, RepoError, SpellRepo};

/// Container for content use cases.
pub struct ContentUseCases {
    spell_repo: Arc<dyn SpellRepo>,
    feature_repo: Arc<dyn FeatureRepo>,
}

impl ContentUseCases {
    pub fn new(spell_repo: Arc<dyn SpellRepo>, feature_repo: Arc<dyn FeatureRepo>) -> Self {
        Self {
            spell_repo,
            feature_repo,
        }
    }

    /// Search the spell compendium.
    ///
    /// A blank query with [`CostFilter::All`] returns the whole compendium in
    /// content order.
    pub async fn search_spells(
        &self,
        query: &str,
        cost: CostFilter,
    ) -> Result<Vec<Spell>, RepoError> {
        let spells = self.spell_repo.list().await?;
        let filter = SpellFilter {
            query: query.to_string(),
            cost,
        };
        Ok(filter_spells(&spells, &filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Class features for one class, grouped by the level they are gained at.
    pub async fn class_features(
        &self,
        class_id: &str,
    ) -> Result<BTreeMap<u8, Vec<ClassFeature>>, RepoError> {
        let features = self.feature_repo.list_for_class(class_id).await?;
        Ok(group_features_by_level(features))
    }
}
