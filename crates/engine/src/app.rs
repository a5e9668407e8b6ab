//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{CharacterRepo, FeatureRepo, SpellRepo};
use crate::use_cases::{ContentUseCases, SpellcastingUseCases};

/// Main application state.
///
/// Holds all use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub spellcasting: SpellcastingUseCases,
    pub content: ContentUseCases,
}

impl App {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        spell_repo: Arc<dyn SpellRepo>,
        feature_repo: Arc<dyn FeatureRepo>,
    ) -> Self {
        Self {
            use_cases: UseCases {
                spellcasting: SpellcastingUseCases::new(character_repo, spell_repo.clone()),
                content: ContentUseCases::new(spell_repo, feature_repo),
            },
        }
    }
}
