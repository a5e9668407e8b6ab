//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - Character storage (could swap in-memory -> database)
//! - Spell/feature content (could swap JSON files -> remote content service)

use async_trait::async_trait;

use grimoire_domain::{Character, CharacterId, ClassFeature, Spell};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Not found")]
    NotFound,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// Storage Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
}

// =============================================================================
// Content Ports (read-only game data)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpellRepo: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Spell>, RepoError>;
    async fn get_many(&self, ids: &[String]) -> Result<Vec<Spell>, RepoError>;
    async fn list(&self) -> Result<Vec<Spell>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureRepo: Send + Sync {
    async fn list_for_class(&self, class_id: &str) -> Result<Vec<ClassFeature>, RepoError>;
}
