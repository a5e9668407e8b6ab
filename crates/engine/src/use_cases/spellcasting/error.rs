//! Spellcasting operation errors.

use crate::infrastructure::ports::RepoError;
use grimoire_domain::{CharacterId, DomainError};

/// Errors that can occur during spellcasting operations.
#[derive(Debug, thiserror::Error)]
pub enum SpellcastingError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Spell not found: {0}")]
    SpellNotFound(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
