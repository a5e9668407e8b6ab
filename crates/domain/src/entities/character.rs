//! Character aggregate.
//!
//! The character record is treated as an immutable value replaced wholesale
//! on each mutation: the ledger reads it, builds an updated copy, and the
//! store swaps the record. Concurrent readers of the old value observe no
//! change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::spellcasting::{CastingSource, CharacterSpells, FocusSpellEntry};
use crate::error::DomainError;
use crate::ids::CharacterId;

/// A player character.
///
/// # Invariants
///
/// - `name` is non-empty (enforced at construction)
/// - `casting_sources` and `focus_spells` are build-derived data, immutable
///   from the ledger's perspective
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    // Identity
    id: CharacterId,
    name: String,
    level: u8,

    // Build-derived casting data (computed by capability resolution)
    #[serde(default)]
    casting_sources: Vec<CastingSource>,
    #[serde(default)]
    focus_spells: Vec<FocusSpellEntry>,

    // Mutable runtime spell resources; absent means the zero-valued default
    #[serde(default)]
    spells: Option<CharacterSpells>,

    // Metadata
    created_at: DateTime<Utc>,
}

impl Character {
    /// Create a new level-1 character with no casting capabilities.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        Ok(Self {
            id: CharacterId::new(),
            name,
            level: 1,
            casting_sources: Vec::new(),
            focus_spells: Vec::new(),
            spells: None,
            created_at: now,
        })
    }

    // Read-only accessors

    /// Get the character ID.
    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Get the character name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the character level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Get the casting sources this character possesses.
    pub fn casting_sources(&self) -> &[CastingSource] {
        &self.casting_sources
    }

    /// Get the focus spells granted by the character's build.
    pub fn focus_spells(&self) -> &[FocusSpellEntry] {
        &self.focus_spells
    }

    /// Get the spells sub-record, if present.
    pub fn spells(&self) -> Option<&CharacterSpells> {
        self.spells.as_ref()
    }

    /// Get the spells sub-record, or the zero-valued default when absent.
    ///
    /// This is the single place the "absent means empty" rule lives; callers
    /// never substitute their own defaults.
    pub fn spells_or_default(&self) -> CharacterSpells {
        self.spells.clone().unwrap_or_default()
    }

    /// Get the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Builder-style methods

    /// Set the character level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Add a casting source.
    pub fn with_casting_source(mut self, source: CastingSource) -> Self {
        self.casting_sources.push(source);
        self
    }

    /// Add a focus spell.
    pub fn with_focus_spell(mut self, entry: FocusSpellEntry) -> Self {
        self.focus_spells.push(entry);
        self
    }

    /// Replace the spells sub-record, materializing it if it was absent.
    pub fn with_spells(mut self, spells: CharacterSpells) -> Self {
        self.spells = Some(spells);
        self
    }

    /// Look up a casting source by name.
    pub fn casting_source(&self, name: &str) -> Option<&CastingSource> {
        self.casting_sources.iter().find(|s| s.name == name)
    }
}
