//! Spellcasting use cases.
//!
//! Orchestrates cast/un-cast requests through the ledger, character creation,
//! spell resource setup, and assembly of the spell panel view.

mod error;

pub use error::SpellcastingError;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use grimoire_domain::{
    apply_cast, collect_spellcasting, listed_spells_by_rank, slot_usage, slot_views_by_rank,
    CastingMode, CastingSource, Character, CharacterId, CharacterSpells, InnateCastEntry,
    SlotUsage, SlotView, Spell,
};

use crate::infrastructure::ports::{CharacterRepo, RepoError, SpellRepo};

// =============================================================================
// Result Types
// =============================================================================

/// Result of a cast or un-cast request.
#[derive(Debug, Clone)]
pub struct CastSpellResult {
    /// The character after the ledger applied the request.
    pub character: Character,
    /// Whether the request changed any state. No-ops are not persisted.
    pub changed: bool,
}

/// The assembled spell panel for one character.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellPanel {
    pub character_id: CharacterId,
    /// One section per casting source, in the character's source order.
    pub sections: Vec<SourceSection>,
    /// Focus section, present only for characters with focus spells.
    pub focus: Option<FocusSection>,
    /// Innate casting abilities with their content spells attached.
    pub innate: Vec<InnateView>,
    /// Ritual-known spells grouped by their own rank.
    pub rituals: BTreeMap<u8, Vec<Spell>>,
}

/// Spell panel section for one casting source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSection {
    pub source: CastingSource,
    /// Rank sub-sections in ascending rank order.
    pub ranks: Vec<RankSection>,
}

/// One rank row within a source section.
///
/// Prepared sources fill `slots`; spontaneous sources fill `spells`. Both
/// carry the used/max usage counts for the rank.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankSection {
    pub rank: u8,
    pub usage: SlotUsage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spells: Vec<Spell>,
}

/// Focus spells and the shared focus point pool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSection {
    pub focus_point_current: u8,
    pub spells: Vec<Spell>,
}

/// An innate casting ability with its content spell attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InnateView {
    pub entry: InnateCastEntry,
    pub spell: Option<Spell>,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for spellcasting use cases.
pub struct SpellcastingUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    spell_repo: Arc<dyn SpellRepo>,
}

impl SpellcastingUseCases {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, spell_repo: Arc<dyn SpellRepo>) -> Self {
        Self {
            character_repo,
            spell_repo,
        }
    }

    /// Create a new character and persist it.
    pub async fn create_character(&self, name: &str) -> Result<Character, SpellcastingError> {
        let character = Character::new(name, Utc::now())?;
        self.character_repo.save(&character).await?;

        tracing::info!(character_id = %character.id(), name = %character.name(), "Created character");
        Ok(character)
    }

    /// List all characters.
    pub async fn list_characters(&self) -> Result<Vec<Character>, SpellcastingError> {
        Ok(self.character_repo.list().await?)
    }

    /// Get a character by ID.
    pub async fn get_character(&self, id: CharacterId) -> Result<Character, SpellcastingError> {
        self.character_repo
            .get(id)
            .await?
            .ok_or(SpellcastingError::CharacterNotFound(id))
    }

    /// Delete a character.
    pub async fn delete_character(&self, id: CharacterId) -> Result<(), SpellcastingError> {
        match self.character_repo.delete(id).await {
            Ok(()) => {
                tracing::info!(character_id = %id, "Deleted character");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(SpellcastingError::CharacterNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace a character's spell resource sub-record.
    ///
    /// Used when casting capacity is recomputed (level-up, rest, retraining).
    pub async fn update_spells(
        &self,
        id: CharacterId,
        spells: CharacterSpells,
    ) -> Result<Character, SpellcastingError> {
        let character = self.get_character(id).await?;
        let updated = character.with_spells(spells);
        self.character_repo.save(&updated).await?;

        tracing::info!(character_id = %id, "Replaced spell resources");
        Ok(updated)
    }

    /// Apply a cast or un-cast request to a character's spell resources.
    ///
    /// Requests that change nothing (cantrips, rituals, no matching slot in
    /// the required state) are legitimate no-ops: nothing is persisted and
    /// `changed` is false.
    pub async fn cast_spell(
        &self,
        id: CharacterId,
        spell_id: &str,
        mode: &CastingMode,
        expend: bool,
    ) -> Result<CastSpellResult, SpellcastingError> {
        let character = self.get_character(id).await?;
        let spell = self
            .spell_repo
            .get(spell_id)
            .await?
            .ok_or_else(|| SpellcastingError::SpellNotFound(spell_id.to_string()))?;

        let updated = apply_cast(&character, &spell, mode, expend);
        let changed = updated != character;

        if changed {
            self.character_repo.save(&updated).await?;
            tracing::info!(
                character_id = %id,
                spell_id = %spell_id,
                expend = expend,
                "Applied cast request"
            );
        } else {
            tracing::debug!(
                character_id = %id,
                spell_id = %spell_id,
                expend = expend,
                "Cast request changed nothing"
            );
        }

        Ok(CastSpellResult {
            character: updated,
            changed,
        })
    }

    /// Assemble the spell panel for a character.
    pub async fn spell_panel(&self, id: CharacterId) -> Result<SpellPanel, SpellcastingError> {
        let character = self.get_character(id).await?;
        let resolved = collect_spellcasting(&character);

        // One content fetch covering every spell the panel references.
        let mut wanted: BTreeSet<String> = BTreeSet::new();
        wanted.extend(resolved.slots.iter().filter_map(|s| s.spell_id.clone()));
        wanted.extend(resolved.list.iter().map(|e| e.spell_id.clone()));
        wanted.extend(resolved.focus_spells.iter().map(|e| e.spell_id.clone()));
        wanted.extend(resolved.innate_casts.iter().map(|e| e.spell_id().to_string()));
        let wanted: Vec<String> = wanted.into_iter().collect();
        let spells_by_id: HashMap<String, Spell> = self
            .spell_repo
            .get_many(&wanted)
            .await?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        let mut sections = Vec::new();
        for source in &resolved.sources {
            let ranks = if source.kind.is_prepared() {
                let slots: Vec<_> = resolved
                    .slots_for_source(&source.name)
                    .into_iter()
                    .cloned()
                    .collect();
                slot_views_by_rank(&slots, &spells_by_id)
                    .into_iter()
                    .map(|(rank, views)| RankSection {
                        rank,
                        usage: slot_usage(&resolved.slots, &source.name, rank),
                        slots: views,
                        spells: Vec::new(),
                    })
                    .collect()
            } else {
                let ids = resolved.spell_ids_for_source(&source.name);
                listed_spells_by_rank(&ids, &spells_by_id, &resolved.list, true)
                    .into_iter()
                    .map(|(rank, spells)| RankSection {
                        rank,
                        usage: slot_usage(&resolved.slots, &source.name, rank),
                        slots: Vec::new(),
                        spells,
                    })
                    .collect()
            };
            sections.push(SourceSection {
                source: source.clone(),
                ranks,
            });
        }

        let focus = if resolved.focus_spells.is_empty() {
            None
        } else {
            let spells = resolved
                .focus_spells
                .iter()
                .filter_map(|entry| {
                    let spell = spells_by_id.get(&entry.spell_id)?;
                    Some(match entry.rank {
                        Some(rank) => spell.at_rank(rank),
                        None => spell.clone(),
                    })
                })
                .collect();
            Some(FocusSection {
                focus_point_current: resolved.focus_point_current,
                spells,
            })
        };

        let innate = resolved
            .innate_casts
            .iter()
            .map(|entry| InnateView {
                entry: entry.clone(),
                spell: spells_by_id
                    .get(entry.spell_id())
                    .map(|s| s.at_rank(entry.rank())),
            })
            .collect();

        let ritual_ids: Vec<String> = resolved
            .rituals()
            .into_iter()
            .map(|e| e.spell_id.clone())
            .collect();
        let rituals = listed_spells_by_rank(&ritual_ids, &spells_by_id, &resolved.list, false);

        Ok(SpellPanel {
            character_id: id,
            sections,
            focus,
            innate,
            rituals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCharacterRepo, MockSpellRepo};
    use grimoire_domain::{
        ActionCost, FocusSpellEntry, SourceKind, SpellListEntry, SpellSlot, Tradition,
    };
    use mockall::predicate::*;

    fn prepared_wizard() -> Character {
        Character::new("Ezren", Utc::now())
            .expect("valid name")
            .with_casting_source(CastingSource::new(
                "wizard",
                SourceKind::Prepared(Tradition::Arcane),
            ))
            .with_spells(
                CharacterSpells::new()
                    .with_slots(vec![SpellSlot::new("wizard", 1).with_spell("magic_missile")]),
            )
    }

    fn magic_missile() -> Spell {
        Spell::new("magic_missile", "Magic Missile", 1, ActionCost::TwoActions)
    }

    #[tokio::test]
    async fn cast_spell_persists_the_updated_character() {
        let mut character_repo = MockCharacterRepo::new();
        let mut spell_repo = MockSpellRepo::new();

        let character = prepared_wizard();
        let id = character.id();

        let fetched = character.clone();
        character_repo
            .expect_get()
            .with(eq(id))
            .returning(move |_| Ok(Some(fetched.clone())));
        character_repo
            .expect_save()
            .withf(|c: &Character| {
                c.spells().map(|s| s.slots()[0].exhausted) == Some(true)
            })
            .times(1)
            .returning(|_| Ok(()));
        spell_repo
            .expect_get()
            .withf(|id| id == "magic_missile")
            .returning(|_| Ok(Some(magic_missile())));

        let use_cases = SpellcastingUseCases::new(Arc::new(character_repo), Arc::new(spell_repo));
        let mode = CastingMode::Prepared {
            source: "wizard".to_string(),
        };

        let result = use_cases
            .cast_spell(id, "magic_missile", &mode, true)
            .await
            .unwrap();
        assert!(result.changed);
    }

    #[tokio::test]
    async fn no_op_cast_is_not_persisted() {
        let mut character_repo = MockCharacterRepo::new();
        let mut spell_repo = MockSpellRepo::new();

        // No slots at all, so a prepared cast cannot match anything.
        let character = Character::new("Ezren", Utc::now()).expect("valid name");
        let id = character.id();

        let fetched = character.clone();
        character_repo
            .expect_get()
            .with(eq(id))
            .returning(move |_| Ok(Some(fetched.clone())));
        character_repo.expect_save().times(0);
        spell_repo
            .expect_get()
            .returning(|_| Ok(Some(magic_missile())));

        let use_cases = SpellcastingUseCases::new(Arc::new(character_repo), Arc::new(spell_repo));
        let mode = CastingMode::Prepared {
            source: "wizard".to_string(),
        };

        let result = use_cases
            .cast_spell(id, "magic_missile", &mode, true)
            .await
            .unwrap();
        assert!(!result.changed);
    }

    #[tokio::test]
    async fn cast_for_unknown_character_fails() {
        let mut character_repo = MockCharacterRepo::new();
        let spell_repo = MockSpellRepo::new();

        character_repo.expect_get().returning(|_| Ok(None));

        let use_cases = SpellcastingUseCases::new(Arc::new(character_repo), Arc::new(spell_repo));
        let result = use_cases
            .cast_spell(CharacterId::new(), "magic_missile", &CastingMode::Focus, true)
            .await;

        assert!(matches!(
            result,
            Err(SpellcastingError::CharacterNotFound(_))
        ));
    }

    #[tokio::test]
    async fn cast_for_unknown_spell_fails() {
        let mut character_repo = MockCharacterRepo::new();
        let mut spell_repo = MockSpellRepo::new();

        let character = prepared_wizard();
        let id = character.id();
        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        spell_repo.expect_get().returning(|_| Ok(None));

        let use_cases = SpellcastingUseCases::new(Arc::new(character_repo), Arc::new(spell_repo));
        let result = use_cases
            .cast_spell(id, "wish", &CastingMode::Focus, true)
            .await;

        assert!(matches!(result, Err(SpellcastingError::SpellNotFound(_))));
    }

    #[tokio::test]
    async fn spell_panel_assembles_all_sections() {
        let mut character_repo = MockCharacterRepo::new();
        let mut spell_repo = MockSpellRepo::new();

        let character = Character::new("Seoni", Utc::now())
            .expect("valid name")
            .with_casting_source(CastingSource::new(
                "sorcerer",
                SourceKind::Spontaneous(Tradition::Arcane),
            ))
            .with_focus_spell(FocusSpellEntry::new("ancestral_memories", "sorcerer"))
            .with_spells(
                CharacterSpells::new()
                    .with_slots(vec![
                        SpellSlot::new("sorcerer", 1),
                        SpellSlot::new("sorcerer", 1),
                    ])
                    .with_list(vec![
                        SpellListEntry::new("magic_missile", "sorcerer", 1),
                        SpellListEntry::ritual("create_water", 1),
                    ])
                    .with_focus_points(1)
                    .with_innate_casts(vec![InnateCastEntry::new("detect_magic", 0, 1)]),
            );
        let id = character.id();

        character_repo
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        spell_repo.expect_get_many().returning(|ids: &[String]| {
            Ok(ids
                .iter()
                .map(|id| Spell::new(id.clone(), id.clone(), 1, ActionCost::TwoActions))
                .collect())
        });

        let use_cases = SpellcastingUseCases::new(Arc::new(character_repo), Arc::new(spell_repo));
        let panel = use_cases.spell_panel(id).await.unwrap();

        assert_eq!(panel.sections.len(), 1);
        let section = &panel.sections[0];
        assert_eq!(section.source.name, "sorcerer");
        assert_eq!(section.ranks.len(), 1);
        assert_eq!(section.ranks[0].usage, SlotUsage { used: 0, max: 2 });
        assert_eq!(section.ranks[0].spells.len(), 1);

        assert_eq!(
            panel.focus.as_ref().map(|f| f.focus_point_current),
            Some(1)
        );
        assert_eq!(panel.innate.len(), 1);
        assert_eq!(panel.rituals.values().flatten().count(), 1);
    }
}
