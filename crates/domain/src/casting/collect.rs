//! Resolution of a character's full casting picture.
//!
//! Pulls the build-derived capability data and the mutable resource
//! sub-record into one flat value the presentation layer renders from. Pure
//! derivation; nothing here writes back to the character.

use serde::{Deserialize, Serialize};

use crate::entities::{
    CastingSource, Character, FocusSpellEntry, InnateCastEntry, SpellListEntry, SpellSlot,
};

/// A character's complete casting state, flattened for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSpellcasting {
    /// Casting sources the character possesses
    pub sources: Vec<CastingSource>,
    /// All resolved spell slots across sources
    pub slots: Vec<SpellSlot>,
    /// Known/preparable spell list entries, rituals included
    pub list: Vec<SpellListEntry>,
    /// Focus spells granted by the build
    pub focus_spells: Vec<FocusSpellEntry>,
    /// Current shared focus points
    pub focus_point_current: u8,
    /// Innate casting abilities with their use counters
    pub innate_casts: Vec<InnateCastEntry>,
}

impl ResolvedSpellcasting {
    /// Whether the character has any casting capability worth rendering.
    pub fn is_caster(&self) -> bool {
        !self.sources.is_empty()
            || !self.focus_spells.is_empty()
            || !self.innate_casts.is_empty()
            || !self.list.is_empty()
    }

    /// Slots belonging to one source, in stored order.
    pub fn slots_for_source(&self, source: &str) -> Vec<&SpellSlot> {
        self.slots.iter().filter(|s| s.source == source).collect()
    }

    /// Spell IDs listed for one source, in stored order.
    pub fn spell_ids_for_source(&self, source: &str) -> Vec<String> {
        self.list
            .iter()
            .filter(|entry| entry.source == source)
            .map(|entry| entry.spell_id.clone())
            .collect()
    }

    /// Ritual list entries.
    pub fn rituals(&self) -> Vec<&SpellListEntry> {
        self.list.iter().filter(|entry| entry.is_ritual()).collect()
    }
}

/// Resolve a character's casting state.
///
/// An absent spells sub-record resolves exactly like the zero-valued default:
/// empty slots and list, zero focus points, no innate casts.
pub fn collect_spellcasting(character: &Character) -> ResolvedSpellcasting {
    let spells = character.spells_or_default();
    ResolvedSpellcasting {
        sources: character.casting_sources().to_vec(),
        slots: spells.slots().to_vec(),
        list: spells.list().to_vec(),
        focus_spells: character.focus_spells().to_vec(),
        focus_point_current: spells.focus_point_current(),
        innate_casts: spells.innate_casts().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterSpells, SourceKind, Tradition};
    use chrono::Utc;

    fn caster() -> Character {
        Character::new("Seoni", Utc::now())
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
                        SpellSlot::new("sorcerer", 2),
                    ])
                    .with_list(vec![
                        SpellListEntry::new("magic_missile", "sorcerer", 1),
                        SpellListEntry::ritual("create_water", 1),
                    ])
                    .with_focus_points(1)
                    .with_innate_casts(vec![InnateCastEntry::new("detect_magic", 0, 1)]),
            )
    }

    #[test]
    fn resolves_full_casting_picture() {
        let resolved = collect_spellcasting(&caster());

        assert!(resolved.is_caster());
        assert_eq!(resolved.sources.len(), 1);
        assert_eq!(resolved.slots_for_source("sorcerer").len(), 3);
        assert_eq!(resolved.spell_ids_for_source("sorcerer"), vec!["magic_missile"]);
        assert_eq!(resolved.rituals().len(), 1);
        assert_eq!(resolved.focus_point_current, 1);
        assert_eq!(resolved.innate_casts.len(), 1);
    }

    #[test]
    fn absent_sub_record_resolves_to_zero_default() {
        let character = Character::new("Valeros", Utc::now()).expect("valid name");
        let resolved = collect_spellcasting(&character);

        assert!(!resolved.is_caster());
        assert!(resolved.slots.is_empty());
        assert!(resolved.list.is_empty());
        assert_eq!(resolved.focus_point_current, 0);
        assert!(resolved.innate_casts.is_empty());
    }

    #[test]
    fn resolution_does_not_mutate_the_character() {
        let character = Character::new("Valeros", Utc::now()).expect("valid name");
        let _ = collect_spellcasting(&character);
        assert!(character.spells().is_none(), "no sub-record materialized");
    }
}
