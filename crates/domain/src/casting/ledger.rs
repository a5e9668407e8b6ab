//! The spellcasting ledger.
//!
//! Locates the casting resource behind a cast or un-cast request and toggles
//! exactly that one unit, returning an updated character record. The input
//! record is never mutated: each operation rebuilds the affected sequence
//! with one element replaced and returns a new value, so concurrent readers
//! of the old record observe no change.
//!
//! A request that matches no resource in the required state is a silent
//! no-op. That indicates a caller/state desynchronization rather than a
//! recoverable fault, so it is not surfaced as an error here; the use-case
//! layer logs it in debug builds.

use serde::{Deserialize, Serialize};

use crate::entities::{Character, CharacterSpells, Spell, SpellSlot};

/// How a spell is being cast.
///
/// Closed set of five modes; dispatch is a single exhaustive match so a new
/// mode cannot be added without handling it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CastingMode {
    /// Cast from a prepared slot of the named source
    Prepared { source: String },
    /// Cast from any free slot of the named source at the spell's rank
    Spontaneous { source: String },
    /// Cast from the shared focus point pool
    Focus,
    /// Cast from an innate ability's use counter
    Innate,
    /// Rituals have unlimited casts; only "known" is tracked
    Ritual,
}

/// Apply a cast (`expend = true`) or un-cast (`expend = false`) request to a
/// character, returning the updated record.
///
/// Cantrips are checked first: a rank-0 spell never touches ledger state in
/// any mode. Rituals likewise never mutate. For the remaining modes an
/// absent spells sub-record is treated as the zero-valued default; the
/// sub-record is materialized only when the request actually changes it, so
/// a no-op request returns a record value-equal to the input.
pub fn apply_cast(
    character: &Character,
    spell: &Spell,
    mode: &CastingMode,
    expend: bool,
) -> Character {
    // Casting a cantrip doesn't change any spells state
    if spell.is_cantrip() {
        return character.clone();
    }

    let spells = character.spells_or_default();
    let updated = match mode {
        CastingMode::Prepared { source } => cast_prepared(&spells, spell, source, expend),
        CastingMode::Spontaneous { source } => cast_spontaneous(&spells, spell, source, expend),
        CastingMode::Focus => cast_focus(&spells, expend),
        CastingMode::Innate => cast_innate(&spells, spell, expend),
        CastingMode::Ritual => return character.clone(),
    };

    if updated == spells {
        return character.clone();
    }
    character.clone().with_spells(updated)
}

/// Whether a slot can satisfy a prepared request.
///
/// The scan deliberately runs over the character's full slot collection, not
/// a subset pre-filtered by source; the source is part of the match
/// predicate instead.
fn prepared_slot_matches(slot: &SpellSlot, spell: &Spell, source: &str, expend: bool) -> bool {
    slot.spell_id.as_deref() == Some(spell.id.as_str())
        && slot.rank == spell.rank
        && slot.source == source
        && slot.exhausted == !expend
}

fn cast_prepared(
    spells: &CharacterSpells,
    spell: &Spell,
    source: &str,
    expend: bool,
) -> CharacterSpells {
    let Some(index) = spells
        .slots()
        .iter()
        .position(|slot| prepared_slot_matches(slot, spell, source, expend))
    else {
        // Shouldn't happen with a synchronized caller; drop the request.
        return spells.clone();
    };

    let mut slots = spells.slots().to_vec();
    slots[index].exhausted = expend;
    spells.clone().with_slots(slots)
}

fn cast_spontaneous(
    spells: &CharacterSpells,
    spell: &Spell,
    source: &str,
    expend: bool,
) -> CharacterSpells {
    // First match in stable order; at most one slot flips per call. Slot
    // order is significant and preserved from however the slots were
    // assembled.
    let mut flipped = false;
    let slots = spells
        .slots()
        .iter()
        .map(|slot| {
            if !flipped
                && slot.rank == spell.rank
                && slot.source == source
                && slot.exhausted == !expend
            {
                flipped = true;
                let mut slot = slot.clone();
                slot.exhausted = expend;
                slot
            } else {
                slot.clone()
            }
        })
        .collect();

    spells.clone().with_slots(slots)
}

fn cast_focus(spells: &CharacterSpells, expend: bool) -> CharacterSpells {
    // Floor clamp only. The ceiling is enforced by capacity computation, not
    // here, so restoring is unbounded at this layer.
    let current = spells.focus_point_current();
    let next = if expend {
        current.saturating_sub(1)
    } else {
        current.saturating_add(1)
    };
    spells.clone().with_focus_points(next)
}

fn cast_innate(spells: &CharacterSpells, spell: &Spell, expend: bool) -> CharacterSpells {
    let innate_casts = spells
        .innate_casts()
        .iter()
        .map(|entry| {
            if entry.matches(&spell.id, spell.rank) {
                let mut entry = entry.clone();
                if expend {
                    entry.expend();
                } else {
                    entry.restore();
                }
                entry
            } else {
                entry.clone()
            }
        })
        .collect();

    spells.clone().with_innate_casts(innate_casts)
}
