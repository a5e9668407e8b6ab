//! Domain entities.

mod character;
mod class_feature;
mod spell;
mod spellcasting;

pub use character::Character;
pub use class_feature::ClassFeature;
pub use spell::{ActionCost, Spell, Tradition};
pub use spellcasting::{
    CastingSource, CharacterSpells, FocusSpellEntry, InnateCastEntry, SourceKind, SpellListEntry,
    SpellSlot, RITUALS_SOURCE,
};
