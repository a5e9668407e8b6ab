pub mod casting;
pub mod entities;
pub mod error;
pub mod ids;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    ActionCost, CastingSource, Character, CharacterSpells, ClassFeature, FocusSpellEntry,
    InnateCastEntry, SourceKind, Spell, SpellListEntry, SpellSlot, Tradition, RITUALS_SOURCE,
};

pub use error::DomainError;

// Re-export the spellcasting ledger and display derivations
pub use casting::{
    apply_cast, collect_spellcasting, filter_spells, group_by_rank, group_features_by_level,
    listed_spells_by_rank, slot_usage, slot_views_by_rank, CastingMode, CostFilter,
    ResolvedSpellcasting, SlotUsage, SlotView, SpellFilter,
};

// Re-export ID types
pub use ids::CharacterId;
