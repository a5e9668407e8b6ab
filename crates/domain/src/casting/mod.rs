//! Spellcasting: the slot ledger and its read-side derivations.

mod collect;
mod display;
mod ledger;

pub use collect::{collect_spellcasting, ResolvedSpellcasting};
pub use display::{
    filter_spells, group_by_rank, group_features_by_level, listed_spells_by_rank, slot_usage,
    slot_views_by_rank, CostFilter, SlotUsage, SlotView, SpellFilter,
};
pub use ledger::{apply_cast, CastingMode};
