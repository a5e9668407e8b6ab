//! Read-only display derivations.
//!
//! Pure functions the presentation layer calls on every render: grouping by
//! rank or level, search/cost filtering, and attaching content spells to
//! slots. No memoization; callers recompute when inputs change.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::entities::{ActionCost, ClassFeature, Spell, SpellListEntry, SpellSlot};
use crate::error::DomainError;

/// Group items by rank, preserving relative input order within each group.
///
/// The returned map iterates ranks in ascending order; items sharing a rank
/// appear in the same relative order as the input sequence.
pub fn group_by_rank<T>(items: Vec<T>, rank_of: impl Fn(&T) -> u8) -> BTreeMap<u8, Vec<T>> {
    let mut groups: BTreeMap<u8, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(rank_of(&item)).or_default().push(item);
    }
    groups
}

/// Group class features by the level they are gained at, preserving input
/// order within each level.
pub fn group_features_by_level(features: Vec<ClassFeature>) -> BTreeMap<u8, Vec<ClassFeature>> {
    group_by_rank(features, |f| f.level)
}

/// Action-cost filter: everything, or exactly one cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostFilter {
    #[default]
    All,
    Cost(ActionCost),
}

impl CostFilter {
    /// Whether a spell's cast cost passes this filter.
    pub fn matches(&self, cost: ActionCost) -> bool {
        match self {
            CostFilter::All => true,
            CostFilter::Cost(wanted) => cost == *wanted,
        }
    }
}

impl std::str::FromStr for CostFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            Ok(CostFilter::All)
        } else {
            Ok(CostFilter::Cost(s.parse()?))
        }
    }
}

/// Free-text query plus action-cost filter over a spell collection.
///
/// The two filters compose with logical AND. Text matching is a
/// case-insensitive substring scan over the indexed fields; search-index
/// internals live with the search collaborator, not here.
#[derive(Debug, Clone, Default)]
pub struct SpellFilter {
    pub query: String,
    pub cost: CostFilter,
}

impl SpellFilter {
    /// Whether a spell passes both filters.
    pub fn matches(&self, spell: &Spell) -> bool {
        if !self.cost.matches(spell.cast) {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        spell
            .indexed_text()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Filter a spell collection, preserving input order.
pub fn filter_spells<'a>(spells: &'a [Spell], filter: &SpellFilter) -> Vec<&'a Spell> {
    spells.iter().filter(|s| filter.matches(s)).collect()
}

/// Used/maximum slot counts for one source and rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotUsage {
    /// Slots exhausted this period
    pub used: usize,
    /// Total slots
    pub max: usize,
}

/// Count used and total slots for a source at a rank.
pub fn slot_usage(slots: &[SpellSlot], source: &str, rank: u8) -> SlotUsage {
    let matching = slots
        .iter()
        .filter(|s| s.source == source && s.rank == rank);
    let (mut used, mut max) = (0, 0);
    for slot in matching {
        max += 1;
        if slot.exhausted {
            used += 1;
        }
    }
    SlotUsage { used, max }
}

/// A slot with its assigned content spell attached for display.
///
/// The attached spell's rank is overridden to the slot's rank, so heightened
/// preparations show their effective rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub slot: SpellSlot,
    pub spell: Option<Spell>,
}

/// Attach content spells to slots and group the result by rank.
pub fn slot_views_by_rank(
    slots: &[SpellSlot],
    spells_by_id: &HashMap<String, Spell>,
) -> BTreeMap<u8, Vec<SlotView>> {
    let views = slots
        .iter()
        .map(|slot| {
            let spell = slot
                .spell_id
                .as_ref()
                .and_then(|id| spells_by_id.get(id))
                .map(|spell| spell.at_rank(slot.rank));
            SlotView {
                slot: slot.clone(),
                spell,
            }
        })
        .collect();
    group_by_rank(views, |view| view.slot.rank)
}

/// Assemble the displayable spells for a section and group them by rank.
///
/// Spells without a list entry keep their own rank. When
/// `apply_rank_overrides` is set (prepared and spontaneous sections), spells
/// carried by a non-ritual list entry are added at the entry's rank instead;
/// ritual entries never override, so a ritual-known spell still shows under
/// its own rank.
pub fn listed_spells_by_rank(
    spell_ids: &[String],
    spells_by_id: &HashMap<String, Spell>,
    list: &[SpellListEntry],
    apply_rank_overrides: bool,
) -> BTreeMap<u8, Vec<Spell>> {
    let mut assembled: Vec<Spell> = spell_ids
        .iter()
        .filter_map(|id| {
            let spell = spells_by_id.get(id)?;
            // Skip spells with a non-ritual entry here; the override pass
            // below re-adds them at the entry's rank.
            let has_entry = list
                .iter()
                .any(|entry| entry.spell_id == *id && !entry.is_ritual());
            if has_entry {
                None
            } else {
                Some(spell.clone())
            }
        })
        .collect();

    if apply_rank_overrides {
        for entry in list.iter().filter(|entry| !entry.is_ritual()) {
            if !spell_ids.contains(&entry.spell_id) {
                continue;
            }
            if let Some(spell) = spells_by_id.get(&entry.spell_id) {
                assembled.push(spell.at_rank(entry.rank));
            }
        }
    }

    group_by_rank(assembled, |spell| spell.rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(id: &str, rank: u8, cast: ActionCost) -> Spell {
        Spell::new(id, id, rank, cast)
    }

    fn by_id(spells: &[Spell]) -> HashMap<String, Spell> {
        spells.iter().map(|s| (s.id.clone(), s.clone())).collect()
    }

    #[test]
    fn grouping_by_rank_is_stable() {
        let spells = vec![
            spell("a", 2, ActionCost::OneAction),
            spell("b", 1, ActionCost::OneAction),
            spell("c", 2, ActionCost::OneAction),
            spell("d", 2, ActionCost::OneAction),
            spell("e", 1, ActionCost::OneAction),
        ];

        let groups = group_by_rank(spells, |s| s.rank);

        let rank_one: Vec<&str> = groups[&1].iter().map(|s| s.id.as_str()).collect();
        let rank_two: Vec<&str> = groups[&2].iter().map(|s| s.id.as_str()).collect();
        assert_eq!(rank_one, vec!["b", "e"]);
        assert_eq!(rank_two, vec!["a", "c", "d"]);

        // Ranks iterate in ascending order.
        let ranks: Vec<u8> = groups.keys().copied().collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn feature_grouping_by_level() {
        let features = vec![
            ClassFeature::new("spellbook", "wizard", "Spellbook", 1),
            ClassFeature::new("school", "wizard", "Arcane School", 1),
            ClassFeature::new("thesis", "wizard", "Arcane Thesis", 3),
        ];

        let groups = group_features_by_level(features);
        assert_eq!(groups[&1].len(), 2);
        assert_eq!(groups[&1][0].id, "spellbook");
        assert_eq!(groups[&3].len(), 1);
    }

    #[test]
    fn filter_by_query_is_case_insensitive() {
        let spells = vec![
            spell("fireball", 3, ActionCost::TwoActions).with_description("A blast of FIRE."),
            spell("hydraulic_push", 1, ActionCost::TwoActions).with_description("A jet of water."),
        ];
        let filter = SpellFilter {
            query: "Fire".into(),
            cost: CostFilter::All,
        };

        let matched = filter_spells(&spells, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "fireball");
    }

    #[test]
    fn blank_query_matches_everything() {
        let spells = vec![spell("shield", 1, ActionCost::OneAction)];
        let filter = SpellFilter {
            query: "   ".into(),
            cost: CostFilter::All,
        };
        assert_eq!(filter_spells(&spells, &filter).len(), 1);
    }

    #[test]
    fn filters_compose_with_logical_and() {
        let spells = vec![
            spell("fireball", 3, ActionCost::TwoActions).with_description("fire damage"),
            spell("produce_flame", 0, ActionCost::OneAction).with_description("fire damage"),
            spell("shield", 1, ActionCost::OneAction).with_description("a barrier"),
        ];

        let combined = SpellFilter {
            query: "fire".into(),
            cost: CostFilter::Cost(ActionCost::OneAction),
        };
        let query_only = SpellFilter {
            query: "fire".into(),
            cost: CostFilter::All,
        };
        let cost_only = SpellFilter {
            query: String::new(),
            cost: CostFilter::Cost(ActionCost::OneAction),
        };

        let combined_ids: Vec<&str> = filter_spells(&spells, &combined)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        let intersection: Vec<&str> = filter_spells(&spells, &query_only)
            .into_iter()
            .filter(|s| filter_spells(&spells, &cost_only).contains(s))
            .map(|s| s.id.as_str())
            .collect();

        assert_eq!(combined_ids, vec!["produce_flame"]);
        assert_eq!(combined_ids, intersection);
    }

    #[test]
    fn cost_filter_from_str() {
        use std::str::FromStr;
        assert_eq!(CostFilter::from_str("ALL").unwrap(), CostFilter::All);
        assert_eq!(
            CostFilter::from_str("REACTION").unwrap(),
            CostFilter::Cost(ActionCost::Reaction)
        );
        assert!(CostFilter::from_str("SOMETIMES").is_err());
    }

    #[test]
    fn slot_usage_counts_used_and_max() {
        let mut exhausted = SpellSlot::new("wizard", 2).with_spell("web");
        exhausted.exhausted = true;
        let slots = vec![
            exhausted,
            SpellSlot::new("wizard", 2).with_spell("invisibility"),
            SpellSlot::new("wizard", 3),
            SpellSlot::new("cleric", 2),
        ];

        assert_eq!(slot_usage(&slots, "wizard", 2), SlotUsage { used: 1, max: 2 });
        assert_eq!(slot_usage(&slots, "wizard", 9), SlotUsage { used: 0, max: 0 });
    }

    #[test]
    fn slot_views_attach_spells_at_slot_rank() {
        let content = [spell("heal", 1, ActionCost::TwoActions)];
        let slots = vec![
            SpellSlot::new("cleric", 3).with_spell("heal"),
            SpellSlot::new("cleric", 3),
        ];

        let views = slot_views_by_rank(&slots, &by_id(&content));
        let rank_three = &views[&3];
        assert_eq!(rank_three.len(), 2);
        assert_eq!(
            rank_three[0].spell.as_ref().map(|s| s.rank),
            Some(3),
            "slot rank overrides the content record's rank"
        );
        assert!(rank_three[1].spell.is_none(), "empty slot has no spell");
    }

    #[test]
    fn listed_spells_honor_rank_overrides() {
        let content = [
            spell("heal", 1, ActionCost::TwoActions),
            spell("bless", 1, ActionCost::TwoActions),
        ];
        let ids = vec!["heal".to_string(), "bless".to_string()];
        let list = vec![SpellListEntry::new("heal", "cleric", 4)];

        let groups = listed_spells_by_rank(&ids, &by_id(&content), &list, true);
        assert_eq!(groups[&1].len(), 1, "bless keeps its own rank");
        assert_eq!(groups[&4].len(), 1, "heal moved to the entry's rank");
        assert_eq!(groups[&4][0].id, "heal");
    }

    #[test]
    fn ritual_entries_do_not_override_ranks() {
        let content = [spell("animate_dead", 5, ActionCost::ThreeActions)];
        let ids = vec!["animate_dead".to_string()];
        let list = vec![SpellListEntry::ritual("animate_dead", 5)];

        let groups = listed_spells_by_rank(&ids, &by_id(&content), &list, false);
        assert_eq!(groups[&5].len(), 1, "ritual spell kept under its own rank");
    }
}
