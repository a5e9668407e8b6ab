//! Spellcasting resources owned by a character.
//!
//! The slot, list, and innate definitions are sized by capability resolution
//! from class/feat/level data; the ledger only ever flips `exhausted` flags,
//! reassigns `spell_id`s, and adjusts the use counters tracked here.

use serde::{Deserialize, Serialize};

use super::spell::Tradition;
use crate::error::DomainError;

/// Reserved source name for ritual list entries.
pub const RITUALS_SOURCE: &str = "RITUALS";

/// A named spellcasting capability a character possesses.
///
/// Immutable once established for a character; only external character-build
/// operations change it, never the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CastingSource {
    /// Unique name of the source (e.g., the granting class)
    pub name: String,
    /// Casting style and tradition
    pub kind: SourceKind,
}

impl CastingSource {
    /// Create a new casting source.
    pub fn new(name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Casting style and tradition of a source.
///
/// Serialized as the combined wire string, e.g. `"SPONTANEOUS-ARCANE"` or
/// `"PREPARED-DIVINE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SourceKind {
    /// Slots are interchangeable within a rank
    Spontaneous(Tradition),
    /// Each slot holds one prepared spell
    Prepared(Tradition),
}

impl SourceKind {
    /// The tradition this source casts from.
    pub fn tradition(&self) -> Tradition {
        match self {
            SourceKind::Spontaneous(t) | SourceKind::Prepared(t) => *t,
        }
    }

    /// Whether this is a spontaneous source.
    pub fn is_spontaneous(&self) -> bool {
        matches!(self, SourceKind::Spontaneous(_))
    }

    /// Whether this is a prepared source.
    pub fn is_prepared(&self) -> bool {
        matches!(self, SourceKind::Prepared(_))
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Spontaneous(t) => write!(f, "SPONTANEOUS-{}", t.as_str()),
            SourceKind::Prepared(t) => write!(f, "PREPARED-{}", t.as_str()),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(tradition) = s.strip_prefix("SPONTANEOUS-") {
            return Ok(SourceKind::Spontaneous(tradition.parse()?));
        }
        if let Some(tradition) = s.strip_prefix("PREPARED-") {
            return Ok(SourceKind::Prepared(tradition.parse()?));
        }
        Err(DomainError::parse(format!("Unknown source kind: {s}")))
    }
}

impl From<SourceKind> for String {
    fn from(value: SourceKind) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for SourceKind {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One unit of casting capacity at a given rank, tied to exactly one source.
///
/// Slots are created and sized externally when the character's casting
/// capacity is computed; the ledger only flips `exhausted` or reassigns
/// `spell_id`, never creates or destroys slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpellSlot {
    /// Name of the casting source this slot belongs to
    pub source: String,
    /// Rank of the slot (0 = cantrip-equivalent)
    pub rank: u8,
    /// Spell currently assigned to this slot (prepared casting)
    #[serde(default)]
    pub spell_id: Option<String>,
    /// Whether this slot's casting has been used this period
    #[serde(default)]
    pub exhausted: bool,
}

impl SpellSlot {
    /// Create a fresh, unexhausted slot.
    pub fn new(source: impl Into<String>, rank: u8) -> Self {
        Self {
            source: source.into(),
            rank,
            spell_id: None,
            exhausted: false,
        }
    }

    /// Assign a spell to this slot.
    pub fn with_spell(mut self, spell_id: impl Into<String>) -> Self {
        self.spell_id = Some(spell_id.into());
        self
    }
}

/// Association of a spell with a source and rank.
///
/// Represents "this spell is known/preparable at this rank for this source."
/// Ritual availability uses the reserved [`RITUALS_SOURCE`] source name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpellListEntry {
    /// ID of the spell
    pub spell_id: String,
    /// Name of the casting source
    pub source: String,
    /// Effective rank for this source (overrides the content record's rank)
    pub rank: u8,
}

impl SpellListEntry {
    /// Create a new list entry.
    pub fn new(spell_id: impl Into<String>, source: impl Into<String>, rank: u8) -> Self {
        Self {
            spell_id: spell_id.into(),
            source: source.into(),
            rank,
        }
    }

    /// Create a ritual entry.
    pub fn ritual(spell_id: impl Into<String>, rank: u8) -> Self {
        Self::new(spell_id, RITUALS_SOURCE, rank)
    }

    /// Whether this entry represents ritual availability.
    pub fn is_ritual(&self) -> bool {
        self.source == RITUALS_SOURCE
    }
}

/// A focus spell granted to a source. Display only; focus casting draws on
/// the shared focus point pool, not on per-spell state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FocusSpellEntry {
    /// ID of the spell
    pub spell_id: String,
    /// Name of the granting source
    pub source: String,
    /// Effective rank, if it differs from the content record's
    #[serde(default)]
    pub rank: Option<u8>,
}

impl FocusSpellEntry {
    /// Create a new focus spell entry.
    pub fn new(spell_id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            spell_id: spell_id.into(),
            source: source.into(),
            rank: None,
        }
    }

    /// Set the effective rank.
    pub fn with_rank(mut self, rank: u8) -> Self {
        self.rank = Some(rank);
        self
    }
}

/// Tracking for an innate (non-slot) casting ability.
///
/// # Invariants
///
/// - `0 <= casts_current <= casts_max` after every mutation; both directions
///   clamp rather than reject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "InnateCastEntryRecord")]
pub struct InnateCastEntry {
    /// ID of the spell
    spell_id: String,
    /// Rank the spell is cast at
    rank: u8,
    /// Casts used this period
    casts_current: u8,
    /// Maximum casts per period
    casts_max: u8,
}

/// Raw wire form of an innate entry. Deserialization goes through this so
/// the `casts_current <= casts_max` invariant also holds for external input.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InnateCastEntryRecord {
    spell_id: String,
    rank: u8,
    #[serde(default)]
    casts_current: u8,
    casts_max: u8,
}

impl From<InnateCastEntryRecord> for InnateCastEntry {
    fn from(record: InnateCastEntryRecord) -> Self {
        InnateCastEntry::new(record.spell_id, record.rank, record.casts_max)
            .with_casts_current(record.casts_current)
    }
}

impl InnateCastEntry {
    /// Create a new innate entry with no casts used.
    pub fn new(spell_id: impl Into<String>, rank: u8, casts_max: u8) -> Self {
        Self {
            spell_id: spell_id.into(),
            rank,
            casts_current: 0,
            casts_max,
        }
    }

    /// Set the current used-cast count, clamped to `[0, casts_max]`.
    pub fn with_casts_current(mut self, casts_current: u8) -> Self {
        self.casts_current = casts_current.min(self.casts_max);
        self
    }

    /// Get the spell ID.
    pub fn spell_id(&self) -> &str {
        &self.spell_id
    }

    /// Get the rank.
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Get the casts used this period.
    pub fn casts_current(&self) -> u8 {
        self.casts_current
    }

    /// Get the maximum casts per period.
    pub fn casts_max(&self) -> u8 {
        self.casts_max
    }

    /// Whether a matching cast request targets this entry.
    pub fn matches(&self, spell_id: &str, rank: u8) -> bool {
        self.spell_id == spell_id && self.rank == rank
    }

    /// Record one cast, clamped at the ceiling.
    pub fn expend(&mut self) {
        self.casts_current = self.casts_current.saturating_add(1).min(self.casts_max);
    }

    /// Un-record one cast, clamped at the floor.
    pub fn restore(&mut self) {
        self.casts_current = self.casts_current.saturating_sub(1);
    }
}

/// A character's spell-resource sub-record.
///
/// The sub-record may be absent on a character; [`CharacterSpells::new`] is
/// the single zero-valued default used in that case, so mutation sites never
/// re-derive defaults themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSpells {
    /// Resolved spell slots across all sources
    #[serde(default)]
    slots: Vec<SpellSlot>,
    /// Known/preparable spell list entries (rituals included)
    #[serde(default)]
    list: Vec<SpellListEntry>,
    /// Shared focus point pool, floor-clamped at 0
    #[serde(default)]
    focus_point_current: u8,
    /// Innate casting abilities
    #[serde(default)]
    innate_casts: Vec<InnateCastEntry>,
}

impl CharacterSpells {
    /// Create the zero-valued default: empty slots, empty list, zero focus
    /// points, no innate casts.
    pub fn new() -> Self {
        Self::default()
    }

    // Read-only accessors

    /// Get the resolved spell slots.
    pub fn slots(&self) -> &[SpellSlot] {
        &self.slots
    }

    /// Get the spell list entries.
    pub fn list(&self) -> &[SpellListEntry] {
        &self.list
    }

    /// Get the current focus points.
    pub fn focus_point_current(&self) -> u8 {
        self.focus_point_current
    }

    /// Get the innate cast entries.
    pub fn innate_casts(&self) -> &[InnateCastEntry] {
        &self.innate_casts
    }

    // Builder-style methods, also used by the ledger to build updated copies

    /// Replace the slot collection.
    pub fn with_slots(mut self, slots: Vec<SpellSlot>) -> Self {
        self.slots = slots;
        self
    }

    /// Replace the spell list.
    pub fn with_list(mut self, list: Vec<SpellListEntry>) -> Self {
        self.list = list;
        self
    }

    /// Set the focus point counter.
    pub fn with_focus_points(mut self, focus_point_current: u8) -> Self {
        self.focus_point_current = focus_point_current;
        self
    }

    /// Replace the innate cast entries.
    pub fn with_innate_casts(mut self, innate_casts: Vec<InnateCastEntry>) -> Self {
        self.innate_casts = innate_casts;
        self
    }
}
