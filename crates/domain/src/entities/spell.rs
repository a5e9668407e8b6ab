//! Spell content record.
//!
//! A `Spell` is an immutable content-store record: the ledger and display
//! layers read it but never modify it. The optional text fields are the ones
//! the spell search indexes.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A spell as materialized from the content store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    /// Unique identifier for this spell
    pub id: String,
    /// Display name of the spell
    pub name: String,
    /// Spell rank (0 = cantrip tier)
    pub rank: u8,
    /// Action cost to cast
    pub cast: ActionCost,
    /// Magical traditions whose lists carry this spell
    #[serde(default)]
    pub traditions: Vec<Tradition>,
    /// Full description of the spell's effects
    #[serde(default)]
    pub description: String,
    /// How long the spell lasts
    #[serde(default)]
    pub duration: Option<String>,
    /// What the spell can target
    #[serde(default)]
    pub targets: Option<String>,
    /// Area of effect
    #[serde(default)]
    pub area: Option<String>,
    /// Range of the spell
    #[serde(default)]
    pub range: Option<String>,
    /// Requirements to cast
    #[serde(default)]
    pub requirements: Option<String>,
    /// Trigger condition (for reaction spells)
    #[serde(default)]
    pub trigger: Option<String>,
    /// Material or other cost
    #[serde(default)]
    pub cost: Option<String>,
    /// Defense the spell targets (e.g., "AC", "Will")
    #[serde(default)]
    pub defense: Option<String>,
}

impl Spell {
    /// Create a new spell with required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rank: u8, cast: ActionCost) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rank,
            cast,
            traditions: Vec::new(),
            description: String::new(),
            duration: None,
            targets: None,
            area: None,
            range: None,
            requirements: None,
            trigger: None,
            cost: None,
            defense: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the traditions.
    pub fn with_traditions(mut self, traditions: Vec<Tradition>) -> Self {
        self.traditions = traditions;
        self
    }

    /// Whether this spell is a cantrip.
    ///
    /// Cantrips are the rank-0 tier and are castable without expending any
    /// tracked resource, so the ledger treats casting one as a no-op.
    pub fn is_cantrip(&self) -> bool {
        self.rank == 0
    }

    /// Return a copy of this spell with its rank overridden.
    ///
    /// Slots and list entries can carry a spell at a different rank than the
    /// content record's own (heightened spells); display rows always show the
    /// effective rank.
    pub fn at_rank(&self, rank: u8) -> Self {
        let mut spell = self.clone();
        spell.rank = rank;
        spell
    }

    /// The text fields the spell search indexes, in index order.
    pub fn indexed_text(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            Some(self.description.as_str()),
            self.duration.as_deref(),
            self.targets.as_deref(),
            self.area.as_deref(),
            self.range.as_deref(),
            self.requirements.as_deref(),
            self.trigger.as_deref(),
            self.cost.as_deref(),
            self.defense.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Action cost of casting a spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ActionCost {
    OneAction,
    TwoActions,
    ThreeActions,
    FreeAction,
    Reaction,
}

impl ActionCost {
    /// The wire string for this cost (e.g., `"ONE-ACTION"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCost::OneAction => "ONE-ACTION",
            ActionCost::TwoActions => "TWO-ACTIONS",
            ActionCost::ThreeActions => "THREE-ACTIONS",
            ActionCost::FreeAction => "FREE-ACTION",
            ActionCost::Reaction => "REACTION",
        }
    }
}

impl std::fmt::Display for ActionCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionCost {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONE-ACTION" => Ok(ActionCost::OneAction),
            "TWO-ACTIONS" => Ok(ActionCost::TwoActions),
            "THREE-ACTIONS" => Ok(ActionCost::ThreeActions),
            "FREE-ACTION" => Ok(ActionCost::FreeAction),
            "REACTION" => Ok(ActionCost::Reaction),
            _ => Err(DomainError::parse(format!("Unknown action cost: {s}"))),
        }
    }
}

/// A magical tradition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    Arcane,
    Divine,
    Occult,
    Primal,
}

impl Tradition {
    /// Uppercase name as used in source-kind strings (e.g., `"ARCANE"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Tradition::Arcane => "ARCANE",
            Tradition::Divine => "DIVINE",
            Tradition::Occult => "OCCULT",
            Tradition::Primal => "PRIMAL",
        }
    }
}

impl std::str::FromStr for Tradition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ARCANE" => Ok(Tradition::Arcane),
            "DIVINE" => Ok(Tradition::Divine),
            "OCCULT" => Ok(Tradition::Occult),
            "PRIMAL" => Ok(Tradition::Primal),
            _ => Err(DomainError::parse(format!("Unknown tradition: {s}"))),
        }
    }
}
