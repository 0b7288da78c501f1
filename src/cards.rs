// src/cards.rs
//
// Output records. Field names and optionality serialize into the
// interchange shape downstream tooling consumes: camelCase keys, `type`
// spelled out, `ability` omitted entirely when a Pokemon has none.

use serde::Serialize;

/// One attack on a Pokemon card. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attack {
    pub name: String,
    /// Energy tokens in display order; "Type xN" labels arrive expanded.
    pub cost: Vec<String>,
    pub damage: u32,
    pub effect: Option<String>,
}

/// A named ability with its rules text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ability {
    pub title: String,
    pub effect: String,
}

/// Supporter / Item / Pokemon Tool row: identity plus the marker cell
/// kept as one raw text blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerCard {
    pub id: String,
    pub name: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonCard {
    pub id: String,
    pub name: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stage: String,
    /// Id of the card this evolves from; None for Basic stage.
    pub requires: Option<String>,
    pub retreat_cost: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<Ability>,
    pub attacks: Vec<Attack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Card {
    Pokemon(PokemonCard),
    Trainer(TrainerCard),
}

impl Card {
    pub fn id(&self) -> &str {
        match self {
            Card::Pokemon(c) => &c.id,
            Card::Trainer(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Card::Pokemon(c) => &c.name,
            Card::Trainer(c) => &c.name,
        }
    }

    /// Evolution prerequisite; trainer cards never have one.
    pub fn requires(&self) -> Option<&str> {
        match self {
            Card::Pokemon(c) => c.requires.as_deref(),
            Card::Trainer(_) => None,
        }
    }
}
