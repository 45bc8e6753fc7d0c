use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type GameId = i64;

/// One played session, in structured form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Assigned by storage on insert.
    pub id: Option<GameId>,
    pub date: NaiveDate,
    pub players: Vec<String>,
    pub winners: BTreeSet<String>,
    pub scores: BTreeMap<String, i64>,
    pub kingdom_cards: BTreeSet<String>,
    pub expansions: Vec<String>,
    pub notes: Option<String>,
}

impl GameRecord {
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

/// A game as typed in by the user, before any validation.
///
/// `winners`, `kingdom_cards` and `expansions` are comma-separated. Each
/// score is the raw text entered for that player; blank means no score was
/// recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub players: Vec<String>,
    pub winners: String,
    pub scores: Vec<(String, String)>,
    pub kingdom_cards: String,
    pub expansions: String,
    pub notes: String,
}

/// A game as persisted: one text column per composite field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: Option<GameId>,
    pub date: String,
    pub players: String,
    pub winners: String,
    pub scores: String,
    pub kingdom_cards: String,
    pub expansions: String,
    pub notes: Option<String>,
}

/// A kingdom card token that was not in the registry and got dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnknownCard(pub String);

impl Display for UnknownCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown kingdom card '{}' was not recorded", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub record: GameRecord,
    pub warnings: Vec<UnknownCard>,
}
