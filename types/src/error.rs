use thiserror::Error;

use crate::game_record::GameId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("At least one player is required")]
    NoPlayers,

    #[error("Invalid score for {player}: {value:?} is not an integer")]
    InvalidScore { player: String, value: String },

    #[error("{field} entry {value:?} contains a reserved delimiter (';' or ':')")]
    ReservedDelimiter { field: &'static str, value: String },

    #[error("Malformed record {}: bad {field} entry {value:?}", display_id(.id))]
    MalformedRecord {
        id: Option<GameId>,
        field: &'static str,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Card already known: {0}")]
    DuplicateCard(String),

    #[error("Card name must not be empty")]
    EmptyName,

    #[error("Card name {0:?} contains a reserved delimiter (';' or ':')")]
    ReservedDelimiter(String),

    #[error("Card name {0:?} has leading or trailing whitespace")]
    PaddedName(String),
}

fn display_id(id: &Option<GameId>) -> String {
    id.map_or_else(|| "<unsaved>".to_string(), |id| format!("#{id}"))
}
