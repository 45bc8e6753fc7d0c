use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate};
use itertools::Itertools;

use crate::{
    error::CodecError,
    game_record::{Encoded, FlatRecord, GameRecord, Submission, UnknownCard},
    registry::CardRegistry,
};

pub const LIST_DELIMITER: char = ';';
pub const SCORE_DELIMITER: char = ':';
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn has_reserved_delimiter(name: &str) -> bool {
    name.contains([LIST_DELIMITER, SCORE_DELIMITER])
}

/// Splits comma-separated input into trimmed, non-empty tokens.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validates a submission against the card registry, stamped with today's date.
pub fn encode(submission: &Submission, registry: &CardRegistry) -> Result<Encoded, CodecError> {
    encode_on(submission, registry, Local::now().date_naive())
}

pub fn encode_on(
    submission: &Submission,
    registry: &CardRegistry,
    date: NaiveDate,
) -> Result<Encoded, CodecError> {
    let players: Vec<String> = submission
        .players
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if players.is_empty() {
        return Err(CodecError::NoPlayers);
    }
    check_names("players", &players)?;

    let winners: BTreeSet<String> = split_list(&submission.winners).into_iter().collect();
    check_names("winners", &winners)?;

    let mut scores = BTreeMap::new();
    for (player, raw) in &submission.scores {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let score = raw.parse::<i64>().map_err(|_| CodecError::InvalidScore {
            player: player.trim().to_string(),
            value: raw.to_string(),
        })?;
        scores.insert(player.trim().to_string(), score);
    }
    check_names("scores", scores.keys())?;

    let (known, unknown): (Vec<String>, Vec<String>) = split_list(&submission.kingdom_cards)
        .into_iter()
        .partition(|card| registry.contains(card));
    let kingdom_cards: BTreeSet<String> = known.into_iter().collect();
    check_names("kingdom_cards", &kingdom_cards)?;
    let warnings: Vec<UnknownCard> = unknown.into_iter().map(UnknownCard).collect();

    let expansions = split_list(&submission.expansions);
    check_names("expansions", &expansions)?;

    let notes = submission.notes.trim();
    let record = GameRecord {
        id: None,
        date,
        players,
        winners,
        scores,
        kingdom_cards,
        expansions,
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    };

    Ok(Encoded { record, warnings })
}

/// Joins the composite fields of a record into their stored text form.
pub fn flatten(record: &GameRecord) -> FlatRecord {
    let separator = LIST_DELIMITER.to_string();
    FlatRecord {
        id: record.id,
        date: record.date.format(DATE_FORMAT).to_string(),
        players: record.players.iter().join(&separator),
        winners: record.winners.iter().join(&separator),
        scores: record
            .scores
            .iter()
            .map(|(player, score)| format!("{player}{SCORE_DELIMITER}{score}"))
            .join(&separator),
        kingdom_cards: record.kingdom_cards.iter().join(&separator),
        expansions: record.expansions.iter().join(&separator),
        notes: record.notes.clone(),
    }
}

/// Rebuilds a record from its stored form.
pub fn decode(row: &FlatRecord) -> Result<GameRecord, CodecError> {
    let malformed = |field: &'static str, value: &str| CodecError::MalformedRecord {
        id: row.id,
        field,
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
        .map_err(|_| malformed("date", &row.date))?;

    let mut scores = BTreeMap::new();
    for entry in split_field(&row.scores) {
        let (player, score) = entry
            .split_once(SCORE_DELIMITER)
            .ok_or_else(|| malformed("scores", entry))?;
        let score = score
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed("scores", entry))?;
        scores.insert(player.trim().to_string(), score);
    }

    Ok(GameRecord {
        id: row.id,
        date,
        players: split_field(&row.players).map(str::to_string).collect(),
        winners: split_field(&row.winners).map(str::to_string).collect(),
        scores,
        kingdom_cards: split_field(&row.kingdom_cards).map(str::to_string).collect(),
        expansions: split_field(&row.expansions).map(str::to_string).collect(),
        notes: row.notes.clone().filter(|notes| !notes.is_empty()),
    })
}

fn split_field(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(LIST_DELIMITER)
        .filter(|segment| !segment.is_empty())
}

fn check_names<'a>(
    field: &'static str,
    names: impl IntoIterator<Item = &'a String>,
) -> Result<(), CodecError> {
    match names.into_iter().find(|name| has_reserved_delimiter(name)) {
        Some(name) => Err(CodecError::ReservedDelimiter {
            field,
            value: name.clone(),
        }),
        None => Ok(()),
    }
}
