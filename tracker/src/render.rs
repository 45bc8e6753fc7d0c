use std::collections::BTreeMap;

use itertools::Itertools;
use types::{ranked, CardRegistry, GameRecord, PlayerStats, StatsOrder};

const SEPARATOR: &str = "------------------------------";

pub fn game(record: &GameRecord) -> String {
    let id = record
        .id
        .map(|id| id.to_string())
        .unwrap_or("unsaved".to_string());
    let scores = record
        .scores
        .iter()
        .map(|(player, score)| format!("    - {player}: {score}\n"))
        .join("");
    format!(
        "Game ID: {id}\n  Date: {}\n  Players: {}\n  Winners: {}\n  Scores:\n{scores}  Kingdom Cards: {}\n  Expansions: {}\n  Notes: {}\n{SEPARATOR}",
        record.date,
        record.players.iter().join(", "),
        none_if_empty(record.winners.iter().join(", ")),
        none_if_empty(record.kingdom_cards.iter().join(", ")),
        none_if_empty(record.expansions.iter().join(", ")),
        record.notes.as_deref().unwrap_or("None"),
    )
}

pub fn games(records: &[GameRecord]) -> String {
    if records.is_empty() {
        return "No games recorded yet. Start by recording a new game!".to_string();
    }
    records.iter().map(game).join("\n")
}

pub fn player_stats(name: &str, stats: &PlayerStats) -> String {
    let average = stats
        .average_score
        .map(|avg| format!("{avg:.2}"))
        .unwrap_or("n/a".to_string());
    let highest = stats
        .highest_score
        .map(|score| score.to_string())
        .unwrap_or("n/a".to_string());
    format!(
        "Player: {name}\n  Games Played: {}\n  Wins: {}\n  Win Rate: {:.2}%\n  Average Score: {average}\n  Highest Score: {highest}\n{SEPARATOR}",
        stats.games_played,
        stats.wins,
        stats.win_rate * 100.0,
    )
}

pub fn stats_table(stats: &BTreeMap<String, PlayerStats>, order: StatsOrder) -> String {
    if stats.is_empty() {
        return "No player data found.".to_string();
    }
    ranked(stats, order)
        .into_iter()
        .map(|(name, stats)| player_stats(name, stats))
        .join("\n")
}

pub fn known_cards(registry: &CardRegistry) -> String {
    if registry.is_empty() {
        return "No known cards.".to_string();
    }
    let cards = registry.names().map(|name| format!("  - {name}")).join("\n");
    format!("Known Kingdom Cards ({}):\n{cards}", registry.len())
}

fn none_if_empty(joined: String) -> String {
    if joined.is_empty() {
        "None".to_string()
    } else {
        joined
    }
}
