use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::game_record::GameRecord;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub wins: u32,
    /// Fraction in `0.0..=1.0`.
    pub win_rate: f64,
    /// Mean over the games where a score was recorded.
    pub average_score: Option<f64>,
    pub highest_score: Option<i64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatsOrder {
    Name,
    WinRate,
}

#[derive(Default)]
struct Tally {
    games_played: u32,
    wins: u32,
    score_sum: i128,
    scored_games: u32,
    highest_score: Option<i64>,
}

impl Tally {
    fn finish(self) -> PlayerStats {
        let win_rate = if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games_played)
        };
        let average_score = (self.scored_games > 0)
            .then(|| self.score_sum as f64 / f64::from(self.scored_games));
        PlayerStats {
            games_played: self.games_played,
            wins: self.wins,
            win_rate,
            average_score,
            highest_score: self.highest_score,
        }
    }
}

/// Folds the full game history into per-player statistics.
///
/// The result does not depend on the order of `history`.
pub fn aggregate<'a>(
    history: impl IntoIterator<Item = &'a GameRecord>,
) -> BTreeMap<String, PlayerStats> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for game in history {
        for player in &game.players {
            let tally = tallies.entry(player.as_str()).or_default();
            tally.games_played += 1;
            if game.winners.contains(player) {
                tally.wins += 1;
            }
            if let Some(&score) = game.scores.get(player) {
                tally.score_sum += i128::from(score);
                tally.scored_games += 1;
                tally.highest_score = tally.highest_score.max(Some(score));
            }
        }
    }

    tallies
        .into_iter()
        .map(|(player, tally)| (player.to_string(), tally.finish()))
        .collect()
}

/// Orders aggregated stats for display. Win-rate order is descending, with
/// ties broken by name.
pub fn ranked(
    stats: &BTreeMap<String, PlayerStats>,
    order: StatsOrder,
) -> Vec<(&str, &PlayerStats)> {
    let entries = stats.iter().map(|(name, stats)| (name.as_str(), stats));
    match order {
        StatsOrder::Name => entries.collect(),
        StatsOrder::WinRate => entries
            .sorted_by(|(a_name, a), (b_name, b)| {
                b.win_rate
                    .total_cmp(&a.win_rate)
                    .then_with(|| a_name.cmp(b_name))
            })
            .collect(),
    }
}
