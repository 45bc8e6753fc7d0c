use std::collections::BTreeMap;

use database::GameStore;
use types::{
    aggregate, codec, CardRegistry, GameId, GameRecord, PlayerStats, Submission, UnknownCard,
};

use crate::TrackerError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedGame {
    pub record: GameRecord,
    pub warnings: Vec<UnknownCard>,
}

impl RecordedGame {
    pub fn id(&self) -> Option<GameId> {
        self.record.id
    }
}

/// The operations behind each menu entry, bound to one store.
pub struct Tracker<S> {
    store: S,
}

impl<S: GameStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Seeds the starter cards on first run; returns how many were stored.
    pub async fn ensure_seeded(&mut self) -> Result<usize, TrackerError> {
        let mut registry = self.known_cards().await?;
        let added = registry.seed_if_empty();
        if !added.is_empty() {
            self.store.insert_known_cards(&added).await?;
        }
        Ok(added.len())
    }

    pub async fn record_game(
        &mut self,
        submission: &Submission,
    ) -> Result<RecordedGame, TrackerError> {
        let registry = self.known_cards().await?;
        let encoded = codec::encode(submission, &registry)?;
        for warning in &encoded.warnings {
            log::warn!("{warning}");
        }

        let mut record = encoded.record;
        let game_id = self.store.insert_game(&codec::flatten(&record)).await?;
        record.id = Some(game_id);
        log::info!(
            "Recorded game {game_id} with {} players",
            record.players.len()
        );

        Ok(RecordedGame {
            record,
            warnings: encoded.warnings,
        })
    }

    /// Every stored game, oldest first. Fails on the first malformed row.
    pub async fn games(&mut self) -> Result<Vec<GameRecord>, TrackerError> {
        let rows = self.store.fetch_all_games().await?;
        let mut games = rows
            .iter()
            .map(codec::decode)
            .collect::<Result<Vec<_>, _>>()?;
        games.sort_by_key(|game| game.id);
        Ok(games)
    }

    pub async fn player_stats(&mut self) -> Result<BTreeMap<String, PlayerStats>, TrackerError> {
        let games = self.games().await?;
        log::debug!("Aggregating stats over {} games", games.len());
        Ok(aggregate(&games))
    }

    pub async fn known_cards(&mut self) -> Result<CardRegistry, TrackerError> {
        let names = self.store.fetch_all_known_cards().await?;
        Ok(names.into_iter().collect())
    }

    /// Adds `name` exactly as given; callers trim user input.
    pub async fn add_card(&mut self, name: &str) -> Result<(), TrackerError> {
        let mut registry = self.known_cards().await?;
        registry.add(name)?;
        self.store.insert_known_card(name).await?;
        log::info!("Added known card {name}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use database::MemoryGameStore;
    use types::{CodecError, RegistryError, STARTER_CARDS};

    use super::*;

    fn submission(players: &[&str], winners: &str, scores: &[(&str, &str)]) -> Submission {
        Submission {
            players: players.iter().map(|p| p.to_string()).collect(),
            winners: winners.to_string(),
            scores: scores
                .iter()
                .map(|(p, s)| (p.to_string(), s.to_string()))
                .collect(),
            kingdom_cards: "Village, Witch".to_string(),
            expansions: String::new(),
            notes: String::new(),
        }
    }

    async fn seeded_tracker() -> Tracker<MemoryGameStore> {
        let mut tracker = Tracker::new(MemoryGameStore::new());
        tracker.ensure_seeded().await.unwrap();
        tracker
    }

    #[tokio::test]
    async fn test_ensure_seeded_runs_once() {
        let mut tracker = Tracker::new(MemoryGameStore::new());

        assert_eq!(tracker.ensure_seeded().await.unwrap(), STARTER_CARDS.len());
        assert_eq!(tracker.ensure_seeded().await.unwrap(), 0);
        assert_eq!(
            tracker.known_cards().await.unwrap().len(),
            STARTER_CARDS.len()
        );
    }

    #[tokio::test]
    async fn test_record_game_assigns_id_and_filters_cards() {
        let mut tracker = Tracker::new(MemoryGameStore::new());
        tracker.add_card("Village").await.unwrap();

        let recorded = tracker
            .record_game(&submission(&["Alice", "Bob"], "Alice", &[("Alice", "30")]))
            .await
            .unwrap();

        assert_eq!(recorded.id(), Some(1));
        assert_eq!(recorded.warnings, vec![UnknownCard("Witch".to_string())]);
        let games = tracker.games().await.unwrap();
        assert_eq!(games, vec![recorded.record]);
    }

    #[tokio::test]
    async fn test_record_game_rejects_bad_score() {
        let mut tracker = seeded_tracker().await;

        let err = tracker
            .record_game(&submission(&["Alice"], "Alice", &[("Alice", "3O")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TrackerError::Codec(CodecError::InvalidScore { .. })
        ));
        assert!(tracker.games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_player_stats_over_stored_games() {
        let mut tracker = seeded_tracker().await;
        tracker
            .record_game(&submission(&["Alice", "Bob"], "Bob", &[("Alice", "20"), ("Bob", "24")]))
            .await
            .unwrap();
        tracker
            .record_game(&submission(
                &["Alice", "Bob"],
                "Alice, Bob",
                &[("Alice", "35"), ("Bob", "35")],
            ))
            .await
            .unwrap();

        let stats = tracker.player_stats().await.unwrap();

        assert_eq!(stats["Alice"].average_score, Some(27.5));
        assert_eq!(stats["Alice"].highest_score, Some(35));
        assert_eq!(stats["Alice"].wins, 1);
        assert_eq!(stats["Bob"].wins, 2);
        assert_eq!(stats["Bob"].win_rate, 1.0);
    }

    #[tokio::test]
    async fn test_add_card_rejects_duplicates() {
        let mut tracker = seeded_tracker().await;

        let err = tracker.add_card("Village").await.unwrap_err();

        assert!(matches!(
            err,
            TrackerError::Registry(RegistryError::DuplicateCard(name)) if name == "Village"
        ));
        assert_eq!(
            tracker.known_cards().await.unwrap().len(),
            STARTER_CARDS.len()
        );
    }

    #[tokio::test]
    async fn test_add_card_keeps_name_exact() {
        let mut tracker = Tracker::new(MemoryGameStore::new());

        let err = tracker.add_card(" Platinum ").await.unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Registry(RegistryError::PaddedName(_))
        ));

        tracker.add_card("platinum").await.unwrap();
        tracker.add_card("Platinum").await.unwrap();
        let names: Vec<String> = tracker
            .known_cards()
            .await
            .unwrap()
            .names()
            .map(str::to_string)
            .collect();
        assert_eq!(names, vec!["Platinum", "platinum"]);
    }

    #[tokio::test]
    async fn test_malformed_row_is_reported() {
        let mut store = MemoryGameStore::new();
        store
            .insert_game(&types::FlatRecord {
                date: "2024-02-02".to_string(),
                players: "Alice".to_string(),
                scores: "Alice=12".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let mut tracker = Tracker::new(store);

        let err = tracker.player_stats().await.unwrap_err();

        assert!(matches!(
            err,
            TrackerError::Codec(CodecError::MalformedRecord { id: Some(1), .. })
        ));
    }
}
