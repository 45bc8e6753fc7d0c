use async_trait::async_trait;
use types::{FlatRecord, GameId};

use super::GameStore;
use crate::DatabaseError;

/// Keeps everything in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: Vec<FlatRecord>,
    known_cards: Vec<String>,
    last_game_id: GameId,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn insert_game(&mut self, row: &FlatRecord) -> Result<GameId, DatabaseError> {
        self.last_game_id += 1;
        let game_id = self.last_game_id;
        self.games.push(FlatRecord {
            id: Some(game_id),
            ..row.clone()
        });
        Ok(game_id)
    }

    async fn fetch_all_games(&mut self) -> Result<Vec<FlatRecord>, DatabaseError> {
        Ok(self.games.clone())
    }

    async fn fetch_all_known_cards(&mut self) -> Result<Vec<String>, DatabaseError> {
        Ok(self.known_cards.clone())
    }

    async fn insert_known_card(&mut self, name: &str) -> Result<(), DatabaseError> {
        if self.known_cards.iter().any(|known| known == name) {
            return Err(DatabaseError::DuplicateCard(name.to_string()));
        }
        self.known_cards.push(name.to_string());
        Ok(())
    }
}
