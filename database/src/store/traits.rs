use async_trait::async_trait;
use types::{FlatRecord, GameId};

use crate::DatabaseError;

/// Persistence for flat game rows and the known-card registry.
///
/// Callers must not rely on the order of [`GameStore::fetch_all_games`].
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn insert_game(&mut self, row: &FlatRecord) -> Result<GameId, DatabaseError>;
    async fn fetch_all_games(&mut self) -> Result<Vec<FlatRecord>, DatabaseError>;
    async fn fetch_all_known_cards(&mut self) -> Result<Vec<String>, DatabaseError>;
    async fn insert_known_card(&mut self, name: &str) -> Result<(), DatabaseError>;

    async fn insert_known_cards(&mut self, names: &[String]) -> Result<(), DatabaseError> {
        for name in names {
            self.insert_known_card(name).await?;
        }
        Ok(())
    }
}
