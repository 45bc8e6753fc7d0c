use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use types::{FlatRecord, GameId};

use super::GameStore;
use crate::DatabaseError;

pub struct SqliteGameStore {
    pool: SqlitePool,
}

impl SqliteGameStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        tracing::debug!("Database schema is up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Waits for in-flight queries and closes every pooled connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn flat_record_from_row(row: &SqliteRow) -> FlatRecord {
    FlatRecord {
        id: Some(row.get("id")),
        date: row.get("date"),
        players: row.get("players"),
        winners: row.get("winners"),
        scores: row.get("scores"),
        kingdom_cards: row.get("kingdom_cards"),
        expansions: row.get("expansions"),
        notes: row.get("notes"),
    }
}

fn card_insert_error(name: &str, e: sqlx::Error) -> DatabaseError {
    let is_duplicate = e
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if is_duplicate {
        DatabaseError::DuplicateCard(name.to_string())
    } else {
        DatabaseError::Query(e.to_string())
    }
}

#[async_trait]
impl GameStore for SqliteGameStore {
    async fn insert_game(&mut self, row: &FlatRecord) -> Result<GameId, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO games (date, players, winners, scores, kingdom_cards, expansions, notes) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&row.date)
        .bind(&row.players)
        .bind(&row.winners)
        .bind(&row.scores)
        .bind(&row.kingdom_cards)
        .bind(&row.expansions)
        .bind(&row.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let game_id = result.last_insert_rowid();
        tracing::info!("Stored game {game_id}");
        Ok(game_id)
    }

    async fn fetch_all_games(&mut self) -> Result<Vec<FlatRecord>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, date, players, winners, scores, kingdom_cards, expansions, notes FROM games"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;

        Ok(rows.iter().map(flat_record_from_row).collect())
    }

    async fn fetch_all_known_cards(&mut self) -> Result<Vec<String>, DatabaseError> {
        let rows = sqlx::query("SELECT name FROM known_cards ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        Ok(rows.iter().map(|r| r.get("name")).collect())
    }

    async fn insert_known_card(&mut self, name: &str) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO known_cards (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| card_insert_error(name, e))?;
        Ok(())
    }

    async fn insert_known_cards(&mut self, names: &[String]) -> Result<(), DatabaseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::Transaction(e.to_string()))?;

        for name in names {
            sqlx::query("INSERT INTO known_cards (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await
                .map_err(|e| card_insert_error(name, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::Transaction(e.to_string()))?;
        tracing::info!("Stored {} known cards", names.len());
        Ok(())
    }
}
