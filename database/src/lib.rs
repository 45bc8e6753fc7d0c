pub mod config;
pub mod error;
pub mod store;

pub use config::DatabaseConfig;
pub use error::DatabaseError;
pub use store::{GameStore, MemoryGameStore, SqliteGameStore};

/// Opens the configured database and brings its schema up to date.
pub async fn open_store(config: &DatabaseConfig) -> Result<SqliteGameStore, DatabaseError> {
    let pool = config.create_pool().await?;
    let store = SqliteGameStore::new(pool);
    store.run_migrations().await?;
    Ok(store)
}
