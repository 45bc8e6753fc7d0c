pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryGameStore;
pub use sqlite::SqliteGameStore;
pub use traits::GameStore;
