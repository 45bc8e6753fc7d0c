pub mod codec;
pub mod error;
pub mod game_record;
pub mod registry;
pub mod stats;

pub use codec::{decode, encode, encode_on, flatten, split_list};
pub use error::{CodecError, RegistryError};
pub use game_record::{Encoded, FlatRecord, GameId, GameRecord, Submission, UnknownCard};
pub use registry::{CardRegistry, STARTER_CARDS};
pub use stats::{aggregate, ranked, PlayerStats, StatsOrder};
