pub mod config;
pub mod error;
pub mod menu;
pub mod render;
pub mod service;

pub use config::TrackerConfig;
pub use error::TrackerError;
pub use menu::{Menu, MenuChoice};
pub use service::{RecordedGame, Tracker};
