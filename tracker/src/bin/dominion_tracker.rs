use std::{error::Error, io, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use database::SqliteGameStore;
use tracker::{render, Menu, Tracker, TrackerConfig};
use types::StatsOrder;

#[derive(Parser, Debug)]
#[command(about = "Record Dominion games and track player statistics")]
struct Params {
    /// Database file; overrides DATABASE_URL and the config file
    #[arg(short, long)]
    database: Option<String>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (the default)
    Menu {
        #[arg(long, value_enum, default_value_t = SortBy::Name)]
        sort: SortBy,
    },
    /// List every recorded game
    Games {
        #[arg(long)]
        json: bool,
    },
    /// Show per-player statistics
    Stats {
        #[arg(long)]
        json: bool,
        #[arg(long, value_enum, default_value_t = SortBy::Name)]
        sort: SortBy,
    },
    /// List the known Kingdom Cards
    Cards,
    /// Add a Kingdom Card to the known cards
    AddCard { name: String },
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum SortBy {
    Name,
    WinRate,
}

impl From<SortBy> for StatsOrder {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Name => StatsOrder::Name,
            SortBy::WinRate => StatsOrder::WinRate,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    let database_config = config.database_config(args.database);
    log::info!("Using database {}", database_config.url);

    let store = database::open_store(&database_config).await?;
    let mut tracker = Tracker::new(store);
    tracker.ensure_seeded().await?;

    let result = run(&mut tracker, args.command).await;
    tracker.into_store().close().await;
    result
}

async fn run(
    tracker: &mut Tracker<SqliteGameStore>,
    command: Option<Command>,
) -> Result<(), Box<dyn Error>> {
    match command.unwrap_or(Command::Menu { sort: SortBy::Name }) {
        Command::Menu { sort } => {
            let mut menu =
                Menu::new(io::stdin().lock(), io::stdout()).with_stats_order(sort.into());
            menu.run(tracker).await?;
        }
        Command::Games { json } => {
            let games = tracker.games().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&games)?);
            } else {
                println!("{}", render::games(&games));
            }
        }
        Command::Stats { json, sort } => {
            let stats = tracker.player_stats().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", render::stats_table(&stats, sort.into()));
            }
        }
        Command::Cards => {
            let registry = tracker.known_cards().await?;
            println!("{}", render::known_cards(&registry));
        }
        Command::AddCard { name } => {
            let name = name.trim();
            tracker.add_card(name).await?;
            println!("Added {name} to the known cards.");
        }
    }
    Ok(())
}
