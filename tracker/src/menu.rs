use std::io::{BufRead, Write};

use database::GameStore;
use types::{split_list, CodecError, Submission};

use crate::{render, Tracker, TrackerError};

const MENU: &str = "
=== Dominion Stats Tracker ===
1. Record New Game
2. View All Games
3. View Player Statistics
4. View Known Kingdom Cards
5. Add Known Kingdom Card
6. Exit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    RecordGame,
    ViewGames,
    ViewStats,
    ViewCards,
    AddCard,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::RecordGame),
            "2" => Some(MenuChoice::ViewGames),
            "3" => Some(MenuChoice::ViewStats),
            "4" => Some(MenuChoice::ViewCards),
            "5" => Some(MenuChoice::AddCard),
            "6" | "q" | "quit" | "exit" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    InputClosed,
}

/// Line-oriented menu loop. Reads choices and answers from `input` and
/// writes prompts and results to `output`.
pub struct Menu<R, W> {
    input: R,
    output: W,
    stats_order: types::StatsOrder,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            stats_order: types::StatsOrder::Name,
        }
    }

    pub fn with_stats_order(mut self, order: types::StatsOrder) -> Self {
        self.stats_order = order;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the user exits or input ends. Errors from a single action
    /// are reported and the menu carries on; only I/O errors end the loop.
    pub async fn run<S: GameStore>(
        &mut self,
        tracker: &mut Tracker<S>,
    ) -> Result<(), TrackerError> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };
            let choice = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting Dominion Stats Tracker. Happy gaming!")?;
                    break;
                }
                Some(choice) => choice,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            match self.dispatch(choice, tracker).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::InputClosed) => break,
                Err(TrackerError::Io(err)) => return Err(TrackerError::Io(err)),
                Err(err) => {
                    log::error!("{choice:?} failed: {err}");
                    writeln!(self.output, "Error: {err}")?;
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    async fn dispatch<S: GameStore>(
        &mut self,
        choice: MenuChoice,
        tracker: &mut Tracker<S>,
    ) -> Result<Flow, TrackerError> {
        match choice {
            MenuChoice::RecordGame => return self.record_game(tracker).await,
            MenuChoice::ViewGames => {
                let games = tracker.games().await?;
                writeln!(self.output, "\n--- All Recorded Dominion Games ---")?;
                writeln!(self.output, "{}", render::games(&games))?;
            }
            MenuChoice::ViewStats => {
                let stats = tracker.player_stats().await?;
                writeln!(self.output, "\n--- Player Statistics ---")?;
                writeln!(
                    self.output,
                    "{}",
                    render::stats_table(&stats, self.stats_order)
                )?;
            }
            MenuChoice::ViewCards => {
                let registry = tracker.known_cards().await?;
                writeln!(self.output, "{}", render::known_cards(&registry))?;
            }
            MenuChoice::AddCard => {
                let Some(name) = self.prompt("Enter the new Kingdom Card name: ")? else {
                    return Ok(Flow::InputClosed);
                };
                tracker.add_card(&name).await?;
                writeln!(self.output, "Added {name} to the known cards.")?;
            }
            MenuChoice::Exit => {}
        }
        Ok(Flow::Continue)
    }

    async fn record_game<S: GameStore>(
        &mut self,
        tracker: &mut Tracker<S>,
    ) -> Result<Flow, TrackerError> {
        writeln!(self.output, "\n--- Record New Dominion Game ---")?;

        let Some(players) = self.prompt("Enter player names (comma-separated): ")? else {
            return Ok(Flow::InputClosed);
        };
        let players = split_list(&players);
        if players.is_empty() {
            return Err(CodecError::NoPlayers.into());
        }

        let Some(winners) = self.prompt("Enter the winner(s) (comma-separated for a tie): ")?
        else {
            return Ok(Flow::InputClosed);
        };

        let mut scores = Vec::with_capacity(players.len());
        for player in &players {
            let Some(score) = self.prompt(&format!("Score for {player} (blank if not kept): "))?
            else {
                return Ok(Flow::InputClosed);
            };
            scores.push((player.clone(), score));
        }

        let Some(kingdom_cards) = self.prompt("Enter Kingdom Cards used (comma-separated): ")?
        else {
            return Ok(Flow::InputClosed);
        };
        let Some(expansions) =
            self.prompt("Enter Expansions used (comma-separated, leave blank if none): ")?
        else {
            return Ok(Flow::InputClosed);
        };
        let Some(notes) = self.prompt("Any additional notes? ")? else {
            return Ok(Flow::InputClosed);
        };

        let submission = Submission {
            players,
            winners,
            scores,
            kingdom_cards,
            expansions,
            notes,
        };
        let recorded = tracker.record_game(&submission).await?;
        for warning in &recorded.warnings {
            writeln!(self.output, "Warning: {warning}")?;
        }
        if let Some(game_id) = recorded.id() {
            writeln!(self.output, "Game {game_id} recorded successfully!")?;
        }
        Ok(Flow::Continue)
    }

    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, TrackerError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use database::MemoryGameStore;

    use super::*;

    async fn run_script(tracker: &mut Tracker<MemoryGameStore>, script: &str) -> String {
        let mut menu = Menu::new(script.as_bytes(), Vec::new());
        menu.run(tracker).await.expect("menu should not fail");
        String::from_utf8(menu.into_output()).unwrap()
    }

    async fn seeded_tracker() -> Tracker<MemoryGameStore> {
        let mut tracker = Tracker::new(MemoryGameStore::new());
        tracker.ensure_seeded().await.unwrap();
        tracker
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::RecordGame));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("quit"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[tokio::test]
    async fn test_record_game_then_view_stats() {
        let mut tracker = seeded_tracker().await;
        let script = "1\nAlice, Bob\nAlice\n30\n25\nVillage, Witch\nBase\nclose game\n3\n6\n";

        let output = run_script(&mut tracker, script).await;

        assert!(output.contains("Score for Bob (blank if not kept): "));
        assert!(output.contains("Warning: Unknown kingdom card 'Witch' was not recorded"));
        assert!(output.contains("Game 1 recorded successfully!"));
        assert!(output.contains("Player: Alice\n  Games Played: 1\n  Wins: 1\n  Win Rate: 100.00%"));
        assert!(output.contains("Player: Bob\n  Games Played: 1\n  Wins: 0\n  Win Rate: 0.00%"));
        assert!(output.ends_with("Exiting Dominion Stats Tracker. Happy gaming!\n"));
        assert_eq!(tracker.games().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_session() {
        let mut tracker = seeded_tracker().await;
        let script = "5\nVillage\n1\nAlice\nAlice\nlots\n\n\n\n2\n6\n";

        let output = run_script(&mut tracker, script).await;

        assert!(output.contains("Error: Card already known: Village"));
        assert!(output.contains("Error: Invalid score for Alice: \"lots\" is not an integer"));
        assert!(output.contains("No games recorded yet."));
        assert!(output.contains("Exiting"));
    }

    #[tokio::test]
    async fn test_empty_player_list_is_rejected_without_further_prompts() {
        let mut tracker = seeded_tracker().await;

        let output = run_script(&mut tracker, "1\n , \n6\n").await;

        assert!(output.contains("Error: At least one player is required"));
        assert!(!output.contains("Enter the winner(s)"));
    }

    #[tokio::test]
    async fn test_input_closed_mid_game_stores_nothing() {
        let mut tracker = seeded_tracker().await;

        let output = run_script(&mut tracker, "9\n1\nAlice\n").await;

        assert!(output.contains("Invalid choice. Please try again."));
        assert!(tracker.games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_list_cards() {
        let mut tracker = Tracker::new(MemoryGameStore::new());

        let output = run_script(&mut tracker, "5\n Platinum \n4\n").await;

        assert!(output.contains("Added Platinum to the known cards."));
        assert!(output.contains("Known Kingdom Cards (1):\n  - Platinum"));
    }
}
