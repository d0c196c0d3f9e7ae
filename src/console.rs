//! Line-oriented console: command parsing and notification printing.

use derive_more::{Display, Error};
use std::time::Duration;
use turnclock_board::{Player, Position};
use turnclock_session::{MoveKind, Notification, Outcome, SessionConfig, SessionObserver, SessionState};

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a game.
    Start,
    /// Click a cell by index.
    Click(usize),
    /// Reset the session.
    Reset,
    /// End the running game.
    End,
    /// Print the board and clock.
    Status,
    /// Print the command list.
    Help,
    /// Leave.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown command '{}' (type 'help')", input)]
pub struct ParseCommandError {
    /// The offending input, trimmed.
    #[error(not(source))]
    pub input: String,
}

impl std::str::FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let lower = line.to_ascii_lowercase();
        let command = match lower.as_str() {
            "start" | "s" => Command::Start,
            "reset" | "r" => Command::Reset,
            "end" | "e" => Command::End,
            "status" | "board" | "b" => Command::Status,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => {
                let target = lower
                    .strip_prefix("click ")
                    .or_else(|| lower.strip_prefix("c "))
                    .unwrap_or(&lower)
                    .trim();
                // Out-of-range numbers go through so the session can reject them.
                if let Ok(index) = target.parse::<usize>() {
                    Command::Click(index)
                } else if let Some(pos) = Position::from_label_or_number(target) {
                    Command::Click(pos.to_index())
                } else {
                    return Err(ParseCommandError {
                        input: line.to_string(),
                    });
                }
            }
        };
        Ok(command)
    }
}

/// Command summary shown by `help`.
pub const HELP: &str = "\
Commands:
  start (s)          start a game from idle
  <0-8> | <label>    place a mark, e.g. '4' or 'center'
  reset (r)          abort or skip back to idle
  end (e)            end the running game
  status (b)         show board and clock
  quit (q)           leave";

/// Formats a duration as `MM:SS`, rounding partial seconds up.
pub fn format_clock(remaining: Duration) -> String {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Prints notifications to stdout as text or JSON lines.
#[derive(Debug, Clone)]
pub struct ConsoleObserver {
    names: [String; 2],
    json: bool,
    last_clock: Option<String>,
}

impl ConsoleObserver {
    /// Observer using the configured player names.
    pub fn new(config: &SessionConfig, json: bool) -> Self {
        Self {
            names: [
                config.player_name(Player::One).to_string(),
                config.player_name(Player::Two).to_string(),
            ],
            json,
            last_clock: None,
        }
    }

    fn name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.names[0],
            Player::Two => &self.names[1],
        }
    }

    /// Text for a notification, or `None` when nothing needs printing.
    pub fn render(&mut self, notification: &Notification) -> Option<String> {
        match notification {
            Notification::StateChanged(state) => Some(match state {
                SessionState::Idle => "== Idle: type 'start' to play ==".to_string(),
                SessionState::Active => "== Game on ==".to_string(),
                SessionState::Finished => "== Finished ==".to_string(),
                SessionState::Initial => return None,
            }),
            Notification::BoardChanged(board) => Some(board.display()),
            Notification::TurnChanged(player) => {
                self.last_clock = None;
                Some(format!("{} ({}) to move", self.name(*player), player.mark()))
            }
            Notification::ClockChanged(remaining) => {
                // Only whole-second changes are worth a line.
                let clock = format_clock(*remaining);
                if self.last_clock.as_deref() == Some(clock.as_str()) {
                    return None;
                }
                self.last_clock = Some(clock.clone());
                Some(format!("Remaining Time: {clock}"))
            }
            Notification::MovePlayed(mv) => {
                let how = match mv.kind {
                    MoveKind::Placed => "",
                    MoveKind::Forfeit => " (time out)",
                    MoveKind::Automated => " (computer)",
                };
                Some(format!(
                    "{} played {}{}",
                    self.name(mv.player),
                    mv.position.label(),
                    how
                ))
            }
            Notification::MoveRejected { index, reason } => {
                Some(format!("Cannot play {index}: {reason}"))
            }
            Notification::GameFinished(outcome) => Some(match outcome {
                Outcome::Win { player, line } => {
                    format!("{} wins! (line {})", self.name(*player), line.id())
                }
                Outcome::Draw => "It's a draw!".to_string(),
                Outcome::Ended => "Game ended.".to_string(),
            }),
        }
    }
}

impl SessionObserver for ConsoleObserver {
    fn notify(&mut self, notification: &Notification) {
        if self.json {
            match serde_json::to_string(notification) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!(error = %e, "Failed to encode notification"),
            }
        } else if let Some(text) = self.render(notification) {
            println!("{text}");
        }
    }
}
