//! Line-oriented text protocol for driving a match from a terminal or a GUI.
//!
//! The framing follows GTP: one command per line with an optional numeric id,
//! answered by `=[id] result` on success or `?[id] message` on failure, each
//! followed by a blank line. Lines starting with `#` are ignored.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `clear_board` - Start a new match
//! - `play <color> <vertex>` - Place a stone, e.g. `play black d3`
//! - `legal_moves [color]` - Placeable cells for `color` (default: the mover)
//! - `showboard` - Print the board
//! - `turn` - The player to move
//! - `score` - Current stone counts
//! - `status` - `in progress` or the final result
//!
//! The reply to `play` narrates what happened: the placement, each flip, any
//! pass and, at the end, the result.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};

use crate::board::{PlayerColor, Position};
use crate::game::{GameOutcome, Placement, TurnController};
use crate::observer::GameObserver;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "status",
    "turn",
    "version",
];

/// Observer that turns game events into text lines.
#[derive(Debug, Default)]
pub struct Narrator {
    lines: Vec<String>,
}

impl Narrator {
    /// Take the lines narrated since the last call.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl GameObserver for Narrator {
    fn on_stone_placed(&mut self, pos: Position, color: PlayerColor) {
        self.lines.push(format!("{color} places {pos}"));
    }

    fn on_stone_flipped(&mut self, pos: Position, new_color: PlayerColor) {
        self.lines.push(format!("flip {pos} -> {new_color}"));
    }

    fn on_pass(&mut self, color: PlayerColor) {
        self.lines.push(format!("{color} cannot put stone. TURN SKIPPED"));
    }

    fn on_game_over(&mut self, outcome: &GameOutcome) {
        self.lines.push("GAME FINISHED".to_string());
        self.lines.push(outcome.to_string());
    }
}

/// Protocol engine state.
pub struct ProtocolEngine {
    game: TurnController<Narrator>,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self {
            game: TurnController::with_observer(Narrator::default()),
        }
    }

    pub fn game(&self) -> &TurnController<Narrator> {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (prefix, message) = match self.execute(&command, args) {
                Ok(message) => ('=', message),
                Err(err) => ('?', err.to_string()),
            };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")
                .context("failed to write response")?;
            output.flush().context("failed to flush response")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute one command and return the response text.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().context("missing argument")?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "clear_board" => {
                self.game.start_game();
                self.game.observer_mut().take();
                Ok(String::new())
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    bail!("missing arguments");
                };
                let color: PlayerColor = color.parse()?;
                if vertex.eq_ignore_ascii_case("pass") {
                    bail!("passes are automatic");
                }
                let pos: Position = vertex.parse()?;
                match self.game.request_placement(pos, color)? {
                    Placement::Accepted => Ok(self.game.observer_mut().take().join("\n")),
                    Placement::Rejected(reason) => Err(anyhow!("illegal move: {reason}")),
                }
            }

            "legal_moves" => {
                let color = match args.first() {
                    Some(c) => c.parse::<PlayerColor>()?,
                    None => self.game.current_mover(),
                };
                let moves: Vec<String> = self
                    .game
                    .legal_moves(color)
                    .iter()
                    .map(Position::to_string)
                    .collect();
                Ok(moves.join(" "))
            }

            "showboard" => Ok(format!("\n{}", self.game.board())),

            "turn" => {
                if self.game.is_game_over() {
                    bail!("game is over");
                }
                Ok(self.game.current_mover().to_string())
            }

            "score" => Ok(format!(
                "Black {} White {}",
                self.game.stone_count(PlayerColor::Black),
                self.game.stone_count(PlayerColor::White)
            )),

            "status" => Ok(match self.game.outcome() {
                Some(outcome) => outcome.to_string(),
                None => "in progress".to_string(),
            }),

            _ => Err(anyhow!("unknown command: {command}")),
        }
    }
}
