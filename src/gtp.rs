//! Go Text Protocol (GTP) front end.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements the subset of GTP version 2 needed to drive a
//! [`Game`] from graphical interfaces like Sabaki or GoGui, plus a
//! `ko_history` debug command.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identification
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `quit` - Exit the program
//! - `boardsize <size>` - Start over on a `size` x `size` board
//! - `clear_board` - Reset the board to empty
//! - `play <color> <vertex>` - Play a move
//! - `genmove <color>` - Generate and play a move for the given color
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//! - `ko_history` - Print the recorded Ko snapshots
//!
//! ## Example
//!
//! ```ignore
//! use qi_go::gtp::GtpEngine;
//! use qi_go::search::SearchConfig;
//! let game = qi_go::game::Game::new(19, SearchConfig::default())?;
//! GtpEngine::new(game).run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{Color, Point};
use crate::game::{Game, Played};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "ko_history",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// Column letters; GTP skips 'I'.
const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// A parsed GTP vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertex {
    Pass,
    Point(Point),
}

/// Parse a vertex like `D4` or `pass` on a `size` board. Row 1 is the
/// bottom line, which is the last board row.
pub fn parse_vertex(s: &str, size: usize) -> Option<Vertex> {
    if s.eq_ignore_ascii_case("pass") {
        return Some(Vertex::Pass);
    }
    let bytes = s.as_bytes();
    let letter = bytes.first()?.to_ascii_uppercase();
    let col = COLUMNS.iter().position(|&c| c == letter)?;
    let number: usize = s.get(1..)?.parse().ok()?;
    if col >= size || number == 0 || number > size {
        return None;
    }
    Some(Vertex::Point((size - number, col)))
}

/// Format a point as a GTP vertex.
pub fn format_vertex((row, col): Point, size: usize) -> String {
    format!("{}{}", COLUMNS[col] as char, size - row)
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
}

impl GtpEngine {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve commands from `input` until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            if !success {
                log::warn!("{command} {args:?}: {message}");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
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

    /// Execute a GTP command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) => match self.game.resize(size) {
                        Ok(()) => (true, String::new()),
                        Err(e) => (false, format!("unacceptable size: {e}")),
                    },
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = parse_color(args[0]) else {
                    return (false, "invalid color".to_string());
                };
                match parse_vertex(args[1], self.game.size()) {
                    Some(Vertex::Pass) => {
                        self.game.pass_as(color);
                        (true, String::new())
                    }
                    Some(Vertex::Point(p)) => match self.game.play_as(p, color) {
                        Ok(_) => (true, String::new()),
                        Err(e) => (false, e.to_string()),
                    },
                    None => (false, "invalid vertex".to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|a| parse_color(a)) else {
                    return (false, "invalid color".to_string());
                };
                match self.game.genmove(color) {
                    Played::Stone(p) => (true, format_vertex(p, self.game.size())),
                    Played::Pass => (true, "pass".to_string()),
                }
            }

            "undo" => {
                if self.game.undo() {
                    (true, String::new())
                } else {
                    (false, "cannot undo".to_string())
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "ko_history" => {
                let size = self.game.size();
                let lines: Vec<String> = self
                    .game
                    .ko_history()
                    .records()
                    .iter()
                    .map(|r| {
                        let vertex = format_vertex(r.played, size);
                        format!("{vertex} {} -> {}", r.before, r.after)
                    })
                    .collect();
                (true, lines.join("\n"))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
