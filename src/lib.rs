//! Qi-Go: a Go rules engine with a minimax opponent.
//!
//! This crate provides move legality (captures, suicide and Ko), a static
//! position evaluator, and an alpha-beta minimax search with iterative
//! deepening and a transposition cache. A small GTP front end lets the
//! engine play in graphical clients.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, evaluation weights and search defaults
//! - [`board`] - Board storage, colors and snapshots
//! - [`group`] - Group discovery and liberty counting
//! - [`ko`] - Ko snapshot history
//! - [`rules`] - Move resolution: placement, capture, suicide and Ko
//! - [`tt`] - Transposition cache
//! - [`search`] - Evaluation, move ordering and minimax search
//! - [`game`] - Game session with turn order and undo
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use qi_go::board::Color;
//! use qi_go::game::Game;
//! use qi_go::search::SearchConfig;
//!
//! let mut game = Game::new(9, SearchConfig::default()).unwrap();
//!
//! // Play a move
//! game.play((4, 4)).unwrap();
//!
//! // Ask the engine for a reply
//! let reply = game.suggest(Color::White);
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod group;
pub mod gtp;
pub mod ko;
pub mod rules;
pub mod search;
pub mod tt;
