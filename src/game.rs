//! Game session: the board, side to move, Ko history and undo stack for one
//! game, plus the AI used to generate moves.
//!
//! All state lives in the session value, so several independent games can
//! run in one process.

use crate::board::{Board, BoardError, Color, Point, Snapshot};
use crate::ko::KoHistory;
use crate::rules::{MoveError, attempt_move};
use crate::search::{SearchConfig, Searcher, Strategy, random_move, strategic_move};

/// What a turn changed, kept so it can be undone.
#[derive(Clone, Debug)]
struct Turn {
    board: Board,
    to_move: Color,
    last_capture: Option<Point>,
    recorded_ko: bool,
}

/// A move played by [`Game::genmove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Played {
    Stone(Point),
    Pass,
}

pub struct Game {
    board: Board,
    to_move: Color,
    ko: KoHistory,
    turns: Vec<Turn>,
    last_capture: Option<Point>,
    searcher: Searcher,
    strategy: Strategy,
    rng: fastrand::Rng,
}

impl Game {
    /// Start a game on an empty `size` x `size` board with Black to move.
    pub fn new(size: usize, config: SearchConfig) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(size)?,
            to_move: Color::Black,
            ko: KoHistory::new(),
            turns: Vec::new(),
            last_capture: None,
            searcher: Searcher::new(config),
            strategy: Strategy::Minimax,
            rng: fastrand::Rng::new(),
        })
    }

    /// Seed the generator used by the random and strategic selectors.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Whose turn it is.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn ko_history(&self) -> &KoHistory {
        &self.ko
    }

    /// Point of the most recent move if it captured exactly one stone,
    /// cleared by any other move.
    pub fn last_capture(&self) -> Option<Point> {
        self.last_capture
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    /// Number of turns played, passes included.
    pub fn move_count(&self) -> usize {
        self.turns.len()
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Clear the board and all history, keeping size and AI settings.
    pub fn reset(&mut self) {
        self.board.clear();
        self.to_move = Color::Black;
        self.ko.clear();
        self.turns.clear();
        self.last_capture = None;
        self.searcher.clear_cache();
        log::info!("new game on {0}x{0}", self.board.size());
    }

    /// Start over on a board of a different size.
    pub fn resize(&mut self, size: usize) -> Result<(), BoardError> {
        self.board = Board::new(size)?;
        self.reset();
        Ok(())
    }

    /// Play the side to move at `p`.
    pub fn play(&mut self, p: Point) -> Result<Vec<Point>, MoveError> {
        self.play_as(p, self.to_move)
    }

    /// Play `color` at `p` regardless of whose turn it is; the opponent
    /// moves next. Returns the captured stones.
    pub fn play_as(&mut self, p: Point, color: Color) -> Result<Vec<Point>, MoveError> {
        let outcome = attempt_move(&self.board, p, color, &self.ko)?;
        let previous = std::mem::replace(&mut self.board, outcome.board);
        let recorded_ko = outcome.record.is_some();
        self.turns.push(Turn {
            board: previous,
            to_move: self.to_move,
            last_capture: self.last_capture,
            recorded_ko,
        });
        if let Some(record) = outcome.record {
            self.ko.push(record);
        }
        self.last_capture = (outcome.captured.len() == 1).then_some(p);
        self.to_move = color.opponent();
        Ok(outcome.captured)
    }

    /// The side to move passes.
    pub fn pass(&mut self) {
        self.pass_as(self.to_move);
    }

    pub fn pass_as(&mut self, color: Color) {
        self.turns.push(Turn {
            board: self.board.clone(),
            to_move: self.to_move,
            last_capture: self.last_capture,
            recorded_ko: false,
        });
        self.last_capture = None;
        self.to_move = color.opponent();
    }

    /// Take back the last turn. Returns false when nothing has been played.
    pub fn undo(&mut self) -> bool {
        let Some(turn) = self.turns.pop() else {
            return false;
        };
        if turn.recorded_ko {
            self.ko.pop();
        }
        self.board = turn.board;
        self.to_move = turn.to_move;
        self.last_capture = turn.last_capture;
        true
    }

    /// Pick a move for `color` with the configured strategy, without
    /// playing it. Every strategy honors [`SearchConfig::skip_own_eyes`].
    pub fn suggest(&mut self, color: Color) -> Option<Point> {
        match self.strategy {
            Strategy::Minimax => {
                let depth = self.searcher.config().max_depth;
                self.searcher
                    .iterative_deepening(&self.board, &self.ko, color, depth)
            }
            Strategy::Strategic => {
                let skip = self.searcher.config().skip_own_eyes;
                strategic_move(&self.board, color, &self.ko, skip, &mut self.rng)
            }
            Strategy::Random => {
                let skip = self.searcher.config().skip_own_eyes;
                random_move(&self.board, color, &self.ko, skip, &mut self.rng)
            }
        }
    }

    /// Generate and play a move for `color`, passing when none is legal.
    pub fn genmove(&mut self, color: Color) -> Played {
        match self.suggest(color) {
            Some(p) => match self.play_as(p, color) {
                Ok(_) => Played::Stone(p),
                Err(e) => {
                    // Selectors only return legal moves.
                    log::warn!("generated move {p:?} rejected: {e}");
                    self.pass_as(color);
                    Played::Pass
                }
            },
            None => {
                self.pass_as(color);
                Played::Pass
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: usize) -> Game {
        Game::new(size, SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut g = game(5);
        assert_eq!(g.to_move(), Color::Black);
        g.play((2, 2)).unwrap();
        assert_eq!(g.to_move(), Color::White);
        g.pass();
        assert_eq!(g.to_move(), Color::Black);
        assert_eq!(g.move_count(), 2);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut g = game(5);
        g.play((2, 2)).unwrap();
        let before = g.snapshot();
        assert_eq!(g.play((2, 2)), Err(MoveError::Occupied));
        assert_eq!(g.play((5, 0)), Err(MoveError::OutOfBounds));
        assert_eq!(g.snapshot(), before);
        assert_eq!(g.to_move(), Color::White);
        assert_eq!(g.move_count(), 1);
    }

    #[test]
    fn test_undo_restores_board_turn_and_ko() {
        let mut g = game(4);
        // Build a ko shape, then white takes the black stone at (1,2).
        for (p, c) in [
            ((0, 1), Color::Black),
            ((0, 2), Color::White),
            ((1, 0), Color::Black),
            ((1, 3), Color::White),
            ((2, 1), Color::Black),
            ((2, 2), Color::White),
            ((1, 2), Color::Black),
        ] {
            g.play_as(p, c).unwrap();
        }
        let captured = g.play_as((1, 1), Color::White).unwrap();
        assert_eq!(captured, vec![(1, 2)]);
        assert_eq!(g.ko_history().len(), 1);
        assert_eq!(g.last_capture(), Some((1, 1)));

        assert!(g.undo());
        assert!(g.ko_history().is_empty());
        assert_eq!(g.board().get((1, 2)), Some(Color::Black));
        assert_eq!(g.to_move(), Color::White);
        assert_eq!(g.last_capture(), None);
    }

    #[test]
    fn test_undo_on_empty_game() {
        let mut g = game(5);
        assert!(!g.undo());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut g = game(5);
        g.play((1, 1)).unwrap();
        g.reset();
        assert!(g.board().is_empty());
        assert_eq!(g.to_move(), Color::Black);
        assert_eq!(g.move_count(), 0);
        g.resize(9).unwrap();
        assert_eq!(g.size(), 9);
        assert!(g.resize(0).is_err());
        assert_eq!(g.size(), 9);
    }

    #[test]
    fn test_random_strategy_passes_instead_of_filling_eyes() {
        let config = SearchConfig {
            skip_own_eyes: true,
            ..SearchConfig::default()
        };
        let mut g = Game::new(5, config).unwrap().with_seed(5).with_strategy(Strategy::Random);
        // Fill everything except two eyes; either eye is still a legal move.
        let stones: Vec<Point> = g
            .board()
            .points()
            .filter(|&p| p != (1, 1) && p != (3, 3))
            .collect();
        for p in stones {
            g.play_as(p, Color::Black).unwrap();
        }
        assert!(crate::rules::is_legal(g.board(), (1, 1), Color::Black, g.ko_history()));
        assert_eq!(g.suggest(Color::Black), None);
        assert_eq!(g.genmove(Color::Black), Played::Pass);
        assert_eq!(g.board().count(Color::Black), 23);
    }

    #[test]
    fn test_genmove_plays_or_passes() {
        let mut g = game(5).with_seed(3).with_strategy(Strategy::Random);
        assert!(matches!(g.genmove(Color::Black), Played::Stone(_)));
        assert_eq!(g.board().count(Color::Black), 1);

        let mut full = game(3);
        for p in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0), (2, 1)] {
            full.play_as(p, Color::White).unwrap();
        }
        assert_eq!(full.genmove(Color::White), Played::Pass);
        assert_eq!(full.genmove(Color::Black), Played::Stone((2, 2)));
        assert_eq!(full.board().count(Color::White), 0);
    }
}
