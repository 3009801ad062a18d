//! Move search: minimax with alpha-beta pruning, iterative deepening and a
//! transposition cache.
//!
//! The search is synchronous and single-threaded. Each [`Searcher`] owns its
//! own cache, so independent games or concurrent searches never share
//! mutable state; [`spawn_search`] runs one on a worker thread and hands the
//! result back over a channel.
//!
//! Children are generated with the real move resolver, so captures are
//! removed and suicide/Ko moves never enter the tree. The Ko history passed
//! in is treated as fixed for the duration of a search.

use std::str::FromStr;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::board::{Board, Color, Point};
use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_DEPTH, EVAL_CENTER_BONUS, EVAL_CORNER_PENALTY,
    EVAL_EDGE_PENALTY, MAX_DEPTH, ORDER_CORNER_PENALTY, ORDER_EDGE_PENALTY,
    ORDER_NEIGHBOR_BONUS, SCORE_INF, STRATEGIC_INSET,
};
use crate::group::is_eye_point;
use crate::ko::KoHistory;
use crate::rules::{attempt_move, is_legal};
use crate::tt::{Bound, CacheEntry, CacheKey, TranspositionTable};

/// Search parameters.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Deepest iteration of iterative deepening, in plies.
    pub max_depth: u8,
    /// Stop starting (or finishing) deeper iterations after this long.
    pub time_limit: Option<Duration>,
    /// Maximum number of transposition cache entries.
    pub cache_capacity: usize,
    /// Never fill a point surrounded by our own stones.
    pub skip_own_eyes: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            time_limit: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            skip_own_eyes: false,
        }
    }
}

/// Move selector tiers, from strongest to cheapest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Minimax,
    Strategic,
    Random,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(Strategy::Minimax),
            "strategic" => Ok(Strategy::Strategic),
            "random" => Ok(Strategy::Random),
            other => Err(format!(
                "unknown strategy {other:?} (expected minimax, strategic or random)"
            )),
        }
    }
}

/// Counters for the most recent search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub depth_reached: u8,
}

// =============================================================================
// Move generation and heuristics
// =============================================================================

/// Every empty point where `color` may legally play, in row-major order.
pub fn legal_moves(board: &Board, color: Color, ko: &KoHistory) -> Vec<Point> {
    board
        .empty_points()
        .filter(|&p| is_legal(board, p, color, ko))
        .collect()
}

/// Empty points the AI is willing to try, optionally leaving its own eyes
/// alone. Legality is not checked.
fn candidates(
    board: &Board,
    color: Color,
    skip_own_eyes: bool,
) -> impl Iterator<Item = Point> + '_ {
    board
        .empty_points()
        .filter(move |&p| !(skip_own_eyes && is_eye_point(board, p, color)))
}

/// Legal moves for `color`, minus its own eyes when `skip_own_eyes` is set.
pub fn playable_moves(
    board: &Board,
    color: Color,
    ko: &KoHistory,
    skip_own_eyes: bool,
) -> Vec<Point> {
    candidates(board, color, skip_own_eyes)
        .filter(|&p| is_legal(board, p, color, ko))
        .collect()
}

fn order_score(board: &Board, p: Point) -> i32 {
    let contacts = board.neighbors(p).filter(|&n| board.get(n).is_some()).count() as i32;
    let mut score = contacts * ORDER_NEIGHBOR_BONUS;
    if board.is_corner(p) {
        score -= ORDER_CORNER_PENALTY;
    } else if board.is_edge(p) {
        score -= ORDER_EDGE_PENALTY;
    }
    score
}

/// Rank moves for search: contact with existing stones first, first-line
/// points later and corners last. Equal scores keep row-major order, so the
/// result is fully deterministic.
pub fn order_moves(mut moves: Vec<Point>, board: &Board) -> Vec<Point> {
    moves.sort_by(|&a, &b| {
        order_score(board, b)
            .cmp(&order_score(board, a))
            .then(a.cmp(&b))
    });
    moves
}

/// Static evaluation from `color`'s point of view.
///
/// Every stone contributes its group's liberty count, positively for
/// `color` and negatively for the opponent. Own stones also get a
/// positional term: a bonus away from the edge, a penalty on the first
/// line and a heavier one in the corners.
pub fn evaluate(board: &Board, color: Color) -> i32 {
    let mut score = 0;
    for p in board.points() {
        let Some(stone) = board.stone(p) else {
            continue;
        };
        let libs = stone.liberties as i32;
        if stone.color == color {
            score += libs;
            score += if board.is_corner(p) {
                -EVAL_CORNER_PENALTY
            } else if board.is_edge(p) {
                -EVAL_EDGE_PENALTY
            } else {
                EVAL_CENTER_BONUS
            };
        } else {
            score -= libs;
        }
    }
    score
}

/// Uniformly random pick among [`playable_moves`].
pub fn random_move(
    board: &Board,
    color: Color,
    ko: &KoHistory,
    skip_own_eyes: bool,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    let moves = playable_moves(board, color, ko, skip_own_eyes);
    pick(&moves, rng)
}

/// Random pick among [`playable_moves`], preferring points at least
/// [`STRATEGIC_INSET`] lines from every edge. Falls back to any of them
/// when the interior is full.
pub fn strategic_move(
    board: &Board,
    color: Color,
    ko: &KoHistory,
    skip_own_eyes: bool,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    let moves = playable_moves(board, color, ko, skip_own_eyes);
    let size = board.size();
    let interior: Vec<Point> = moves
        .iter()
        .copied()
        .filter(|&(r, c)| {
            r >= STRATEGIC_INSET
                && c >= STRATEGIC_INSET
                && r + STRATEGIC_INSET < size
                && c + STRATEGIC_INSET < size
        })
        .collect();
    pick(&interior, rng).or_else(|| pick(&moves, rng))
}

fn pick(moves: &[Point], rng: &mut fastrand::Rng) -> Option<Point> {
    if moves.is_empty() {
        None
    } else {
        Some(moves[rng.usize(..moves.len())])
    }
}

// =============================================================================
// Minimax search
// =============================================================================

enum RootResult {
    Found(Point, i32),
    NoMoves,
    Aborted,
}

/// Alpha-beta searcher with its own transposition cache.
///
/// The cache persists across calls for the searcher's lifetime, capped at
/// [`SearchConfig::cache_capacity`] entries.
pub struct Searcher {
    config: SearchConfig,
    tt: TranspositionTable,
    stats: SearchStats,
    deadline: Option<Instant>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        let tt = TranspositionTable::with_capacity(config.cache_capacity);
        Self {
            config,
            tt,
            stats: SearchStats::default(),
            deadline: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn cache(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn clear_cache(&mut self) {
        self.tt.clear();
    }

    /// Candidate points for `to_move` in search order. Each is resolved
    /// only when the search reaches it, so a cutoff skips the rest.
    fn ordered_candidates(&self, board: &Board, to_move: Color) -> Vec<Point> {
        let moves = candidates(board, to_move, self.config.skip_own_eyes).collect();
        order_moves(moves, board)
    }

    /// Alpha-beta minimax value of `board` from `color`'s point of view.
    ///
    /// `color` moves when `maximizing` is true, its opponent otherwise.
    /// Returns the static evaluation at depth 0 or when the side to move has
    /// no legal move.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &mut self,
        board: &Board,
        ko: &KoHistory,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        color: Color,
    ) -> i32 {
        let depth = depth.min(MAX_DEPTH);
        let to_move = if maximizing { color } else { color.opponent() };
        let key = CacheKey {
            snapshot: board.snapshot(),
            to_move,
            perspective: color,
        };
        if let Some(score) = self.tt.probe(&key, depth, alpha, beta) {
            self.stats.cache_hits += 1;
            return score;
        }
        self.stats.nodes += 1;

        let moves = if depth == 0 {
            Vec::new()
        } else {
            self.ordered_candidates(board, to_move)
        };

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut value = if maximizing { -SCORE_INF } else { SCORE_INF };
        let mut searched = 0;
        for p in moves {
            let Ok(outcome) = attempt_move(board, p, to_move, ko) else {
                continue;
            };
            searched += 1;
            let child = outcome.board;
            let score = self.minimax(&child, ko, depth - 1, alpha, beta, !maximizing, color);
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        if searched == 0 {
            let score = evaluate(board, color);
            // A position without moves scores the same at any depth.
            let stored_depth = if depth == 0 { 0 } else { MAX_DEPTH };
            self.tt.store(
                key,
                CacheEntry {
                    depth: stored_depth,
                    score,
                    bound: Bound::Exact,
                },
            );
            return score;
        }

        let bound = if value <= alpha_orig {
            Bound::Upper
        } else if value >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(
            key,
            CacheEntry {
                depth,
                score: value,
                bound,
            },
        );
        value
    }

    fn search_root(
        &mut self,
        board: &Board,
        ko: &KoHistory,
        color: Color,
        depth: u8,
        may_abort: bool,
    ) -> RootResult {
        let remaining = depth.saturating_sub(1);
        let mut best: Option<(Point, i32)> = None;

        for mv in self.ordered_candidates(board, color) {
            if may_abort && self.time_is_up() {
                return RootResult::Aborted;
            }
            let Ok(outcome) = attempt_move(board, mv, color, ko) else {
                continue;
            };
            let alpha = best.map_or(-SCORE_INF, |(_, v)| v);
            let child = outcome.board;
            let value = self.minimax(&child, ko, remaining, alpha, SCORE_INF, false, color);
            if best.is_none_or(|(_, v)| value > v) {
                best = Some((mv, value));
            }
        }

        match best {
            Some((mv, value)) => RootResult::Found(mv, value),
            None => RootResult::NoMoves,
        }
    }

    /// Best move for `color` searching `depth` plies.
    ///
    /// Each legal move is scored by minimax on its resulting board for the
    /// remaining `depth - 1` plies; depth 0 scores the same way as depth 1,
    /// by static evaluation one ply ahead. The first move with the maximal
    /// score in [`order_moves`] order wins. Returns `None` when `color` has
    /// no legal move.
    pub fn best_move(
        &mut self,
        board: &Board,
        ko: &KoHistory,
        color: Color,
        depth: u8,
    ) -> Option<Point> {
        self.stats = SearchStats::default();
        match self.search_root(board, ko, color, depth, false) {
            RootResult::Found(mv, _) => {
                self.stats.depth_reached = depth;
                Some(mv)
            }
            RootResult::NoMoves | RootResult::Aborted => None,
        }
    }

    /// Run [`Searcher::best_move`] for depths `1..=max_depth` and return the
    /// deepest result.
    ///
    /// With a time limit configured, iterations after the first stop once the
    /// deadline passes and the last completed result is returned.
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        ko: &KoHistory,
        color: Color,
        max_depth: u8,
    ) -> Option<Point> {
        let start = Instant::now();
        self.deadline = self.config.time_limit.map(|limit| start + limit);
        self.stats = SearchStats::default();

        let mut best = None;
        for depth in 1..=max_depth.clamp(1, MAX_DEPTH) {
            if depth > 1 && self.time_is_up() {
                break;
            }
            match self.search_root(board, ko, color, depth, depth > 1) {
                RootResult::Found(mv, score) => {
                    best = Some(mv);
                    self.stats.depth_reached = depth;
                    log::debug!(
                        "depth {depth}: best {mv:?} score {score} nodes {} cache hits {} \
                         (hit rate {:.2}) ({} ms)",
                        self.stats.nodes,
                        self.stats.cache_hits,
                        self.tt.hit_rate(),
                        start.elapsed().as_millis()
                    );
                }
                RootResult::NoMoves => {
                    log::debug!("depth {depth}: no legal move for {color}");
                    break;
                }
                RootResult::Aborted => {
                    log::debug!("depth {depth}: out of time, keeping depth {}", depth - 1);
                    break;
                }
            }
        }
        self.deadline = None;
        best
    }

    fn time_is_up(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Run an iterative deepening search on a worker thread with a fresh cache.
///
/// The receiver yields exactly one result. Dropping it abandons the search;
/// the worker finishes on its own and its send is ignored.
pub fn spawn_search(
    board: Board,
    ko: KoHistory,
    color: Color,
    config: SearchConfig,
) -> mpsc::Receiver<Option<Point>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let max_depth = config.max_depth;
        let mut searcher = Searcher::new(config);
        let mv = searcher.iterative_deepening(&board, &ko, color, max_depth);
        let _ = tx.send(mv);
    });
    rx
}
