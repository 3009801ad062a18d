//! Constants for board dimensions, heuristic weights and search parameters.
//!
//! Board size is chosen at runtime (see [`crate::board::Board::new`]); the
//! values here are defaults and the fixed weights the evaluation and move
//! ordering heuristics are tuned with.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard Go sizes are 9, 13, or 19.
pub const DEFAULT_SIZE: usize = 19;

/// Largest board the engine accepts. Keeps `size * size` comfortably inside
/// the `u16` liberty counters.
pub const MAX_SIZE: usize = 25;

/// Orthogonal neighbor offsets as (row, col) deltas: right, down, left, up.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

// =============================================================================
// Snapshot Symbols
// =============================================================================

/// Black stone in a serialized board.
pub const SYMBOL_BLACK: u8 = b'X';

/// White stone in a serialized board.
pub const SYMBOL_WHITE: u8 = b'O';

/// Empty point in a serialized board.
pub const SYMBOL_EMPTY: u8 = b'.';

// =============================================================================
// Static Evaluation Weights
// =============================================================================

/// Bonus for an own stone away from the edge.
pub const EVAL_CENTER_BONUS: i32 = 20;

/// Penalty for an own stone on the first line.
pub const EVAL_EDGE_PENALTY: i32 = 70;

/// Penalty for an own stone on a corner point.
pub const EVAL_CORNER_PENALTY: i32 = 100;

// =============================================================================
// Move Ordering Weights
// =============================================================================

/// Ordering bonus per occupied orthogonal neighbor.
pub const ORDER_NEIGHBOR_BONUS: i32 = 1;

/// Ordering penalty for a first-line (non-corner) point.
pub const ORDER_EDGE_PENALTY: i32 = 10;

/// Ordering penalty for a corner point.
pub const ORDER_CORNER_PENALTY: i32 = 30;

// =============================================================================
// Search Parameters
// =============================================================================

/// Score bound used in place of infinity. Far above any reachable evaluation.
pub const SCORE_INF: i32 = 1_000_000;

/// Default iterative deepening depth.
pub const DEFAULT_DEPTH: u8 = 2;

/// Hard cap on search depth, keeping recursion bounded.
pub const MAX_DEPTH: u8 = 16;

/// Default transposition cache capacity (entries).
pub const DEFAULT_CACHE_CAPACITY: usize = 1 << 20;

/// Inset from each edge for the strategic selector's preferred region.
pub const STRATEGIC_INSET: usize = 3;
