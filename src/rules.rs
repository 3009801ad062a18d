//! Move legality and capture resolution.
//!
//! A move is simulated on a copy of the board: place the stone, settle
//! liberties, remove every opposing group left without liberties, settle
//! again, then check the result against the Ko history. Rejected moves
//! leave the caller's board and history untouched.

use crate::board::{Board, Color, Point};
use crate::group::{find_group, liberties_of, recompute_all_groups};
use crate::ko::{KoHistory, KoRecord};

/// Why a move was rejected. All variants are recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Point is off the board
    OutOfBounds,
    /// Point is not empty
    Occupied,
    /// Move leaves its own group without liberties and captures nothing
    Suicide,
    /// Move recreates a board recorded in the Ko history
    KoViolation,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "Illegal move: point is off the board"),
            MoveError::Occupied => write!(f, "Illegal move: point is occupied"),
            MoveError::Suicide => write!(f, "Illegal move: suicide"),
            MoveError::KoViolation => write!(f, "Illegal move: not allowed due to Ko rule"),
        }
    }
}

impl std::error::Error for MoveError {}

/// The result of an accepted move.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// Settled board after captures.
    pub board: Board,
    /// Opposing stones removed by the move.
    pub captured: Vec<Point>,
    /// Ko record to append when the move captured.
    pub record: Option<KoRecord>,
}

/// Try to play `color` at `p`.
///
/// On success the returned board is a fresh settled copy; `board` itself is
/// never modified.
pub fn attempt_move(
    board: &Board,
    p: Point,
    color: Color,
    ko: &KoHistory,
) -> Result<MoveOutcome, MoveError> {
    if !board.contains(p) {
        return Err(MoveError::OutOfBounds);
    }
    if board.get(p).is_some() {
        return Err(MoveError::Occupied);
    }
    if is_immediate_recapture(board, p, color, ko) {
        return Err(MoveError::KoViolation);
    }

    let mut next = board.clone();
    next.set(p, Some(color));
    recompute_all_groups(&mut next);

    let opp = color.opponent();
    let captured: Vec<Point> = next
        .points()
        .filter(|&q| matches!(next.stone(q), Some(s) if s.color == opp && s.liberties == 0))
        .collect();

    let own_libs = next.stone(p).map_or(0, |s| s.liberties);
    if own_libs == 0 && captured.is_empty() {
        return Err(MoveError::Suicide);
    }

    if !captured.is_empty() {
        for &q in &captured {
            next.set(q, None);
        }
        recompute_all_groups(&mut next);
    }

    let snapshot = next.snapshot();
    if ko.contains(&snapshot) {
        return Err(MoveError::KoViolation);
    }

    let record = (!captured.is_empty()).then(|| KoRecord {
        before: board.snapshot(),
        after: snapshot,
        played: p,
        single_capture: (captured.len() == 1).then(|| captured[0]),
    });

    Ok(MoveOutcome {
        board: next,
        captured,
        record,
    })
}

/// Classic Ko shape, checked without simulating: `p` is where the last
/// capture took a single stone, the new stone would have no empty neighbor,
/// and it would take back exactly one lone stone in atari. Rejects when that
/// recreates the board the last capture destroyed.
fn is_immediate_recapture(board: &Board, p: Point, color: Color, ko: &KoHistory) -> bool {
    if ko.recapture_point() != Some(p) || liberties_of(board, p) != 0 {
        return false;
    }
    let Some(record) = ko.last() else {
        return false;
    };
    let opp = color.opponent();
    let mut in_atari = board
        .neighbors(p)
        .filter(|&n| matches!(board.stone(n), Some(s) if s.color == opp && s.liberties == 1));
    let (Some(victim), None) = (in_atari.next(), in_atari.next()) else {
        return false;
    };
    if find_group(board, victim).len() != 1 {
        return false;
    }
    board.snapshot_with(&[(p, Some(color)), (victim, None)]) == record.before
}

/// Whether `color` may play at `p`.
pub fn is_legal(board: &Board, p: Point, color: Color, ko: &KoHistory) -> bool {
    attempt_move(board, p, color, ko).is_ok()
}
