//! Group analysis: connected components of same-color stones and their
//! liberties.
//!
//! All flood fills use an explicit stack and a visited bitmap, so stack
//! usage is bounded by the board area rather than by recursion depth.

use crate::board::{Board, Color, Point};

/// Count the empty orthogonal neighbors of the single stone at `p`,
/// ignoring group membership.
pub fn liberties_of(board: &Board, p: Point) -> usize {
    board.neighbors(p).filter(|&n| board.is_empty_at(n)).count()
}

/// Collect the group containing `start` using flood fill.
///
/// The result holds each member once; its order is traversal order and
/// carries no meaning. Returns an empty group if `start` is empty or off
/// the board.
pub fn find_group(board: &Board, start: Point) -> Vec<Point> {
    let mut visited = vec![false; board.size() * board.size()];
    collect_group(board, start, &mut visited)
}

fn collect_group(board: &Board, start: Point, visited: &mut [bool]) -> Vec<Point> {
    let Some(color) = board.get(start) else {
        return Vec::new();
    };
    let size = board.size();
    let mut group = Vec::new();
    let mut stack = vec![start];
    visited[start.0 * size + start.1] = true;

    while let Some(pt) = stack.pop() {
        group.push(pt);
        for n in board.neighbors(pt) {
            let ni = n.0 * size + n.1;
            if !visited[ni] && board.get(n) == Some(color) {
                visited[ni] = true;
                stack.push(n);
            }
        }
    }
    group
}

/// Count the distinct empty points adjacent to any stone of `group`.
///
/// A liberty shared by several members counts once. This is the
/// authoritative liberty count for the group.
pub fn group_liberties(board: &Board, group: &[Point]) -> usize {
    let size = board.size();
    let mut seen = vec![false; size * size];
    let mut libs = 0;
    for &pt in group {
        for n in board.neighbors(pt) {
            let ni = n.0 * size + n.1;
            if !seen[ni] && board.is_empty_at(n) {
                seen[ni] = true;
                libs += 1;
            }
        }
    }
    libs
}

/// Recompute every group on the board and write its liberty count onto
/// each member stone.
///
/// Must run after every placement and after every capture removal: a
/// capture can free liberties of unrelated groups.
pub fn recompute_all_groups(board: &mut Board) {
    let size = board.size();
    let mut visited = vec![false; size * size];
    for p in board.points() {
        if visited[p.0 * size + p.1] || board.get(p).is_none() {
            continue;
        }
        let group = collect_group(board, p, &mut visited);
        let libs = group_liberties(board, &group) as u16;
        for &member in &group {
            board.set_liberties(member, libs);
        }
    }
}

/// Whether `p` is an empty point whose four neighbors are all stones of
/// `color`. Points on the edge never qualify.
///
/// The search uses this to avoid filling its own eyes; it has no bearing on
/// move legality.
pub fn is_eye_point(board: &Board, p: Point, color: Color) -> bool {
    if !board.is_empty_at(p) || board.is_edge(p) {
        return false;
    }
    board.neighbors(p).all(|n| board.get(n) == Some(color))
}
