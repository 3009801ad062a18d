//! Integration tests for qi-go
//!
//! These exercise the public API end to end: rules through a game session,
//! the search on small positions, and a scripted GTP session.

use qi_go::board::{Board, Color};
use qi_go::game::{Game, Played};
use qi_go::group::{find_group, liberties_of};
use qi_go::gtp::GtpEngine;
use qi_go::ko::KoHistory;
use qi_go::rules::{MoveError, attempt_move};
use qi_go::search::{SearchConfig, Searcher, Strategy, evaluate, spawn_search};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

fn game(size: usize) -> Game {
    Game::new(size, SearchConfig::default()).unwrap()
}

/// Play `(point, color)` pairs in order, ignoring whose turn it is.
fn play_all(game: &mut Game, moves: &[((usize, usize), Color)]) {
    for &(p, c) in moves {
        game.play_as(p, c).unwrap();
    }
}

// =============================================================================
// Liberties and captures
// =============================================================================

#[test]
fn test_single_stone_liberties() {
    let b = board("X...X/...../..X../...../....X");
    assert_eq!(liberties_of(&b, (2, 2)), 4);
    assert_eq!(liberties_of(&b, (0, 4)), 2);
    assert_eq!(liberties_of(&b, (4, 4)), 2);

    let edge = board("..X../...../...../...../.....");
    assert_eq!(liberties_of(&edge, (0, 2)), 3);
}

#[test]
fn test_capture_removes_only_dead_group() {
    let b = board(
        ".X.../\
         XO.../\
         .X.../\
         ...O./\
         ....X",
    );
    let out = attempt_move(&b, (1, 2), Color::Black, &KoHistory::new()).unwrap();
    assert_eq!(out.captured, vec![(1, 1)]);
    assert_eq!(out.board.get((1, 1)), None);
    assert_eq!(out.board.get((3, 3)), Some(Color::White));
    assert_eq!(out.board.get((4, 4)), Some(Color::Black));
    assert_eq!(out.board.count(Color::White), 1);
}

#[test]
fn test_capture_of_a_larger_group() {
    let b = board(
        ".XX../\
         XOO../\
         .XX../\
         ...../\
         .....",
    );
    assert_eq!(find_group(&b, (1, 1)).len(), 2);
    assert_eq!(liberties_of(&b, (1, 2)), 1);
    let out = attempt_move(&b, (1, 3), Color::Black, &KoHistory::new()).unwrap();
    assert_eq!(out.captured.len(), 2);
    assert_eq!(out.board.count(Color::White), 0);
}

#[test]
fn test_suicide_is_rejected() {
    let b = board(".X./X../...");
    let before = b.clone();
    assert_eq!(
        attempt_move(&b, (0, 0), Color::White, &KoHistory::new()).unwrap_err(),
        MoveError::Suicide
    );
    assert_eq!(b, before);
}

// =============================================================================
// Ko through a game session
// =============================================================================

fn ko_game() -> Game {
    let mut g = game(4);
    play_all(
        &mut g,
        &[
            ((0, 1), Color::Black),
            ((0, 2), Color::White),
            ((1, 0), Color::Black),
            ((1, 3), Color::White),
            ((2, 1), Color::Black),
            ((2, 2), Color::White),
            ((1, 2), Color::Black),
        ],
    );
    assert_eq!(g.play_as((1, 1), Color::White).unwrap(), vec![(1, 2)]);
    g
}

#[test]
fn test_immediate_recapture_is_ko() {
    let mut g = ko_game();
    let before = g.snapshot();
    assert_eq!(g.play_as((1, 2), Color::Black), Err(MoveError::KoViolation));
    assert_eq!(g.snapshot(), before);
    assert_eq!(g.to_move(), Color::Black);
}

#[test]
fn test_recapture_allowed_after_exchange_elsewhere() {
    let mut g = ko_game();
    g.play_as((3, 3), Color::Black).unwrap();
    g.play_as((3, 0), Color::White).unwrap();
    assert_eq!(g.play_as((1, 2), Color::Black).unwrap(), vec![(1, 1)]);
    assert_eq!(g.ko_history().len(), 2);
}

// =============================================================================
// Evaluation and search
// =============================================================================

#[test]
fn test_evaluation_is_antisymmetric() {
    let b = board(
        "X.O../\
         XXO../\
         ..O.X/\
         .O.../\
         ....X",
    );
    let swapped = b.swapped();
    assert_eq!(evaluate(&b, Color::Black), evaluate(&swapped, Color::White));
    assert_eq!(evaluate(&b, Color::White), evaluate(&swapped, Color::Black));
}

#[test]
fn test_search_finds_the_only_move() {
    let b = board("OOO/OOO/OO.");
    let ko = KoHistory::new();
    let mut searcher = Searcher::default();
    for depth in 1..=3 {
        assert_eq!(searcher.best_move(&b, &ko, Color::Black, depth), Some((2, 2)));
    }
    assert_eq!(searcher.iterative_deepening(&b, &ko, Color::White, 3), None);
}

#[test]
fn test_concurrent_searches_are_independent() {
    let spawn = |color| {
        spawn_search(board("OOO/OOO/OO."), KoHistory::new(), color, SearchConfig::default())
    };
    let a = spawn(Color::Black);
    let b = spawn(Color::White);
    assert_eq!(a.recv().unwrap(), Some((2, 2)));
    assert_eq!(b.recv().unwrap(), None);
}

// =============================================================================
// Full game scenarios
// =============================================================================

#[test]
fn test_surrounded_stone_is_captured() {
    let mut g = game(5);
    g.play((2, 2)).unwrap();
    for p in [(1, 2), (2, 1), (2, 3)] {
        g.play(p).unwrap();
        g.pass();
    }
    assert_eq!(g.play((3, 2)).unwrap(), vec![(2, 2)]);
    assert_eq!(g.board().count(Color::Black), 0);
    assert_eq!(g.board().count(Color::White), 4);
    assert_eq!(g.last_capture(), Some((3, 2)));

    assert!(g.undo());
    assert_eq!(g.board().get((2, 2)), Some(Color::Black));
    assert!(g.ko_history().is_empty());
}

#[test]
fn test_engine_plays_a_short_game() {
    let mut g = game(9).with_seed(11).with_strategy(Strategy::Strategic);
    for _ in 0..6 {
        let color = g.to_move();
        assert!(matches!(g.genmove(color), Played::Stone(_)));
    }
    assert_eq!(g.move_count(), 6);
    assert_eq!(g.board().count(Color::Black) + g.board().count(Color::White), 6);
}

#[test]
fn test_gtp_session() {
    let mut engine = GtpEngine::new(game(19));
    let script = "\
        1 boardsize 5\n\
        2 clear_board\n\
        3 play black C3\n\
        4 play white C4\n\
        5 play white B3\n\
        6 play white D3\n\
        7 play white C2\n\
        8 showboard\n\
        9 genmove b\n\
        quit\n";
    let mut out = Vec::new();
    engine.serve(script.as_bytes(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    for id in 1..=9 {
        assert!(text.contains(&format!("={id}")), "command {id} failed:\n{text}");
    }
    assert_eq!(engine.game().board().count(Color::White), 4);
    assert_eq!(engine.game().board().count(Color::Black), 1);
}
