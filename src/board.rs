//! Board storage: a fixed-size square grid of optional stones.
//!
//! The board owns no rules. Stones carry the liberty count of their group,
//! which [`crate::group::recompute_all_groups`] keeps current after every
//! structural change. Neighbor relationships are computed from coordinates
//! on demand; stones never reference each other.

use std::fmt;
use std::str::FromStr;

use crate::constants::{DIRECTIONS, MAX_SIZE, SYMBOL_BLACK, SYMBOL_EMPTY, SYMBOL_WHITE};
use crate::group::recompute_all_groups;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-byte symbol used in snapshots and board rendering.
    pub fn symbol(self) -> u8 {
        match self {
            Color::Black => SYMBOL_BLACK,
            Color::White => SYMBOL_WHITE,
        }
    }

    fn from_symbol(b: u8) -> Option<Self> {
        match b.to_ascii_uppercase() {
            SYMBOL_BLACK | b'B' => Some(Color::Black),
            SYMBOL_WHITE | b'W' => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// A board coordinate as `(row, col)`, 0-indexed.
pub type Point = (usize, usize);

/// A stone on the board. `liberties` is the liberty count of the whole
/// group the stone belongs to, shared by every member.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stone {
    pub color: Color,
    pub liberties: u16,
}

/// Construction-time failures. These are precondition violations, kept
/// apart from move rejections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A board needs at least one point.
    ZeroSize,
    /// Requested size exceeds the supported maximum.
    TooLarge(usize),
    /// Row `row` has `len` cells instead of the board size.
    NotSquare { row: usize, len: usize },
    /// Unrecognized cell symbol in a textual board.
    BadSymbol(char),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::ZeroSize => write!(f, "board size must be at least 1"),
            BoardError::TooLarge(size) => {
                write!(f, "board size {size} exceeds the maximum of {MAX_SIZE}")
            }
            BoardError::NotSquare { row, len } => {
                write!(f, "row {row} has {len} cells; board must be square")
            }
            BoardError::BadSymbol(c) => write!(f, "unrecognized board symbol {c:?}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Canonical serialization of a board's occupancy: one symbol per cell,
/// rows separated by `/`. Two boards with the same stones produce the same
/// snapshot regardless of how they got there.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The Go board stored as a flat row-major array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Stone>>,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        if size > MAX_SIZE {
            return Err(BoardError::TooLarge(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Build a board from a row matrix. Every row must have as many cells
    /// as there are rows. Liberty counts are computed before returning.
    pub fn from_rows(rows: &[Vec<Option<Color>>]) -> Result<Self, BoardError> {
        let mut board = Board::new(rows.len())?;
        for (r, row) in rows.iter().enumerate() {
            if row.len() != board.size {
                return Err(BoardError::NotSquare {
                    row: r,
                    len: row.len(),
                });
            }
            for (c, &cell) in row.iter().enumerate() {
                board.set((r, c), cell);
            }
        }
        recompute_all_groups(&mut board);
        Ok(board)
    }

    /// Restore a board from a snapshot taken with [`Board::snapshot`].
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, BoardError> {
        snapshot.as_str().parse()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Remove every stone.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    #[inline]
    fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    pub fn contains(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    /// Color of the stone at `p`, or `None` for empty or off-board points.
    pub fn get(&self, p: Point) -> Option<Color> {
        self.stone(p).map(|s| s.color)
    }

    pub fn stone(&self, p: Point) -> Option<Stone> {
        if !self.contains(p) {
            return None;
        }
        self.cells[self.idx(p)]
    }

    pub fn is_empty_at(&self, p: Point) -> bool {
        self.contains(p) && self.cells[self.idx(p)].is_none()
    }

    /// Place or clear a stone without touching liberty counts. Callers must
    /// run [`recompute_all_groups`] before treating the board as settled.
    pub(crate) fn set(&mut self, p: Point, color: Option<Color>) {
        let i = self.idx(p);
        self.cells[i] = color.map(|color| Stone {
            color,
            liberties: 0,
        });
    }

    pub(crate) fn set_liberties(&mut self, p: Point, liberties: u16) {
        let i = self.idx(p);
        if let Some(stone) = self.cells[i].as_mut() {
            stone.liberties = liberties;
        }
    }

    /// The in-bounds orthogonal neighbors of `p`.
    pub fn neighbors(&self, (row, col): Point) -> impl Iterator<Item = Point> + '_ {
        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.contains((r, c)).then_some((r, c))
        })
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let size = self.size;
        (0..size * size).map(move |i| (i / size, i % size))
    }

    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points().filter(|&p| self.is_empty_at(p))
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| matches!(cell, Some(s) if s.color == color))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Whether `p` lies on the first line.
    pub fn is_edge(&self, (row, col): Point) -> bool {
        let last = self.size - 1;
        row == 0 || row == last || col == 0 || col == last
    }

    pub fn is_corner(&self, (row, col): Point) -> bool {
        let last = self.size - 1;
        (row == 0 || row == last) && (col == 0 || col == last)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_with(&[])
    }

    /// Snapshot of this board with some cells replaced, without building the
    /// modified board.
    pub fn snapshot_with(&self, overrides: &[(Point, Option<Color>)]) -> Snapshot {
        let mut bytes: Vec<u8> = Vec::with_capacity(self.size * (self.size + 1));
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.size == 0 {
                bytes.push(b'/');
            }
            bytes.push(cell.map_or(SYMBOL_EMPTY, |stone| stone.color.symbol()));
        }
        for &((row, col), color) in overrides {
            if self.contains((row, col)) {
                bytes[row * (self.size + 1) + col] = color.map_or(SYMBOL_EMPTY, Color::symbol);
            }
        }
        Snapshot(bytes.into_iter().map(char::from).collect())
    }

    /// The same position with every stone's color exchanged.
    pub fn swapped(&self) -> Board {
        let mut out = self.clone();
        for cell in out.cells.iter_mut().flatten() {
            cell.color = cell.color.opponent();
        }
        out
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse rows separated by `/` or newlines. `X`/`B` is black, `O`/`W`
    /// is white, `.`/`+` is empty; spaces are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for line in s.split(['/', '\n']) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(line.len());
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = match ch {
                    '.' | '+' => None,
                    _ => match Color::from_symbol(ch as u8) {
                        Some(color) if ch.is_ascii() => Some(color),
                        _ => return Err(BoardError::BadSymbol(ch)),
                    },
                };
                row.push(cell);
            }
            rows.push(row);
        }
        Board::from_rows(&rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = self
                    .get((row, col))
                    .map_or(SYMBOL_EMPTY, Color::symbol) as char;
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
