//! Ko history: board states recorded around capturing moves.
//!
//! Every capturing move leaves a record holding the board it destroyed and
//! the board it produced. A move whose result matches any recorded board is
//! a Ko violation. Records are only removed by undo (the newest one) or by
//! clearing the history on reset.

use crate::board::{Point, Snapshot};

/// Board states around one capturing move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KoRecord {
    /// Board before the capturing move was played.
    pub before: Snapshot,
    /// Board after the captured stones were removed.
    pub after: Snapshot,
    /// Where the capturing stone was placed.
    pub played: Point,
    /// The stone that was captured, when exactly one was.
    pub single_capture: Option<Point>,
}

#[derive(Clone, Debug, Default)]
pub struct KoHistory {
    records: Vec<KoRecord>,
}

impl KoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: KoRecord) {
        self.records.push(record);
    }

    /// Remove the newest record (undo of the last capturing move).
    pub fn pop(&mut self) -> Option<KoRecord> {
        self.records.pop()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&KoRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[KoRecord] {
        &self.records
    }

    /// Whether `snapshot` repeats any recorded board. Newest records are
    /// checked first since repetitions are almost always recent.
    pub fn contains(&self, snapshot: &Snapshot) -> bool {
        self.records
            .iter()
            .rev()
            .any(|r| r.before == *snapshot || r.after == *snapshot)
    }

    /// The point where a single stone was just captured. Only a move there
    /// can be an immediate single-stone recapture.
    pub fn recapture_point(&self) -> Option<Point> {
        self.last().and_then(|r| r.single_capture)
    }
}
