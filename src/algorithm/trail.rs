//! Trail-based undo log for backtracking
//!
//! Every domain removal and every collapse is recorded as it happens. The
//! search opens a frame (checkpoint) per choice point; rejecting a candidate
//! replays the frame's entries newest first, which restores the grid to the
//! exact state it had when the frame was opened.

use crate::spatial::GridState;

/// A single recorded grid change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailEntry {
    /// A variant was removed from a cell's domain
    Removed {
        /// Linear cell index
        cell: usize,
        /// The variant that was removed
        variant: usize,
    },
    /// A cell was marked collapsed
    Collapsed {
        /// Linear cell index
        cell: usize,
    },
}

/// Stack of grid changes partitioned into choice frames
#[derive(Debug, Default, Clone)]
pub struct Trail {
    entries: Vec<TrailEntry>,
    checkpoints: Vec<usize>,
}

impl Trail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change to the current frame
    pub fn record(&mut self, entry: TrailEntry) {
        self.entries.push(entry);
    }

    /// Open a new frame and return its starting position
    pub fn checkpoint(&mut self) -> usize {
        let checkpoint = self.entries.len();
        self.checkpoints.push(checkpoint);
        checkpoint
    }

    /// Undo every change recorded since the innermost checkpoint
    ///
    /// The frame stays open so the next candidate can record into it.
    /// Returns the number of entries undone.
    pub fn undo_frame(&mut self, grid: &mut GridState) -> usize {
        let mark = self.checkpoints.last().copied().unwrap_or(0);
        let mut undone = 0;
        while self.entries.len() > mark {
            if let Some(entry) = self.entries.pop() {
                grid.revert(entry);
                undone += 1;
            }
        }
        undone
    }

    /// Close the innermost frame, keeping its entries as part of the parent frame
    ///
    /// Returns false if no frame was open.
    pub fn pop_frame(&mut self) -> bool {
        self.checkpoints.pop().is_some()
    }

    /// Undo the innermost frame and close it
    ///
    /// Returns false if no frame was open.
    pub fn rewind(&mut self, grid: &mut GridState) -> bool {
        if self.checkpoints.is_empty() {
            return false;
        }
        self.undo_frame(grid);
        self.pop_frame()
    }

    /// Entries recorded since the innermost checkpoint, oldest first
    pub fn frame_entries(&self) -> &[TrailEntry] {
        let mark = self.checkpoints.last().copied().unwrap_or(0);
        self.entries.get(mark..).unwrap_or(&[])
    }

    /// Total number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of open frames
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }
}
