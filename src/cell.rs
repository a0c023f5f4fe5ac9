//! Single cell of the board and the B3/S23 transition rule.
//!
//! A cell never owns its neighbors: it stores the flat indices of the eight
//! Moore-neighborhood cells inside the board's storage. The board wires those
//! indices once at construction and they never change afterwards.

/// Number of neighbors in a Moore neighborhood.
pub const NEIGHBOR_COUNT: usize = 8;

/// Standard Life rule: survive on 2 or 3, born on exactly 3.
#[inline]
pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    alive: bool,
    /// Write buffer for the next generation
    pending_alive: bool,
    neighbors: [usize; NEIGHBOR_COUNT],
}

impl Cell {
    /// Create a dead cell wired to the given neighbor indices.
    pub(crate) fn new(neighbors: [usize; NEIGHBOR_COUNT]) -> Self {
        Self {
            alive: false,
            pending_alive: false,
            neighbors,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Flat indices of the eight neighbors, in row-major order around the cell.
    pub fn neighbors(&self) -> &[usize; NEIGHBOR_COUNT] {
        &self.neighbors
    }

    /// Count alive neighbors by looking them up in the owning cell storage.
    pub fn count_live_neighbors(&self, cells: &[Cell]) -> usize {
        self.neighbors
            .iter()
            .filter(|&&idx| cells[idx].alive)
            .count()
    }

    /// Compute the pending state from a live neighbor count.
    ///
    /// Only the pending flag is written, so every cell of a board can be
    /// evaluated against the same generation before any of them commits.
    pub fn determine_next_state(&mut self, live_neighbors: usize) {
        self.pending_alive = next_state(self.alive, live_neighbors);
    }

    /// Copy the pending state into the current state.
    pub fn commit(&mut self) {
        self.alive = self.pending_alive;
    }
}
