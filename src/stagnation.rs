//! Steady-state detection from total population history.
//!
//! The detector keeps the last `window` population readings. Once the window
//! is full and every reading in it is identical, it latches into
//! [`DetectorState::Stagnated`] and stays there for the rest of the run.

use std::collections::VecDeque;

use log::info;

use crate::error::{LifeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Active,
    /// Population was flat for a full window ending at `generation`
    Stagnated { generation: usize },
}

#[derive(Debug, Clone)]
pub struct StagnationDetector {
    window: usize,
    history: VecDeque<usize>,
    state: DetectorState,
}

impl StagnationDetector {
    /// Create a detector with a window of `window` readings (at least 1).
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(LifeError::config("stagnation window must be at least 1"));
        }
        Ok(Self {
            window,
            history: VecDeque::with_capacity(window + 1),
            state: DetectorState::Active,
        })
    }

    /// Record the population of `generation`.
    ///
    /// Returns `Some(generation)` exactly once: on the reading that completes
    /// the first flat window. After that the detector ignores further input.
    pub fn observe(&mut self, generation: usize, population: usize) -> Option<usize> {
        if self.is_stagnated() {
            return None;
        }

        self.history.push_back(population);
        if self.history.len() > self.window {
            self.history.pop_front();
        }

        if self.history.len() == self.window && self.history.iter().all(|&p| p == population) {
            info!(
                "Stagnation at generation {}: population {} for {} generations",
                generation, population, self.window
            );
            self.state = DetectorState::Stagnated { generation };
            return Some(generation);
        }
        None
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn is_stagnated(&self) -> bool {
        matches!(self.state, DetectorState::Stagnated { .. })
    }

    /// Generation at which stagnation latched, if it has.
    pub fn stagnation_generation(&self) -> Option<usize> {
        match self.state {
            DetectorState::Stagnated { generation } => Some(generation),
            DetectorState::Active => None,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Readings currently in the window, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &usize> {
        self.history.iter()
    }
}
