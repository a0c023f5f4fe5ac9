//! Generation loop: advance, cluster, classify, watch for stagnation.
//!
//! The board is the only mutable state and the simulation is its single
//! writer. Reports are taken between generations, never mid-pass.

use log::debug;

use crate::board::Board;
use crate::cluster::{find_clusters, Cluster};
use crate::error::Result;
use crate::metrics::GenerationStats;
use crate::shape::{ShapeCensus, ShapeClassifier};
use crate::stagnation::{DetectorState, StagnationDetector};

/// Everything observed about one generation.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub stats: GenerationStats,
    pub clusters: Vec<Cluster>,
    /// Set on the generation that completed the first flat population window
    pub stagnated_at: Option<usize>,
}

pub struct Simulation {
    board: Board,
    classifier: ShapeClassifier,
    detector: StagnationDetector,
    generation: usize,
    /// Generation whose population the detector has already seen
    observed: Option<usize>,
    /// Classify clusters in every report
    classify: bool,
}

impl Simulation {
    /// Start at generation 0 with `board` as the initial state.
    pub fn new(
        board: Board,
        classifier: ShapeClassifier,
        stagnation_window: usize,
    ) -> Result<Self> {
        Ok(Self {
            board,
            classifier,
            detector: StagnationDetector::new(stagnation_window)?,
            generation: 0,
            observed: None,
            classify: true,
        })
    }

    /// Turn shape classification on or off. Clusters are always counted.
    pub fn set_classify(&mut self, classify: bool) {
        self.classify = classify;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn classifier(&self) -> &ShapeClassifier {
        &self.classifier
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn state(&self) -> DetectorState {
        self.detector.state()
    }

    pub fn is_stagnated(&self) -> bool {
        self.detector.is_stagnated()
    }

    /// Cluster and classify the current board without touching the detector.
    pub fn analyze(&self) -> GenerationReport {
        let living_cells = self.board.count_living_cells();
        let clusters = find_clusters(&self.board);
        let census = if self.classify {
            self.classifier.census(&clusters)
        } else {
            ShapeCensus::new()
        };

        GenerationReport {
            stats: GenerationStats {
                generation: self.generation,
                living_cells,
                clusters: clusters.len(),
                census,
            },
            clusters,
            stagnated_at: None,
        }
    }

    /// Analyze the current generation and feed its population to the
    /// stagnation detector. Each generation is fed at most once.
    pub fn observe(&mut self) -> GenerationReport {
        let mut report = self.analyze();
        report.stagnated_at = self.feed(report.stats.living_cells);
        report
    }

    fn feed(&mut self, living_cells: usize) -> Option<usize> {
        if self.observed == Some(self.generation) {
            return None;
        }
        self.observed = Some(self.generation);
        self.detector.observe(self.generation, living_cells)
    }

    /// Advance one generation and observe it.
    ///
    /// The current generation is fed to the detector first if nobody observed
    /// it. Returns `None` without touching the board once stagnation has
    /// latched.
    pub fn step(&mut self) -> Option<GenerationReport> {
        if self.observed != Some(self.generation) {
            self.feed(self.board.count_living_cells());
        }
        if self.detector.is_stagnated() {
            return None;
        }
        self.board.advance();
        self.generation += 1;
        let report = self.observe();
        debug!(
            "Generation {}: {} living cells, {} clusters",
            report.stats.generation, report.stats.living_cells, report.stats.clusters
        );
        Some(report)
    }
}
