//! Per-generation statistics
//!
//! Every generation produces one [`GenerationStats`] row. The tracker keeps
//! the history in memory, optionally appends each row to a CSV file, and
//! prints a summary at the end of the run.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::shape::{ShapeCensus, UNDEFINED};

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub living_cells: usize,
    pub clusters: usize,
    /// Cluster count per shape name (empty when classification is off)
    pub census: ShapeCensus,
}

impl GenerationStats {
    /// Clusters that matched no reference shape
    pub fn undefined(&self) -> usize {
        self.census.get(UNDEFINED).copied().unwrap_or(0)
    }

    /// Census as `name:count` pairs joined with `|`, in name order.
    pub fn census_field(&self) -> String {
        self.census
            .iter()
            .map(|(name, count)| format!("{}:{}", name, count))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Format as CSV row
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.generation,
            self.living_cells,
            self.clusters,
            self.undefined(),
            self.census_field(),
        )
    }

    /// CSV header
    pub fn csv_header() -> &'static str {
        "generation,living_cells,clusters,undefined,shapes"
    }
}

/// Collects statistics and writes them out as the run goes.
pub struct StatsTracker {
    csv_writer: Option<BufWriter<File>>,
    history: Vec<GenerationStats>,
    stagnation_generation: Option<usize>,
}

impl StatsTracker {
    /// Tracker that keeps history in memory only.
    pub fn new() -> Self {
        Self {
            csv_writer: None,
            history: Vec::new(),
            stagnation_generation: None,
        }
    }

    /// Tracker that also writes a CSV file, truncating any existing one.
    pub fn with_csv(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", GenerationStats::csv_header())?;

        Ok(Self {
            csv_writer: Some(writer),
            ..Self::new()
        })
    }

    pub fn record(&mut self, stats: GenerationStats) {
        if let Some(ref mut writer) = self.csv_writer {
            let written = writeln!(writer, "{}", stats.to_csv_row()).and_then(|_| writer.flush());
            if let Err(e) = written {
                warn!("Failed to write stats row, disabling CSV output: {}", e);
                self.csv_writer = None;
            }
        }
        self.history.push(stats);
    }

    pub fn mark_stagnation(&mut self, generation: usize) {
        self.stagnation_generation = Some(generation);
    }

    pub fn stagnation_generation(&self) -> Option<usize> {
        self.stagnation_generation
    }

    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Largest population seen and the generation it occurred in.
    pub fn peak_population(&self) -> Option<(usize, usize)> {
        self.history
            .iter()
            .max_by_key(|s| s.living_cells)
            .map(|s| (s.generation, s.living_cells))
    }

    /// Total clusters per shape name over the whole run
    pub fn shape_totals(&self) -> ShapeCensus {
        let mut totals = ShapeCensus::new();
        for stats in &self.history {
            for (name, count) in &stats.census {
                *totals.entry(name.clone()).or_insert(0) += count;
            }
        }
        totals
    }

    /// Summary text for the end of a run
    pub fn summary(&self) -> String {
        let (first, last) = match (self.history.first(), self.history.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return "No generations recorded\n".to_string(),
        };

        let mut out = String::new();
        out.push_str("+-+-+-+-+-+-+-+-+-+-+-+-+\n");
        out.push_str(&format!(
            "Generations:   {} -> {}\n",
            first.generation, last.generation
        ));
        out.push_str(&format!(
            "Living cells:  {} -> {}\n",
            first.living_cells, last.living_cells
        ));
        if let Some((generation, peak)) = self.peak_population() {
            out.push_str(&format!("Peak:          {} (generation {})\n", peak, generation));
        }
        out.push_str(&format!(
            "Clusters:      {} -> {}\n",
            first.clusters, last.clusters
        ));
        match self.stagnation_generation {
            Some(generation) => {
                out.push_str(&format!("Stagnation:    generation {}\n", generation))
            }
            None => out.push_str("Stagnation:    not reached\n"),
        }
        let totals = self.shape_totals();
        if !totals.is_empty() {
            out.push_str("Shapes seen:\n");
            for (name, count) in &totals {
                out.push_str(&format!("  {:<12} {}\n", name, count));
            }
        }
        out.push_str("+-+-+-+-+-+-+-+-+-+-+-+-+\n");
        out
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(generation: usize, living_cells: usize, census: &[(&str, usize)]) -> GenerationStats {
        GenerationStats {
            generation,
            living_cells,
            clusters: census.iter().map(|(_, c)| c).sum(),
            census: census.iter().map(|(n, c)| (n.to_string(), *c)).collect(),
        }
    }

    #[test]
    fn test_csv_row() {
        let row = stats(7, 13, &[("block", 2), (UNDEFINED, 1), ("beehive", 1)]);
        assert_eq!(row.undefined(), 1);
        assert_eq!(row.to_csv_row(), "7,13,4,1,Undefined:1|beehive:1|block:2");
    }

    #[test]
    fn test_csv_file_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let mut tracker = StatsTracker::with_csv(&path).unwrap();
        tracker.record(stats(0, 4, &[("block", 1)]));
        tracker.record(stats(1, 4, &[("block", 1)]));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], GenerationStats::csv_header());
        assert_eq!(lines[2], "1,4,1,0,block:1");
    }

    #[test]
    fn test_peak_and_totals() {
        let mut tracker = StatsTracker::new();
        tracker.record(stats(0, 10, &[("block", 1), (UNDEFINED, 2)]));
        tracker.record(stats(1, 25, &[(UNDEFINED, 3)]));
        tracker.record(stats(2, 12, &[("block", 2)]));

        assert_eq!(tracker.peak_population(), Some((1, 25)));
        let totals = tracker.shape_totals();
        assert_eq!(totals.get("block"), Some(&3));
        assert_eq!(totals.get(UNDEFINED), Some(&5));
    }

    #[test]
    fn test_summary() {
        let mut tracker = StatsTracker::new();
        assert_eq!(tracker.summary(), "No generations recorded\n");

        tracker.record(stats(0, 4, &[("block", 1)]));
        tracker.mark_stagnation(9);
        let summary = tracker.summary();
        assert!(summary.contains("Stagnation:    generation 9"));
        assert!(summary.contains("block"));
    }
}
