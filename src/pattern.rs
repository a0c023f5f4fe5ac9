//! Rectangular live/dead text patterns
//!
//! A pattern file is one line per row. The live marker (default `*`) marks an
//! alive cell, every other character a dead one. Rows must all have the same
//! length. An empty file, or one whose first line is empty, is an empty
//! pattern rather than an error.

use std::fs;
use std::path::Path;

use crate::error::{LifeError, Result};

/// Default character marking a live cell.
pub const LIVE_MARKER: char = '*';

/// Character written for dead cells when saving.
pub const DEAD_MARKER: char = ' ';

/// Row-major grid of booleans, `width` columns by `height` rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Build from raw cells; `cells.len()` must equal `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(LifeError::RaggedPattern {
                row: cells.len() / width.max(1),
                expected: width * height,
                found: cells.len(),
            });
        }
        if width == 0 || height == 0 {
            return Ok(Self::default());
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a multi-line text pattern.
    pub fn parse(text: &str, live_marker: char) -> Result<Self> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows, live_marker)
    }

    /// Build from individual row strings.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], live_marker: char) -> Result<Self> {
        let rows: Vec<&str> = rows
            .iter()
            .map(|r| r.as_ref().trim_end_matches('\r'))
            .collect();

        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.chars().count(),
            _ => return Ok(Self::default()),
        };

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LifeError::RaggedPattern {
                    row,
                    expected: width,
                    found,
                });
            }
            cells.extend(line.chars().map(|c| c == live_marker));
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Read a pattern file from disk.
    pub fn load(path: impl AsRef<Path>, live_marker: char) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, live_marker)
    }

    /// Write the pattern to disk, one line per row.
    pub fn save(&self, path: impl AsRef<Path>, live_marker: char) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_text(live_marker, DEAD_MARKER))?;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State at `(x, y)`; out-of-range coordinates read as dead.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Coordinates of all live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(move |(i, _)| (i % width, i / width))
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Render as text with a trailing newline after every row.
    pub fn to_text(&self, live_marker: char, dead_marker: char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|&alive| if alive { live_marker } else { dead_marker }));
            out.push('\n');
        }
        out
    }
}
