//! Toroidal Life board
//!
//! Cells live in a flat row-major `Vec` (`index = y * columns + x`). Each cell
//! is wired once, at construction, to the indices of its eight toroidal
//! Moore neighbors; both axes wrap independently.
//!
//! A generation is two full passes: every cell computes its pending state
//! from the current generation, then every cell commits. Collapsing these
//! into one pass would let a cell see neighbors that already moved on.

use rand::Rng;

use crate::cell::{Cell, NEIGHBOR_COUNT};
use crate::error::{LifeError, Result};
use crate::pattern::Pattern;

/// The eight toroidal neighbors of `(x, y)` on a `columns` x `rows` grid.
///
/// Order: top-left, top, top-right, left, right, bottom-left, bottom,
/// bottom-right.
pub fn toroidal_neighbors(
    x: usize,
    y: usize,
    columns: usize,
    rows: usize,
) -> [(usize, usize); NEIGHBOR_COUNT] {
    let left = (x + columns - 1) % columns;
    let right = (x + 1) % columns;
    let top = (y + rows - 1) % rows;
    let bottom = (y + 1) % rows;

    [
        (left, top),
        (x, top),
        (right, top),
        (left, y),
        (right, y),
        (left, bottom),
        (x, bottom),
        (right, bottom),
    ]
}

#[derive(Debug, Clone)]
pub struct Board {
    columns: usize,
    rows: usize,
    /// Pixel size of one cell; only used to derive the grid dimensions
    cell_size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Build a board from pixel dimensions and seed every cell independently
    /// alive with probability `live_density`.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        cell_size: usize,
        live_density: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let invalid = cell_size == 0
            || width == 0
            || height == 0
            || width % cell_size != 0
            || height % cell_size != 0;
        if invalid {
            return Err(LifeError::InvalidDimensions {
                width,
                height,
                cell_size,
            });
        }
        check_density(live_density)?;

        let mut board = Self::wired(width / cell_size, height / cell_size, cell_size);
        board.seed(live_density, rng);
        Ok(board)
    }

    /// All-dead board of `columns` x `rows` cells.
    pub fn empty(columns: usize, rows: usize) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(LifeError::InvalidDimensions {
                width: columns,
                height: rows,
                cell_size: 1,
            });
        }
        Ok(Self::wired(columns, rows, 1))
    }

    /// Board whose dimensions and states are exactly those of `pattern`.
    ///
    /// An empty pattern gives a single dead cell.
    pub fn from_pattern(pattern: &Pattern) -> Self {
        if pattern.is_empty() {
            return Self::wired(1, 1, 1);
        }
        let mut board = Self::wired(pattern.width(), pattern.height(), 1);
        for (x, y) in pattern.live_cells() {
            board.set_alive(x, y, true);
        }
        board
    }

    /// Dead `columns` x `rows` board with `colony` placed in the middle.
    ///
    /// The colony's top-left corner lands at
    /// `((columns - width) / 2, (rows - height) / 2)`.
    pub fn with_colony(columns: usize, rows: usize, colony: &Pattern) -> Result<Self> {
        if colony.width() > columns || colony.height() > rows {
            return Err(LifeError::PatternTooLarge {
                pattern_width: colony.width(),
                pattern_height: colony.height(),
                columns,
                rows,
            });
        }
        let mut board = Self::empty(columns, rows)?;
        let offset_x = (columns - colony.width()) / 2;
        let offset_y = (rows - colony.height()) / 2;
        for (x, y) in colony.live_cells() {
            board.set_alive(offset_x + x, offset_y + y, true);
        }
        Ok(board)
    }

    /// Allocate cells and wire neighbor indices. Dimensions must be non-zero.
    fn wired(columns: usize, rows: usize, cell_size: usize) -> Self {
        let mut cells = Vec::with_capacity(columns * rows);
        for y in 0..rows {
            for x in 0..columns {
                let neighbors =
                    toroidal_neighbors(x, y, columns, rows).map(|(nx, ny)| ny * columns + nx);
                cells.push(Cell::new(neighbors));
            }
        }
        Self {
            columns,
            rows,
            cell_size,
            cells,
        }
    }

    fn seed<R: Rng + ?Sized>(&mut self, live_density: f64, rng: &mut R) {
        for cell in &mut self.cells {
            cell.set_alive(rng.random_bool(live_density));
        }
    }

    /// Re-seed every cell with the given live density.
    pub fn randomize<R: Rng + ?Sized>(&mut self, live_density: f64, rng: &mut R) -> Result<()> {
        check_density(live_density)?;
        self.seed(live_density, rng);
        Ok(())
    }

    /// Advance one generation.
    pub fn advance(&mut self) {
        // Pass 1: every cell reads the current generation only
        for i in 0..self.cells.len() {
            let live = self.cells[i].count_live_neighbors(&self.cells);
            self.cells[i].determine_next_state(live);
        }
        // Pass 2: commit
        for cell in &mut self.cells {
            cell.commit();
        }
    }

    pub fn count_living_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.columns * self.cell_size
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.rows * self.cell_size
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.columns + x
    }

    /// Alive state at `(column, row)`; coordinates off the board read as dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows && self.cells[self.index(x, y)].is_alive()
    }

    /// Set the state at `(column, row)`; coordinates off the board are ignored.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.columns && y < self.rows {
            let idx = self.index(x, y);
            self.cells[idx].set_alive(alive);
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.set_alive(false);
        }
    }

    /// Read-only view of the cell storage.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Coordinates of all live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i % columns, i / columns))
    }

    /// Snapshot of the current states as a pattern of the same size.
    pub fn to_pattern(&self) -> Pattern {
        let cells = self.cells.iter().map(Cell::is_alive).collect();
        // Dimensions always match the storage length
        Pattern::from_cells(self.columns, self.rows, cells).unwrap_or_default()
    }
}

/// Boards are equal when their dimensions and alive states match.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
            && self.rows == other.rows
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.is_alive() == b.is_alive())
    }
}

impl Eq for Board {}

fn check_density(live_density: f64) -> Result<()> {
    if (0.0..=1.0).contains(&live_density) {
        Ok(())
    } else {
        Err(LifeError::InvalidDensity(live_density))
    }
}
