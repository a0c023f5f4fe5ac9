//! Connected clusters of live cells
//!
//! Breadth-first flood fill over the live cells using the same toroidal
//! Moore adjacency as the state transition, so a colony straddling an edge
//! is one cluster.

use std::collections::VecDeque;

use crate::board::{toroidal_neighbors, Board};

/// One maximal 8-connected group of live cells at a single generation.
///
/// Member order is the order the flood fill reached them; treat it as a set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cluster {
    cells: Vec<(usize, usize)>,
}

impl Cluster {
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.contains(&(x, y))
    }
}

impl From<Vec<(usize, usize)>> for Cluster {
    fn from(cells: Vec<(usize, usize)>) -> Self {
        Self { cells }
    }
}

/// Partition every live cell of `board` into clusters.
///
/// Clusters come out in row-major order of their first discovered cell.
pub fn find_clusters(board: &Board) -> Vec<Cluster> {
    let columns = board.columns();
    let rows = board.rows();
    let mut visited = vec![false; columns * rows];
    let mut clusters = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..rows {
        for x in 0..columns {
            let idx = board.index(x, y);
            if visited[idx] || !board.is_alive(x, y) {
                continue;
            }

            let mut members = Vec::new();
            visited[idx] = true;
            queue.push_back((x, y));

            while let Some((cx, cy)) = queue.pop_front() {
                members.push((cx, cy));
                for (nx, ny) in toroidal_neighbors(cx, cy, columns, rows) {
                    let nidx = board.index(nx, ny);
                    if !visited[nidx] && board.is_alive(nx, ny) {
                        visited[nidx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            clusters.push(Cluster::from(members));
        }
    }

    clusters
}

/// Number of clusters on the board.
pub fn count_clusters(board: &Board) -> usize {
    find_clusters(board).len()
}
