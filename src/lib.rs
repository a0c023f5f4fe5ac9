//! Conway's Game of Life on a toroidal board, with a census of the
//! connected clusters of live cells by shape.
//!
//! The core is [`board::Board`] (two-phase synchronous update over wired
//! toroidal neighbors), [`cluster::find_clusters`] (flood fill with the same
//! adjacency), [`shape::ShapeClassifier`] (translation-normalized exact
//! matching) and [`stagnation::StagnationDetector`]. [`simulation::Simulation`]
//! strings them together one generation at a time.

pub mod board;
pub mod cell;
pub mod checkpoint;
pub mod cluster;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pattern;
pub mod render;
pub mod shape;
pub mod simulation;
pub mod stagnation;

pub use board::Board;
pub use cell::Cell;
pub use cluster::{find_clusters, Cluster};
pub use config::Config;
pub use error::{LifeError, Result};
pub use pattern::Pattern;
pub use shape::{normalize, NormalizedShape, ShapeCensus, ShapeClassifier, ShapeLibrary, UNDEFINED};
pub use simulation::{GenerationReport, Simulation};
pub use stagnation::{DetectorState, StagnationDetector};
