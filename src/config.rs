//! Run configuration, loaded from YAML.
//!
//! Every section has defaults, so a config file only needs the keys it
//! changes. `--generate-config` writes the full default set.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};
use crate::pattern::LIVE_MARKER;
use crate::shape::ShapeLibrary;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Board geometry and random seeding
    pub board: BoardConfig,
    /// Generation loop settings
    pub simulation: SimulationConfig,
    /// Pattern format and reference shapes
    pub patterns: PatternConfig,
    /// Rendering, persistence and statistics
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Board width in pixels
    pub width: usize,
    /// Board height in pixels
    pub height: usize,
    /// Pixels per cell; width and height must be multiples of it
    pub cell_size: usize,
    /// Probability that a cell starts alive (0.0 to 1.0)
    pub live_density: f64,
    /// RNG seed for the initial board (absent = fresh entropy each run)
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Stop after this many generations (0 = run until stopped)
    pub max_generations: usize,
    /// Pause between generations in milliseconds
    pub generation_delay_ms: u64,
    /// Number of equal population readings that count as stagnation
    pub stagnation_window: usize,
    /// Classify cluster shapes every generation (clusters are always counted)
    pub classify_shapes: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Character marking a live cell in pattern and board files
    pub live_marker: char,
    /// Directory holding `<name>.txt` reference shapes (empty or missing = bundled set)
    pub shapes_dir: String,
    /// Reference shape names, in classification order
    pub shape_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print every generation to the terminal
    pub render_terminal: bool,
    /// Board state file read on startup and written on a save request
    pub board_state_file: String,
    /// Save a board snapshot every N generations (0 = disabled)
    pub checkpoint_interval: usize,
    /// Directory for periodic snapshots
    pub checkpoint_dir: String,
    /// CSV file for per-generation statistics (empty = disabled)
    pub stats_file: String,
    /// Save a PNG frame every N generations (0 = disabled)
    pub frame_interval: usize,
    /// Directory for PNG frames
    pub frames_dir: String,
    /// Pixels per cell in PNG frames
    pub frame_scale: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 20,
            cell_size: 1,
            live_density: 0.5,
            seed: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_generations: 0,
            generation_delay_ms: 1000,
            stagnation_window: 10,
            classify_shapes: true,
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            live_marker: LIVE_MARKER,
            shapes_dir: "shapes".to_string(),
            shape_names: ShapeLibrary::standard_names(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            render_terminal: true,
            board_state_file: "BoardCondition.txt".to_string(),
            checkpoint_interval: 0,
            checkpoint_dir: "checkpoints".to_string(),
            stats_file: String::new(),
            frame_interval: 0,
            frames_dir: "frames".to_string(),
            frame_scale: 4,
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to a YAML file
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Write the default configuration as a starting point
    pub fn write_template(path: impl AsRef<Path>) -> Result<()> {
        Config::default().to_yaml(path)
    }

    /// Reference shapes for classification.
    ///
    /// Reads `shapes_dir` when it names an existing directory, otherwise
    /// falls back to the bundled shapes.
    pub fn shape_library(&self) -> ShapeLibrary {
        let dir = Path::new(&self.patterns.shapes_dir);
        if self.patterns.shapes_dir.is_empty() || !dir.is_dir() {
            info!("Using bundled reference shapes");
            return ShapeLibrary::standard();
        }
        ShapeLibrary::load_dir(dir, &self.patterns.shape_names, self.patterns.live_marker)
    }

    /// Board size in cells.
    pub fn columns_rows(&self) -> (usize, usize) {
        let cell_size = self.board.cell_size.max(1);
        (self.board.width / cell_size, self.board.height / cell_size)
    }

    /// Check the configuration. Fatal problems are errors, the rest are
    /// returned as warnings.
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut warnings = Vec::new();
        let board = &self.board;

        if board.cell_size == 0 {
            return Err(LifeError::config("cell_size must be non-zero"));
        }
        if board.width == 0 || board.height == 0 {
            return Err(LifeError::config("board dimensions must be non-zero"));
        }
        if board.width % board.cell_size != 0 || board.height % board.cell_size != 0 {
            return Err(LifeError::config(format!(
                "board {}x{} px is not a multiple of cell_size {}",
                board.width, board.height, board.cell_size
            )));
        }
        if !(0.0..=1.0).contains(&board.live_density) {
            return Err(LifeError::config(format!(
                "live_density {} must be within [0, 1]",
                board.live_density
            )));
        }
        if self.simulation.stagnation_window == 0 {
            return Err(LifeError::config("stagnation_window must be at least 1"));
        }

        let (columns, rows) = self.columns_rows();
        if columns < 3 || rows < 3 {
            warnings.push(format!(
                "board is only {}x{} cells; neighbors repeat across the wrap",
                columns, rows
            ));
        }
        if board.live_density == 0.0 {
            warnings.push("live_density is 0, a random board starts empty".to_string());
        }
        if self.patterns.shape_names.is_empty() && self.simulation.classify_shapes {
            warnings.push("no shape names configured, every cluster will be Undefined".to_string());
        }
        if self.output.frame_interval > 0 && self.output.frame_scale == 0 {
            return Err(LifeError::config("frame_scale must be non-zero when frames are enabled"));
        }
        if self.simulation.max_generations == 0 && self.simulation.stagnation_window > 1000 {
            warnings.push(format!(
                "no generation limit and a stagnation window of {}; the run may be very long",
                self.simulation.stagnation_window
            ));
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.columns_rows(), (50, 20));
        assert_eq!(config.patterns.live_marker, '*');
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "board:\n  width: 40\n  cell_size: 4\n  seed: 9\n\
                    simulation:\n  stagnation_window: 5\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.board.width, 40);
        assert_eq!(config.board.height, 20);
        assert_eq!(config.board.seed, Some(9));
        assert_eq!(config.columns_rows(), (10, 5));
        assert_eq!(config.simulation.stagnation_window, 5);
        assert_eq!(config.simulation.generation_delay_ms, 1000);
        assert_eq!(config.output.board_state_file, "BoardCondition.txt");
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut config = Config::default();
        config.board.live_density = 0.25;
        config.patterns.live_marker = '#';

        config.to_yaml(&path).unwrap();
        let loaded = Config::from_yaml(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = Config::default();
        config.board.cell_size = 3;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.board.live_density = 1.2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.simulation.stagnation_window = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.board.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_shape_library_from_dir_or_bundled() {
        let mut config = Config::default();
        config.patterns.shapes_dir = String::new();
        assert_eq!(config.shape_library().len(), ShapeLibrary::standard().len());

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("block.txt"), "**\n**\n").unwrap();
        config.patterns.shapes_dir = dir.path().to_string_lossy().to_string();
        config.patterns.shape_names = vec!["block".to_string(), "boat".to_string()];
        let library = config.shape_library();
        assert_eq!(library.len(), 1);
        assert!(library.get("block").is_some());
    }

    #[test]
    fn test_validation_warnings() {
        let mut config = Config::default();
        config.board.width = 2;
        config.board.live_density = 0.0;
        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 2);
    }
}
