//! Board state persistence
//!
//! Snapshots use the plain pattern format: one line per row, the live marker
//! for alive cells and a space for dead ones. Periodic snapshots go into a
//! directory with the generation in the file name; the latest one can be
//! found again by scanning that directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::Rng;

use crate::board::Board;
use crate::config::Config;
use crate::error::Result;
use crate::pattern::Pattern;

const CHECKPOINT_PREFIX: &str = "checkpoint_gen_";
const CHECKPOINT_SUFFIX: &str = ".txt";

/// Write the whole board to `path`.
pub fn save_board(board: &Board, path: impl AsRef<Path>, live_marker: char) -> Result<()> {
    board.to_pattern().save(&path, live_marker)?;
    info!(
        "Saved {}x{} board to {}",
        board.columns(),
        board.rows(),
        path.as_ref().display()
    );
    Ok(())
}

/// Load a saved board; its dimensions become the board's.
///
/// A missing or empty file gives `Ok(None)`. A ragged file is an error.
pub fn load_board(path: impl AsRef<Path>, live_marker: char) -> Result<Option<Board>> {
    match load_pattern(path.as_ref(), live_marker)? {
        Some(pattern) => Ok(Some(Board::from_pattern(&pattern))),
        None => Ok(None),
    }
}

/// Load a colony and place it centred on a dead `columns` x `rows` board.
///
/// A missing or empty file gives `Ok(None)`. Ragged or oversized colonies
/// are errors.
pub fn load_colony(
    path: impl AsRef<Path>,
    columns: usize,
    rows: usize,
    live_marker: char,
) -> Result<Option<Board>> {
    match load_pattern(path.as_ref(), live_marker)? {
        Some(colony) => Ok(Some(Board::with_colony(columns, rows, &colony)?)),
        None => Ok(None),
    }
}

fn load_pattern(path: &Path, live_marker: char) -> Result<Option<Pattern>> {
    if !path.exists() {
        return Ok(None);
    }
    let pattern = Pattern::load(path, live_marker)?;
    if pattern.is_empty() {
        warn!("Empty load file: {}", path.display());
        return Ok(None);
    }
    Ok(Some(pattern))
}

/// Pick the initial board: colony file, then saved board state, then random.
///
/// A colony that is missing, empty, ragged or too large for the configured
/// board falls through to the board state file. An unreadable state file
/// falls through to a random board drawn from `rng`.
pub fn initial_board<R: Rng + ?Sized>(
    config: &Config,
    colony: Option<&Path>,
    rng: &mut R,
) -> Result<Board> {
    let marker = config.patterns.live_marker;

    if let Some(path) = colony {
        let (columns, rows) = config.columns_rows();
        match load_colony(path, columns, rows, marker) {
            Ok(Some(board)) => {
                info!("Loaded colony from {}", path.display());
                return Ok(board);
            }
            Ok(None) => warn!("Colony file {} is missing or empty", path.display()),
            Err(e) => warn!("Could not load colony {}: {}", path.display(), e),
        }
    }

    if !config.output.board_state_file.is_empty() {
        let path = Path::new(&config.output.board_state_file);
        match load_board(path, marker) {
            Ok(Some(board)) => {
                info!("Loaded board state from {}", path.display());
                return Ok(board);
            }
            Ok(None) => {}
            Err(e) => warn!("Could not load board state {}: {}", path.display(), e),
        }
    }

    let board = &config.board;
    Board::new(
        board.width,
        board.height,
        board.cell_size,
        board.live_density,
        rng,
    )
}

/// Snapshot path for `generation` inside `base_dir`.
pub fn checkpoint_filename(base_dir: impl AsRef<Path>, generation: usize) -> PathBuf {
    base_dir
        .as_ref()
        .join(format!("{}{}{}", CHECKPOINT_PREFIX, generation, CHECKPOINT_SUFFIX))
}

/// Generation encoded in a snapshot file name.
fn checkpoint_generation(name: &str) -> Option<usize> {
    name.strip_prefix(CHECKPOINT_PREFIX)?
        .strip_suffix(CHECKPOINT_SUFFIX)?
        .parse()
        .ok()
}

/// Find the snapshot with the highest generation in a directory
pub fn find_latest_checkpoint(base_dir: impl AsRef<Path>) -> Option<(usize, PathBuf)> {
    let entries = fs::read_dir(base_dir).ok()?;
    entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let generation = checkpoint_generation(name.to_str()?)?;
            Some((generation, entry.path()))
        })
        .max_by_key(|(generation, _)| *generation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::pattern::LIVE_MARKER;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 10x6 board config whose state file lives in `dir`.
    fn reset_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.board.width = 10;
        config.board.height = 6;
        config.board.live_density = 0.5;
        config.output.board_state_file = dir
            .join("BoardCondition.txt")
            .to_string_lossy()
            .to_string();
        config
    }

    #[test]
    fn test_board_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BoardCondition.txt");

        let mut board = Board::empty(6, 4).unwrap();
        board.set_alive(0, 0, true);
        board.set_alive(5, 3, true);
        board.set_alive(2, 1, true);

        save_board(&board, &path, LIVE_MARKER).unwrap();
        let loaded = load_board(&path, LIVE_MARKER).unwrap().unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn test_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(load_board(&missing, LIVE_MARKER).unwrap().is_none());

        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "").unwrap();
        assert!(load_board(&empty, LIVE_MARKER).unwrap().is_none());
        assert!(load_colony(&empty, 10, 10, LIVE_MARKER).unwrap().is_none());
    }

    #[test]
    fn test_colony_is_centred() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blinker.txt");
        fs::write(&path, "***\n").unwrap();

        let board = load_colony(&path, 9, 5, LIVE_MARKER).unwrap().unwrap();
        assert_eq!((board.columns(), board.rows()), (9, 5));
        let live: Vec<_> = board.live_cells().collect();
        assert_eq!(live, vec![(3, 2), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_bad_colonies_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let ragged = dir.path().join("ragged.txt");
        fs::write(&ragged, "**\n*\n").unwrap();
        assert!(matches!(
            load_colony(&ragged, 10, 10, LIVE_MARKER),
            Err(LifeError::RaggedPattern { .. })
        ));

        let wide = dir.path().join("wide.txt");
        fs::write(&wide, "*****\n").unwrap();
        assert!(matches!(
            load_colony(&wide, 4, 4, LIVE_MARKER),
            Err(LifeError::PatternTooLarge { .. })
        ));
    }

    #[test]
    fn test_find_latest_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_latest_checkpoint(dir.path()).is_none());

        let board = Board::empty(3, 3).unwrap();
        for generation in [5, 120, 40] {
            save_board(&board, checkpoint_filename(dir.path(), generation), LIVE_MARKER).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let (generation, path) = find_latest_checkpoint(dir.path()).unwrap();
        assert_eq!(generation, 120);
        assert_eq!(path, checkpoint_filename(dir.path(), 120));
        assert!(find_latest_checkpoint(dir.path().join("missing")).is_none());
    }

    #[test]
    fn test_initial_board_prefers_colony() {
        let dir = tempfile::tempdir().unwrap();
        let config = reset_config(dir.path());
        let state = Board::from_pattern(&Pattern::from_rows(&["**", "**"], LIVE_MARKER).unwrap());
        save_board(&state, &config.output.board_state_file, LIVE_MARKER).unwrap();
        let colony = dir.path().join("blinker.txt");
        fs::write(&colony, "***\n").unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let board = initial_board(&config, Some(&colony), &mut rng).unwrap();
        assert_eq!((board.columns(), board.rows()), (10, 6));
        let live: Vec<_> = board.live_cells().collect();
        assert_eq!(live, vec![(3, 2), (4, 2), (5, 2)]);
    }

    #[test]
    fn test_oversized_colony_falls_back_to_board_state() {
        let dir = tempfile::tempdir().unwrap();
        let config = reset_config(dir.path());
        let state = Board::from_pattern(&Pattern::from_rows(&["**.", "**."], LIVE_MARKER).unwrap());
        save_board(&state, &config.output.board_state_file, LIVE_MARKER).unwrap();
        let colony = dir.path().join("wide.txt");
        fs::write(&colony, "************\n").unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let board = initial_board(&config, Some(&colony), &mut rng).unwrap();
        assert_eq!(board, state);
    }

    #[test]
    fn test_missing_files_fall_back_to_random_board() {
        let dir = tempfile::tempdir().unwrap();
        let config = reset_config(dir.path());
        let colony = dir.path().join("missing.txt");

        let board = initial_board(&config, Some(&colony), &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!((board.columns(), board.rows()), (10, 6));
        let expected = Board::new(10, 6, 1, 0.5, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(board, expected);
    }
}
