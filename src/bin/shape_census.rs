//! Offline shape census for saved boards
//!
//! Loads a board state file (or the latest snapshot in a checkpoint
//! directory), optionally advances it, and prints its clusters by shape.
//!
//! Usage (example):
//!   cargo run --release --bin shape_census -- BoardCondition.txt
//!   cargo run --release --bin shape_census -- checkpoints --advance 50 --list

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use toroidal_life::checkpoint::{find_latest_checkpoint, load_board};
use toroidal_life::pattern::LIVE_MARKER;
use toroidal_life::{find_clusters, normalize, LifeError, Result, ShapeClassifier, ShapeLibrary};

#[derive(Parser)]
#[command(name = "shape_census")]
#[command(about = "Print the cluster shape census of a saved board", long_about = None)]
struct Cli {
    /// Board state file, or a directory of generation snapshots
    input: PathBuf,

    /// Directory of `<name>.txt` reference shapes (default: bundled shapes)
    #[arg(long, value_name = "DIR")]
    shapes_dir: Option<PathBuf>,

    /// Character marking a live cell
    #[arg(long, default_value_t = LIVE_MARKER)]
    live_marker: char,

    /// Advance the board this many generations before counting
    #[arg(long, default_value_t = 0)]
    advance: usize,

    /// Also list every cluster with its bounding position
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = if cli.input.is_dir() {
        let (generation, path) = find_latest_checkpoint(&cli.input).ok_or_else(|| {
            LifeError::config(format!("no snapshots found in {}", cli.input.display()))
        })?;
        info!("Using snapshot of generation {}", generation);
        path
    } else {
        cli.input.clone()
    };

    let mut board = load_board(&path, cli.live_marker)?.ok_or_else(|| {
        LifeError::config(format!("{} is missing or empty", path.display()))
    })?;
    for _ in 0..cli.advance {
        board.advance();
    }

    let library = match cli.shapes_dir {
        Some(ref dir) => {
            ShapeLibrary::load_dir(dir, &ShapeLibrary::standard_names(), cli.live_marker)
        }
        None => ShapeLibrary::standard(),
    };
    let classifier = ShapeClassifier::new(library);

    let clusters = find_clusters(&board);
    let census = classifier.census(&clusters);

    println!("Board: {}x{} ({})", board.columns(), board.rows(), path.display());
    println!("Living cells: {}", board.count_living_cells());
    println!("Clusters: {}", clusters.len());
    for (name, count) in &census {
        println!("  {:<12} {}", name, count);
    }

    if cli.list {
        println!();
        for (i, cluster) in clusters.iter().enumerate() {
            let min_x = cluster.cells().iter().map(|&(x, _)| x).min().unwrap_or(0);
            let min_y = cluster.cells().iter().map(|&(_, y)| y).min().unwrap_or(0);
            let name = classifier.classify(&normalize(cluster.cells()));
            println!(
                "  #{:<4} {:<12} {:>3} cells at ({}, {})",
                i,
                name,
                cluster.len(),
                min_x,
                min_y
            );
        }
    }

    Ok(())
}
