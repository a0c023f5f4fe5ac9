use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use toroidal_life::checkpoint::{self, checkpoint_filename};
use toroidal_life::metrics::StatsTracker;
use toroidal_life::render::{self, CLEAR_SCREEN};
use toroidal_life::{Config, GenerationReport, Result, ShapeClassifier, Simulation};

#[derive(Parser)]
#[command(name = "toroidal-life")]
#[command(
    about = "Conway's Game of Life on a toroidal board with a shape census",
    long_about = None
)]
struct Cli {
    /// Colony pattern file placed in the middle of an empty board
    colony: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "config.yaml")]
    generate_config: Option<PathBuf>,

    /// Seed for the random initial board
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after N generations (0 = until stagnation)
    #[arg(short, long)]
    generations: Option<usize>,

    /// Pause between generations in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Do not print the board every generation
    #[arg(long, default_value_t = false)]
    no_render: bool,

    /// Write per-generation statistics to this CSV file
    #[arg(long, value_name = "FILE")]
    stats: Option<PathBuf>,
}

impl Cli {
    /// CLI values override config file values
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.board.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            config.simulation.max_generations = generations;
        }
        if let Some(delay) = self.delay_ms {
            config.simulation.generation_delay_ms = delay;
        }
        if self.no_render {
            config.output.render_terminal = false;
        }
        if let Some(ref stats) = self.stats {
            config.output.stats_file = stats.to_string_lossy().to_string();
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(ref path) = cli.generate_config {
        Config::write_template(path)?;
        info!("Generated config template: {}", path.display());
        return Ok(());
    }

    let mut config = match cli.config {
        Some(ref path) => {
            let config = Config::from_yaml(path)?;
            info!("Loaded config from: {}", path.display());
            config
        }
        None => Config::default(),
    };
    cli.apply(&mut config);

    for warning in config.validate()? {
        warn!("Config warning: {}", warning);
    }

    let mut rng = match config.board.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let board = checkpoint::initial_board(&config, cli.colony.as_deref(), &mut rng)?;
    info!("Board: {}x{} cells", board.columns(), board.rows());

    let classifier = ShapeClassifier::new(config.shape_library());
    info!("{} reference shapes loaded", classifier.library().len());

    let mut sim = Simulation::new(board, classifier, config.simulation.stagnation_window)?;
    sim.set_classify(config.simulation.classify_shapes);

    let mut tracker = if config.output.stats_file.is_empty() {
        StatsTracker::new()
    } else {
        StatsTracker::with_csv(&config.output.stats_file)?
    };

    let save_requests = spawn_save_listener();
    let delay = Duration::from_millis(config.simulation.generation_delay_ms);
    let max_generations = config.simulation.max_generations;

    let mut report = sim.observe();
    loop {
        emit(&config, &sim, &report)?;

        while save_requests.try_recv().is_ok() {
            checkpoint::save_board(
                sim.board(),
                &config.output.board_state_file,
                config.patterns.live_marker,
            )?;
        }

        let stagnated_at = report.stagnated_at;
        tracker.record(report.stats);
        if let Some(generation) = stagnated_at {
            tracker.mark_stagnation(generation);
            break;
        }
        if max_generations > 0 && sim.generation() >= max_generations {
            info!("Reached generation limit {}", max_generations);
            break;
        }

        if !delay.is_zero() {
            thread::sleep(delay);
        }
        report = match sim.step() {
            Some(report) => report,
            None => break,
        };
    }

    print!("{}", tracker.summary());
    Ok(())
}

/// Per-generation output: terminal frame, PNG frame, periodic snapshot.
fn emit(config: &Config, sim: &Simulation, report: &GenerationReport) -> Result<()> {
    let output = &config.output;
    let generation = report.stats.generation;

    if output.render_terminal {
        let frame =
            render::render_frame(sim.board(), &report.stats, config.patterns.live_marker);
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}{}", CLEAR_SCREEN, frame)?;
        stdout.flush()?;
    }

    if output.frame_interval > 0 && generation % output.frame_interval == 0 {
        let path = render::frame_filename(&output.frames_dir, generation);
        render::save_frame(sim.board(), &path, output.frame_scale)?;
    }

    if output.checkpoint_interval > 0
        && generation > 0
        && generation % output.checkpoint_interval == 0
    {
        let path = checkpoint_filename(&output.checkpoint_dir, generation);
        checkpoint::save_board(sim.board(), &path, config.patterns.live_marker)?;
    }

    if let Some(generation) = report.stagnated_at {
        info!("Stagnation reached at generation {}", generation);
    }
    Ok(())
}

/// Background reader for save requests: a line reading `s` asks for the
/// board to be saved. The generation loop polls the channel between
/// generations, so the board keeps a single writer.
fn spawn_save_listener() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().eq_ignore_ascii_case("s") && tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}
