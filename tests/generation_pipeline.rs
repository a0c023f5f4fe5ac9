//! End-to-end runs through the public API: board construction, generations,
//! clustering, classification and stagnation.

use rand::rngs::StdRng;
use rand::SeedableRng;

use toroidal_life::pattern::LIVE_MARKER;
use toroidal_life::{
    find_clusters, Board, DetectorState, Pattern, ShapeClassifier, ShapeLibrary, Simulation,
    UNDEFINED,
};

fn board(rows: &[&str]) -> Board {
    Board::from_pattern(&Pattern::from_rows(rows, LIVE_MARKER).unwrap())
}

#[test]
fn glider_cycles_through_its_phases() {
    let mut sim = Simulation::new(
        board(&[
            ".*......", "..*.....", "***.....", "........", "........", "........", "........",
            "........",
        ]),
        ShapeClassifier::default(),
        10,
    )
    .unwrap();

    let mut names = vec![];
    names.push(sim.observe().stats.census.keys().next().cloned().unwrap());
    for _ in 0..4 {
        let report = sim.step().unwrap();
        assert_eq!(report.stats.living_cells, 5);
        assert_eq!(report.clusters.len(), 1);
        names.push(report.stats.census.keys().next().cloned().unwrap());
    }
    assert_eq!(
        names,
        vec!["glider_1", "glider_2", "glider_3", "glider_4", "glider_1"]
    );
}

#[test]
fn glider_travels_around_the_torus() {
    // After 4 * 8 generations a glider on an 8x8 torus is back where it started
    let start = board(&[
        ".*......", "..*.....", "***.....", "........", "........", "........", "........",
        "........",
    ]);
    let mut b = start.clone();
    for _ in 0..32 {
        b.advance();
    }
    assert_eq!(b, start);
}

#[test]
fn still_lifes_are_classified_and_stagnate() {
    let mut sim = Simulation::new(
        board(&[
            "............",
            ".**.....**..",
            ".**....*..*.",
            "........**..",
            "............",
            "............",
            "..**........",
            "..*.*.......",
            "...*........",
            "............",
        ]),
        ShapeClassifier::default(),
        5,
    )
    .unwrap();

    let first = sim.observe();
    assert_eq!(first.stats.living_cells, 15);
    assert_eq!(first.stats.census.get("block"), Some(&1));
    assert_eq!(first.stats.census.get("beehive"), Some(&1));
    assert_eq!(first.stats.census.get("boat"), Some(&1));

    let mut stagnated = None;
    while let Some(report) = sim.step() {
        if report.stagnated_at.is_some() {
            stagnated = report.stagnated_at;
        }
    }
    assert_eq!(stagnated, Some(4));
    assert_eq!(sim.state(), DetectorState::Stagnated { generation: 4 });
}

#[test]
fn random_board_clusters_partition_population() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut b = Board::new(60, 40, 2, 0.35, &mut rng).unwrap();
    assert_eq!((b.columns(), b.rows()), (30, 20));

    let classifier = ShapeClassifier::new(ShapeLibrary::standard());
    for _ in 0..20 {
        let clusters = find_clusters(&b);
        let census = classifier.census(&clusters);
        let clustered: usize = clusters.iter().map(|c| c.len()).sum();
        assert_eq!(clustered, b.count_living_cells());
        assert_eq!(census.values().sum::<usize>(), clusters.len());
        b.advance();
    }
}

#[test]
fn same_seed_same_board() {
    let a = Board::new(40, 40, 1, 0.5, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = Board::new(40, 40, 1, 0.5, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_board_reports_nothing() {
    let mut sim = Simulation::new(
        Board::empty(10, 10).unwrap(),
        ShapeClassifier::default(),
        1,
    )
    .unwrap();
    let report = sim.observe();
    assert_eq!(report.stats.living_cells, 0);
    assert!(report.clusters.is_empty());
    assert!(report.stats.census.get(UNDEFINED).is_none());
    // A window of one latches on the first reading
    assert_eq!(report.stagnated_at, Some(0));
}
