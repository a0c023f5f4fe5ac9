//! Shape normalization and classification
//!
//! A cluster's absolute coordinates are shifted so the smallest column and
//! row become zero, then compared for exact set equality against a library
//! of named reference shapes. Only translation is factored out: a rotated or
//! mirrored pattern is a different shape.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::{debug, warn};

use crate::cluster::Cluster;
use crate::pattern::{Pattern, LIVE_MARKER};

/// Name reported for clusters that match no library entry.
pub const UNDEFINED: &str = "Undefined";

/// Shape name to cluster count for one generation.
pub type ShapeCensus = BTreeMap<String, usize>;

/// Reference shapes bundled with the crate, in library order.
pub const STANDARD_SHAPES: &[(&str, &str)] = &[
    ("block", include_str!("../shapes/block.txt")),
    ("beehive", include_str!("../shapes/beehive.txt")),
    ("loaf", include_str!("../shapes/loaf.txt")),
    ("boat", include_str!("../shapes/boat.txt")),
    ("ship", include_str!("../shapes/ship.txt")),
    ("tub", include_str!("../shapes/tub.txt")),
    ("pond", include_str!("../shapes/pond.txt")),
    ("blinker_h", include_str!("../shapes/blinker_h.txt")),
    ("blinker_v", include_str!("../shapes/blinker_v.txt")),
    ("glider_1", include_str!("../shapes/glider_1.txt")),
    ("glider_2", include_str!("../shapes/glider_2.txt")),
    ("glider_3", include_str!("../shapes/glider_3.txt")),
    ("glider_4", include_str!("../shapes/glider_4.txt")),
];

/// Translation-invariant set of `(dx, dy)` offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedShape {
    offsets: BTreeSet<(usize, usize)>,
}

impl NormalizedShape {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, dx: usize, dy: usize) -> bool {
        self.offsets.contains(&(dx, dy))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, usize)> {
        self.offsets.iter()
    }

    /// Live cells of a pattern, normalized.
    pub fn from_pattern(pattern: &Pattern) -> Self {
        let cells: Vec<_> = pattern.live_cells().collect();
        normalize(&cells)
    }
}

impl FromIterator<(usize, usize)> for NormalizedShape {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            offsets: iter.into_iter().collect(),
        }
    }
}

/// Shift `cells` so the minimum column and minimum row are zero.
///
/// Empty input gives an empty shape.
pub fn normalize(cells: &[(usize, usize)]) -> NormalizedShape {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    cells
        .iter()
        .map(|&(x, y)| (x - min_x, y - min_y))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeEntry {
    pub name: String,
    pub shape: NormalizedShape,
}

/// Ordered, read-only set of named reference shapes.
#[derive(Debug, Clone, Default)]
pub struct ShapeLibrary {
    entries: Vec<ShapeEntry>,
}

impl ShapeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library of the bundled reference shapes.
    pub fn standard() -> Self {
        let mut library = Self::new();
        for &(name, text) in STANDARD_SHAPES {
            match Pattern::parse(text, LIVE_MARKER) {
                Ok(pattern) => {
                    library.insert_pattern(name, &pattern);
                }
                Err(e) => warn!("Bundled shape '{}' is invalid: {}", name, e),
            }
        }
        library
    }

    /// Names of the bundled shapes, in library order.
    pub fn standard_names() -> Vec<String> {
        STANDARD_SHAPES
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Load `<dir>/<name>.txt` for each name, in order.
    ///
    /// Missing, unreadable, ragged or empty files are skipped with a warning.
    pub fn load_dir<S: AsRef<str>>(dir: impl AsRef<Path>, names: &[S], live_marker: char) -> Self {
        let dir = dir.as_ref();
        let mut library = Self::new();

        for name in names {
            let name = name.as_ref();
            let path = dir.join(format!("{}.txt", name));
            if !path.exists() {
                warn!("Shape file {} not found, skipping '{}'", path.display(), name);
                continue;
            }
            match Pattern::load(&path, live_marker) {
                Ok(pattern) => {
                    if !library.insert_pattern(name, &pattern) {
                        warn!("Shape file {} is empty, skipping '{}'", path.display(), name);
                    }
                }
                Err(e) => warn!("Could not read shape file {}: {}", path.display(), e),
            }
        }

        debug!("Loaded {} reference shapes from {}", library.len(), dir.display());
        library
    }

    /// Add a shape; empty shapes are ignored. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>, shape: NormalizedShape) -> bool {
        if shape.is_empty() {
            return false;
        }
        self.entries.push(ShapeEntry {
            name: name.into(),
            shape,
        });
        true
    }

    pub fn insert_pattern(&mut self, name: impl Into<String>, pattern: &Pattern) -> bool {
        self.insert(name, NormalizedShape::from_pattern(pattern))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&NormalizedShape> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.shape)
    }
}

/// Names clusters by looking them up in a shape library.
#[derive(Debug, Clone)]
pub struct ShapeClassifier {
    library: ShapeLibrary,
}

impl ShapeClassifier {
    pub fn new(library: ShapeLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &ShapeLibrary {
        &self.library
    }

    /// First library entry equal to `shape`, or [`UNDEFINED`].
    pub fn classify(&self, shape: &NormalizedShape) -> &str {
        self.library
            .iter()
            .filter(|entry| entry.shape.len() == shape.len())
            .find(|entry| entry.shape == *shape)
            .map(|entry| entry.name.as_str())
            .unwrap_or(UNDEFINED)
    }

    pub fn classify_cluster(&self, cluster: &Cluster) -> &str {
        self.classify(&normalize(cluster.cells()))
    }

    /// Count clusters per shape name.
    pub fn census(&self, clusters: &[Cluster]) -> ShapeCensus {
        let mut census = ShapeCensus::new();
        for cluster in clusters {
            let name = self.classify_cluster(cluster);
            *census.entry(name.to_string()).or_insert(0) += 1;
        }
        census
    }
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self::new(ShapeLibrary::standard())
    }
}
