use std::str::FromStr;

use rand::{Rng, SeedableRng, rngs::StdRng};

mod binary_tree;
mod growing_tree;
mod kruskal;
mod loops;
mod prim;
mod recursive_backtracker;

pub use binary_tree::binary_tree;
pub use growing_tree::{Strategy, StrategyWeight, growing_tree};
pub use kruskal::randomized_kruskal;
pub use loops::remove_walls;
pub use prim::randomized_prim;
pub use recursive_backtracker::recursive_backtracker;

use crate::{
    error::{MazeError, Result},
    maze::{Carver, GenerationLog, GridCarver, Maze, Point, Size},
    settings::GenerationSettings,
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Uniformly random point inside `size`. `size` must not be empty.
pub fn random_point<R: Rng>(size: Size, rng: &mut R) -> Point {
    size.unravel_index(rng.random_range(0..size.total_cells()))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    RecursiveBacktracker,
    GrowingTree,
    Prim,
    Kruskal,
    BinaryTree,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::RecursiveBacktracker => write!(f, "Recursive Backtracker"),
            Algorithm::GrowingTree => write!(f, "Growing Tree"),
            Algorithm::Prim => write!(f, "Prim's Algorithm"),
            Algorithm::Kruskal => write!(f, "Kruskal's Algorithm"),
            Algorithm::BinaryTree => write!(f, "Binary Tree"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "recursivebacktracker" | "backtracker" | "dfs" => Ok(Algorithm::RecursiveBacktracker),
            "growingtree" => Ok(Algorithm::GrowingTree),
            "prim" | "prims" => Ok(Algorithm::Prim),
            "kruskal" | "kruskals" => Ok(Algorithm::Kruskal),
            "binarytree" | "binary" => Ok(Algorithm::BinaryTree),
            _ => Err(MazeError::config(format!("unknown generation algorithm '{}'", s))),
        }
    }
}

/// A carved maze together with what happened while carving it.
pub struct GeneratedMaze {
    pub maze: Maze,
    pub log: GenerationLog,
}

/// Picks start and end cells: opposite corners when `doors_at_edge`, otherwise
/// two random cells that differ whenever the maze has more than one cell.
pub fn pick_doors<R: Rng>(size: Size, doors_at_edge: bool, rng: &mut R) -> (Point, Point) {
    if doors_at_edge {
        return (Point::ORIGIN, size.far_corner());
    }
    let total = size.total_cells();
    let start = rng.random_range(0..total);
    if total == 1 {
        return (size.unravel_index(start), size.unravel_index(start));
    }
    // Draw from the remaining cells and skip over the start index
    let mut end = rng.random_range(0..total - 1);
    if end >= start {
        end += 1;
    }
    (size.unravel_index(start), size.unravel_index(end))
}

/// Carves a spanning tree over the whole grid with the configured algorithm.
///
/// Settings are validated before anything is touched.
pub fn carve_spanning_tree<G: GridCarver + ?Sized, R: Rng>(
    carver: &mut Carver<'_, G>,
    settings: &GenerationSettings,
    rng: &mut R,
) -> Result<()> {
    settings.validate()?;
    match settings.algorithm {
        Algorithm::RecursiveBacktracker => recursive_backtracker(carver, rng),
        Algorithm::GrowingTree => growing_tree(carver, &settings.strategies, rng),
        Algorithm::Prim => randomized_prim(carver, rng),
        Algorithm::Kruskal => randomized_kruskal(carver, rng),
        Algorithm::BinaryTree => binary_tree(carver, rng),
    }
}

/// Generates a maze with an RNG seeded from `settings.seed`, or from the OS when unset.
pub fn generate(settings: &GenerationSettings) -> Result<GeneratedMaze> {
    generate_maze(settings, &mut get_rng(settings.seed))
}

/// Allocates, carves and optionally loops a maze as described by `settings`.
///
/// Randomness comes from `rng` alone; `settings.seed` is only read by [`generate`].
pub fn generate_maze<R: Rng>(settings: &GenerationSettings, rng: &mut R) -> Result<GeneratedMaze> {
    settings.validate()?;
    let (start, end) = pick_doors(settings.size, settings.doors_at_edge, rng);
    let mut maze = Maze::new(settings.size, start, end, settings.storage)?;

    let mut carver = Carver::new(&mut maze);
    carve_spanning_tree(&mut carver, settings, rng)?;
    if settings.wall_removal_percent > 0.0 {
        remove_walls(&mut carver, settings.wall_removal_percent, rng)?;
    }
    let log = carver.finish();

    tracing::info!(
        "[generate] {} over {} carved {} passages (start {}, end {})",
        settings.algorithm,
        settings.size,
        log.carve_events.len(),
        start,
        end
    );
    Ok(GeneratedMaze { maze, log })
}
