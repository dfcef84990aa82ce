use std::str::FromStr;

use rand::{
    Rng, RngCore,
    distr::{Distribution, weighted::WeightedIndex},
    seq::SliceRandom,
};

use crate::{
    error::{MazeError, Result},
    generators::random_point,
    maze::{Carver, Cursor, Direction, GridCarver},
};

/// How the next cell is picked from the active list. The list is ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Oldest,
    Newest,
    Middle,
    Random,
    RandomOldest,
    RandomNewest,
}

/// Picks an index into an active list of the given non-zero length.
type Selector = fn(usize, &mut dyn RngCore) -> usize;

fn oldest(_len: usize, _rng: &mut dyn RngCore) -> usize {
    0
}

fn newest(len: usize, _rng: &mut dyn RngCore) -> usize {
    len - 1
}

fn middle(len: usize, _rng: &mut dyn RngCore) -> usize {
    len / 2
}

fn random(len: usize, rng: &mut dyn RngCore) -> usize {
    rng.random_range(0..len)
}

fn random_oldest(len: usize, rng: &mut dyn RngCore) -> usize {
    rng.random_range(0..len.div_ceil(2))
}

fn random_newest(len: usize, rng: &mut dyn RngCore) -> usize {
    rng.random_range(len / 2..len)
}

/// Strategy to selector lookup, indexed by the strategy's discriminant.
const SELECTORS: [(Strategy, Selector); 6] = [
    (Strategy::Oldest, oldest),
    (Strategy::Newest, newest),
    (Strategy::Middle, middle),
    (Strategy::Random, random),
    (Strategy::RandomOldest, random_oldest),
    (Strategy::RandomNewest, random_newest),
];

impl Strategy {
    pub fn selector(self) -> Selector {
        SELECTORS[self as usize].1
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Oldest => "oldest",
            Strategy::Newest => "newest",
            Strategy::Middle => "middle",
            Strategy::Random => "random",
            Strategy::RandomOldest => "random-oldest",
            Strategy::RandomNewest => "random-newest",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Strategy {
    type Err = MazeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "oldest" => Ok(Strategy::Oldest),
            "newest" => Ok(Strategy::Newest),
            "middle" => Ok(Strategy::Middle),
            "random" => Ok(Strategy::Random),
            "random-oldest" => Ok(Strategy::RandomOldest),
            "random-newest" => Ok(Strategy::RandomNewest),
            other => Err(MazeError::config(format!(
                "unknown growing tree strategy '{}'",
                other
            ))),
        }
    }
}

/// A strategy and its relative weight in the per-iteration draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyWeight {
    pub strategy: Strategy,
    pub weight: u32,
}

impl StrategyWeight {
    pub fn new(strategy: Strategy, weight: u32) -> Self {
        StrategyWeight { strategy, weight }
    }
}

/// Parses `name=weight`, or a bare `name` with weight 1.
impl FromStr for StrategyWeight {
    type Err = MazeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, weight) = match s.split_once('=') {
            Some((name, weight)) => {
                let weight = weight.trim().parse::<u32>().map_err(|_| {
                    MazeError::config(format!("invalid weight '{}' for strategy '{}'", weight, name))
                })?;
                (name, weight)
            }
            None => (s, 1),
        };
        Ok(StrategyWeight::new(name.parse()?, weight))
    }
}

/// Weighted draw over the configured strategies.
struct StrategyTable {
    strategies: Vec<Strategy>,
    index: WeightedIndex<u32>,
}

impl StrategyTable {
    fn new(weights: &[StrategyWeight]) -> Result<Self> {
        let index = WeightedIndex::new(weights.iter().map(|w| w.weight)).map_err(|e| {
            MazeError::config(format!("invalid growing tree strategy weights: {}", e))
        })?;
        Ok(StrategyTable {
            strategies: weights.iter().map(|w| w.strategy).collect(),
            index,
        })
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> Strategy {
        self.strategies[self.index.sample(rng)]
    }
}

/// Growing Tree: keep a list of active cells, grow from one picked by a weighted
/// random strategy, and retire cells that have no uncarved neighbour left.
///
/// Newest-only behaves like the recursive backtracker, Random-only like Prim's.
pub fn growing_tree<G: GridCarver + ?Sized, R: Rng>(
    carver: &mut Carver<'_, G>,
    weights: &[StrategyWeight],
    rng: &mut R,
) -> Result<()> {
    let table = StrategyTable::new(weights)?;
    let size = carver.grid().size();
    if size.is_empty() {
        return Ok(());
    }

    let first = random_point(size, rng);
    carver.jump_to(first)?;
    let mut active = vec![first];

    while !active.is_empty() {
        let strategy = table.pick(rng);
        let idx = (strategy.selector())(active.len(), &mut *rng);
        let cell = active[idx];
        if carver.current() != cell {
            carver.jump_to(cell)?;
        }

        let mut directions = carver.carvable_directions().split().collect::<Vec<_>>();
        directions.shuffle(rng);
        let next = directions
            .into_iter()
            .find(|&d| carver.carved_directions_towards(d) == Direction::NONE);

        match next {
            Some(direction) => {
                carver.carve_in_direction(direction)?;
                let neighbor = carver.jump_in_direction(direction)?;
                active.push(neighbor);
            }
            None => {
                // Keep the order of the rest, strategies depend on it
                active.remove(idx);
            }
        }
    }

    tracing::debug!(
        "[growing tree] carved {} passages with {} strategies",
        carver.log().carve_events.len(),
        weights.len()
    );
    Ok(())
}
