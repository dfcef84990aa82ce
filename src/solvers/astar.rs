use std::str::FromStr;

use super::{EdgeFilter, ShortestPathResult, Unrestricted, dijkstra::best_first};
use crate::{error::MazeError, graph::Graph, maze::Point};

/// Lower bound on the walking distance between two points.
///
/// Must never overestimate, otherwise A* may return a longer path than Dijkstra.
/// Consistency is not required: nodes reached more cheaply later are expanded again.
pub trait DistanceHeuristic {
    fn estimate(&self, from: Point, goal: Point) -> f64;
}

impl<F: Fn(Point, Point) -> f64> DistanceHeuristic for F {
    fn estimate(&self, from: Point, goal: Point) -> f64 {
        self(from, goal)
    }
}

/// Built-in heuristics. Both are admissible since every edge costs at least
/// the Manhattan distance between its ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl DistanceHeuristic for Heuristic {
    fn estimate(&self, from: Point, goal: Point) -> f64 {
        match self {
            Heuristic::Manhattan => from.manhattan(goal) as f64,
            Heuristic::Euclidean => from.euclidean(goal),
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "Manhattan"),
            Heuristic::Euclidean => write!(f, "Euclidean"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            other => Err(MazeError::config(format!("unknown heuristic '{}'", other))),
        }
    }
}

/// A* from `from` to `to`.
pub fn solve_astar<H: DistanceHeuristic>(
    graph: &Graph,
    from: Point,
    to: Point,
    heuristic: H,
) -> ShortestPathResult {
    solve_astar_filtered(graph, from, to, heuristic, &Unrestricted)
}

/// [`solve_astar`] over the edges `filter` allows.
pub fn solve_astar_filtered<H: DistanceHeuristic, F: EdgeFilter + ?Sized>(
    graph: &Graph,
    from: Point,
    to: Point,
    heuristic: H,
    filter: &F,
) -> ShortestPathResult {
    best_first(graph, from, to, filter, |point| heuristic.estimate(point, to))
}
