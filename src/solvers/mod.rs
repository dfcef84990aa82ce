use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    str::FromStr,
};

mod astar;
mod bfs;
mod dijkstra;
mod yen;

pub use astar::{DistanceHeuristic, Heuristic, solve_astar, solve_astar_filtered};
pub use bfs::{bfs_distance, reachable_count};
pub use dijkstra::{
    SCAN_THRESHOLD, dijkstra_heap, dijkstra_scan, solve_dijkstra, solve_dijkstra_filtered,
};
pub use yen::{KShortestPaths, RankedPath, k_shortest_paths};

use crate::{
    error::MazeError,
    graph::{EdgeRef, Graph, GraphEdge},
    maze::{Direction, Point},
};

/// Decides which edges a search may use. Lets one shortest-path routine run
/// over restricted views of a graph without copying it.
pub trait EdgeFilter {
    fn allows(&self, edge: EdgeRef, target: Point) -> bool;
}

/// Every edge is usable.
pub struct Unrestricted;

impl EdgeFilter for Unrestricted {
    fn allows(&self, _edge: EdgeRef, _target: Point) -> bool {
        true
    }
}

impl<F: Fn(EdgeRef, Point) -> bool> EdgeFilter for F {
    fn allows(&self, edge: EdgeRef, target: Point) -> bool {
        self(edge, target)
    }
}

/// Blocks individual edges and every edge leading into a blocked node.
#[derive(Debug, Default, Clone)]
pub struct Restriction {
    pub blocked_edges: HashSet<EdgeRef>,
    pub blocked_nodes: HashSet<Point>,
}

impl EdgeFilter for Restriction {
    fn allows(&self, edge: EdgeRef, target: Point) -> bool {
        !self.blocked_edges.contains(&edge) && !self.blocked_nodes.contains(&target)
    }
}

/// A walk through the graph from one node to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Every grid step, in order.
    pub directions: Vec<Direction>,
    pub total_distance: u64,
    /// Graph nodes visited, including both ends.
    pub nodes: Vec<Point>,
    /// Graph edges taken, in order.
    pub edges: Vec<EdgeRef>,
}

impl PathResult {
    /// The empty walk that stays at `at`.
    pub fn trivial(at: Point) -> Self {
        PathResult {
            directions: Vec::new(),
            total_distance: 0,
            nodes: vec![at],
            edges: Vec::new(),
        }
    }

    /// Builds the walk that starts at `from` and follows `edges`.
    /// Returns `None` if an edge does not exist or does not leave the node reached so far.
    pub fn from_edges(graph: &Graph, from: Point, edges: Vec<EdgeRef>) -> Option<Self> {
        let mut path = PathResult::trivial(from);
        for &edge_ref in &edges {
            if edge_ref.from != path.last() {
                return None;
            }
            let edge = graph.edge(edge_ref)?;
            path.directions.extend_from_slice(&edge.directions);
            path.total_distance += edge.weight();
            path.nodes.push(edge.target);
        }
        path.edges = edges;
        Some(path)
    }

    pub fn first(&self) -> Point {
        self.nodes[0]
    }

    pub fn last(&self) -> Point {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn edge_set(&self) -> BTreeSet<EdgeRef> {
        self.edges.iter().copied().collect()
    }

    /// Every grid cell on the walk, including both ends.
    pub fn cells(&self) -> Vec<Point> {
        let mut cells = Vec::with_capacity(self.directions.len() + 1);
        let mut current = self.first();
        cells.push(current);
        for &d in &self.directions {
            current = current.step(d);
            cells.push(current);
        }
        cells
    }
}

/// Outcome of a single-pair search.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathResult {
    /// `None` when the target cannot be reached.
    pub path: Option<PathResult>,
    /// Final distance of every node the search settled. Nodes missing here are at infinite distance.
    pub distances: BTreeMap<Point, u64>,
    /// Number of nodes taken off the frontier.
    pub expanded: usize,
}

impl ShortestPathResult {
    /// Length of the shortest path, `None` meaning infinite.
    pub fn shortest_path(&self) -> Option<u64> {
        self.path.as_ref().map(|p| p.total_distance)
    }

    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }

    /// The directions to walk, empty when unreachable.
    pub fn directions(&self) -> &[Direction] {
        self.path.as_ref().map_or(&[], |p| p.directions.as_slice())
    }
}

/// Solver-local search state. Graph nodes are never written to.
#[derive(Default)]
struct SearchState {
    distances: HashMap<Point, u64>,
    predecessors: HashMap<Point, EdgeRef>,
    settled: HashSet<Point>,
}

impl SearchState {
    fn new(source: Point) -> Self {
        let mut state = SearchState::default();
        state.distances.insert(source, 0);
        state
    }

    fn distance(&self, point: Point) -> u64 {
        self.distances.get(&point).copied().unwrap_or(u64::MAX)
    }

    /// Relaxes `edge` out of `from`; returns the improved distance of its target.
    fn relax(&mut self, from: Point, edge_ref: EdgeRef, edge: &GraphEdge) -> Option<u64> {
        let candidate = self.distance(from).saturating_add(edge.weight());
        if candidate < self.distance(edge.target) {
            self.distances.insert(edge.target, candidate);
            self.predecessors.insert(edge.target, edge_ref);
            Some(candidate)
        } else {
            None
        }
    }

    fn finish(self, graph: &Graph, source: Point, target: Point) -> ShortestPathResult {
        let path = if self.settled.contains(&target) {
            let mut edges = Vec::new();
            let mut current = target;
            while current != source {
                match self.predecessors.get(&current) {
                    Some(&edge) => {
                        edges.push(edge);
                        current = edge.from;
                    }
                    None => break,
                }
            }
            edges.reverse();
            PathResult::from_edges(graph, source, edges)
        } else {
            None
        };
        let distances = self
            .settled
            .iter()
            .map(|&p| (p, self.distance(p)))
            .collect();
        ShortestPathResult {
            path,
            distances,
            expanded: self.settled.len(),
        }
    }
}

/// Which single-pair algorithm to run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    #[default]
    Dijkstra,
    AStar(Heuristic),
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::Dijkstra => write!(f, "Dijkstra"),
            SolverKind::AStar(heuristic) => write!(f, "A* ({})", heuristic),
        }
    }
}

/// Accepts `dijkstra`, `astar` (Manhattan) or `astar:<heuristic>`.
impl FromStr for SolverKind {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (name, heuristic) = match lowered.split_once(':') {
            Some((name, heuristic)) => (name.to_string(), Some(heuristic.parse::<Heuristic>()?)),
            None => (lowered.clone(), None),
        };
        match name.as_str() {
            "dijkstra" if heuristic.is_none() => Ok(SolverKind::Dijkstra),
            "astar" | "a*" => Ok(SolverKind::AStar(heuristic.unwrap_or_default())),
            _ => Err(MazeError::config(format!("unknown solver '{}'", s))),
        }
    }
}

/// Shortest path from the graph's start to its end.
pub fn solve(graph: &Graph, kind: SolverKind) -> ShortestPathResult {
    shortest_path(graph, graph.start(), graph.end(), kind)
}

/// Shortest path between two nodes with the chosen algorithm.
pub fn shortest_path(graph: &Graph, from: Point, to: Point, kind: SolverKind) -> ShortestPathResult {
    let result = match kind {
        SolverKind::Dijkstra => solve_dijkstra(graph, from, to),
        SolverKind::AStar(heuristic) => solve_astar(graph, from, to, heuristic),
    };
    match result.shortest_path() {
        Some(distance) => tracing::debug!(
            "[solve] {} found a path of length {} from {} to {}, {} nodes expanded",
            kind,
            distance,
            from,
            to,
            result.expanded
        ),
        None => tracing::info!("[solve] {} found no path from {} to {}", kind, from, to),
    }
    result
}

/// Orders frontier entries by priority, then distance, then point, smallest first
/// once wrapped in [`std::cmp::Reverse`].
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: f64,
    distance: u64,
    point: Point,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.distance.cmp(&other.distance))
            .then_with(|| self.point.cmp(&other.point))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{
        generators::{Algorithm, GeneratedMaze, Strategy, StrategyWeight, generate_maze, get_rng},
        graph::{Graph, build_graph},
        maze::Size,
        settings::GenerationSettings,
    };

    pub fn generated(size: Size, algorithm: Algorithm, loops: f64, seed: u64) -> (GeneratedMaze, Graph) {
        let settings = GenerationSettings {
            algorithm,
            size,
            strategies: vec![
                StrategyWeight::new(Strategy::Newest, 2),
                StrategyWeight::new(Strategy::Random, 1),
            ],
            wall_removal_percent: loops,
            ..Default::default()
        };
        let generated = generate_maze(&settings, &mut get_rng(Some(seed))).unwrap();
        let graph = build_graph(&generated.maze).unwrap();
        (generated, graph)
    }
}
