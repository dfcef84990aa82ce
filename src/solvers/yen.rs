use std::collections::{BTreeMap, HashSet};

use super::{PathResult, Restriction, solve_dijkstra, solve_dijkstra_filtered};
use crate::{
    graph::{EdgeRef, Graph},
    maze::Point,
};

/// One of the k shortest paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPath {
    pub path: PathResult,
    /// How much longer than the best path this one is.
    pub distance_from_optimal: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KShortestPaths {
    /// Loopless paths, shortest first.
    pub paths: Vec<RankedPath>,
    pub requested: usize,
}

impl KShortestPaths {
    /// True when the graph had fewer distinct loopless paths than requested.
    pub fn is_exhausted(&self) -> bool {
        self.paths.len() < self.requested
    }
}

/// Yen's algorithm: up to `k` loopless paths from `from` to `to`, in non-decreasing length.
///
/// Every candidate search runs on its own restricted view of the graph, so the
/// graph itself is shared and never changed. Fewer than `k` paths are returned
/// when no further distinct route exists.
pub fn k_shortest_paths(graph: &Graph, from: Point, to: Point, k: usize) -> KShortestPaths {
    let mut accepted: Vec<PathResult> = Vec::new();
    if k > 0 {
        if let Some(best) = solve_dijkstra(graph, from, to).path {
            accepted.push(best);
        }
    }

    // Ordered by (length, edges) so the shortest candidate pops first and duplicates collapse
    let mut candidates: BTreeMap<(u64, Vec<EdgeRef>), PathResult> = BTreeMap::new();
    let mut seen: HashSet<Vec<EdgeRef>> = accepted.iter().map(|p| p.edges.clone()).collect();

    while !accepted.is_empty() && accepted.len() < k {
        let previous = &accepted[accepted.len() - 1];

        for i in 0..previous.edges.len() {
            let spur = previous.nodes[i];
            let root = &previous.edges[..i];

            let mut restriction = Restriction::default();
            // Edges already taken out of the spur by accepted paths sharing this root
            restriction.blocked_edges.extend(
                accepted
                    .iter()
                    .filter(|p| p.edges.len() > i && p.edges[..i] == *root)
                    .map(|p| p.edges[i]),
            );
            // Keep the spur path from looping back through the root
            restriction
                .blocked_nodes
                .extend(previous.nodes[..i].iter().copied());

            let Some(spur_path) = solve_dijkstra_filtered(graph, spur, to, &restriction).path
            else {
                continue;
            };
            let edges = root
                .iter()
                .chain(spur_path.edges.iter())
                .copied()
                .collect::<Vec<_>>();
            if seen.contains(&edges) {
                continue;
            }
            if let Some(candidate) = PathResult::from_edges(graph, from, edges.clone()) {
                seen.insert(edges.clone());
                candidates.insert((candidate.total_distance, edges), candidate);
            }
        }

        match candidates.pop_first() {
            Some((_, next)) => accepted.push(next),
            None => {
                tracing::debug!(
                    "[yen] no alternative after {} of {} requested paths",
                    accepted.len(),
                    k
                );
                break;
            }
        }
    }

    let best = accepted.first().map_or(0, |p| p.total_distance);
    let paths = accepted
        .into_iter()
        .map(|path| RankedPath {
            distance_from_optimal: path.total_distance - best,
            path,
        })
        .collect::<Vec<_>>();

    tracing::debug!("[yen] found {} of {} requested paths", paths.len(), k);
    KShortestPaths {
        paths,
        requested: k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::Algorithm,
        graph::build_graph,
        maze::{Direction, GridCarver, Maze, Size, StorageKind},
        solvers::test_support::generated,
    };

    /// Open 3x3 room: every passage between neighbours carved.
    fn open_room() -> Graph {
        let size = Size::flat(3, 3);
        let mut maze =
            Maze::new(size, Point::ORIGIN, size.far_corner(), StorageKind::Dense).unwrap();
        for p in size.points() {
            for d in [Direction::RIGHT, Direction::UP] {
                if size.contains(p.step(d)) {
                    maze.carve(p, d).unwrap();
                }
            }
        }
        build_graph(&maze).unwrap()
    }

    #[test]
    fn test_perfect_maze_has_one_path() {
        let (_, graph) = generated(Size::flat(12, 12), Algorithm::RecursiveBacktracker, 0.0, 13);
        let result = k_shortest_paths(&graph, graph.start(), graph.end(), 5);
        assert_eq!(result.paths.len(), 1);
        assert!(result.is_exhausted());
        assert_eq!(result.paths[0].distance_from_optimal, 0);
    }

    #[test]
    fn test_open_room_paths() {
        let graph = open_room();
        let result = k_shortest_paths(&graph, graph.start(), graph.end(), 10);
        // Six monotone routes of length 4 from corner to corner
        assert_eq!(result.paths.len(), 10);
        assert!(!result.is_exhausted());
        assert_eq!(
            result
                .paths
                .iter()
                .filter(|p| p.path.total_distance == 4)
                .count(),
            6
        );
        for pair in result.paths.windows(2) {
            assert!(pair[0].path.total_distance <= pair[1].path.total_distance);
        }
        let distinct = result
            .paths
            .iter()
            .map(|p| p.path.edges.clone())
            .collect::<HashSet<_>>();
        assert_eq!(distinct.len(), 10);
        for ranked in &result.paths {
            let nodes = ranked.path.nodes.iter().collect::<HashSet<_>>();
            assert_eq!(nodes.len(), ranked.path.nodes.len(), "path revisits a node");
            assert_eq!(ranked.path.first(), graph.start());
            assert_eq!(ranked.path.last(), graph.end());
        }
    }

    #[test]
    fn test_first_path_matches_dijkstra() {
        let (_, graph) = generated(Size::flat(15, 15), Algorithm::Prim, 15.0, 23);
        let best = solve_dijkstra(&graph, graph.start(), graph.end()).shortest_path();
        let result = k_shortest_paths(&graph, graph.start(), graph.end(), 4);
        assert_eq!(result.paths[0].distance_from_optimal, 0);
        assert_eq!(Some(result.paths[0].path.total_distance), best);
        assert!(result.paths.len() > 1);
    }

    #[test]
    fn test_zero_k_and_unreachable() {
        let graph = open_room();
        assert!(k_shortest_paths(&graph, graph.start(), graph.end(), 0).paths.is_empty());
        let nowhere = k_shortest_paths(&graph, graph.start(), Point::new(7, 7, 0), 3);
        assert!(nowhere.paths.is_empty());
        assert!(nowhere.is_exhausted());
    }
}
