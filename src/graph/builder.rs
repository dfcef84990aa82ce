use std::collections::BTreeMap;

use super::{Graph, GraphEdge, GraphNode};
use crate::{
    error::{MazeError, Result},
    maze::{Direction, GridReader, Point},
};

/// Compresses a carved grid into a graph of junctions and doors.
///
/// Nodes are the start, the end, and every cell with more than two carved
/// directions. From each node every carved direction is followed through
/// corridor cells until another node is reached; the steps taken become one
/// edge. Corridors that end in a dead end, or in a cell hidden by a
/// [`crate::maze::DeadEndMasked`] view, produce no edge.
///
/// # Errors
/// [`MazeError::Malformed`] if a corridor leaves the maze, is not carved back
/// from the next cell, or never reaches a node.
pub fn build_graph<G: GridReader + ?Sized>(grid: &G) -> Result<Graph> {
    let start = grid.start();
    let end = grid.end();
    let is_node = |p: Point| p == start || p == end || grid.directions_at(p).count() > 2;

    let mut nodes = BTreeMap::new();
    for point in grid.size().points().filter(|&p| is_node(p)) {
        let mut edges = Vec::new();
        for direction in grid.directions_at(point).split() {
            if let Some(edge) = walk_corridor(grid, point, direction, &is_node)? {
                edges.push(edge);
            }
        }
        nodes.insert(point, GraphNode { point, edges });
    }

    let graph = Graph { nodes, start, end };
    tracing::debug!(
        "[graph] compressed {} cells into {} nodes and {} edges",
        grid.total_cells(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Follows a corridor out of `from` towards `first`.
/// Returns `None` when the corridor runs into a dead end.
fn walk_corridor<G: GridReader + ?Sized>(
    grid: &G,
    from: Point,
    first: Direction,
    is_node: &impl Fn(Point) -> bool,
) -> Result<Option<GraphEdge>> {
    let size = grid.size();
    let max_steps = grid.total_cells();
    let mut directions = vec![first];
    let mut arrived_by = first;
    let mut current = from.step(first);

    loop {
        if !size.contains(current) {
            return Err(MazeError::Malformed {
                point: current.step(arrived_by.opposite()?),
                reason: format!("passage {:?} leaves the maze", arrived_by),
            });
        }
        if is_node(current) {
            return Ok(Some(GraphEdge {
                target: current,
                directions,
            }));
        }

        let here = grid.directions_at(current);
        if here == Direction::NONE {
            // Hidden dead end
            return Ok(None);
        }
        let back = arrived_by.opposite()?;
        if !here.contains(back) {
            return Err(MazeError::Malformed {
                point: current,
                reason: format!("entered by {:?} but not carved back", arrived_by),
            });
        }

        // Not a node, so at most one way onwards
        let onward = here - back;
        if onward == Direction::NONE {
            return Ok(None);
        }
        if directions.len() >= max_steps {
            return Err(MazeError::Malformed {
                point: current,
                reason: format!("corridor from {} never reaches a junction", from),
            });
        }
        directions.push(onward);
        arrived_by = onward;
        current = current.step(onward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::Algorithm,
        maze::{DeadEndMasked, GridCarver, Maze, Size, StorageKind},
        solvers::{SolverKind, solve, test_support::generated},
    };

    fn corridor(length: i32) -> Maze {
        let size = Size::new(1, length, 1);
        let mut maze =
            Maze::new(size, Point::ORIGIN, size.far_corner(), StorageKind::Dense).unwrap();
        for y in 0..length - 1 {
            maze.carve(Point::new(0, y, 0), Direction::UP).unwrap();
        }
        maze
    }

    /// A plus-shaped maze: junction at (1,1), start at (0,1), end at (2,1),
    /// dead ends at (1,0) and (1,2).
    fn plus() -> Maze {
        let size = Size::flat(3, 3);
        let mut maze = Maze::new(
            size,
            Point::new(0, 1, 0),
            Point::new(2, 1, 0),
            StorageKind::Dense,
        )
        .unwrap();
        let center = Point::new(1, 1, 0);
        for d in [Direction::LEFT, Direction::RIGHT, Direction::UP, Direction::DOWN] {
            maze.carve(center, d).unwrap();
        }
        maze
    }

    #[test]
    fn test_straight_corridor_has_two_nodes() {
        let maze = corridor(10);
        let graph = build_graph(&maze).unwrap();
        assert_eq!(graph.node_count(), 2);
        let start = graph.node(Point::ORIGIN).unwrap();
        assert_eq!(start.edges.len(), 1);
        assert_eq!(start.edges[0].target, Point::new(0, 9, 0));
        assert_eq!(start.edges[0].directions, vec![Direction::UP; 9]);
        assert_eq!(start.edges[0].weight(), 9);
    }

    #[test]
    fn test_single_cell() {
        let size = Size::new(1, 1, 1);
        let maze = Maze::new(size, Point::ORIGIN, Point::ORIGIN, StorageKind::Dense).unwrap();
        let graph = build_graph(&maze).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.start(), graph.end());
    }

    #[test]
    fn test_junction_and_dead_ends() {
        let maze = plus();
        let graph = build_graph(&maze).unwrap();
        assert_eq!(graph.node_count(), 3);
        let junction = graph.node(Point::new(1, 1, 0)).unwrap();
        // Four passages, two of them end in dead ends
        assert_eq!(junction.edges.len(), 2);
        assert!(junction.edges.iter().all(|e| e.weight() == 1));
    }

    #[test]
    fn test_door_on_junction_is_not_duplicated() {
        let mut maze = plus();
        maze.set_doors(Point::new(1, 1, 0), Point::new(1, 2, 0)).unwrap();
        let graph = build_graph(&maze).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node(Point::new(1, 1, 0)).unwrap().edges.len(), 1);
    }

    #[test]
    fn test_loop_back_to_same_junction() {
        // Ring of eight cells with a junction at (1,2) leading up to the start at (1,3)
        let size = Size::flat(3, 4);
        let mut maze = Maze::new(
            size,
            Point::new(1, 3, 0),
            Point::new(1, 3, 0),
            StorageKind::Dense,
        )
        .unwrap();
        let ring = [
            (Point::new(0, 0, 0), Direction::RIGHT),
            (Point::new(1, 0, 0), Direction::RIGHT),
            (Point::new(2, 0, 0), Direction::UP),
            (Point::new(2, 1, 0), Direction::UP),
            (Point::new(2, 2, 0), Direction::LEFT),
            (Point::new(1, 2, 0), Direction::LEFT),
            (Point::new(0, 2, 0), Direction::DOWN),
            (Point::new(0, 1, 0), Direction::DOWN),
        ];
        for (p, d) in ring {
            maze.carve(p, d).unwrap();
        }
        maze.carve(Point::new(1, 2, 0), Direction::UP).unwrap();

        let graph = build_graph(&maze).unwrap();
        let junction = graph.node(Point::new(1, 2, 0)).unwrap();
        // Both ways round the ring come back to the junction itself
        let self_loops = junction
            .edges
            .iter()
            .filter(|e| e.target == junction.point)
            .count();
        assert_eq!(self_loops, 2);
        assert!(junction.edges.iter().any(|e| e.weight() == 8));
    }

    #[test]
    fn test_masked_view_drops_dead_end_edges() {
        let maze = plus();
        let masked = DeadEndMasked::new(&maze);
        let graph = build_graph(&masked).unwrap();
        assert_eq!(graph, build_graph(&maze).unwrap());
    }

    #[test]
    fn test_masked_generated_mazes_keep_shortest_path() {
        for (size, algorithm, loops, seed) in [
            (Size::flat(15, 15), Algorithm::RecursiveBacktracker, 0.0, 4),
            (Size::flat(15, 15), Algorithm::Prim, 10.0, 5),
            (Size::new(6, 6, 4), Algorithm::GrowingTree, 5.0, 6),
            (Size::new(6, 6, 4), Algorithm::Kruskal, 0.0, 7),
        ] {
            let (carved, graph) = generated(size, algorithm, loops, seed);
            let masked = build_graph(&DeadEndMasked::new(&carved.maze)).unwrap();
            assert_eq!(masked.node_count(), graph.node_count(), "{}", algorithm);
            assert_eq!(
                solve(&masked, SolverKind::Dijkstra).shortest_path(),
                solve(&graph, SolverKind::Dijkstra).shortest_path(),
                "{}",
                algorithm
            );
            assert!(solve(&masked, SolverKind::Dijkstra).is_reachable());
        }
    }

    #[test]
    fn test_one_sided_passage_is_fatal() {
        struct Broken(Maze);
        impl GridReader for Broken {
            fn size(&self) -> Size {
                self.0.size()
            }
            fn start(&self) -> Point {
                self.0.start()
            }
            fn end(&self) -> Point {
                self.0.end()
            }
            fn directions_at(&self, point: Point) -> Direction {
                if point == Point::new(0, 1, 0) {
                    Direction::UP
                } else {
                    self.0.directions_at(point)
                }
            }
        }
        let broken = Broken(corridor(3));
        assert!(matches!(
            build_graph(&broken),
            Err(MazeError::Malformed { .. })
        ));
    }
}
