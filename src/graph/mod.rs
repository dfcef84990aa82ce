mod builder;

pub use builder::build_graph;

use std::collections::BTreeMap;

use crate::maze::{Direction, Point};

/// A corridor walked from one node to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub target: Point,
    /// Every step taken along the corridor, in order.
    pub directions: Vec<Direction>,
}

impl GraphEdge {
    pub fn weight(&self) -> u64 {
        self.directions.len() as u64
    }
}

/// Identifies an edge by the node it leaves and its position in that node's edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeRef {
    pub from: Point,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub point: Point,
    pub edges: Vec<GraphEdge>,
}

impl GraphNode {
    /// Edges of this node paired with their [`EdgeRef`].
    pub fn edge_refs(&self) -> impl Iterator<Item = (EdgeRef, &GraphEdge)> {
        self.edges.iter().enumerate().map(|(index, edge)| {
            (
                EdgeRef {
                    from: self.point,
                    index,
                },
                edge,
            )
        })
    }
}

/// Junctions plus the two doors, joined by corridor edges. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<Point, GraphNode>,
    start: Point,
    end: Point,
}

impl Graph {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn node(&self, point: Point) -> Option<&GraphNode> {
        self.nodes.get(&point)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.nodes.contains_key(&point)
    }

    /// Nodes in point order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.edges.len()).sum()
    }

    pub fn edge(&self, edge: EdgeRef) -> Option<&GraphEdge> {
        self.nodes.get(&edge.from)?.edges.get(edge.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_lookup() {
        let a = Point::new(0, 0, 0);
        let b = Point::new(2, 0, 0);
        let node = GraphNode {
            point: a,
            edges: vec![GraphEdge {
                target: b,
                directions: vec![Direction::RIGHT, Direction::RIGHT],
            }],
        };
        let graph = Graph {
            nodes: BTreeMap::from([(a, node)]),
            start: a,
            end: b,
        };
        let edge = EdgeRef { from: a, index: 0 };
        assert_eq!(graph.edge(edge).map(GraphEdge::weight), Some(2));
        assert!(graph.edge(EdgeRef { from: a, index: 1 }).is_none());
        assert!(graph.edge(EdgeRef { from: b, index: 0 }).is_none());
        assert_eq!(graph.edge_count(), 1);
    }
}
