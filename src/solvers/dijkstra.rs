use std::{cmp::Reverse, collections::BinaryHeap};

use super::{EdgeFilter, FrontierEntry, SearchState, ShortestPathResult, Unrestricted};
use crate::{graph::Graph, maze::Point};

/// Graphs with at most this many nodes use the scan-based variant.
pub const SCAN_THRESHOLD: usize = 64;

/// Dijkstra from `from` to `to`, picking the variant by graph size.
pub fn solve_dijkstra(graph: &Graph, from: Point, to: Point) -> ShortestPathResult {
    solve_dijkstra_filtered(graph, from, to, &Unrestricted)
}

/// [`solve_dijkstra`] over the edges `filter` allows.
pub fn solve_dijkstra_filtered<F: EdgeFilter + ?Sized>(
    graph: &Graph,
    from: Point,
    to: Point,
    filter: &F,
) -> ShortestPathResult {
    if graph.node_count() <= SCAN_THRESHOLD {
        dijkstra_scan(graph, from, to, filter)
    } else {
        dijkstra_heap(graph, from, to, filter)
    }
}

/// O(n²) Dijkstra: each round scans every reached node for the closest unsettled one.
/// No priority structure, which wins on small graphs.
pub fn dijkstra_scan<F: EdgeFilter + ?Sized>(
    graph: &Graph,
    from: Point,
    to: Point,
    filter: &F,
) -> ShortestPathResult {
    let mut state = SearchState::new(from);
    if !graph.contains(from) {
        return state.finish(graph, from, to);
    }

    loop {
        // Ties go to the smaller point so both variants settle in the same order
        let next = state
            .distances
            .iter()
            .filter(|(p, _)| !state.settled.contains(*p))
            .min_by_key(|&(p, d)| (*d, *p))
            .map(|(p, _)| *p);
        let Some(current) = next else {
            break;
        };
        state.settled.insert(current);
        if current == to {
            break;
        }
        expand(graph, &mut state, current, filter, false, |_, _| {});
    }

    state.finish(graph, from, to)
}

/// O(n log n) Dijkstra over a binary heap with lazy deletion.
pub fn dijkstra_heap<F: EdgeFilter + ?Sized>(
    graph: &Graph,
    from: Point,
    to: Point,
    filter: &F,
) -> ShortestPathResult {
    best_first(graph, from, to, filter, |_| 0.0)
}

/// Relaxes every allowed edge out of `current`, reporting improved targets to `on_improved`.
/// Settled targets are only relaxed again when `reopen` is set.
fn expand<F: EdgeFilter + ?Sized>(
    graph: &Graph,
    state: &mut SearchState,
    current: Point,
    filter: &F,
    reopen: bool,
    mut on_improved: impl FnMut(Point, u64),
) {
    let Some(node) = graph.node(current) else {
        return;
    };
    for (edge_ref, edge) in node.edge_refs() {
        if !reopen && state.settled.contains(&edge.target) {
            continue;
        }
        if !filter.allows(edge_ref, edge.target) {
            continue;
        }
        if let Some(distance) = state.relax(current, edge_ref, edge) {
            on_improved(edge.target, distance);
        }
    }
}

/// Heap-driven search ordered by `distance + estimate(point)`.
/// With a zero estimate this is Dijkstra; with an admissible one it is A*.
///
/// A settled node is expanded again whenever a shorter distance to it turns up,
/// which only happens for estimates that are admissible but not consistent.
pub(super) fn best_first<F: EdgeFilter + ?Sized>(
    graph: &Graph,
    from: Point,
    to: Point,
    filter: &F,
    estimate: impl Fn(Point) -> f64,
) -> ShortestPathResult {
    let mut state = SearchState::new(from);
    if !graph.contains(from) {
        return state.finish(graph, from, to);
    }

    // Using Reverse to turn the max-heap into a min-heap
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse(FrontierEntry {
        priority: estimate(from),
        distance: 0,
        point: from,
    }));

    while let Some(Reverse(entry)) = frontier.pop() {
        // Skip entries superseded by a shorter distance
        if entry.distance > state.distance(entry.point) {
            continue;
        }
        state.settled.insert(entry.point);
        if entry.point == to {
            break;
        }
        expand(graph, &mut state, entry.point, filter, true, |point, distance| {
            frontier.push(Reverse(FrontierEntry {
                priority: distance as f64 + estimate(point),
                distance,
                point,
            }));
        });
    }

    state.finish(graph, from, to)
}
