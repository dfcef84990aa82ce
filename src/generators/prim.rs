use std::collections::HashSet;

use rand::Rng;

use crate::{
    error::Result,
    generators::random_point,
    maze::{Carver, Cursor, Direction, GridCarver, Point, Size},
};

/// Frontier edges leaving `cell` towards cells not yet part of the maze.
fn frontier_edges(
    size: Size,
    cell: Point,
    visited: &HashSet<Point>,
) -> impl Iterator<Item = (Point, Direction)> + '_ {
    size.neighbors(cell)
        .filter(move |(_, n)| !visited.contains(n))
        .map(move |(d, _)| (cell, d))
}

/// Randomized Prim's: grow the maze by opening a uniformly random frontier edge.
pub fn randomized_prim<G: GridCarver + ?Sized, R: Rng>(
    carver: &mut Carver<'_, G>,
    rng: &mut R,
) -> Result<()> {
    let size = carver.grid().size();
    if size.is_empty() {
        return Ok(());
    }

    // Initialize the starting point
    let start = random_point(size, rng);
    carver.jump_to(start)?;
    let mut visited = HashSet::from([start]);

    let mut frontier = frontier_edges(size, start, &visited).collect::<Vec<_>>();

    while !frontier.is_empty() {
        // Randomly select an edge from the frontier
        let idx = rng.random_range(0..frontier.len());
        let (from, direction) = frontier.swap_remove(idx);
        let target = from.step(direction);
        if visited.contains(&target) {
            // Another edge reached this cell first
            continue;
        }

        if carver.current() != from {
            carver.jump_to(from)?;
        }
        carver.carve_in_direction(direction)?;
        carver.jump_in_direction(direction)?;
        visited.insert(target);

        frontier.extend(frontier_edges(size, target, &visited));
    }

    tracing::debug!(
        "[prim] carved {} passages",
        carver.log().carve_events.len()
    );
    Ok(())
}
