use rand::{Rng, seq::SliceRandom};

use crate::{
    error::Result,
    generators::random_point,
    maze::{Carver, Cursor, Direction, GridCarver},
};

/// Depth-first carving with an explicit stack, so large mazes cannot overflow the call stack.
pub fn recursive_backtracker<G: GridCarver + ?Sized, R: Rng>(
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

    // The stack only ever holds carved cells
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        // Only a move to another cell counts as a visit
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
                // Carve further from the neighbour before coming back to this cell
                stack.push(neighbor);
            }
            None => {
                stack.pop();
            }
        }
    }

    tracing::debug!(
        "[backtracker] carved {} passages",
        carver.log().carve_events.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{get_rng, test_support::flood_fill},
        maze::{GridReader, Maze, Point, Size, StorageKind},
    };

    #[test]
    fn test_recursive_backtracker() {
        let size = Size::new(5, 4, 2);
        let mut maze = Maze::new(size, Point::ORIGIN, size.far_corner(), StorageKind::Dense).unwrap();
        let mut carver = Carver::new(&mut maze);
        recursive_backtracker(&mut carver, &mut get_rng(Some(42))).unwrap();
        let log = carver.finish();

        assert_eq!(log.carve_events.len(), size.total_cells() - 1);
        assert_eq!(flood_fill(&maze, maze.start()), size.total_cells());
        // One arrival per cell, plus one return to the parent for every carved cell
        assert!(size.points().all(|p| log.visits(p) >= 1));
        assert_eq!(
            log.heatmap.values().sum::<u32>() as usize,
            2 * size.total_cells() - 1
        );
    }

    #[test]
    fn test_heatmap_counts_each_arrival_once() {
        let size = Size::flat(2, 1);
        for seed in 0..8 {
            let mut maze =
                Maze::new(size, Point::ORIGIN, size.far_corner(), StorageKind::Dense).unwrap();
            let mut carver = Carver::new(&mut maze);
            recursive_backtracker(&mut carver, &mut get_rng(Some(seed))).unwrap();
            let log = carver.finish();

            // The root is entered, left for the leaf and returned to; the leaf is entered once
            let mut visits = size.points().map(|p| log.visits(p)).collect::<Vec<_>>();
            visits.sort();
            assert_eq!(visits, vec![1, 2], "seed {}", seed);
            let root = log.carve_events[0].point;
            assert_eq!(log.visits(root), 2);
        }
    }

    #[test]
    fn test_long_corridor_does_not_overflow() {
        let size = Size::flat(2000, 1);
        let mut maze = Maze::new(size, Point::ORIGIN, size.far_corner(), StorageKind::Sparse).unwrap();
        let mut carver = Carver::new(&mut maze);
        recursive_backtracker(&mut carver, &mut get_rng(Some(1))).unwrap();
        assert_eq!(carver.finish().carve_events.len(), 1999);
        assert_eq!(maze.directions_at(Point::new(1000, 0, 0)), Direction::X_AXIS);
    }
}
