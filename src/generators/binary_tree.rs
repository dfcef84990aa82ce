use rand::{Rng, seq::IndexedRandom};

use crate::{
    error::Result,
    maze::{Carver, Cursor, Direction, GridCarver},
};

/// Directions a binary tree cell may carve towards. All point away from the origin,
/// so every cell has a path to the far corner and no cycle can form.
const TREE_DIRECTIONS: Direction = Direction::RIGHT
    .union(Direction::UP)
    .union(Direction::FORWARD);

/// Binary Tree: every cell opens one random passage towards +x, +y or +z.
///
/// On a flat maze +z is never in bounds and this is the classic two-way binary
/// tree. The far corner is the root and carves nothing.
pub fn binary_tree<G: GridCarver + ?Sized, R: Rng>(
    carver: &mut Carver<'_, G>,
    rng: &mut R,
) -> Result<()> {
    let size = carver.grid().size();
    for point in size.points() {
        carver.jump_to(point)?;
        let candidates = (carver.carvable_directions() & TREE_DIRECTIONS)
            .split()
            .collect::<Vec<_>>();
        if let Some(&direction) = candidates.choose(rng) {
            carver.carve_in_direction(direction)?;
        }
    }

    tracing::debug!(
        "[binary tree] carved {} passages",
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
    fn test_binary_tree_bias() {
        let size = Size::flat(6, 6);
        let mut maze = Maze::new(size, Point::ORIGIN, size.far_corner(), StorageKind::Dense).unwrap();
        let mut carver = Carver::new(&mut maze);
        binary_tree(&mut carver, &mut get_rng(Some(4))).unwrap();
        let log = carver.finish();

        assert_eq!(log.carve_events.len(), 35);
        assert!(
            log.carve_events
                .iter()
                .all(|e| TREE_DIRECTIONS.contains(e.direction))
        );
        // The top row and right column are unbroken corridors
        for x in 0..5 {
            assert!(maze.has_directions(Point::new(x, 5, 0), Direction::RIGHT));
        }
        for y in 0..5 {
            assert!(maze.has_directions(Point::new(5, y, 0), Direction::UP));
        }
        assert_eq!(flood_fill(&maze, Point::ORIGIN), 36);
    }

    #[test]
    fn test_binary_tree_in_three_dimensions() {
        let size = Size::new(3, 3, 3);
        let mut maze = Maze::new(size, Point::ORIGIN, size.far_corner(), StorageKind::Dense).unwrap();
        let mut carver = Carver::new(&mut maze);
        binary_tree(&mut carver, &mut get_rng(Some(2))).unwrap();
        assert_eq!(carver.finish().carve_events.len(), 26);
        assert_eq!(flood_fill(&maze, Point::ORIGIN), 27);
        assert_eq!(
            maze.directions_at(size.far_corner()) & TREE_DIRECTIONS,
            Direction::NONE
        );
    }
}
