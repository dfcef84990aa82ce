use super::{Direction, GridCarver, GridReader, Point, Size};
use crate::error::{MazeError, Result};

/// Read-only overlay that hides dead ends.
///
/// A cell with exactly one carved direction reports no directions at all.
/// The start and end cells are never hidden. The underlying grid is untouched,
/// so the overlay is asymmetric by construction: the neighbour of a hidden
/// dead end still reports its passage towards it.
pub struct DeadEndMasked<'a, G: GridReader + ?Sized> {
    inner: &'a G,
}

impl<'a, G: GridReader + ?Sized> DeadEndMasked<'a, G> {
    pub fn new(inner: &'a G) -> Self {
        DeadEndMasked { inner }
    }

    pub fn is_masked(&self, point: Point) -> bool {
        point != self.inner.start()
            && point != self.inner.end()
            && self.inner.directions_at(point).count() == 1
    }
}

impl<G: GridReader + ?Sized> GridReader for DeadEndMasked<'_, G> {
    fn size(&self) -> Size {
        self.inner.size()
    }

    fn start(&self) -> Point {
        self.inner.start()
    }

    fn end(&self) -> Point {
        self.inner.end()
    }

    fn directions_at(&self, point: Point) -> Direction {
        if self.is_masked(point) {
            Direction::NONE
        } else {
            self.inner.directions_at(point)
        }
    }
}

impl<G: GridReader + ?Sized> GridCarver for DeadEndMasked<'_, G> {
    fn carve(&mut self, _point: Point, _direction: Direction) -> Result<()> {
        Err(MazeError::usage("dead-end masked view is read-only"))
    }

    fn fill(&mut self, _point: Point, _direction: Direction) -> Result<()> {
        Err(MazeError::usage("dead-end masked view is read-only"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Maze, StorageKind};

    #[test]
    fn test_masks_dead_ends_only() {
        // start (0,0) - (1,0) - (2,0) = end, with a dead-end spur at (1,1)
        let size = Size::flat(3, 2);
        let mut maze =
            Maze::new(size, Point::ORIGIN, Point::new(2, 0, 0), StorageKind::Dense).unwrap();
        maze.carve(Point::ORIGIN, Direction::RIGHT).unwrap();
        maze.carve(Point::new(1, 0, 0), Direction::RIGHT).unwrap();
        maze.carve(Point::new(1, 0, 0), Direction::UP).unwrap();

        let masked = DeadEndMasked::new(&maze);
        assert_eq!(masked.directions_at(Point::new(1, 1, 0)), Direction::NONE);
        assert!(!masked.has_directions(Point::new(1, 1, 0), Direction::DOWN));
        // start and end are dead ends too but stay visible
        assert_eq!(masked.directions_at(Point::ORIGIN), Direction::RIGHT);
        assert_eq!(masked.directions_at(Point::new(2, 0, 0)), Direction::LEFT);
        assert_eq!(
            masked.directions_at(Point::new(1, 0, 0)),
            Direction::LEFT | Direction::RIGHT | Direction::UP
        );
        // underlying grid unchanged
        assert_eq!(maze.directions_at(Point::new(1, 1, 0)), Direction::DOWN);
    }

    #[test]
    fn test_rejects_mutation() {
        let size = Size::flat(2, 1);
        let maze = Maze::new(size, Point::ORIGIN, Point::ORIGIN, StorageKind::Dense).unwrap();
        let mut masked = DeadEndMasked::new(&maze);
        assert!(matches!(
            masked.carve(Point::ORIGIN, Direction::RIGHT),
            Err(MazeError::Usage { .. })
        ));
        assert!(masked.fill(Point::ORIGIN, Direction::RIGHT).is_err());
    }
}
