mod cursor;
mod direction;
mod masked;
mod point;
pub mod storage;

pub use cursor::{CarveEvent, Carver, Cursor, CursorMode, GenerationLog, Jumper};
pub use direction::Direction;
pub use masked::DeadEndMasked;
pub use point::{Point, Size};
pub use storage::{CellStorage, CellStore, StorageKind};

use crate::error::{MazeError, Result};

/// Read access to a carved grid.
pub trait GridReader {
    fn size(&self) -> Size;
    fn start(&self) -> Point;
    fn end(&self) -> Point;

    /// Directions carved out of `point`. Out-of-bounds points have none.
    fn directions_at(&self, point: Point) -> Direction;

    fn has_directions(&self, point: Point, directions: Direction) -> bool {
        self.directions_at(point).has_all(directions)
    }

    fn total_cells(&self) -> usize {
        self.size().total_cells()
    }
}

/// Mutating access to a carved grid. Every mutation touches both endpoints of a passage.
pub trait GridCarver: GridReader {
    /// Opens the passage between `point` and its neighbour towards `direction`.
    fn carve(&mut self, point: Point, direction: Direction) -> Result<()>;

    /// Closes the passage between `point` and its neighbour towards `direction`.
    fn fill(&mut self, point: Point, direction: Direction) -> Result<()>;
}

/// A carved maze: one direction set per cell plus the two doors.
pub struct Maze {
    cells: CellStorage,
    size: Size,
    start: Point,
    end: Point,
}

impl Maze {
    /// Allocates an uncarved maze of the given size.
    ///
    /// # Errors
    /// * [`MazeError::Config`] if any axis of `size` is not positive
    /// * [`MazeError::OutOfBounds`] if `start` or `end` lies outside the maze
    pub fn new(size: Size, start: Point, end: Point, storage: StorageKind) -> Result<Self> {
        if size.is_empty() {
            return Err(MazeError::config(format!(
                "maze size must be positive on every axis, got {}",
                size
            )));
        }
        for point in [start, end] {
            if !size.contains(point) {
                return Err(MazeError::OutOfBounds { point, size });
            }
        }
        Ok(Maze {
            cells: CellStorage::allocate(storage, size),
            size,
            start,
            end,
        })
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.cells.kind()
    }

    pub fn set_doors(&mut self, start: Point, end: Point) -> Result<()> {
        for point in [start, end] {
            if !self.size.contains(point) {
                return Err(MazeError::OutOfBounds {
                    point,
                    size: self.size,
                });
            }
        }
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Number of open passages, each counted once.
    pub fn passage_count(&self) -> usize {
        let ends = self
            .size
            .points()
            .map(|p| self.cells.get(p).count())
            .sum::<usize>();
        ends / 2
    }

    /// Validates the arguments of a carve/fill and returns the neighbour and its reverse direction.
    fn passage_ends(&self, point: Point, direction: Direction) -> Result<(Point, Direction)> {
        let reverse = direction.opposite()?;
        if !self.size.contains(point) {
            return Err(MazeError::OutOfBounds {
                point,
                size: self.size,
            });
        }
        let neighbor = point.step(direction);
        if !self.size.contains(neighbor) {
            return Err(MazeError::NoPassage { point, direction });
        }
        Ok((neighbor, reverse))
    }
}

impl GridReader for Maze {
    fn size(&self) -> Size {
        self.size
    }

    fn start(&self) -> Point {
        self.start
    }

    fn end(&self) -> Point {
        self.end
    }

    fn directions_at(&self, point: Point) -> Direction {
        if self.size.contains(point) {
            self.cells.get(point)
        } else {
            Direction::NONE
        }
    }
}

impl GridCarver for Maze {
    fn carve(&mut self, point: Point, direction: Direction) -> Result<()> {
        let (neighbor, reverse) = self.passage_ends(point, direction)?;
        let here = self.cells.get(point) | direction;
        let there = self.cells.get(neighbor) | reverse;
        self.cells.set(point, here);
        self.cells.set(neighbor, there);
        Ok(())
    }

    fn fill(&mut self, point: Point, direction: Direction) -> Result<()> {
        let (neighbor, reverse) = self.passage_ends(point, direction)?;
        let here = self.cells.get(point) - direction;
        let there = self.cells.get(neighbor) - reverse;
        self.cells.set(point, here);
        self.cells.set(neighbor, there);
        Ok(())
    }
}

/// Checks that every carved passage is carved from both ends and stays inside the maze.
///
/// # Errors
/// [`MazeError::Malformed`] naming the first offending cell.
pub fn check_symmetry<G: GridReader + ?Sized>(grid: &G) -> Result<()> {
    let size = grid.size();
    for point in size.points() {
        for direction in grid.directions_at(point).split() {
            let neighbor = point.step(direction);
            if !size.contains(neighbor) {
                return Err(MazeError::Malformed {
                    point,
                    reason: format!("passage {:?} leaves the maze", direction),
                });
            }
            let reverse = direction.opposite()?;
            if !grid.has_directions(neighbor, reverse) {
                return Err(MazeError::Malformed {
                    point,
                    reason: format!("passage {:?} is not carved back from {}", direction, neighbor),
                });
            }
        }
    }
    Ok(())
}
