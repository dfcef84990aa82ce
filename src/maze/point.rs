use std::fmt;

use super::Direction;

/// Integer coordinate of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Point { x, y, z }
    }

    /// The neighbouring point one step towards `direction`.
    /// Composite or empty directions return `self` unchanged.
    pub fn step(self, direction: Direction) -> Point {
        let (dx, dy, dz) = direction.offset();
        Point::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Sum of absolute per-axis differences.
    pub fn manhattan(self, other: Point) -> u64 {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)) as u64
    }

    /// Straight-line distance.
    pub fn euclidean(self, other: Point) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        let dz = f64::from(self.z - other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Point {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Point::new(x, y, z)
    }
}

/// Extent of the maze along each axis. Valid points satisfy `0 <= p.axis < size.axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Size {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Size { x, y, z }
    }

    /// A flat maze, one layer deep.
    pub const fn flat(width: i32, height: i32) -> Self {
        Size::new(width, height, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.x <= 0 || self.y <= 0 || self.z <= 0
    }

    pub fn total_cells(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.x as usize * self.y as usize * self.z as usize
    }

    pub fn contains(&self, point: Point) -> bool {
        (0..self.x).contains(&point.x)
            && (0..self.y).contains(&point.y)
            && (0..self.z).contains(&point.z)
    }

    /// The corner opposite the origin.
    pub fn far_corner(&self) -> Point {
        Point::new(self.x - 1, self.y - 1, self.z - 1)
    }

    /// Flattens an in-bounds point into a row-major index (x fastest).
    pub fn ravel_index(&self, point: Point) -> usize {
        (point.z as usize * self.y as usize + point.y as usize) * self.x as usize + point.x as usize
    }

    /// Inverse of [`Size::ravel_index`].
    pub fn unravel_index(&self, index: usize) -> Point {
        let x = index % self.x as usize;
        let rest = index / self.x as usize;
        let y = rest % self.y as usize;
        let z = rest / self.y as usize;
        Point::new(x as i32, y as i32, z as i32)
    }

    /// All points in ravel order.
    pub fn points(self) -> impl Iterator<Item = Point> {
        (0..self.total_cells()).map(move |i| self.unravel_index(i))
    }

    /// In-bounds neighbours of `point` together with the direction leading to them.
    pub fn neighbors(self, point: Point) -> impl Iterator<Item = (Direction, Point)> {
        Direction::SINGLES
            .into_iter()
            .map(move |d| (d, point.step(d)))
            .filter(move |&(_, p)| self.contains(point) && self.contains(p))
    }

    /// Directions from `point` that lead to an in-bounds neighbour.
    pub fn open_directions(&self, point: Point) -> Direction {
        self.neighbors(point)
            .fold(Direction::NONE, |acc, (d, _)| acc | d)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
