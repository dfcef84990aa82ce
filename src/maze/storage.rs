use std::{collections::HashMap, str::FromStr};

use super::{Direction, Point, Size};
use crate::error::MazeError;

/// Backing store holding one direction set per cell.
///
/// Callers only pass in-bounds points; bounds are checked by [`super::Maze`].
pub trait CellStore {
    fn get(&self, point: Point) -> Direction;
    fn set(&mut self, point: Point, directions: Direction);
}

/// Flat boxed slice, one entry per cell, indexed in ravel order.
pub struct DenseCells {
    data: Box<[Direction]>,
    size: Size,
}

impl DenseCells {
    pub fn new(size: Size) -> Self {
        DenseCells {
            data: vec![Direction::NONE; size.total_cells()].into_boxed_slice(),
            size,
        }
    }
}

impl CellStore for DenseCells {
    fn get(&self, point: Point) -> Direction {
        self.data[self.size.ravel_index(point)]
    }

    fn set(&mut self, point: Point, directions: Direction) {
        let idx = self.size.ravel_index(point);
        self.data[idx] = directions;
    }
}

/// Hash map keyed by point. Cheaper than [`DenseCells`] when most of a large
/// bounding box is never touched.
pub struct SparseCells {
    data: HashMap<Point, Direction>,
}

impl SparseCells {
    pub fn new(size: Size) -> Self {
        SparseCells {
            data: size.points().map(|p| (p, Direction::NONE)).collect(),
        }
    }
}

impl CellStore for SparseCells {
    fn get(&self, point: Point) -> Direction {
        self.data.get(&point).copied().unwrap_or(Direction::NONE)
    }

    fn set(&mut self, point: Point, directions: Direction) {
        self.data.insert(point, directions);
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    #[default]
    Dense,
    Sparse,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Dense => write!(f, "dense"),
            StorageKind::Sparse => write!(f, "sparse"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" | "array" => Ok(StorageKind::Dense),
            "sparse" | "map" => Ok(StorageKind::Sparse),
            other => Err(MazeError::config(format!("unknown storage kind '{}'", other))),
        }
    }
}

/// Storage backend chosen at allocation time.
pub enum CellStorage {
    Dense(DenseCells),
    Sparse(SparseCells),
}

impl CellStorage {
    pub fn allocate(kind: StorageKind, size: Size) -> Self {
        match kind {
            StorageKind::Dense => CellStorage::Dense(DenseCells::new(size)),
            StorageKind::Sparse => CellStorage::Sparse(SparseCells::new(size)),
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self {
            CellStorage::Dense(_) => StorageKind::Dense,
            CellStorage::Sparse(_) => StorageKind::Sparse,
        }
    }
}

impl CellStore for CellStorage {
    fn get(&self, point: Point) -> Direction {
        match self {
            CellStorage::Dense(cells) => cells.get(point),
            CellStorage::Sparse(cells) => cells.get(point),
        }
    }

    fn set(&mut self, point: Point, directions: Direction) {
        match self {
            CellStorage::Dense(cells) => cells.set(point, directions),
            CellStorage::Sparse(cells) => cells.set(point, directions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backends_agree() {
        let size = Size::new(3, 2, 2);
        for kind in [StorageKind::Dense, StorageKind::Sparse] {
            let mut cells = CellStorage::allocate(kind, size);
            assert_eq!(cells.kind(), kind);
            assert!(size.points().all(|p| cells.get(p) == Direction::NONE));
            cells.set(Point::new(2, 1, 1), Direction::LEFT | Direction::DOWN);
            assert_eq!(
                cells.get(Point::new(2, 1, 1)),
                Direction::LEFT | Direction::DOWN
            );
            assert_eq!(cells.get(Point::new(1, 1, 1)), Direction::NONE);
        }
    }

    #[test]
    fn test_parse_storage_kind() {
        assert_eq!("Sparse".parse::<StorageKind>(), Ok(StorageKind::Sparse));
        assert!(matches!(
            "tape".parse::<StorageKind>(),
            Err(MazeError::Config { .. })
        ));
    }
}
