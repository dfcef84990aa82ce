use bitflags::bitflags;

use crate::error::{MazeError, Result};

bitflags! {
    /// Set of axis-aligned directions.
    ///
    /// A cell stores the directions it has been carved towards as one of these
    /// sets. A *single* direction is a set with exactly one bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Direction: u8 {
        /// Towards -x.
        const LEFT = 1 << 0;
        /// Towards +x.
        const RIGHT = 1 << 1;
        /// Towards -y.
        const DOWN = 1 << 2;
        /// Towards +y.
        const UP = 1 << 3;
        /// Towards -z.
        const BACK = 1 << 4;
        /// Towards +z.
        const FORWARD = 1 << 5;
    }
}

impl Direction {
    pub const NONE: Direction = Direction::empty();
    pub const X_AXIS: Direction = Direction::LEFT.union(Direction::RIGHT);
    pub const Y_AXIS: Direction = Direction::DOWN.union(Direction::UP);
    pub const Z_AXIS: Direction = Direction::BACK.union(Direction::FORWARD);
    pub const ALL: Direction = Direction::X_AXIS
        .union(Direction::Y_AXIS)
        .union(Direction::Z_AXIS);

    /// Every single direction, in bit order.
    pub const SINGLES: [Direction; 6] = [
        Direction::LEFT,
        Direction::RIGHT,
        Direction::DOWN,
        Direction::UP,
        Direction::BACK,
        Direction::FORWARD,
    ];

    const AXES: [Direction; 3] = [Direction::X_AXIS, Direction::Y_AXIS, Direction::Z_AXIS];

    /// Returns true when exactly one direction is set.
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// Splits the set into its single directions, in bit order.
    pub fn split(self) -> impl Iterator<Item = Direction> {
        Direction::SINGLES
            .into_iter()
            .filter(move |&d| self.contains(d))
    }

    /// Number of directions in the set.
    pub fn count(self) -> usize {
        self.bits().count_ones() as usize
    }

    pub fn has_all(self, subset: Direction) -> bool {
        self.contains(subset)
    }

    /// Returns the direction pointing the other way.
    ///
    /// Fails with [`MazeError::InvalidArgument`] unless `self` is a single direction.
    pub fn opposite(self) -> Result<Direction> {
        if !self.is_single() {
            return Err(MazeError::InvalidArgument {
                reason: format!("opposite() needs a single direction, got {:?}", self),
            });
        }
        let axis = Direction::AXES
            .into_iter()
            .find(|axis| axis.contains(self))
            .unwrap_or(Direction::NONE);
        Ok(axis.difference(self))
    }

    /// For every axis touched by `self`, the directions of that axis which `self` does not hold.
    ///
    /// A dead end carved only towards `LEFT` yields `RIGHT`; a straight corridor
    /// `LEFT | RIGHT` yields nothing.
    pub fn opposite_flag(self) -> Direction {
        Direction::AXES
            .into_iter()
            .filter(|axis| self.intersects(*axis))
            .fold(Direction::NONE, |acc, axis| {
                acc | axis.difference(self)
            })
    }

    /// Unit step `(dx, dy, dz)` for a single direction, `(0, 0, 0)` otherwise.
    pub fn offset(self) -> (i32, i32, i32) {
        const OFFSETS: [(i32, i32, i32); 6] = [
            (-1, 0, 0),
            (1, 0, 0),
            (0, -1, 0),
            (0, 1, 0),
            (0, 0, -1),
            (0, 0, 1),
        ];
        Direction::SINGLES
            .iter()
            .position(|&d| d == self)
            .map_or((0, 0, 0), |i| OFFSETS[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_in_bit_order() {
        let flag = Direction::UP | Direction::LEFT | Direction::FORWARD;
        let parts = flag.split().collect::<Vec<_>>();
        assert_eq!(
            parts,
            vec![Direction::LEFT, Direction::UP, Direction::FORWARD]
        );
        assert_eq!(Direction::NONE.split().count(), 0);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::LEFT.opposite(), Ok(Direction::RIGHT));
        assert_eq!(Direction::UP.opposite(), Ok(Direction::DOWN));
        assert_eq!(Direction::FORWARD.opposite(), Ok(Direction::BACK));
        for d in Direction::SINGLES {
            assert_eq!(d.opposite().and_then(Direction::opposite), Ok(d));
        }
    }

    #[test]
    fn test_opposite_rejects_composites() {
        assert!(matches!(
            Direction::X_AXIS.opposite(),
            Err(MazeError::InvalidArgument { .. })
        ));
        assert!(Direction::NONE.opposite().is_err());
    }

    #[test]
    fn test_add_remove_and_has_all() {
        let mut flag = Direction::NONE;
        flag.insert(Direction::LEFT);
        flag |= Direction::UP;
        assert!(flag.has_all(Direction::LEFT | Direction::UP));
        flag.remove(Direction::LEFT);
        assert!(!flag.has_all(Direction::LEFT | Direction::UP));
        assert_eq!(flag - Direction::UP, Direction::NONE);
    }

    #[test]
    fn test_opposite_flag() {
        assert_eq!(Direction::LEFT.opposite_flag(), Direction::RIGHT);
        assert_eq!(Direction::X_AXIS.opposite_flag(), Direction::NONE);
        assert_eq!(
            (Direction::LEFT | Direction::UP).opposite_flag(),
            Direction::RIGHT | Direction::DOWN
        );
        assert_eq!(Direction::NONE.opposite_flag(), Direction::NONE);
    }

    #[test]
    fn test_all_mask() {
        assert_eq!(Direction::ALL, Direction::all());
        assert_eq!(Direction::ALL.count(), 6);
    }
}
