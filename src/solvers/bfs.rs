use std::collections::{HashMap, VecDeque};

use crate::maze::{GridReader, Point};

/// Breadth-first search over the raw grid; every carved step costs 1.
fn bfs<G: GridReader + ?Sized>(grid: &G, from: Point, to: Option<Point>) -> HashMap<Point, u64> {
    let mut distances = HashMap::new();
    if !grid.size().contains(from) {
        return distances;
    }
    distances.insert(from, 0);
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        if Some(current) == to {
            break;
        }
        let next_distance = distances[&current] + 1;
        for direction in grid.directions_at(current).split() {
            let neighbor = current.step(direction);
            if grid.size().contains(neighbor) && !distances.contains_key(&neighbor) {
                distances.insert(neighbor, next_distance);
                queue.push_back(neighbor);
            }
        }
    }
    distances
}

/// Number of carved steps between two cells, `None` if they are not connected.
pub fn bfs_distance<G: GridReader + ?Sized>(grid: &G, from: Point, to: Point) -> Option<u64> {
    bfs(grid, from, Some(to)).get(&to).copied()
}

/// Number of cells reachable from `from`, itself included.
pub fn reachable_count<G: GridReader + ?Sized>(grid: &G, from: Point) -> usize {
    bfs(grid, from, None).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Direction, GridCarver, Maze, Size, StorageKind};

    #[test]
    fn test_bfs_on_corridor() {
        let size = Size::flat(4, 2);
        let mut maze = Maze::new(size, Point::ORIGIN, Point::new(3, 0, 0), StorageKind::Dense).unwrap();
        for x in 0..3 {
            maze.carve(Point::new(x, 0, 0), Direction::RIGHT).unwrap();
        }
        assert_eq!(bfs_distance(&maze, Point::ORIGIN, Point::new(3, 0, 0)), Some(3));
        assert_eq!(bfs_distance(&maze, Point::ORIGIN, Point::new(0, 1, 0)), None);
        assert_eq!(reachable_count(&maze, Point::ORIGIN), 4);
        assert_eq!(reachable_count(&maze, Point::new(9, 9, 9)), 0);
    }
}
