use rand::{Rng, seq::SliceRandom};

use crate::{
    error::Result,
    maze::{Carver, Cursor, Direction, GridCarver, Point},
};

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        // Iterative with path halving, recursion would overflow on long chains
        let mut x = x;
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Randomized Kruskal's: open shuffled walls whenever they join two separate regions.
pub fn randomized_kruskal<G: GridCarver + ?Sized, R: Rng>(
    carver: &mut Carver<'_, G>,
    rng: &mut R,
) -> Result<()> {
    let size = carver.grid().size();
    if size.is_empty() {
        return Ok(());
    }

    // Each wall is listed once, from the cell on its negative side
    let mut walls: Vec<(Point, Direction)> = size
        .points()
        .flat_map(|p| {
            [Direction::RIGHT, Direction::UP, Direction::FORWARD]
                .into_iter()
                .filter(move |&d| size.contains(p.step(d)))
                .map(move |d| (p, d))
        })
        .collect();
    walls.shuffle(rng);

    let mut regions = UnionFind::new(size.total_cells());
    for (point, direction) in walls {
        let here = size.ravel_index(point);
        let there = size.ravel_index(point.step(direction));
        if regions.unite(here, there) {
            if carver.current() != point {
                carver.jump_to(point)?;
            }
            carver.carve_in_direction(direction)?;
        }
    }

    tracing::debug!(
        "[kruskal] carved {} passages",
        carver.log().carve_events.len()
    );
    Ok(())
}
