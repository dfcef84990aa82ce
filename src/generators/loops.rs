use rand::{Rng, seq::IndexedRandom};

use crate::{
    error::{MazeError, Result},
    generators::random_point,
    maze::{Carver, Cursor, GridCarver},
};

/// Attempts allowed per requested passage before giving up on a dense maze.
const ATTEMPTS_PER_WALL: usize = 20;

/// Removes extra walls to introduce loops.
///
/// The budget is `percent` of the cell count, rounded. Each removal opens a
/// wall between a random cell and one of its neighbours it is not yet connected
/// to. Returns how many walls were actually removed, which is lower than the
/// budget only when the grid runs out of walls.
pub fn remove_walls<G: GridCarver + ?Sized, R: Rng>(
    carver: &mut Carver<'_, G>,
    percent: f64,
    rng: &mut R,
) -> Result<usize> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(MazeError::config(format!(
            "wall removal percentage must be within 0..=100, got {}",
            percent
        )));
    }
    let size = carver.grid().size();
    let budget = (size.total_cells() as f64 * percent / 100.0).round() as usize;
    if budget == 0 {
        return Ok(0);
    }

    let mut removed = 0;
    let mut attempts = budget * ATTEMPTS_PER_WALL + size.total_cells();
    while removed < budget && attempts > 0 {
        attempts -= 1;
        let target = random_point(size, rng);
        if carver.current() != target {
            carver.jump_to(target)?;
        }
        let walls = (carver.carvable_directions() - carver.already_carved_directions())
            .split()
            .collect::<Vec<_>>();
        if let Some(&direction) = walls.choose(rng) {
            carver.carve_in_direction(direction)?;
            removed += 1;
        }
    }

    if removed < budget {
        tracing::warn!(
            "[loops] removed {} of {} requested walls, the maze ran out of walls",
            removed,
            budget
        );
    } else {
        tracing::debug!("[loops] removed {} walls", removed);
    }
    Ok(removed)
}
