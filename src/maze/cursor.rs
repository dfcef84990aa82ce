use std::collections::HashMap;

use super::{Direction, GridCarver, GridReader, Point};
use crate::error::{MazeError, Result};

/// A position over a grid that can be moved around.
pub trait Cursor {
    type Grid: GridReader + ?Sized;

    fn grid(&self) -> &Self::Grid;
    fn current(&self) -> Point;

    /// Teleports to `point`.
    fn jump_to(&mut self, point: Point) -> Result<()>;

    /// Moves one step towards `direction` and returns the new position.
    fn jump_in_direction(&mut self, direction: Direction) -> Result<Point>;

    fn directions_at_current(&self) -> Direction {
        self.grid().directions_at(self.current())
    }
}

fn checked_jump<G: GridReader + ?Sized>(grid: &G, point: Point) -> Result<Point> {
    let size = grid.size();
    if size.contains(point) {
        Ok(point)
    } else {
        Err(MazeError::OutOfBounds { point, size })
    }
}

/// Read-only cursor that only walks through carved passages.
pub struct Jumper<'a, G: GridReader + ?Sized> {
    grid: &'a G,
    current: Point,
}

impl<'a, G: GridReader + ?Sized> Jumper<'a, G> {
    /// Places a new cursor on the maze's start cell.
    pub fn new(grid: &'a G) -> Self {
        Jumper {
            current: grid.start(),
            grid,
        }
    }
}

impl<G: GridReader + ?Sized> Cursor for Jumper<'_, G> {
    type Grid = G;

    fn grid(&self) -> &G {
        self.grid
    }

    fn current(&self) -> Point {
        self.current
    }

    fn jump_to(&mut self, point: Point) -> Result<()> {
        self.current = checked_jump(self.grid, point)?;
        Ok(())
    }

    fn jump_in_direction(&mut self, direction: Direction) -> Result<Point> {
        if !direction.is_single() || !self.grid.has_directions(self.current, direction) {
            return Err(MazeError::NoPassage {
                point: self.current,
                direction,
            });
        }
        self.current = checked_jump(self.grid, self.current.step(direction))?;
        Ok(self.current)
    }
}

/// Whether a [`Carver`] may mutate the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Moves are bounded by the grid size only; carve/fill are allowed.
    #[default]
    Carving,
    /// Moves follow carved passages; carve/fill are rejected.
    Jumping,
}

/// A passage opened during generation, recorded from the cell it was carved out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarveEvent {
    pub point: Point,
    pub direction: Direction,
}

/// Diagnostics collected by a [`Carver`]: every carve in order plus visits per cell.
///
/// A visit is one move of the cursor onto a cell, by a jump or a step.
#[derive(Debug, Default, Clone)]
pub struct GenerationLog {
    pub carve_events: Vec<CarveEvent>,
    pub heatmap: HashMap<Point, u32>,
}

impl GenerationLog {
    pub fn visits(&self, point: Point) -> u32 {
        self.heatmap.get(&point).copied().unwrap_or(0)
    }
}

/// Cursor that mutates the grid it walks over.
pub struct Carver<'a, G: GridCarver + ?Sized> {
    grid: &'a mut G,
    current: Point,
    mode: CursorMode,
    log: GenerationLog,
}

impl<'a, G: GridCarver + ?Sized> Carver<'a, G> {
    /// Places a new carving cursor on the maze's start cell.
    pub fn new(grid: &'a mut G) -> Self {
        Carver {
            current: grid.start(),
            grid,
            mode: CursorMode::Carving,
            log: GenerationLog::default(),
        }
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CursorMode) {
        self.mode = mode;
    }

    /// Returns true if a single step towards `direction` stays inside the grid.
    pub fn can_move(&self, direction: Direction) -> bool {
        direction.is_single() && self.grid.size().contains(self.current.step(direction))
    }

    /// All directions from the current cell that lead to an in-bounds neighbour.
    pub fn carvable_directions(&self) -> Direction {
        self.grid.size().open_directions(self.current)
    }

    /// Directions already carved out of the current cell.
    pub fn already_carved_directions(&self) -> Direction {
        self.grid.directions_at(self.current)
    }

    /// Directions carved out of the neighbour towards `direction`, without moving.
    pub fn carved_directions_towards(&self, direction: Direction) -> Direction {
        self.grid.directions_at(self.current.step(direction))
    }

    /// Opens the passage towards `direction` from the current cell.
    pub fn carve_in_direction(&mut self, direction: Direction) -> Result<()> {
        self.ensure_carving()?;
        self.grid.carve(self.current, direction)?;
        self.log.carve_events.push(CarveEvent {
            point: self.current,
            direction,
        });
        Ok(())
    }

    /// Closes the passage towards `direction` from the current cell.
    pub fn fill_in_direction(&mut self, direction: Direction) -> Result<()> {
        self.ensure_carving()?;
        self.grid.fill(self.current, direction)
    }

    /// Stops carving and hands back what was recorded.
    pub fn finish(self) -> GenerationLog {
        self.log
    }

    pub fn log(&self) -> &GenerationLog {
        &self.log
    }

    fn ensure_carving(&self) -> Result<()> {
        match self.mode {
            CursorMode::Carving => Ok(()),
            CursorMode::Jumping => Err(MazeError::usage(
                "cannot mutate the grid while the cursor is in jumping mode",
            )),
        }
    }

    fn land(&mut self, point: Point) {
        self.current = point;
        *self.log.heatmap.entry(point).or_insert(0) += 1;
    }
}

impl<G: GridCarver + ?Sized> Cursor for Carver<'_, G> {
    type Grid = G;

    fn grid(&self) -> &G {
        &*self.grid
    }

    fn current(&self) -> Point {
        self.current
    }

    fn jump_to(&mut self, point: Point) -> Result<()> {
        let point = checked_jump(&*self.grid, point)?;
        self.land(point);
        Ok(())
    }

    fn jump_in_direction(&mut self, direction: Direction) -> Result<Point> {
        let allowed = match self.mode {
            CursorMode::Carving => self.can_move(direction),
            CursorMode::Jumping => {
                direction.is_single() && self.grid.has_directions(self.current, direction)
            }
        };
        if !allowed {
            return Err(MazeError::NoPassage {
                point: self.current,
                direction,
            });
        }
        let point = checked_jump(&*self.grid, self.current.step(direction))?;
        self.land(point);
        Ok(point)
    }
}
