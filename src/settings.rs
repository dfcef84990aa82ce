use crate::{
    error::{MazeError, Result},
    generators::{Algorithm, StrategyWeight},
    maze::{Size, StorageKind},
};

/// Everything needed to generate a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub algorithm: Algorithm,
    pub size: Size,
    /// Strategy weights for [`Algorithm::GrowingTree`]; ignored by the other algorithms.
    pub strategies: Vec<StrategyWeight>,
    /// Extra walls to remove after carving, as a percentage of the cell count.
    pub wall_removal_percent: f64,
    /// Put start and end at opposite corners instead of random cells.
    pub doors_at_edge: bool,
    pub storage: StorageKind,
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::RecursiveBacktracker,
            size: Size::flat(10, 10),
            strategies: Vec::new(),
            wall_removal_percent: 0.0,
            doors_at_edge: true,
            storage: StorageKind::Dense,
            seed: None,
        }
    }
}

impl GenerationSettings {
    /// Rejects settings that could not produce a maze.
    pub fn validate(&self) -> Result<()> {
        if self.size.is_empty() {
            return Err(MazeError::config(format!(
                "maze size must be positive on every axis, got {}",
                self.size
            )));
        }
        if !(0.0..=100.0).contains(&self.wall_removal_percent) {
            return Err(MazeError::config(format!(
                "wall removal percentage must be within 0..=100, got {}",
                self.wall_removal_percent
            )));
        }
        if self.algorithm == Algorithm::GrowingTree {
            if self.strategies.is_empty() {
                return Err(MazeError::config(
                    "growing tree needs at least one strategy weight",
                ));
            }
            if self.strategies.iter().all(|s| s.weight == 0) {
                return Err(MazeError::config(
                    "growing tree strategy weights must not all be zero",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::Strategy;

    #[test]
    fn test_default_is_valid() {
        assert!(GenerationSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let empty = GenerationSettings {
            size: Size::new(4, 0, 1),
            ..Default::default()
        };
        assert!(matches!(empty.validate(), Err(MazeError::Config { .. })));

        let too_many_loops = GenerationSettings {
            wall_removal_percent: 101.0,
            ..Default::default()
        };
        assert!(too_many_loops.validate().is_err());

        let nan_loops = GenerationSettings {
            wall_removal_percent: f64::NAN,
            ..Default::default()
        };
        assert!(nan_loops.validate().is_err());

        let growing = GenerationSettings {
            algorithm: Algorithm::GrowingTree,
            ..Default::default()
        };
        assert!(growing.validate().is_err());
        let weighted = GenerationSettings {
            strategies: vec![StrategyWeight::new(Strategy::Middle, 2)],
            ..growing
        };
        assert!(weighted.validate().is_ok());
    }
}
