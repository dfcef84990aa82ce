//! Grid maze generation, junction-graph compression and shortest path search.
//!
//! Data flows one way: [`settings::GenerationSettings`] → carved [`maze::Maze`]
//! → compressed [`graph::Graph`] → [`solvers::ShortestPathResult`] or
//! [`solvers::KShortestPaths`].

pub mod error;
pub mod generators;
pub mod graph;
pub mod maze;
pub mod settings;
pub mod solvers;

pub use error::{MazeError, Result};
