//! Maze generation and solving engine.
//!
//! A [`Maze`] owns a grid of cells and runs one algorithm at a time as a [`Run`], a sequence
//! of discrete steps the caller drives at its own pace. Every mutation of a cell is reported
//! to the observers registered with [`Maze::subscribe`].

pub mod algorithms;
pub mod array;
pub mod dims;
pub mod gameboard;
pub mod maze;
pub mod priority_queue;
pub mod progress;

pub use algorithms::{GeneratorKind, SolverKind};
pub use maze::{Maze, MazeError, MazeState, Run};
