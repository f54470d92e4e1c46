pub mod board;
pub use board::{Board, CellChange, ChangeKind, Neighbors, Observer, MAX_WEIGHT};
pub mod cell;
pub use cell::{Cell, CellPoint, CellState, CellWall, WallMask, INFINITE};
