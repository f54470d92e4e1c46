use serde::{Deserialize, Serialize};

use crate::dims::Dims;

/// Distance value of a cell that no solver has reached yet.
pub const INFINITE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellWall {
    North,
    South,
    East,
    West,
}

impl CellWall {
    pub fn to_coord(&self) -> Dims {
        match self {
            Self::North => Dims(-1, 0),
            Self::South => Dims(1, 0),
            Self::East => Dims(0, 1),
            Self::West => Dims(0, -1),
        }
    }

    pub fn reverse_wall(&self) -> CellWall {
        use CellWall::*;

        match self {
            North => South,
            South => North,
            East => West,
            West => East,
        }
    }

    /// Neighbor scan order shared by every algorithm: up, down, left, right.
    pub fn get_in_order() -> [CellWall; 4] {
        use CellWall::*;
        [North, South, West, East]
    }

    fn bit(self) -> u8 {
        match self {
            Self::North => 1,
            Self::South => 2,
            Self::East => 4,
            Self::West => 8,
        }
    }
}

/// Bitset of the walls a cell still has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallMask(u8);

impl WallMask {
    pub const NONE: WallMask = WallMask(0);
    pub const FULL: WallMask = WallMask(1 | 2 | 4 | 8);

    pub fn has(&self, wall: CellWall) -> bool {
        self.0 & wall.bit() != 0
    }

    pub fn remove(&mut self, wall: CellWall) {
        self.0 &= !wall.bit();
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Number of openings.
    pub fn open_count(&self) -> u32 {
        4 - self.0.count_ones()
    }
}

impl Default for WallMask {
    fn default() -> Self {
        Self::FULL
    }
}

/// Progress marker of generation and solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    None,
    Visiting,
    Visited,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellPoint {
    #[default]
    None,
    Start,
    End,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) coord: Dims,
    pub(crate) weight: u32,
    pub(crate) walls: WallMask,
    pub(crate) state: CellState,
    pub(crate) point: CellPoint,
    pub(crate) distance: u32,
    pub(crate) root_distance: u32,
    pub(crate) manhattan_distance: u32,
    pub(crate) depth: u32,
    pub(crate) group: usize,
    pub(crate) parent: Option<Dims>,
}

impl Cell {
    pub fn new(coord: Dims, weight: u32) -> Cell {
        Cell {
            coord,
            weight,
            walls: WallMask::FULL,
            state: CellState::None,
            point: CellPoint::None,
            distance: INFINITE,
            root_distance: INFINITE,
            manhattan_distance: 0,
            depth: 0,
            group: 0,
            parent: None,
        }
    }

    pub fn remove_wall(&mut self, wall: CellWall) {
        self.walls.remove(wall);
    }

    pub fn has_wall(&self, wall: CellWall) -> bool {
        self.walls.has(wall)
    }

    pub fn get_coord(&self) -> Dims {
        self.coord
    }

    pub fn row(&self) -> i32 {
        self.coord.0
    }

    pub fn column(&self) -> i32 {
        self.coord.1
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn walls(&self) -> WallMask {
        self.walls
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn point(&self) -> CellPoint {
        self.point
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn root_distance(&self) -> u32 {
        self.root_distance
    }

    pub fn manhattan_distance(&self) -> u32 {
        self.manhattan_distance
    }

    /// Depth in the generation tree, counted from the cell the generator started at.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn group(&self) -> usize {
        self.group
    }

    pub fn parent(&self) -> Option<Dims> {
        self.parent
    }
}
