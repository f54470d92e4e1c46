pub mod generators;
pub mod solvers;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{gameboard::Board, maze::MazeError, progress::Progress};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Outcome of a single step of an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A discrete change was applied, more steps follow.
    Continue,
    Done,
}

/// Generation or solving algorithm driven one step at a time.
///
/// Every call applies one discrete change to the board and returns at the point where a
/// visual layer would pause, right after a cell was picked and marked `Visited`.
pub trait MazeAlgorithm: fmt::Debug {
    fn step(&mut self, board: &mut Board, rng: &mut Random) -> Result<Step, MazeError>;

    fn progress(&self) -> Progress;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeneratorKind {
    #[default]
    DepthFirstSearch,
    GrowingTree,
    RndKruskals,
    WeightedGrowth,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 4] = [
        Self::DepthFirstSearch,
        Self::GrowingTree,
        Self::RndKruskals,
        Self::WeightedGrowth,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DepthFirstSearch => "dfs",
            Self::GrowingTree => "growing-tree",
            Self::RndKruskals => "kruskal",
            Self::WeightedGrowth => "weighted",
        }
    }

    pub(crate) fn start(self, board: &mut Board, rng: &mut Random) -> Box<dyn MazeAlgorithm> {
        use generators::*;

        match self {
            Self::DepthFirstSearch => Box::new(DepthFirstSearch::new(board, rng)),
            Self::GrowingTree => Box::new(GrowingTree::<RandomPick>::new(board, rng)),
            Self::RndKruskals => Box::new(RndKruskals::new(board)),
            Self::WeightedGrowth => Box::new(WeightedGrowth::new(board, rng)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SolverKind {
    DepthFirst,
    #[default]
    BreadthFirst,
    Dijkstra,
    AStar,
}

impl SolverKind {
    pub const ALL: [SolverKind; 4] = [
        Self::DepthFirst,
        Self::BreadthFirst,
        Self::Dijkstra,
        Self::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DepthFirst => "dfs",
            Self::BreadthFirst => "bfs",
            Self::Dijkstra => "dijkstra",
            Self::AStar => "astar",
        }
    }

    /// Start and End must be set on the board.
    pub(crate) fn start(self, board: &mut Board) -> Result<Box<dyn MazeAlgorithm>, MazeError> {
        use solvers::*;

        Ok(match self {
            Self::DepthFirst => Box::new(DepthFirst::new(board)?),
            Self::BreadthFirst => Box::new(BreadthFirst::new(board)?),
            Self::Dijkstra => Box::new(DijkstraSolver::new(board)?),
            Self::AStar => Box::new(AStarSolver::new(board)?),
        })
    }
}

macro_rules! impl_kind_text {
    ($kind:ty) => {
        impl fmt::Display for $kind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.name())
            }
        }

        impl FromStr for $kind {
            type Err = UnknownAlgorithm;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim().to_ascii_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|kind| kind.name() == s)
                    .ok_or(UnknownAlgorithm(s))
            }
        }
    };
}

impl_kind_text!(GeneratorKind);
impl_kind_text!(SolverKind);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_their_names() {
        for kind in GeneratorKind::ALL {
            assert_eq!(kind.to_string().parse::<GeneratorKind>(), Ok(kind));
        }
        for kind in SolverKind::ALL {
            assert_eq!(kind.name().parse::<SolverKind>(), Ok(kind));
        }

        assert_eq!(" AStar ".parse::<SolverKind>(), Ok(SolverKind::AStar));
        assert_eq!(
            "prim".parse::<GeneratorKind>(),
            Err(UnknownAlgorithm("prim".to_string()))
        );
    }
}
