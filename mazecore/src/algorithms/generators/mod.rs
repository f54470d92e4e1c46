mod depth_first_search;
mod growing_tree;
mod rnd_kruskals;
mod weighted_growth;

pub use depth_first_search::DepthFirstSearch;
pub use growing_tree::{GrowingTree, Pick, RandomPick};
pub use rnd_kruskals::RndKruskals;
pub use weighted_growth::{LightestPick, WeightedGrowth};

use rand::{seq::SliceRandom as _, Rng as _};

use super::Random;
use crate::{dims::Dims, gameboard::Board};

fn random_cell(board: &Board, rng: &mut Random) -> Dims {
    let Dims(rows, columns) = board.size();
    Dims(rng.gen_range(0..rows), rng.gen_range(0..columns))
}

fn choose(cells: &[Dims], rng: &mut Random) -> Option<Dims> {
    cells.choose(rng).copied()
}
