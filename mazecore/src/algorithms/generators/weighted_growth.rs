use super::{GrowingTree, Pick, Random};
use crate::{dims::Dims, gameboard::Board};

/// Lightest cell of the active list, the first one on ties.
///
/// A linear scan per step, there is no heap behind it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightestPick;

impl Pick for LightestPick {
    fn pick(&mut self, active: &[Dims], board: &Board, _: &mut Random) -> usize {
        active
            .iter()
            .enumerate()
            .min_by_key(|&(_, pos)| board.cell(*pos).weight())
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// Prim-like growth ordered by the per-cell weight fixed at board creation.
pub type WeightedGrowth = GrowingTree<LightestPick>;
