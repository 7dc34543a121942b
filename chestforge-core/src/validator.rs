use crate::authorization::{Actor, AuthorizationChain};
use crate::block::BlockId;
use crate::coordinates::CellCoord;
use crate::world::WorldQuery;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceableSet(HashSet<BlockId>);

impl ReplaceableSet {
    pub fn new(blocks: impl IntoIterator<Item = BlockId>) -> Self {
        Self(blocks.into_iter().collect())
    }

    pub fn contains(&self, block: BlockId) -> bool {
        self.0.contains(&block)
    }

    pub fn insert(&mut self, block: BlockId) -> bool {
        self.0.insert(block)
    }
}

impl FromIterator<BlockId> for ReplaceableSet {
    fn from_iter<I: IntoIterator<Item = BlockId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[derive(Debug)]
pub struct CellValidator {
    replaceable: ReplaceableSet,
    chain: AuthorizationChain,
}

impl CellValidator {
    pub fn new(replaceable: ReplaceableSet, chain: AuthorizationChain) -> Self {
        Self { replaceable, chain }
    }

    pub fn replaceable(&self) -> &ReplaceableSet {
        &self.replaceable
    }

    pub fn chain(&self) -> &AuthorizationChain {
        &self.chain
    }

    pub(crate) fn chain_mut(&mut self) -> &mut AuthorizationChain {
        &mut self.chain
    }

    // Occupied cells never reach the permission providers.
    pub fn is_valid_cell<W>(&self, world: &W, actor: &Actor, cell: &CellCoord) -> bool
    where
        W: WorldQuery + ?Sized,
    {
        self.replaceable.contains(world.kind_at(cell)) && self.chain.authorize(actor, cell)
    }
}
