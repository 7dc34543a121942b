use serde::{Deserialize, Serialize};

pub type BlockId = u16;

pub const AIR: BlockId = 0;
pub const STONE: BlockId = 1;
pub const DIRT: BlockId = 3;
pub const BEDROCK: BlockId = 7;
pub const WATER: BlockId = 9;
pub const LAVA: BlockId = 11;
pub const TALL_GRASS: BlockId = 31;
pub const DEAD_BUSH: BlockId = 32;
pub const CHEST: BlockId = 54;
pub const SNOW: BlockId = 78;
pub const VINE: BlockId = 106;

/// Identity of an item stack: the material plus its variant data. Two stacks
/// only merge when both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemKind {
    pub block: BlockId,
    pub variant: u16,
}

impl ItemKind {
    pub fn new(block: BlockId, variant: u16) -> Self {
        Self { block, variant }
    }

    pub fn plain(block: BlockId) -> Self {
        Self::new(block, 0)
    }
}
