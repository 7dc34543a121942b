use crate::block::BlockId;
use crate::coordinates::{CellCoord, WorldId};
use crate::error::WorldError;
use std::collections::HashMap;

/// Read-only view of block contents, bound to a single world.
pub trait WorldQuery {
    fn world_id(&self) -> WorldId;

    /// Callers only pass cells from `world_id()`.
    fn kind_at(&self, cell: &CellCoord) -> BlockId;
}

/// Sparse in-memory snapshot: every cell holds `default_block` unless
/// explicitly overridden.
#[derive(Debug, Clone)]
pub struct World {
    id: WorldId,
    default_block: BlockId,
    blocks: HashMap<(i32, i32, i32), BlockId>,
}

impl World {
    pub fn new(id: WorldId, default_block: BlockId) -> Self {
        Self {
            id,
            default_block,
            blocks: HashMap::new(),
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn set_block(&mut self, cell: CellCoord, block: BlockId) -> Result<(), WorldError> {
        if cell.world != self.id {
            return Err(WorldError::WrongWorld {
                world: self.id,
                cell,
            });
        }

        let key = (cell.x, cell.y, cell.z);
        if block == self.default_block {
            self.blocks.remove(&key);
        } else {
            self.blocks.insert(key, block);
        }
        Ok(())
    }

    pub fn block_at(&self, cell: &CellCoord) -> Option<BlockId> {
        (cell.world == self.id).then(|| {
            self.blocks
                .get(&(cell.x, cell.y, cell.z))
                .copied()
                .unwrap_or(self.default_block)
        })
    }

    /// Number of cells that differ from the fill block.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl WorldQuery for World {
    fn world_id(&self) -> WorldId {
        self.id
    }

    fn kind_at(&self, cell: &CellCoord) -> BlockId {
        debug_assert_eq!(cell.world, self.id, "queried a cell from another world");
        self.block_at(cell).unwrap_or(self.default_block)
    }
}
