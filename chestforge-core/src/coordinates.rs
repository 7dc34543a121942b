use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub u32);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world-{}", self.0)
    }
}

/// A single block position. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub world: WorldId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellCoord {
    pub fn new(world: WorldId, x: i32, y: i32, z: i32) -> Self {
        Self { world, x, y, z }
    }

    /// `None` when the shifted cell falls outside the `i32` range.
    pub fn checked_offset(&self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            world: self.world,
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        self.checked_offset(dx, dy, dz)
            .expect("test offsets stay in range")
    }

    /// Unique `world|x|y|z` key for indexing placed containers.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}|{}", self.world, self.x, self.y, self.z)
    }
}

/// A cell together with the facing of whoever stands in it. Pitch is carried
/// along for callers; placement only looks at the heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub cell: CellCoord,
    pub heading: f32,
    pub pitch: f32,
}

impl Point {
    pub fn new(cell: CellCoord, heading: f32, pitch: f32) -> Self {
        Self {
            cell,
            heading,
            pitch,
        }
    }

    pub fn with_cell(&self, cell: CellCoord) -> Self {
        Self { cell, ..*self }
    }
}
