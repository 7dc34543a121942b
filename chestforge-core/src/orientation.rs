use crate::coordinates::{CellCoord, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    pub fn offset(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::South => (0, 1),
            CardinalDirection::West => (-1, 0),
        }
    }

    pub fn step(self, cell: CellCoord) -> Option<CellCoord> {
        let (dx, dz) = self.offset();
        cell.checked_offset(dx, 0, dz)
    }

    pub fn chest_data(self) -> u8 {
        match self {
            CardinalDirection::North => 0x2,
            CardinalDirection::South => 0x3,
            CardinalDirection::West => 0x4,
            CardinalDirection::East => 0x5,
        }
    }

    pub fn sign_post_data(self) -> u8 {
        match self {
            CardinalDirection::South => 0x0,
            CardinalDirection::West => 0x4,
            CardinalDirection::North => 0x8,
            CardinalDirection::East => 0xC,
        }
    }
}

pub fn normalize_heading(heading: f32) -> f32 {
    heading.rem_euclid(360.0)
}

pub fn cardinal_face(heading: f32) -> CardinalDirection {
    let rot = normalize_heading(heading);
    if (45.0..135.0).contains(&rot) {
        CardinalDirection::East
    } else if (135.0..225.0).contains(&rot) {
        CardinalDirection::South
    } else if (225.0..315.0).contains(&rot) {
        CardinalDirection::West
    } else {
        CardinalDirection::North
    }
}

// The neighbouring cell does not exist at the edge of the coordinate range.
fn relative(point: &Point, turn: f32) -> Option<CellCoord> {
    cardinal_face(point.heading + turn).step(point.cell)
}

pub fn left(point: &Point) -> Option<CellCoord> {
    relative(point, 90.0)
}

pub fn right(point: &Point) -> Option<CellCoord> {
    relative(point, -90.0)
}

pub fn front(point: &Point) -> Option<CellCoord> {
    relative(point, 180.0)
}

pub fn rear(point: &Point) -> Option<CellCoord> {
    relative(point, 0.0)
}
