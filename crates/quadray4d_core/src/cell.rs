//! Grid cell types
//!
//! Every lattice cell holds one [`CellType`]. Floor is the default and is never
//! stored in the grid; out-of-bounds reads return [`CellType::Boundary`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Material of a wall cell, used by renderers to pick a texture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    #[default]
    Stone,
    Brick,
    Metal,
    Crystal,
    /// Can be removed during play (digging, blasts)
    Destructible,
}

/// Contents of one lattice cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Open space
    #[default]
    Floor,
    /// Level exit, walkable
    Exit,
    /// Solid wall
    Wall(WallKind),
    /// Visible to rays but walkable
    Door,
    /// Implicit wall at and beyond the grid edges
    Boundary,
}

bitflags! {
    /// Derived properties of a cell type
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Blocks movement and line of sight
        const SOLID = 1 << 0;
        /// Stops a render ray
        const VISIBLE = 1 << 1;
        /// Blocks light for shading purposes
        const OPAQUE = 1 << 2;
        /// Can be used by the player (doors, exits)
        const INTERACTIVE = 1 << 3;
        /// Can be cleared by gameplay
        const DESTRUCTIBLE = 1 << 4;
    }
}

impl CellType {
    /// Ordinal of the wall tier; anything at or above it is solid unless it is a door
    pub const WALL_ORDINAL: u8 = 2;

    /// Shorthand for a stone wall
    pub const WALL: Self = CellType::Wall(WallKind::Stone);

    /// Position of this variant in the cell ordering
    pub fn ordinal(self) -> u8 {
        match self {
            CellType::Floor => 0,
            CellType::Exit => 1,
            CellType::Wall(_) => 2,
            CellType::Door => 3,
            CellType::Boundary => 4,
        }
    }

    /// Whether this cell blocks movement and sight
    #[inline]
    pub fn is_solid(self) -> bool {
        self.ordinal() >= Self::WALL_ORDINAL && self != CellType::Door
    }

    /// Whether this is the default cell that the grid does not store
    #[inline]
    pub fn is_floor(self) -> bool {
        self == CellType::Floor
    }

    /// Properties of this cell type
    pub fn flags(self) -> CellFlags {
        match self {
            CellType::Floor => CellFlags::empty(),
            CellType::Exit => CellFlags::VISIBLE | CellFlags::INTERACTIVE,
            CellType::Wall(WallKind::Destructible) => {
                CellFlags::SOLID | CellFlags::VISIBLE | CellFlags::OPAQUE | CellFlags::DESTRUCTIBLE
            }
            CellType::Wall(_) | CellType::Boundary => {
                CellFlags::SOLID | CellFlags::VISIBLE | CellFlags::OPAQUE
            }
            CellType::Door => CellFlags::VISIBLE | CellFlags::OPAQUE | CellFlags::INTERACTIVE,
        }
    }
}
