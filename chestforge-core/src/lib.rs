pub mod authorization;
pub mod block;
pub mod config;
pub mod coordinates;
pub mod error;
pub mod orientation;
pub mod providers;
pub mod search;
pub mod stacks;
pub mod validator;
pub mod world;

pub use authorization::{Actor, AuthorizationChain, AuthorizationProvider, Denial};
pub use block::{
    AIR, BEDROCK, BlockId, CHEST, DEAD_BUSH, DIRT, ItemKind, LAVA, SNOW, STONE, TALL_GRASS, VINE,
    WATER,
};
pub use config::{DEFAULT_SEARCH_DISTANCE, SearchConfig};
pub use coordinates::{CellCoord, Point, WorldId};
pub use error::{ConfigError, SearchError, WorldError};
pub use orientation::{CardinalDirection, cardinal_face, front, left, rear, right};
pub use providers::{Claim, LAND_CLAIMS, LandClaims, PROTECTED_REGIONS, ProtectedRegions, Region};
pub use search::{ContainerSize, PlacementResult, PlacementSearch, shell_offsets};
pub use stacks::{DEFAULT_STACK_CAPACITY, ItemStack, consolidate, has_kind, remove_one_unit};
pub use validator::{CellValidator, ReplaceableSet};
pub use world::{World, WorldQuery};
