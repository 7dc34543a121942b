//! In-memory land-claim and region-protection providers.

use crate::authorization::{Actor, AuthorizationProvider, Denial};
use crate::coordinates::{CellCoord, WorldId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const LAND_CLAIMS: &str = "land-claims";
pub const PROTECTED_REGIONS: &str = "protected-regions";

/// A claimed column of land spanning every height between two x/z corners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub world: WorldId,
    pub min: (i32, i32),
    pub max: (i32, i32),
    pub owner: Actor,
    #[serde(default)]
    pub container_trust: HashSet<Actor>,
}

impl Claim {
    pub fn new(world: WorldId, corner_a: (i32, i32), corner_b: (i32, i32), owner: Actor) -> Self {
        Self {
            world,
            min: (corner_a.0.min(corner_b.0), corner_a.1.min(corner_b.1)),
            max: (corner_a.0.max(corner_b.0), corner_a.1.max(corner_b.1)),
            owner,
            container_trust: HashSet::new(),
        }
    }

    pub fn trust(mut self, actor: Actor) -> Self {
        self.container_trust.insert(actor);
        self
    }

    pub fn contains(&self, cell: &CellCoord) -> bool {
        cell.world == self.world
            && (self.min.0..=self.max.0).contains(&cell.x)
            && (self.min.1..=self.max.1).contains(&cell.z)
    }

    pub fn allows_containers(&self, actor: &Actor) -> bool {
        *actor == self.owner || self.container_trust.contains(actor)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LandClaims {
    claims: Vec<Claim>,
}

impl LandClaims {
    pub fn new(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    pub fn add(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    pub fn claim_at(&self, cell: &CellCoord) -> Option<&Claim> {
        self.claims.iter().find(|claim| claim.contains(cell))
    }
}

impl AuthorizationProvider for LandClaims {
    fn name(&self) -> &str {
        LAND_CLAIMS
    }

    fn check(&self, actor: &Actor, cell: &CellCoord) -> Result<(), Denial> {
        match self.claim_at(cell) {
            Some(claim) if !claim.allows_containers(actor) => Err(Denial::new(
                LAND_CLAIMS,
                format!("{} does not have {}'s permission to use containers", actor, claim.owner),
            )),
            _ => Ok(()),
        }
    }
}

/// A protected cuboid. Where regions overlap the highest priority wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub world: WorldId,
    pub min: (i32, i32, i32),
    pub max: (i32, i32, i32),
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub members: HashSet<Actor>,
}

impl Region {
    pub fn new(
        name: impl Into<String>,
        world: WorldId,
        corner_a: (i32, i32, i32),
        corner_b: (i32, i32, i32),
    ) -> Self {
        Self {
            name: name.into(),
            world,
            min: (
                corner_a.0.min(corner_b.0),
                corner_a.1.min(corner_b.1),
                corner_a.2.min(corner_b.2),
            ),
            max: (
                corner_a.0.max(corner_b.0),
                corner_a.1.max(corner_b.1),
                corner_a.2.max(corner_b.2),
            ),
            priority: 0,
            members: HashSet::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn member(mut self, actor: Actor) -> Self {
        self.members.insert(actor);
        self
    }

    pub fn contains(&self, cell: &CellCoord) -> bool {
        cell.world == self.world
            && (self.min.0..=self.max.0).contains(&cell.x)
            && (self.min.1..=self.max.1).contains(&cell.y)
            && (self.min.2..=self.max.2).contains(&cell.z)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProtectedRegions {
    regions: Vec<Region>,
}

impl ProtectedRegions {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn add(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Highest-priority region covering `cell`; the first one added wins ties.
    pub fn governing_region(&self, cell: &CellCoord) -> Option<&Region> {
        self.regions
            .iter()
            .filter(|region| region.contains(cell))
            .fold(None, |best: Option<&Region>, region| match best {
                Some(current) if current.priority >= region.priority => Some(current),
                _ => Some(region),
            })
    }

    pub fn can_build(&self, actor: &Actor, cell: &CellCoord) -> bool {
        self.governing_region(cell)
            .is_none_or(|region| region.members.contains(actor))
    }
}

impl AuthorizationProvider for ProtectedRegions {
    fn name(&self) -> &str {
        PROTECTED_REGIONS
    }

    fn check(&self, actor: &Actor, cell: &CellCoord) -> Result<(), Denial> {
        match self.governing_region(cell) {
            Some(region) if !region.members.contains(actor) => Err(Denial::new(
                PROTECTED_REGIONS,
                format!("{} may not build in region {}", actor, region.name),
            )),
            _ => Ok(()),
        }
    }
}
