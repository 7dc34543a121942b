use crate::authorization::{Actor, AuthorizationChain, AuthorizationProvider};
use crate::config::SearchConfig;
use crate::coordinates::{CellCoord, Point};
use crate::error::{ConfigError, SearchError};
use crate::orientation::{CardinalDirection, cardinal_face, left};
use crate::validator::{CellValidator, ReplaceableSet};
use crate::world::WorldQuery;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    Single,
    Double,
}

impl ContainerSize {
    // Double containers only try the diagonal mirror on an axis.
    fn reflections(self, x: i32, z: i32) -> Vec<(i32, i32)> {
        if x == 0 && z == 0 {
            return vec![(0, 0)];
        }
        match self {
            ContainerSize::Single => vec![(x, z), (-x, z), (-x, -z), (x, -z)],
            ContainerSize::Double if x == 0 || z == 0 => vec![(x, z), (-x, -z)],
            ContainerSize::Double => vec![(x, z), (-x, -z), (-x, z), (x, -z)],
        }
    }
}

/// Offsets `(dx, dy, dz)` from the origin in the order they are tested:
/// origin level first and upwards, then x, then z, then the reflections.
/// The extent of each axis is at least one so the origin is always visited.
pub fn shell_offsets(size: ContainerSize, radius: i32) -> impl Iterator<Item = (i32, i32, i32)> {
    let extent = radius.max(1);
    (0..extent).flat_map(move |y| {
        (0..extent).flat_map(move |x| {
            (0..extent).flat_map(move |z| {
                size.reflections(x, z)
                    .into_iter()
                    .map(move |(dx, dz)| (dx, y, dz))
            })
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementResult {
    Found {
        primary: CellCoord,
        secondary: Option<CellCoord>,
        facing: CardinalDirection,
    },
    NotFound {
        fallback: CellCoord,
    },
}

impl PlacementResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PlacementResult::Found { .. })
    }

    pub fn cell(&self) -> CellCoord {
        match self {
            PlacementResult::Found { primary, .. } => *primary,
            PlacementResult::NotFound { fallback } => *fallback,
        }
    }

    pub fn secondary(&self) -> Option<CellCoord> {
        match self {
            PlacementResult::Found { secondary, .. } => *secondary,
            PlacementResult::NotFound { .. } => None,
        }
    }

    pub fn facing(&self) -> Option<CardinalDirection> {
        match self {
            PlacementResult::Found { facing, .. } => Some(*facing),
            PlacementResult::NotFound { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct PlacementSearch {
    config: SearchConfig,
    validator: CellValidator,
}

impl PlacementSearch {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let replaceable: ReplaceableSet = config.replaceable_blocks.iter().copied().collect();
        Ok(Self {
            validator: CellValidator::new(replaceable, AuthorizationChain::new()),
            config,
        })
    }

    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: AuthorizationProvider + Send + Sync + 'static,
    {
        let enabled = self.config.provider_enabled(provider.name());
        self.validator.chain_mut().push(provider, enabled);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn validator(&self) -> &CellValidator {
        &self.validator
    }

    pub fn find<W>(
        &self,
        world: &W,
        actor: &Actor,
        origin: &Point,
        size: ContainerSize,
    ) -> Result<PlacementResult, SearchError>
    where
        W: WorldQuery + ?Sized,
    {
        let radius = self.config.search_distance;
        match size {
            ContainerSize::Single => self.find_single(world, actor, origin, radius),
            ContainerSize::Double => self.find_double(world, actor, origin, radius),
        }
    }

    pub fn find_single<W>(
        &self,
        world: &W,
        actor: &Actor,
        origin: &Point,
        radius: i32,
    ) -> Result<PlacementResult, SearchError>
    where
        W: WorldQuery + ?Sized,
    {
        self.check_preconditions(world, origin, radius)?;
        tracing::debug!(
            actor = %actor,
            origin = %origin.cell,
            radius,
            "searching for single placement"
        );

        let found = shell_offsets(ContainerSize::Single, radius)
            .filter_map(|(dx, dy, dz)| origin.cell.checked_offset(dx, dy, dz))
            .find(|cell| self.validator.is_valid_cell(world, actor, cell))
            .map(|cell| (cell, None));

        Ok(self.conclude(origin, found))
    }

    /// The cell left of each candidate must also be valid, with "left" taken
    /// from the origin heading.
    pub fn find_double<W>(
        &self,
        world: &W,
        actor: &Actor,
        origin: &Point,
        radius: i32,
    ) -> Result<PlacementResult, SearchError>
    where
        W: WorldQuery + ?Sized,
    {
        self.check_preconditions(world, origin, radius)?;
        tracing::debug!(
            actor = %actor,
            origin = %origin.cell,
            radius,
            "searching for double placement"
        );

        let found = shell_offsets(ContainerSize::Double, radius)
            .filter_map(|(dx, dy, dz)| origin.cell.checked_offset(dx, dy, dz))
            .find_map(|cell| {
                if !self.validator.is_valid_cell(world, actor, &cell) {
                    return None;
                }
                let beside = left(&origin.with_cell(cell))?;
                self.validator
                    .is_valid_cell(world, actor, &beside)
                    .then_some((cell, Some(beside)))
            });

        Ok(self.conclude(origin, found))
    }

    fn check_preconditions<W>(
        &self,
        world: &W,
        origin: &Point,
        radius: i32,
    ) -> Result<(), SearchError>
    where
        W: WorldQuery + ?Sized,
    {
        if radius < 0 {
            return Err(SearchError::NegativeRadius(radius));
        }
        let expected = world.world_id();
        if origin.cell.world != expected {
            return Err(SearchError::WorldMismatch {
                expected,
                found: origin.cell.world,
            });
        }
        Ok(())
    }

    fn conclude(
        &self,
        origin: &Point,
        found: Option<(CellCoord, Option<CellCoord>)>,
    ) -> PlacementResult {
        let result = match found {
            Some((primary, secondary)) => PlacementResult::Found {
                primary,
                secondary,
                facing: cardinal_face(origin.heading),
            },
            None => PlacementResult::NotFound {
                fallback: origin.cell,
            },
        };

        if self.config.debug {
            tracing::info!(origin = %origin.cell, ?result, "placement search finished");
        } else {
            tracing::debug!(origin = %origin.cell, ?result, "placement search finished");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::Denial;
    use crate::block::{AIR, STONE};
    use crate::coordinates::WorldId;
    use crate::providers::{Claim, LAND_CLAIMS, LandClaims};
    use crate::world::World;
    use std::collections::HashSet;

    const WORLD: WorldId = WorldId(0);

    fn origin(heading: f32) -> Point {
        Point::new(CellCoord::new(WORLD, 0, 64, 0), heading, 0.0)
    }

    fn search() -> PlacementSearch {
        PlacementSearch::new(SearchConfig::default()).unwrap()
    }

    fn open_world() -> World {
        World::new(WORLD, AIR)
    }

    /// Solid everywhere except the listed offsets from the default origin.
    fn solid_world_with_air_at(offsets: &[(i32, i32, i32)]) -> World {
        let mut world = World::new(WORLD, STONE);
        for &(dx, dy, dz) in offsets {
            world
                .set_block(origin(0.0).cell.offset(dx, dy, dz), AIR)
                .unwrap();
        }
        world
    }

    fn actor() -> Actor {
        Actor::new("steve")
    }

    #[test]
    fn single_shell_order() {
        let level: Vec<(i32, i32, i32)> =
            shell_offsets(ContainerSize::Single, 2).take(13).collect();
        assert_eq!(
            level,
            vec![
                (0, 0, 0),
                (0, 0, 1),
                (0, 0, 1),
                (0, 0, -1),
                (0, 0, -1),
                (1, 0, 0),
                (-1, 0, 0),
                (-1, 0, 0),
                (1, 0, 0),
                (1, 0, 1),
                (-1, 0, 1),
                (-1, 0, -1),
                (1, 0, -1),
            ]
        );
        assert_eq!(shell_offsets(ContainerSize::Single, 2).count(), 26);
        assert_eq!(shell_offsets(ContainerSize::Single, 2).nth(13), Some((0, 1, 0)));
    }

    #[test]
    fn double_shell_order() {
        let level: Vec<(i32, i32, i32)> = shell_offsets(ContainerSize::Double, 2).take(9).collect();
        assert_eq!(
            level,
            vec![
                (0, 0, 0),
                (0, 0, 1),
                (0, 0, -1),
                (1, 0, 0),
                (-1, 0, 0),
                (1, 0, 1),
                (-1, 0, -1),
                (-1, 0, 1),
                (1, 0, -1),
            ]
        );
        assert_eq!(shell_offsets(ContainerSize::Double, 2).count(), 18);
    }

    #[test]
    fn shells_cover_the_same_cells() {
        // On the axes the skipped double reflections are duplicates.
        let single: HashSet<_> = shell_offsets(ContainerSize::Single, 4).collect();
        let double: HashSet<_> = shell_offsets(ContainerSize::Double, 4).collect();
        assert_eq!(single, double);
        assert_eq!(double.len(), shell_offsets(ContainerSize::Double, 4).count());
    }

    #[test]
    fn zero_radius_only_tests_origin() {
        let offsets: Vec<_> = shell_offsets(ContainerSize::Single, 0).collect();
        assert_eq!(offsets, vec![(0, 0, 0)]);

        let start = origin(30.0);
        let found = search().find_single(&open_world(), &actor(), &start, 0).unwrap();
        assert_eq!(
            found,
            PlacementResult::Found {
                primary: start.cell,
                secondary: None,
                facing: CardinalDirection::North,
            }
        );

        let blocked = solid_world_with_air_at(&[(0, 0, -1)]);
        let missed = search().find_single(&blocked, &actor(), &start, 0).unwrap();
        assert_eq!(missed, PlacementResult::NotFound { fallback: start.cell });
    }

    #[test]
    fn open_world_places_at_origin() {
        for radius in 0..4 {
            let result = search()
                .find_single(&open_world(), &actor(), &origin(100.0), radius)
                .unwrap();
            assert_eq!(result.cell(), origin(100.0).cell);
            assert_eq!(result.facing(), Some(CardinalDirection::East));
        }
    }

    #[test]
    fn finds_free_cell_north_of_blocked_origin() {
        let world = solid_world_with_air_at(&[(0, 0, -1)]);
        let result = search().find_single(&world, &actor(), &origin(0.0), 2).unwrap();

        assert_eq!(result.cell(), origin(0.0).cell.offset(0, 0, -1));
        assert_eq!(result.secondary(), None);
        assert_eq!(result.facing(), Some(CardinalDirection::North));
    }

    #[test]
    fn prefers_origin_level_before_climbing() {
        let world = solid_world_with_air_at(&[(0, 1, 0), (1, 0, 1)]);
        let result = search().find_single(&world, &actor(), &origin(0.0), 2).unwrap();
        assert_eq!(result.cell(), origin(0.0).cell.offset(1, 0, 1));

        let world = solid_world_with_air_at(&[(0, 1, 0)]);
        let result = search().find_single(&world, &actor(), &origin(0.0), 2).unwrap();
        assert_eq!(result.cell(), origin(0.0).cell.offset(0, 1, 0));
    }

    #[test]
    fn exhausted_search_falls_back_to_origin() {
        let world = solid_world_with_air_at(&[(3, 0, 0)]);
        let start = origin(0.0);

        let single = search().find_single(&world, &actor(), &start, 3).unwrap();
        assert_eq!(single, PlacementResult::NotFound { fallback: start.cell });
        assert!(!single.is_found());

        let double = search().find_double(&world, &actor(), &start, 3).unwrap();
        assert_eq!(double, PlacementResult::NotFound { fallback: start.cell });
    }

    #[test]
    fn edge_of_range_origin_is_not_found() {
        let start = Point::new(CellCoord::new(WORLD, i32::MAX, 64, i32::MIN), 0.0, 0.0);
        let world = World::new(WORLD, STONE);

        let single = search().find_single(&world, &actor(), &start, 2).unwrap();
        assert_eq!(single, PlacementResult::NotFound { fallback: start.cell });

        let double = search().find_double(&world, &actor(), &start, 2).unwrap();
        assert_eq!(double, PlacementResult::NotFound { fallback: start.cell });
    }

    #[test]
    fn edge_of_range_skips_missing_cells() {
        // Heading north, left is +x, which does not exist at i32::MAX.
        let start = Point::new(CellCoord::new(WORLD, i32::MAX, 64, 0), 0.0, 0.0);
        let world = World::new(WORLD, AIR);

        let single = search().find_single(&world, &actor(), &start, 2).unwrap();
        assert_eq!(single.cell(), start.cell);

        let double = search().find_double(&world, &actor(), &start, 2).unwrap();
        assert_eq!(
            double,
            PlacementResult::Found {
                primary: start.cell.offset(-1, 0, 0),
                secondary: Some(start.cell),
                facing: CardinalDirection::North,
            }
        );
    }

    #[test]
    fn rejects_negative_radius() {
        let err = search()
            .find_single(&open_world(), &actor(), &origin(0.0), -1)
            .unwrap_err();
        assert_eq!(err, SearchError::NegativeRadius(-1));
        assert!(search().find_double(&open_world(), &actor(), &origin(0.0), -3).is_err());
    }

    #[test]
    fn rejects_origin_in_other_world() {
        let elsewhere = Point::new(CellCoord::new(WorldId(7), 0, 64, 0), 0.0, 0.0);
        let err = search()
            .find_double(&open_world(), &actor(), &elsewhere, 2)
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::WorldMismatch {
                expected: WORLD,
                found: WorldId(7),
            }
        );
    }

    #[test]
    fn double_pairs_with_left_cell() {
        let north = search().find_double(&open_world(), &actor(), &origin(0.0), 2).unwrap();
        assert_eq!(
            north,
            PlacementResult::Found {
                primary: origin(0.0).cell,
                secondary: Some(origin(0.0).cell.offset(1, 0, 0)),
                facing: CardinalDirection::North,
            }
        );

        let east = search().find_double(&open_world(), &actor(), &origin(90.0), 2).unwrap();
        assert_eq!(east.secondary(), Some(origin(0.0).cell.offset(0, 0, 1)));
        assert_eq!(east.facing(), Some(CardinalDirection::East));
    }

    #[test]
    fn double_skips_candidates_without_free_neighbour() {
        // The origin is free but its left neighbour (1, 0, 0) is stone.
        let world = solid_world_with_air_at(&[(0, 0, 0), (0, 0, 1), (1, 0, 1)]);
        let result = search().find_double(&world, &actor(), &origin(0.0), 2).unwrap();

        assert_eq!(result.cell(), origin(0.0).cell.offset(0, 0, 1));
        assert_eq!(result.secondary(), Some(origin(0.0).cell.offset(1, 0, 1)));

        let single = search().find_single(&world, &actor(), &origin(0.0), 2).unwrap();
        assert_eq!(single.cell(), origin(0.0).cell);
    }

    #[test]
    fn double_neighbour_follows_origin_heading() {
        // Facing west, left is north: the neighbour of (1, 0, 0) is (1, 0, -1).
        let world = solid_world_with_air_at(&[(1, 0, 0), (1, 0, -1)]);
        let result = search().find_double(&world, &actor(), &origin(270.0), 2).unwrap();

        assert_eq!(result.cell(), origin(0.0).cell.offset(1, 0, 0));
        assert_eq!(result.secondary(), Some(origin(0.0).cell.offset(1, 0, -1)));
        assert_eq!(result.facing(), Some(CardinalDirection::West));
    }

    #[test]
    fn claims_push_placement_outside() {
        let claim = Claim::new(WORLD, (0, 0), (0, 0), Actor::new("alex"));
        let search = search().with_provider(LandClaims::new(vec![claim.clone()]));

        let result = search.find_single(&open_world(), &actor(), &origin(0.0), 2).unwrap();
        assert_eq!(result.cell(), origin(0.0).cell.offset(0, 0, 1));

        let owner = search
            .find_single(&open_world(), &Actor::new("alex"), &origin(0.0), 2)
            .unwrap();
        assert_eq!(owner.cell(), origin(0.0).cell);

        let mut config = SearchConfig::default();
        config.set_provider_enabled(LAND_CLAIMS, false);
        let ignoring = PlacementSearch::new(config)
            .unwrap()
            .with_provider(LandClaims::new(vec![claim]));
        let result = ignoring
            .find_single(&open_world(), &actor(), &origin(0.0), 2)
            .unwrap();
        assert_eq!(result.cell(), origin(0.0).cell);
    }

    #[test]
    fn denial_everywhere_is_not_found() {
        struct Nowhere;

        impl AuthorizationProvider for Nowhere {
            fn name(&self) -> &str {
                "nowhere"
            }

            fn check(&self, _actor: &Actor, _cell: &CellCoord) -> Result<(), Denial> {
                Err(Denial::new("nowhere", "closed"))
            }
        }

        let search = search().with_provider(Nowhere);
        let result = search.find(&open_world(), &actor(), &origin(0.0), ContainerSize::Single);
        assert_eq!(
            result,
            Ok(PlacementResult::NotFound {
                fallback: origin(0.0).cell
            })
        );
    }

    #[test]
    fn find_uses_configured_distance() {
        let config = SearchConfig {
            search_distance: 0,
            ..SearchConfig::default()
        };
        let search = PlacementSearch::new(config).unwrap();
        let world = solid_world_with_air_at(&[(0, 0, 1)]);

        let result = search
            .find(&world, &actor(), &origin(0.0), ContainerSize::Single)
            .unwrap();
        assert!(!result.is_found());

        let wider = PlacementSearch::new(SearchConfig::default()).unwrap();
        let result = wider
            .find(&world, &actor(), &origin(0.0), ContainerSize::Single)
            .unwrap();
        assert_eq!(result.cell(), origin(0.0).cell.offset(0, 0, 1));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SearchConfig {
            search_distance: -2,
            ..SearchConfig::default()
        };
        assert!(matches!(
            PlacementSearch::new(config),
            Err(ConfigError::Invalid(_))
        ));
    }
}
