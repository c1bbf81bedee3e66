//! Entity world and per-tick movement

use quadray4d_core::SparseGrid4D;
use quadray4d_math::Quadray;
use slotmap::SlotMap;

use crate::collision::{CollisionResolver, MoveOutcome};
use crate::entity::{Entity4D, EntityKey};

/// All moving entities, stepped against a shared read-only grid
pub struct EntityWorld {
    /// All entities in the world (using generational keys)
    entities: SlotMap<EntityKey, Entity4D>,
    /// Movement rules applied to every entity
    pub resolver: CollisionResolver,
}

impl Default for EntityWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityWorld {
    /// Create an empty world with the default resolver
    pub fn new() -> Self {
        Self::with_resolver(CollisionResolver::default())
    }

    /// Create an empty world with a custom resolver
    pub fn with_resolver(resolver: CollisionResolver) -> Self {
        Self {
            entities: SlotMap::with_key(),
            resolver,
        }
    }

    /// Add an entity and return its key
    pub fn add_entity(&mut self, entity: Entity4D) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Remove an entity and return it
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity4D> {
        self.entities.remove(key)
    }

    /// Get an immutable reference to an entity by key
    pub fn get(&self, key: EntityKey) -> Option<&Entity4D> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity4D> {
        self.entities.get_mut(key)
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over all entities with their keys
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity4D)> + '_ {
        self.entities.iter()
    }

    /// Move one entity by an explicit displacement
    ///
    /// In-plane first, then across hyperplanes. Returns None for a stale key.
    pub fn move_entity(&mut self, grid: &SparseGrid4D, key: EntityKey, delta: Quadray) -> Option<MoveOutcome> {
        let resolver = self.resolver;
        let entity = self.entities.get_mut(key)?;
        let mut outcome = resolver.move_entity(grid, entity, delta.a, delta.b);
        outcome |= resolver.move_entity_cd(grid, entity, delta.c, delta.d);
        Some(outcome)
    }

    /// Advance every entity by `velocity * dt`
    ///
    /// Entities only read the grid, so the visiting order does not matter.
    /// Velocity along a rejected axis is zeroed.
    pub fn step(&mut self, grid: &SparseGrid4D, dt: f64) {
        let resolver = self.resolver;
        for (_key, entity) in &mut self.entities {
            let delta = entity.velocity * dt;
            let mut outcome = resolver.move_entity(grid, entity, delta.a, delta.b);
            outcome |= resolver.move_entity_cd(grid, entity, delta.c, delta.d);

            if outcome.contains(MoveOutcome::A_BLOCKED) {
                entity.velocity.a = 0.0;
            }
            if outcome.contains(MoveOutcome::B_BLOCKED) {
                entity.velocity.b = 0.0;
            }
            if outcome.contains(MoveOutcome::C_BLOCKED) {
                entity.velocity.c = 0.0;
            }
            if outcome.contains(MoveOutcome::D_BLOCKED) {
                entity.velocity.d = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadray4d_core::{CellType, GridBuilder, WallKind};

    fn room() -> SparseGrid4D {
        GridBuilder::new(6).with_boundary_walls(WallKind::Stone).build()
    }

    #[test]
    fn test_add_and_remove() {
        let mut world = EntityWorld::new();
        let key = world.add_entity(Entity4D::new(Quadray::new(2.5, 2.5, 2.5, 2.5)));
        assert_eq!(world.entity_count(), 1);
        assert!(world.get(key).is_some());

        let removed = world.remove_entity(key);
        assert!(removed.is_some());
        assert!(world.get(key).is_none());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_step_integrates_velocity() {
        let grid = room();
        let mut world = EntityWorld::new();
        let key = world.add_entity(
            Entity4D::new(Quadray::new(2.5, 2.5, 2.5, 2.5)).with_velocity(Quadray::new(1.0, 0.0, 0.0, 0.0)),
        );

        world.step(&grid, 0.5);
        let e = world.get(key).unwrap();
        assert!((e.position.a - 3.0).abs() < 1e-9);
        assert_eq!(e.velocity.a, 1.0);
    }

    #[test]
    fn test_step_stops_at_wall() {
        let grid = room();
        let mut world = EntityWorld::new();
        let key = world.add_entity(
            Entity4D::new(Quadray::new(4.5, 2.5, 2.5, 2.5)).with_velocity(Quadray::new(2.0, 0.0, 0.0, 0.0)),
        );

        for _ in 0..10 {
            world.step(&grid, 0.1);
        }
        let e = world.get(key).unwrap();
        assert!(!grid.is_solid_at(e.position));
        assert!(e.position.a < 5.0);
        assert_eq!(e.velocity.a, 0.0);
    }

    #[test]
    fn test_move_entity_across_planes() {
        let grid = room();
        let mut world = EntityWorld::new();
        let key = world.add_entity(Entity4D::new(Quadray::new(2.5, 2.5, 2.5, 2.5)));

        let outcome = world.move_entity(&grid, key, Quadray::new(0.0, 0.0, 1.0, 3.0));
        assert_eq!(outcome, Some(MoveOutcome::D_BLOCKED));
        let e = world.get(key).unwrap();
        assert_eq!(e.position.c, 3.5);
        assert_eq!(e.position.d, 2.5);
    }

    #[test]
    fn test_move_stale_key() {
        let grid = room();
        let mut world = EntityWorld::new();
        let key = world.add_entity(Entity4D::new(Quadray::new(2.5, 2.5, 2.5, 2.5)));
        world.remove_entity(key);
        assert!(world.move_entity(&grid, key, Quadray::A).is_none());
    }

    #[test]
    fn test_entities_do_not_block_each_other() {
        let grid = GridBuilder::new(6).set(1, 1, 1, 1, CellType::Exit).build();
        let mut world = EntityWorld::new();
        let v = Quadray::new(0.0, 1.0, 0.0, 0.0);
        let a = world.add_entity(Entity4D::new(Quadray::new(2.5, 2.5, 2.5, 2.5)).with_velocity(v));
        let b = world.add_entity(Entity4D::new(Quadray::new(2.5, 2.5, 2.5, 2.5)).with_velocity(v));
        world.step(&grid, 0.25);
        assert_eq!(world.get(a).unwrap().position, world.get(b).unwrap().position);
    }
}
