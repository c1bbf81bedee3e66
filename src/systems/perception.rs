//! Line-of-sight system
//!
//! Answers which entities the player can see through the 4D grid.

use quadray4d_core::{LineOfSight, Quadray};
use quadray4d_physics::EntityKey;

use crate::config::PerceptionConfig;
use crate::scene::Scene;

/// Visibility queries from the player to every other entity
pub struct PerceptionSystem {
    sight: LineOfSight,
}

impl PerceptionSystem {
    /// Create a perception system with the given query
    pub fn new(sight: LineOfSight) -> Self {
        Self { sight }
    }

    /// Create a perception system from configuration
    pub fn from_config(config: &PerceptionConfig) -> Self {
        Self::new(config.to_line_of_sight())
    }

    /// Keys of the entities the player has line of sight to
    ///
    /// Empty when the scene has no player.
    pub fn visible_from_player(&self, scene: &Scene) -> Vec<EntityKey> {
        let (Some(player), Some(eye)) = (scene.player, scene.player_position()) else {
            return Vec::new();
        };

        let visible: Vec<EntityKey> = scene
            .world
            .iter()
            .filter(|(key, _)| *key != player)
            .filter(|(_, e)| self.sight.has_line_of_sight(&scene.grid, eye, e.position))
            .map(|(key, _)| key)
            .collect();

        log::trace!("player at {} sees {} entities", eye, visible.len());
        visible
    }

    /// Entities hidden from the player, each with the first solid sample on the way
    pub fn hidden_from_player(&self, scene: &Scene) -> Vec<(EntityKey, Quadray)> {
        let (Some(player), Some(eye)) = (scene.player, scene.player_position()) else {
            return Vec::new();
        };

        scene
            .world
            .iter()
            .filter(|(key, _)| *key != player)
            .filter_map(|(key, e)| {
                self.sight
                    .first_obstruction(&scene.grid, eye, e.position)
                    .map(|blocked_at| (key, blocked_at))
            })
            .collect()
    }
}

impl Default for PerceptionSystem {
    fn default() -> Self {
        Self::from_config(&PerceptionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneBuilder;
    use quadray4d_core::WallKind;
    use quadray4d_physics::Entity4D;

    #[test]
    fn test_wall_hides_entity() {
        let scene = SceneBuilder::new(8)
            .add_wall_box([4, 0, 0, 0], [4, 7, 7, 7], WallKind::Stone)
            .add_player(Quadray::new(2.5, 2.5, 2.5, 2.5), 0.0, Quadray::ORIGIN)
            .add_entity(Entity4D::new(Quadray::new(3.5, 3.5, 2.5, 2.5)))
            .add_entity(Entity4D::new(Quadray::new(6.5, 2.5, 2.5, 2.5)))
            .build();

        let visible = PerceptionSystem::default().visible_from_player(&scene);
        assert_eq!(visible.len(), 1);
        let seen = scene.world.get(visible[0]).unwrap();
        assert_eq!(seen.position, Quadray::new(3.5, 3.5, 2.5, 2.5));
    }

    #[test]
    fn test_hidden_entity_reports_blocking_cell() {
        let scene = SceneBuilder::new(8)
            .add_wall_box([4, 0, 0, 0], [4, 7, 7, 7], WallKind::Stone)
            .add_player(Quadray::new(2.5, 2.5, 2.5, 2.5), 0.0, Quadray::ORIGIN)
            .add_entity(Entity4D::new(Quadray::new(3.5, 3.5, 2.5, 2.5)))
            .add_entity(Entity4D::new(Quadray::new(6.5, 2.5, 2.5, 2.5)))
            .build();

        let hidden = PerceptionSystem::default().hidden_from_player(&scene);
        assert_eq!(hidden.len(), 1);
        let (key, blocked_at) = hidden[0];
        assert_eq!(scene.world.get(key).unwrap().position, Quadray::new(6.5, 2.5, 2.5, 2.5));
        assert_eq!(blocked_at.floor().a, 4.0);
    }

    #[test]
    fn test_no_player_sees_nothing() {
        let scene = SceneBuilder::new(8)
            .add_entity(Entity4D::new(Quadray::new(3.5, 3.5, 2.5, 2.5)))
            .build();
        assert!(PerceptionSystem::default().visible_from_player(&scene).is_empty());
        assert!(PerceptionSystem::default().hidden_from_player(&scene).is_empty());
    }
}
