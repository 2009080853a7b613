//! Idle/demo mode controller
//!
//! Looks at the nearest hazard ahead of the player and decides whether to jump
//! or duck this tick. Pure function of the state, so demo runs stay
//! deterministic.

use super::state::{Entity, EntityKind, GameState};

/// How the player gets past a hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evasion {
    Jump,
    Duck,
}

fn evasion(kind: EntityKind) -> Option<Evasion> {
    match kind {
        EntityKind::Ground | EntityKind::Platform => None,
        EntityKind::Block
        | EntityKind::Pipe
        | EntityKind::SpinyBlock { .. }
        | EntityKind::Hole
        | EntityKind::Hill { has_gap: false } => Some(Evasion::Jump),
        EntityKind::Bird | EntityKind::Tunnel { .. } | EntityKind::Hill { has_gap: true } => {
            Some(Evasion::Duck)
        }
    }
}

/// Closest obstacle not yet fully behind the player
fn nearest_hazard(state: &GameState) -> Option<&Entity> {
    let player_left = state.player.pos.x;
    state
        .obstacles()
        .filter(|o| evasion(o.kind).is_some() && o.body.right() >= player_left)
        .min_by(|a, b| a.body.left().total_cmp(&b.body.left()))
}

/// Jump/duck decision for this tick
pub fn decide(state: &GameState) -> (bool, bool) {
    let Some(hazard) = nearest_hazard(state) else {
        return (false, false);
    };
    let gap = hazard.body.left() - state.player.body().right();
    let speed = if hazard.kind == EntityKind::Bird {
        state.scroll_speed * state.tuning.bird_speed_factor
    } else {
        state.scroll_speed
    };

    match evasion(hazard.kind) {
        Some(Evasion::Jump) => (gap < speed * 0.2 + 20.0, false),
        // Stay down until the hazard is fully behind
        Some(Evasion::Duck) => {
            let duck = gap < speed * 0.15 + 10.0 && (state.player.grounded || state.player.crouched);
            (false, duck)
        }
        None => (false, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aabb::Aabb;

    fn with_obstacle(kind: EntityKind, x: f32, w: f32, h: f32) -> GameState {
        let mut state = GameState::new(3);
        state.start();
        let ground = state.tuning.ground_top;
        let id = state.next_entity_id();
        state
            .entities
            .push(Entity::new(id, Aabb::new(x, ground - h, w, h), kind));
        state
    }

    #[test]
    fn test_idle_with_clear_road() {
        let mut state = GameState::new(3);
        state.start();
        assert_eq!(decide(&state), (false, false));
    }

    #[test]
    fn test_jumps_when_block_is_close() {
        let far = with_obstacle(EntityKind::Block, 400.0, 40.0, 40.0);
        assert_eq!(decide(&far), (false, false));

        let near = with_obstacle(EntityKind::Block, 120.0, 40.0, 40.0);
        assert_eq!(decide(&near), (true, false));
    }

    #[test]
    fn test_ducks_for_tunnel() {
        let near = with_obstacle(EntityKind::Tunnel { has_gap: true }, 110.0, 100.0, 80.0);
        assert_eq!(decide(&near), (false, true));

        let gapless = with_obstacle(EntityKind::Hill { has_gap: false }, 110.0, 80.0, 50.0);
        assert_eq!(decide(&gapless), (true, false));
    }

    #[test]
    fn test_ignores_platforms_and_passed_hazards() {
        let ledge = with_obstacle(EntityKind::Platform, 100.0, 120.0, 16.0);
        assert_eq!(decide(&ledge), (false, false));

        let behind = with_obstacle(EntityKind::Block, -100.0, 40.0, 40.0);
        assert_eq!(decide(&behind), (false, false));
    }
}
