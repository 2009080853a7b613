//! World scrolling, spawning, pruning and ground continuity
//!
//! The player never moves horizontally; every tick the world slides left by
//! the scroll displacement and is refilled at the right edge.

use super::generator;
use super::state::{EntityKind, GameState};

/// Slide every entity left by `dx` pixels
///
/// Ground and obstacles move by `dx`, birds by `dx * bird_speed_factor`,
/// scenery by `dx * parallax`.
pub fn advance(state: &mut GameState, dx: f32) {
    let bird_dx = dx * state.tuning.bird_speed_factor;
    for entity in &mut state.entities {
        entity.body.pos.x -= if entity.kind == EntityKind::Bird {
            bird_dx
        } else {
            dx
        };
    }
    for item in &mut state.scenery {
        item.body.pos.x -= dx * item.kind.parallax();
    }
}

/// Drop everything that has fully left the lookahead window on the left
pub fn prune(state: &mut GameState) {
    let limit = -state.tuning.lookahead;
    state.entities.retain(|e| e.body.right() >= limit);
    state.scenery.retain(|s| s.body.right() >= limit);
}

/// Append generated obstacles, birds and scenery whose interval is due
pub fn spawn_due(state: &mut GameState) {
    let t = state.time_ticks;
    let due = |interval: u32| t % u64::from(interval.max(1)) == 0;

    if due(state.tuning.obstacle_interval_ticks) {
        let id = state.next_entity_id();
        let obstacle = generator::generate_obstacle(&mut state.rng, id, &state.tuning);
        state.entities.push(obstacle);
    }

    if state.tuning.birds_enabled && due(state.tuning.bird_interval_ticks) {
        let id = state.next_entity_id();
        let bird = generator::generate_bird(&mut state.rng, id, &state.tuning);
        state.entities.push(bird);
    }

    if due(state.tuning.scenery_interval_ticks) {
        let item = generator::generate_scenery(&mut state.rng, &state.tuning);
        state.scenery.push(item);
    }

    if due(state.tuning.ground_check_interval_ticks) {
        ensure_ground_ahead(state);
    }
}

/// Right edge of the rightmost ground segment
pub fn ground_edge(state: &GameState) -> Option<f32> {
    state
        .ground_segments()
        .map(|g| g.body.right())
        .reduce(f32::max)
}

/// Extend the ground until it reaches `screen_width + lookahead` past the player
///
/// New segments start exactly at the previous right edge. Returns the number
/// of segments appended.
pub fn ensure_ground_ahead(state: &mut GameState) -> usize {
    let reach = state.tuning.player_x + state.tuning.screen_width + state.tuning.lookahead;
    let mut edge = match ground_edge(state) {
        Some(edge) => edge,
        None => {
            log::warn!("No ground left, restarting ground at the player");
            state.tuning.player_x - state.tuning.lookahead
        }
    };

    let mut appended = 0;
    while edge < reach {
        let id = state.next_entity_id();
        let segment = generator::generate_ground_segment(&mut state.rng, id, edge, &state.tuning);
        edge = segment.body.right();
        state.entities.push(segment);
        appended += 1;
    }
    appended
}

/// Flip `passed` on obstacles whose trailing edge crossed the player's leading edge
///
/// Returns the number of newly passed scoring obstacles.
pub fn mark_passed(state: &mut GameState) -> u64 {
    let player_right = state.player.body().right();
    let mut scored = 0;
    for entity in &mut state.entities {
        if entity.kind.is_obstacle() && !entity.passed && entity.body.right() < player_right {
            entity.passed = true;
            if entity.kind.scores() {
                scored += 1;
            }
        }
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aabb::Aabb;
    use crate::sim::state::{Entity, Scenery, SceneryKind};

    fn sorted_ground(state: &GameState) -> Vec<Aabb> {
        let mut ground: Vec<Aabb> = state.ground_segments().map(|g| g.body).collect();
        ground.sort_by(|a, b| a.left().total_cmp(&b.left()));
        ground
    }

    #[test]
    fn test_advance_moves_by_kind() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state
            .entities
            .push(Entity::new(id, Aabb::new(500.0, 300.0, 40.0, 40.0), EntityKind::Block));
        let bird_id = state.next_entity_id();
        state
            .entities
            .push(Entity::new(bird_id, Aabb::new(500.0, 260.0, 50.0, 40.0), EntityKind::Bird));
        state.scenery.push(Scenery {
            body: Aabb::new(500.0, 50.0, 100.0, 40.0),
            kind: SceneryKind::Cloud,
        });

        advance(&mut state, 10.0);

        let block = state.entities.iter().find(|e| e.id == id).unwrap();
        let bird = state.entities.iter().find(|e| e.id == bird_id).unwrap();
        assert_eq!(block.body.left(), 490.0);
        assert_eq!(bird.body.left(), 500.0 - 10.0 * state.tuning.bird_speed_factor);
        assert_eq!(state.scenery[0].body.left(), 500.0 - 10.0 * 0.2);
    }

    #[test]
    fn test_prune_drops_only_far_left() {
        let mut state = GameState::new(1);
        let keep = state.next_entity_id();
        let drop = state.next_entity_id();
        let limit = -state.tuning.lookahead;
        state
            .entities
            .push(Entity::new(keep, Aabb::new(limit - 30.0, 300.0, 40.0, 40.0), EntityKind::Pipe));
        state
            .entities
            .push(Entity::new(drop, Aabb::new(limit - 50.0, 300.0, 40.0, 40.0), EntityKind::Pipe));
        prune(&mut state);
        assert!(state.entities.iter().any(|e| e.id == keep));
        assert!(!state.entities.iter().any(|e| e.id == drop));
    }

    #[test]
    fn test_ground_extends_without_gaps() {
        let mut state = GameState::new(11);
        for _ in 0..200 {
            advance(&mut state, 37.0);
            prune(&mut state);
            ensure_ground_ahead(&mut state);

            let ground = sorted_ground(&state);
            for pair in ground.windows(2) {
                assert!((pair[0].right() - pair[1].left()).abs() < 1e-2);
            }
            let reach = state.tuning.player_x + state.tuning.screen_width + state.tuning.lookahead;
            assert!(ground_edge(&state).unwrap() >= reach);
        }
    }

    #[test]
    fn test_ensure_ground_is_noop_when_far_enough() {
        let mut state = GameState::new(2);
        let before = state.entities.len();
        assert_eq!(ensure_ground_ahead(&mut state), 0);
        assert_eq!(state.entities.len(), before);
    }

    #[test]
    fn test_mark_passed_flips_once_and_skips_platforms() {
        let mut state = GameState::new(1);
        let x = state.player.pos.x - 100.0;
        let block = state.next_entity_id();
        state
            .entities
            .push(Entity::new(block, Aabb::new(x, 300.0, 40.0, 40.0), EntityKind::Block));
        let ledge = state.next_entity_id();
        state
            .entities
            .push(Entity::new(ledge, Aabb::new(x, 250.0, 90.0, 16.0), EntityKind::Platform));

        assert_eq!(mark_passed(&mut state), 1);
        assert_eq!(mark_passed(&mut state), 0);
        assert!(state.entities.iter().filter(|e| e.kind.is_obstacle()).all(|e| e.passed));

        // Trailing edge between the player's left and right edges counts as passed
        let player = state.player.body();
        let pipe = state.next_entity_id();
        state.entities.push(Entity::new(
            pipe,
            Aabb::new(player.right() - 41.0, 300.0, 40.0, 40.0),
            EntityKind::Pipe,
        ));
        assert!(player.left() < player.right() - 1.0);
        assert_eq!(mark_passed(&mut state), 1);

        // Still overlapping the leading edge: not passed yet
        let bird = state.next_entity_id();
        state.entities.push(Entity::new(
            bird,
            Aabb::new(player.right() - 20.0, 260.0, 50.0, 40.0),
            EntityKind::Bird,
        ));
        assert_eq!(mark_passed(&mut state), 0);
    }

    #[test]
    fn test_spawn_due_on_interval() {
        let mut state = GameState::new(8);
        state.time_ticks = u64::from(state.tuning.obstacle_interval_ticks);
        let before = state.obstacles().count();
        spawn_due(&mut state);
        assert!(state.obstacles().count() > before);

        state.time_ticks += 1;
        let before = state.obstacles().count();
        spawn_due(&mut state);
        assert_eq!(state.obstacles().count(), before);
    }
}
