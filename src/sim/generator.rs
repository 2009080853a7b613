//! Procedural terrain, obstacle and scenery generation
//!
//! Pure functions over a seeded RNG. Spawns happen at the right edge of the
//! screen; the world then scrolls them toward the player.

use rand::Rng;
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::state::{Entity, EntityKind, Scenery, SceneryKind};
use crate::tuning::Tuning;

/// Obstacle families picked by weighted draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Block,
    Hole,
    Platform,
    Pipe,
    SpinyBlock,
    Tunnel,
    Hill,
}

/// Cumulative ranges over [0, 1); must sum to 1.0
const OBSTACLE_WEIGHTS: [(Family, f32); 7] = [
    (Family::Block, 0.25),
    (Family::Hole, 0.10),
    (Family::Platform, 0.20),
    (Family::Pipe, 0.15),
    (Family::SpinyBlock, 0.10),
    (Family::Tunnel, 0.10),
    (Family::Hill, 0.10),
];

/// Weighted pick for a uniform draw in [0, 1)
fn pick_family(roll: f32) -> Family {
    let mut upper = 0.0;
    for &(family, weight) in &OBSTACLE_WEIGHTS {
        upper += weight;
        if roll < upper {
            return family;
        }
    }
    // Rounding can leave the top of the range unmatched
    log::warn!("Obstacle roll {} matched no range, falling back to block", roll);
    Family::Block
}

/// Generate the next obstacle at the spawn edge
pub fn generate_obstacle(rng: &mut Pcg32, id: u32, tuning: &Tuning) -> Entity {
    let roll: f32 = rng.random();
    let family = pick_family(roll);
    let x = tuning.screen_width;
    let ground = tuning.ground_top;

    // Grounded shapes stand on the ground top
    let on_ground = |w: f32, h: f32| Aabb::new(x, ground - h, w, h);

    let (body, kind) = match family {
        Family::Block => {
            let w: f32 = rng.random_range(30.0..50.0);
            let h: f32 = rng.random_range(30.0..60.0);
            (on_ground(w, h), EntityKind::Block)
        }
        Family::Hole => {
            let w: f32 = rng.random_range(60.0..110.0);
            (
                Aabb::new(x, ground, w, tuning.ground_height()),
                EntityKind::Hole,
            )
        }
        Family::Platform => {
            let w: f32 = rng.random_range(90.0..170.0);
            let lift: f32 = rng.random_range(70.0..110.0);
            (Aabb::new(x, ground - lift, w, 16.0), EntityKind::Platform)
        }
        Family::Pipe => {
            let w: f32 = rng.random_range(50.0..60.0);
            let h: f32 = rng.random_range(50.0..100.0);
            (on_ground(w, h), EntityKind::Pipe)
        }
        Family::SpinyBlock => {
            let w: f32 = rng.random_range(30.0..40.0);
            let h: f32 = rng.random_range(30.0..40.0);
            (on_ground(w, h), EntityKind::SpinyBlock { deadly: true })
        }
        Family::Tunnel => {
            let w: f32 = rng.random_range(80.0..140.0);
            let h: f32 = rng.random_range(70.0..100.0);
            (on_ground(w, h), EntityKind::Tunnel { has_gap: true })
        }
        Family::Hill => {
            let w: f32 = rng.random_range(70.0..120.0);
            let h: f32 = rng.random_range(40.0..80.0);
            let has_gap = rng.random_bool(0.5);
            (on_ground(w, h), EntityKind::Hill { has_gap })
        }
    };

    log::debug!(
        "Spawned {} #{} ({}x{})",
        kind.as_str(),
        id,
        body.width(),
        body.height()
    );
    Entity::new(id, body, kind)
}

/// Generate a bird low enough to hit a standing player, high enough to duck
pub fn generate_bird(rng: &mut Pcg32, id: u32, tuning: &Tuning) -> Entity {
    let (w, h) = (50.0_f32, 40.0_f32);
    let clearance: f32 = rng.random_range(30.0..45.0);
    let body = Aabb::new(tuning.screen_width, tuning.ground_top - clearance - h, w, h);
    log::debug!("Spawned bird #{} at y {}", id, body.top());
    Entity::new(id, body, EntityKind::Bird)
}

/// Generate a background decoration at the spawn edge
pub fn generate_scenery(rng: &mut Pcg32, tuning: &Tuning) -> Scenery {
    let kind = SceneryKind::ALL[rng.random_range(0..SceneryKind::ALL.len())];
    let x = tuning.screen_width;
    let ground = tuning.ground_top;

    let body = match kind {
        SceneryKind::Cloud => {
            let w: f32 = rng.random_range(80.0..150.0);
            let y: f32 = rng.random_range(30.0..110.0);
            Aabb::new(x, y, w, 40.0)
        }
        SceneryKind::BgHill => {
            let w: f32 = rng.random_range(160.0..260.0);
            let h: f32 = rng.random_range(80.0..130.0);
            Aabb::new(x, ground - h, w, h)
        }
        SceneryKind::BgSmallHill => {
            let w: f32 = rng.random_range(90.0..140.0);
            let h: f32 = rng.random_range(40.0..70.0);
            Aabb::new(x, ground - h, w, h)
        }
        SceneryKind::Bushes => {
            let w: f32 = rng.random_range(60.0..120.0);
            Aabb::new(x, ground - 25.0, w, 25.0)
        }
        SceneryKind::Castle => Aabb::new(x, ground - 120.0, 110.0, 120.0),
    };

    Scenery { body, kind }
}

/// Ground segment of random length starting exactly at `start_x`
pub fn generate_ground_segment(rng: &mut Pcg32, id: u32, start_x: f32, tuning: &Tuning) -> Entity {
    let len = if tuning.ground_segment_max > tuning.ground_segment_min {
        rng.random_range(tuning.ground_segment_min..tuning.ground_segment_max)
    } else {
        tuning.ground_segment_min
    };
    let body = Aabb::new(start_x, tuning.ground_top, len, tuning.ground_height());
    Entity::new(id, body, EntityKind::Ground)
}

/// Fixed ground under the start screen, covering `[0, screen_width + lookahead]`
pub fn seed_ground(tuning: &Tuning) -> Vec<Aabb> {
    let span = tuning.screen_width + tuning.lookahead;
    let half = (span / 2.0).floor();
    vec![
        Aabb::new(0.0, tuning.ground_top, half, tuning.ground_height()),
        Aabb::new(half, tuning.ground_top, span - half, tuning.ground_height()),
    ]
}
