//! Player physics: input transitions, gravity and the swept ground clamp
//!
//! The player only moves vertically. Landing is a swept test against the
//! surface view so a fast fall cannot tunnel through a thin platform in one step.

use super::aabb::Aabb;
use super::state::{GameState, SurfaceKind};

/// Slack above a surface top that still counts as "was on or above it"
const LANDING_TOLERANCE: f32 = 0.5;

/// Result of one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicsOutcome {
    /// Surface the player landed on (or kept standing on) this tick
    pub landed_on: Option<u32>,
    /// Player dropped below the play area
    pub fell: bool,
}

/// Apply jump/duck input to the player's flags and velocity
pub fn apply_input(state: &mut GameState, jump: bool, duck: bool) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    if jump && player.grounded && !player.jumping && !player.diving {
        player.set_crouched(false);
        player.vel_y = tuning.jump_impulse;
        player.jumping = true;
        player.grounded = false;
        return;
    }

    if duck {
        if !player.grounded && !player.diving {
            player.diving = true;
            player.vel_y = tuning.dive_impulse;
            player.set_crouched(true);
        } else if player.grounded {
            player.set_crouched(true);
        }
    } else if player.crouched {
        player.set_crouched(false);
    }
}

/// First surface (in store order) the player's feet crossed this step
///
/// Ground is ignored while the player's span sits entirely over a hole. Feet
/// that sank into the ground band meanwhile are caught again once the hole
/// has passed; platforms only catch feet coming from above.
fn find_landing(state: &GameState, body: &Aabb, prev_bottom: f32) -> Option<(u32, f32)> {
    let over_hole = state.holes().any(|hole| hole.body.contains_span_x(body));
    let new_bottom = body.bottom();

    state
        .surfaces()
        .filter(|s| !(over_hole && s.kind == SurfaceKind::Ground))
        .find(|s| {
            let top = s.body.top();
            let from_above = prev_bottom <= top + LANDING_TOLERANCE;
            let in_band = s.kind == SurfaceKind::Ground && prev_bottom < s.body.bottom();
            s.body.overlaps_x(body) && (from_above || in_band) && new_bottom >= top
        })
        .map(|s| (s.id, s.body.top()))
}

/// Integrate gravity, clamp to surfaces and the ceiling
pub fn step(state: &mut GameState, dt: f32) -> PhysicsOutcome {
    let mut player = state.player.clone();
    let prev_bottom = player.bottom();

    player.vel_y += state.tuning.gravity * dt;
    player.pos.y += player.vel_y * dt;

    let mut outcome = PhysicsOutcome::default();
    match find_landing(state, &player.body(), prev_bottom) {
        Some((id, top)) => {
            player.pos.y = top - player.height();
            player.vel_y = 0.0;
            player.jumping = false;
            player.diving = false;
            player.grounded = true;
            outcome.landed_on = Some(id);
        }
        None => player.grounded = false,
    }

    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel_y = player.vel_y.max(0.0);
    }

    outcome.fell = player.pos.y > state.tuning.screen_height;
    state.player = player;
    outcome
}
