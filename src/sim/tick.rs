//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::state::{GameOverCause, GamePhase, GameState};
use super::{autopilot, collision, physics, terrain};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/up/tap). Also starts a run from the ready screen
    pub jump: bool,
    /// Duck held (down)
    pub duck: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause();
                return;
            }
            GamePhase::Paused => state.resume(),
            _ => {}
        }
    }

    if state.phase == GamePhase::Ready && (input.jump || input.idle_mode) {
        state.start();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    let (jump, duck) = if input.idle_mode {
        autopilot::decide(state)
    } else {
        (input.jump, input.duck)
    };

    state.time_ticks += 1;

    // Player
    physics::apply_input(state, jump, duck);
    let outcome = physics::step(state, dt);

    // World
    let dx = state.scroll_speed * dt;
    terrain::advance(state, dx);
    state.distance += dx;
    terrain::spawn_due(state);

    if let Some(hit) = collision::first_terminal(state) {
        let cause = GameOverCause::Collision {
            id: hit.id,
            kind: hit.kind,
        };
        state.finish(cause);
        return;
    }

    state.score += terrain::mark_passed(state);

    if outcome.fell {
        state.finish(GameOverCause::Fell);
        return;
    }

    terrain::prune(state);

    state.scroll_speed =
        (state.scroll_speed + state.tuning.scroll_accel * dt).min(state.tuning.max_scroll_speed);
}
