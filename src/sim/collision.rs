//! Collision evaluation between the player and obstacles
//!
//! Every rule is an AABB test. Gapped tunnels and hills are split into a
//! solid upper part and a clearance band at their base; a crouched player only
//! collides with the solid part.

use super::aabb::Aabb;
use super::state::{Entity, EntityKind, GameState};
use crate::tuning::Tuning;

/// Outcome of testing the player against one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Clear,
    /// Ends the run
    Terminal,
}

/// Overlap against a body with a crouch-height clearance at its base
fn gapped_hit(player: &Aabb, crouched: bool, body: &Aabb, gap_height: f32) -> bool {
    if !crouched || gap_height <= 0.0 {
        return player.overlaps_y(body);
    }
    let (solid, _clearance) = body.split_bottom(gap_height);
    solid.height() > 0.0 && player.overlaps_y(&solid)
}

/// Apply the per-kind rule for a single obstacle
pub fn evaluate(player: &Aabb, crouched: bool, obstacle: &Entity, tuning: &Tuning) -> Contact {
    let body = &obstacle.body;
    if !player.overlaps_x(body) {
        return Contact::Clear;
    }

    let hit = match obstacle.kind {
        // Holes act through physics, ground and platforms are surfaces
        EntityKind::Ground | EntityKind::Hole | EntityKind::Platform => false,
        EntityKind::Block | EntityKind::Pipe | EntityKind::SpinyBlock { .. } => {
            player.overlaps_y(body)
        }
        EntityKind::Tunnel { has_gap } => {
            let gap = if has_gap { tuning.tunnel_gap_height } else { 0.0 };
            gapped_hit(player, crouched, body, gap)
        }
        EntityKind::Hill { has_gap } => {
            let gap = if has_gap { tuning.hill_gap_height } else { 0.0 };
            gapped_hit(player, crouched, body, gap)
        }
        EntityKind::Bird => !crouched && player.overlaps_y(body),
    };

    if hit { Contact::Terminal } else { Contact::Clear }
}

/// First obstacle (in store order) that ends the run, if any
pub fn first_terminal(state: &GameState) -> Option<&Entity> {
    let player = state.player.body();
    let crouched = state.player.crouched;
    state
        .obstacles()
        .find(|o| evaluate(&player, crouched, o, &state.tuning) == Contact::Terminal)
}
