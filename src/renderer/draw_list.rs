//! Draw list construction
//!
//! Flattens a [`GameState`] into screen-space rects in back-to-front order.
//! Hosts either paint the rects directly (Canvas 2D) or feed them through
//! [`super::rect_vertices`].

use serde::Serialize;

use super::vertex::colors;
use crate::settings::Settings;
use crate::sim::{Aabb, EntityKind, GamePhase, GameState, SceneryKind};

/// Axis-aligned screen rect with a fill (or outline) color
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: [f32; 4],
    /// Stroke only
    pub outline: bool,
}

impl DrawRect {
    fn fill(body: &Aabb, color: [f32; 4]) -> Self {
        Self {
            x: body.left(),
            y: body.top(),
            w: body.width(),
            h: body.height(),
            color,
            outline: false,
        }
    }

    fn stroke(body: &Aabb, color: [f32; 4]) -> Self {
        Self {
            outline: true,
            ..Self::fill(body, color)
        }
    }
}

fn scenery_color(kind: SceneryKind) -> [f32; 4] {
    match kind {
        SceneryKind::Cloud => colors::CLOUD,
        SceneryKind::BgHill | SceneryKind::BgSmallHill => colors::BG_HILL,
        SceneryKind::Bushes => colors::BUSHES,
        SceneryKind::Castle => colors::CASTLE,
    }
}

fn obstacle_color(kind: EntityKind, high_contrast: bool) -> [f32; 4] {
    let base = match kind {
        EntityKind::Ground => colors::GROUND,
        EntityKind::Hole => colors::SKY,
        EntityKind::Platform => return colors::PLATFORM,
        EntityKind::Block => colors::BLOCK,
        EntityKind::Pipe => colors::PIPE,
        EntityKind::SpinyBlock { .. } => colors::SPINY,
        EntityKind::Tunnel { .. } => colors::TUNNEL,
        EntityKind::Hill { .. } => colors::HILL,
        EntityKind::Bird => colors::BIRD,
    };
    if high_contrast && !matches!(kind, EntityKind::Ground | EntityKind::Hole) {
        colors::HAZARD_HIGH_CONTRAST
    } else {
        base
    }
}

/// Build the frame's rects, back to front
///
/// Order: sky, scenery (slowest layer first), ground, obstacles, player,
/// phase overlay, then hitbox outlines when enabled.
pub fn build_draw_list(state: &GameState, settings: &Settings) -> Vec<DrawRect> {
    let tuning = &state.tuning;
    let mut rects = Vec::with_capacity(state.entities.len() + state.scenery.len() + 8);

    rects.push(DrawRect::fill(
        &Aabb::new(0.0, 0.0, tuning.screen_width, tuning.screen_height),
        colors::SKY,
    ));

    if settings.effective_parallax() {
        let mut layers: Vec<_> = state.scenery.iter().collect();
        layers.sort_by(|a, b| a.kind.parallax().total_cmp(&b.kind.parallax()));
        rects.extend(layers.iter().map(|s| DrawRect::fill(&s.body, scenery_color(s.kind))));
    }

    for ground in state.ground_segments() {
        rects.push(DrawRect::fill(&ground.body, colors::GROUND));
        let (grass, _) = ground.body.split_bottom(ground.body.height() - 6.0);
        rects.push(DrawRect::fill(&grass, colors::GROUND_TOP));
    }

    for obstacle in state.obstacles() {
        let color = obstacle_color(obstacle.kind, settings.high_contrast);
        let gap = match obstacle.kind {
            EntityKind::Tunnel { has_gap: true } => tuning.tunnel_gap_height,
            EntityKind::Hill { has_gap: true } => tuning.hill_gap_height,
            _ => 0.0,
        };
        if gap > 0.0 {
            // Only the solid part is painted; the clearance shows the background
            let (solid, _) = obstacle.body.split_bottom(gap);
            rects.push(DrawRect::fill(&solid, color));
        } else {
            rects.push(DrawRect::fill(&obstacle.body, color));
        }
    }

    rects.push(DrawRect::fill(&state.player.body(), colors::PLAYER));

    if state.phase != GamePhase::Playing {
        rects.push(DrawRect::fill(
            &Aabb::new(0.0, 0.0, tuning.screen_width, tuning.screen_height),
            colors::OVERLAY,
        ));
    }

    if settings.show_hitboxes {
        rects.extend(
            state
                .obstacles()
                .map(|o| DrawRect::stroke(&o.body, colors::HITBOX)),
        );
        rects.push(DrawRect::stroke(&state.player.body(), colors::HITBOX));
    }

    rects
}

/// HUD readout lines for the host to draw
pub fn hud_lines(state: &GameState, settings: &Settings, fps: Option<u32>) -> Vec<String> {
    let mut lines = Vec::new();
    if settings.show_hud {
        lines.push(format!("Score {}", state.score));
        lines.push(format!("Best {}", state.high_score));
        lines.push(format!("Speed {:.0}", state.scroll_speed));
    }
    if let (true, Some(fps)) = (settings.show_fps, fps) {
        lines.push(format!("{} fps", fps));
    }
    match state.phase {
        GamePhase::Ready => lines.push("Press Space to start".to_string()),
        GamePhase::Paused => lines.push("Paused".to_string()),
        GamePhase::GameOver => lines.push("Game over - press R to restart".to_string()),
        GamePhase::Playing => {}
    }
    lines
}
