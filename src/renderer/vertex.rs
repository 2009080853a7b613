//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use super::draw_list::DrawRect;

/// Outline thickness in logical pixels
const OUTLINE_PX: f32 = 1.0;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Two triangles covering a screen-space rect, converted to NDC
fn push_quad(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4], screen: (f32, f32)) {
    let to_ndc = |px: f32, py: f32| (px / screen.0 * 2.0 - 1.0, 1.0 - py / screen.1 * 2.0);
    let (x0, y0) = to_ndc(x, y);
    let (x1, y1) = to_ndc(x + w, y + h);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));

    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Triangle list for a draw list, ready for `bytemuck::cast_slice`
pub fn rect_vertices(rects: &[DrawRect], screen_width: f32, screen_height: f32) -> Vec<Vertex> {
    let screen = (screen_width, screen_height);
    let mut vertices = Vec::with_capacity(rects.len() * 6);

    for r in rects {
        if r.outline {
            let t = OUTLINE_PX.min(r.w / 2.0).min(r.h / 2.0);
            push_quad(&mut vertices, r.x, r.y, r.w, t, r.color, screen);
            push_quad(&mut vertices, r.x, r.y + r.h - t, r.w, t, r.color, screen);
            push_quad(&mut vertices, r.x, r.y + t, t, r.h - 2.0 * t, r.color, screen);
            push_quad(&mut vertices, r.x + r.w - t, r.y + t, t, r.h - 2.0 * t, r.color, screen);
        } else {
            push_quad(&mut vertices, r.x, r.y, r.w, r.h, r.color, screen);
        }
    }

    vertices
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.42, 0.55, 1.0, 1.0];
    pub const GROUND: [f32; 4] = [0.55, 0.33, 0.14, 1.0];
    pub const GROUND_TOP: [f32; 4] = [0.2, 0.7, 0.2, 1.0];
    pub const PLAYER: [f32; 4] = [0.9, 0.15, 0.1, 1.0];
    pub const BLOCK: [f32; 4] = [0.8, 0.5, 0.2, 1.0];
    pub const PLATFORM: [f32; 4] = [0.7, 0.45, 0.25, 1.0];
    pub const PIPE: [f32; 4] = [0.1, 0.65, 0.1, 1.0];
    pub const SPINY: [f32; 4] = [0.85, 0.1, 0.3, 1.0];
    pub const TUNNEL: [f32; 4] = [0.45, 0.45, 0.5, 1.0];
    pub const HILL: [f32; 4] = [0.25, 0.55, 0.2, 1.0];
    pub const BIRD: [f32; 4] = [0.15, 0.15, 0.15, 1.0];
    pub const HAZARD_HIGH_CONTRAST: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const BG_HILL: [f32; 4] = [0.35, 0.7, 0.35, 1.0];
    pub const BUSHES: [f32; 4] = [0.3, 0.8, 0.3, 1.0];
    pub const CASTLE: [f32; 4] = [0.6, 0.35, 0.25, 1.0];
    pub const HITBOX: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.45];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32, outline: bool) -> DrawRect {
        DrawRect {
            x,
            y,
            w,
            h,
            color: colors::PLAYER,
            outline,
        }
    }

    #[test]
    fn test_full_screen_rect_maps_to_ndc_corners() {
        let v = rect_vertices(&[rect(0.0, 0.0, 800.0, 400.0, false)], 800.0, 400.0);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [-1.0, 1.0]);
        assert_eq!(v[5].position, [1.0, -1.0]);
    }

    #[test]
    fn test_outline_emits_four_edges() {
        let v = rect_vertices(&[rect(10.0, 10.0, 40.0, 20.0, true)], 800.0, 400.0);
        assert_eq!(v.len(), 24);
    }

    #[test]
    fn test_vertices_cast_to_bytes() {
        let v = rect_vertices(&[rect(0.0, 0.0, 1.0, 1.0, false)], 800.0, 400.0);
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), v.len() * std::mem::size_of::<Vertex>());
    }
}
