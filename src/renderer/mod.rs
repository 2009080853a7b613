//! Rendering module
//!
//! Backend-agnostic: builds a draw list of rects from the game state and,
//! for GPU hosts, the matching triangle vertices.

pub mod draw_list;
pub mod vertex;

pub use draw_list::{DrawRect, build_draw_list, hud_lines};
pub use vertex::{Vertex, colors, rect_vertices};
