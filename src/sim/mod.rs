//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the entity store)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod collision;
pub mod generator;
pub mod physics;
pub mod state;
pub mod terrain;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{Contact, evaluate, first_terminal};
pub use physics::PhysicsOutcome;
pub use state::{
    Entity, EntityKind, GameOverCause, GamePhase, GameState, Player, Scenery, SceneryKind,
    Surface, SurfaceKind,
};
pub use tick::{TickInput, tick};
