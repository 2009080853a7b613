//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (injectable clocks)
//! - Input events (key codes to game actions)
//! - The fixed-step frame loop and its lifetime

pub mod clock;
pub mod frame;
pub mod input;

#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use frame::{FrameDriver, FrameStatus};
pub use input::{InputAction, InputState, key_action, pointer_action};
