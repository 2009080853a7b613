//! Keyboard/pointer mapping and held input
//!
//! Hosts translate raw events into [`InputAction`]s; [`InputState`] folds
//! them into the per-tick [`TickInput`].

use crate::sim::TickInput;

/// Game-level meaning of a key or pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Jump,
    DuckPressed,
    DuckReleased,
    Pause,
    Restart,
    ToggleHitboxes,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.code` to an action
///
/// `pressed` is false for keyup; only duck cares about releases.
pub fn key_action(code: &str, ctrl: bool, pressed: bool) -> Option<InputAction> {
    if !pressed {
        return match code {
            "ArrowDown" | "KeyS" => Some(InputAction::DuckReleased),
            _ => None,
        };
    }

    match code {
        "KeyD" if ctrl => Some(InputAction::ToggleHitboxes),
        "Space" | "ArrowUp" | "KeyW" => Some(InputAction::Jump),
        "ArrowDown" | "KeyS" => Some(InputAction::DuckPressed),
        "Escape" | "KeyP" => Some(InputAction::Pause),
        "KeyR" | "Enter" => Some(InputAction::Restart),
        "KeyI" => Some(InputAction::ToggleAutopilot),
        _ => None,
    }
}

/// Pointer down anywhere on the canvas
pub fn pointer_action() -> InputAction {
    InputAction::Jump
}

/// Input held between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub duck_held: bool,
    /// One-shot, cleared after the next tick
    pub jump_queued: bool,
    pub idle_mode: bool,
}

impl InputState {
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            jump: self.jump_queued,
            duck: self.duck_held,
            pause: false,
            idle_mode: self.idle_mode,
        }
    }

    /// Clear one-shot inputs after processing
    pub fn clear_one_shots(&mut self) {
        self.jump_queued = false;
    }
}
