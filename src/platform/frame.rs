//! Fixed-step frame driver
//!
//! Owns the game state and turns wall-clock frames into fixed `SIM_DT` ticks.
//! The driver is armed while the host should keep requesting frames; it
//! disarms itself on pause, game over and teardown so no ticks run in between.

use super::clock::Clock;
use super::input::{InputAction, InputState};
use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::{RunRecord, SessionScores};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, tick};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Request another frame
    Continue { ticks: u32 },
    /// Loop is disarmed; wait for input to re-arm it
    Stopped { ticks: u32 },
}

impl FrameStatus {
    pub fn ticks(&self) -> u32 {
        match *self {
            FrameStatus::Continue { ticks } | FrameStatus::Stopped { ticks } => ticks,
        }
    }
}

/// Next run seed derived from the previous one (PCG multiplier)
fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

pub struct FrameDriver<C: Clock> {
    clock: C,
    state: GameState,
    input: InputState,
    settings: Settings,
    scores: SessionScores,
    accumulator: f32,
    last_time: Option<f64>,
    armed: bool,
    torn_down: bool,
}

impl<C: Clock> FrameDriver<C> {
    pub fn new(state: GameState, clock: C) -> Self {
        Self {
            clock,
            state,
            input: InputState::default(),
            settings: Settings::default(),
            scores: SessionScores::new(),
            accumulator: 0.0,
            last_time: None,
            armed: true,
            torn_down: false,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scores(&self) -> &SessionScores {
        &self.scores
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    fn disarm(&mut self) {
        self.armed = false;
        // Time spent disarmed is never simulated
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Arm the loop; true if it was stopped before
    fn arm(&mut self) -> bool {
        if self.torn_down || self.armed {
            return false;
        }
        self.armed = true;
        true
    }

    /// Run the ticks owed since the last frame
    pub fn frame(&mut self) -> FrameStatus {
        if !self.armed {
            return FrameStatus::Stopped { ticks: 0 };
        }

        let now = self.clock.now_secs();
        let dt = match self.last_time {
            Some(last) => ((now - last) as f32).clamp(0.0, MAX_FRAME_DELTA),
            None => SIM_DT,
        };
        self.last_time = Some(now);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            let input = self.input.to_tick_input();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            ticks += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();

            match self.state.phase {
                GamePhase::GameOver => {
                    self.scores.record(RunRecord::from_state(&self.state));
                    self.disarm();
                    return FrameStatus::Stopped { ticks };
                }
                GamePhase::Paused => {
                    self.disarm();
                    return FrameStatus::Stopped { ticks };
                }
                GamePhase::Ready | GamePhase::Playing => {}
            }
        }

        FrameStatus::Continue { ticks }
    }

    /// Apply a host input event
    ///
    /// Returns true when the loop was re-armed and the host must request a frame.
    pub fn handle(&mut self, action: InputAction) -> bool {
        if self.torn_down {
            return false;
        }
        match action {
            InputAction::Jump => {
                self.input.jump_queued = true;
                false
            }
            InputAction::DuckPressed => {
                self.input.duck_held = true;
                false
            }
            InputAction::DuckReleased => {
                self.input.duck_held = false;
                false
            }
            InputAction::Pause => match self.state.phase {
                GamePhase::Playing => {
                    self.pause();
                    false
                }
                GamePhase::Paused => self.resume(),
                _ => false,
            },
            InputAction::Restart => {
                let seed = next_seed(self.state.seed);
                self.restart(seed)
            }
            InputAction::ToggleHitboxes => {
                self.settings.toggle_hitboxes();
                self.settings.save();
                false
            }
            InputAction::ToggleAutopilot => {
                self.input.idle_mode = !self.input.idle_mode;
                log::info!("Idle mode: {}", self.input.idle_mode);
                false
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.pause();
            self.disarm();
            log::info!("Paused at tick {}", self.state.time_ticks);
        }
    }

    /// Returns true when the loop was re-armed
    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.state.resume();
        log::info!("Resumed");
        self.arm()
    }

    /// Start a fresh run (keeps the session high score and board)
    pub fn restart(&mut self, seed: u64) -> bool {
        if self.torn_down {
            return false;
        }
        self.state.reset(seed);
        let idle_mode = self.input.idle_mode;
        self.input = InputState {
            idle_mode,
            ..InputState::default()
        };
        self.accumulator = 0.0;
        self.last_time = None;
        log::info!("Game restarted with seed: {}", seed);
        self.arm()
    }

    /// Stop for good; later frames and inputs do nothing
    pub fn teardown(&mut self) {
        self.disarm();
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::clock::ManualClock;
    use crate::sim::aabb::Aabb;
    use crate::sim::{Entity, EntityKind};
    use crate::tuning::Tuning;

    const FRAME: f64 = 1.0 / 60.0;

    fn quiet_driver(clock: &ManualClock) -> FrameDriver<&ManualClock> {
        let tuning = Tuning {
            obstacle_interval_ticks: u32::MAX,
            birds_enabled: false,
            ..Tuning::default()
        };
        FrameDriver::new(GameState::with_tuning(9, tuning), clock)
    }

    fn start(driver: &mut FrameDriver<&ManualClock>, clock: &ManualClock) {
        driver.handle(InputAction::Jump);
        driver.frame();
        clock.advance(FRAME);
        assert_eq!(driver.state().phase, GamePhase::Playing);
    }

    #[test]
    fn test_first_frame_runs_one_tick() {
        let clock = ManualClock::new(0.0);
        let mut driver = quiet_driver(&clock);
        assert_eq!(driver.frame(), FrameStatus::Continue { ticks: 1 });
        // Ready: nothing advances until the first jump
        assert_eq!(driver.state().time_ticks, 0);
    }

    #[test]
    fn test_long_frame_is_clamped_to_max_substeps() {
        let clock = ManualClock::new(0.0);
        let mut driver = quiet_driver(&clock);
        start(&mut driver, &clock);
        let before = driver.state().time_ticks;

        clock.advance(5.0);
        let status = driver.frame();
        assert_eq!(status.ticks(), MAX_SUBSTEPS);
        assert_eq!(driver.state().time_ticks - before, u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn test_jump_is_one_shot() {
        let clock = ManualClock::new(0.0);
        let mut driver = quiet_driver(&clock);
        start(&mut driver, &clock);
        assert!(!driver.input().jump_queued);
        assert!(driver.state().player.jumping);
    }

    #[test]
    fn test_pause_stops_and_skips_paused_time() {
        let clock = ManualClock::new(0.0);
        let mut driver = quiet_driver(&clock);
        start(&mut driver, &clock);
        driver.frame();

        assert!(!driver.handle(InputAction::Pause));
        assert!(!driver.is_armed());
        let frozen = driver.state().time_ticks;

        clock.advance(30.0);
        assert_eq!(driver.frame(), FrameStatus::Stopped { ticks: 0 });
        assert_eq!(driver.state().time_ticks, frozen);

        // Resume re-arms; the first frame back runs a single tick
        assert!(driver.handle(InputAction::Pause));
        assert_eq!(driver.frame(), FrameStatus::Continue { ticks: 1 });
        assert_eq!(driver.state().time_ticks, frozen + 1);
    }

    #[test]
    fn test_game_over_stops_and_records_run() {
        let clock = ManualClock::new(0.0);
        let mut driver = quiet_driver(&clock);
        start(&mut driver, &clock);

        let ground = driver.state.tuning.ground_top;
        let id = driver.state.next_entity_id();
        driver
            .state
            .entities
            .push(Entity::new(id, Aabb::new(90.0, ground - 50.0, 40.0, 50.0), EntityKind::Block));
        driver.input.duck_held = false;
        driver.state.player.jumping = false;
        driver.state.player.grounded = true;
        driver.state.player.vel_y = 0.0;
        driver.state.player.pos.y = ground - driver.state.player.height();

        let mut stopped = false;
        for _ in 0..120 {
            clock.advance(FRAME);
            if let FrameStatus::Stopped { .. } = driver.frame() {
                stopped = true;
                break;
            }
        }

        assert!(stopped);
        assert_eq!(driver.state().phase, GamePhase::GameOver);
        assert!(!driver.is_armed());
        assert_eq!(driver.scores().runs_played, 1);

        // Restart re-arms with a new seed
        let old_seed = driver.state().seed;
        assert!(driver.handle(InputAction::Restart));
        assert_eq!(driver.state().phase, GamePhase::Ready);
        assert_ne!(driver.state().seed, old_seed);
    }

    #[test]
    fn test_teardown_is_final() {
        let clock = ManualClock::new(0.0);
        let mut driver = quiet_driver(&clock);
        driver.teardown();
        clock.advance(1.0);
        assert_eq!(driver.frame(), FrameStatus::Stopped { ticks: 0 });
        assert!(!driver.handle(InputAction::Restart));
        assert!(!driver.is_armed());
    }

    #[test]
    fn test_toggles() {
        let clock = ManualClock::new(0.0);
        let mut driver = quiet_driver(&clock);
        assert!(!driver.handle(InputAction::ToggleHitboxes));
        assert!(driver.settings().show_hitboxes);
        driver.handle(InputAction::ToggleAutopilot);
        assert!(driver.input().idle_mode);

        // Idle mode survives a restart
        driver.restart(1);
        assert!(driver.input().idle_mode);
    }
}
