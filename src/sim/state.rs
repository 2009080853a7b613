//! Game state and core simulation types
//!
//! Everything a run needs to continue deterministically lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::{generator, terrain};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the first jump
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// What a world entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Ground band segment
    Ground,
    Block,
    /// Cut in the ground band; the ground underneath stops holding the player
    Hole,
    /// Floating ledge the player can land on
    Platform,
    Pipe,
    SpinyBlock { deadly: bool },
    /// Overhang with crouch clearance at its base
    Tunnel { has_gap: bool },
    Hill { has_gap: bool },
    /// Flying obstacle, duck under it
    Bird,
}

impl EntityKind {
    /// Everything except ground segments is an obstacle
    pub fn is_obstacle(&self) -> bool {
        !matches!(self, EntityKind::Ground)
    }

    /// Role in the collidable surface view, if any
    pub fn surface(&self) -> Option<SurfaceKind> {
        match self {
            EntityKind::Ground => Some(SurfaceKind::Ground),
            EntityKind::Platform => Some(SurfaceKind::Platform),
            _ => None,
        }
    }

    /// Passing this obstacle earns a point
    pub fn scores(&self) -> bool {
        self.is_obstacle() && !matches!(self, EntityKind::Platform)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Ground => "ground",
            EntityKind::Block => "block",
            EntityKind::Hole => "hole",
            EntityKind::Platform => "platform",
            EntityKind::Pipe => "pipe",
            EntityKind::SpinyBlock { .. } => "spinyBlock",
            EntityKind::Tunnel { .. } => "tunnel",
            EntityKind::Hill { .. } => "hill",
            EntityKind::Bird => "bird",
        }
    }
}

/// A scrolling world entity (ground segment or obstacle)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub body: Aabb,
    pub kind: EntityKind,
    /// Right edge has gone past the player (flips once)
    #[serde(default)]
    pub passed: bool,
}

impl Entity {
    pub fn new(id: u32, body: Aabb, kind: EntityKind) -> Self {
        Self {
            id,
            body,
            kind,
            passed: false,
        }
    }
}

/// Role of a collidable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Ground,
    Platform,
}

/// Read-only view of an entity the player can stand on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub id: u32,
    pub body: Aabb,
    pub kind: SurfaceKind,
}

/// Background decoration types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneryKind {
    BgHill,
    BgSmallHill,
    Cloud,
    Bushes,
    Castle,
}

impl SceneryKind {
    pub const ALL: [SceneryKind; 5] = [
        SceneryKind::BgHill,
        SceneryKind::BgSmallHill,
        SceneryKind::Cloud,
        SceneryKind::Bushes,
        SceneryKind::Castle,
    ];

    /// Fraction of the scroll speed this layer moves at
    pub fn parallax(&self) -> f32 {
        match self {
            SceneryKind::Cloud => 0.2,
            SceneryKind::BgHill => 0.4,
            SceneryKind::BgSmallHill => 0.5,
            SceneryKind::Castle => 0.6,
            SceneryKind::Bushes => 0.8,
        }
    }
}

/// A decorative background element (never collides)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenery {
    pub body: Aabb,
    pub kind: SceneryKind,
}

/// The runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub jumping: bool,
    /// Dive used this airtime
    pub diving: bool,
    /// Shrunk to crouch height
    pub crouched: bool,
    /// Standing on a surface after the last physics step
    pub grounded: bool,
    pub width: f32,
    pub full_height: f32,
    pub crouch_height: f32,
}

impl Player {
    /// Standing on the ground band
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_top - tuning.player_height),
            vel_y: 0.0,
            jumping: false,
            diving: false,
            crouched: false,
            grounded: true,
            width: tuning.player_width,
            full_height: tuning.player_height,
            crouch_height: tuning.crouch_height,
        }
    }

    /// Effective height (reduced while crouched or diving)
    #[inline]
    pub fn height(&self) -> f32 {
        if self.crouched {
            self.crouch_height
        } else {
            self.full_height
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height()
    }

    pub fn body(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.width, self.height())
    }

    /// Change height keeping the feet where they are
    pub fn set_crouched(&mut self, crouched: bool) {
        if self.crouched == crouched {
            return;
        }
        let bottom = self.bottom();
        self.crouched = crouched;
        self.pos.y = bottom - self.height();
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Terminal collision with an obstacle
    Collision { id: u32, kind: EntityKind },
    /// Dropped below the play area
    Fell,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Generator RNG, advanced only by spawns
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    /// Current scroll speed (pixels/s)
    pub scroll_speed: f32,
    /// Total horizontal distance scrolled (pixels)
    pub distance: f32,
    pub score: u64,
    /// Best score this session
    pub high_score: u64,
    pub player: Player,
    /// Ground segments and obstacles in insertion order
    pub entities: Vec<Entity>,
    pub scenery: Vec<Scenery>,
    /// Set when the run ends
    pub last_cause: Option<GameOverCause>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            scroll_speed: tuning.scroll_speed,
            tuning,
            phase: GamePhase::Ready,
            time_ticks: 0,
            distance: 0.0,
            score: 0,
            high_score: 0,
            entities: Vec::new(),
            scenery: Vec::new(),
            last_cause: None,
            next_id: 1,
        };

        for body in generator::seed_ground(&state.tuning) {
            let id = state.next_entity_id();
            state.entities.push(Entity::new(id, body, EntityKind::Ground));
        }
        terrain::ensure_ground_ahead(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fresh run with the same tuning, keeping the session high score
    pub fn reset(&mut self, seed: u64) {
        let high_score = self.high_score;
        *self = Self::with_tuning(seed, self.tuning.clone());
        self.high_score = high_score;
    }

    /// Ready -> Playing
    pub fn start(&mut self) {
        if self.phase == GamePhase::Ready {
            log::info!("Run started (seed {})", self.seed);
            self.phase = GamePhase::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// End the run and fold the score into the high score
    pub fn finish(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        self.last_cause = Some(cause);
        log::info!(
            "Game over ({:?}) score {} high score {} after {} ticks",
            cause,
            self.score,
            self.high_score,
            self.time_ticks
        );
    }

    /// Drawable obstacles in insertion order
    pub fn obstacles(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_obstacle())
    }

    /// Ground segments in insertion order
    pub fn ground_segments(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Ground)
    }

    /// Collidable surfaces (ground and platforms) in insertion order
    pub fn surfaces(&self) -> impl Iterator<Item = Surface> + '_ {
        self.entities.iter().filter_map(|e| {
            e.kind.surface().map(|kind| Surface {
                id: e.id,
                body: e.body,
                kind,
            })
        })
    }

    /// Holes currently in the world
    pub fn holes(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind == EntityKind::Hole)
    }

    /// By-value form of [`super::tick`]
    pub fn stepped(mut self, input: &super::TickInput, dt: f32) -> Self {
        super::tick(&mut self, input, dt);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_ready_on_ground() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), state.tuning.ground_top);
        assert!(state.ground_segments().count() > 0);
        assert_eq!(state.obstacles().count(), 0);
    }

    #[test]
    fn test_crouch_keeps_feet() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        let bottom = player.bottom();
        player.set_crouched(true);
        assert_eq!(player.height(), tuning.crouch_height);
        assert_eq!(player.bottom(), bottom);
        player.set_crouched(false);
        assert_eq!(player.height(), tuning.player_height);
        assert_eq!(player.bottom(), bottom);
    }

    #[test]
    fn test_platform_obstacle_appears_in_both_views() {
        let mut state = GameState::new(1);
        let id = state.next_entity_id();
        state.entities.push(Entity::new(
            id,
            Aabb::new(400.0, 250.0, 120.0, 16.0),
            EntityKind::Platform,
        ));
        assert!(state.obstacles().any(|e| e.id == id));
        assert!(state
            .surfaces()
            .any(|s| s.id == id && s.kind == SurfaceKind::Platform));
        // One stored copy
        assert_eq!(state.entities.iter().filter(|e| e.id == id).count(), 1);
    }

    #[test]
    fn test_finish_records_high_score_once() {
        let mut state = GameState::new(3);
        state.start();
        state.score = 12;
        state.finish(GameOverCause::Fell);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 12);

        state.score = 99;
        state.finish(GameOverCause::Fell);
        assert_eq!(state.high_score, 12);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = GameState::new(3);
        state.start();
        state.score = 5;
        state.finish(GameOverCause::Fell);
        state.reset(4);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 5);
        assert_eq!(state.seed, 4);
    }

    #[test]
    fn test_pause_resume() {
        let mut state = GameState::new(3);
        state.pause();
        assert_eq!(state.phase, GamePhase::Ready);
        state.start();
        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.resume();
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
