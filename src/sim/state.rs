//! Session state and core simulation types
//!
//! Everything a run owns lives in [`GameState`]: the player, their vitals, the island
//! generator, and the single seeded RNG every random draw goes through.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bag::PrefabBag;
use super::events::GameEvent;
use super::islands::{IslandGenerator, IslandPlacement};
use crate::height_of;
use crate::tuning::{PlayerTuning, Tuning, TuningError};

/// Top-level gate checked at the start of every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Active gameplay
    Running,
    /// Pause menu is up; only the pause toggle is processed
    Paused,
    /// Health ran out; terminal until restart
    Dead,
}

impl RunMode {
    /// Whether the shell should capture the cursor
    pub fn cursor_locked(&self) -> bool {
        matches!(self, RunMode::Running)
    }

    /// Time scale the shell should run presentation at
    pub fn time_scale(&self) -> f32 {
        match self {
            RunMode::Paused => 0.0,
            RunMode::Running | RunMode::Dead => 1.0,
        }
    }
}

/// Vertical movement state of the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// Standing on an island
    Grounded,
    /// Airborne under baseline gravity
    Falling,
    /// Airborne with the glide open (no gravity, eased descent)
    Deploying,
}

/// The player's physical state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Heading (degrees)
    pub yaw: f32,
    /// Look pitch (degrees)
    pub pitch: f32,
    /// Signed vertical speed; negative is falling
    pub vertical_velocity: f32,
    /// Horizontal speed actually travelled last tick
    pub horizontal_speed: f32,
    pub motion: MotionState,
    /// Standing near an island edge
    pub on_border: bool,
    pub jump_timeout: f32,
    pub fall_timeout: f32,
    pub deploy_timeout: f32,
    /// One deploy is allowed per fall
    pub deploy_chance: bool,
}

impl Player {
    pub fn new(position: Vec3, tuning: &PlayerTuning) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            horizontal_speed: 0.0,
            motion: MotionState::Grounded,
            on_border: false,
            jump_timeout: tuning.jump_timeout,
            fall_timeout: tuning.fall_timeout,
            deploy_timeout: tuning.deploy_timeout,
            deploy_chance: true,
        }
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.motion == MotionState::Grounded
    }

    /// Gravity currently acting on the character
    #[inline]
    pub fn gravity(&self, tuning: &PlayerTuning) -> f32 {
        match self.motion {
            MotionState::Deploying => 0.0,
            MotionState::Grounded | MotionState::Falling => tuning.gravity,
        }
    }

    /// Integer height shown on the HUD and fed to the island generator
    #[inline]
    pub fn height(&self) -> i32 {
        height_of(self.position)
    }
}

/// Health, damage and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    /// Impact damage pending for the next landing
    pub damage: f32,
    pub score: f32,
    pub dead: bool,
}

impl Vitals {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            health: tuning.start_health,
            damage: 0.0,
            score: 0.0,
            dead: false,
        }
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub mode: RunMode,
    /// Simulation tick counter (gameplay ticks only)
    pub time_ticks: u64,
    pub player: Player,
    pub vitals: Vitals,
    pub islands: IslandGenerator,
    /// Shared random source for every draw in the run
    pub rng: Pcg32,
    /// Presentation events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Islands waiting for the scene collaborator
    pub spawn_requests: Vec<IslandPlacement>,
}

impl GameState {
    /// Create a new session, seeding the starting islands
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let bag = PrefabBag::new(tuning.world.prefabs.clone()).ok_or(TuningError::Invalid {
            field: "world.prefabs",
            reason: "must list at least one island prefab",
        })?;
        let state = Self::fresh(seed, tuning, bag);
        log::info!(
            "Session started (seed {}, start {:?}, {} prefabs)",
            seed,
            state.player.position,
            state.islands.bag.master().len()
        );
        Ok(state)
    }

    fn fresh(seed: u64, tuning: Tuning, bag: PrefabBag) -> Self {
        let start = tuning.world.start_point;
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut islands = IslandGenerator::new(bag, height_of(start));
        let spawn_requests = islands.seed_start(start, &mut rng, &tuning.world);

        Self {
            seed,
            mode: RunMode::Running,
            time_ticks: 0,
            player: Player::new(start, &tuning.player),
            vitals: Vitals::new(&tuning.player),
            islands,
            rng,
            events: Vec::new(),
            spawn_requests,
            tuning,
        }
    }

    /// Reset every piece of run state to its creation defaults
    pub fn restart(&mut self) {
        let bag = self.islands.bag.refilled();
        *self = Self::fresh(self.seed, self.tuning.clone(), bag);
        self.emit(GameEvent::ModeChanged { mode: self.mode });
        log::info!("Session restarted (seed {})", self.seed);
    }

    /// Flip between running and paused. Ignored once dead.
    pub fn toggle_pause(&mut self) {
        match self.mode {
            RunMode::Running => self.set_mode(RunMode::Paused),
            RunMode::Paused => self.set_mode(RunMode::Running),
            RunMode::Dead => {}
        }
    }

    pub fn set_mode(&mut self, mode: RunMode) {
        if self.mode != mode {
            log::debug!("Run mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.emit(GameEvent::ModeChanged { mode });
        }
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all presentation events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take all pending island spawns
    pub fn drain_spawns(&mut self) -> Vec<IslandPlacement> {
        std::mem::take(&mut self.spawn_requests)
    }
}
