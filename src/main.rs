//! Just Awake headless runner
//!
//! Drives a session with a scripted pilot against the reference island field and logs
//! every presentation event as JSON.
//!
//! Usage: `just-awake [TUNING.json | -] [SEED]`

use std::error::Error;

use glam::Vec2;

use just_awake::audio::Mixer;
use just_awake::consts::*;
use just_awake::hud;
use just_awake::sim::{GameEvent, GameState, MotionState, RunMode, TickInput, tick};
use just_awake::world::IslandField;
use just_awake::Tuning;

/// Give up after this much simulated time if the pilot never dies
const MAX_RUN_SECONDS: f32 = 600.0;
/// Pilot opens the glide once falling faster than this
const DEPLOY_SPEED: f32 = -25.0;

/// Runner holding the session and its collaborators
struct Runner {
    state: GameState,
    world: IslandField,
    mixer: Mixer,
    input: TickInput,
    accumulator: f32,
}

impl Runner {
    fn new(state: GameState) -> Self {
        let mut runner = Self {
            state,
            world: IslandField::default(),
            mixer: Mixer::new(),
            input: TickInput::default(),
            accumulator: 0.0,
        };
        runner.flush();
        runner
    }

    /// Walk forward, glide once the fall gets fast
    fn pilot(&mut self) {
        let player = &self.state.player;
        self.input.move_axis = Vec2::new(0.0, 1.0);
        self.input.sprint = player.grounded();
        if player.motion == MotionState::Falling
            && player.deploy_chance
            && player.deploy_timeout <= 0.0
            && player.vertical_velocity < DEPLOY_SPEED
        {
            self.input.deploy = true;
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.pilot();
            tick(&mut self.state, &mut self.input, &self.world, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.flush();
        }
    }

    /// Hand spawns to the world and log events
    fn flush(&mut self) {
        self.world.place_all(self.state.drain_spawns());

        let events = self.state.drain_events();
        for event in events.iter().filter(|e| **e != GameEvent::ScoreIdle) {
            match serde_json::to_string(event) {
                Ok(line) => log::info!("{}", line),
                Err(e) => log::warn!("Could not encode event {:?}: {}", event, e),
            }
        }
        for (effect, volume) in self.mixer.cues(&events) {
            log::debug!("cue {} at {:.2}", effect.as_str(), volume);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Just Awake (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) if path != "-" => Tuning::load(&path)?,
        _ => Tuning::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed.parse::<u64>()?,
        None => rand::random(),
    };

    let mut runner = Runner::new(GameState::new(seed, tuning)?);

    // Frames alternate a little around the sim rate, like a real display would
    let frame_times = [1.0 / 60.0, 1.0 / 55.0, 1.0 / 65.0];
    let mut elapsed = 0.0;
    let mut frame = 0usize;
    while runner.state.mode != RunMode::Dead && elapsed < MAX_RUN_SECONDS {
        let dt = frame_times[frame % frame_times.len()];
        runner.update(dt);
        elapsed += dt;
        frame += 1;
    }

    let state = &runner.state;
    log::info!(
        "Run over after {} ticks: score {}, height {}, {} islands",
        state.time_ticks,
        hud::score_label(state.vitals.score),
        hud::height_label(state.player.position.y),
        runner.world.islands().len()
    );
    Ok(())
}
