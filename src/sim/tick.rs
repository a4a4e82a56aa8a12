//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one step. Order within a tick:
//! input gate, peek, vertical kinematics, contact refresh and landing, deploy, locomotion,
//! health, score, look, then island generation from the new height.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::contact::{self, WorldQuery};
use super::events::GameEvent;
use super::kinematics;
use super::player;
use super::state::{GameState, RunMode};

/// Input snapshot for a single tick.
///
/// `jump`, `deploy` and `pause` are one-shot: the tick clears them once acted on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement stick / WASD (x = strafe, y = forward)
    pub move_axis: Vec2,
    /// Look delta (x = yaw, y = pitch)
    pub look: Vec2,
    pub jump: bool,
    pub sprint: bool,
    /// Lean over an island edge
    pub peek: bool,
    /// Open or close the glide
    pub deploy: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Strip input the current mode doesn't allow
pub fn gate_input(mode: RunMode, input: &mut TickInput) {
    match mode {
        RunMode::Running => {}
        RunMode::Paused => {
            input.look = Vec2::ZERO;
            input.jump = false;
            input.deploy = false;
        }
        RunMode::Dead => {
            let pause = input.pause;
            *input = TickInput {
                pause,
                ..Default::default()
            };
        }
    }
}

/// Advance the session by one step of `dt` seconds
pub fn tick<Q: WorldQuery + ?Sized>(
    state: &mut GameState,
    input: &mut TickInput,
    world: &Q,
    dt: f32,
) {
    if input.pause {
        input.pause = false;
        state.toggle_pause();
    }

    gate_input(state.mode, input);

    // Don't tick if paused or dead
    if state.mode != RunMode::Running {
        return;
    }

    state.time_ticks += 1;

    let GameState {
        tuning,
        player,
        vitals,
        islands,
        rng,
        events,
        spawn_requests,
        ..
    } = state;
    let pt = &tuning.player;

    player::peek(player, input, events);

    if kinematics::integrate_vertical(player, input, pt, dt) {
        events.push(GameEvent::Jumped);
    }

    let reading = contact::probe(world, player, pt);
    player::apply_contact(player, vitals, reading, pt, events);
    player::deploy(player, input, pt, dt, events);
    player::locomotion(player, input, world, pt, dt);

    let died = player::update_health(vitals, player, events);
    player::update_score(vitals, player, events);
    player::update_look(player, input, pt);

    if died {
        log::info!(
            "Player died at height {} with score {:.0}",
            player.height(),
            vitals.score
        );
        state.set_mode(RunMode::Dead);
        return;
    }

    spawn_requests.extend(islands.observe(player.position, rng, &tuning.world));
}
