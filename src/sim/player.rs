//! Player state machine
//!
//! Composes kinematics with the contact reading: peeking, deploying, landing consequences,
//! impact damage, fall-speed scoring, locomotion and look.

use glam::Vec3;

use super::contact::{ContactReading, WorldQuery};
use super::events::GameEvent;
use super::state::{MotionState, Player, Vitals};
use super::tick::TickInput;
use crate::consts::{BAD_LANDING_PITCH_SPLIT, LOOK_THRESHOLD, SPEED_OFFSET};
use crate::hud::score_delta_label;
use crate::tuning::PlayerTuning;
use crate::{clamp_angle, lerp_clamped};

/// Impact damage banked for a fall at velocity `v`
pub fn impact_damage(v: f32) -> f32 {
    if v <= -20.0 {
        ((0.27 * v * v - 108.0) / 10.0).max(0.0)
    } else {
        0.0
    }
}

/// Score multiplier for a fall at velocity `v` (faster falls earn more)
pub fn fall_multiplier(v: f32) -> f32 {
    if v < -56.0 {
        4.0
    } else if v < -44.0 {
        2.5
    } else if v < -32.0 {
        1.8
    } else if v < -24.0 {
        1.3
    } else if v < -18.0 {
        0.8
    } else if v < -14.0 {
        0.6
    } else {
        0.0
    }
}

/// Score earned for one airborne tick at velocity `v`
#[inline]
pub fn fall_bonus(v: f32) -> f32 {
    v.abs() * fall_multiplier(v)
}

/// Peeking over a border swallows the jump and leans the view
pub fn peek(player: &Player, input: &mut TickInput, events: &mut Vec<GameEvent>) {
    if player.on_border && input.peek {
        input.jump = false;
        events.push(GameEvent::PeekLean);
    }
}

/// Apply the fresh contact reading: leave the ground, or land and settle the fall
pub fn apply_contact(
    player: &mut Player,
    vitals: &mut Vitals,
    contact: ContactReading,
    tuning: &PlayerTuning,
    events: &mut Vec<GameEvent>,
) {
    player.on_border = contact.on_border;

    if !contact.grounded {
        if player.grounded() {
            player.motion = MotionState::Falling;
        }
        return;
    }

    if !player.grounded() {
        if player.vertical_velocity < tuning.bad_landing_velocity {
            let tilt_degrees = if player.pitch.abs() < BAD_LANDING_PITCH_SPLIT {
                20.0
            } else {
                30.0
            };
            log::debug!("Bad landing at {:.1}", player.vertical_velocity);
            events.push(GameEvent::BadLanding { tilt_degrees });
        } else if !player.deploy_chance {
            let bonus = tuning.perfect_landing_bonus;
            vitals.score += bonus;
            log::debug!("Perfect landing, +{}", bonus);
            events.push(GameEvent::PerfectLanding {
                bonus,
                label: score_delta_label(bonus),
            });
        }
    }

    player.motion = MotionState::Grounded;
    player.deploy_timeout = tuning.deploy_timeout;
    player.deploy_chance = true;
}

/// Airborne deploy handling. The deploy input is consumed whenever it is seen.
pub fn deploy(
    player: &mut Player,
    input: &mut TickInput,
    tuning: &PlayerTuning,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if player.grounded() {
        return;
    }

    if input.deploy {
        if player.deploy_timeout <= 0.0 {
            if player.deploy_chance {
                player.vertical_velocity = tuning.glide_entry_velocity;
                player.motion = MotionState::Deploying;
                player.deploy_chance = false;
                events.push(GameEvent::Deployed);
            } else if player.motion == MotionState::Deploying {
                player.motion = MotionState::Falling;
                events.push(GameEvent::DeployCancelled);
            }
        }
        input.deploy = false;
    }

    if player.deploy_timeout >= 0.0 {
        player.deploy_timeout -= dt;
        if player.deploy_timeout < 0.0 && player.deploy_chance {
            events.push(GameEvent::DeployAvailable);
        }
    }
}

/// Horizontal movement plus the vertical step, resolved against the world
pub fn locomotion<Q: WorldQuery + ?Sized>(
    player: &mut Player,
    input: &TickInput,
    world: &Q,
    tuning: &PlayerTuning,
    dt: f32,
) {
    let moving = input.move_axis != glam::Vec2::ZERO;
    let target_speed = match (moving, input.sprint) {
        (false, _) => 0.0,
        (true, true) => tuning.sprint_speed,
        (true, false) => tuning.move_speed,
    };

    let current = player.horizontal_speed;
    let input_magnitude = if tuning.analog_movement {
        input.move_axis.length()
    } else {
        1.0
    };

    let speed = if current < target_speed - SPEED_OFFSET || current > target_speed + SPEED_OFFSET
    {
        let eased = lerp_clamped(
            current,
            target_speed * input_magnitude,
            dt * tuning.speed_change_rate,
        );
        (eased * 1000.0).round() / 1000.0
    } else {
        target_speed
    };

    let direction = if moving {
        let yaw = player.yaw.to_radians();
        let forward = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
        (right * input.move_axis.x + forward * input.move_axis.y).normalize_or_zero()
    } else {
        Vec3::ZERO
    };

    let delta = direction * speed * dt + Vec3::Y * player.vertical_velocity * dt;
    let from = player.position;
    player.position = world.sweep(from, delta);

    if dt > 0.0 {
        let travelled = player.position - from;
        player.horizontal_speed = Vec3::new(travelled.x, 0.0, travelled.z).length() / dt;
    }
}

/// Bank impact damage while falling and apply it on landing.
///
/// Returns `true` on the tick health runs out.
pub fn update_health(
    vitals: &mut Vitals,
    player: &Player,
    events: &mut Vec<GameEvent>,
) -> bool {
    let grounded = player.grounded();
    if !grounded {
        vitals.damage = impact_damage(player.vertical_velocity);
    }

    if vitals.damage != 0.0 && grounded {
        vitals.health -= vitals.damage;
        events.push(GameEvent::Hurt {
            damage: vitals.damage,
            health: vitals.health.max(0.0),
        });
        vitals.damage = 0.0;
    }

    if vitals.health < 0.0 {
        vitals.health = 0.0;
        if !vitals.dead {
            vitals.dead = true;
            events.push(GameEvent::Died);
            return true;
        }
    }
    false
}

/// Accrue fall-speed score for an airborne tick
pub fn update_score(vitals: &mut Vitals, player: &Player, events: &mut Vec<GameEvent>) {
    let before = vitals.score;
    if !player.grounded() {
        vitals.score += fall_bonus(player.vertical_velocity);
    }

    let delta = vitals.score - before;
    if delta != 0.0 {
        events.push(GameEvent::ScoreIncreased {
            delta,
            label: score_delta_label(delta),
        });
    } else {
        events.push(GameEvent::ScoreIdle);
    }
}

/// Turn the character and tilt the view from look input
pub fn update_look(player: &mut Player, input: &TickInput, tuning: &PlayerTuning) {
    if input.look.length_squared() < LOOK_THRESHOLD {
        return;
    }
    player.yaw = (player.yaw + input.look.x * tuning.rotation_speed).rem_euclid(360.0);
    player.pitch = clamp_angle(
        player.pitch + input.look.y * tuning.rotation_speed,
        tuning.bottom_clamp,
        tuning.top_clamp,
    );
}
