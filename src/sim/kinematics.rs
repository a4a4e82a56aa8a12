//! Vertical kinematics: jump impulse, gravity and glide easing
//!
//! Runs against the motion state from the previous contact check; the fresh contact is
//! applied afterwards by the player state machine.

use super::state::{MotionState, Player};
use super::tick::TickInput;
use crate::lerp_clamped;
use crate::tuning::PlayerTuning;

/// Launch speed that reaches `height` under `gravity` (v = sqrt(2gh))
#[inline]
pub fn jump_velocity(height: f32, gravity: f32) -> f32 {
    (height * 2.0 * gravity.abs()).sqrt()
}

/// Advance vertical velocity and the jump/fall timers by one tick.
///
/// Returns `true` when a jump was triggered (the jump input is consumed).
pub fn integrate_vertical(
    player: &mut Player,
    input: &mut TickInput,
    tuning: &PlayerTuning,
    dt: f32,
) -> bool {
    let mut jumped = false;

    if player.grounded() {
        player.fall_timeout = tuning.fall_timeout;

        // Don't let velocity build up while standing
        if player.vertical_velocity < 0.0 {
            player.vertical_velocity = tuning.grounded_velocity;
        }

        let peeking = input.peek && player.on_border;
        if input.jump && player.jump_timeout <= 0.0 && !peeking {
            player.vertical_velocity = jump_velocity(tuning.jump_height, player.gravity(tuning));
            input.jump = false;
            jumped = true;
        }

        if player.jump_timeout >= 0.0 {
            player.jump_timeout -= dt;
        }
    } else {
        player.jump_timeout = tuning.jump_timeout;

        if player.fall_timeout >= 0.0 {
            player.fall_timeout -= dt;
        }

        input.jump = false;

        // Frame-rate dependent easing toward the glide speed
        if player.motion == MotionState::Deploying {
            player.vertical_velocity =
                lerp_clamped(player.vertical_velocity, tuning.glide_target_velocity, dt);
        }
    }

    // Only the upper bound stops gravity; a fall keeps accelerating
    if player.vertical_velocity < tuning.terminal_velocity {
        player.vertical_velocity += player.gravity(tuning) * dt;
    }

    jumped
}
