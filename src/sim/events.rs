//! Presentation events
//!
//! The simulation never drives cameras, audio or UI directly. It queues these events and
//! the shell decides what to play, shake or animate.

use serde::Serialize;

use super::state::RunMode;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Jump impulse applied
    Jumped,
    /// Leaning over an island edge
    PeekLean,
    /// Glide opened
    Deployed,
    /// Glide closed again; the chance for this fall stays spent
    DeployCancelled,
    /// Deploy timeout elapsed with the chance still unused
    DeployAvailable,
    /// Hard landing; the view tilts down by `tilt_degrees`
    BadLanding { tilt_degrees: f32 },
    /// Soft landing after a glide
    PerfectLanding { bonus: f32, label: String },
    /// Impact damage applied on landing
    Hurt { damage: f32, health: f32 },
    /// Health ran out
    Died,
    /// Fall-speed score accrued this tick
    ScoreIncreased { delta: f32, label: String },
    /// No score accrued this tick
    ScoreIdle,
    /// Run mode changed (cursor lock and time scale follow from it)
    ModeChanged { mode: RunMode },
}
