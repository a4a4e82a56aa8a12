//! Just Awake - a descent game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player controller, island generation, session)
//! - `tuning`: Data-driven game balance
//! - `hud`: Heads-up display text
//! - `audio`: Sound cue selection for simulation events
//! - `world`: Reference island field for headless runs

pub mod audio;
pub mod hud;
pub mod sim;
pub mod tuning;
pub mod world;

pub use tuning::{PlayerTuning, Tuning, TuningError, WorldTuning};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Simulation timestep used by the headless runner (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Squared look-input magnitude below which the view doesn't turn
    pub const LOOK_THRESHOLD: f32 = 0.01;
    /// Dead band around the target horizontal speed
    pub const SPEED_OFFSET: f32 = 0.1;
    /// Pitch below which a bad landing tilts the view less
    pub const BAD_LANDING_PITCH_SPLIT: f32 = 60.0;
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Wrap an angle (degrees) once into (-360, 360) and clamp it
#[inline]
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

/// Unit vector on the XZ plane for a heading angle (radians)
#[inline]
pub fn xz_direction(theta: f32) -> Vec3 {
    Vec3::new(theta.cos(), 0.0, theta.sin())
}

/// Integer height as the HUD and the island generator see it (truncated toward zero)
#[inline]
pub fn height_of(position: Vec3) -> i32 {
    position.y as i32
}
