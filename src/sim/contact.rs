//! Ground contact and movement resolution
//!
//! Collision geometry belongs to the host engine. The simulation only asks whether the
//! contact sphere at the character's feet touches a layer, and how far a move gets.

use glam::Vec3;

use super::state::Player;
use crate::tuning::PlayerTuning;

/// Collision layers the contact sphere is tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactLayer {
    /// Walkable island surfaces
    Ground,
    /// Edge zones where peeking is possible
    Border,
}

/// Geometry queries provided by the host
pub trait WorldQuery {
    /// Does a sphere at `center` overlap anything on `layer`?
    fn check_sphere(&self, center: Vec3, radius: f32, layer: ContactLayer) -> bool;

    /// Resolve a character move. Unobstructed by default.
    fn sweep(&self, from: Vec3, delta: Vec3) -> Vec3 {
        from + delta
    }
}

/// Result of the per-tick contact check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactReading {
    pub grounded: bool,
    pub on_border: bool,
}

/// Sample ground and border contact at the player's feet
pub fn probe<Q: WorldQuery + ?Sized>(
    world: &Q,
    player: &Player,
    tuning: &PlayerTuning,
) -> ContactReading {
    let center = player.position - Vec3::Y * tuning.grounded_offset;
    ContactReading {
        grounded: world.check_sphere(center, tuning.grounded_radius, ContactLayer::Ground),
        on_border: world.check_sphere(center, tuning.grounded_radius, ContactLayer::Border),
    }
}

/// A world that reports fixed contact and never blocks movement
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedContact {
    pub grounded: bool,
    pub on_border: bool,
}

impl ScriptedContact {
    pub fn airborne() -> Self {
        Self::default()
    }

    pub fn ground() -> Self {
        Self {
            grounded: true,
            on_border: false,
        }
    }

    pub fn border() -> Self {
        Self {
            grounded: true,
            on_border: true,
        }
    }
}

impl WorldQuery for ScriptedContact {
    fn check_sphere(&self, _center: Vec3, _radius: f32, layer: ContactLayer) -> bool {
        match layer {
            ContactLayer::Ground => self.grounded,
            ContactLayer::Border => self.on_border,
        }
    }
}
